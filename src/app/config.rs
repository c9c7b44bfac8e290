//! Configuration for building a console

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{Console, FontId, Palette, DEFAULT_BLINK_RATE_MS, TAB_WIDTH};

/// Console configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Viewport width in pixels
    pub view_width: usize,
    /// Viewport height in pixels
    pub view_height: usize,
    /// Initial font
    pub font: FontId,
    /// Cursor blink on-phase in milliseconds
    pub blink_rate_ms: u32,
    /// Requested tab width
    pub tab_width: usize,
    /// The 16 palette colors
    pub palette: Palette,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            view_width: 640,
            view_height: 480,
            font: FontId::default(),
            blink_rate_ms: DEFAULT_BLINK_RATE_MS,
            tab_width: TAB_WIDTH,
            palette: Palette::default(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ConsoleConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from default location or return default config
    pub fn load_or_default() -> Self {
        // Try to load from ~/.config/textcon/config.json
        if let Some(config_dir) = dirs_config_path() {
            let config_path = config_dir.join("config.json");
            if config_path.exists() {
                match Self::load(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("ignoring {}: {}", config_path.display(), e);
                    },
                }
            }
        }
        Self::default()
    }

    /// Check that the viewport holds at least one cell of the font
    pub fn validate(&self) -> Result<(), ConfigError> {
        let font = self.font.font();
        if self.view_width < font.char_width || self.view_height < font.char_height {
            return Err(ConfigError::InvalidView {
                width: self.view_width,
                height: self.view_height,
                font: self.font,
            });
        }
        Ok(())
    }

    /// Create a console with these settings
    pub fn build(&self) -> Console {
        let mut console = Console::new(self.view_width, self.view_height, self.font);
        console.set_palette(self.palette);
        console.set_blink_rate(self.blink_rate_ms);
        console.set_tab_width(self.tab_width);
        console
    }
}

/// Get the configuration directory path
fn dirs_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("textcon"))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("a {width}x{height} viewport cannot hold a single {font} cell")]
    InvalidView {
        width: usize,
        height: usize,
        font: FontId,
    },
}
