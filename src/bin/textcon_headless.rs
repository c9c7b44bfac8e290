//! Textcon Headless Console Runner
//!
//! Feeds bytes from stdin or a file into a console and prints the resulting
//! state. Useful for testing and for inspecting the update stream a
//! renderer would receive.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use textcon::core::{Snapshot, Update, UpdateLog};
use textcon::{ConsoleConfig, FontId};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut view_width: Option<usize> = None;
    let mut view_height: Option<usize> = None;
    let mut font: Option<FontId> = None;
    let mut input_file: Option<String> = None;
    let mut output_format = OutputFormat::Text;
    let mut show_events = false;
    let mut blink_at: Option<u64> = None;
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-W" | "--view-width" => {
                i += 1;
                if i < args.len() {
                    view_width = args[i].parse().ok();
                }
            },
            "-H" | "--view-height" => {
                i += 1;
                if i < args.len() {
                    view_height = args[i].parse().ok();
                }
            },
            "-F" | "--font" => {
                i += 1;
                if i < args.len() {
                    match args[i].parse() {
                        Ok(id) => font = Some(id),
                        Err(e) => {
                            eprintln!("Error: {}", e);
                            return ExitCode::FAILURE;
                        },
                    }
                }
            },
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(PathBuf::from(&args[i]));
                }
            },
            "-f" | "--file" => {
                i += 1;
                if i < args.len() {
                    input_file = Some(args[i].clone());
                }
            },
            "-b" | "--blink" => {
                i += 1;
                if i < args.len() {
                    blink_at = args[i].parse().ok();
                }
            },
            "-e" | "--events" => {
                show_events = true;
            },
            "-j" | "--json" => {
                output_format = OutputFormat::Json;
            },
            "-t" | "--text" => {
                output_format = OutputFormat::Text;
            },
            "-h" | "--help" => {
                show_help = true;
            },
            _ => {
                // Treat as input file if no flag
                if input_file.is_none() && !args[i].starts_with('-') {
                    input_file = Some(args[i].clone());
                }
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let mut config = match &config_path {
        Some(path) => match ConsoleConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            },
        },
        None => ConsoleConfig::load_or_default(),
    };
    if let Some(width) = view_width {
        config.view_width = width;
    }
    if let Some(height) = view_height {
        config.view_height = height;
    }
    if let Some(id) = font {
        config.font = id;
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    // Read input
    let input_data = match &input_file {
        Some(path) => match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => {
            let mut data = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut data) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            data
        },
    };

    let mut console = config.build();
    let log = UpdateLog::new();
    console.set_observer(log.clone());

    tracing::info!(
        width = console.width(),
        height = console.height(),
        font = %console.font(),
        bytes = input_data.len(),
        "feeding console"
    );

    console.print_bytes(&input_data);
    if let Some(now_ms) = blink_at {
        console.blink(now_ms);
    }

    let updates = log.drain();
    tracing::info!(updates = updates.len(), "done");

    let snapshot = Snapshot::from_console(&console);
    match output_format {
        OutputFormat::Text => {
            println!(
                "Console State ({}x{}, {}):",
                snapshot.width, snapshot.height, snapshot.font
            );
            println!("Cursor: ({}, {})", snapshot.cursor.x, snapshot.cursor.y);
            println!("---");
            print!("{}", snapshot.to_text());
            println!("---");
        },
        OutputFormat::Json => match snapshot.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing snapshot: {}", e);
                return ExitCode::FAILURE;
            },
        },
    }

    if show_events {
        if let Err(e) = print_updates(&updates) {
            eprintln!("Error serializing updates: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

/// One JSON object per line
fn print_updates(updates: &[Update]) -> Result<(), serde_json::Error> {
    for update in updates {
        println!("{}", serde_json::to_string(update)?);
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn print_help() {
    println!("Textcon Headless Console Runner");
    println!();
    println!("Usage: textcon-headless [OPTIONS] [INPUT_FILE]");
    println!();
    println!("Options:");
    println!("  -W, --view-width <PX>   Viewport width in pixels (default: 640)");
    println!("  -H, --view-height <PX>  Viewport height in pixels (default: 480)");
    println!("  -F, --font <NAME>       Font: 8x8, 8x16 or 16x32 (default: 8x16)");
    println!("  -c, --config <PATH>     Load settings from a JSON config file");
    println!("  -f, --file <PATH>       Read input from file");
    println!("  -b, --blink <MS>        Sample the cursor blink at this time");
    println!("  -e, --events            Print the update stream as JSON lines");
    println!("  -j, --json              Output snapshot as JSON");
    println!("  -t, --text              Output snapshot as text (default)");
    println!("  -h, --help              Show this help message");
    println!();
    println!("If no input file is specified, reads from stdin.");
    println!();
    println!("Examples:");
    println!("  printf 'Hello\\tWorld\\n' | textcon-headless");
    println!("  textcon-headless -W 1024 -H 600 -F 16x32 input.txt");
    println!("  textcon-headless --json --events < input.txt > state.json");
}
