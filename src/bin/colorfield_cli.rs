//! ColorField CLI - Bridge interface for scripting
//!
//! Commands: palettes, validate, generate
//! Outputs JSON to stdout
//! Returns non-zero on validation failure

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use colorfield_core::{GenerateParams, GenerationPipeline, PaletteTheme};

#[derive(Parser)]
#[command(name = "colorfield-cli")]
#[command(about = "ColorField CLI - Deterministic Color-Field Painting Engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the palette themes and their fixed color tables
    Palettes,

    /// Validate painting parameters
    Validate {
        /// JSON payload (GenerateParams)
        #[arg(short, long)]
        payload: String,
    },

    /// Generate a painting
    Generate {
        /// JSON payload (GenerateParams); omit for engine defaults
        #[arg(short, long, default_value = "{}")]
        payload: String,

        /// Write the PNG here instead of inlining it in the manifest
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let pipeline = GenerationPipeline::new();

    match cli.command {
        Commands::Palettes => {
            let themes: Vec<_> = PaletteTheme::ALL
                .iter()
                .map(|t| match t.table() {
                    Some(table) => serde_json::json!({
                        "name": t.name(),
                        "backgrounds": table.backgrounds,
                        "stripes": table.stripes,
                    }),
                    None => serde_json::json!({
                        "name": t.name(),
                        "backgrounds": serde_json::Value::Null,
                        "stripes": serde_json::Value::Null,
                    }),
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&themes).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Validate { payload } => {
            let params: GenerateParams = match serde_json::from_str(&payload) {
                Ok(p) => p,
                Err(e) => {
                    println!(r#"{{"valid": false, "error": "Invalid payload: {}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };

            let result = pipeline.validate_params(&params);
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
            if result.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2) // Validation failure
            }
        }

        Commands::Generate { payload, out } => {
            let params: GenerateParams = match serde_json::from_str(&payload) {
                Ok(p) => p,
                Err(e) => {
                    println!(r#"{{"success": false, "error": "Invalid payload: {}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };

            match pipeline.generate_painting(&params) {
                Ok(painting) => {
                    if let Some(path) = &out {
                        let png = match base64::Engine::decode(
                            &base64::engine::general_purpose::STANDARD,
                            &painting.file.data_base64,
                        ) {
                            Ok(bytes) => bytes,
                            Err(e) => {
                                println!(r#"{{"success": false, "error": "{}"}}"#, e);
                                return ExitCode::FAILURE;
                            }
                        };
                        if let Err(e) = std::fs::write(path, png) {
                            println!(
                                r#"{{"success": false, "error": "Failed to write {}: {}"}}"#,
                                path.display(),
                                e
                            );
                            return ExitCode::FAILURE;
                        }
                    }

                    let mut output = serde_json::json!({
                        "success": true,
                        "painting": painting,
                    });
                    if let Some(path) = out {
                        // Pixels are on disk; don't repeat them on stdout.
                        output["painting"]["file"]["data_base64"] = serde_json::Value::Null;
                        output["path"] = serde_json::json!(path.display().to_string());
                    }

                    println!("{}", serde_json::to_string_pretty(&output).unwrap());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    let output = serde_json::json!({
                        "success": false,
                        "error": e.to_string(),
                    });
                    println!("{}", serde_json::to_string(&output).unwrap());
                    ExitCode::from(2) // Generation failure (validation)
                }
            }
        }
    }
}
