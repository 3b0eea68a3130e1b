use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use vecedit::cli;
use vecedit::init_logging;

/// Vector drawing documents from the command line
#[derive(Parser, Debug)]
#[command(name = "vecedit")]
#[command(version, about, long_about = None)]
struct Args {
    /// Settings file (JSON or TOML)
    #[arg(long, value_name = "FILE", global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the shape tree with absolute positions
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Re-serialize a document
    Normalize {
        #[arg(value_name = "IN")]
        input: PathBuf,
        #[arg(value_name = "OUT")]
        output: PathBuf,
        /// Reject zero-size shapes and empty groups
        #[arg(long)]
        strict: bool,
    },
    /// Write an empty document
    New {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
    },
    /// Replay a scripted drawing session and save it
    Demo {
        #[arg(value_name = "OUT")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    init_logging()?;
    let args = Args::parse();
    let settings = cli::load_settings(args.settings.as_deref())?;

    match args.command {
        Command::Inspect { file } => print!("{}", cli::inspect(&file, settings)?),
        Command::Normalize {
            input,
            output,
            strict,
        } => {
            let count = cli::normalize(&input, &output, settings, strict)?;
            tracing::info!("Wrote {} shapes to {}", count, output.display());
        }
        Command::New {
            file,
            width,
            height,
        } => cli::new_document(&file, width, height)?,
        Command::Demo { output } => {
            let state = cli::demo(&output, settings)?;
            println!("{}", state.display_name());
        }
    }

    Ok(())
}
