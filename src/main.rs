mod commands;
mod config;

use std::io;

use clap::{Args, Parser, Subcommand};
use tracing::Level;

use commands::{CliError, OutputFormat};
use config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "tikzgrid", about = "Import, normalize and inspect TikZ diagram text")]
struct Cli {
    /// Scale applied to imported coordinates (overrides `TIKZGRID_SCALE`).
    #[arg(long, global = true, value_parser = config::scale_arg)]
    scale: Option<f64>,

    /// Clockwise rotation in degrees (overrides `TIKZGRID_ROTATION_DEG`).
    #[arg(long, global = true, allow_negative_numbers = true, value_parser = config::rotation_arg)]
    rotation: Option<f64>,

    /// Log parser decisions to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse diagram text and print it back normalized.
    Import(InputArgs),
    /// Turn a list of `x, y` lines into a filled polygon.
    Vectors(InputArgs),
    /// Count shapes per kind.
    Check(InputArgs),
    /// Print the display list for a viewport as JSON.
    Scene {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, default_value_t = 1200.0)]
        width: f64,
        #[arg(long, default_value_t = 800.0)]
        height: f64,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input files, or - for stdin.
    #[arg(default_value = "-")]
    files: Vec<String>,

    /// Print JSON instead of diagram text.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Wrap diagram text in a tikzpicture environment.
    #[arg(long, default_value_t = false, conflicts_with = "json")]
    picture: bool,
}

impl InputArgs {
    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.picture {
            OutputFormat::Picture
        } else {
            OutputFormat::Text
        }
    }

    fn read(&self) -> Result<Vec<String>, CliError> {
        self.files.iter().map(|path| read_input(path)).collect()
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let config = CliConfig::from_env()?.with_overrides(cli.scale, cli.rotation);
    tracing::debug!(scale = config.scale, rotation_deg = config.rotation_deg, "placement");

    let output = match &cli.command {
        Command::Import(args) => commands::import(&args.read()?, config, args.format())?,
        Command::Vectors(args) => commands::vectors(&args.read()?.join("\n"), config, args.format())?,
        Command::Check(args) => commands::check(&args.read()?, config, args.format())?,
        Command::Scene { input, width, height } => commands::scene(&input.read()?, config, *width, *height)?,
    };
    print!("{output}");
    Ok(())
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        return Ok(io::read_to_string(io::stdin())?);
    }
    Ok(std::fs::read_to_string(path)?)
}
