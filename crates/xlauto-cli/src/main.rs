//! xlauto CLI - convert CSV to and from encoded range data

mod convert;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use convert::{csv_to_grid, decode_lenient, describe, grid_to_csv, CsvOptions};

#[derive(Parser)]
#[command(name = "xlauto")]
#[command(
    author,
    version,
    about = "Convert CSV to and from the encoded form used for bulk range transfer"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a CSV file as range data
    Encode {
        #[command(flatten)]
        files: IoArgs,

        #[command(flatten)]
        csv: CsvArgs,
    },

    /// Decode range data to CSV
    Decode {
        #[command(flatten)]
        files: IoArgs,

        #[command(flatten)]
        csv: CsvArgs,
    },

    /// Show dimensions and a preview of encoded range data
    Inspect {
        /// Input file (default: stdin)
        input: Option<PathBuf>,

        /// Number of rows to preview
        #[arg(short, long, default_value = "10")]
        rows: usize,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input file (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct CsvArgs {
    /// CSV field delimiter
    #[arg(short, long, default_value = ",")]
    delimiter: char,

    /// CSV has a header row
    #[arg(long)]
    header: bool,
}

impl CsvArgs {
    fn options(&self) -> Result<CsvOptions> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("Delimiter '{}' is not an ASCII character", self.delimiter))?;
        Ok(CsvOptions {
            delimiter,
            has_header: self.header,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encode { files, csv } => encode(&files, &csv.options()?),
        Commands::Decode { files, csv } => decode(&files, &csv.options()?),
        Commands::Inspect { input, rows } => inspect(input.as_deref(), rows),
    }
}

fn encode(files: &IoArgs, options: &CsvOptions) -> Result<()> {
    let grid = match &files.input {
        Some(path) => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open '{}'", path.display()))?;
            csv_to_grid(file, options)
        }
        None => csv_to_grid(io::stdin().lock(), options),
    }?;

    let encoded = xlauto::encode(&grid);
    tracing::info!(
        "Encoded {}x{} grid into {} bytes",
        grid.rows(),
        grid.columns(),
        encoded.len()
    );

    match &files.output {
        Some(path) => fs::write(path, &encoded)
            .with_context(|| format!("Failed to write '{}'", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{encoded}").context("Failed to write to stdout")
        }
    }
}

fn decode(files: &IoArgs, options: &CsvOptions) -> Result<()> {
    let input = read_input(files.input.as_deref())?;
    let grid = decode_lenient(&input).context("Malformed range data")?;
    tracing::info!("Decoded {}x{} grid", grid.rows(), grid.columns());

    match &files.output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?;
            grid_to_csv(&grid, file, options)
        }
        None => grid_to_csv(&grid, io::stdout().lock(), options),
    }
}

fn inspect(input: Option<&Path>, preview_rows: usize) -> Result<()> {
    let input = read_input(input)?;
    let grid = decode_lenient(&input).context("Malformed range data")?;
    print!("{}", describe(&grid, input.len(), preview_rows));
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const ENCODED: &str = "2#5#3#abc2#de4#fghi1#34#52352#234#53530#4#32532#32";

    fn run_args(args: &[&str]) -> Result<()> {
        run(Cli::try_parse_from(std::iter::once("xlauto").chain(args.iter().copied()))?)
    }

    #[test]
    fn test_encode_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.txt");
        fs::write(&input, "abc,de,fghi,3,5235\n23,5353,,3253,32\n").unwrap();

        run_args(&[
            "encode",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), ENCODED);
    }

    #[test]
    fn test_decode_file_with_delimiter() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.csv");
        fs::write(&input, format!("{ENCODED}\n")).unwrap();

        run_args(&[
            "decode",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-d",
            ";",
        ])
        .unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "abc;de;fghi;3;5235\n23;5353;;3253;32\n"
        );
    }

    #[test]
    fn test_decode_malformed_input_fails() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bad.txt");
        let output = dir.path().join("out.csv");
        fs::write(&input, "2#3#").unwrap();

        let err = run_args(&[
            "decode",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap_err();

        assert_eq!(err.to_string(), "Malformed range data");
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_reports_path() {
        let err = run_args(&["inspect", "/nonexistent/xlauto/input.txt"]).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/xlauto/input.txt"));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let args = CsvArgs {
            delimiter: '§',
            header: false,
        };
        assert!(args.options().is_err());
    }

    #[test]
    fn test_verbose_flag_counts() {
        let cli = Cli::try_parse_from(["xlauto", "-vv", "inspect"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let cli = Cli::try_parse_from(["xlauto", "inspect", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }
}
