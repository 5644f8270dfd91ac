//! Tally - a plain-text spreadsheet evaluator for CSV/TSV files

mod config;
mod render;

use anyhow::{Context, bail};
use std::env;
use std::path::PathBuf;
use tally_core::{CellRef, Sheet, TallyError};
use tally_engine::builtins::BUILTINS;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Usage: tally [OPTIONS] <FILE>");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <FILE>                    Sheet to load (.csv, or .tsv for tab-separated)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -e, --eval <OUT>          Write evaluated values to OUT");
    eprintln!("  -w, --write <OUT>         Write raw cell text to OUT");
    eprintln!("  -p, --print               Print the evaluated sheet (default)");
    eprintln!("  --fill <A1:B5>            Drag-fill from the first cell across the range");
    eprintln!("                            (can be repeated)");
    eprintln!("  --config <PATH>           Load display settings from a TOML file");
    eprintln!("  -v, --verbose             Enable debug logging");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Formula functions:");
    for builtin in BUILTINS {
        eprintln!("  {:<26}{}", builtin.usage, builtin.description);
    }
}

#[derive(Default)]
struct Options {
    file_path: Option<PathBuf>,
    eval_output: Option<PathBuf>,
    raw_output: Option<PathBuf>,
    print: bool,
    fills: Vec<String>,
    config_file: Option<PathBuf>,
    verbose: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-e" | "--eval" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --eval requires a file path");
                    std::process::exit(1);
                }
                options.eval_output = Some(PathBuf::from(&args[i]));
            }
            "-w" | "--write" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --write requires a file path");
                    std::process::exit(1);
                }
                options.raw_output = Some(PathBuf::from(&args[i]));
            }
            "-p" | "--print" => options.print = true,
            "--fill" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --fill requires a range");
                    std::process::exit(1);
                }
                options.fills.push(args[i].to_string());
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
                options.config_file = Some(PathBuf::from(&args[i]));
            }
            "-v" | "--verbose" => options.verbose = true,
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if options.file_path.is_none() {
                    options.file_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    init_logging(options.verbose);

    if let Err(e) = run(&options) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(options: &Options) -> anyhow::Result<()> {
    let Some(path) = &options.file_path else {
        print_usage();
        bail!("missing input file");
    };

    let (config, warnings) = config::load_config(options.config_file.as_ref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    let mut sheet =
        Sheet::load(path).with_context(|| format!("failed to load {}", path.display()))?;

    for fill in &options.fills {
        let (source, target) =
            parse_fill(fill).with_context(|| format!("invalid fill range {:?}", fill))?;
        debug!(%source, %target, "fill");
        sheet.fill(source, target);
    }

    if let Some(output_path) = &options.eval_output {
        sheet
            .export_values(output_path, config.bar_width)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        eprintln!("Exported to {}", output_path.display());
    }
    if let Some(output_path) = &options.raw_output {
        sheet
            .save(output_path)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        eprintln!("Saved to {}", output_path.display());
    }

    let wrote_file = options.eval_output.is_some() || options.raw_output.is_some();
    if options.print || !wrote_file {
        print!("{}", render::render_table(&sheet, &config));
    }
    Ok(())
}

/// Split `B1:B5` into the cell to copy and the far corner of the fill.
fn parse_fill(text: &str) -> tally_core::Result<(CellRef, CellRef)> {
    let (source, target) = text
        .split_once(':')
        .ok_or_else(|| TallyError::InvalidRange(format!("{:?}: expected FROM:TO", text)))?;
    Ok((source.parse()?, target.parse()?))
}
