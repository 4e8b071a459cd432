mod output;
mod spec_file;

use anyhow::{Context, Result};
use clap::Parser;
use shiftopt::{GetOpt, Ordering, ScanConfig, UnknownPolicy};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use crate::output::{Format, render};
use crate::spec_file::{SpecFile, load_spec_file};

#[derive(Parser, Debug)]
#[command(name = "shiftopt")]
#[command(
    version,
    about = "Normalize command-line arguments the way getopt_long sees them",
    long_about = None
)]
struct Cli {
    /// Short option string, e.g. `ab:c::`
    #[arg(short = 'o', long = "options", value_name = "SHORTSPEC")]
    options: Option<String>,

    /// Long option spec, e.g. `all,output:,size::` (may be repeated)
    #[arg(short = 'l', long = "longoptions", value_name = "LONGSPEC")]
    longoptions: Vec<String>,

    /// Program name reported as argv[0]
    #[arg(short, long, value_name = "NAME")]
    name: Option<String>,

    /// JSON spec file (default: ./shiftopt.json if present)
    #[arg(short, long, value_name = "FILE")]
    spec: Option<PathBuf>,

    /// Keep unrecognized options instead of failing
    #[arg(long)]
    lenient: bool,

    /// Stop option scanning at the first non-option argument
    #[arg(long)]
    require_order: bool,

    /// Only accept full long option names
    #[arg(long)]
    no_abbrev: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Shell)]
    format: Format,

    /// Arguments to normalize
    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct Settings {
    name: String,
    short: String,
    long: String,
    config: ScanConfig,
}

impl Settings {
    /// Spec file values first, then command-line flags, then `POSIXLY_CORRECT`.
    fn resolve(cli: &Cli, file: SpecFile, posixly_correct: bool) -> Self {
        let long = if cli.longoptions.is_empty() {
            file.long_options.map(|l| l.to_spec()).unwrap_or_default()
        } else {
            cli.longoptions.join(",")
        };

        let require_order = cli.require_order || file.require_order.unwrap_or(false);
        let lenient = cli.lenient || file.lenient.unwrap_or(false);
        let abbreviations = !cli.no_abbrev && file.abbreviations.unwrap_or(true);

        Self {
            name: cli
                .name
                .clone()
                .or(file.name)
                .unwrap_or_else(|| env!("CARGO_BIN_NAME").to_string()),
            short: cli.options.clone().or(file.options).unwrap_or_default(),
            long,
            config: ScanConfig {
                ordering: if require_order {
                    Ordering::RequireOrder
                } else {
                    Ordering::Permute
                },
                unknown: if lenient {
                    UnknownPolicy::PassThrough
                } else {
                    UnknownPolicy::Error
                },
                abbreviations,
                posixly_correct,
            },
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let file = load_spec_file(cli.spec.as_deref())?.unwrap_or_default();
    let posixly_correct = std::env::var_os("POSIXLY_CORRECT").is_some();
    let settings = Settings::resolve(&cli, file, posixly_correct);
    tracing::debug!(?settings, "resolved settings");

    let argv: Vec<&str> = std::iter::once(settings.name.as_str())
        .chain(cli.args.iter().map(String::as_str))
        .collect();

    let args = GetOpt::new(&settings.short, &settings.long)
        .config(settings.config)
        .parse(&argv)
        .with_context(|| format!("{}: failed to parse arguments", settings.name))?;

    println!("{}", render(&args, cli.format)?);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
