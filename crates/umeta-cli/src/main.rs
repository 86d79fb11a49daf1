use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use tracing::debug;
use umeta_core::config::parse_extension_list;
use umeta_core::{Config, JsonStore, Scanner};

mod progress;

use progress::Progress;

#[derive(Parser)]
#[command(name = "umeta")]
#[command(about = "Extract reflection metadata from annotated C++ headers", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a source tree and append the results to the data directory
    Scan {
        /// Source directory (defaults to the configured one)
        path: Option<PathBuf>,

        /// Extensions to scan; repeat or comma-separate
        #[arg(long = "ext")]
        extensions: Vec<String>,

        /// Output directory for record files
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Parse a single header and print the outcome as JSON
    Parse {
        file: PathBuf,

        /// Print compact JSON on one line
        #[arg(long)]
        compact: bool,
    },
    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut config = load_config(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Scan {
            path,
            extensions,
            out,
        } => {
            if let Some(path) = path {
                config.scan.source_dir = path;
            }
            let extensions: Vec<String> = extensions
                .iter()
                .flat_map(|list| parse_extension_list(list))
                .collect();
            if !extensions.is_empty() {
                config.scan.extensions = extensions;
            }
            if let Some(out) = out {
                config.output.data_dir = out;
            }
            run_scan(&config)
        }
        Commands::Parse { file, compact } => {
            let scanner = Scanner::with_config(config.scan, config.parser);
            let outcome = scanner
                .parse_file(&file)
                .wrap_err_with(|| format!("could not parse {}", file.display()))?;
            let json = if compact {
                serde_json::to_string(&outcome)?
            } else {
                serde_json::to_string_pretty(&outcome)?
            };
            println!("{json}");
            Ok(())
        }
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .wrap_err_with(|| format!("could not load config from {}", path.display())),
        None => Config::load().wrap_err("could not load config"),
    }
}

fn run_scan(config: &Config) -> Result<()> {
    let root = config.scan.source_dir.clone();
    let scanner = Scanner::with_config(config.scan.clone(), config.parser);
    let store = JsonStore::with_config(config.output.clone());

    let files = scanner.collect_files(&root)?;
    let progress = Progress::bar(files.len() as u64, "scanning");

    let result = scanner.scan_files(&files, &store, |path, _| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress.tick(&name);
    });

    let stats = match result {
        Ok(stats) => {
            progress.finish_ok("done");
            stats
        }
        Err(e) => {
            progress.finish_err("failed");
            return Err(e).wrap_err_with(|| format!("scan of {} failed", root.display()));
        }
    };

    println!("Scanned {} files in {}", stats.files, root.display());
    println!("  Containers: {}", stats.containers);
    println!("  Properties: {}", stats.properties);
    println!("  Functions:  {}", stats.functions);
    println!("  Failures:   {}", stats.failures);
    if stats.errors > 0 {
        println!("  Aborted:    {} (see log)", stats.errors);
    }
    println!("  Output:     {}", config.output.data_dir.display());
    Ok(())
}

fn init_tracing(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("UMETA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| color_eyre::eyre::eyre!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
