//! Codegen Output CLI
//!
//! Usage:
//!   codegen-output [OPTIONS] [PLAN]
//!
//! Options:
//!   -c, --config <FILE>              Output configuration (TOML format)
//!   -s, --source-dir <DIR>           Root directory for generated sources
//!   -o, --class-dir <DIR>            Root directory for resources
//!   --strip-trailing-whitespace      Post-process sources before commit
//!   -h, --help                       Print help

use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codegen_output::{FsSink, GenerationPlan, Output, OutputConfig, TrimTrailingWhitespace};

#[derive(Parser)]
#[command(name = "codegen-output")]
#[command(about = "Commit generated sources and service manifests from a generation plan")]
struct Cli {
    /// Generation plan (reads from stdin if not provided)
    plan: Option<PathBuf>,

    /// Output configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root directory for generated sources
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Root directory for compiled output and resources
    #[arg(short = 'o', long)]
    class_dir: Option<PathBuf>,

    /// Strip trailing whitespace from generated sources
    #[arg(long)]
    strip_trailing_whitespace: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codegen_output=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => match OutputConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => OutputConfig::default(),
    };
    if let Some(dir) = cli.source_dir {
        config.source_dir = Some(dir);
    }
    if let Some(dir) = cli.class_dir {
        config.class_dir = Some(dir);
    }

    // Read plan
    let plan = match &cli.plan {
        Some(path) => GenerationPlan::from_file(path),
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            GenerationPlan::from_toml(&buffer)
        }
    };
    let plan = match plan {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Error loading plan: {}", e);
            std::process::exit(1);
        }
    };

    let source_dir = config
        .source_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("generated/sources"));
    let class_dir = config
        .class_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("generated/classes"));
    let mut sink = FsSink::new(source_dir, class_dir);

    let result = if cli.strip_trailing_whitespace {
        let mut output = Output::new(&mut sink, config).with_rewrite(TrimTrailingWhitespace);
        plan.run(&mut output).and_then(|()| output.finish())
    } else {
        let mut output = Output::new(&mut sink, config);
        plan.run(&mut output).and_then(|()| output.finish())
    };

    for diagnostic in sink.diagnostics().iter() {
        eprintln!("{}", diagnostic);
    }

    match result {
        Ok(summary) => {
            println!(
                "{} written, {} regenerated, {} collisions, {} manifests ({} entries)",
                summary.sources_written,
                summary.sources_regenerated,
                summary.source_collisions,
                summary.resources_committed,
                summary.resource_entries
            );
            if sink.diagnostics().has_errors() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
