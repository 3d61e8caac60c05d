//! judgetest CLI — generate judge/referee true/false tests as PDFs.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use judgetest_core::Category;

mod commands;

#[derive(Parser)]
#[command(
    name = "judgetest",
    version,
    about = "Judge/referee true/false test generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a randomized test
    Generate {
        /// Question bank to draw from: kumite or kata
        #[arg(long)]
        category: Category,

        /// Number of questions (default from config)
        #[arg(long)]
        count: Option<usize>,

        /// Page header title (default: "<Category> Questions")
        #[arg(long)]
        title: Option<String>,

        /// Output directory (default from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: pdf, json, or both comma-separated
        #[arg(long, default_value = "pdf")]
        format: String,

        /// Print the questions to the terminal as well
        #[arg(long)]
        preview: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check both question banks
    Validate {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and sample question banks
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("judgetest=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            category,
            count,
            title,
            output,
            format,
            preview,
            config,
        } => commands::generate::execute(category, count, title, output, format, preview, config),
        Commands::Validate { config } => commands::validate::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
