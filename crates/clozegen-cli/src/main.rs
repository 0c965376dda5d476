//! clozegen CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "clozegen", version, about = "Moodle cloze quiz generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in problems
    List,

    /// Generate Moodle XML quiz files
    Generate {
        /// Problem to generate
        #[arg(long, required_unless_present = "all", conflicts_with = "all")]
        problem: Option<String>,

        /// Generate every built-in problem
        #[arg(long)]
        all: bool,

        /// Output file (single problem only; default: <question base>.xml)
        #[arg(long, conflicts_with = "all")]
        output: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Moodle question category (overrides config)
        #[arg(long)]
        category: Option<String>,

        /// Suffix of the first question name (overrides config)
        #[arg(long)]
        first_index: Option<usize>,

        /// Stop after this many questions per problem (overrides config)
        #[arg(long)]
        limit: Option<usize>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print inputs and computed answers without rendering
    Preview {
        /// Problem to preview
        #[arg(long)]
        problem: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter clozegen.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clozegen=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List => commands::list::execute(),
        Commands::Generate {
            problem,
            all,
            output,
            output_dir,
            category,
            first_index,
            limit,
            config,
        } => commands::generate::execute(commands::generate::GenerateArgs {
            problem,
            all,
            output,
            output_dir,
            category,
            first_index,
            limit,
            config,
        }),
        Commands::Preview {
            problem,
            format,
            config,
        } => commands::preview::execute(problem, format, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
