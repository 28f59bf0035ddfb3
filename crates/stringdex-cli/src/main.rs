//! Stringdex CLI
//!
//! Command-line surface for the string record store:
//! - `analyze`: compute the derived properties of a value (no store).
//! - `interpret`: show how a natural-language filter compiles to predicates.
//! - `repl`: interactive session against an in-memory store.
//!
//! The transport layer (HTTP or otherwise) is deliberately not here; this
//! binary is the composition root that owns the store and wires the
//! interpreter and evaluator together.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod repl;

#[derive(Parser)]
#[command(name = "stringdex")]
#[command(
    author,
    version,
    about = "Stringdex: content-addressed string records with heuristic NL filtering"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and print the derived properties of a string (JSON).
    Analyze {
        /// The string to analyze.
        value: String,
    },

    /// Interpret a natural-language filter query and print the resulting
    /// predicates (JSON), without evaluating anything.
    Interpret {
        /// Free-text query, e.g. "all single word palindromic strings".
        query: String,
    },

    /// Start an interactive session against a fresh in-memory store.
    Repl {
        /// Commands to run before reading from stdin (repeatable). The
        /// session exits after the last one if stdin is not a terminal.
        #[arg(short, long)]
        command: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { value } => {
            let props = stringdex_store::extract(&value);
            println!("{}", serde_json::to_string_pretty(&props)?);
            Ok(())
        }
        Commands::Interpret { query } => {
            let predicates = stringdex_query::interpret(&query)?;
            let interpreted = stringdex_query::InterpretedQuery {
                original: query,
                predicates,
            };
            println!("{}", serde_json::to_string_pretty(&interpreted)?);
            Ok(())
        }
        Commands::Repl { command } => repl::cmd_repl(&command),
    }
}
