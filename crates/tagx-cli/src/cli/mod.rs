//! CLI for the tagx tag frequency extractor.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tagx_core::config;
use tagx_core::SortOrder;

use commands::{run_completions, run_extract, run_man, run_shell, run_show, run_stop_words};

/// Top-level CLI for tagx.
#[derive(Debug, Parser)]
#[command(name = "tagx", version)]
#[command(about = "tagx: count the tags of a text file, minus stop words", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/tagx/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Listing order as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// By tag, a to z.
    Alpha,
    /// By count, highest first.
    Count,
}

impl From<OrderArg> for SortOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Alpha => SortOrder::Alphabetical,
            OrderArg::Count => SortOrder::Frequency,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Extract tags from a text file and print or save the frequency table.
    Extract {
        /// Text file to read.
        text: PathBuf,

        /// Stop-word list, one word per line (defaults to the config's default_stop_words).
        #[arg(long, short = 's', value_name = "FILE")]
        stop_words: Option<PathBuf>,

        /// Save the table here instead of printing it.
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// Listing order (defaults to the config's output_order).
        #[arg(long, value_enum)]
        order: Option<OrderArg>,
    },

    /// Load a stop-word list and report on it.
    StopWords {
        /// Stop-word list, one word per line.
        path: PathBuf,
    },

    /// Print a saved tag listing.
    Show {
        /// Listing written by `extract --output` or the shell's `save`.
        path: PathBuf,

        /// Listing order (defaults to the config's output_order).
        #[arg(long, value_enum)]
        order: Option<OrderArg>,
    },

    /// Interactive session: open a text, load stop words, extract, save.
    Shell,

    /// Print shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff).
    Man,
}

impl CliCommand {
    /// Commands that only describe the CLI itself never touch the config file.
    pub fn uses_config(&self) -> bool {
        !matches!(self, CliCommand::Completions { .. } | CliCommand::Man)
    }

    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if !cli.command.uses_config() {
            return match cli.command {
                CliCommand::Completions { shell } => run_completions(shell),
                _ => run_man(),
            };
        }

        let cfg = match &cli.config {
            Some(path) => config::load_or_init_at(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        let order_or_default =
            |order: Option<OrderArg>| order.map(SortOrder::from).unwrap_or(cfg.output_order);

        match cli.command {
            CliCommand::Extract {
                text,
                stop_words,
                output,
                order,
            } => run_extract(
                &cfg,
                &text,
                stop_words.as_deref(),
                output.as_deref(),
                order_or_default(order),
            )?,
            CliCommand::StopWords { path } => run_stop_words(&cfg, &path)?,
            CliCommand::Show { path, order } => run_show(&path, order_or_default(order))?,
            CliCommand::Shell => run_shell(&cfg)?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
