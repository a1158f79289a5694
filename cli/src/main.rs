use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use math::PrimeField;
use recovery_core::{robust::DEFAULT_BATCH_SIZE, SelectionStrategy, ShareSet};

mod commands;

#[derive(Parser)]
#[command(name = "shamir-recover")]
#[command(
    about = "Recover a Shamir-shared secret, even with corrupted shares",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every subcommand that reads a share document.
#[derive(clap::Args)]
struct DocumentArgs {
    /// Share document (canonical, token list or indexed layout)
    file: PathBuf,

    /// Override the document's threshold k
    #[arg(long, short)]
    threshold: Option<usize>,

    /// Override the document's prime modulus (decimal)
    #[arg(long)]
    modulus: Option<PrimeField>,
}

impl DocumentArgs {
    fn load(&self) -> Result<ShareSet> {
        let mut set = ShareSet::from_path(&self.file).with_context(|| {
            format!("Failed to load shares from {}", self.file.display())
        })?;
        if let Some(threshold) = self.threshold {
            set = set.with_threshold(threshold);
        }
        if let Some(modulus) = &self.modulus {
            set = set.with_modulus(modulus.clone());
        }
        Ok(set)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Interpolate the secret from k trusted shares
    Secret {
        #[command(flatten)]
        document: DocumentArgs,

        /// Which shares to use: first, seeded:<n> or indices:<i>,<j>,..
        #[arg(long, default_value = "first")]
        select: SelectionStrategy,
    },

    /// Search for the polynomial most shares agree with
    Robust {
        #[command(flatten)]
        document: DocumentArgs,

        /// Override how many shares may be corrupted
        #[arg(long)]
        max_bad: Option<usize>,

        /// Evaluate candidate subsets on all cores
        #[arg(long, default_value = "false")]
        parallel: bool,

        /// Subsets per parallel batch
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// Give up after this many candidate subsets
        #[arg(long)]
        max_candidates: Option<u64>,
    },

    /// Show the parameters of a share document and the search cost
    Inspect {
        #[command(flatten)]
        document: DocumentArgs,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Secret { document, select } => {
            let set = document.load()?;
            commands::secret(&set, &select, &mut stdout)?;
        }
        Commands::Robust {
            document,
            max_bad,
            parallel,
            batch_size,
            max_candidates,
        } => {
            let mut set = document.load()?;
            if let Some(max_bad) = max_bad {
                set = set.with_max_bad(max_bad);
            }
            let options = commands::search_options(
                parallel,
                batch_size,
                max_candidates,
            );
            let found = commands::robust(&set, options, &mut stdout)?;
            if !found {
                return Ok(ExitCode::from(2));
            }
        }
        Commands::Inspect { document } => {
            let set = document.load()?;
            commands::inspect(&set, &mut stdout)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
