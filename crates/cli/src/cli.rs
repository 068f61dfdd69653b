// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::PathBuf;

use crate::helpers::telemetry::setup_simple_tracing;
use crate::helpers::{parse_base, parse_secret};
use crate::{deal, recover};
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use num_bigint::BigInt;
use ssa_config::{load_config, AppConfig, OutputFormat, StrategyKind};
use tracing::{debug, instrument, Level};

#[derive(Parser, Debug)]
#[command(name = "ssa")]
#[command(about = "Recover Shamir-shared secrets from share sets that may contain corrupted shares", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,

    /// Indicate error levels by adding additional `-v` arguments. Eg. `ssa -vvv` will give you
    /// trace level output
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Silence all output. This argument cannot be used alongside `-v`
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        global = true
    )]
    quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,  //
                1 => Level::INFO,  // -v
                2 => Level::DEBUG, // -vv
                _ => Level::TRACE, // -vvv
            }
        }
    }

    /// Runs the command and returns whether every processed case succeeded
    #[instrument(skip_all)]
    pub fn execute(self) -> Result<bool> {
        setup_simple_tracing(self.log_level());

        let mut config = load_config(self.config.clone())?;
        debug!("Config loaded from: {:?}", config.config_file());

        match self.command {
            Commands::Recover {
                files,
                format,
                parallel,
                threads,
            } => {
                apply_overrides(&mut config, format, parallel, threads);
                recover::execute(&config, &files)
            }
            Commands::Deal {
                secret,
                threshold,
                shares,
                base,
                seed,
                corrupt,
            } => {
                deal::execute(deal::DealArgs {
                    secret,
                    threshold,
                    shares,
                    base,
                    seed,
                    corrupt,
                })?;
                Ok(true)
            }
        }
    }
}

/// Command line flags win over file and environment settings
fn apply_overrides(
    config: &mut AppConfig,
    format: Option<OutputFormat>,
    parallel: bool,
    threads: Option<usize>,
) {
    if let Some(format) = format {
        config.output.format = format;
    }
    if parallel || threads.is_some() {
        config.search.strategy = StrategyKind::Parallel;
    }
    if threads.is_some() {
        config.search.threads = threads;
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconstruct the secret of every test case in the given documents
    Recover {
        /// JSON documents to read. Reads stdin when empty or `-`
        files: Vec<PathBuf>,

        /// Output format
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Search subsets on a thread pool
        #[arg(long)]
        parallel: bool,

        /// Worker threads for the parallel search. Implies `--parallel`
        #[arg(long)]
        threads: Option<usize>,
    },

    /// Split a secret into shares and print them as a test case
    Deal {
        /// The secret as a non-negative decimal integer
        #[arg(long, value_parser = parse_secret)]
        secret: BigInt,

        /// Shares needed to reconstruct (k)
        #[arg(long, short = 'k')]
        threshold: usize,

        /// Shares to produce (n)
        #[arg(long, short = 'n')]
        shares: usize,

        /// Base the share values are written in
        #[arg(long, default_value = "10", value_parser = parse_base)]
        base: u32,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Replace the value of this share index with a wrong one. May be repeated
        #[arg(
            long,
            action = clap::ArgAction::Append,
            value_name = "IDX",
        )]
        corrupt: Vec<u64>,
    },
}
