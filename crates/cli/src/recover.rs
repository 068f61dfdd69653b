// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use ssa_config::{AppConfig, OutputFormat};
use ssa_shares::{parse_cases, ConsistencySolver, Reconstruction, RecoveryResult, TestCase};
use tracing::{info, warn};

const STDIN: &str = "-";

#[derive(Serialize)]
struct CaseReport<'a> {
    source: &'a str,
    case: usize,
    #[serde(flatten)]
    result: &'a Reconstruction,
}

/// Returns `true` when every case of every document was reconstructed
pub fn execute(config: &AppConfig, files: &[PathBuf]) -> Result<bool> {
    let sources: Vec<PathBuf> = if files.is_empty() {
        vec![PathBuf::from(STDIN)]
    } else {
        files.to_vec()
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    let failures = run_sources(config, &sources, &mut stdout.lock(), &mut stderr.lock())?;

    if failures > 0 {
        warn!(failures, "some cases could not be reconstructed");
    }
    Ok(failures == 0)
}

/// Processes every source in order, returning the number of failures
///
/// A source that cannot be read counts as one failure.
fn run_sources<O: Write, E: Write>(
    config: &AppConfig,
    sources: &[PathBuf],
    out: &mut O,
    err: &mut E,
) -> Result<usize> {
    let mut failures = 0;
    for path in sources {
        let name = path.display().to_string();
        let document = match read_source(path) {
            Ok(document) => document,
            Err(e) => {
                writeln!(err, "{name}: {e:#}")?;
                failures += 1;
                continue;
            }
        };
        failures += process_document(config, &name, &document, out, err)?;
    }
    Ok(failures)
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new(STDIN) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Could not read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))
}

/// Processes every case in `document`, returning the number that failed
///
/// A failing case is reported on `err` and never stops the remaining ones.
pub fn process_document<O: Write, E: Write>(
    config: &AppConfig,
    source: &str,
    document: &str,
    out: &mut O,
    err: &mut E,
) -> Result<usize> {
    let cases = match parse_cases(document) {
        Ok(cases) => cases,
        Err(e) => {
            writeln!(err, "{source}: {e}")?;
            return Ok(1);
        }
    };
    info!(source, cases = cases.len(), "processing document");

    let mut failures = 0;
    for (index, case) in cases.iter().enumerate() {
        match reconstruct(config, case) {
            Ok(result) => write_result(config.output().format, source, index, &result, out)?,
            Err(e) => {
                failures += 1;
                writeln!(err, "case {source}#{index}: {e}")?;
            }
        }
    }
    Ok(failures)
}

fn reconstruct(config: &AppConfig, case: &TestCase) -> RecoveryResult<Reconstruction> {
    let set = case.to_share_set()?;
    ConsistencySolver::new(set.shares(), set.threshold().k)
        .with_strategy(config.search().strategy())
        .with_warn_candidates(u128::from(config.search().warn_candidates))
        .solve()
}

fn write_result<O: Write>(
    format: OutputFormat,
    source: &str,
    case: usize,
    result: &Reconstruction,
    out: &mut O,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let report = CaseReport {
                source,
                case,
                result,
            };
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        }
        OutputFormat::Text => {
            writeln!(
                out,
                "{source}#{case}: secret={} consistent={:?} inconsistent={:?}",
                result.secret, result.consistent, result.inconsistent
            )?;
        }
    }
    Ok(())
}
