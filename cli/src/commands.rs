use std::io::Write;

use anyhow::{Context, Result};
use recovery_core::{
    combinations::binomial, reconstruct_robust_source, reconstruct_source,
    SearchOptions, SearchOutcome, SelectionStrategy, ShareSet, ShareSource,
};

pub fn search_options(
    parallel: bool,
    batch_size: usize,
    max_candidates: Option<u64>,
) -> SearchOptions {
    let options = if parallel {
        SearchOptions::parallel(batch_size)
    } else {
        SearchOptions::sequential()
    };
    match max_candidates {
        Some(limit) => options.with_max_candidates(limit),
        None => options,
    }
}

/// Trusting path: print `f(0)` interpolated from the selected shares.
pub fn secret(
    set: &ShareSet,
    select: &SelectionStrategy,
    out: &mut impl Write,
) -> Result<()> {
    let secret = reconstruct_source(set, select)
        .context("Trusting reconstruction failed")?;
    writeln!(out, "Secret: {secret}")?;
    Ok(())
}

/// Robust path. Returns whether a polynomial was found.
pub fn robust(
    set: &ShareSet,
    options: SearchOptions,
    out: &mut impl Write,
) -> Result<bool> {
    let outcome = reconstruct_robust_source(set, options)
        .context("Robust reconstruction failed")?;

    match &outcome {
        SearchOutcome::Found(recovered) => {
            writeln!(
                out,
                "Correct polynomial coefficients (mod {}):",
                set.field().modulus()
            )?;
            for (i, coeff) in
                recovered.polynomial.coefficients().iter().enumerate()
            {
                writeln!(out, "x^{i} = {coeff}")?;
            }
            writeln!(out, "Secret: {}", recovered.secret)?;
            if recovered.outliers.is_empty() {
                writeln!(out, "Corrupted shares: none")?;
            } else {
                let xs: Vec<String> = recovered
                    .outliers
                    .iter()
                    .map(|&i| set.shares()[i].x.to_string())
                    .collect();
                writeln!(out, "Corrupted shares (x): {}", xs.join(", "))?;
            }
        }
        SearchOutcome::Exhausted(_) => {
            writeln!(out, "No valid polynomial found.")?;
        }
        SearchOutcome::Cancelled(report) => {
            writeln!(out, "No valid polynomial found.")?;
            eprintln!(
                "Search stopped after {} candidate subsets",
                report.examined
            );
        }
    }

    let report = outcome.report();
    eprintln!(
        "Examined {} subsets ({} degenerate), best agreement {}/{}",
        report.examined,
        report.degenerate,
        report.best_matches,
        set.share_count()
    );

    Ok(outcome.is_found())
}

pub fn inspect(set: &ShareSet, out: &mut impl Write) -> Result<()> {
    let n = set.share_count();
    let k = set.threshold();
    writeln!(out, "Field: {}", set.field())?;
    writeln!(out, "Shares: {n}")?;
    writeln!(out, "Threshold: {k}")?;
    writeln!(out, "Max bad: {}", set.max_bad())?;
    match binomial(n, k) {
        Some(cost) => writeln!(out, "Candidate subsets: {cost}")?,
        None => writeln!(out, "Candidate subsets: more than 2^128")?,
    }
    Ok(())
}
