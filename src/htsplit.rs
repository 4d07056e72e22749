//! HT Bin Splitting
//!
//! Derives one process per HT bin from a parent process. Bin `i` covers
//! `[thresholds[i], thresholds[i + 1])`; the last bin has no upper edge.

use crate::error::{Error, Result};
use crate::models::run_card::{IHTMAX, IHTMIN, UNBOUNDED};
use crate::models::ProcessDefinition;

/// HT lower edges used when none are configured
pub const DEFAULT_THRESHOLDS: [u32; 5] = [0, 400, 800, 1600, 3200];

/// Check that thresholds are strictly increasing
pub fn validate_thresholds(thresholds: &[u32]) -> Result<()> {
    if let Some(pair) = thresholds.windows(2).find(|w| w[0] >= w[1]) {
        return Err(Error::InvalidThresholds {
            thresholds: thresholds.to_vec(),
            reason: format!("{} is not below {}", pair[0], pair[1]),
        });
    }
    Ok(())
}

/// Name of the bin `[ihtmin, ihtmax)` derived from `parent`
pub fn bin_name(parent: &str, ihtmin: u32, ihtmax: Option<u32>) -> String {
    match ihtmax {
        Some(max) => format!("{}_ihtmin{:04}_ihtmax{:04}", parent, ihtmin, max),
        None => format!("{}_ihtmin{:04}", parent, ihtmin),
    }
}

/// Split `proc` into one process per HT bin.
///
/// Every bin gets its own copy of the parent's run card with `ihtmin` and
/// `ihtmax` overridden; `ihtmax` is `-1` for the open-ended last bin.
pub fn split(proc: &ProcessDefinition, thresholds: &[u32]) -> Vec<ProcessDefinition> {
    thresholds
        .iter()
        .enumerate()
        .map(|(i, &ihtmin)| {
            let ihtmax = thresholds.get(i + 1).copied();

            let mut run_card = proc.run_card().clone();
            run_card.set(IHTMIN, ihtmin);
            run_card.set(IHTMAX, ihtmax.map_or(UNBOUNDED, i64::from));

            ProcessDefinition::with_run_card(
                bin_name(proc.name(), ihtmin, ihtmax),
                proc.command(),
                run_card,
            )
        })
        .collect()
}

/// Split every process and concatenate the bins in input order
pub fn split_all(procs: &[ProcessDefinition], thresholds: &[u32]) -> Vec<ProcessDefinition> {
    procs
        .iter()
        .flat_map(|p| {
            let bins = split(p, thresholds);
            trace!("Split {} into {} HT bins", p.name(), bins.len());
            bins
        })
        .collect()
}
