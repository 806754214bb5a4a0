//! Plain-text rendering of selections and tallies.
//!
//! Everything writes to any `io::Write`, so the same functions serve the
//! CLI (stdout) and tests (a `Vec<u8>`).

use std::io::{self, Write};

use crate::core::AttributeKey;
use crate::rules::RuleSet;
use crate::select::SelectionResult;

/// Selected card names, one per line, in selection order.
pub fn write_deck_list<W: Write>(result: &SelectionResult, mut out: W) -> io::Result<()> {
    for id in &result.selected {
        writeln!(out, "{id}")?;
    }
    Ok(())
}

/// Final tally against the rules.
///
/// ```text
/// ramp: 10 (min 10)
/// draw: 6 (min 8, max 12) UNMET
/// ```
pub fn write_tally<W: Write>(result: &SelectionResult, rules: &RuleSet, mut out: W) -> io::Result<()> {
    for ((key, count), (_, rule)) in result.tally.iter().zip(rules.entries()) {
        write!(out, "{key}: {count} ({rule})")?;
        if rule.needs(count) {
            write!(out, " UNMET")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// One line per scanned row.
pub fn write_trace<W: Write>(result: &SelectionResult, mut out: W) -> io::Result<()> {
    for entry in &result.trace {
        writeln!(out, "{entry}")?;
    }
    Ok(())
}

/// Occurrence counts under a heading.
pub fn write_counts<W: Write>(heading: &str, counts: &[(AttributeKey, usize)], mut out: W) -> io::Result<()> {
    writeln!(out, "{heading}:")?;
    for (key, n) in counts {
        writeln!(out, "{key}: {n}")?;
    }
    Ok(())
}

/// Summary line for the end of a run.
pub fn write_summary<W: Write>(result: &SelectionResult, mut out: W) -> io::Result<()> {
    write!(
        out,
        "selected {} of {} scanned rows",
        result.selected.len(),
        result.scanned
    )?;
    if result.is_satisfied() {
        writeln!(out, ", all minimums met")
    } else {
        let unmet: Vec<String> = result
            .unmet
            .iter()
            .map(|s| format!("{} {}/{}", s.attribute, s.have, s.need))
            .collect();
        writeln!(out, ", unmet: {}", unmet.join(", "))
    }
}
