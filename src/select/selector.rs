//! Quota-constrained greedy selection.
//!
//! Rows are scanned once, in table order, with no backtracking. For each
//! row:
//!
//! 1. Skip it if none of its true attributes is ruled.
//! 2. Skip it if any of its true ruled attributes is already at its
//!    maximum. This veto is all-or-nothing: a row that would also fill an
//!    unmet minimum is still rejected.
//! 3. Work out its primary contributions: ruled attributes it has, whose
//!    minimum is unmet, and that no excluding attribute on the row vetoes.
//!    Skip it if there are none.
//! 4. Accept it and credit each primary attribute.
//! 5. Credit every other bounded attribute it has, up to the maximum.
//! 6. Stop as soon as every minimum is met.
//!
//! The result depends on table order and is not the smallest possible
//! selection. That is intended: the selector is predictable, not optimal,
//! and swapping in a solver would change which cards get picked.
//!
//! ## Example
//!
//! ```
//! use deck_quota::rules::RuleSet;
//! use deck_quota::select::select;
//! use deck_quota::table::{AttributeRow, AttributeTable};
//!
//! let table = AttributeTable::from_rows([
//!     AttributeRow::new("Sol Ring").with_flag("ramp", true),
//!     AttributeRow::new("Arcane Signet").with_flag("ramp", true),
//!     AttributeRow::new("Brainstorm").with_flag("draw", true),
//! ])?;
//! let rules = RuleSet::new().rule("ramp", 1, None)?.rule("draw", 1, None)?;
//!
//! let result = select(&table, &rules);
//! assert_eq!(result.selected, vec!["Sol Ring", "Brainstorm"]);
//! assert!(result.is_satisfied());
//! # Ok::<(), deck_quota::Error>(())
//! ```

use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::config::{ExclusionMode, SelectorConfig};
use super::tally::{Shortfall, Tally};
use super::trace::{Decision, SkipReason, TraceEntry};
use crate::rules::RuleSet;
use crate::table::AttributeRow;

/// Output of a selection run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectionResult {
    /// Accepted row ids, in table order.
    pub selected: Vec<String>,
    /// Final counts.
    pub tally: Tally,
    /// Per scanned row decisions (empty if tracing was disabled).
    pub trace: Vec<TraceEntry>,
    /// Minimums left unmet.
    pub unmet: Vec<Shortfall>,
    /// Rows examined before the scan ended.
    pub scanned: usize,
    /// Whether the scan stopped before the last row.
    pub stopped_early: bool,
}

impl SelectionResult {
    /// Whether every minimum was met.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.unmet.is_empty()
    }
}

/// Greedy selector over a borrowed rule set.
#[derive(Clone, Debug)]
pub struct Selector<'r> {
    rules: &'r RuleSet,
    config: SelectorConfig,
}

impl<'r> Selector<'r> {
    /// Create a selector with default configuration.
    #[must_use]
    pub fn new(rules: &'r RuleSet) -> Self {
        Self::with_config(rules, SelectorConfig::default())
    }

    /// Create a selector with the given configuration.
    #[must_use]
    pub fn with_config(rules: &'r RuleSet, config: SelectorConfig) -> Self {
        Self { rules, config }
    }

    /// The rules this selector applies.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        self.rules
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Run the selection over `rows` in iteration order.
    ///
    /// Never fails. Unreachable minimums show up in
    /// [`SelectionResult::unmet`] after every row has been scanned.
    pub fn select<'t, I>(&self, rows: I) -> SelectionResult
    where
        I: IntoIterator<Item = &'t AttributeRow>,
    {
        let rules = self.rules;
        let mut tally = Tally::new(rules);
        let mut selected = Vec::new();
        let mut trace = Vec::new();
        let mut scanned = 0;
        let mut stopped_early = false;

        let mut rows = rows.into_iter().peekable();
        while let Some(row) = rows.next() {
            scanned += 1;

            let decision = self.decide(row, &mut tally);
            match &decision {
                Decision::Accepted { primary, extra } => {
                    debug!(row = %row.id, ?primary, ?extra, "accepted");
                    selected.push(row.id.clone());
                }
                Decision::Skipped { reasons } => {
                    debug!(row = %row.id, reasons = %ReasonList(reasons), "skipped");
                }
            }

            let accepted = decision.is_accepted();
            if self.config.record_trace {
                trace.push(TraceEntry {
                    row: row.id.clone(),
                    decision,
                    tally: tally.clone(),
                });
            }

            if accepted && tally.meets(rules) {
                stopped_early = rows.peek().is_some();
                info!(selected = selected.len(), scanned, "all minimums met");
                break;
            }
        }

        let unmet = tally.shortfalls(rules);
        if !unmet.is_empty() {
            warn!(
                selected = selected.len(),
                scanned,
                unmet = unmet.len(),
                "minimums left unmet after scanning all rows"
            );
        }

        SelectionResult {
            selected,
            tally,
            trace,
            unmet,
            scanned,
            stopped_early,
        }
    }

    /// Decide one row, updating `tally` if it is accepted.
    fn decide(&self, row: &AttributeRow, tally: &mut Tally) -> Decision {
        let rules = self.rules;
        let exclusions = rules.exclusions();

        // Ruled attributes that are true on this row, by rule position.
        let present: SmallVec<[usize; 8]> = rules
            .attributes()
            .enumerate()
            .filter(|(_, key)| row.has(key.as_str()))
            .map(|(i, _)| i)
            .collect();

        if present.is_empty() {
            return skipped([SkipReason::NoRelevantAttribute]);
        }

        let capped: SmallVec<[SkipReason; 4]> = present
            .iter()
            .filter_map(|&i| {
                let (key, rule) = &rules.entries()[i];
                let current = tally.at(i);
                match rule.max() {
                    Some(limit) if rule.is_capped(current) => Some(SkipReason::AtMaximum {
                        attribute: key.clone(),
                        current,
                        limit,
                    }),
                    _ => None,
                }
            })
            .collect();
        if !capped.is_empty() {
            return Decision::Skipped { reasons: capped };
        }

        let mut primary: SmallVec<[usize; 4]> = SmallVec::new();
        let mut reasons: SmallVec<[SkipReason; 4]> = SmallVec::new();
        for (i, (key, rule)) in rules.entries().iter().enumerate() {
            let current = tally.at(i);
            if !row.has(key.as_str()) {
                reasons.push(SkipReason::Missing {
                    attribute: key.clone(),
                });
            } else if !rule.needs(current) {
                reasons.push(SkipReason::NotNeeded {
                    attribute: key.clone(),
                    current,
                    min: rule.min(),
                });
            } else if let Some(by) = exclusions.vetoing(key.as_str(), row) {
                reasons.push(SkipReason::Excluded {
                    attribute: key.clone(),
                    by: by.clone(),
                });
            } else {
                primary.push(i);
            }
        }
        if primary.is_empty() {
            return Decision::Skipped { reasons };
        }

        for &i in &primary {
            tally.increment(i);
        }

        let mut extra: SmallVec<[usize; 4]> = SmallVec::new();
        for &i in &present {
            if primary.contains(&i) {
                continue;
            }
            let (key, rule) = &rules.entries()[i];
            if !rule.has_room(tally.at(i)) {
                continue;
            }
            if self.config.exclusion_mode == ExclusionMode::Uniform
                && exclusions.vetoing(key.as_str(), row).is_some()
            {
                continue;
            }
            tally.increment(i);
            extra.push(i);
        }

        let name = |i: &usize| rules.entries()[*i].0.clone();
        Decision::Accepted {
            primary: primary.iter().map(name).collect(),
            extra: extra.iter().map(name).collect(),
        }
    }
}

fn skipped<const N: usize>(reasons: [SkipReason; N]) -> Decision {
    Decision::Skipped {
        reasons: reasons.into_iter().collect(),
    }
}

/// Log-friendly rendering of skip reasons.
struct ReasonList<'a>(&'a [SkipReason]);

impl std::fmt::Display for ReasonList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, reason) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{reason}")?;
        }
        Ok(())
    }
}

/// Select from `rows` under `rules` with default configuration.
pub fn select<'t, I>(rows: I, rules: &RuleSet) -> SelectionResult
where
    I: IntoIterator<Item = &'t AttributeRow>,
{
    Selector::new(rules).select(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AttributeKey;
    use crate::table::AttributeTable;

    fn row(id: &str, flags: &[&str]) -> AttributeRow {
        flags
            .iter()
            .fold(AttributeRow::new(id), |r, f| r.with_flag(*f, true))
    }

    #[test]
    fn test_irrelevant_row_skipped() {
        let rules = RuleSet::new().rule("ramp", 1, None).unwrap();
        let rows = [row("Island", &["land"])];
        let result = select(&rows, &rules);

        assert!(result.selected.is_empty());
        assert_eq!(
            result.trace[0].decision,
            Decision::Skipped {
                reasons: SmallVec::from_iter([SkipReason::NoRelevantAttribute])
            }
        );
    }

    #[test]
    fn test_max_veto_blocks_unmet_minimum() {
        // Row 2 would help "draw" but "ramp" is capped.
        let rules = RuleSet::new()
            .rule("ramp", 1, Some(1))
            .and_then(|r| r.rule("draw", 1, None))
            .unwrap();
        let rows = [row("Sol Ring", &["ramp"]), row("Mulldrifter", &["ramp", "draw"])];
        let result = select(&rows, &rules);

        assert_eq!(result.selected, vec!["Sol Ring"]);
        assert_eq!(result.tally.get("draw"), Some(0));
        match &result.trace[1].decision {
            Decision::Skipped { reasons } => assert_eq!(
                reasons.as_slice(),
                &[SkipReason::AtMaximum {
                    attribute: "ramp".into(),
                    current: 1,
                    limit: 1
                }]
            ),
            other => panic!("unexpected decision {other:?}"),
        }
    }

    #[test]
    fn test_extra_contribution_up_to_max() {
        let rules = RuleSet::new()
            .rule("draw", 2, None)
            .and_then(|r| r.rule("creature", 0, Some(1)))
            .unwrap();
        let rows = [
            row("Mulldrifter", &["draw", "creature"]),
            row("Brainstorm", &["draw"]),
        ];
        let result = select(&rows, &rules);

        assert_eq!(result.selected, vec!["Mulldrifter", "Brainstorm"]);
        assert_eq!(result.tally.get("creature"), Some(1));
        assert_eq!(
            result.trace[0].decision,
            Decision::Accepted {
                primary: SmallVec::from_iter([AttributeKey::new("draw")]),
                extra: SmallVec::from_iter([AttributeKey::new("creature")]),
            }
        );
    }

    #[test]
    fn test_unbounded_attribute_gets_no_extra() {
        let rules = RuleSet::new()
            .rule("draw", 1, None)
            .and_then(|r| r.rule("ramp", 1, None))
            .unwrap();
        let rows = [
            row("Brainstorm", &["draw"]),
            row("Mulldrifter", &["draw"]),
            row("Sol Ring", &["ramp"]),
        ];
        let result = select(&rows, &rules);

        assert_eq!(result.selected, vec!["Brainstorm", "Sol Ring"]);
        assert_eq!(result.tally.get("draw"), Some(1));
    }

    #[test]
    fn test_uniform_mode_excludes_extra() {
        let rules = RuleSet::new()
            .rule("ramp", 1, None)
            .and_then(|r| r.rule("tutor", 0, Some(2)))
            .and_then(|r| r.exclude("tutor", "tutor-land"))
            .unwrap();
        let rows = [row("Crop Rotation", &["ramp", "tutor", "tutor-land"])];

        let uniform = select(&rows, &rules);
        assert_eq!(uniform.selected, vec!["Crop Rotation"]);
        assert_eq!(uniform.tally.get("tutor"), Some(0));

        let legacy = Selector::with_config(
            &rules,
            SelectorConfig::default().with_exclusion_mode(ExclusionMode::PrimaryOnly),
        )
        .select(&rows);
        assert_eq!(legacy.selected, vec!["Crop Rotation"]);
        assert_eq!(legacy.tally.get("tutor"), Some(1));
    }

    #[test]
    fn test_trace_can_be_disabled() {
        let rules = RuleSet::new().rule("ramp", 1, None).unwrap();
        let rows = [row("Sol Ring", &["ramp"])];
        let result = Selector::with_config(&rules, SelectorConfig::default().with_trace(false))
            .select(&rows);

        assert_eq!(result.selected, vec!["Sol Ring"]);
        assert!(result.trace.is_empty());
    }

    #[test]
    fn test_stopped_early_flag() {
        let rules = RuleSet::new().rule("ramp", 1, None).unwrap();

        let last = select(&[row("Sol Ring", &["ramp"])], &rules);
        assert!(!last.stopped_early);
        assert_eq!(last.scanned, 1);

        let table = AttributeTable::from_rows([
            row("Sol Ring", &["ramp"]),
            row("Arcane Signet", &["ramp"]),
        ])
        .unwrap();
        let early = select(&table, &rules);
        assert!(early.stopped_early);
        assert_eq!(early.scanned, 1);
        assert_eq!(early.trace.len(), 1);
    }

    #[test]
    fn test_tally_snapshots_per_decision() {
        let rules = RuleSet::new().rule("ramp", 2, None).unwrap();
        let rows = [row("Sol Ring", &["ramp"]), row("Island", &[]), row("Signet", &["ramp"])];
        let result = select(&rows, &rules);

        let counts: Vec<_> = result.trace.iter().map(|e| e.tally.get("ramp").unwrap()).collect();
        assert_eq!(counts, vec![1, 1, 2]);
    }
}
