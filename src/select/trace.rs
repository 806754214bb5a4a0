//! Decision trace.
//!
//! One entry per scanned row: accepted (with the attributes it was credited
//! toward) or skipped (with every reason). Rows after early termination are
//! never scanned and have no entry.

use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

use super::tally::Tally;
use crate::core::AttributeKey;

/// Why a row was not selected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The row has none of the ruled attributes.
    NoRelevantAttribute,
    /// A ruled attribute on the row is already at its maximum.
    AtMaximum {
        attribute: AttributeKey,
        current: u32,
        limit: u32,
    },
    /// The row does not have this attribute.
    Missing { attribute: AttributeKey },
    /// The attribute's minimum is already met.
    NotNeeded {
        attribute: AttributeKey,
        current: u32,
        min: u32,
    },
    /// Another attribute on the row vetoes this one.
    Excluded {
        attribute: AttributeKey,
        by: AttributeKey,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoRelevantAttribute => f.write_str("no relevant attribute"),
            SkipReason::AtMaximum {
                attribute,
                current,
                limit,
            } => write!(f, "{attribute} at max ({current}/{limit})"),
            SkipReason::Missing { attribute } => write!(f, "{attribute} missing"),
            SkipReason::NotNeeded {
                attribute,
                current,
                min,
            } => write!(f, "{attribute} not needed ({current} >= {min})"),
            SkipReason::Excluded { attribute, by } => write!(f, "{attribute} excluded by {by}"),
        }
    }
}

/// Outcome for one row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Selected. `primary` filled unmet minimums; `extra` were credited
    /// opportunistically up to their maximum.
    Accepted {
        primary: SmallVec<[AttributeKey; 4]>,
        extra: SmallVec<[AttributeKey; 4]>,
    },
    /// Not selected.
    Skipped { reasons: SmallVec<[SkipReason; 4]> },
}

impl Decision {
    /// Check if the row was selected.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted { .. })
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Accepted { primary, extra } => {
                f.write_str("accepted: ")?;
                write_list(f, primary.iter())?;
                if !extra.is_empty() {
                    f.write_str(" (+ ")?;
                    write_list(f, extra.iter())?;
                    f.write_str(")")?;
                }
                Ok(())
            }
            Decision::Skipped { reasons } => {
                f.write_str("skipped: ")?;
                write_list(f, reasons.iter())
            }
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = T>) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str("; ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// One scanned row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    /// Row identifier.
    pub row: String,
    /// What happened to it.
    pub decision: Decision,
    /// Tally right after the decision.
    pub tally: Tally,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.row, self.decision, self.tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::AtMaximum {
            attribute: "tutor".into(),
            current: 3,
            limit: 3,
        };
        assert_eq!(reason.to_string(), "tutor at max (3/3)");

        let reason = SkipReason::Excluded {
            attribute: "tutor".into(),
            by: "tutor-land".into(),
        };
        assert_eq!(reason.to_string(), "tutor excluded by tutor-land");
    }

    #[test]
    fn test_decision_display() {
        let accepted = Decision::Accepted {
            primary: smallvec![AttributeKey::new("ramp")],
            extra: smallvec![AttributeKey::new("artifact")],
        };
        assert_eq!(accepted.to_string(), "accepted: ramp (+ artifact)");

        let skipped = Decision::Skipped {
            reasons: smallvec![
                SkipReason::Missing { attribute: "draw".into() },
                SkipReason::NotNeeded { attribute: "ramp".into(), current: 2, min: 2 },
            ],
        };
        assert_eq!(skipped.to_string(), "skipped: draw missing; ramp not needed (2 >= 2)");
        assert!(!skipped.is_accepted());
    }

    #[test]
    fn test_serialized_shape() {
        let reason = SkipReason::Missing { attribute: "draw".into() };
        let json = serde_json::to_value(&reason).unwrap();
        assert_eq!(json["reason"], "missing");
        assert_eq!(json["attribute"], "draw");
    }
}
