//! Aggregation of per-file outcomes into the final report.

use serde::Serialize;

/// What happened to one candidate file.
///
/// Produced by the per-file loop, consumed only by report aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Archive entry name the outcome belongs to.
    pub entry_name: String,
    /// The failure text, or `None` when the file passed.
    pub error: Option<String>,
}

impl CheckOutcome {
    /// A passing outcome for `entry_name`.
    #[must_use]
    pub fn pass(entry_name: impl Into<String>) -> Self {
        Self {
            entry_name: entry_name.into(),
            error: None,
        }
    }

    /// A failing outcome carrying `message`.
    #[must_use]
    pub fn fail(entry_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            entry_name: entry_name.into(),
            error: Some(message.into()),
        }
    }
}

/// The aggregated validation result for one request.
///
/// Serialises as `{"errors": [...]}`. An empty list means every candidate
/// passed (or no candidates existed); success is implicit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// One line per failed file, in archive entry order.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Fold outcomes, already in entry-encounter order, into a report.
    ///
    /// Passing files contribute nothing; each failure becomes exactly one
    /// `"<entryName>: <message>"` line. The fold never reorders.
    #[must_use]
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = CheckOutcome>) -> Self {
        let errors = outcomes
            .into_iter()
            .filter_map(|outcome| {
                outcome
                    .error
                    .map(|message| format!("{}: {}", outcome.entry_name, message))
            })
            .collect();
        Self { errors }
    }

    /// Returns true when every candidate passed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_outcomes_are_omitted() {
        let report = ValidationReport::from_outcomes([
            CheckOutcome::pass("a.php"),
            CheckOutcome::fail("b.php", "Parse error"),
            CheckOutcome::pass("c.php"),
        ]);
        assert_eq!(report.errors, vec!["b.php: Parse error"]);
        assert!(!report.is_clean());
    }

    #[test]
    fn order_follows_outcome_order() {
        let report = ValidationReport::from_outcomes([
            CheckOutcome::fail("z.php", "first"),
            CheckOutcome::fail("a.php", "second"),
        ]);
        assert_eq!(report.errors, vec!["z.php: first", "a.php: second"]);
    }

    #[test]
    fn no_outcomes_yield_an_empty_clean_report() {
        let report = ValidationReport::from_outcomes([]);
        assert!(report.is_clean());
    }

    #[test]
    fn report_serialises_to_errors_object() {
        let report = ValidationReport::from_outcomes([CheckOutcome::fail("bad.php", "Parse error")]);
        let json = serde_json::to_string(&report).expect("serialise report");
        assert_eq!(json, r#"{"errors":["bad.php: Parse error"]}"#);
    }
}
