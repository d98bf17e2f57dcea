//! Accumulated outcome of one install run

use std::fmt;

/// What happened to a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    /// Framework-owned content that existed and changed on overwrite
    Updated,
    Skipped,
    Merged,
    UpToDate,
    Failed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Created => "created",
            Outcome::Updated => "updated",
            Outcome::Skipped => "skipped",
            Outcome::Merged => "merged",
            Outcome::UpToDate => "up to date",
            Outcome::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// One report line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub name: String,
    pub outcome: Outcome,
    pub detail: Option<String>,
}

/// Ordered per-item outcomes plus counters
#[derive(Debug, Default)]
pub struct InstallReport {
    entries: Vec<ItemOutcome>,
    /// First item-level failure, surfaced as the run error
    first_failure: Option<crate::error::VibeFlowError>,
}

impl InstallReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, outcome: Outcome) {
        self.entries.push(ItemOutcome {
            name: name.into(),
            outcome,
            detail: None,
        });
    }

    pub fn record_with_detail(
        &mut self,
        name: impl Into<String>,
        outcome: Outcome,
        detail: impl Into<String>,
    ) {
        self.entries.push(ItemOutcome {
            name: name.into(),
            outcome,
            detail: Some(detail.into()),
        });
    }

    /// Record an item-level failure without aborting the run
    pub fn record_failure(&mut self, name: impl Into<String>, error: crate::error::VibeFlowError) {
        self.entries.push(ItemOutcome {
            name: name.into(),
            outcome: Outcome::Failed,
            detail: Some(error.to_string()),
        });
        if self.first_failure.is_none() {
            self.first_failure = Some(error);
        }
    }

    pub fn entries(&self) -> &[ItemOutcome] {
        &self.entries
    }

    #[cfg(test)]
    pub fn outcome_of(&self, name: &str) -> Option<Outcome> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.outcome)
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.entries.iter().filter(|e| e.outcome == outcome).count()
    }

    pub fn has_failures(&self) -> bool {
        self.first_failure.is_some()
    }

    /// Take the first recorded failure, leaving the entries intact
    pub fn take_failure(&mut self) -> Option<crate::error::VibeFlowError> {
        self.first_failure.take()
    }
}
