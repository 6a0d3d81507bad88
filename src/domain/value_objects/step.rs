use serde::Serialize;

/// One line of a workflow summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    pub description: String,
    pub detail: String,
}

impl StepResult {
    pub fn new(description: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            detail: detail.into(),
        }
    }
}

/// Ordered, append-only record of the steps a workflow performed.
///
/// Each `with` consumes the log and returns the extended one, so a partial
/// run is just the value held at that point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepLog {
    steps: Vec<StepResult>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, description: impl Into<String>, detail: impl Into<String>) -> Self {
        self.steps.push(StepResult::new(description, detail));
        self
    }

    pub fn steps(&self) -> &[StepResult] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn find(&self, description: &str) -> Option<&StepResult> {
        self.steps.iter().find(|s| s.description == description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_keep_execution_order() {
        let log = StepLog::new()
            .with("Created git worktree", "0001-new-task")
            .with("Started DDEV", "0001-project")
            .with("Database", "Skipped (no import)");

        let descriptions: Vec<_> = log.steps().iter().map(|s| s.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec!["Created git worktree", "Started DDEV", "Database"]
        );
        assert_eq!(log.find("Started DDEV").unwrap().detail, "0001-project");
        assert!(log.find("Missing").is_none());
    }
}
