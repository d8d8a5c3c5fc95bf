use crate::models::{SwapOutcome, SwapStatus};

/// Every outcome of a run, in the order the legs were attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<SwapOutcome>,
}

impl RunReport {
    pub fn record(&mut self, outcome: SwapOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn attempts(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.count(SwapStatus::Succeeded)
    }

    pub fn failed(&self) -> usize {
        self.count(SwapStatus::Failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(SwapStatus::Skipped)
    }

    fn count(&self, status: SwapStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}
