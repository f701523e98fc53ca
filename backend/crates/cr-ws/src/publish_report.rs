/// Result of one fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Members whose outbound buffer accepted the event
    pub delivered: usize,
    /// Members skipped because their buffer was full or already closed
    pub failed: usize,
}

impl PublishReport {
    pub fn recipients(&self) -> usize {
        self.delivered + self.failed
    }
}
