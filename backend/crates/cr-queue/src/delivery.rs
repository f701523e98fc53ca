use cr_core::JobRecord;

/// A job handed to one consumer.
///
/// `attempt` starts at 1 and grows each time the job is redelivered after its
/// visibility timeout lapsed without an ack.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub job: JobRecord,
    pub attempt: u32,
}

impl Delivery {
    pub fn is_redelivery(&self) -> bool {
        self.attempt > 1
    }
}
