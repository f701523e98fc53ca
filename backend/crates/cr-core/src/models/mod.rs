pub mod broadcast_event;
pub mod event_type;
pub mod job_id;
pub mod job_kind;
pub mod job_record;
pub mod outcome;
pub mod outcome_status;
pub mod topic;
