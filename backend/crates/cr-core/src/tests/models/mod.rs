mod broadcast_event;
mod job_kind;
mod job_record;
mod outcome;
mod topic;
