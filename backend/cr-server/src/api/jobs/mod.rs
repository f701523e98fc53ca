pub mod analyze_request;
pub mod job_accepted_response;
pub mod jobs;
pub mod submit_job_request;
