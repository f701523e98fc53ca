
use cr_core::{JobKind, JobRecord};

pub(crate) fn analyze_job(content: &str) -> JobRecord {
    JobRecord::new(JobKind::Analyze, content).unwrap()
}
