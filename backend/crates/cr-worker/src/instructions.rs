use crate::InferenceRequest;

use cr_core::{JobKind, JobRecord};

pub const ANALYZE_INSTRUCTION: &str = "You are a senior code reviewer. Find exactly three \
issues in the code you are given. Reply with three bullet points and nothing else.";

pub const FIX_INSTRUCTION: &str = "You are a code fixer. Return only the corrected version \
of the complete file you are given, with its original structure preserved. Do not add \
explanations or markdown fences.";

pub fn instruction_for(kind: JobKind) -> &'static str {
    match kind {
        JobKind::Analyze => ANALYZE_INSTRUCTION,
        JobKind::Fix => FIX_INSTRUCTION,
    }
}

/// System instruction for the job kind plus the payload as user content
pub fn request_for(job: &JobRecord) -> InferenceRequest {
    InferenceRequest {
        system: instruction_for(job.kind()).to_string(),
        user: job.payload().to_string(),
    }
}
