pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    jobs::{
        analyze_request::AnalyzeRequest,
        job_accepted_response::JobAcceptedResponse,
        jobs::{ANALYSIS_STARTED_MESSAGE, FIX_STARTED_MESSAGE, analyze, submit_job},
        submit_job_request::SubmitJobRequest,
    },
};
pub use error::{Result as ServerErrorResult, ServerError};

pub use crate::routes::build_router;
