//! Backend client module for HTTP/JSON communication

mod client;
mod submission;
mod traits;

pub use client::HttpEmployerApi;
pub use submission::{
    classify, SubmissionOutcome, SubmitResponse, CONNECTION_FAILURE_MESSAGE,
    DEFAULT_REJECTION_MESSAGE, DEFAULT_SUCCESS_MESSAGE,
};
pub use traits::EmployerApi;

#[cfg(test)]
pub use traits::MockEmployerApi;
