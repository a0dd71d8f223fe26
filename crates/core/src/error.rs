//! Error taxonomy shared across the pipeline.

use thiserror::Error;

/// Failure taxonomy for the webhook pipeline.
///
/// Only `AuthRejected` is ever surfaced to the HTTP caller (as a 401).
/// Everything else arises after the acknowledgment has been sent and is
/// caught at the top of the background task and logged.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Shared secret mismatch; surfaced synchronously as 401.
    #[error("shared secret mismatch")]
    AuthRejected,

    /// The generation endpoint failed (transport, timeout or non-success
    /// status). Carries the upstream message; there is no retry at this layer.
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// Round 2 could not locate an existing project for the slug.
    #[error("no project found for slug '{0}'")]
    ProjectNotFound(String),

    /// Creating/cloning/committing/pushing the project failed.
    #[error("publish failed: {0}")]
    PublishFailed(String),

    /// The request carried a round other than 1 or 2.
    #[error("unknown round {0}")]
    UnknownRound(u32),

    /// The callback could not be delivered after exhausting the backoff
    /// schedule.
    #[error("report delivery to {0} failed after retries")]
    ReportDeliveryFailed(String),
}
