#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Shared models and pure logic for the pageforge webhook daemon.

pub mod backoff;
pub mod error;
pub mod fence;
pub mod model;
pub mod slug;

mod util;

pub use backoff::{report_backoff, REPORT_BACKOFF_SECONDS};
pub use error::PipelineError;
pub use fence::extract_fenced_block;
pub use model::*;
pub use slug::project_slug;
pub use util::now_ms;
