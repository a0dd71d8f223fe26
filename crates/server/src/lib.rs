//! Webhook daemon that turns task briefs into published single-file web apps.
//!
//! Flow: inbound webhook -> secret check -> immediate acknowledgment ->
//! detached pipeline (generate or revise, publish, settle, report).

pub mod config;
pub mod generator;
pub mod hosting;
pub mod http;
pub mod pipeline;
pub mod publisher;
pub mod reporter;
pub mod scaffold;
pub mod vcs;
