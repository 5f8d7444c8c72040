//! HTTP control surface
//!
//! Exposes the orchestrator triggers over REST and streams
//! [`MediaEvent`](mediactl_common::MediaEvent)s over SSE.

pub mod handlers;
pub mod server;
pub mod sse;

pub use server::{create_router, run, AppContext};
