#![forbid(unsafe_code)]

//! Execution wrapper around the `nautilus` layout engine.
//!
//! A rearrangement runs either on the calling thread
//! ([`rearrange_blocking`]) or on a dedicated worker thread
//! ([`Rearranger`]); both paths produce identical results. Worker events
//! arrive as [`WorkerResponse`] messages: any number of `progress` events, in
//! order, followed by exactly one `complete` or `error`. Failures inside the
//! computation — including panics — are reported as `error` messages rather
//! than crashing the host.

pub mod error;
pub mod messages;
pub mod worker;

pub use error::{Error, Result};
pub use messages::{RearrangeJob, WorkerRequest, WorkerResponse};
pub use worker::{Rearranger, rearrange_blocking};
