#![forbid(unsafe_code)]

//! Headless 3D auto-rearrangement for mind-map graphs.
//!
//! `nautilus` repositions every entry reachable from a designated root so that
//! each node's children sit around it without crowding it: batches of up to
//! six children are placed on fixed axis offsets, larger batches go through an
//! iterative force simulation. Children always end up inside a bounding sphere
//! around their parent and outside a minimum clearance radius.
//!
//! The crate is runtime-agnostic — no threads, no I/O, no global state. See
//! `nautilus-exec` for running a rearrangement on a worker thread with
//! progress events.

pub mod algo;
pub mod error;
pub mod geom;
pub mod graph;
pub mod pipeline;

pub use algo::UpdateOrder;
pub use error::{Error, Result};
pub use geom::Vec3;
pub use graph::{Connection, Entry, MindMap, Rearrangement};
pub use pipeline::{RearrangeOptions, rearrange, rearrange_with};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
