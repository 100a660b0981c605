//! relic is a minimal content-addressable object store: the substrate of
//! a version-control system.
//!
//! It derives a stable identifier for arbitrary byte payloads, persists
//! typed immutable objects under that identifier with transparent zlib
//! compression, and parses/serializes the header+message text format
//! that encodes commit and tag metadata.
//!
//! Everything here is synchronous; every operation completes or fails in
//! place with an [`Error`]. Branch management, the staging index,
//! diff/merge, checkout, and network transport are out of scope.

mod error;
pub use error::{Error, Result};

pub mod frame;

pub mod kvlm;

pub mod object;

mod repo;
pub use repo::Repository;

mod store;

pub mod zlib;
