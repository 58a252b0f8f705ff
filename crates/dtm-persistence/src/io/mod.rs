//! Snapshot file I/O.
//!
//! This module handles:
//! - Saving snapshots with atomic writes
//! - Loading snapshots with format, version, and checksum validation

mod checksum;
mod load;
mod save;

pub use checksum::payload_checksum;
pub use load::load_snapshot;
pub use save::save_snapshot;
