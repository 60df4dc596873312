//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the host is up.
//!
//! # Tasks
//! - Expiration sweep: removes expired store entries at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
