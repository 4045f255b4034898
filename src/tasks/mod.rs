//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - TTL Sweeper: Removes expired cache entries once per TTL period

mod sweeper;

pub(crate) use sweeper::spawn_sweeper;
