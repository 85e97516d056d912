//! Stripemap: a fixed-capacity concurrent hash map with per-bucket lock striping
//!
//! This crate provides a concurrent map from `i64` keys to `i64` values whose
//! mutual exclusion is partitioned across the bucket array instead of a single
//! global lock. Every bucket carries its own mutex and an owned chain of
//! entries, so operations that land in different buckets proceed fully in
//! parallel.
//!
//! # Features
//!
//! - **Lock Striping**: One mutex per bucket; unrelated keys never contend
//! - **Fixed Capacity**: The bucket count is set at construction and never
//!   changes, so a key's bucket is stable for the lifetime of the map
//! - **Chained Buckets**: Collisions resolve into an owned singly linked
//!   chain per bucket, with at most one entry per key
//! - **Decoupled Counters**: The live entry count and the operation tally are
//!   guarded by their own locks, independent of all bucket locks
//!
//! # Example
//!
//! ```rust
//! use stripemap::StripedMap;
//!
//! let map = StripedMap::new();
//!
//! // Insert from multiple threads safely
//! map.insert(42, 1);
//! map.insert(100, 2);
//!
//! // Read concurrently
//! if let Some(value) = map.get(42) {
//!     println!("Found: {}", value);
//! }
//!
//! // Remove entries
//! map.remove(42);
//! ```

#![warn(missing_docs)]

mod bucket;
mod error;
mod map;

pub use error::MapError;
pub use map::{StripedMap, DEFAULT_CAPACITY};
