//! Region index: routing of keys to the regions of a partitioned keyspace.
//!
//! The keyspace of a distributed key-value store is split into
//! non-overlapping, half-open `[start..end)` key ranges called regions, each
//! served by a storage shard. A client caches the regions it has fetched and
//! consults the cache to route every key access:
//!
//! - [`SortedRegions`] is the index itself: regions ordered by start key,
//!   with point lookup (with distinct semantics for keys used as exclusive
//!   range ends), contiguous range scans that stop at holes and expired
//!   regions, and epoch-aware removal of regions intersecting an update.
//!   It does no locking.
//! - [`RegionCache`] owns the lock around the index and makes compound
//!   updates (remove intersecting regions, insert the new one) atomic.

mod builder;
mod cache;
mod clock;
mod error;
mod interval;
mod region;
mod sorted;

pub use {
    builder::RegionCacheBuilder,
    cache::{DEFAULT_REGION_CACHE_TTL, RegionCache},
    clock::{Clock, ManualClock, SystemClock, Timestamp},
    error::{RegionCacheError, RegionCacheResult},
    interval::KeyRange,
    region::{CachedRegion, Region, RegionVerId},
    sorted::{Intersection, SortedRegions},
};
