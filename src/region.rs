use {
    super::{KeyRange, Timestamp},
    auto_impl::auto_impl,
    std::fmt,
};

/// Identity of a region at a given epoch.
///
/// Region's epoch consists of two counters: `ver` is bumped whenever the
/// region's key range changes (split or merge), `conf_ver` whenever its
/// replica configuration changes. Higher is newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RegionVerId {
    pub id: u64,
    pub conf_ver: u64,
    pub ver: u64,
}

impl RegionVerId {
    pub fn new(id: u64, conf_ver: u64, ver: u64) -> Self {
        Self { id, conf_ver, ver }
    }
}

impl fmt::Display for RegionVerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ region id: {}, ver: {}, conf_ver: {} }}",
            self.id, self.ver, self.conf_ver
        )
    }
}

/// Region of the keyspace served by a single storage shard.
///
/// The index only ever reads regions: they are shared between the index and
/// whoever looked them up, and outlive their removal from the index.
#[auto_impl(&, Arc)]
pub trait Region {
    /// Returns the region's identity at the epoch it was fetched.
    fn ver_id(&self) -> RegionVerId;

    /// Returns the `[start..end)` key range the region is responsible for.
    fn key_range(&self) -> &KeyRange;

    /// Whether the cached copy of the region is still fresh at `ts`.
    fn is_alive_at(&self, ts: Timestamp) -> bool;

    fn start_key(&self) -> &[u8] {
        self.key_range().start()
    }

    /// Exclusive end key, empty for the last region of the keyspace.
    fn end_key(&self) -> &[u8] {
        self.key_range().end()
    }

    /// Returns the epoch version used to detect stale updates.
    fn version(&self) -> u64 {
        self.ver_id().ver
    }

    fn contains(&self, key: &[u8]) -> bool {
        self.key_range().contains(key)
    }

    fn contains_by_end(&self, key: &[u8]) -> bool {
        self.key_range().contains_by_end(key)
    }
}

/// Region record as fetched from the placement service.
///
/// The record is immutable: its TTL deadline is fixed at fetch time, and
/// refreshing a region means installing a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedRegion {
    ver_id: RegionVerId,
    key_range: KeyRange,
    deadline: Timestamp,
}

impl CachedRegion {
    /// Creates a region that stays alive up to (and including) `deadline`.
    pub fn new(ver_id: RegionVerId, key_range: KeyRange, deadline: Timestamp) -> Self {
        Self {
            ver_id,
            key_range,
            deadline,
        }
    }

    /// Returns the last moment the region is considered alive.
    pub fn deadline(&self) -> Timestamp {
        self.deadline
    }
}

impl Region for CachedRegion {
    fn ver_id(&self) -> RegionVerId {
        self.ver_id
    }

    fn key_range(&self) -> &KeyRange {
        &self.key_range
    }

    fn is_alive_at(&self, ts: Timestamp) -> bool {
        ts <= self.deadline
    }
}
