use {
    super::{
        CachedRegion,
        Clock,
        Intersection,
        KeyRange,
        Region,
        RegionCacheError,
        RegionCacheResult,
        RegionVerId,
        SortedRegions,
        SystemClock,
        Timestamp,
    },
    parking_lot::RwLock,
    std::{sync::Arc, time::Duration},
    tracing::trace,
};

/// Default time-to-live of a cached region.
pub const DEFAULT_REGION_CACHE_TTL: Duration = Duration::from_secs(600);

/// Thread-safe region cache.
///
/// Owns the lock guarding [`SortedRegions`]: mutations hold the write lock for
/// their whole duration, so that readers never observe the key range of a
/// region being replaced as a hole. Lookups share the read lock.
///
/// Use [`RegionCacheBuilder`](crate::RegionCacheBuilder) to create one.
pub struct RegionCache<R, C = SystemClock> {
    regions: RwLock<SortedRegions<R, C>>,
    ttl: Duration,
}

impl<R: Region, C: Clock> RegionCache<R, C> {
    pub(crate) fn new(ttl: Duration, clock: C) -> Self {
        Self {
            regions: RwLock::new(SortedRegions::with_clock(clock)),
            ttl,
        }
    }

    /// Installs a region, replacing the cached regions that start within its
    /// key range.
    ///
    /// Returns the replaced regions. If any of them is newer than the incoming
    /// one, the cache is left untouched and
    /// [`StaleRegion`](RegionCacheError::StaleRegion) is returned.
    ///
    /// A cached region starting before the incoming one is kept even if it
    /// overlaps it: trimming such a region is up to the caller.
    pub fn insert(&self, region: Arc<R>) -> RegionCacheResult<Vec<Arc<R>>> {
        let ver_id = region.ver_id();
        let mut regions = self.regions.write();
        match regions.remove_intersecting(&*region, ver_id) {
            Intersection::Stale => Err(RegionCacheError::StaleRegion(ver_id)),
            Intersection::Removed(removed) => {
                trace!(
                    region = ver_id.id,
                    ver = ver_id.ver,
                    conf_ver = ver_id.conf_ver,
                    replaced = removed.len(),
                    "insert region"
                );
                regions.upsert(region);
                Ok(removed)
            }
        }
    }

    /// Returns the live region containing the key.
    pub fn locate_key(&self, key: &[u8]) -> Option<Arc<R>> {
        self.locate(key, false)
    }

    /// Returns the live region containing the key, treating the key as an
    /// exclusive end of a range.
    ///
    /// For a key at a region boundary, this is the region to the left of it.
    pub fn locate_end_key(&self, key: &[u8]) -> Option<Arc<R>> {
        self.locate(key, true)
    }

    /// Returns up to `limit` contiguous live regions, starting with the one
    /// whose start key is `start_key`.
    ///
    /// See [`SortedRegions::ascend_from()`].
    pub fn scan(&self, start_key: &[u8], end_key: &[u8], limit: usize) -> Vec<Arc<R>> {
        self.regions.read().ascend_from(start_key, end_key, limit)
    }

    /// Number of cached regions that are not expired.
    pub fn live_count(&self) -> usize {
        let regions = self.regions.read();
        regions.count_live(regions.clock().now())
    }

    /// Number of cached regions, expired ones included.
    pub fn len(&self) -> usize {
        self.regions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.read().is_empty()
    }

    /// Drops all cached regions.
    pub fn clear(&self) {
        self.regions.write().clear();
    }

    /// Time-to-live assigned to freshly fetched regions.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn now(&self) -> Timestamp {
        self.regions.read().clock().now()
    }

    fn locate(&self, key: &[u8], is_end_key: bool) -> Option<Arc<R>> {
        let regions = self.regions.read();
        let now = regions.clock().now();
        regions
            .search_by_key(key, is_end_key)
            .filter(|region| region.is_alive_at(now))
    }
}

impl<C: Clock> RegionCache<CachedRegion, C> {
    /// Installs a freshly fetched region, expiring one TTL from now.
    pub fn insert_fetched(
        &self,
        ver_id: RegionVerId,
        key_range: KeyRange,
    ) -> RegionCacheResult<Arc<CachedRegion>> {
        let ttl = Timestamp::try_from(self.ttl.as_secs()).unwrap_or(Timestamp::MAX);
        let deadline = self.now().saturating_add(ttl);
        let region = Arc::new(CachedRegion::new(ver_id, key_range, deadline));
        self.insert(Arc::clone(&region))?;
        Ok(region)
    }
}
