
use {
    super::{Clock, Region, RegionVerId, SystemClock, Timestamp},
    std::{collections::BTreeMap, ops::Bound, sync::Arc},
    tracing::debug,
};

/// Outcome of removing the regions intersecting an incoming one.
#[derive(Debug)]
pub enum Intersection<R> {
    /// Regions detached from the index, in ascending start key order.
    Removed(Vec<Arc<R>>),

    /// A stored intersecting region is newer than the incoming one; the index
    /// was left untouched.
    Stale,
}

impl<R> Intersection<R> {
    pub fn is_stale(&self) -> bool {
        matches!(self, Intersection::Stale)
    }

    /// Returns the removed regions, `None` if the update was stale.
    pub fn into_removed(self) -> Option<Vec<Arc<R>>> {
        match self {
            Intersection::Removed(regions) => Some(regions),
            Intersection::Stale => None,
        }
    }
}

/// Regions sorted by their start keys.
///
/// Regions are expected (but not required) not to overlap: callers are
/// responsible for calling [`remove_intersecting()`](Self::remove_intersecting)
/// before [`upsert()`](Self::upsert) whenever the new region may overlap
/// existing ones.
///
/// The index does no locking of its own. Mutations take `&mut self`, lookups
/// take `&self`; compound operations (remove intersecting regions, then
/// insert) must be made atomic by the owner, see
/// [`RegionCache`](crate::RegionCache).
pub struct SortedRegions<R, C = SystemClock> {
    /// Regions keyed by their start keys.
    ///
    /// Lookups probe the map with borrowed `&[u8]` bounds, so search keys are
    /// never materialized as entries.
    regions: BTreeMap<Vec<u8>, Arc<R>>,

    /// Time source for expiry checks during scans.
    clock: C,
}

impl<R: Region> Default for SortedRegions<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Region> SortedRegions<R> {
    /// Creates an empty index using wall clock for expiry checks.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<R: Region, C: Clock> SortedRegions<R, C> {
    /// Creates an empty index with the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            regions: BTreeMap::new(),
            clock,
        }
    }

    /// Inserts a region, replacing the one with the same start key.
    ///
    /// Returns the replaced region, if any. Overlaps with other stored
    /// regions are not checked.
    pub fn upsert(&mut self, region: Arc<R>) -> Option<Arc<R>> {
        self.regions.insert(region.start_key().to_vec(), region)
    }

    /// Returns the region which contains the key.
    ///
    /// When `is_end_key` is set, the key is treated as an exclusive end of
    /// some range: a region starting exactly at `key` does not qualify, and
    /// the one preceding it (ending at `key`) is returned instead.
    ///
    /// The region might be expired: it is the caller's duty to check its TTL.
    pub fn search_by_key(&self, key: &[u8], is_end_key: bool) -> Option<Arc<R>> {
        self.regions
            .range::<[u8], _>((Bound::Unbounded, Bound::Included(key)))
            .rev()
            .map(|(_, region)| region)
            .find(|region| !(is_end_key && region.start_key() == key))
            .filter(|region| {
                if is_end_key {
                    region.contains_by_end(key)
                } else {
                    region.contains(key)
                }
            })
            .cloned()
    }

    /// Returns up to `limit` contiguous, live regions covering keys starting
    /// at `start_key` and ending before `end_key` (empty for no end).
    ///
    /// Enumeration stops at the first uncached hole or expired region.
    ///
    /// It is the caller's responsibility to make sure that `start_key` is the
    /// start key of a stored region. Otherwise the region covering
    /// `start_key` is not included, and the result is empty.
    pub fn ascend_from(&self, start_key: &[u8], end_key: &[u8], limit: usize) -> Vec<Arc<R>> {
        self.ascend_from_at(start_key, end_key, limit, self.clock.now())
    }

    /// Same as [`ascend_from()`](Self::ascend_from), with expiry checked
    /// against `now`.
    pub fn ascend_from_at(
        &self,
        start_key: &[u8],
        end_key: &[u8],
        limit: usize,
        now: Timestamp,
    ) -> Vec<Arc<R>> {
        let mut regions = Vec::new();
        if limit == 0 {
            return regions;
        }

        let mut next_start = start_key;
        for region in self.ascend(start_key) {
            if !end_key.is_empty() && region.start_key() >= end_key {
                break;
            }
            if !region.is_alive_at(now) {
                break;
            }
            // Uncached hole.
            if region.start_key() != next_start {
                break;
            }

            next_start = region.end_key();
            regions.push(Arc::clone(region));
            if regions.len() >= limit {
                break;
            }
        }
        regions
    }

    /// Removes all regions intersecting with the key range of the given one.
    ///
    /// Stored regions are visited starting from `region`'s start key. If any
    /// of them has a newer epoch version than `ver_id`, the incoming region is
    /// stale and nothing is removed.
    pub fn remove_intersecting(
        &mut self,
        region: &impl Region,
        ver_id: RegionVerId,
    ) -> Intersection<R> {
        let end_key = region.end_key();
        let mut intersecting = Vec::new();
        for stored in self.ascend(region.start_key()) {
            if !end_key.is_empty() && stored.start_key() >= end_key {
                break;
            }
            if stored.version() > ver_id.ver {
                debug!(
                    region = ver_id.id,
                    ver = ver_id.ver,
                    conf_ver = ver_id.conf_ver,
                    intersecting_region = stored.ver_id().id,
                    intersecting_ver = stored.version(),
                    "stale region"
                );
                return Intersection::Stale;
            }
            intersecting.push(stored.start_key().to_vec());
        }

        Intersection::Removed(
            intersecting
                .iter()
                .filter_map(|start_key| self.regions.remove(start_key))
                .collect(),
        )
    }

    /// Removes all regions.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Number of regions that are not expired as of `ts`.
    ///
    /// Expired regions are counted out, not evicted.
    pub fn count_live(&self, ts: Timestamp) -> usize {
        self.regions
            .values()
            .filter(|region| region.is_alive_at(ts))
            .count()
    }

    /// Number of stored regions, expired ones included.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterator over the stored regions in ascending start key order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<R>> {
        self.regions.values()
    }

    /// Returns the clock used for expiry checks.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Stored regions with start keys greater than or equal to `key`.
    fn ascend<'a>(&'a self, key: &'a [u8]) -> impl Iterator<Item = &'a Arc<R>> + 'a {
        self.regions
            .range::<[u8], _>((Bound::Included(key), Bound::Unbounded))
            .map(|(_, region)| region)
    }
}
