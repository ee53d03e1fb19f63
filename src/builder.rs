use {
    super::{
        Clock,
        DEFAULT_REGION_CACHE_TTL,
        Region,
        RegionCache,
        RegionCacheError,
        RegionCacheResult,
        SystemClock,
    },
    std::time::Duration,
};

/// Region cache builder.
pub struct RegionCacheBuilder<C: Clock = SystemClock>(Duration, C);

impl Default for RegionCacheBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionCacheBuilder {
    /// Create new region cache builder.
    ///
    /// Regions live for [`DEFAULT_REGION_CACHE_TTL`], and expiry is checked
    /// against the wall clock.
    pub fn new() -> Self {
        Self(DEFAULT_REGION_CACHE_TTL, SystemClock)
    }
}

impl<C: Clock> RegionCacheBuilder<C> {
    /// Set time-to-live of freshly fetched regions.
    ///
    /// Expiry has a resolution of one second, so the TTL must be a positive
    /// whole number of seconds.
    pub fn with_ttl(self, ttl: Duration) -> Self {
        Self(ttl, self.1)
    }

    /// Transform the builder into one with a different clock.
    pub fn with_clock<CustomC: Clock>(self, clock: CustomC) -> RegionCacheBuilder<CustomC> {
        RegionCacheBuilder(self.0, clock)
    }

    /// Build the region cache.
    pub fn build<R: Region>(self) -> RegionCacheResult<RegionCache<R, C>> {
        if self.0.as_secs() == 0 || self.0.subsec_nanos() != 0 {
            return Err(RegionCacheError::InvalidTtl);
        }
        Ok(RegionCache::new(self.0, self.1))
    }
}
