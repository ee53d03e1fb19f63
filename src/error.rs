use crate::region::RegionVerId;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RegionCacheError {
    /// Key range whose end does not come after its start.
    #[error("Invalid key range: end key must be greater than start key")]
    InvalidKeyRange,

    /// Time-to-live of cached regions must be positive.
    #[error("Invalid region cache TTL")]
    InvalidTtl,

    /// An overlapping cached region is newer than the one being installed.
    #[error("Stale region: {0}")]
    StaleRegion(RegionVerId),
}

pub type RegionCacheResult<T> = Result<T, RegionCacheError>;
