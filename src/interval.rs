use {
    super::{RegionCacheError, RegionCacheResult},
    std::fmt,
};

/// A half-open range of keys, `[start..end)`.
///
/// Keys are compared byte-lexicographically. An empty end key on the wire
/// means "up to the end of the keyspace", which is represented by the
/// `Unbounded` variant.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum KeyRange {
    Bounded(Vec<u8>, Vec<u8>),
    Unbounded(Vec<u8>),
}

impl KeyRange {
    /// Create a new key range from the given start and end keys.
    ///
    /// Empty `end` yields an unbounded range.
    pub fn new(start: impl Into<Vec<u8>>, end: impl Into<Vec<u8>>) -> RegionCacheResult<Self> {
        let (start, end) = (start.into(), end.into());
        if end.is_empty() {
            return Ok(KeyRange::Unbounded(start));
        }
        if end <= start {
            return Err(RegionCacheError::InvalidKeyRange);
        }
        Ok(KeyRange::Bounded(start, end))
    }

    /// Inclusive lower bound of the range.
    pub fn start(&self) -> &[u8] {
        match self {
            KeyRange::Bounded(start, _) | KeyRange::Unbounded(start) => start,
        }
    }

    /// Exclusive upper bound of the range, empty when unbounded.
    pub fn end(&self) -> &[u8] {
        match self {
            KeyRange::Bounded(_, end) => end,
            KeyRange::Unbounded(_) => &[],
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, KeyRange::Unbounded(_))
    }

    /// Check if the given key is in the range.
    pub fn contains(&self, key: &[u8]) -> bool {
        match self {
            KeyRange::Bounded(start, end) => key >= start.as_slice() && key < end.as_slice(),
            KeyRange::Unbounded(start) => key >= start.as_slice(),
        }
    }

    /// Check if the given key, used as an exclusive end of some range, falls
    /// into this range.
    ///
    /// That is, the key is strictly after the start and not after the end.
    /// A range never contains its own start key by end.
    pub fn contains_by_end(&self, key: &[u8]) -> bool {
        match self {
            KeyRange::Bounded(start, end) => key > start.as_slice() && key <= end.as_slice(),
            KeyRange::Unbounded(start) => key > start.as_slice(),
        }
    }
}

impl fmt::Debug for KeyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRange::Bounded(start, end) => {
                write!(f, "[{}..{})", escape(start), escape(end))
            }
            KeyRange::Unbounded(start) => write!(f, "[{}..)", escape(start)),
        }
    }
}

fn escape(key: &[u8]) -> String {
    key.escape_ascii().to_string()
}
