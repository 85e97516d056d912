//! The striped-lock map itself.

use std::fmt;

use parking_lot::Mutex;

use crate::bucket::Bucket;
use crate::error::MapError;

/// Bucket count used by [`StripedMap::new`].
pub const DEFAULT_CAPACITY: usize = 512;

/// A fixed-capacity concurrent map from `i64` keys to `i64` values.
///
/// The bucket array is sized at construction and never resized, so a key's
/// bucket — `key mod capacity`, with non-negative modulo semantics for
/// negative keys — is stable for the lifetime of the map. Each bucket holds
/// its own mutex and an owned chain of entries; operations that land in
/// different buckets never contend.
///
/// Every operation acquires exactly one bucket lock, and underneath it at
/// most one counter lock at a time, always released before the bucket lock.
/// No operation ever holds two bucket locks, so the structure cannot
/// deadlock against itself.
///
/// # Approximate counters
///
/// [`len`](StripedMap::len) and [`op_count`](StripedMap::op_count) are
/// updated under their own dedicated locks rather than inside the bucket
/// critical section. A read of either may therefore observe a tally that
/// never coincided with any single snapshot of the chains; once all
/// operations have completed, both are exact. Each update is itself mutually
/// exclusive — the staleness is bounded, never corruption. Folding the
/// counter updates into the same critical section as the chain mutation would
/// make them precise at the cost of bucket-level parallelism; this map keeps
/// the decoupled counters.
///
/// # Example
///
/// ```
/// use stripemap::StripedMap;
///
/// let map = StripedMap::with_capacity(64)?;
/// assert_eq!(map.insert(1, 100), None);
/// assert_eq!(map.get(1), Some(100));
/// assert_eq!(map.remove(1), Some(100));
/// # Ok::<(), stripemap::MapError>(())
/// ```
pub struct StripedMap {
    buckets: Box<[Mutex<Bucket>]>,
    len: Mutex<usize>,
    ops: Mutex<u64>,
}

impl StripedMap {
    /// Creates a map with [`DEFAULT_CAPACITY`] buckets.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripemap::StripedMap;
    ///
    /// let map = StripedMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::build(DEFAULT_CAPACITY)
    }

    /// Creates a map with exactly `capacity` buckets.
    ///
    /// The capacity is used verbatim — it is not rounded to a power of two —
    /// and cannot change afterwards. Returns [`MapError::ZeroCapacity`] for a
    /// zero capacity rather than deferring to a division by zero on first
    /// use.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripemap::{MapError, StripedMap};
    ///
    /// let map = StripedMap::with_capacity(3)?;
    /// assert_eq!(map.capacity(), 3);
    /// assert!(matches!(
    ///     StripedMap::with_capacity(0),
    ///     Err(MapError::ZeroCapacity)
    /// ));
    /// # Ok::<(), MapError>(())
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self, MapError> {
        if capacity == 0 {
            return Err(MapError::ZeroCapacity);
        }
        Ok(Self::build(capacity))
    }

    fn build(capacity: usize) -> Self {
        let mut buckets = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            buckets.push(Mutex::new(Bucket::default()));
        }
        Self {
            buckets: buckets.into_boxed_slice(),
            len: Mutex::new(0),
            ops: Mutex::new(0),
        }
    }

    /// Returns the fixed bucket count of the map.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the live entry count.
    ///
    /// Approximate while mutators are in flight; exact once they have
    /// completed.
    pub fn len(&self) -> usize {
        *self.len.lock()
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns how many get/insert/remove calls have completed.
    ///
    /// Approximate while mutators are in flight; exact once they have
    /// completed.
    pub fn op_count(&self) -> u64 {
        *self.ops.lock()
    }

    /// `key mod capacity`, non-negative for negative keys.
    #[inline]
    fn bucket_index(&self, key: i64) -> usize {
        key.rem_euclid(self.buckets.len() as i64) as usize
    }

    /// Tallies one completed operation. Called with the bucket lock held; the
    /// counter lock is released before returning.
    fn record_op(&self) {
        *self.ops.lock() += 1;
    }

    /// Returns the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripemap::StripedMap;
    ///
    /// let map = StripedMap::new();
    /// map.insert(7, 70);
    /// assert_eq!(map.get(7), Some(70));
    /// assert_eq!(map.get(8), None);
    /// ```
    pub fn get(&self, key: i64) -> Option<i64> {
        let bucket = self.buckets[self.bucket_index(key)].lock();
        self.record_op();
        bucket.get(key)
    }

    /// Returns true if `key` is present. Counts as one get operation.
    pub fn contains_key(&self, key: i64) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a key/value pair.
    ///
    /// If the key already exists its value is overwritten in place and the
    /// previous value returned; otherwise a new entry is appended at the tail
    /// of the bucket's chain and `None` returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripemap::StripedMap;
    ///
    /// let map = StripedMap::new();
    /// assert_eq!(map.insert(1, 100), None);
    /// assert_eq!(map.insert(1, 200), Some(100));
    /// ```
    pub fn insert(&self, key: i64, value: i64) -> Option<i64> {
        let mut bucket = self.buckets[self.bucket_index(key)].lock();
        self.record_op();
        let previous = bucket.insert(key, value);
        if previous.is_none() {
            *self.len.lock() += 1;
        }
        previous
    }

    /// Removes the entry for `key`, returning its value if it was present.
    ///
    /// Head-of-chain entries are unlinked by the same path as interior ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripemap::StripedMap;
    ///
    /// let map = StripedMap::new();
    /// map.insert(1, 100);
    /// assert_eq!(map.remove(1), Some(100));
    /// assert_eq!(map.remove(1), None);
    /// ```
    pub fn remove(&self, key: i64) -> Option<i64> {
        let mut bucket = self.buckets[self.bucket_index(key)].lock();
        self.record_op();
        let removed = bucket.remove(key);
        if removed.is_some() {
            *self.len.lock() -= 1;
        }
        removed
    }

    /// Removes every entry, one bucket at a time.
    ///
    /// Buckets emptied early can be repopulated by concurrent inserts before
    /// the sweep finishes; the map is only guaranteed empty if no writers are
    /// running. Does not bump the operation tally.
    pub fn clear(&self) {
        for bucket in self.buckets.iter() {
            let mut bucket = bucket.lock();
            let dropped = bucket.clear();
            if dropped > 0 {
                *self.len.lock() -= dropped;
            }
        }
    }
}

impl Default for StripedMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Diagnostic listing of every bucket and its chain, one
/// `[index] -> (key,value) -> ...` line per bucket.
///
/// Buckets are locked one at a time, so the listing is not a consistent
/// snapshot of the whole map under concurrent mutation — informational only.
impl fmt::Display for StripedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, bucket) in self.buckets.iter().enumerate() {
            write!(f, "[{}] -> ", index)?;
            let bucket = bucket.lock();
            let mut first = true;
            for (key, value) in bucket.entries() {
                if first {
                    first = false;
                } else {
                    write!(f, " -> ")?;
                }
                write!(f, "({},{})", key, value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
