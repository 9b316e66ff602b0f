//! Construction-time configuration for `OpenHashSet`.

use crate::error::{HashSetError, Result};

pub const DEFAULT_INITIAL_CAPACITY: usize = 16;
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Sizing parameters fixed for the lifetime of a set.
///
/// Build with chained setters and let the set validate on construction:
///
/// ```
/// use open_hashset::{HashSetConfig, OpenHashSet};
///
/// let config = HashSetConfig::default()
///     .initial_capacity(64)
///     .max_load_factor(0.5);
/// let set: OpenHashSet<u32> = OpenHashSet::with_config(config).unwrap();
/// assert_eq!(set.capacity(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashSetConfig {
    pub initial_capacity: usize,
    pub max_load_factor: f64,
    pub growth_factor: usize,
}

impl Default for HashSetConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl HashSetConfig {
    /// Slots allocated up front. Zero is clamped to one.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Upper bound on `len / capacity` after every operation; must be in `(0, 1]`.
    pub fn max_load_factor(mut self, load_factor: f64) -> Self {
        self.max_load_factor = load_factor;
        self
    }

    /// Multiplier applied to the capacity on each growth step; must be `>= 2`.
    pub fn growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = factor;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let lf = self.max_load_factor;
        if !lf.is_finite() || lf <= 0.0 || lf > 1.0 {
            return Err(HashSetError::InvalidLoadFactor(lf));
        }
        if self.growth_factor < 2 {
            return Err(HashSetError::InvalidGrowthFactor(self.growth_factor));
        }
        Ok(())
    }

    pub(crate) fn effective_capacity(&self) -> usize {
        self.initial_capacity.max(1)
    }
}
