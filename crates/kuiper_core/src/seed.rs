//! # Generation Seed
//!
//! Deterministic seed derivation for independent random streams.
//!
//! ## Determinism Guarantee
//!
//! Given the same [`GenerationSeed`], every derived stream produces
//! **exactly** the same values on any platform, any time.

/// Seed for one asteroid generation request.
///
/// External placement policy derives this from the world seed plus request
/// parameters; everything random inside the generator derives from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GenerationSeed(u64);

impl GenerationSeed {
    /// Creates a new generation seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose (e.g. shaping vs material
    /// noise, or one section's ore stream).
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        // FNV-1a hash mixing
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }
}

impl Default for GenerationSeed {
    fn default() -> Self {
        Self(0xA57E_801D_0000_0001)
    }
}
