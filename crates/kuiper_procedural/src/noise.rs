//! # Simplex Noise Implementation
//!
//! Deterministic 3D noise for asteroid shaping and material selection.
//!
//! ## Determinism Guarantee
//!
//! Given the same [`GenerationSeed`], this implementation produces
//! **exactly** the same values on any platform, any time.
//!
//! ## Sampler Ownership
//!
//! [`OctaveSampler`] carries a mutable working scale, so one instance must
//! never be shared between concurrently running units of work. Every unit
//! constructs its own [`NoiseField`] from the request seed; because the
//! permutation tables derive from the seed with fixed purposes, all units
//! observe the same continuous fields without sharing any state.

use kuiper_core::GenerationSeed;

/// Seed-derivation purpose for the shaping field.
const SHAPING_PURPOSE: u64 = 0x5348;
/// Seed-derivation purpose for the material field.
const MATERIAL_PURPOSE: u64 = 0x4D41;

/// Pre-computed permutation table for noise.
///
/// This is computed once from the seed and reused.
struct PermutationTable {
    /// 512-entry permutation table (256 entries, doubled for overflow handling).
    perm: [u8; 512],
    /// Gradient table (12 edge vectors of a cube, for 3D simplex).
    grad: [[i8; 3]; 12],
}

impl PermutationTable {
    /// Creates a new permutation table from a seed.
    fn new(seed: GenerationSeed) -> Self {
        let mut perm = [0u8; 512];

        // Initialize with identity permutation
        for (i, p) in perm.iter_mut().take(256).enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            {
                *p = i as u8;
            }
        }

        // Fisher-Yates shuffle with deterministic RNG
        let mut rng_state = seed.value();
        for i in (1..256).rev() {
            // Simple xorshift64 for deterministic shuffling
            rng_state ^= rng_state << 13;
            rng_state ^= rng_state >> 7;
            rng_state ^= rng_state << 17;

            #[allow(clippy::cast_possible_truncation)]
            let j = (rng_state as usize) % (i + 1);
            perm.swap(i, j);
        }

        // Double the table to avoid index wrapping
        perm.copy_within(0..256, 256);

        // 12 gradient vectors pointing to the edge midpoints of a cube
        let grad = [
            [1, 1, 0], [-1, 1, 0], [1, -1, 0], [-1, -1, 0],
            [1, 0, 1], [-1, 0, 1], [1, 0, -1], [-1, 0, -1],
            [0, 1, 1], [0, -1, 1], [0, 1, -1], [0, -1, -1],
        ];

        Self { perm, grad }
    }

    /// Gets a permutation value (with automatic wrapping).
    #[inline]
    fn get(&self, index: usize) -> u8 {
        self.perm[index & 511]
    }

    /// Gets a gradient for a given hash.
    #[inline]
    fn gradient(&self, hash: u8) -> [i8; 3] {
        self.grad[(hash % 12) as usize]
    }
}

/// 3D Simplex noise generator.
///
/// Produces smooth, continuous noise values in the range [-1, 1].
///
/// # Performance
///
/// - O(1) per sample
/// - No allocations
pub struct SimplexNoise3 {
    /// The permutation table.
    perm_table: PermutationTable,
    /// Seed-derived X domain offset.
    offset_x: f64,
    /// Seed-derived Y domain offset.
    offset_y: f64,
    /// Seed-derived Z domain offset.
    offset_z: f64,
}

impl SimplexNoise3 {
    /// Skewing factor for 3D simplex grid.
    const F3: f64 = 1.0 / 3.0;
    /// Unskewing factor for 3D simplex grid.
    const G3: f64 = 1.0 / 6.0;

    /// Creates a new simplex noise generator from a seed.
    ///
    /// The sampling domain is shifted by a seed-derived offset, so no world
    /// coordinate (the origin included) coincides with a lattice zero.
    #[must_use]
    pub fn new(seed: GenerationSeed) -> Self {
        let offset_x = domain_offset(seed.derive(1));
        let offset_y = domain_offset(seed.derive(2));
        let offset_z = domain_offset(seed.derive(3));

        Self {
            perm_table: PermutationTable::new(seed),
            offset_x,
            offset_y,
            offset_z,
        }
    }

    /// Samples 3D simplex noise at the given coordinates.
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1].
    #[must_use]
    #[allow(clippy::many_single_char_names, clippy::similar_names)]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let x = x + self.offset_x;
        let y = y + self.offset_y;
        let z = z + self.offset_z;

        // Skew input coordinates to simplex grid
        let skew = (x + y + z) * Self::F3;
        let i = fast_floor(x + skew);
        let j = fast_floor(y + skew);
        let k = fast_floor(z + skew);

        // Unskew to get first corner in simplex
        let unskew = f64::from(i + j + k) * Self::G3;
        let x0 = x - (f64::from(i) - unskew);
        let y0 = y - (f64::from(j) - unskew);
        let z0 = z - (f64::from(k) - unskew);

        // Rank the coordinates to find which simplex (tetrahedron) we're in
        let (i1, j1, k1, i2, j2, k2): (usize, usize, usize, usize, usize, usize) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0) // X Y Z order
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1) // X Z Y order
            } else {
                (0, 0, 1, 1, 0, 1) // Z X Y order
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1) // Z Y X order
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1) // Y Z X order
        } else {
            (0, 1, 0, 1, 1, 0) // Y X Z order
        };

        // Offsets for the second, third and fourth corners
        #[allow(clippy::cast_precision_loss)]
        let (fi1, fj1, fk1, fi2, fj2, fk2) =
            (i1 as f64, j1 as f64, k1 as f64, i2 as f64, j2 as f64, k2 as f64);
        let x1 = x0 - fi1 + Self::G3;
        let y1 = y0 - fj1 + Self::G3;
        let z1 = z0 - fk1 + Self::G3;
        let x2 = x0 - fi2 + 2.0 * Self::G3;
        let y2 = y0 - fj2 + 2.0 * Self::G3;
        let z2 = z0 - fk2 + 2.0 * Self::G3;
        let x3 = x0 - 1.0 + 3.0 * Self::G3;
        let y3 = y0 - 1.0 + 3.0 * Self::G3;
        let z3 = z0 - 1.0 + 3.0 * Self::G3;

        // Hash coordinates to get gradient indices
        #[allow(clippy::cast_sign_loss)]
        let ii = (i & 255) as usize;
        #[allow(clippy::cast_sign_loss)]
        let jj = (j & 255) as usize;
        #[allow(clippy::cast_sign_loss)]
        let kk = (k & 255) as usize;

        let p = &self.perm_table;
        let gi0 = p.get(ii + p.get(jj + p.get(kk) as usize) as usize);
        let gi1 = p.get(ii + i1 + p.get(jj + j1 + p.get(kk + k1) as usize) as usize);
        let gi2 = p.get(ii + i2 + p.get(jj + j2 + p.get(kk + k2) as usize) as usize);
        let gi3 = p.get(ii + 1 + p.get(jj + 1 + p.get(kk + 1) as usize) as usize);

        // Calculate contribution from four corners
        let n0 = self.contribution(x0, y0, z0, gi0);
        let n1 = self.contribution(x1, y1, z1, gi1);
        let n2 = self.contribution(x2, y2, z2, gi2);
        let n3 = self.contribution(x3, y3, z3, gi3);

        // Scale to [-1, 1] range
        // The magic number 32.0 normalizes the output
        32.0 * (n0 + n1 + n2 + n3)
    }

    /// Calculates the contribution from one corner of the simplex.
    #[inline]
    fn contribution(&self, x: f64, y: f64, z: f64, gradient_index: u8) -> f64 {
        let t = 0.6 - x * x - y * y - z * z;
        if t < 0.0 {
            0.0
        } else {
            let grad = self.perm_table.gradient(gradient_index);
            let t2 = t * t;
            t2 * t2
                * (x * f64::from(grad[0]) + y * f64::from(grad[1]) + z * f64::from(grad[2]))
        }
    }
}

/// A noise sampler with a mutable working scale.
///
/// Mirrors the octave-generator interface the shaping loop needs: the scale
/// is re-set before each octave, which is exactly why one sampler must stay
/// exclusive to one unit of work.
pub struct OctaveSampler {
    /// The underlying noise source.
    noise: SimplexNoise3,
    /// Current working scale applied to input coordinates.
    scale: f64,
}

impl OctaveSampler {
    /// Creates a sampler with working scale 1.0.
    #[must_use]
    pub fn new(seed: GenerationSeed) -> Self {
        Self {
            noise: SimplexNoise3::new(seed),
            scale: 1.0,
        }
    }

    /// Sets the working scale for subsequent samples.
    #[inline]
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// Samples noise at the given point under the current scale.
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1].
    #[inline]
    #[must_use]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise.sample(x * self.scale, y * self.scale, z * self.scale)
    }

    /// Samples noise remapped to [0, 1].
    #[inline]
    #[must_use]
    pub fn sample_normalized(&self, x: f64, y: f64, z: f64) -> f64 {
        (self.sample(x, y, z) + 1.0) / 2.0
    }
}

/// The shaping and material fields for one unit of work.
///
/// Holds the two samplers a section voxelizer owns exclusively, together
/// with the size-derived constants of the asteroid being generated.
pub struct NoiseField {
    /// Shaping sampler; its scale is rewritten once per octave per voxel.
    shaping: OctaveSampler,
    /// Material sampler; its scale is fixed at construction.
    material: OctaveSampler,
    /// Asteroid radius before deformation.
    size: f64,
    /// Octave count (inclusive upper bound of the shaping loop).
    octaves: u32,
    /// Base frequency for octave 0.
    base_scale: f64,
    /// Exponent controlling per-octave frequency growth.
    frequency_exponent: f64,
}

impl NoiseField {
    /// Per-octave amplitude decay exponent.
    const AMPLITUDE_EXPONENT: f64 = 2.25;

    /// Creates the field for an asteroid of the given size and roughness.
    ///
    /// Both samplers derive from the request seed with fixed purposes, so
    /// every unit of work sees the same continuous fields.
    #[must_use]
    pub fn new(seed: GenerationSeed, size: f64, octaves: u32) -> Self {
        let size_factor = size / 15.0;

        let mut material = OctaveSampler::new(seed.derive(MATERIAL_PURPOSE));
        material.set_scale(0.15 / size_factor.sqrt());

        Self {
            shaping: OctaveSampler::new(seed.derive(SHAPING_PURPOSE)),
            material,
            size,
            octaves,
            base_scale: 0.015 / size_factor.max(1.0),
            frequency_exponent: Self::AMPLITUDE_EXPONENT + (size_factor / 2.25).min(0.5),
        }
    }

    /// Accumulated shaping value at a world point.
    ///
    /// Sums one absolute-valued noise term per octave (`0..=octaves`, so an
    /// octave count of 0 still contributes one term), each at frequency
    /// `base_scale * (octave + 1)^p` and amplitude `size / (octave + 1)^2.25`,
    /// then squares the sum. The result is the effective squared radius:
    /// a voxel is inside the body when its squared offset from the origin is
    /// strictly below this value.
    #[must_use]
    pub fn shaping_at(&mut self, x: f64, y: f64, z: f64) -> f64 {
        let mut accumulated = 0.0;

        for octave in 0..=self.octaves {
            let step = f64::from(octave) + 1.0;
            self.shaping
                .set_scale(self.base_scale * step.powf(self.frequency_exponent));

            let offset =
                self.shaping.sample(x, y, z).abs() * (self.size / step.powf(Self::AMPLITUDE_EXPONENT));

            accumulated += offset;
        }

        accumulated * accumulated
    }

    /// Material value at a world point, in [0, 1].
    #[inline]
    #[must_use]
    pub fn material_at(&self, x: f64, y: f64, z: f64) -> f64 {
        self.material.sample_normalized(x, y, z)
    }
}

/// Derives a domain offset in [0, 256) from a seed.
#[inline]
fn domain_offset(seed: GenerationSeed) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let fraction = (seed.value() >> 11) as f64 / ((1u64 << 53) as f64);
    fraction * 256.0
}

/// Fast floor function.
///
/// Faster than `f64::floor()` for our use case.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn fast_floor(x: f64) -> i32 {
    let xi = x as i32;
    if x < f64::from(xi) { xi - 1 } else { xi }
}
