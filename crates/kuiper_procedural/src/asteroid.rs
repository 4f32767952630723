//! # Asteroid Descriptors
//!
//! The immutable request handed to the generator: where the asteroid is,
//! how big and rough it is, and which material palette fills it.
//!
//! Descriptors borrow their palette from the validated [`GeneratorConfig`],
//! so a descriptor that constructs successfully can always be generated.

use kuiper_core::palette_table::WeightedPalette;
use kuiper_core::{GenerationError, GeneratorConfig};
use rand::Rng;

/// One asteroid generation request.
///
/// Read-only for the lifetime of the request; every concurrent unit of work
/// shares it by reference.
#[derive(Clone, Copy, Debug)]
pub struct AsteroidDescriptor<'cfg> {
    /// Origin X, in blocks.
    pub x: i32,
    /// Origin Y, in blocks.
    pub y: i32,
    /// Origin Z, in blocks.
    pub z: i32,
    /// Radius before noise deformation. Strictly positive.
    pub size: f64,
    /// Number of extra shaping octaves; 0 still shapes with one term.
    pub octaves: u32,
    /// Probability of substituting an interior voxel with an ore.
    pub ore_ratio: f64,
    /// Identifier of the material palette.
    pub palette_id: &'cfg str,
    /// The weighted material palette itself.
    pub palette: &'cfg WeightedPalette,
}

impl<'cfg> AsteroidDescriptor<'cfg> {
    /// Creates a validated descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is not strictly positive, `ore_ratio` lies
    /// outside `[0, 1]`, or `palette_id` is not configured.
    pub fn new(
        (x, y, z): (i32, i32, i32),
        size: f64,
        octaves: u32,
        ore_ratio: f64,
        palette_id: &str,
        config: &'cfg GeneratorConfig,
    ) -> Result<Self, GenerationError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(GenerationError::InvalidSize(size));
        }
        if !(0.0..=1.0).contains(&ore_ratio) {
            return Err(GenerationError::InvalidOreRatio(ore_ratio));
        }

        let palette = config.palette(palette_id)?;

        Ok(Self {
            x,
            y,
            z,
            size,
            octaves,
            ore_ratio,
            palette_id: &palette.id,
            palette: &palette.blocks,
        })
    }

    /// Rolls a random descriptor at the given origin.
    ///
    /// The palette is a weighted choice among all configured palettes, the
    /// size is uniform within the configured bounds, and the octave count
    /// decays with size (small asteroids are rougher):
    /// `octaves = floor(5 * 0.95^size)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `ore_ratio` lies outside `[0, 1]` (other inputs
    /// come from the validated configuration).
    pub fn roll<R: Rng + ?Sized>(
        (x, y, z): (i32, i32, i32),
        ore_ratio: f64,
        rng: &mut R,
        config: &'cfg GeneratorConfig,
    ) -> Result<Self, GenerationError> {
        let palette = pick_palette(rng, config)?;

        let size = rng.gen_range(config.rolling.min_size..=config.rolling.max_size);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let octaves = (5.0 * 0.95_f64.powf(size)).floor() as u32;

        Self::new((x, y, z), size, octaves, ore_ratio, palette, config)
    }
}

/// Weighted choice among the configured palettes.
fn pick_palette<'cfg, R: Rng + ?Sized>(
    rng: &mut R,
    config: &'cfg GeneratorConfig,
) -> Result<&'cfg str, GenerationError> {
    let total: u32 = config.palettes().iter().map(|p| p.weight).sum();
    if total == 0 {
        return Err(GenerationError::NoPalettes);
    }

    let mut remaining = rng.gen_range(0..total);
    for palette in config.palettes() {
        if remaining < palette.weight {
            return Ok(&palette.id);
        }
        remaining -= palette.weight;
    }

    // Unreachable: remaining < total and the weights sum to total
    Err(GenerationError::NoPalettes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config() -> GeneratorConfig {
        GeneratorConfig::from_toml_str(
            r#"
            search-radius = 1.25
            base-density = 0.25
            [limits]
            min-y = -64
            max-y = 320
            [rolling]
            min-size = 5.0
            max-size = 20.0
            [[palette]]
            id = "chondrite"
            weight = 4
            blocks = [{ block = "stone", weight = 1 }]
            [[palette]]
            id = "icy"
            weight = 1
            blocks = [{ block = "packed-ice", weight = 1 }]
            "#,
        )
        .expect("valid config")
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let config = config();
        assert!(matches!(
            AsteroidDescriptor::new((0, 0, 0), 0.0, 1, 0.0, "chondrite", &config),
            Err(GenerationError::InvalidSize(_))
        ));
        assert!(matches!(
            AsteroidDescriptor::new((0, 0, 0), -3.0, 1, 0.0, "chondrite", &config),
            Err(GenerationError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_ore_ratio() {
        let config = config();
        assert!(matches!(
            AsteroidDescriptor::new((0, 0, 0), 10.0, 1, 1.5, "chondrite", &config),
            Err(GenerationError::InvalidOreRatio(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_palette() {
        let config = config();
        assert!(matches!(
            AsteroidDescriptor::new((0, 0, 0), 10.0, 1, 0.0, "carbon", &config),
            Err(GenerationError::UnknownPalette(_))
        ));
    }

    #[test]
    fn test_roll_is_deterministic() {
        let config = config();

        let mut rng1 = ChaCha8Rng::seed_from_u64(77);
        let mut rng2 = ChaCha8Rng::seed_from_u64(77);

        let a = AsteroidDescriptor::roll((10, 64, -20), 0.1, &mut rng1, &config).expect("roll");
        let b = AsteroidDescriptor::roll((10, 64, -20), 0.1, &mut rng2, &config).expect("roll");

        assert_eq!(a.size, b.size);
        assert_eq!(a.octaves, b.octaves);
        assert_eq!(a.palette_id, b.palette_id);
    }

    #[test]
    fn test_roll_respects_bounds() {
        let config = config();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..100 {
            let rolled = AsteroidDescriptor::roll((0, 0, 0), 0.0, &mut rng, &config).expect("roll");
            assert!(rolled.size >= 5.0 && rolled.size <= 20.0);
            // floor(5 * 0.95^size) for size in [5, 20]
            assert!(rolled.octaves <= 3);
        }
    }
}
