//! # Generator Configuration
//!
//! TOML-loaded configuration for asteroid generation: weighted material
//! palettes, per-palette ore lists, world vertical limits, belt features and
//! descriptor rolling bounds.
//!
//! Configuration is loaded **once** at startup, validated eagerly, and then
//! passed by reference into the generator. There is no global registry.
//!
//! ## Example file
//!
//! ```toml
//! search-radius = 1.25
//! base-density = 0.25
//!
//! [limits]
//! min-y = -64
//! max-y = 320
//!
//! [rolling]
//! min-size = 5.0
//! max-size = 20.0
//!
//! [[palette]]
//! id = "chondrite"
//! weight = 4
//! blocks = [{ block = "stone", weight = 3 }, { block = "basalt", weight = 1 }]
//! ores = [{ block = "iron-ore", weight = 2 }, { block = "coal-ore", weight = 3 }]
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::GenerationError;
use crate::palette_table::{OreTable, WeightedEntry, WeightedPalette};

/// World vertical build limits, in blocks.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorldLimits {
    /// Minimum build height (inclusive).
    pub min_y: i32,
    /// Maximum build height (inclusive).
    pub max_y: i32,
}

impl WorldLimits {
    /// Clamps a world Y coordinate into the buildable range.
    #[inline]
    #[must_use]
    pub const fn clamp_y(&self, y: i32) -> i32 {
        if y < self.min_y {
            self.min_y
        } else if y > self.max_y {
            self.max_y
        } else {
            y
        }
    }
}

/// Bounds for rolling random asteroid descriptors.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RollingBounds {
    /// Smallest rolled asteroid radius.
    pub min_size: f64,
    /// Largest rolled asteroid radius.
    pub max_size: f64,
}

/// A toroidal asteroid-belt feature overriding the base density.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BeltFeature {
    /// World this belt lives in.
    pub world: String,
    /// Belt center X.
    pub x: f64,
    /// Belt center Y.
    pub y: f64,
    /// Belt center Z.
    pub z: f64,
    /// Distance from center to the middle of the tube.
    pub tube_size: f64,
    /// Radius of the tube itself.
    pub tube_radius: f64,
    /// Density inside the tube.
    pub density: f64,
}

impl BeltFeature {
    /// Returns true if a world point lies inside the belt's torus.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        let planar = ((x - self.x).powi(2) + (z - self.z).powi(2)).sqrt();
        (planar - self.tube_size).powi(2) + (y - self.y).powi(2) < self.tube_radius.powi(2)
    }
}

/// One configured material palette with its selection weight and ore list.
#[derive(Clone, Debug)]
pub struct PaletteConfig {
    /// Palette identifier, referenced by descriptors.
    pub id: String,
    /// Weight used when rolling which palette a new asteroid gets.
    pub weight: u32,
    /// Weighted material list for interior voxels.
    pub blocks: WeightedPalette,
}

/// Validated generator configuration.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Multiplier applied to asteroid size when computing the search box.
    pub search_radius: f64,
    /// Density of asteroids outside any belt feature.
    pub base_density: f64,
    /// World vertical build limits.
    pub limits: WorldLimits,
    /// Descriptor rolling bounds.
    pub rolling: RollingBounds,
    /// Configured palettes, in file order.
    palettes: Vec<PaletteConfig>,
    /// Ore-substitution tables keyed by palette id.
    ores: OreTable,
    /// Belt features overriding the base density.
    belts: Vec<BeltFeature>,
}

/// Raw file schema, prior to validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    search_radius: f64,
    base_density: f64,
    limits: WorldLimits,
    rolling: RollingBounds,
    #[serde(default, rename = "palette")]
    palettes: Vec<RawPalette>,
    #[serde(default, rename = "belt")]
    belts: Vec<BeltFeature>,
}

/// Raw palette schema, prior to validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawPalette {
    id: String,
    weight: u32,
    blocks: Vec<WeightedEntry>,
    #[serde(default)]
    ores: Vec<WeightedEntry>,
}

impl GeneratorConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// parsed configuration fails validation.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, GenerationError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails, no palette is defined, a palette
    /// has zero total weight, the search radius or base density is
    /// degenerate, or limits/bounds are inverted.
    pub fn from_toml_str(text: &str) -> Result<Self, GenerationError> {
        let raw: RawConfig = toml::from_str(text)?;
        Self::validate(raw)
    }

    /// Validates the raw schema and builds the runtime tables.
    fn validate(raw: RawConfig) -> Result<Self, GenerationError> {
        if raw.palettes.is_empty() {
            return Err(GenerationError::NoPalettes);
        }
        // A zero or negative radius would invert every partition range and
        // silently admit nothing
        if !raw.search_radius.is_finite() || raw.search_radius <= 0.0 {
            return Err(GenerationError::InvalidSearchRadius(raw.search_radius));
        }
        if !raw.base_density.is_finite() || raw.base_density < 0.0 {
            return Err(GenerationError::InvalidBaseDensity(raw.base_density));
        }
        if raw.limits.min_y >= raw.limits.max_y {
            return Err(GenerationError::InvalidWorldLimits {
                min_y: raw.limits.min_y,
                max_y: raw.limits.max_y,
            });
        }
        if raw.rolling.min_size <= 0.0 || raw.rolling.min_size > raw.rolling.max_size {
            return Err(GenerationError::InvalidSizeBounds {
                min: raw.rolling.min_size,
                max: raw.rolling.max_size,
            });
        }

        let mut palettes = Vec::with_capacity(raw.palettes.len());
        let mut ore_tables = HashMap::with_capacity(raw.palettes.len());

        for palette in raw.palettes {
            let blocks = WeightedPalette::new(palette.blocks);
            if blocks.is_empty() {
                return Err(GenerationError::EmptyPalette(palette.id));
            }

            ore_tables.insert(palette.id.clone(), WeightedPalette::new(palette.ores));
            palettes.push(PaletteConfig {
                id: palette.id,
                weight: palette.weight,
                blocks,
            });
        }

        Ok(Self {
            search_radius: raw.search_radius,
            base_density: raw.base_density,
            limits: raw.limits,
            rolling: raw.rolling,
            palettes,
            ores: OreTable::new(ore_tables),
            belts: raw.belts,
        })
    }

    /// Returns the configured palettes in file order.
    #[must_use]
    pub fn palettes(&self) -> &[PaletteConfig] {
        &self.palettes
    }

    /// Looks up a palette by id.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnknownPalette`] if no palette has this id.
    pub fn palette(&self, id: &str) -> Result<&PaletteConfig, GenerationError> {
        self.palettes
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| GenerationError::UnknownPalette(id.to_owned()))
    }

    /// Returns the ore-substitution tables.
    #[must_use]
    pub const fn ores(&self) -> &OreTable {
        &self.ores
    }

    /// Returns the asteroid density at a world point.
    ///
    /// The base density applies everywhere; belt features in the named world
    /// override it where their torus contains the point, and the highest
    /// applicable density wins.
    #[must_use]
    pub fn density_at(&self, world: &str, x: f64, y: f64, z: f64) -> f64 {
        self.belts
            .iter()
            .filter(|belt| belt.world == world && belt.contains(x, y, z))
            .map(|belt| belt.density)
            .fold(self.base_density, f64::max)
    }
}
