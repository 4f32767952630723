//! # Section Voxelizer
//!
//! Fills one admitted 16x16x16 section voxel by voxel: inside/outside test
//! against the noise-deformed surface, material selection from the weighted
//! palette, optional ore substitution, and palette encoding.
//!
//! A voxelizer is one unit of work. Everything mutable in here - the noise
//! field, the ore RNG, the palette encoder - is owned by this instance and
//! never escapes until the finished section is handed to the coordinator.

use kuiper_core::coords::{SECTION_SIZE, VOXELS_PER_SECTION};
use kuiper_core::palette_table::WeightedPalette;
use kuiper_core::{GenerationSeed, SectionPos};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::asteroid::AsteroidDescriptor;
use crate::noise::NoiseField;
use crate::palette::{SectionPaletteEncoder, SerializedPalette, AIR_INDEX};

/// Seed-derivation purpose for per-section ore streams.
const ORE_PURPOSE: u64 = 0x4F52;

/// One finished, palette-encoded section.
///
/// Written once by its producing unit of work, then moved to the
/// coordinator; never mutated afterwards.
#[derive(Clone, Debug)]
pub struct CompletedSection {
    /// Vertical section index.
    section_y: i32,
    /// 4096 palette indices, in x-outer / z-middle / y-inner order.
    blocks: Vec<u16>,
    /// The distinct blocks used, serialized for external persistence.
    palette: SerializedPalette,
}

impl CompletedSection {
    /// Vertical section index.
    #[inline]
    #[must_use]
    pub const fn section_y(&self) -> i32 {
        self.section_y
    }

    /// The 4096 voxel palette indices.
    #[must_use]
    pub fn blocks(&self) -> &[u16] {
        &self.blocks
    }

    /// The section's serialized block palette. Entry 0 is air.
    #[must_use]
    pub const fn palette(&self) -> &SerializedPalette {
        &self.palette
    }

    /// Returns true if any voxel holds something other than air.
    #[must_use]
    pub fn has_matter(&self) -> bool {
        self.palette.has_matter()
    }
}

/// Voxelizes one section of one asteroid.
pub struct SectionVoxelizer<'req> {
    /// The request being generated, shared read-only across units.
    asteroid: &'req AsteroidDescriptor<'req>,
    /// Ore list for the asteroid's palette, if one is configured.
    ores: Option<&'req WeightedPalette>,
    /// This unit's own shaping and material samplers.
    field: NoiseField,
    /// This unit's own ore-substitution stream, seeded per section.
    ore_rng: ChaCha8Rng,
    /// The section being voxelized.
    pos: SectionPos,
}

impl<'req> SectionVoxelizer<'req> {
    /// Creates the unit of work for one section.
    ///
    /// The noise field derives from the request seed alone (all sections
    /// see the same continuous surface); the ore stream additionally mixes
    /// in the section position, so output per section is independent of
    /// scheduling order.
    #[must_use]
    pub fn new(
        asteroid: &'req AsteroidDescriptor<'req>,
        ores: Option<&'req WeightedPalette>,
        seed: GenerationSeed,
        pos: SectionPos,
    ) -> Self {
        let ore_seed = seed.derive(ORE_PURPOSE).derive(pos.seed_purpose());

        Self {
            asteroid,
            ores,
            field: NoiseField::new(seed, asteroid.size, asteroid.octaves),
            ore_rng: ChaCha8Rng::seed_from_u64(ore_seed.value()),
            pos,
        }
    }

    /// Computes the completed section.
    ///
    /// Visits all 4096 voxels in x-outer / z-middle / y-inner order. A voxel
    /// whose squared offset from the asteroid origin reaches the shaping
    /// value is empty; an interior voxel takes a weighted palette entry
    /// selected by the material field, possibly substituted by an ore.
    #[must_use]
    pub fn voxelize(mut self) -> CompletedSection {
        let mut palette = SectionPaletteEncoder::new();
        let mut blocks = Vec::with_capacity(VOXELS_PER_SECTION);

        let chunk_min_x = self.pos.chunk.min_block_x();
        let chunk_min_z = self.pos.chunk.min_block_z();
        let section_min_y = self.pos.min_block_y();

        let origin_x = f64::from(self.asteroid.x);
        let origin_y = f64::from(self.asteroid.y);
        let origin_z = f64::from(self.asteroid.z);

        for x in 0..SECTION_SIZE {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let world_x = f64::from(chunk_min_x + x as i32);
            let x_squared = (world_x - origin_x) * (world_x - origin_x);

            for z in 0..SECTION_SIZE {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let world_z = f64::from(chunk_min_z + z as i32);
                let z_squared = (world_z - origin_z) * (world_z - origin_z);

                for y in 0..SECTION_SIZE {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                    let world_y = f64::from(section_min_y + y as i32);
                    let y_squared = (world_y - origin_y) * (world_y - origin_y);

                    let index = self.place_voxel(
                        &mut palette,
                        world_x,
                        world_y,
                        world_z,
                        x_squared + y_squared + z_squared,
                    );
                    blocks.push(index);
                }
            }
        }

        CompletedSection {
            section_y: self.pos.section_y,
            blocks,
            palette: palette.serialize(),
        }
    }

    /// Decides one voxel and interns its block, returning the palette index.
    fn place_voxel(
        &mut self,
        palette: &mut SectionPaletteEncoder,
        world_x: f64,
        world_y: f64,
        world_z: f64,
        offset_squared: f64,
    ) -> u16 {
        let shaping = self.field.shaping_at(world_x, world_y, world_z);

        // Outside the noise-deformed surface
        if offset_squared >= shaping {
            return AIR_INDEX;
        }

        let material_sample = self.field.material_at(world_x, world_y, world_z);

        // A sampled value no entry covers falls back to air rather than
        // failing the whole unit of work
        let Some(mut block) = self.asteroid.palette.get_entry(material_sample) else {
            return AIR_INDEX;
        };

        // The ore roll consumes one random value per interior voxel whether
        // or not it hits, keeping the stream aligned across configurations
        let ore_roll = self.ore_rng.gen::<f64>();
        if ore_roll < self.asteroid.ore_ratio && !block.is_air() {
            if let Some(ore) = self.ores.and_then(|table| table.pick(&mut self.ore_rng)) {
                block = ore;
            }
        }

        palette.intern(block)
    }
}
