//! # Spatial Partitioning
//!
//! Computes the sparse set of 16x16x16 sections that could intersect an
//! asteroid. This is a coarse filter: it works at chunk/section granularity
//! and intentionally over-admits, because the exact inside/outside decision
//! belongs to the voxelizer sampling the noise-deformed surface. A section
//! admitted here may legitimately voxelize as entirely empty.

use std::collections::BTreeMap;

use kuiper_core::coords::block_to_section;
use kuiper_core::{ChunkKey, GeneratorConfig};

use crate::asteroid::AsteroidDescriptor;

/// Admitted sections, grouped by chunk in deterministic order.
///
/// Each chunk maps to its admitted vertical section indices, ascending.
pub type CoverageMap = BTreeMap<ChunkKey, Vec<i32>>;

/// Computes every section covered by the asteroid's search region.
///
/// The search box is `origin +/- size * search_radius` per axis, with Y
/// clamped to the world build limits. Chunks are pre-filtered by planar
/// (cylindrical) distance, then each section must pass the full squared
/// sphere test - both at chunk/section granularity.
#[must_use]
pub fn covered_sections(asteroid: &AsteroidDescriptor<'_>, config: &GeneratorConfig) -> CoverageMap {
    #[allow(clippy::cast_possible_truncation)]
    let reach = (asteroid.size * config.search_radius) as i32;
    let radius_squared = asteroid.size * asteroid.size;

    let min_y = config.limits.clamp_y(asteroid.y - reach);
    let max_y = config.limits.clamp_y(asteroid.y + reach);

    let chunk_x_range = block_to_section(asteroid.x - reach)..=block_to_section(asteroid.x + reach);
    let chunk_z_range = block_to_section(asteroid.z - reach)..=block_to_section(asteroid.z + reach);
    let section_y_range = block_to_section(min_y)..=block_to_section(max_y);

    let origin_chunk_x = block_to_section(asteroid.x);
    let origin_chunk_z = block_to_section(asteroid.z);
    let origin_section_y = block_to_section(asteroid.y);

    let mut covered = CoverageMap::new();

    for chunk_x in chunk_x_range {
        let x_squared = f64::from((chunk_x - origin_chunk_x) * (chunk_x - origin_chunk_x));

        for chunk_z in chunk_z_range.clone() {
            let z_squared = f64::from((chunk_z - origin_chunk_z) * (chunk_z - origin_chunk_z));
            let planar = x_squared + z_squared;

            // Cylindrical pre-filter: outside the equatorial radius, no
            // section of this chunk can qualify
            if planar >= radius_squared {
                continue;
            }

            let mut sections = Vec::new();
            for section_y in section_y_range.clone() {
                let y_squared =
                    f64::from((section_y - origin_section_y) * (section_y - origin_section_y));

                if planar + y_squared <= radius_squared {
                    sections.push(section_y);
                }
            }

            if !sections.is_empty() {
                covered.insert(ChunkKey::new(chunk_x, chunk_z), sections);
            }
        }
    }

    covered
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuiper_core::GeneratorConfig;

    fn config(min_y: i32, max_y: i32) -> GeneratorConfig {
        GeneratorConfig::from_toml_str(&format!(
            r#"
            search-radius = 1.25
            base-density = 0.25
            [limits]
            min-y = {min_y}
            max-y = {max_y}
            [rolling]
            min-size = 5.0
            max-size = 20.0
            [[palette]]
            id = "chondrite"
            weight = 1
            blocks = [{{ block = "stone", weight = 1 }}]
            "#
        ))
        .expect("valid config")
    }

    fn descriptor(
        origin: (i32, i32, i32),
        size: f64,
        config: &GeneratorConfig,
    ) -> AsteroidDescriptor<'_> {
        AsteroidDescriptor::new(origin, size, 1, 0.0, "chondrite", config).expect("valid descriptor")
    }

    #[test]
    fn test_origin_chunk_is_covered() {
        let config = config(-64, 320);
        let asteroid = descriptor((0, 64, 0), 10.0, &config);

        let covered = covered_sections(&asteroid, &config);
        let home = covered.get(&ChunkKey::new(0, 0)).expect("origin chunk covered");
        assert!(home.contains(&4), "section containing the origin must be admitted");
    }

    #[test]
    fn test_sections_pass_sphere_test() {
        let config = config(-64, 320);
        let asteroid = descriptor((8, 72, -24), 12.0, &config);
        let radius_squared = asteroid.size * asteroid.size;

        let covered = covered_sections(&asteroid, &config);
        assert!(!covered.is_empty());

        for (chunk, sections) in &covered {
            let dx = f64::from(chunk.x - (asteroid.x >> 4));
            let dz = f64::from(chunk.z - (asteroid.z >> 4));
            assert!(dx * dx + dz * dz < radius_squared, "chunk outside equatorial radius");

            for &section_y in sections {
                let dy = f64::from(section_y - (asteroid.y >> 4));
                assert!(
                    dx * dx + dz * dz + dy * dy <= radius_squared,
                    "section outside spherical radius"
                );
            }
        }
    }

    #[test]
    fn test_y_range_respects_world_limits() {
        let config = config(0, 64);
        let asteroid = descriptor((0, 8, 0), 20.0, &config);

        let covered = covered_sections(&asteroid, &config);
        for sections in covered.values() {
            for &section_y in sections {
                assert!(section_y >= 0, "below min build height");
                assert!(section_y <= 4, "above max build height");
            }
        }
    }

    #[test]
    fn test_coverage_is_deterministic() {
        let config = config(-64, 320);
        let asteroid = descriptor((100, 100, 100), 15.0, &config);

        let a = covered_sections(&asteroid, &config);
        let b = covered_sections(&asteroid, &config);
        assert_eq!(a, b);

        // BTreeMap iteration is ordered by chunk key
        let keys: Vec<_> = a.keys().copied().collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_section_lists_are_ascending_and_nonempty() {
        let config = config(-64, 320);
        let asteroid = descriptor((0, 64, 0), 18.0, &config);

        let covered = covered_sections(&asteroid, &config);
        for sections in covered.values() {
            assert!(!sections.is_empty());
            assert!(sections.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
