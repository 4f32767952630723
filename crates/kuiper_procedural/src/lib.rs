//! # KUIPER Procedural Generation
//!
//! Deterministic, concurrent asteroid-voxel generation.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same seed + same descriptor = same asteroid, ALWAYS
//! 2. **Sectioned**: bodies are generated in independent 16x16x16 sections
//! 3. **Fail-soft**: one broken section is dropped, never the whole body
//! 4. **No shared samplers**: every unit of work owns its noise state
//!
//! ## Core Components
//!
//! - `NoiseField`: 3D shaping and material fields for one unit of work
//! - `SectionPaletteEncoder`: block interning with air fixed at index 0
//! - `covered_sections`: sparse chunk/section coverage for one asteroid
//! - `SectionVoxelizer`: fills and palette-encodes one section
//! - `GenerationCoordinator`: worker fan-out with a join-all barrier
//!
//! ## Example
//!
//! ```rust,ignore
//! use kuiper_core::{GenerationSeed, GeneratorConfig};
//! use kuiper_procedural::{AsteroidDescriptor, GenerationCoordinator};
//!
//! let config = GeneratorConfig::from_toml_file("asteroids.toml")?;
//! let asteroid = AsteroidDescriptor::new((0, 64, 0), 12.0, 2, 0.1, "chondrite", &config)?;
//!
//! let coordinator = GenerationCoordinator::new(&config, GenerationSeed::new(world_seed));
//! let result = coordinator.generate(&asteroid)?;
//! // hand `result` to the external block-storage subsystem
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod asteroid;
pub mod generator;
pub mod noise;
pub mod palette;
pub mod partition;
pub mod voxelizer;

pub use asteroid::AsteroidDescriptor;
pub use generator::{GenerationCoordinator, GenerationResult};
pub use noise::{NoiseField, OctaveSampler, SimplexNoise3};
pub use palette::{SectionPaletteEncoder, SerializedPalette, AIR_INDEX};
pub use partition::{covered_sections, CoverageMap};
pub use voxelizer::{CompletedSection, SectionVoxelizer};
