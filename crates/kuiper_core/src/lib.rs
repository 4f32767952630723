//! # KUIPER Core Types
//!
//! Shared leaf types for the KUIPER asteroid generation core.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: no ambient entropy - every random stream derives
//!    from a caller-provided [`GenerationSeed`]
//! 2. **Closed block set**: materials are a tagged enum, not open strings
//! 3. **External configuration**: weighted palettes and ore tables load from
//!    TOML once at startup and are passed by reference - no global registries
//!
//! ## Example
//!
//! ```rust,ignore
//! use kuiper_core::{GeneratorConfig, GenerationSeed};
//!
//! let config = GeneratorConfig::from_toml_str(include_str!("asteroids.toml"))?;
//! let palette = config.palette("iron-rich")?;
//! let seed = GenerationSeed::new(world_seed).derive(request_id);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod block;
pub mod config;
pub mod coords;
pub mod error;
pub mod palette_table;
pub mod seed;

pub use block::BlockKind;
pub use config::{BeltFeature, GeneratorConfig, PaletteConfig, RollingBounds, WorldLimits};
pub use coords::{ChunkKey, SectionPos, SECTION_SIZE, VOXELS_PER_SECTION};
pub use error::GenerationError;
pub use palette_table::{OreTable, WeightedEntry, WeightedPalette};
pub use seed::GenerationSeed;
