//! # Block Kinds
//!
//! The closed set of materials an asteroid voxel can hold.
//!
//! The generator never deals in open-ended block identifiers: every material
//! it can emit is a variant here, so palette handling is exhaustive and a
//! config file referencing an unknown material fails at load time, not deep
//! inside a worker thread.

use serde::{Deserialize, Serialize};

/// A block material, as stored in a generated section.
///
/// Variant 0 is always [`BlockKind::Air`]; generated palettes rely on that
/// when reserving palette index 0 for empty voxels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    /// Empty space. Always palette index 0.
    #[default]
    Air,
    /// Plain asteroid rock.
    Stone,
    /// Weathered rock variant.
    Cobblestone,
    /// Loose surface material.
    Gravel,
    /// Compacted dark rock.
    Basalt,
    /// Pale silicate rock.
    Diorite,
    /// Coarse speckled rock.
    Granite,
    /// Frozen volatiles.
    PackedIce,
    /// Carbon deposit.
    CoalOre,
    /// Iron deposit.
    IronOre,
    /// Copper deposit.
    CopperOre,
    /// Gold deposit.
    GoldOre,
    /// Lapis deposit.
    LapisOre,
    /// Redstone deposit.
    RedstoneOre,
    /// Emerald deposit.
    EmeraldOre,
    /// Diamond deposit.
    DiamondOre,
}

impl BlockKind {
    /// Returns true if this block is empty space.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }

    /// Returns true if this block is an ore deposit.
    #[inline]
    #[must_use]
    pub const fn is_ore(self) -> bool {
        matches!(
            self,
            Self::CoalOre
                | Self::IronOre
                | Self::CopperOre
                | Self::GoldOre
                | Self::LapisOre
                | Self::RedstoneOre
                | Self::EmeraldOre
                | Self::DiamondOre
        )
    }
}
