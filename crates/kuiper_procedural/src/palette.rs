//! # Section Palette Encoding
//!
//! Deduplicates the block kinds used inside one section into a small ordered
//! palette, so voxels store compact indices instead of full block values.
//!
//! Index 0 is always air, regardless of what gets interned first; empty
//! voxels can be written without consulting the map.

use std::collections::HashMap;

use kuiper_core::BlockKind;
use serde::{Deserialize, Serialize};

/// Palette index reserved for air.
pub const AIR_INDEX: u16 = 0;

/// Interns block kinds into first-seen-order palette indices.
///
/// Owned exclusively by one unit of work; never shared.
pub struct SectionPaletteEncoder {
    /// Distinct block kinds, in assignment order. Entry 0 is air.
    entries: Vec<BlockKind>,
    /// Reverse lookup from block kind to its index.
    indices: HashMap<BlockKind, u16>,
}

impl SectionPaletteEncoder {
    /// Creates an encoder with air pre-registered at index 0.
    #[must_use]
    pub fn new() -> Self {
        let mut encoder = Self {
            entries: Vec::with_capacity(8),
            indices: HashMap::with_capacity(8),
        };
        encoder.entries.push(BlockKind::Air);
        encoder.indices.insert(BlockKind::Air, AIR_INDEX);
        encoder
    }

    /// Returns the palette index for a block kind, assigning the next free
    /// index on first sight.
    pub fn intern(&mut self, block: BlockKind) -> u16 {
        if let Some(&index) = self.indices.get(&block) {
            return index;
        }

        // Bounded by the number of distinct blocks in a 4096-voxel section,
        // so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation)]
        let index = self.entries.len() as u16;
        self.entries.push(block);
        self.indices.insert(block, index);
        index
    }

    /// Number of distinct block kinds interned so far (air included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false - air is pre-registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if anything other than air was interned.
    #[must_use]
    pub fn has_matter(&self) -> bool {
        self.entries.len() > 1
    }

    /// Produces the serialized palette for external persistence.
    #[must_use]
    pub fn serialize(&self) -> SerializedPalette {
        SerializedPalette(self.entries.clone())
    }
}

impl Default for SectionPaletteEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered block palette in a form suitable for external persistence.
///
/// Serde-serializable so the external block-storage subsystem can write it
/// in whatever container format it uses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedPalette(Vec<BlockKind>);

impl SerializedPalette {
    /// Palette entries in index order. Entry 0 is air.
    #[must_use]
    pub fn entries(&self) -> &[BlockKind] {
        &self.0
    }

    /// Number of palette entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the palette has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the palette holds any non-air entry.
    #[must_use]
    pub fn has_matter(&self) -> bool {
        self.0.iter().any(|block| !block.is_air())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_is_index_zero() {
        let mut encoder = SectionPaletteEncoder::new();
        assert_eq!(encoder.len(), 1);

        // Even when other blocks arrive first, air keeps index 0
        assert_eq!(encoder.intern(BlockKind::Stone), 1);
        assert_eq!(encoder.intern(BlockKind::Air), AIR_INDEX);
    }

    #[test]
    fn test_interning_is_idempotent() {
        let mut encoder = SectionPaletteEncoder::new();
        let first = encoder.intern(BlockKind::IronOre);
        let second = encoder.intern(BlockKind::IronOre);

        assert_eq!(first, second);
        assert_eq!(encoder.len(), 2);
    }

    #[test]
    fn test_first_seen_order() {
        let mut encoder = SectionPaletteEncoder::new();
        encoder.intern(BlockKind::Basalt);
        encoder.intern(BlockKind::Stone);
        encoder.intern(BlockKind::Basalt);
        encoder.intern(BlockKind::Gravel);

        let palette = encoder.serialize();
        assert_eq!(
            palette.entries(),
            &[BlockKind::Air, BlockKind::Basalt, BlockKind::Stone, BlockKind::Gravel]
        );
    }

    #[test]
    fn test_has_matter() {
        let mut encoder = SectionPaletteEncoder::new();
        assert!(!encoder.has_matter());
        assert!(!encoder.serialize().has_matter());

        encoder.intern(BlockKind::Stone);
        assert!(encoder.has_matter());
        assert!(encoder.serialize().has_matter());
    }
}
