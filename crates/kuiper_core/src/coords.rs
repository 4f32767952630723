//! # Section Addressing
//!
//! World space is partitioned into 16x16x16 sections, addressed by a 2D
//! chunk key plus a vertical section index.

/// Section edge length in blocks.
pub const SECTION_SIZE: usize = 16;

/// Total voxels per section (16 * 16 * 16).
pub const VOXELS_PER_SECTION: usize = SECTION_SIZE * SECTION_SIZE * SECTION_SIZE;

/// Shift that converts a block coordinate to a chunk/section coordinate.
const SECTION_SHIFT: i32 = 4;

/// Chunk key (identifies a 16x16 column of sections in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkKey {
    /// X coordinate (in chunks, not blocks).
    pub x: i32,
    /// Z coordinate (in chunks, not blocks).
    pub z: i32,
}

impl ChunkKey {
    /// Creates a new chunk key.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Converts world block coordinates to a chunk key.
    #[inline]
    #[must_use]
    pub const fn from_block_pos(block_x: i32, block_z: i32) -> Self {
        Self {
            x: block_x >> SECTION_SHIFT,
            z: block_z >> SECTION_SHIFT,
        }
    }

    /// Returns the world X coordinate of the chunk's minimum corner.
    #[inline]
    #[must_use]
    pub const fn min_block_x(self) -> i32 {
        self.x << SECTION_SHIFT
    }

    /// Returns the world Z coordinate of the chunk's minimum corner.
    #[inline]
    #[must_use]
    pub const fn min_block_z(self) -> i32 {
        self.z << SECTION_SHIFT
    }
}

/// Full address of one 16x16x16 section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SectionPos {
    /// The chunk column holding this section.
    pub chunk: ChunkKey,
    /// Vertical section index (world Y divided by 16).
    pub section_y: i32,
}

impl SectionPos {
    /// Creates a new section position.
    #[inline]
    #[must_use]
    pub const fn new(chunk: ChunkKey, section_y: i32) -> Self {
        Self { chunk, section_y }
    }

    /// Returns the world Y coordinate of the section's minimum corner.
    #[inline]
    #[must_use]
    pub const fn min_block_y(self) -> i32 {
        self.section_y << SECTION_SHIFT
    }

    /// Hashes this position into a purpose value for seed derivation.
    ///
    /// Distinct sections map to distinct purposes so their derived random
    /// streams are independent of each other and of scheduling order.
    #[inline]
    #[must_use]
    pub const fn seed_purpose(self) -> u64 {
        let x = self.chunk.x as u64 & 0x003F_FFFF;
        let z = self.chunk.z as u64 & 0x003F_FFFF;
        let y = self.section_y as u64 & 0x000F_FFFF;
        (x << 42) | (z << 20) | y
    }
}

/// Converts a world block coordinate to its section index.
#[inline]
#[must_use]
pub const fn block_to_section(block: i32) -> i32 {
    block >> SECTION_SHIFT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_to_chunk_conversion() {
        assert_eq!(ChunkKey::from_block_pos(0, 0), ChunkKey::new(0, 0));
        assert_eq!(ChunkKey::from_block_pos(15, 15), ChunkKey::new(0, 0));
        assert_eq!(ChunkKey::from_block_pos(16, 31), ChunkKey::new(1, 1));
        assert_eq!(ChunkKey::from_block_pos(-1, -16), ChunkKey::new(-1, -1));
        assert_eq!(ChunkKey::from_block_pos(-17, -33), ChunkKey::new(-2, -3));
    }

    #[test]
    fn test_chunk_min_corner_round_trip() {
        let key = ChunkKey::new(-3, 7);
        assert_eq!(ChunkKey::from_block_pos(key.min_block_x(), key.min_block_z()), key);
    }

    #[test]
    fn test_section_min_y() {
        let pos = SectionPos::new(ChunkKey::new(0, 0), -2);
        assert_eq!(pos.min_block_y(), -32);
        assert_eq!(block_to_section(pos.min_block_y()), -2);
    }

    #[test]
    fn test_seed_purpose_distinct_for_neighbours() {
        let a = SectionPos::new(ChunkKey::new(0, 0), 0).seed_purpose();
        let b = SectionPos::new(ChunkKey::new(0, 0), 1).seed_purpose();
        let c = SectionPos::new(ChunkKey::new(0, 1), 0).seed_purpose();
        let d = SectionPos::new(ChunkKey::new(1, 0), 0).seed_purpose();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_ne!(c, d);
    }
}
