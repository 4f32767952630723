//! # Weighted Tables
//!
//! Weighted material palettes and ore-substitution tables.
//!
//! A weighted palette behaves like the flattening of each entry repeated
//! `weight` times: sampling an index into that conceptual list picks the
//! entry covering it. The flattened list is never materialized - a
//! cumulative-weight walk gives the same answer without allocation.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::block::BlockKind;

/// One `(block, weight)` entry in a weighted table.
///
/// A weight of 0 excludes the entry from sampling while keeping it visible
/// in the config file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEntry {
    /// The block this entry produces.
    pub block: BlockKind,
    /// Relative sampling weight (higher = more common).
    pub weight: u32,
}

/// An ordered list of weighted block entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeightedPalette {
    /// Entries in configuration order.
    entries: Vec<WeightedEntry>,
    /// Sum of all entry weights (pre-calculated).
    total_weight: u32,
}

impl WeightedPalette {
    /// Builds a palette from entries, pre-calculating the total weight.
    #[must_use]
    pub fn new(entries: Vec<WeightedEntry>) -> Self {
        let total_weight = entries.iter().map(|e| e.weight).sum();
        Self { entries, total_weight }
    }

    /// Returns the entries in configuration order.
    #[must_use]
    pub fn entries(&self) -> &[WeightedEntry] {
        &self.entries
    }

    /// Returns the sum of all entry weights, i.e. the length of the
    /// conceptual flattened list.
    #[inline]
    #[must_use]
    pub const fn total_weight(&self) -> u32 {
        self.total_weight
    }

    /// Returns true if no entry can ever be sampled.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_weight == 0
    }

    /// Looks up the entry covering a sample in `[0, 1]`.
    ///
    /// The sample is scaled to an index into the conceptual flattened list;
    /// both endpoints are closed (0.0 hits the first entry, 1.0 the last).
    /// Returns `None` for an empty palette or a non-finite sample.
    #[must_use]
    pub fn get_entry(&self, sample: f64) -> Option<BlockKind> {
        if self.total_weight == 0 || !sample.is_finite() {
            return None;
        }

        let flattened_len = f64::from(self.total_weight);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = ((sample.clamp(0.0, 1.0) * flattened_len) as u32).min(self.total_weight - 1);

        self.entry_at(index)
    }

    /// Picks a uniformly weighted random entry.
    ///
    /// Returns `None` for an empty palette.
    #[must_use]
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<BlockKind> {
        if self.total_weight == 0 {
            return None;
        }
        let index = rng.gen_range(0..self.total_weight);
        self.entry_at(index)
    }

    /// Resolves an index into the conceptual flattened list.
    fn entry_at(&self, index: u32) -> Option<BlockKind> {
        let mut remaining = index;
        for entry in &self.entries {
            if remaining < entry.weight {
                return Some(entry.block);
            }
            remaining -= entry.weight;
        }
        None
    }
}

/// Ore-substitution tables, keyed by palette identifier.
#[derive(Clone, Debug, Default)]
pub struct OreTable {
    /// One weighted ore list per palette id.
    tables: HashMap<String, WeightedPalette>,
}

impl OreTable {
    /// Builds an ore table from per-palette weighted lists.
    #[must_use]
    pub fn new(tables: HashMap<String, WeightedPalette>) -> Self {
        Self { tables }
    }

    /// Returns the ore list for a palette, if one is configured.
    #[must_use]
    pub fn for_palette(&self, palette_id: &str) -> Option<&WeightedPalette> {
        self.tables.get(palette_id)
    }
}
