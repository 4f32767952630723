//! # Generation Coordinator
//!
//! Drives one asteroid generation request end to end: partition the search
//! region, dispatch one unit of work per admitted section to a worker pool,
//! then block at a join-all barrier and aggregate the finished sections.
//!
//! The barrier is fail-soft: a unit that panics is logged and dropped from
//! the result - its chunk simply omits that section - and is never retried.
//! One unlucky section must not blank an entire asteroid.

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;

use crossbeam_channel::unbounded;
use kuiper_core::{ChunkKey, GenerationError, GenerationSeed, GeneratorConfig, SectionPos};

use crate::asteroid::AsteroidDescriptor;
use crate::partition::covered_sections;
use crate::voxelizer::{CompletedSection, SectionVoxelizer};

/// Finished sections of one asteroid, grouped by chunk.
///
/// Only sections holding at least one non-air voxel appear; chunks whose
/// admitted sections all came out empty (or were dropped) are absent.
#[derive(Debug, Default)]
pub struct GenerationResult {
    /// Completed sections per chunk, ascending by section index.
    chunks: BTreeMap<ChunkKey, Vec<CompletedSection>>,
}

impl GenerationResult {
    /// The completed sections, grouped by chunk key.
    #[must_use]
    pub const fn chunks(&self) -> &BTreeMap<ChunkKey, Vec<CompletedSection>> {
        &self.chunks
    }

    /// The completed sections of one chunk, if any survived.
    #[must_use]
    pub fn sections_for(&self, chunk: ChunkKey) -> Option<&[CompletedSection]> {
        self.chunks.get(&chunk).map(Vec::as_slice)
    }

    /// Total number of completed sections across all chunks.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.chunks.values().map(Vec::len).sum()
    }

    /// Returns true if no section produced any matter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Orchestrates concurrent section generation for asteroid requests.
pub struct GenerationCoordinator<'cfg> {
    /// Validated configuration, shared read-only with every unit of work.
    config: &'cfg GeneratorConfig,
    /// Request-level seed all random streams derive from.
    seed: GenerationSeed,
    /// Worker threads used per request.
    workers: usize,
    /// Section whose unit is forced to panic, to exercise the fail-soft path.
    #[cfg(test)]
    panic_on: Option<SectionPos>,
}

impl<'cfg> GenerationCoordinator<'cfg> {
    /// Creates a coordinator sized to the machine's parallelism.
    #[must_use]
    pub fn new(config: &'cfg GeneratorConfig, seed: GenerationSeed) -> Self {
        let workers = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
        Self {
            config,
            seed,
            workers,
            #[cfg(test)]
            panic_on: None,
        }
    }

    /// Overrides the worker count (at least 1).
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = if workers == 0 { 1 } else { workers };
        self
    }

    /// Forces the unit generating one section to panic.
    #[cfg(test)]
    const fn with_panic_on(mut self, pos: SectionPos) -> Self {
        self.panic_on = Some(pos);
        self
    }

    /// Generates every covered section of one asteroid.
    ///
    /// Does not return until all spawned units have either completed or been
    /// dropped. Section content is deterministic in the seed and descriptor;
    /// only internal completion order varies between runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor's palette has no ore table entry,
    /// which means the descriptor and configuration are mismatched. All
    /// per-section failures are contained and never surface here.
    pub fn generate(
        &self,
        asteroid: &AsteroidDescriptor<'cfg>,
    ) -> Result<GenerationResult, GenerationError> {
        // Resolved before any unit is spawned; the config validator
        // guarantees an entry (possibly empty) for every known palette
        let ores = self
            .config
            .ores()
            .for_palette(asteroid.palette_id)
            .ok_or_else(|| GenerationError::UnknownPalette(asteroid.palette_id.to_owned()))?;
        let ores = (!ores.is_empty()).then_some(ores);

        let covered = covered_sections(asteroid, self.config);
        let dispatched: usize = covered.values().map(Vec::len).sum();
        tracing::debug!(
            chunks = covered.len(),
            sections = dispatched,
            size = asteroid.size,
            "partitioned asteroid"
        );

        let (job_tx, job_rx) = unbounded::<SectionPos>();
        let (result_tx, result_rx) = unbounded::<(ChunkKey, CompletedSection)>();

        for (&chunk, section_ys) in &covered {
            for &section_y in section_ys {
                // The receiver outlives every send; a failure here is unreachable
                let _ = job_tx.send(SectionPos::new(chunk, section_y));
            }
        }
        drop(job_tx);

        let seed = self.seed;
        let worker_count = self.workers.min(dispatched.max(1));
        #[cfg(test)]
        let panic_on = self.panic_on;

        std::thread::scope(|scope| {
            for _ in 0..worker_count {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();

                scope.spawn(move || {
                    for pos in job_rx.iter() {
                        let unit = || {
                            #[cfg(test)]
                            if Some(pos) == panic_on {
                                panic!("injected section failure");
                            }
                            SectionVoxelizer::new(asteroid, ores, seed, pos).voxelize()
                        };

                        if let Some(section) = run_unit(unit) {
                            let _ = result_tx.send((pos.chunk, section));
                        } else {
                            tracing::warn!(
                                chunk_x = pos.chunk.x,
                                chunk_z = pos.chunk.z,
                                section_y = pos.section_y,
                                "section unit panicked; dropping section"
                            );
                        }
                    }
                });
            }
        });
        drop(result_tx);

        // Join-all barrier: the scope has joined every worker, so the
        // channel holds the complete set of surviving sections
        let mut completed = 0usize;
        let mut chunks: BTreeMap<ChunkKey, Vec<CompletedSection>> = BTreeMap::new();
        for (chunk, section) in result_rx.iter() {
            completed += 1;
            if section.has_matter() {
                chunks.entry(chunk).or_default().push(section);
            }
        }

        // Completion order across workers is arbitrary
        for sections in chunks.values_mut() {
            sections.sort_unstable_by_key(CompletedSection::section_y);
        }

        tracing::info!(
            dispatched,
            completed,
            dropped = dispatched - completed,
            emitted = chunks.values().map(Vec::len).sum::<usize>(),
            "asteroid generation finished"
        );

        Ok(GenerationResult { chunks })
    }
}

/// Runs one unit of work, containing any panic it raises.
fn run_unit<F: FnOnce() -> CompletedSection>(unit: F) -> Option<CompletedSection> {
    std::panic::catch_unwind(AssertUnwindSafe(unit)).ok()
}
