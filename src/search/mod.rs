//! High-level matcher: preprocess, encode, vote and locate peaks.
//!
//! A [`Matcher`] owns its vote table behind an `Arc`. Reloading builds a new
//! table and swaps the pointer, bumping a generation counter; `reload` takes
//! `&mut self`, so no sweep can be running against the table it replaces.
//! Snapshots obtained through [`Matcher::table`] stay valid after a reload.

use std::sync::Arc;

use crate::encode::{encode_with_params, EncodeMode};
use crate::image::{ImageView, OwnedImage};
use crate::params::Parameters;
use crate::peak::{find_max, find_peaks, Peak};
use crate::table::{Membership, VoteTable};
use crate::trace::{trace_event, trace_span};
use crate::vote::{vote, SweepPolicy, VoteCell};

/// Matcher configuration.
#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// Boundary policy for the voting sweep.
    pub sweep: SweepPolicy,
    /// Use the row-parallel sweeps (requires the `rayon` feature).
    pub parallel: bool,
    /// Suppression radius for top-K results, in pixels.
    pub nms_radius: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            sweep: SweepPolicy::AllPixels,
            parallel: false,
            nms_radius: 8,
        }
    }
}

/// Match location with its raw and normalized vote count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    /// Column of the template center.
    pub x: usize,
    /// Row of the template center.
    pub y: usize,
    /// Accumulated votes at the location.
    pub votes: f64,
    /// `votes / total_votes` of the table.
    pub score: f64,
}

/// Template matcher built around one vote table.
pub struct Matcher {
    table: Arc<VoteTable>,
    generation: u64,
    cfg: MatchConfig,
}

impl Matcher {
    /// Creates a matcher from a built table.
    pub fn new(table: VoteTable) -> Self {
        Self {
            table: Arc::new(table),
            generation: 0,
            cfg: MatchConfig::default(),
        }
    }

    /// Builds the table from a template image and wraps it.
    pub fn from_template(
        template: ImageView<'_, u8>,
        params: &Parameters,
        mode: EncodeMode,
        membership: &Membership,
    ) -> Self {
        Self::new(VoteTable::from_template(template, params, mode, membership))
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Returns a shared snapshot of the current table.
    pub fn table(&self) -> Arc<VoteTable> {
        Arc::clone(&self.table)
    }

    /// Number of times the table has been replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Rebuilds the table from a template, discarding the previous one.
    pub fn reload(
        &mut self,
        template: ImageView<'_, u8>,
        params: &Parameters,
        mode: EncodeMode,
        membership: &Membership,
    ) {
        self.replace_table(VoteTable::from_template(template, params, mode, membership));
    }

    /// Swaps in an externally built table.
    pub fn replace_table(&mut self, table: VoteTable) {
        self.table = Arc::new(table);
        self.generation += 1;
        trace_event!(
            "table_reloaded",
            generation = self.generation,
            total_votes = self.table.total_votes()
        );
    }

    /// Preprocesses and encodes a live image the way the template was.
    pub fn encode(&self, image: ImageView<'_, u8>) -> OwnedImage<u8> {
        encode_with_params(image, self.table.parameters(), self.table.mode())
    }

    /// Runs the full pipeline up to the accumulator.
    pub fn accumulate<T: VoteCell>(&self, image: ImageView<'_, u8>) -> OwnedImage<T> {
        let encoded = self.encode(image);
        self.sweep(encoded.view())
    }

    /// Returns the strongest location, or `None` if nothing voted.
    pub fn match_image(&self, image: ImageView<'_, u8>) -> Option<Match> {
        let _span = trace_span!(
            "match_image",
            width = image.width(),
            height = image.height()
        )
        .entered();
        let acc = self.accumulate::<u32>(image);
        let best = self.best_match(&acc);
        if let Some(m) = best {
            trace_event!("peak_found", x = m.x, y = m.y, votes = m.votes);
        }
        best
    }

    /// Returns up to `k` separated local maxima, strongest first.
    pub fn match_image_topk(&self, image: ImageView<'_, u8>, k: usize) -> Vec<Match> {
        let _span = trace_span!("match_image_topk", k = k).entered();
        let acc = self.accumulate::<u32>(image);
        self.top_matches(&acc, k)
    }

    /// Strongest location of an accumulator produced by [`Matcher::accumulate`].
    pub fn best_match<T: VoteCell>(&self, acc: &OwnedImage<T>) -> Option<Match> {
        find_max(acc).map(|peak| self.to_match(peak))
    }

    /// Up to `k` separated local maxima of an accumulator, strongest first.
    ///
    /// Uses the configured NMS radius, like [`Matcher::match_image_topk`].
    pub fn top_matches<T: VoteCell>(&self, acc: &OwnedImage<T>, k: usize) -> Vec<Match> {
        find_peaks(acc, k, self.cfg.nms_radius)
            .into_iter()
            .map(|peak| self.to_match(peak))
            .collect()
    }

    fn sweep<T: VoteCell>(&self, encoded: ImageView<'_, u8>) -> OwnedImage<T> {
        #[cfg(feature = "rayon")]
        if self.cfg.parallel {
            return match self.cfg.sweep {
                SweepPolicy::Bounded => crate::vote::rayon::vote_bounded_par(encoded, &self.table),
                SweepPolicy::AllPixels => {
                    crate::vote::rayon::vote_all_pixels_par(encoded, &self.table)
                }
            };
        }
        vote(encoded, &self.table, self.cfg.sweep)
    }

    fn to_match(&self, peak: Peak) -> Match {
        Match {
            x: peak.x,
            y: peak.y,
            votes: peak.votes,
            score: self.table.normalize(peak.votes),
        }
    }
}
