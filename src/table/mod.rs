//! Generalized Hough vote tables.
//!
//! A [`VoteTable`] maps each of the 256 possible codes to the offsets, with
//! vote weights, at which that code was observed relative to the template
//! center. Entries live in one flattened arena indexed by per-code
//! `(start, len)` pairs, so a rebuild is a single allocation and a sweep never
//! touches per-slot heap structures.

mod build;
pub mod set;

use crate::encode::EncodeMode;
use crate::params::Parameters;
use crate::util::{BghError, BghResult};

pub use set::{Membership, MembershipSet, N8_4ADJ, N8_4OR5, N8_5ADJ};

/// Signed displacement from a voting pixel to the cell it votes for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Offset {
    /// Column displacement.
    pub dx: i32,
    /// Row displacement.
    pub dy: i32,
}

impl Offset {
    /// Creates an offset.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// One weighted offset in a code slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vote {
    /// Displacement from the voting pixel to the target cell.
    pub offset: Offset,
    /// Number of template pixels that mapped to this offset.
    pub weight: u32,
}

/// Bounding box of all offsets in a table (inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reach {
    /// Smallest column displacement.
    pub min_dx: i32,
    /// Largest column displacement.
    pub max_dx: i32,
    /// Smallest row displacement.
    pub min_dy: i32,
    /// Largest row displacement.
    pub max_dy: i32,
}

impl Reach {
    const EMPTY: Reach = Reach {
        min_dx: 0,
        max_dx: 0,
        min_dy: 0,
        max_dy: 0,
    };
}

/// Code-indexed table of weighted offsets built from a template.
#[derive(Clone, Debug)]
pub struct VoteTable {
    size: (usize, usize),
    parameters: Parameters,
    mode: EncodeMode,
    total_votes: u64,
    total_entries: usize,
    reach: Reach,
    entries: Vec<Vote>,
    slots: [(u32, u32); 256],
}

impl VoteTable {
    /// Assembles a table from `(code, vote)` pairs.
    ///
    /// Pairs that repeat a `(code, offset)` are merged by summing weights.
    /// `size` is `(width, height)` of the encoded template; it bounds the
    /// region swept by the bounded voting policy.
    pub fn from_votes<I>(
        size: (usize, usize),
        parameters: Parameters,
        mode: EncodeMode,
        votes: I,
    ) -> BghResult<Self>
    where
        I: IntoIterator<Item = (u8, Vote)>,
    {
        let mut acc = build::SlotAccumulator::new();
        for (code, vote) in votes {
            if vote.weight == 0 {
                return Err(BghError::ZeroWeight { code });
            }
            acc.add(code, vote.offset, vote.weight);
        }
        Ok(acc.finish(size, parameters, mode))
    }

    /// Width and height of the encoded template.
    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    /// Parameters the table was built with.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Encoding the table expects live images to use.
    pub fn mode(&self) -> EncodeMode {
        self.mode
    }

    /// Sum of all vote weights; the best possible accumulator value.
    pub fn total_votes(&self) -> u64 {
        self.total_votes
    }

    /// Number of distinct `(code, offset)` pairs.
    pub fn total_entries(&self) -> usize {
        self.total_entries
    }

    /// Bounding box of all offsets.
    pub fn reach(&self) -> Reach {
        self.reach
    }

    /// Weighted offsets recorded for `code` (possibly empty).
    #[inline]
    pub fn votes(&self, code: u8) -> &[Vote] {
        let (start, len) = self.slots[code as usize];
        &self.entries[start as usize..(start + len) as usize]
    }

    /// Codes with at least one entry, ascending.
    pub fn populated_codes(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=255u8).filter(move |&code| self.slots[code as usize].1 > 0)
    }

    /// Returns true if no code has entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts a raw accumulator value to a `[0, 1]`-like score.
    pub fn normalize(&self, votes: f64) -> f64 {
        if self.total_votes == 0 {
            0.0
        } else {
            votes / self.total_votes as f64
        }
    }
}
