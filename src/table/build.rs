//! Two-phase table construction: per-code hash maps while scanning, then a
//! single conversion into the fixed slot layout.

use std::collections::HashMap;

use crate::encode::{encode_with_params, EncodeMode};
use crate::image::ImageView;
use crate::params::Parameters;
use crate::table::set::{Membership, MembershipSet};
use crate::table::{Offset, Reach, Vote, VoteTable};
use crate::trace::{trace_event, trace_span};

pub(crate) struct SlotAccumulator {
    maps: Vec<HashMap<Offset, u32>>,
}

impl SlotAccumulator {
    pub(crate) fn new() -> Self {
        Self {
            maps: (0..256).map(|_| HashMap::new()).collect(),
        }
    }

    #[inline]
    pub(crate) fn add(&mut self, code: u8, offset: Offset, weight: u32) {
        let slot = self.maps[code as usize].entry(offset).or_insert(0);
        *slot = slot.saturating_add(weight);
    }

    pub(crate) fn finish(
        self,
        size: (usize, usize),
        parameters: Parameters,
        mode: EncodeMode,
    ) -> VoteTable {
        let total_entries: usize = self.maps.iter().map(HashMap::len).sum();
        let mut entries = Vec::with_capacity(total_entries);
        let mut slots = [(0u32, 0u32); 256];
        let mut total_votes = 0u64;
        let mut reach: Option<Reach> = None;

        for (code, map) in self.maps.into_iter().enumerate() {
            let start = entries.len();
            let mut slot: Vec<Vote> = map
                .into_iter()
                .map(|(offset, weight)| Vote { offset, weight })
                .collect();
            // order inside a slot does not affect voting; sorting keeps tables comparable
            slot.sort_unstable_by_key(|v| v.offset);
            for vote in &slot {
                total_votes += u64::from(vote.weight);
                let o = vote.offset;
                reach = Some(match reach {
                    None => Reach {
                        min_dx: o.dx,
                        max_dx: o.dx,
                        min_dy: o.dy,
                        max_dy: o.dy,
                    },
                    Some(r) => Reach {
                        min_dx: r.min_dx.min(o.dx),
                        max_dx: r.max_dx.max(o.dx),
                        min_dy: r.min_dy.min(o.dy),
                        max_dy: r.max_dy.max(o.dy),
                    },
                });
            }
            entries.extend(slot);
            slots[code] = (start as u32, (entries.len() - start) as u32);
        }

        VoteTable {
            size,
            parameters,
            mode,
            total_votes,
            total_entries,
            reach: reach.unwrap_or(Reach::EMPTY),
            entries,
            slots,
        }
    }
}

impl VoteTable {
    /// Builds a table from an already encoded template.
    ///
    /// Every pixel whose code is in `members` casts one vote for the offset
    /// from itself to the image center `(width / 2, height / 2)`, scaled by
    /// the clamped `params.scale()` and truncated toward zero. Votes that land
    /// on the same scaled offset for the same code merge into one weighted
    /// entry.
    pub fn build(
        encoded: ImageView<'_, u8>,
        members: &MembershipSet,
        params: &Parameters,
        mode: EncodeMode,
    ) -> Self {
        let width = encoded.width();
        let height = encoded.height();
        let _span =
            trace_span!("build_vote_table", width = width, height = height, mode = ?mode).entered();

        let center_x = (width / 2) as i64;
        let center_y = (height / 2) as i64;
        let scale = params.scale();

        let mut acc = SlotAccumulator::new();
        for y in 0..height {
            let Some(row) = encoded.row(y) else {
                continue;
            };
            for (x, &code) in row.iter().enumerate() {
                if !members.contains(code) {
                    continue;
                }
                let dx = ((center_x - x as i64) as f64 * scale) as i32;
                let dy = ((center_y - y as i64) as f64 * scale) as i32;
                acc.add(code, Offset::new(dx, dy), 1);
            }
        }

        let table = acc.finish((width, height), *params, mode);
        trace_event!(
            "vote_table_built",
            total_votes = table.total_votes(),
            total_entries = table.total_entries(),
            codes = table.populated_codes().count()
        );
        table
    }

    /// Pre-blurs, encodes and tabulates a template image.
    pub fn from_template(
        template: ImageView<'_, u8>,
        params: &Parameters,
        mode: EncodeMode,
        membership: &Membership,
    ) -> Self {
        let encoded = encode_with_params(template, params, mode);
        Self::build(encoded.view(), &membership.to_set(), params, mode)
    }
}
