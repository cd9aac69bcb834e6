//! 256-slot membership set over encoded byte values.

/// Admit codes with exactly 4 contiguous set bits (usually the best choice).
pub const N8_4ADJ: u8 = 1 << 3;
/// Admit codes with exactly 5 contiguous set bits.
pub const N8_5ADJ: u8 = 1 << 4;
/// Admit codes with 4 or 5 contiguous set bits.
pub const N8_4OR5: u8 = 3 << 3;

/// Fixed-size bit set over the byte values 0..=255.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MembershipSet {
    bits: [u64; 4],
}

impl MembershipSet {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self { bits: [0; 4] }
    }

    /// Builds the set of circular runs selected by `mask`.
    ///
    /// Bit `i` of `mask` admits every rotation of a run of `i + 1`
    /// contiguous set bits, read circularly over the 8 neighbor bits.
    pub fn adjacent_bits(mask: u8) -> Self {
        let mut set = Self::new();
        for i in 0..8u32 {
            if mask & (1 << i) == 0 {
                continue;
            }
            let run = ((1u16 << (i + 1)) - 1) as u8;
            for j in 0..8 {
                set.insert(run.rotate_left(j));
            }
        }
        set
    }

    /// Every code except 0, which marks masked-out pixels.
    pub fn all_nonzero() -> Self {
        let mut set = Self {
            bits: [u64::MAX; 4],
        };
        set.remove(0);
        set
    }

    /// Adds `code` to the set.
    #[inline]
    pub fn insert(&mut self, code: u8) {
        self.bits[(code >> 6) as usize] |= 1u64 << (code & 0x3F);
    }

    /// Removes `code` from the set.
    #[inline]
    pub fn remove(&mut self, code: u8) {
        self.bits[(code >> 6) as usize] &= !(1u64 << (code & 0x3F));
    }

    /// Returns true if `code` is a member.
    #[inline]
    pub fn contains(&self, code: u8) -> bool {
        self.bits[(code >> 6) as usize] & (1u64 << (code & 0x3F)) != 0
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no code is a member.
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// Iterates members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=255u8).filter(move |&code| self.contains(code))
    }
}

impl FromIterator<u8> for MembershipSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::new();
        for code in iter {
            set.insert(code);
        }
        set
    }
}

/// How the codes that contribute votes are selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Membership {
    /// Circular adjacent-bit runs selected by a run-length mask.
    AdjacentBits(u8),
    /// Every nonzero code (orientation encoding).
    AllNonzero,
    /// An explicit set.
    Custom(MembershipSet),
}

impl Membership {
    /// Materializes the selection as a set.
    pub fn to_set(&self) -> MembershipSet {
        match *self {
            Membership::AdjacentBits(mask) => MembershipSet::adjacent_bits(mask),
            Membership::AllNonzero => MembershipSet::all_nonzero(),
            Membership::Custom(set) => set,
        }
    }
}
