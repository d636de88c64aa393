//! The fixed bubble palette
//!
//! Colors compare by variant; the index is only a stable identity for
//! logging and serialization.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One of the five bubble colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BubbleColor {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
}

/// Palette in index order
pub const PALETTE: [BubbleColor; 5] = [
    BubbleColor::Red,
    BubbleColor::Green,
    BubbleColor::Blue,
    BubbleColor::Yellow,
    BubbleColor::Magenta,
];

impl BubbleColor {
    /// Stable palette index (0-4)
    pub fn index(self) -> usize {
        match self {
            BubbleColor::Red => 0,
            BubbleColor::Green => 1,
            BubbleColor::Blue => 2,
            BubbleColor::Yellow => 3,
            BubbleColor::Magenta => 4,
        }
    }

    pub fn try_from_index(index: usize) -> Option<Self> {
        PALETTE.get(index).copied()
    }

    /// Look up a palette entry by index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the palette. The palette is closed, so an
    /// out-of-range index is a bug in the caller.
    pub fn from_index(index: usize) -> Self {
        match Self::try_from_index(index) {
            Some(color) => color,
            None => panic!(
                "palette index {index} out of range (palette has {} colors)",
                PALETTE.len()
            ),
        }
    }

    /// CSS hex string used by the canvas renderer
    pub fn hex(self) -> &'static str {
        match self {
            BubbleColor::Red => "#ff0000",
            BubbleColor::Green => "#00ff00",
            BubbleColor::Blue => "#0000ff",
            BubbleColor::Yellow => "#ffff00",
            BubbleColor::Magenta => "#ff00ff",
        }
    }

    /// Uniformly random palette entry
    pub fn random(rng: &mut impl Rng) -> Self {
        PALETTE[rng.random_range(0..PALETTE.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_index_round_trips_through_palette() {
        for (i, color) in PALETTE.iter().enumerate() {
            assert_eq!(color.index(), i);
            assert_eq!(BubbleColor::from_index(i), *color);
        }
    }

    #[test]
    fn test_try_from_index_rejects_out_of_range() {
        assert_eq!(BubbleColor::try_from_index(5), None);
        assert_eq!(BubbleColor::try_from_index(usize::MAX), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_from_index_panics_out_of_range() {
        BubbleColor::from_index(7);
    }

    #[test]
    fn test_random_covers_whole_palette() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[BubbleColor::random(&mut rng).index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
