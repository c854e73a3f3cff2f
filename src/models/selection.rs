//! Policies for picking the next card to review.
//!
//! The deck is kept sorted by ascending confidence, so every policy works on
//! indices into that order:
//! - Random: uniform over all cards
//! - ConfidenceWeighted: |a - b| for two uniform draws, which piles probability
//!   onto the low indices (least known cards). Index 0 gets less weight than a
//!   true geometric bias would give it.
//! - StrictOrdered: always the least known card

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardSelection {
    Random,
    ConfidenceWeighted,
    StrictOrdered,
}

impl CardSelection {
    /// Picks an index into a deck of `len` cards. Returns None for an empty deck.
    pub fn pick_index<R: Rng + ?Sized>(self, len: usize, rng: &mut R) -> Option<usize> {
        if len == 0 {
            return None;
        }

        let index = match self {
            CardSelection::Random => rng.gen_range(0..len),
            CardSelection::ConfidenceWeighted => {
                let a = rng.gen_range(0..len);
                let b = rng.gen_range(0..len);
                a.abs_diff(b)
            }
            CardSelection::StrictOrdered => 0,
        };
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_empty_deck_has_no_index() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(CardSelection::Random.pick_index(0, &mut rng), None);
        assert_eq!(CardSelection::ConfidenceWeighted.pick_index(0, &mut rng), None);
        assert_eq!(CardSelection::StrictOrdered.pick_index(0, &mut rng), None);
    }

    #[test]
    fn test_indices_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let i = CardSelection::ConfidenceWeighted.pick_index(5, &mut rng).unwrap();
            assert!(i < 5);
            let j = CardSelection::Random.pick_index(5, &mut rng).unwrap();
            assert!(j < 5);
        }
    }

    #[test]
    fn test_weighted_prefers_low_indices() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 10];
        for _ in 0..20_000 {
            let i = CardSelection::ConfidenceWeighted.pick_index(10, &mut rng).unwrap();
            counts[i] += 1;
        }

        // P(1) > P(5) > P(9) for |a - b|
        assert!(counts[1] > counts[5]);
        assert!(counts[5] > counts[9]);
        assert!(counts[0] + counts[1] + counts[2] > counts[7] + counts[8] + counts[9]);
    }

    #[test]
    fn test_strict_ordered_always_first() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            assert_eq!(CardSelection::StrictOrdered.pick_index(4, &mut rng), Some(0));
        }
    }
}
