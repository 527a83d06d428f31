//! Product category generation.

use rand::{Rng, seq::SliceRandom};

use super::text;

const DEFAULT_PARENT_PROBABILITY: f64 = 0.5;

/// Generated category ready for database insertion. The key is assigned by
/// the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCategory {
    pub name: String,
    pub parent_category_id: Option<i32>,
}

/// Generates categories that may hang below previously inserted ones.
pub struct CategoryGenerator {
    parent_probability: f64,
}

impl CategoryGenerator {
    /// Half of all categories get a parent.
    pub fn new() -> Self {
        Self {
            parent_probability: DEFAULT_PARENT_PROBABILITY,
        }
    }

    /// Overrides the probability that a category gets a parent.
    ///
    /// Values outside `0.0..=1.0` are clamped; NaN keeps the default.
    pub fn with_parent_probability(probability: f64) -> Self {
        let parent_probability = if probability.is_nan() {
            DEFAULT_PARENT_PROBABILITY
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { parent_probability }
    }

    /// Generates a category whose parent, if any, is one of `existing`.
    ///
    /// Without existing categories the parent is always `None`.
    pub fn generate(&self, existing: &[i32], rng: &mut impl Rng) -> GeneratedCategory {
        let parent_category_id = if rng.gen_bool(self.parent_probability) {
            existing.choose(rng).copied()
        } else {
            None
        };

        GeneratedCategory {
            name: text::capitalized_word(rng),
            parent_category_id,
        }
    }
}

impl Default for CategoryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_first_category_has_no_parent() {
        let category_gen = CategoryGenerator::with_parent_probability(1.0);
        let mut rng = StdRng::seed_from_u64(1);
        let category = category_gen.generate(&[], &mut rng);
        assert!(category.parent_category_id.is_none());
        assert!(!category.name.is_empty());
    }

    #[test]
    fn test_parent_drawn_from_existing() {
        let category_gen = CategoryGenerator::with_parent_probability(1.0);
        let mut rng = StdRng::seed_from_u64(2);
        let existing = [3, 5, 8];

        for _ in 0..100 {
            let parent = category_gen
                .generate(&existing, &mut rng)
                .parent_category_id
                .unwrap();
            assert!(existing.contains(&parent));
        }
    }

    #[test]
    fn test_about_half_have_parents() {
        let category_gen = CategoryGenerator::new();
        let mut rng = StdRng::seed_from_u64(3);
        let existing = [1, 2, 3];

        let with_parent = (0..2_000)
            .filter(|_| {
                category_gen
                    .generate(&existing, &mut rng)
                    .parent_category_id
                    .is_some()
            })
            .count();
        assert!(
            (800..=1_200).contains(&with_parent),
            "{with_parent} of 2000 had parents"
        );
    }

    #[test]
    fn test_out_of_range_probabilities_do_not_panic() {
        let mut rng = StdRng::seed_from_u64(4);
        let existing = [1];

        for probability in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.5, 2.0] {
            let category_gen = CategoryGenerator::with_parent_probability(probability);
            let category = category_gen.generate(&existing, &mut rng);
            assert!(!category.name.is_empty());
        }

        let never = CategoryGenerator::with_parent_probability(f64::NEG_INFINITY);
        assert!((0..50).all(|_| never.generate(&existing, &mut rng).parent_category_id.is_none()));
        let always = CategoryGenerator::with_parent_probability(f64::INFINITY);
        assert!((0..50).all(|_| always.generate(&existing, &mut rng).parent_category_id.is_some()));
    }
}
