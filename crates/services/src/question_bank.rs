use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use trivia_core::model::Question;

//
// ─── RANDOMNESS ────────────────────────────────────────────────────────────────
//

/// Source of permutations for question and choice ordering.
///
/// Implementations reorder `indices` in place; they must not add or drop entries.
pub trait Shuffler: Send {
    fn shuffle_indices(&mut self, indices: &mut [usize]);
}

/// Uniform shuffles from a `StdRng`.
#[derive(Debug, Clone)]
pub struct RandomShuffler {
    rng: StdRng,
}

impl RandomShuffler {
    /// Seeds from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible shuffles for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Shuffler for RandomShuffler {
    fn shuffle_indices(&mut self, indices: &mut [usize]) {
        indices.shuffle(&mut self.rng);
    }
}

/// Leaves the order untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn shuffle_indices(&mut self, _indices: &mut [usize]) {}
}

/// Reverses the order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReverseShuffler;

impl Shuffler for ReverseShuffler {
    fn shuffle_indices(&mut self, indices: &mut [usize]) {
        indices.reverse();
    }
}

fn permutation(len: usize, shuffler: &mut dyn Shuffler) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    shuffler.shuffle_indices(&mut indices);

    let mut seen = vec![false; len];
    let valid = indices.len() == len
        && indices
            .iter()
            .all(|&i| i < len && !std::mem::replace(&mut seen[i], true));
    if valid {
        indices
    } else {
        tracing::warn!(len, "shuffler produced an invalid permutation; keeping source order");
        (0..len).collect()
    }
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

/// The fixed catalog a game draws from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    catalog: Vec<Question>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(catalog: Vec<Question>) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &[Question] {
        &self.catalog
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Returns the whole catalog in shuffled order.
    #[must_use]
    pub fn shuffled_questions(&self, shuffler: &mut dyn Shuffler) -> Vec<Question> {
        permutation(self.catalog.len(), shuffler)
            .into_iter()
            .map(|i| self.catalog[i].clone())
            .collect()
    }

    /// Returns the question's choice labels in shuffled presentation order.
    #[must_use]
    pub fn shuffled_choices(question: &Question, shuffler: &mut dyn Shuffler) -> Vec<String> {
        let choices = question.choices();
        permutation(choices.len(), shuffler)
            .into_iter()
            .map(|i| choices[i].clone())
            .collect()
    }
}
