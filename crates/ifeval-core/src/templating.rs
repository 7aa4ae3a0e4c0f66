//! Seeded selection among paraphrased instruction templates.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Placeholder substituted by [`render`].
pub const INSTRUCTION_SLOT: &str = "{instruction}";

/// Picks one candidate instruction string per call.
///
/// The generator is seeded once at construction; pickers built with the same
/// seed yield the same sequence of selections for the same candidate lists.
#[derive(Debug)]
pub struct TemplatePicker {
    seed: Option<u64>,
    rng: Mutex<StdRng>,
}

impl TemplatePicker {
    /// `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            seed,
            rng: Mutex::new(rng),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Choose one of `candidates`.
    ///
    /// # Panics
    ///
    /// Panics if `candidates` is empty; template tables are compiled in and
    /// always hold at least one entry.
    pub fn pick<'a>(&self, candidates: &[&'a str]) -> &'a str {
        assert!(
            !candidates.is_empty(),
            "template picker needs at least one candidate"
        );
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        candidates[rng.gen_range(0..candidates.len())]
    }
}

/// Substitute `inner` into every [`INSTRUCTION_SLOT`] of `template`.
pub fn render(template: &str, inner: &str) -> String {
    template.replace(INSTRUCTION_SLOT, inner)
}
