//! Localization ID generation
//!
//! IDs are `<file>_<knot>_<stitch>_<suffix>` where the suffix is four
//! characters drawn from `A-Z0-9`. The generator owns the run's registry of
//! used IDs and its random source, so a fixed seed gives reproducible IDs.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

/// Symbols a generated suffix is drawn from
pub const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the random suffix
pub const ID_SUFFIX_LEN: usize = 4;

/// Candidates tried per ID before giving up
pub const MAX_ATTEMPTS: usize = 100;

/// Build the ID prefix for a span: file ID, then each scope name, each
/// followed by `_`.
pub fn make_prefix(file_id: &str, scopes: &[String]) -> String {
    let mut prefix = format!("{file_id}_");
    for scope in scopes {
        prefix.push_str(scope);
        prefix.push('_');
    }
    prefix
}

/// Run-scoped ID generator and used-ID registry
#[derive(Debug, Clone)]
pub struct IdGenerator {
    used: HashSet<String>,
    rng: StdRng,
    suffix_len: usize,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Generator with an entropy-seeded random source
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Generator with a fixed seed, for reproducible runs
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Fixed seed when given, entropy otherwise
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::with_seed)
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            used: HashSet::new(),
            rng,
            suffix_len: ID_SUFFIX_LEN,
        }
    }

    /// Override the suffix length
    #[must_use]
    pub fn with_suffix_len(mut self, suffix_len: usize) -> Self {
        self.suffix_len = suffix_len;
        self
    }

    /// Register IDs that are already in use
    pub fn seed_existing<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.used.extend(ids.into_iter().map(Into::into));
    }

    /// Whether an ID is already registered
    #[must_use]
    pub fn is_used(&self, id: &str) -> bool {
        self.used.contains(id)
    }

    /// Number of registered IDs
    #[must_use]
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Generate an ID under `prefix` that is not yet registered, and register it
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdExhausted`] if [`MAX_ATTEMPTS`] candidates all collide.
    pub fn generate_unique(&mut self, prefix: &str) -> Result<String> {
        for _ in 0..MAX_ATTEMPTS {
            let candidate = format!("{prefix}{}", self.random_suffix());
            // insert doubles as the uniqueness check
            if self.used.insert(candidate.clone()) {
                return Ok(candidate);
            }
            tracing::debug!("ID collision on {}", candidate);
        }

        Err(Error::IdExhausted {
            prefix: prefix.to_string(),
            attempts: MAX_ATTEMPTS,
        })
    }

    fn random_suffix(&mut self) -> String {
        (0..self.suffix_len)
            .map(|_| char::from(ID_ALPHABET[self.rng.gen_range(0..ID_ALPHABET.len())]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_suffix_char(c: char) -> bool {
        c.is_ascii_uppercase() || c.is_ascii_digit()
    }

    #[test]
    fn test_prefix_from_scopes() {
        let scopes = vec!["Start".to_string(), "Intro".to_string()];
        assert_eq!(make_prefix("chapter1", &scopes), "chapter1_Start_Intro_");
        assert_eq!(make_prefix("chapter1", &[]), "chapter1_");
    }

    #[test]
    fn test_generated_shape() {
        let mut generator = IdGenerator::with_seed(7);
        let id = generator.generate_unique("myfile_").expect("id");
        let suffix = id.strip_prefix("myfile_").expect("prefix");
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
        assert!(suffix.chars().all(is_suffix_char));
        assert!(generator.is_used(&id));
    }

    #[test]
    fn test_ids_are_unique_under_one_prefix() {
        let mut generator = IdGenerator::with_seed(42);
        let ids: HashSet<String> = (0..2000)
            .map(|_| generator.generate_unique("story_Start_").expect("id"))
            .collect();
        assert_eq!(ids.len(), 2000);
        assert_eq!(generator.used_count(), 2000);
    }

    #[test]
    fn test_same_seed_same_ids() {
        let mut a = IdGenerator::with_seed(99);
        let mut b = IdGenerator::with_seed(99);
        for _ in 0..10 {
            assert_eq!(
                a.generate_unique("f_").expect("id"),
                b.generate_unique("f_").expect("id")
            );
        }
    }

    #[test]
    fn test_existing_ids_are_avoided() {
        let mut generator = IdGenerator::with_seed(3).with_suffix_len(1);
        let taken: Vec<String> = ID_ALPHABET[..30]
            .iter()
            .map(|&b| format!("f_{}", char::from(b)))
            .collect();
        generator.seed_existing(taken.clone());

        let id = generator.generate_unique("f_").expect("id");
        assert!(!taken.contains(&id));
        assert_eq!(generator.used_count(), 31);
    }

    #[test]
    fn test_exhausted_prefix() {
        let mut generator = IdGenerator::with_seed(5).with_suffix_len(1);
        generator.seed_existing(ID_ALPHABET.iter().map(|&b| format!("f_{}", char::from(b))));

        let err = generator.generate_unique("f_").unwrap_err();
        assert!(matches!(err, Error::IdExhausted { attempts: MAX_ATTEMPTS, .. }));
    }
}
