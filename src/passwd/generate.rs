//! Random password generation under character-class constraints

use rand::seq::{IndexedRandom, SliceRandom};
use rand::{CryptoRng, Rng};

use super::class::CharClassSet;
use super::error::PasswordError;

/// Default password length when none is configured
pub const DEFAULT_LENGTH: usize = 16;

/// Rejected draws tolerated before constructing the password directly
const MAX_ATTEMPTS: usize = 64;

/// Validated request for one or more passwords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordSpec {
    length: usize,
    classes: CharClassSet,
    count: usize,
}

impl PasswordSpec {
    /// Validate a request. An empty class set selects every class.
    pub fn new(length: usize, classes: CharClassSet, count: usize) -> Result<Self, PasswordError> {
        let classes = classes.or_all();
        if length == 0 {
            return Err(PasswordError::InvalidConfig(
                "password length must be at least 1".to_string(),
            ));
        }
        if count == 0 {
            return Err(PasswordError::InvalidConfig(
                "password count must be at least 1".to_string(),
            ));
        }
        if length < classes.len() {
            return Err(PasswordError::LengthTooShort {
                length,
                classes: classes.len(),
            });
        }
        Ok(Self {
            length,
            classes,
            count,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn classes(&self) -> CharClassSet {
        self.classes
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Upper bound on entropy per password, ignoring the composition rule
    pub fn entropy_bits(&self) -> f64 {
        super::entropy_bits(self.classes.union_alphabet().len(), self.length)
    }
}

/// Generate a single password satisfying `spec`.
///
/// Characters are drawn uniformly from the union of the required classes.
/// Draws missing a class are rejected; after `MAX_ATTEMPTS` rejections one
/// character per class is placed explicitly and the result shuffled.
pub fn generate_password<R>(spec: &PasswordSpec, rng: &mut R) -> String
where
    R: Rng + CryptoRng + ?Sized,
{
    let alphabet = spec.classes.union_alphabet();

    for attempt in 1..=MAX_ATTEMPTS {
        let candidate: String = (0..spec.length)
            .filter_map(|_| alphabet.choose(rng).copied())
            .collect();
        if spec.classes.is_satisfied_by(&candidate) {
            if attempt > 1 {
                tracing::debug!(attempt, "Password accepted after rejected draws");
            }
            return candidate;
        }
    }

    tracing::debug!(
        attempts = MAX_ATTEMPTS,
        "Falling back to constructed password"
    );
    construct(spec, &alphabet, rng)
}

/// Generate `spec.count()` passwords
pub fn generate_passwords<R>(spec: &PasswordSpec, rng: &mut R) -> Vec<String>
where
    R: Rng + CryptoRng + ?Sized,
{
    (0..spec.count)
        .map(|_| generate_password(spec, rng))
        .collect()
}

fn construct<R>(spec: &PasswordSpec, alphabet: &[char], rng: &mut R) -> String
where
    R: Rng + CryptoRng + ?Sized,
{
    let mut chars: Vec<char> = spec
        .classes
        .iter()
        .filter_map(|class| {
            let pool: Vec<char> = class.alphabet().chars().collect();
            pool.choose(rng).copied()
        })
        .collect();
    while chars.len() < spec.length {
        if let Some(c) = alphabet.choose(rng) {
            chars.push(*c);
        }
    }
    chars.shuffle(rng);
    chars.into_iter().collect()
}
