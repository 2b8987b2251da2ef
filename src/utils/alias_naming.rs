//! Alias token generation for relation hops.
//!
//! Every relation hop in a compilation run gets a short token that stands in
//! for its dotted path in join and projection output. Tokens come from an
//! [`AliasPool`], which is created fresh for each run and guarantees that no
//! token is issued twice and that reserved names (the root alias) are never
//! handed out. SQL identifiers are case-insensitive, so names are compared
//! ignoring ASCII case: reserving `R1` takes `r1` as well.
//!
//! ## Strategies
//! - [`CounterAliasGenerator`]: `{prefix}{n}` with `n` starting at 1.
//!   Deterministic, so two runs over the same input produce identical plans.
//! - [`RandomAliasGenerator`]: fixed-length lowercase alphanumeric tokens drawn
//!   from a v4 UUID. The first character is always a letter so the token is a
//!   valid SQL identifier.
//!
//! Examples:
//! - counter, prefix `"r"` → `"r1"`, `"r2"`, `"r3"`
//! - random, length 5 → e.g. `"k3fa1"`

use std::collections::HashSet;

use uuid::Uuid;

use crate::config::{AliasStrategy, PlannerConfig};

/// Draws attempted before falling back to suffix-based deduplication.
const MAX_DRAWS: usize = 16;

/// Source of candidate alias tokens. Uniqueness is enforced by [`AliasPool`].
pub trait AliasGenerator {
    fn next_alias(&mut self) -> String;
}

/// Deterministic `{prefix}{n}` tokens.
///
/// ```
/// use relgraph::utils::alias_naming::{AliasGenerator, CounterAliasGenerator};
///
/// let mut generator = CounterAliasGenerator::new("r");
/// assert_eq!(generator.next_alias(), "r1");
/// assert_eq!(generator.next_alias(), "r2");
/// ```
#[derive(Debug, Clone)]
pub struct CounterAliasGenerator {
    prefix: String,
    counter: usize,
}

impl CounterAliasGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }
}

impl AliasGenerator for CounterAliasGenerator {
    fn next_alias(&mut self) -> String {
        self.counter += 1;
        format!("{}{}", self.prefix, self.counter)
    }
}

/// Random fixed-length tokens.
#[derive(Debug, Clone)]
pub struct RandomAliasGenerator {
    length: usize,
}

impl RandomAliasGenerator {
    /// `length` is clamped to the 32 characters a simple UUID provides.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(1, 32),
        }
    }
}

impl AliasGenerator for RandomAliasGenerator {
    fn next_alias(&mut self) -> String {
        let raw = Uuid::new_v4().simple().to_string();
        raw.chars()
            .take(self.length)
            .enumerate()
            .map(|(idx, c)| match (idx, c.to_digit(10)) {
                // shift a leading digit into g..p
                (0, Some(digit)) => char::from(b'g' + digit as u8),
                _ => c,
            })
            .collect()
    }
}

/// Per-run set of issued tokens plus the generator producing them.
pub struct AliasPool {
    generator: Box<dyn AliasGenerator>,
    /// Lowercased
    issued: HashSet<String>,
}

impl AliasPool {
    pub fn new(generator: Box<dyn AliasGenerator>) -> Self {
        Self {
            generator,
            issued: HashSet::new(),
        }
    }

    /// Build a fresh pool for the configured strategy.
    pub fn from_config(config: &PlannerConfig) -> Self {
        let generator: Box<dyn AliasGenerator> = match config.alias_strategy {
            AliasStrategy::Counter => Box::new(CounterAliasGenerator::new(&config.alias_prefix)),
            AliasStrategy::Random => Box::new(RandomAliasGenerator::new(config.alias_length)),
        };
        Self::new(generator)
    }

    /// Mark a name as taken without issuing it.
    pub fn reserve(&mut self, name: &str) {
        self.issued.insert(name.to_ascii_lowercase());
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.issued.contains(&name.to_ascii_lowercase())
    }

    /// Record `name` as issued; false if it was already taken.
    fn claim(&mut self, name: &str) -> bool {
        self.issued.insert(name.to_ascii_lowercase())
    }

    /// Issue a token not seen before in this pool.
    pub fn issue(&mut self) -> String {
        let mut candidate = self.generator.next_alias();
        for _ in 1..MAX_DRAWS {
            if !self.is_taken(&candidate) {
                break;
            }
            log::trace!("alias '{}' already taken, drawing again", candidate);
            candidate = self.generator.next_alias();
        }

        if self.claim(&candidate) {
            return candidate;
        }

        // Generator keeps repeating itself: disambiguate with a sequential suffix
        let mut counter = 1;
        loop {
            let renamed = format!("{}_{}", candidate, counter);
            if self.claim(&renamed) {
                log::warn!("🔧 Alias collision: Renaming '{}' → '{}'", candidate, renamed);
                return renamed;
            }
            counter += 1;
        }
    }

    /// Number of names issued or reserved so far.
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}

impl std::fmt::Debug for AliasPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AliasPool")
            .field("issued", &self.issued)
            .finish_non_exhaustive()
    }
}
