//! A genetic-algorithm engine that searches a bit-encoded parameter space for
//! a target trait profile.
//!
//! Three pieces, leaf first:
//!
//! - [`Genotype`]: a fixed-length bit vector with cached score/fitness.
//! - [`Blueprint`]: an ordered schema mapping named, ranged traits onto
//!   contiguous bit ranges, carrying the target bit pattern used for scoring
//!   and a per-trait decode transform for consumers.
//! - [`Population`]: the evaluate → select → crossover → mutate generation
//!   loop.
//!
//! Every stochastic operation takes an explicit [`rand::Rng`], so runs are
//! reproducible with any seedable generator.
//!
//! ```rust
//! use genoform::{Blueprint, Population};
//! use rand::prelude::SeedableRng;
//! use rand_pcg::Pcg64;
//!
//! # fn main() -> Result<(), genoform::Error> {
//! let mut rng = Pcg64::seed_from_u64(42);
//!
//! let mut blueprint = Blueprint::new();
//! blueprint.add_trait("x", 0, 7, 5)?.add_trait("y", 0, 7, 2)?;
//!
//! let mut population = Population::create(32, 0.05, &blueprint, &mut rng)?;
//! while population.has_targets().is_empty() && population.generation < 2_000 {
//!     population = population.breed(&mut rng)?;
//!     population.evaluate(&blueprint)?;
//! }
//!
//! let targets = population.has_targets();
//! assert!(!targets.is_empty());
//! assert_eq!(blueprint.decode(targets[0])?["x"], 5.0);
//! # Ok(())
//! # }
//! ```

use thiserror::Error as ThisError;

/// Contract errors. All of these are fatal to the current run; nothing is
/// retried internally.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum Error {
    /// Bit-length mismatch between the two parents of a crossover.
    #[error("incompatible genotype: cannot cross {left} bits with {right} bits")]
    IncompatibleGenotype { left: usize, right: usize },

    /// Bit-length mismatch between a genotype and a blueprint.
    #[error("incompatible model: genotype is {genotype} bits, blueprint expects {blueprint}")]
    IncompatibleModel { genotype: usize, blueprint: usize },

    /// Selection produced no survivors, so the run cannot continue.
    #[error("no candidates selected")]
    NoCandidatesSelected,

    /// Unrecognized selection method tag.
    #[error("invalid selection method `{0}`")]
    InvalidSelectionMethod(String),

    /// Target value does not fit the trait's bit width.
    #[error("target {value} for trait `{name}` does not fit in {bits} bits")]
    TargetOutOfRange { name: String, value: u64, bits: u32 },

    /// Trait bounds do not describe a non-empty range.
    #[error("invalid range for trait `{name}`: min {min} must be below max {max}")]
    InvalidTraitRange { name: String, min: i64, max: i64 },
}

pub mod blueprint;
pub mod genotype;
pub mod population;
pub mod util;

pub use blueprint::{Blueprint, Decoded, Gene};
pub use genotype::Genotype;
pub use population::{Population, Selection};
