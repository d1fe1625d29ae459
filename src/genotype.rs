use crate::{Error, blueprint::Blueprint};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Value of [`Genotype::score`] and [`Genotype::fitness`] before evaluation.
pub const UNEVALUATED: f32 = -1.0;

/// A fixed-length bit vector representing one candidate solution.
///
/// `score` and `fitness` are caches written by
/// [`Population::evaluate`](crate::Population::evaluate): `score` is the
/// target-relative match fraction in `[0, 1]`, `fitness` the
/// population-relative normalized score in `[0, 1]`. Both hold
/// [`UNEVALUATED`] until then. Cloning preserves them along with an
/// independent bit buffer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genotype {
    pub data: Vec<bool>,
    pub score: f32,
    pub fitness: f32,
}

impl Genotype {
    /// Wraps a bit buffer as an unevaluated genotype.
    pub fn new(data: Vec<bool>) -> Self {
        Self {
            data,
            score: UNEVALUATED,
            fitness: UNEVALUATED,
        }
    }

    /// Creates a genotype of `size` independently uniform random bits.
    pub fn create<R: Rng>(size: usize, rng: &mut R) -> Self {
        Self::new((0..size).map(|_| rng.random_bool(0.5)).collect())
    }

    /// Creates `n` independent random genotypes of `size` bits each.
    pub fn create_population<R: Rng>(n: usize, size: usize, rng: &mut R) -> Vec<Self> {
        (0..n).map(|_| Self::create(size, rng)).collect()
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a new genotype in which each bit was flipped independently
    /// with probability `rate`.
    ///
    /// `rate` is not validated: values outside `[0, 1]` degrade toward
    /// never-flip or always-flip. The result is unevaluated.
    pub fn mutate<R: Rng>(&self, rng: &mut R, rate: f32) -> Self {
        Self::new(
            self.data
                .iter()
                .map(|&bit| {
                    if rng.random::<f32>() < rate {
                        !bit
                    } else {
                        bit
                    }
                })
                .collect(),
        )
    }

    /// Single-point crossover with `other`.
    ///
    /// Picks one split point uniformly in `[0, len)` and returns the two
    /// prefix/suffix swaps; a split of 0 degenerates to parent copies. Both
    /// children are unevaluated. Errors with
    /// [`Error::IncompatibleGenotype`] when the lengths differ.
    pub fn cross_with<R: Rng>(&self, other: &Self, rng: &mut R) -> Result<(Self, Self), Error> {
        if self.data.len() != other.data.len() {
            return Err(Error::IncompatibleGenotype {
                left: self.data.len(),
                right: other.data.len(),
            });
        }
        if self.data.is_empty() {
            return Ok((Self::new(Vec::new()), Self::new(Vec::new())));
        }

        let split = rng.random_range(0..self.data.len());

        let mut first = self.data[..split].to_vec();
        first.extend_from_slice(&other.data[split..]);
        let mut second = other.data[..split].to_vec();
        second.extend_from_slice(&self.data[split..]);

        Ok((Self::new(first), Self::new(second)))
    }

    /// Counts the bit positions matching `blueprint`'s target model
    /// (Hamming similarity: higher is better).
    ///
    /// Pure; storing the result is the caller's decision. Errors with
    /// [`Error::IncompatibleModel`] when the lengths differ.
    pub fn evaluate(&self, blueprint: &Blueprint) -> Result<usize, Error> {
        if self.data.len() != blueprint.size() {
            return Err(Error::IncompatibleModel {
                genotype: self.data.len(),
                blueprint: blueprint.size(),
            });
        }

        Ok(self
            .data
            .iter()
            .zip(blueprint.model())
            .filter(|(bit, target)| bit == target)
            .count())
    }
}
