use crate::{Error, blueprint::Blueprint, genotype::Genotype, util};
use log::debug;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Group size for one tournament draw.
const TOURNAMENT_SIZE: usize = 4;

/// Survivor selection strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Keep the top-N by fitness.
    #[default]
    Truncation,
    /// Repeatedly sample small groups, keep each group's best.
    Tournament,
}

impl FromStr for Selection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "truncation" => Ok(Self::Truncation),
            "tournament" => Ok(Self::Tournament),
            other => Err(Error::InvalidSelectionMethod(other.to_string())),
        }
    }
}

/// An ordered pool of genotypes sharing one blueprint-compatible bit length,
/// advanced one generation at a time by [`breed`](Self::breed).
///
/// Breeding returns a new `Population`; each generation is a complete,
/// independently valid snapshot. There is no built-in generation cap - the
/// driving loop decides when to stop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Population {
    pub genotypes: Vec<Genotype>,
    pub mutation_rate: f32,
    pub generation: u32,
}

impl Population {
    /// Wraps a genotype pool at generation 0.
    pub fn new(genotypes: Vec<Genotype>, mutation_rate: f32) -> Self {
        Self {
            genotypes,
            mutation_rate,
            generation: 0,
        }
    }

    /// Builds `n` random genotypes of `blueprint.size()` bits and evaluates
    /// them immediately.
    pub fn create<R: Rng>(
        n: usize,
        mutation_rate: f32,
        blueprint: &Blueprint,
        rng: &mut R,
    ) -> Result<Self, Error> {
        let mut population = Self::new(
            Genotype::create_population(n, blueprint.size(), rng),
            mutation_rate,
        );
        population.evaluate(blueprint)?;
        Ok(population)
    }

    /// Number of member genotypes.
    pub fn size(&self) -> usize {
        self.genotypes.len()
    }

    /// Scores every genotype against `blueprint` and assigns `score` and
    /// `fitness` in place.
    ///
    /// `score` is the target-relative match fraction `raw / blueprint.size()`,
    /// so a perfect match is exactly `1.0` regardless of population
    /// composition. `fitness` is the population-relative min-max
    /// normalization of the scores; when every member ties, all get `1.0`
    /// (NaN never escapes). An empty blueprint scores `1.0` vacuously.
    pub fn evaluate(&mut self, blueprint: &Blueprint) -> Result<(), Error> {
        if self.genotypes.is_empty() {
            return Ok(());
        }

        #[cfg(feature = "parallel")]
        let raw: Vec<usize> = self
            .genotypes
            .par_iter()
            .map(|genotype| genotype.evaluate(blueprint))
            .collect::<Result<_, _>>()?;
        #[cfg(not(feature = "parallel"))]
        let raw: Vec<usize> = self
            .genotypes
            .iter()
            .map(|genotype| genotype.evaluate(blueprint))
            .collect::<Result<_, _>>()?;

        let total = blueprint.size();
        let scores: Vec<f32> = raw
            .iter()
            .map(|&matches| {
                if total == 0 {
                    1.0
                } else {
                    matches as f32 / total as f32
                }
            })
            .collect();

        let fitness = if raw.iter().all(|&matches| matches == raw[0]) {
            vec![1.0; raw.len()]
        } else {
            util::normalize(&scores)
        };

        let best = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        debug!(
            "generation {}: evaluated {} genotypes, best score {best:.3}",
            self.generation,
            self.genotypes.len(),
        );

        for ((genotype, score), fit) in self.genotypes.iter_mut().zip(scores).zip(fitness) {
            genotype.score = score;
            genotype.fitness = fit;
        }
        Ok(())
    }

    /// Picks `threshold` genotypes by `method`, returning independent clones.
    ///
    /// Truncation sorts descending by fitness (NaN last) and takes the top
    /// `threshold`. Tournament repeatedly draws four distinct members (with
    /// replacement across draws) and keeps the fittest of each draw, first
    /// seen winning ties.
    pub fn select_best_candidates<R: Rng>(
        &self,
        threshold: usize,
        method: Selection,
        rng: &mut R,
    ) -> Vec<Genotype> {
        match method {
            Selection::Truncation => {
                let mut ranked: Vec<&Genotype> = self.genotypes.iter().collect();
                ranked.sort_by(|a, b| util::cmp_f32_nan_last(b.fitness, a.fitness));
                ranked.into_iter().take(threshold).cloned().collect()
            }
            Selection::Tournament => {
                if self.genotypes.is_empty() {
                    return Vec::new();
                }
                let group = TOURNAMENT_SIZE.min(self.genotypes.len());
                (0..threshold)
                    .filter_map(|_| {
                        self.genotypes
                            .choose_multiple(rng, group)
                            .reduce(|best, candidate| {
                                if util::cmp_f32_nan_last(candidate.fitness, best.fitness)
                                    == Ordering::Greater
                                {
                                    candidate
                                } else {
                                    best
                                }
                            })
                            .cloned()
                    })
                    .collect()
            }
        }
    }

    /// Advances one generation with the default truncation selection.
    pub fn breed<R: Rng>(&self, rng: &mut R) -> Result<Self, Error> {
        self.breed_with(Selection::Truncation, rng)
    }

    /// Advances one generation: select `size / 2` survivors, cross adjacent
    /// pairs, shuffle survivors and children together, then mutate every
    /// member at `mutation_rate`.
    ///
    /// An odd trailing survivor contributes no children. The returned
    /// population is at `generation + 1` and unevaluated - call
    /// [`evaluate`](Self::evaluate) before inspecting scores or
    /// [`has_targets`](Self::has_targets). Errors with
    /// [`Error::NoCandidatesSelected`] when selection comes back empty.
    pub fn breed_with<R: Rng>(&self, method: Selection, rng: &mut R) -> Result<Self, Error> {
        let mut pool = self.select_best_candidates(self.size() / 2, method, rng);
        if pool.is_empty() {
            return Err(Error::NoCandidatesSelected);
        }

        let mut children = Vec::with_capacity(pool.len());
        for pair in pool.chunks_exact(2) {
            let (first, second) = pair[0].cross_with(&pair[1], rng)?;
            children.push(first);
            children.push(second);
        }

        let survivors = pool.len();
        pool.append(&mut children);
        pool.shuffle(rng);

        let genotypes: Vec<Genotype> = pool
            .iter()
            .map(|genotype| genotype.mutate(rng, self.mutation_rate))
            .collect();

        debug!(
            "generation {}: bred {survivors} survivors into {} genotypes",
            self.generation,
            genotypes.len(),
        );

        Ok(Self {
            genotypes,
            mutation_rate: self.mutation_rate,
            generation: self.generation + 1,
        })
    }

    /// All genotypes with a perfect score (`score == 1.0` under the
    /// fraction-based convention).
    pub fn has_targets(&self) -> Vec<&Genotype> {
        self.genotypes
            .iter()
            .filter(|genotype| genotype.score >= 1.0)
            .collect()
    }
}
