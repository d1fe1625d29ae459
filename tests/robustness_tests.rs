//! Edge-case coverage: degenerate populations, empty schemas, out-of-range
//! parameters, and ordering of non-finite fitness values.

use genoform::{Blueprint, Error, Genotype, Population, Selection, util};
use rand::prelude::SeedableRng;
use rand_pcg::Pcg64;
use std::cmp::Ordering;

fn rng() -> Pcg64 {
    Pcg64::seed_from_u64(7)
}

fn three_bit_blueprint() -> Blueprint {
    let mut blueprint = Blueprint::new();
    blueprint.add_trait("x", 0, 7, 5).unwrap();
    blueprint
}

// ============================================================================
// Empty populations and empty blueprints
// ============================================================================

#[test]
fn evaluating_an_empty_population_is_a_no_op() {
    let blueprint = three_bit_blueprint();
    let mut population = Population::new(Vec::new(), 0.1);

    population.evaluate(&blueprint).unwrap();
    assert_eq!(population.size(), 0);
    assert!(population.has_targets().is_empty());
}

#[test]
fn empty_blueprint_scores_vacuously_perfect() {
    let mut rng = rng();
    let blueprint = Blueprint::new();
    assert_eq!(blueprint.size(), 0);
    assert!(blueprint.model().is_empty());

    let population = Population::create(4, 0.1, &blueprint, &mut rng).unwrap();
    assert_eq!(population.has_targets().len(), 4);
    for genotype in &population.genotypes {
        assert_eq!(genotype.score, 1.0);
        assert_eq!(genotype.fitness, 1.0);
    }

    let decoded = blueprint.decode(&population.genotypes[0]).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn zero_bit_genotypes_cross_and_mutate() {
    let mut rng = rng();
    let a = Genotype::new(Vec::new());
    let b = Genotype::new(Vec::new());

    let (c1, c2) = a.cross_with(&b, &mut rng).unwrap();
    assert!(c1.is_empty() && c2.is_empty());
    assert!(a.mutate(&mut rng, 0.5).is_empty());
}

// ============================================================================
// Selection edges
// ============================================================================

#[test]
fn truncation_threshold_beyond_population_returns_everyone() {
    let mut rng = rng();
    let blueprint = three_bit_blueprint();
    let mut population = Population::new(Genotype::create_population(3, 3, &mut rng), 0.1);
    population.evaluate(&blueprint).unwrap();

    let selected = population.select_best_candidates(10, Selection::Truncation, &mut rng);
    assert_eq!(selected.len(), 3);
}

#[test]
fn tournament_copes_with_fewer_than_four_members() {
    let mut rng = rng();
    let blueprint = three_bit_blueprint();
    let mut population = Population::new(Genotype::create_population(2, 3, &mut rng), 0.1);
    population.evaluate(&blueprint).unwrap();

    let selected = population.select_best_candidates(2, Selection::Tournament, &mut rng);
    assert_eq!(selected.len(), 2);
}

#[test]
fn tournament_on_an_empty_population_selects_nothing() {
    let mut rng = rng();
    let population = Population::new(Vec::new(), 0.1);
    let selected = population.select_best_candidates(4, Selection::Tournament, &mut rng);
    assert!(selected.is_empty());
}

#[test]
fn single_member_population_cannot_breed() {
    // floor(1 / 2) = 0 survivors
    let mut rng = rng();
    let blueprint = three_bit_blueprint();
    let population = Population::create(1, 0.1, &blueprint, &mut rng).unwrap();

    assert_eq!(population.breed(&mut rng), Err(Error::NoCandidatesSelected));
}

#[test]
fn selection_returns_independent_clones() {
    let blueprint = three_bit_blueprint();
    let mut population = Population::new(vec![Genotype::new(vec![true, false, true])], 0.1);
    population.evaluate(&blueprint).unwrap();

    let mut selected = population.select_best_candidates(1, Selection::Truncation, &mut rng());
    selected[0].data[0] = false;
    assert!(population.genotypes[0].data[0]);
}

#[test]
fn tournament_breeding_advances_a_generation() {
    let mut rng = rng();
    let blueprint = three_bit_blueprint();
    let population = Population::create(8, 0.05, &blueprint, &mut rng).unwrap();

    let next = population.breed_with(Selection::Tournament, &mut rng).unwrap();
    assert_eq!(next.size(), 8);
    assert_eq!(next.generation, 1);
}

// ============================================================================
// Sentinels and out-of-range rates
// ============================================================================

#[test]
fn fresh_genotypes_carry_unevaluated_sentinels() {
    let mut rng = rng();
    let genotype = Genotype::create(8, &mut rng);
    assert_eq!(genotype.score, genoform::genotype::UNEVALUATED);
    assert_eq!(genotype.fitness, genoform::genotype::UNEVALUATED);
}

#[test]
fn out_of_range_mutation_rates_degrade_gracefully() {
    let mut rng = rng();
    let genotype = Genotype::create(32, &mut rng);

    let below = genotype.mutate(&mut rng, -1.0);
    assert_eq!(below.data, genotype.data);

    let above = genotype.mutate(&mut rng, 2.0);
    assert!(above.data.iter().zip(&genotype.data).all(|(a, b)| *a != *b));
}

// ============================================================================
// Numeric helpers
// ============================================================================

#[test]
fn normalize_spans_zero_to_one() {
    let normalized = util::normalize(&[2.0, 4.0, 6.0]);
    assert_eq!(normalized, vec![0.0, 0.5, 1.0]);
}

#[test]
fn normalize_of_homogeneous_data_is_nan_by_contract() {
    // the raw utility propagates the IEEE division; Population::evaluate is
    // the guarded caller that never lets this escape
    let normalized = util::normalize(&[2.0, 2.0]);
    assert!(normalized.iter().all(|v| v.is_nan()));
}

#[test]
fn nan_sorts_after_every_finite_fitness() {
    assert_eq!(util::cmp_f32_nan_last(f32::NAN, 1.0), Ordering::Less);
    assert_eq!(util::cmp_f32_nan_last(1.0, f32::NAN), Ordering::Greater);
    assert_eq!(util::cmp_f32_nan_last(f32::NAN, f32::NAN), Ordering::Equal);
    assert_eq!(util::cmp_f32_nan_last(0.25, 0.75), Ordering::Less);
}
