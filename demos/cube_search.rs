//! Evolves a population toward a target cube profile: an RGB color plus
//! width/height/depth dimensions. The decoded winner is what a 3D layer
//! would hand to its mesh builder.

use genoform::{Blueprint, Population};
use rand::prelude::SeedableRng;
use rand_pcg::Pcg64;

fn main() -> Result<(), genoform::Error> {
    env_logger::init();

    let mut rng = Pcg64::seed_from_u64(7);

    let mut blueprint = Blueprint::new();
    blueprint
        .add_trait("r", 0, 255, 200)?
        .add_trait("g", 0, 255, 60)?
        .add_trait("b", 0, 255, 20)?
        .add_trait("w", 1, 350, 50)?
        .add_trait("h", 1, 350, 50)?
        .add_trait("d", 1, 350, 50)?;

    let mut population = Population::create(36, 0.0065, &blueprint, &mut rng)?;

    println!("Searching a {}-bit genotype space...", blueprint.size());

    while population.has_targets().is_empty() {
        if population.generation >= 20_000 {
            println!("No target specimen after {} generations", population.generation);
            return Ok(());
        }
        population = population.breed(&mut rng)?;
        population.evaluate(&blueprint)?;

        if population.generation % 25 == 0 {
            let best = population
                .genotypes
                .iter()
                .map(|g| g.score)
                .fold(f32::NEG_INFINITY, f32::max);
            println!(
                "Generation {:>5}: best score {:>5.1}%",
                population.generation,
                best * 100.0
            );
        }
    }

    let targets = population.has_targets();
    let profile = blueprint.decode(targets[0])?;

    println!("Target cube found at generation {}:", population.generation);
    for (name, value) in profile.iter() {
        println!("  {name}: {value:.1}");
    }
    Ok(())
}
