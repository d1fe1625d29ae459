//! Evolves a population toward a full chair profile: color, panel
//! dimensions, a back angle decoded straight to radians, and boolean flags
//! for each foot and the backrest.

use genoform::{Blueprint, Population, util};
use rand::prelude::SeedableRng;
use rand_pcg::Pcg64;

fn chair_blueprint() -> Result<Blueprint, genoform::Error> {
    let mut blueprint = Blueprint::new();
    blueprint
        .add_trait("color_r", 0, 255, 160)?
        .add_trait("color_g", 0, 255, 82)?
        .add_trait("color_b", 0, 255, 45)?
        .add_trait("seat_thickness", 1, 25, 6)?
        .add_trait("back_thickness", 1, 25, 4)?
        .add_trait("feet_thickness", 1, 12, 5)?
        .add_trait("seat_width", 1, 255, 110)?
        .add_trait("seat_depth", 1, 255, 100)?
        .add_trait("feet_height", 1, 255, 105)?
        .add_trait("back_height", 1, 255, 120)?
        // a 3D consumer wants radians; [0, 90] degrees spans 7 bits
        .add_trait_with("back_angle", 0, 90, 15, |raw| {
            (raw * 90.0 / 127.0).to_radians()
        })?
        .add_flag("has_feet1", true)?
        .add_flag("has_feet2", true)?
        .add_flag("has_feet3", true)?
        .add_flag("has_feet4", true)?
        .add_flag("has_feet5", false)?
        .add_flag("has_back", true)?;
    Ok(blueprint)
}

fn main() -> Result<(), genoform::Error> {
    env_logger::init();

    let mut rng = Pcg64::seed_from_u64(64);
    let blueprint = chair_blueprint()?;
    let mut population = Population::create(64, 0.001, &blueprint, &mut rng)?;

    println!(
        "Evolving a chair across a {}-bit genotype space...",
        blueprint.size()
    );

    let mut previous = -1.0_f32;
    loop {
        if let Some(best) = population
            .genotypes
            .iter()
            .max_by(|a, b| util::cmp_f32_nan_last(a.score, b.score))
        {
            if best.score > previous {
                previous = best.score;
                println!(
                    "Generation {:>6}: best score {:>5.1}%",
                    population.generation,
                    best.score * 100.0
                );
            }
        }

        if !population.has_targets().is_empty() {
            break;
        }
        if population.generation >= 50_000 {
            println!("No perfect chair within {} generations", population.generation);
            return Ok(());
        }

        population = population.breed(&mut rng)?;
        population.evaluate(&blueprint)?;
    }

    let targets = population.has_targets();
    let chair = blueprint.decode(targets[0])?;

    println!("Perfect chair at generation {}:", population.generation);
    for (name, value) in chair.iter() {
        if name.starts_with("has_") {
            println!("  {name}: {}", if value == 1.0 { "yes" } else { "no" });
        } else {
            println!("  {name}: {value:.2}");
        }
    }
    Ok(())
}
