use rand::rngs::StdRng;
use rand::SeedableRng;

use rs_haiku_core::model::haiku_maker::HaikuMaker;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build a maker over the embedded English vocabulary
    // (HaikuMaker::new("path/to/vocabulary.json") loads a custom one)
    let maker = HaikuMaker::default();

    // Create a generation input with the default settings
    let mut input = maker.make_generation_input();

    // Number of attempts per rejection-sampling loop
    // 0 keeps retries unbounded; a positive cap turns an unreachable
    // syllable target into an error instead of an endless retry
    input.max_attempts = 10_000;

    // Structural event probabilities
    // 'low' drives the rare events (prepositional complement, the
    // standalone-line-first shape), 'medium' the common ones (adverbs,
    // plurality, adjectives, the split-clause-first shape)
    input.set_low_probability(0.2)?;
    input.set_medium_probability(0.5)?;

    // Attempting to set out-of-range probabilities
    match input.set_low_probability(2.0) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("Low probability 2.0 is invalid, must be between 0.0 and 1.0"),
    }
    match input.set_medium_probability(-1.0) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("Medium probability -1.0 is invalid, must be between 0.0 and 1.0"),
    }
    println!();

    // Generate 10 haikus with a fresh process generator
    let mut rng = rand::rng();
    for i in 0..10 {
        println!("Haiku {}:\n{}\n", i + 1, maker.make_str(&input, &mut rng)?);
    }

    // A seeded generator reproduces the same haiku every time
    let mut seeded = StdRng::seed_from_u64(42);
    println!("Seeded haiku:\n{}\n", maker.make_str(&input, &mut seeded)?);

    let mut seeded = StdRng::seed_from_u64(42);
    println!("Same seed again:\n{}", maker.make_str(&input, &mut seeded)?);

    Ok(())
}
