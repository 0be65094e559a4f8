/// Input parameters for haiku generation.
///
/// `GenerationInput` carries the tunable knobs of the grammar and the
/// assembler: the two event probabilities every structural decision draws
/// against, and an optional cap on rejection-sampling attempts.
///
/// # Responsibilities
/// - Track the low/medium event probabilities (validated to [0.0, 1.0])
/// - Track the rejection-sampling attempt cap (`max_attempts`)
///
/// # Invariants
/// - `low_probability` and `medium_probability` are always within [0.0, 1.0]
pub struct GenerationInput {
	/// Maximum attempts per rejection-sampling loop.
	///
	/// 0 means unbounded retry, the default: termination is then
	/// probabilistic, relying on the vocabulary's weight distribution. A
	/// positive cap makes an unreachable target surface as an error instead
	/// of looping forever.
	pub max_attempts: usize,

	/// Probability of rare structural events: the prepositional complement
	/// after an intransitive verb, and the standalone-line-first haiku
	/// shape.
	low_probability: f64,

	/// Probability of common structural events: adverb presence, subject
	/// plurality, bare plural articles, adjective presence, and the
	/// split-clause-first haiku shape.
	medium_probability: f64,
}

impl GenerationInput {
	/// Creates an input with the default probabilities and no attempt cap.
	///
	/// # Visibility
	/// - `pub(crate)` to prevent construction outside the crate; use
	///   `HaikuMaker::make_generation_input`.
	pub(crate) fn new() -> Self {
		Self {
			max_attempts: 0,
			low_probability: 0.2,
			medium_probability: 0.5,
		}
	}

	/// Returns the rare-event probability.
	pub fn low_probability(&self) -> f64 {
		self.low_probability
	}

	/// Returns the common-event probability.
	pub fn medium_probability(&self) -> f64 {
		self.medium_probability
	}

	/// Sets the rare-event probability (0.0..1.0).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range.
	pub fn set_low_probability(&mut self, probability: f64) -> Result<(), String> {
		if !(0.0..=1.0).contains(&probability) {
			return Err("Low probability must be between 0.0 and 1.0".to_owned());
		}
		self.low_probability = probability;
		Ok(())
	}

	/// Sets the common-event probability (0.0..1.0).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range.
	pub fn set_medium_probability(&mut self, probability: f64) -> Result<(), String> {
		if !(0.0..=1.0).contains(&probability) {
			return Err("Medium probability must be between 0.0 and 1.0".to_owned());
		}
		self.medium_probability = probability;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_probabilities() {
		let input = GenerationInput::new();
		assert_eq!(input.low_probability(), 0.2);
		assert_eq!(input.medium_probability(), 0.5);
		assert_eq!(input.max_attempts, 0);
	}

	#[test]
	fn test_setters_validate_range() {
		let mut input = GenerationInput::new();

		assert!(input.set_low_probability(0.0).is_ok());
		assert!(input.set_low_probability(1.0).is_ok());
		assert!(input.set_low_probability(-0.1).is_err());
		assert!(input.set_low_probability(1.5).is_err());

		assert!(input.set_medium_probability(0.75).is_ok());
		assert!(input.set_medium_probability(2.0).is_err());

		// Rejected values leave the previous setting in place
		assert_eq!(input.low_probability(), 1.0);
		assert_eq!(input.medium_probability(), 0.75);
	}
}
