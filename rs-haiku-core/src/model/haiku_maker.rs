use std::path::Path;

use rand::Rng;

use super::generation_input::GenerationInput;
use super::grammar::{Grammar, chance};
use super::stream::Stream;
use super::vocabulary::{Vocabulary, default_vocabulary};

/// Syllable weight of the short (first and last) haiku lines.
const SHORT_LINE_WEIGHT: usize = 5;
/// Syllable weight of the middle haiku line.
const MIDDLE_LINE_WEIGHT: usize = 7;
/// Weight of a clause generated to be split across two lines.
const LONG_CLAUSE_WEIGHT: usize = 12;

/// A generated haiku: three streams, one per line.
///
/// Line weights are (5, 7, 5) when the lines are independent or when a
/// split 12-weight clause opens the poem, and (5, 5, 7) when the split
/// clause closes it. Built per request, rendered, discarded.
#[derive(Clone, Debug)]
pub struct Haiku {
	lines: [Stream; 3],
}

impl Haiku {
	/// Returns the three lines in order.
	pub fn lines(&self) -> &[Stream; 3] {
		&self.lines
	}

	/// Renders the haiku as three lines joined by line breaks.
	pub fn render(&self) -> String {
		let [first, second, third] = &self.lines;
		format!("{}\n{}\n{}", first.render(), second.render(), third.render())
	}
}

/// High-level haiku assembler.
///
/// # Responsibilities
/// - Own the loaded vocabulary (file, JSON, or the embedded default)
/// - Hand out `GenerationInput`s for callers to tune
/// - Pick one of the three structural shapes and drive the grammar and
///   the stream splitter to fill it
///
/// Each call is independent: every stream is freshly allocated, the
/// vocabulary is never mutated, and all randomness comes from the
/// caller-supplied `Rng`.
#[derive(Debug)]
pub struct HaikuMaker {
	vocabulary: Vocabulary,
}

impl HaikuMaker {
	/// Creates a maker by loading a vocabulary file.
	///
	/// # Parameters
	/// - `filepath`: Path to a `.json` vocabulary file. A `.bin` cache is
	///   written next to it on first load and reused afterwards.
	///
	/// # Errors
	/// Returns an error if the file cannot be read or the vocabulary fails
	/// validation.
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self, Box<dyn std::error::Error>> {
		Ok(Self { vocabulary: Vocabulary::new(filepath)? })
	}

	/// Creates a maker over an already loaded vocabulary.
	pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
		Self { vocabulary }
	}

	/// Returns the loaded vocabulary.
	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	/// Creates a new `GenerationInput` with the reference settings.
	pub fn make_generation_input(&self) -> GenerationInput {
		GenerationInput::new()
	}

	/// Builds one haiku.
	///
	/// Picks one of three structural shapes through two nested draws (the
	/// resulting branch probabilities are 0.5 / 0.1 / 0.4 with the default
	/// knobs, by construction rather than as flat percentages):
	/// - medium draw: a 12-weight clause split at 5 fills lines one and
	///   two, an independent 5-weight sentence closes;
	/// - else low draw: an independent 5-weight sentence opens, the split
	///   clause fills lines two and three;
	/// - else: three independent sentences of weights 5, 7 and 5.
	///
	/// Most 12-weight clauses have no token boundary at exactly 5, so the
	/// split branches regenerate the clause until one splits. The
	/// independent short line is generated only after a successful split,
	/// and `GenerationInput::max_attempts` caps each retry loop
	/// independently when positive.
	///
	/// # Errors
	/// Returns an error only when `max_attempts` is positive and a
	/// rejection loop exhausts it.
	pub fn make(&self, input: &GenerationInput, rng: &mut impl Rng) -> Result<Haiku, String> {
		let grammar = Grammar::new(&self.vocabulary, input);

		if chance(input.medium_probability(), rng) {
			let (head, tail) = self.split_long_clause(&grammar, input, rng)?;
			let end = grammar.sentence(SHORT_LINE_WEIGHT, rng)?;
			Ok(Haiku { lines: [head, tail, end] })
		} else if chance(input.low_probability(), rng) {
			let (head, tail) = self.split_long_clause(&grammar, input, rng)?;
			let beginning = grammar.sentence(SHORT_LINE_WEIGHT, rng)?;
			Ok(Haiku { lines: [beginning, head, tail] })
		} else {
			Ok(Haiku {
				lines: [
					grammar.sentence(SHORT_LINE_WEIGHT, rng)?,
					grammar.sentence(MIDDLE_LINE_WEIGHT, rng)?,
					grammar.sentence(SHORT_LINE_WEIGHT, rng)?,
				],
			})
		}
	}

	/// Builds one haiku and renders it as three text lines.
	///
	/// # Errors
	/// Same conditions as `make`.
	pub fn make_str(&self, input: &GenerationInput, rng: &mut impl Rng) -> Result<String, String> {
		Ok(self.make(input, rng)?.render())
	}

	/// Generates 12-weight clauses until one splits at the 5-weight
	/// boundary, then returns the (5, 7) pair.
	fn split_long_clause(
		&self,
		grammar: &Grammar,
		input: &GenerationInput,
		rng: &mut impl Rng,
	) -> Result<(Stream, Stream), String> {
		let mut attempts: usize = 0;
		loop {
			attempts += 1;
			if input.max_attempts > 0 && attempts > input.max_attempts {
				return Err(format!(
					"No splittable clause of weight {} found after {} attempts",
					LONG_CLAUSE_WEIGHT, input.max_attempts
				));
			}

			let clause = grammar.sentence(LONG_CLAUSE_WEIGHT, rng)?;
			if let Some(split) = clause.try_split(SHORT_LINE_WEIGHT) {
				return Ok(split);
			}
		}
	}
}

impl Default for HaikuMaker {
	/// A maker over the embedded default vocabulary.
	fn default() -> Self {
		Self::with_vocabulary(default_vocabulary())
	}
}
