use rand::Rng;

use super::generation_input::GenerationInput;
use super::stream::Stream;
use super::vocabulary::{Vocabulary, WordClass};

/// Draws true with the given probability.
pub(crate) fn chance(probability: f64, rng: &mut impl Rng) -> bool {
	rng.random_range(0.0..=1.0) <= probability
}

/// Probabilistic recursive-descent phrase builder.
///
/// Three production rules, each returning a `Stream`:
/// - `noun_clause`: `[article] [adjective] noun`
/// - `conj_clause`: `<noun clause> <intransitive verb> [complement]`
///   or `<noun clause> <transitive verb> <noun clause>`, with an optional
///   adverb in one of three slots
/// - `sentence`: a conjunction clause, possibly extended with
///   `, <conjunction> <conjunction clause>`, rejection-sampled until the
///   total weight hits an exact target
///
/// The grammar holds no state of its own: it borrows the read-only
/// vocabulary and the generation knobs, and every random decision draws
/// from the caller-supplied `Rng`, so a seeded generator reproduces the
/// same phrases.
pub struct Grammar<'a> {
	vocabulary: &'a Vocabulary,
	input: &'a GenerationInput,
}

impl<'a> Grammar<'a> {
	/// Creates a grammar over a vocabulary and a set of generation knobs.
	pub fn new(vocabulary: &'a Vocabulary, input: &'a GenerationInput) -> Self {
		Self { vocabulary, input }
	}

	/// Builds a noun clause: `[article] [adjective] noun`.
	///
	/// Singular clauses always open with a singular article. Plural nouns
	/// may appear bare: the plural article is drawn with medium
	/// probability. The adjective is drawn with medium probability in both
	/// cases.
	pub fn noun_clause(&self, plural: bool, rng: &mut impl Rng) -> Stream {
		let mut clause = Stream::new();

		if !plural {
			clause.add_token(self.vocabulary.pick(WordClass::ArticleSingular, rng));
		} else if chance(self.input.medium_probability(), rng) {
			clause.add_token(self.vocabulary.pick(WordClass::ArticlePlural, rng));
		}

		if chance(self.input.medium_probability(), rng) {
			clause.add_token(self.vocabulary.pick(WordClass::Adjective, rng));
		}

		let noun_class = if plural { WordClass::NounPlural } else { WordClass::NounSingular };
		clause.add_token(self.vocabulary.pick(noun_class, rng));

		clause
	}

	/// Builds a subject-verb(-object) clause.
	///
	/// Structure:
	/// - intransitive: `<noun clause> <verb>` with, at low probability, a
	///   `<preposition> <noun clause>` complement
	/// - transitive: `<noun clause> <verb> <noun clause>`
	///
	/// An adverb is present with medium probability, in one of three
	/// uniformly drawn slots: before the noun clause, between noun clause
	/// and verb, or after the verb. A singular subject takes the derived
	/// "s" verb form, which keeps the base verb's weight.
	pub fn conj_clause(&self, rng: &mut impl Rng) -> Stream {
		let adverb = chance(self.input.medium_probability(), rng);
		// 0: before the noun clause, 1: before the verb, 2: after the verb
		let adverb_slot = if adverb { rng.random_range(0..=2) } else { 0 };

		let intransitive = rng.random_bool(0.5);
		let plural = chance(self.input.medium_probability(), rng);

		let mut clause = Stream::new();

		if adverb && adverb_slot == 0 {
			clause.add_token(self.vocabulary.pick(WordClass::Adverb, rng));
		}

		clause.concat(&self.noun_clause(plural, rng));

		if adverb && adverb_slot == 1 {
			clause.add_token(self.vocabulary.pick(WordClass::Adverb, rng));
		}

		let verb_class = if intransitive {
			WordClass::IntransitiveVerb
		} else {
			WordClass::TransitiveVerb
		};
		let verb = self.vocabulary.pick(verb_class, rng);
		let verb = if plural { verb } else { verb.with_suffix("s") };
		clause.add_token(verb);

		if adverb && adverb_slot == 2 {
			clause.add_token(self.vocabulary.pick(WordClass::Adverb, rng));
		}

		if intransitive {
			if chance(self.input.low_probability(), rng) {
				clause.add_token(self.vocabulary.pick(WordClass::Preposition, rng));
				clause.concat(&self.noun_clause(false, rng));
			}
		} else {
			// Transitive verbs always take a direct object
			clause.concat(&self.noun_clause(false, rng));
		}

		clause
	}

	/// Builds a sentence of exactly `target_weight` syllables.
	///
	/// Rejection sampling: generate a conjunction clause and keep it if it
	/// lands on the target. A clause that overshoots is discarded. A clause
	/// that leaves at least 2 syllables of room gets one extension attempt:
	/// a conjunction plus a second clause; if the combination lands exactly,
	/// the two clauses are joined with a comma, otherwise everything from
	/// this iteration is discarded. A remaining budget of 0 or 1 is too
	/// small to extend and also retries.
	///
	/// With `max_attempts` at 0 the loop is unbounded and termination is
	/// probabilistic; the vocabulary's weight distribution makes an exact
	/// match reachable within a few iterations in practice.
	///
	/// # Errors
	/// Returns an error if `GenerationInput::max_attempts` is positive and
	/// no exact match was found within that many attempts.
	pub fn sentence(&self, target_weight: usize, rng: &mut impl Rng) -> Result<Stream, String> {
		let mut attempts: usize = 0;
		loop {
			attempts += 1;
			if self.input.max_attempts > 0 && attempts > self.input.max_attempts {
				return Err(format!(
					"No sentence of weight {} found after {} attempts",
					target_weight, self.input.max_attempts
				));
			}

			let mut clause = self.conj_clause(rng);
			if clause.weight() == target_weight {
				return Ok(clause);
			}
			if clause.weight() > target_weight {
				continue;
			}
			// Room for another clause behind a conjunction
			if target_weight - clause.weight() >= 2 {
				let mut extension = Stream::new();
				extension.add_token(self.vocabulary.pick(WordClass::Conjunction, rng));
				extension.concat(&self.conj_clause(rng));
				if clause.weight() + extension.weight() == target_weight {
					clause.add_comma();
					clause.concat(&extension);
					return Ok(clause);
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::vocabulary::default_vocabulary;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	/// True if `word` is a vocabulary word, a derived "s" verb form of one,
	/// or the comma marker.
	fn known_word(vocabulary: &Vocabulary, word: &str) -> bool {
		if word == "," {
			return true;
		}
		let plain = WordClass::ALL
			.iter()
			.any(|class| vocabulary.entries(*class).iter().any(|t| t.word() == word));
		if plain {
			return true;
		}
		word.strip_suffix('s').is_some_and(|base| {
			[WordClass::IntransitiveVerb, WordClass::TransitiveVerb]
				.iter()
				.any(|class| vocabulary.entries(*class).iter().any(|t| t.word() == base))
		})
	}

	#[test]
	fn test_noun_clause_singular_shape() {
		let vocabulary = default_vocabulary();
		let input = GenerationInput::new();
		let grammar = Grammar::new(&vocabulary, &input);

		for seed in 0..20 {
			let mut rng = StdRng::seed_from_u64(seed);
			let clause = grammar.noun_clause(false, &mut rng);
			let tokens = clause.tokens();

			// Always opens with a singular article
			assert!(
				vocabulary
					.entries(WordClass::ArticleSingular)
					.contains(&tokens[0]),
				"'{}' is not a singular article",
				tokens[0].word()
			);
			// Always closes with a singular noun
			assert!(
				vocabulary
					.entries(WordClass::NounSingular)
					.contains(tokens.last().unwrap())
			);
		}
	}

	#[test]
	fn test_noun_clause_plural_shape() {
		let vocabulary = default_vocabulary();
		let input = GenerationInput::new();
		let grammar = Grammar::new(&vocabulary, &input);

		for seed in 0..20 {
			let mut rng = StdRng::seed_from_u64(seed);
			let clause = grammar.noun_clause(true, &mut rng);
			assert!(
				vocabulary
					.entries(WordClass::NounPlural)
					.contains(clause.tokens().last().unwrap())
			);
		}
	}

	#[test]
	fn test_singular_subject_takes_s_verb_form() {
		let vocabulary = default_vocabulary();
		let mut input = GenerationInput::new();
		// Force singular subjects, no adverbs, no adjectives, no complement
		input.set_medium_probability(0.0).unwrap();
		input.set_low_probability(0.0).unwrap();
		let grammar = Grammar::new(&vocabulary, &input);

		for seed in 0..20 {
			let mut rng = StdRng::seed_from_u64(seed);
			let clause = grammar.conj_clause(&mut rng);
			// Shape is article-noun-verb[-article-noun]
			let verb = &clause.tokens()[2];
			assert!(
				verb.word().ends_with('s'),
				"singular verb '{}' should carry the s suffix",
				verb.word()
			);
		}
	}

	#[test]
	fn test_conj_clause_weight_holds_invariant() {
		let vocabulary = default_vocabulary();
		let input = GenerationInput::new();
		let grammar = Grammar::new(&vocabulary, &input);

		for seed in 0..50 {
			let mut rng = StdRng::seed_from_u64(seed);
			let clause = grammar.conj_clause(&mut rng);
			let sum: usize = clause.tokens().iter().map(|t| t.weight()).sum();
			assert_eq!(clause.weight(), sum);
			assert!(clause.weight() >= 2, "a clause is at least noun plus verb");
		}
	}

	#[test]
	fn test_sentence_hits_exact_targets() {
		let vocabulary = default_vocabulary();
		let input = GenerationInput::new();
		let grammar = Grammar::new(&vocabulary, &input);

		for target in [5, 7, 12] {
			for seed in 0..10 {
				let mut rng = StdRng::seed_from_u64(seed);
				let sentence = grammar.sentence(target, &mut rng).unwrap();
				assert_eq!(sentence.weight(), target, "target {target}, seed {seed}");
			}
		}
	}

	#[test]
	fn test_sentence_words_all_come_from_the_vocabulary() {
		let vocabulary = default_vocabulary();
		let input = GenerationInput::new();
		let grammar = Grammar::new(&vocabulary, &input);
		let mut rng = StdRng::seed_from_u64(11);

		for _ in 0..10 {
			let sentence = grammar.sentence(7, &mut rng).unwrap();
			for token in sentence.tokens() {
				assert!(
					known_word(&vocabulary, token.word()),
					"'{}' is not a vocabulary word",
					token.word()
				);
			}
		}
	}

	#[test]
	fn test_sentence_is_deterministic_for_a_seed() {
		let vocabulary = default_vocabulary();
		let input = GenerationInput::new();
		let grammar = Grammar::new(&vocabulary, &input);

		let mut first = StdRng::seed_from_u64(99);
		let mut second = StdRng::seed_from_u64(99);

		assert_eq!(
			grammar.sentence(12, &mut first).unwrap().render(),
			grammar.sentence(12, &mut second).unwrap().render()
		);
	}

	#[test]
	fn test_sentence_unreachable_target_exhausts_when_capped() {
		let vocabulary = default_vocabulary();
		let mut input = GenerationInput::new();
		input.max_attempts = 200;
		let grammar = Grammar::new(&vocabulary, &input);
		let mut rng = StdRng::seed_from_u64(3);

		// The smallest clause is a bare plural noun plus verb: weight 2,
		// and a 1-syllable budget is also too small to extend into
		let error = grammar.sentence(1, &mut rng).unwrap_err();
		assert!(error.contains("200"), "unexpected error: {error}");
	}
}
