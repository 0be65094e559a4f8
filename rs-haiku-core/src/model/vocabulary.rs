use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::stream::Token;
use crate::io::{build_output_path, read_file};

/// The ten grammatical classes a vocabulary word can belong to.
///
/// Class names match the keys of the vocabulary JSON format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordClass {
	NounSingular,
	NounPlural,
	Adverb,
	Adjective,
	Preposition,
	IntransitiveVerb,
	TransitiveVerb,
	Conjunction,
	ArticleSingular,
	ArticlePlural,
}

impl WordClass {
	/// All classes, in vocabulary file order.
	pub const ALL: [WordClass; 10] = [
		WordClass::NounSingular,
		WordClass::NounPlural,
		WordClass::Adverb,
		WordClass::Adjective,
		WordClass::Preposition,
		WordClass::IntransitiveVerb,
		WordClass::TransitiveVerb,
		WordClass::Conjunction,
		WordClass::ArticleSingular,
		WordClass::ArticlePlural,
	];

	/// The class name as it appears in vocabulary files.
	pub fn as_str(self) -> &'static str {
		match self {
			WordClass::NounSingular => "noun_singular",
			WordClass::NounPlural => "noun_plural",
			WordClass::Adverb => "adverb",
			WordClass::Adjective => "adjective",
			WordClass::Preposition => "preposition",
			WordClass::IntransitiveVerb => "intransitive_verb",
			WordClass::TransitiveVerb => "transitive_verb",
			WordClass::Conjunction => "conjunction",
			WordClass::ArticleSingular => "article_singular",
			WordClass::ArticlePlural => "article_plural",
		}
	}
}

/// A fixed table of weighted words grouped by grammatical class.
///
/// Loaded once, read-only afterwards: the grammar only ever draws from it.
/// Each class holds an ordered list of tokens; repeated entries are the
/// dataset's way of weighting common words more heavily under the uniform
/// draw in `pick`.
///
/// # Responsibilities
/// - Parse and validate vocabulary JSON
/// - Load vocabulary files with a compact binary cache for fast reloads
/// - Supply uniformly drawn tokens per class
///
/// # Invariants
/// - Every class holds at least one token
/// - No class contains the comma marker (commas are structural, not words)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Vocabulary {
	noun_singular: Vec<Token>,
	noun_plural: Vec<Token>,
	adverb: Vec<Token>,
	adjective: Vec<Token>,
	preposition: Vec<Token>,
	intransitive_verb: Vec<Token>,
	transitive_verb: Vec<Token>,
	conjunction: Vec<Token>,
	article_singular: Vec<Token>,
	article_plural: Vec<Token>,
}

impl Vocabulary {
	/// Parses a vocabulary from a JSON string and validates it.
	///
	/// The expected shape is one object keyed by class name, each class an
	/// ordered array of `{"word": ..., "weight": ...}` entries.
	///
	/// # Errors
	/// Returns an error on malformed JSON, a missing or empty class, or a
	/// comma marker smuggled in as a vocabulary entry.
	pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
		let vocabulary: Vocabulary = serde_json::from_str(json)?;
		vocabulary.validate()?;
		Ok(vocabulary)
	}

	/// Loads a vocabulary from a `.json` file, using a binary cache.
	///
	/// - If a `.bin` file exists next to the input, it is read directly
	///   (postcard deserialization, no JSON parsing).
	/// - Otherwise the JSON is parsed and the `.bin` cache is written for
	///   future fast loading.
	///
	/// # Errors
	/// Returns an error on file I/O failure, malformed data, or a
	/// vocabulary that fails validation.
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self, Box<dyn std::error::Error>> {
		let binary_data_path = build_output_path(&filepath, "bin")?;
		let vocabulary: Vocabulary = if binary_data_path.exists() {
			let bytes = std::fs::read(binary_data_path)?;
			postcard::from_bytes(&bytes)?
		} else {
			let vocabulary: Vocabulary = serde_json::from_str(&read_file(&filepath)?)?;
			let bytes = postcard::to_stdvec(&vocabulary)?;
			std::fs::write(binary_data_path, bytes)?;
			vocabulary
		};
		vocabulary.validate()?;
		Ok(vocabulary)
	}

	/// Returns the tokens of a class, in file order.
	pub fn entries(&self, class: WordClass) -> &[Token] {
		match class {
			WordClass::NounSingular => &self.noun_singular,
			WordClass::NounPlural => &self.noun_plural,
			WordClass::Adverb => &self.adverb,
			WordClass::Adjective => &self.adjective,
			WordClass::Preposition => &self.preposition,
			WordClass::IntransitiveVerb => &self.intransitive_verb,
			WordClass::TransitiveVerb => &self.transitive_verb,
			WordClass::Conjunction => &self.conjunction,
			WordClass::ArticleSingular => &self.article_singular,
			WordClass::ArticlePlural => &self.article_plural,
		}
	}

	/// Draws one token of a class, uniformly by index.
	///
	/// Repeated dataset entries therefore weight their word proportionally.
	/// Validation guarantees every class is non-empty, so the draw always
	/// succeeds.
	pub fn pick(&self, class: WordClass, rng: &mut impl Rng) -> Token {
		let entries = self.entries(class);
		entries[rng.random_range(0..entries.len())].clone()
	}

	/// Checks the vocabulary invariants.
	fn validate(&self) -> Result<(), String> {
		for class in WordClass::ALL {
			let entries = self.entries(class);
			if entries.is_empty() {
				return Err(format!("Vocabulary class '{}' is empty", class.as_str()));
			}
			if entries.iter().any(Token::is_comma) {
				return Err(format!(
					"Vocabulary class '{}' contains a comma marker",
					class.as_str()
				));
			}
		}
		Ok(())
	}
}

/// Loads the built-in English vocabulary embedded at compile time.
///
/// Panics only if the embedded `data/vocabulary.json` is malformed, which
/// cannot happen in a released build.
pub fn default_vocabulary() -> Vocabulary {
	let json = include_str!("../../data/vocabulary.json");
	Vocabulary::from_json(json).expect("embedded vocabulary.json is malformed")
}
