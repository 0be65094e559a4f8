use serde::{Deserialize, Serialize};

/// A single word carrying its syllable weight.
///
/// Tokens are immutable once built: deriving a new word form (such as the
/// singular verb "s" suffix) produces a new token instead of mutating the
/// original. The comma marker is a special token with weight 0 and word ","
/// that renders attached to the previous word.
///
/// # Invariants
/// - `word` and `weight` never change after construction
/// - A derived token keeps the weight of the token it was derived from
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Token {
	/// The rendered text of the token.
	word: String,
	/// Syllable count contributed to the containing stream.
	weight: usize,
}

/// Word used by the comma marker token.
const COMMA: &str = ",";

impl Token {
	/// Creates a token from a word and its syllable weight.
	pub fn new(word: &str, weight: usize) -> Self {
		Self { word: word.to_owned(), weight }
	}

	/// Creates the zero-weight comma marker.
	pub fn comma() -> Self {
		Self::new(COMMA, 0)
	}

	/// Derives a new token with `suffix` appended to the word.
	///
	/// The weight is carried over unchanged: the derived "s" verb form is
	/// assumed not to add a syllable.
	pub fn with_suffix(&self, suffix: &str) -> Self {
		Self { word: format!("{}{}", self.word, suffix), weight: self.weight }
	}

	/// Returns true if this token is the comma marker.
	pub fn is_comma(&self) -> bool {
		self.word == COMMA
	}

	/// Returns the token text.
	pub fn word(&self) -> &str {
		&self.word
	}

	/// Returns the syllable weight.
	pub fn weight(&self) -> usize {
		self.weight
	}
}

/// An ordered sequence of tokens with a running weight total.
///
/// The stream is the sentence being built: the grammar appends tokens and
/// whole sub-streams to it, the assembler splits it at exact syllable
/// boundaries, and `render` turns it into prose.
///
/// # Responsibilities
/// - Maintain the cached total weight on every mutation
/// - Render tokens to text with comma-aware spacing
/// - Split at an exact cumulative weight, keeping commas with the head
///
/// # Invariants
/// - `weight` always equals the sum of all member token weights
/// - Duplicating a stream yields a fully independent copy
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Stream {
	/// Cached sum of all member token weights.
	weight: usize,
	/// Member tokens, in sentence order.
	tokens: Vec<Token>,
}

impl Stream {
	/// Creates an empty stream.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a token, adding its weight to the total.
	pub fn add_token(&mut self, token: Token) {
		self.weight += token.weight;
		self.tokens.push(token);
	}

	/// Appends the comma marker.
	pub fn add_comma(&mut self) {
		self.add_token(Token::comma());
	}

	/// Concatenates another stream's tokens onto this one, summing weights.
	///
	/// # Errors
	/// Returns an error if `other` is not a valid stream, i.e. its cached
	/// weight disagrees with the sum of its token weights. Streams built
	/// through this module always hold the invariant; a broken one can only
	/// come in through deserialized data, and indicates a caller bug.
	pub fn append(&mut self, other: &Stream) -> Result<(), String> {
		if !other.is_consistent() {
			return Err(format!(
				"Invalid stream: cached weight {} does not match token weight sum {}",
				other.weight,
				other.token_weight_sum()
			));
		}
		self.concat(other);
		Ok(())
	}

	/// Concatenation without the consistency check, for streams this crate
	/// built itself.
	pub(crate) fn concat(&mut self, other: &Stream) {
		self.weight += other.weight;
		self.tokens.extend(other.tokens.iter().cloned());
	}

	/// Returns a deep, independent copy.
	///
	/// Mutations of the copy never affect the original.
	pub fn duplicate(&self) -> Self {
		self.clone()
	}

	/// Returns the total syllable weight.
	pub fn weight(&self) -> usize {
		self.weight
	}

	/// Returns the member tokens in order.
	pub fn tokens(&self) -> &[Token] {
		&self.tokens
	}

	/// Returns true if the stream holds no tokens.
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Renders the stream as prose.
	///
	/// A single space separates adjacent rendered tokens, except before a
	/// comma marker, which sits against the previous word. Zero-length
	/// words (the no-op adverb filler) render as nothing at all, so they
	/// never introduce a stray space.
	pub fn render(&self) -> String {
		let mut text = String::new();
		for token in &self.tokens {
			if token.word.is_empty() {
				continue;
			}
			if !text.is_empty() && !token.is_comma() {
				text.push(' ');
			}
			text.push_str(&token.word);
		}
		text
	}

	/// Attempts to split the stream at an exact cumulative weight.
	///
	/// Scans tokens left to right accumulating weight. If the accumulation
	/// reaches exactly `point` at some token, the stream is cut there:
	/// head = tokens up to and including it, tail = the rest. If the
	/// accumulation jumps past `point` without landing on it, no token
	/// boundary matches and the split fails.
	///
	/// A comma marker sitting right after the cut moves into the head:
	/// the comma belongs grammatically to the clause it follows.
	///
	/// # Returns
	/// - `Some((head, tail))` with `head.weight() == point` and
	///   `head.weight() + tail.weight() == self.weight()`
	/// - `None` if no token boundary sums exactly to `point`
	pub fn try_split(&self, point: usize) -> Option<(Stream, Stream)> {
		let mut cumulated = 0;
		for (index, token) in self.tokens.iter().enumerate() {
			cumulated += token.weight;
			if cumulated > point {
				return None;
			}
			if cumulated == point {
				let mut head = Stream::new();
				for token in &self.tokens[..=index] {
					head.add_token(token.clone());
				}
				let mut rest = index + 1;
				// Commas attach to the head clause
				if self.tokens.get(rest).is_some_and(Token::is_comma) {
					head.add_comma();
					rest += 1;
				}
				let mut tail = Stream::new();
				for token in &self.tokens[rest..] {
					tail.add_token(token.clone());
				}
				return Some((head, tail));
			}
		}
		None
	}

	/// True if the cached weight matches the actual token weight sum.
	fn is_consistent(&self) -> bool {
		self.weight == self.token_weight_sum()
	}

	fn token_weight_sum(&self) -> usize {
		self.tokens.iter().map(|token| token.weight).sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn stream_of(words: &[(&str, usize)]) -> Stream {
		let mut stream = Stream::new();
		for (word, weight) in words {
			stream.add_token(Token::new(word, *weight));
		}
		stream
	}

	#[test]
	fn test_weight_tracks_added_tokens() {
		let mut stream = Stream::new();
		assert_eq!(stream.weight(), 0);

		stream.add_token(Token::new("schema", 2));
		stream.add_token(Token::new("flow", 1));
		stream.add_comma();
		stream.add_token(Token::new("relation", 3));

		assert_eq!(stream.weight(), 6);
		assert_eq!(stream.tokens().len(), 4);
	}

	#[test]
	fn test_append_sums_weights() {
		let mut first = stream_of(&[("the", 1), ("data", 1)]);
		let second = stream_of(&[("flows", 1), ("quickly", 2)]);

		first.append(&second).unwrap();

		assert_eq!(first.weight(), 5);
		assert_eq!(first.tokens().len(), 4);
		// The appended stream is untouched
		assert_eq!(second.weight(), 3);
		assert_eq!(second.tokens().len(), 2);
	}

	#[test]
	fn test_append_rejects_inconsistent_stream() {
		// The only way to hold a broken stream is deserialized data
		let broken: Stream =
			serde_json::from_str(r#"{"weight": 9, "tokens": [{"word": "flow", "weight": 1}]}"#)
				.unwrap();

		let mut stream = stream_of(&[("the", 1)]);
		let error = stream.append(&broken).unwrap_err();

		assert!(error.contains("Invalid stream"), "unexpected error: {error}");
		// The target stream is left unchanged on failure
		assert_eq!(stream.weight(), 1);
		assert_eq!(stream.tokens().len(), 1);
	}

	#[test]
	fn test_render_spacing() {
		let stream = stream_of(&[("the", 1), ("data", 1), ("flows", 1)]);
		assert_eq!(stream.render(), "the data flows");
	}

	#[test]
	fn test_render_comma_has_no_leading_space() {
		let mut stream = stream_of(&[("data", 1)]);
		stream.add_comma();
		stream.add_token(Token::new("insight", 2));
		assert_eq!(stream.render(), "data, insight");
	}

	#[test]
	fn test_render_skips_empty_words() {
		let stream = stream_of(&[("", 0), ("the", 1), ("", 0), ("wind", 1), ("", 0)]);
		assert_eq!(stream.render(), "the wind");
	}

	#[test]
	fn test_render_empty_stream() {
		assert_eq!(Stream::new().render(), "");
	}

	#[test]
	fn test_duplicate_is_independent() {
		let original = stream_of(&[("the", 1), ("mountain", 2)]);
		let mut copy = original.duplicate();

		assert_eq!(copy.render(), original.render());
		assert_eq!(copy.weight(), original.weight());

		copy.add_token(Token::new("shines", 1));

		assert_eq!(original.render(), "the mountain");
		assert_eq!(original.weight(), 3);
		assert_eq!(copy.weight(), 4);
	}

	#[test]
	fn test_try_split_at_exact_boundary() {
		let stream = stream_of(&[("the", 1), ("peaceful", 2), ("lake", 1), ("shines", 1)]);

		let (head, tail) = stream.try_split(4).unwrap();

		assert_eq!(head.weight(), 4);
		assert_eq!(tail.weight(), 1);
		assert_eq!(head.weight() + tail.weight(), stream.weight());
		assert_eq!(head.render(), "the peaceful lake");
		assert_eq!(tail.render(), "shines");
	}

	#[test]
	fn test_try_split_no_matching_boundary() {
		let stream = stream_of(&[("schema", 2), ("relation", 3)]);
		// Cumulative weights are 2 and 5, so 4 is unreachable
		assert!(stream.try_split(4).is_none());
	}

	#[test]
	fn test_try_split_moves_comma_into_head() {
		let mut stream = stream_of(&[("clouds", 1), ("grow", 1)]);
		stream.add_comma();
		stream.append(&stream_of(&[("and", 1), ("rain", 1)])).unwrap();

		let (head, tail) = stream.try_split(2).unwrap();

		assert_eq!(head.render(), "clouds grow,");
		assert_eq!(tail.render(), "and rain");
		assert!(head.tokens().last().unwrap().is_comma());
		assert_eq!(head.weight(), 2);
		assert_eq!(tail.weight(), 2);
	}

	#[test]
	fn test_try_split_full_weight_leaves_empty_tail() {
		let stream = stream_of(&[("wind", 1), ("turns", 1)]);

		let (head, tail) = stream.try_split(2).unwrap();

		assert_eq!(head.weight(), 2);
		assert!(tail.is_empty());
		assert_eq!(tail.weight(), 0);
	}

	#[test]
	fn test_try_split_zero_point() {
		// Without a leading zero-weight token there is no boundary at 0
		let stream = stream_of(&[("wind", 1)]);
		assert!(stream.try_split(0).is_none());

		// A leading zero-weight token makes a boundary at 0
		let padded = stream_of(&[("", 0), ("wind", 1)]);
		let (head, tail) = padded.try_split(0).unwrap();
		assert_eq!(head.weight(), 0);
		assert_eq!(tail.render(), "wind");
	}

	#[test]
	fn test_weight_invariant_over_random_operations() {
		use rand::Rng;
		use rand::SeedableRng;
		use rand::rngs::StdRng;

		let mut rng = StdRng::seed_from_u64(17);
		let mut stream = Stream::new();
		let mut expected = 0;

		for _ in 0..500 {
			match rng.random_range(0..4) {
				0 => {
					let weight = rng.random_range(0..4);
					stream.add_token(Token::new("word", weight));
					expected += weight;
				}
				1 => {
					stream.add_comma();
				}
				2 => {
					let mut other = Stream::new();
					for _ in 0..rng.random_range(0..3) {
						let weight = rng.random_range(0..4);
						other.add_token(Token::new("other", weight));
						expected += weight;
					}
					stream.append(&other).unwrap();
				}
				_ => {
					// A duplicate carries the same total and stays in sync
					let copy = stream.duplicate();
					assert_eq!(copy.weight(), stream.weight());
				}
			}

			let sum: usize = stream.tokens().iter().map(Token::weight).sum();
			assert_eq!(stream.weight(), sum);
			assert_eq!(stream.weight(), expected);
		}
	}

	#[test]
	fn test_derived_token_keeps_weight() {
		let verb = Token::new("flow", 1);
		let singular = verb.with_suffix("s");

		assert_eq!(singular.word(), "flows");
		assert_eq!(singular.weight(), 1);
		// The base token is untouched
		assert_eq!(verb.word(), "flow");
	}
}
