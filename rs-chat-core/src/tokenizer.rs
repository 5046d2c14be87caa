use crate::model::token::Token;

/// Character sets driving tokenization and training.
///
/// An explicit configuration value rather than module-level constants,
/// so alternate token sets can be used deterministically (tests, other
/// punctuation conventions). The same value is handed to the
/// [`Tokenizer`] and to the model builder.
#[derive(Clone, Debug)]
pub struct TokenConfig {
	/// Sentence-terminating punctuation. Each occurrence becomes its own
	/// token; the first entry seeds generation.
	pub stoppers: Vec<char>,
	/// Characters treated purely as separators.
	pub whitespace: Vec<char>,
}

impl Default for TokenConfig {
	fn default() -> Self {
		Self {
			stoppers: vec!['.', '!', '?'],
			whitespace: vec![' ', '\n', '\r', '\t'],
		}
	}
}

/// Splits raw text into word and stopper tokens.
///
/// A single character-level pass: configured stopper characters are
/// split out as their own tokens, never merged with adjacent word
/// characters; configured whitespace separates words; every other run
/// of characters is simplified by [`simplify_word`] and discarded if
/// nothing survives.
pub struct Tokenizer {
	config: TokenConfig,
}

impl Tokenizer {
	/// Creates a tokenizer for the given configuration.
	pub fn new(config: TokenConfig) -> Self {
		Self { config }
	}

	/// The configuration this tokenizer splits with.
	pub fn config(&self) -> &TokenConfig {
		&self.config
	}

	/// Tokenizes raw text into an ordered word/stopper stream.
	pub fn tokenize(&self, text: &str) -> Vec<Token> {
		let mut tokens = Vec::new();
		let mut raw = String::new();

		for c in text.chars() {
			if self.config.stoppers.contains(&c) {
				Self::flush_word(&mut raw, &mut tokens);
				tokens.push(Token::Stopper(c));
			} else if self.config.whitespace.contains(&c) {
				Self::flush_word(&mut raw, &mut tokens);
			} else {
				raw.push(c);
			}
		}
		Self::flush_word(&mut raw, &mut tokens);

		tokens
	}

	/// Simplifies and appends the pending raw word, if anything remains
	/// of it.
	fn flush_word(raw: &mut String, tokens: &mut Vec<Token>) {
		if raw.is_empty() {
			return;
		}
		if let Some(word) = simplify_word(raw) {
			tokens.push(Token::Word(word));
		}
		raw.clear();
	}
}

impl Default for Tokenizer {
	fn default() -> Self {
		Self::new(TokenConfig::default())
	}
}

/// Returns the given raw word reduced to lowercase letters and
/// apostrophes, or `None` if nothing survives.
///
/// Uppercase ASCII letters are lowercased; every character that is not
/// a lowercase letter or an apostrophe after that is skipped. In normal
/// use this turns `"Ain't"` into `"ain't"` and `"it105%s"` into `"its"`.
/// Good enough for the spurious characters of free text corpora; it
/// also strips accented and non-Roman characters.
pub fn simplify_word(raw: &str) -> Option<String> {
	let simplified: String = raw
		.chars()
		.map(|c| c.to_ascii_lowercase())
		.filter(|c| c.is_ascii_lowercase() || *c == '\'')
		.collect();

	if simplified.is_empty() {
		None
	} else {
		Some(simplified)
	}
}
