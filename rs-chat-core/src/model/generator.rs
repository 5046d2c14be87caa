use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::chat_input::ChatInput;
use super::error::ChatError;
use super::follower_table::FollowerTable;
use super::token::{Context, Token};

/// The context a sampling step resolved to, named for the table entry
/// consulted.
///
/// Fallback ordering during generation is bigram context first, then
/// unigram; a stopper always resolves to a sentence start. The variants
/// make that ordering observable without sampling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextLevel {
	/// The last token was a stopper: the unigram entry for that stopper
	/// was consulted, so the next token starts a new sentence.
	SentenceStart,
	/// The bigram context over the last two tokens was present and
	/// informative (two or more observed followers).
	Bigram,
	/// Fallback: the unigram entry for the last token. Taken when fewer
	/// than two tokens were generated, the bigram context is unknown, or
	/// it has a single observed follower (uninformative).
	Unigram,
}

/// Generates chats by walking a trained [`FollowerTable`].
///
/// # Responsibilities
/// - Resolve the sampling context for each step with an explicit,
///   testable fallback ordering (`resolve`)
/// - Sample followers uniformly (repetition in the table encodes
///   frequency) from an injectable random source
/// - Apply the emission policy: stopper spacing, soft line wrapping and
///   the line-count termination rule
#[derive(Clone, Debug)]
pub struct Generator {
	table: FollowerTable,
}

impl Generator {
	/// Creates a generator over a trained table.
	pub fn new(table: FollowerTable) -> Self {
		Self { table }
	}

	/// The table this generator samples from.
	pub fn table(&self) -> &FollowerTable {
		&self.table
	}

	/// Resolves the follower collection to sample from, given the most
	/// recently generated token and the one before it.
	///
	/// Pure lookup, no sampling and no side effects:
	/// - a stopper `last` resolves to its unigram entry
	///   ([`ContextLevel::SentenceStart`]);
	/// - otherwise the bigram context `(prev, last)` is used when present
	///   with at least two followers ([`ContextLevel::Bigram`]);
	/// - otherwise the unigram entry for `last`
	///   ([`ContextLevel::Unigram`]).
	///
	/// # Errors
	/// Returns [`ChatError::MissingContext`] if the resolved context has
	/// no entry. For tables built from a stopper-terminated corpus this
	/// is unreachable; a corpus whose final token occurs nowhere else
	/// can surface it.
	pub fn resolve(&self, last: &Token, prev: Option<&Token>) -> Result<(ContextLevel, &[Token]), ChatError> {
		if last.is_stopper() {
			let context = Context::Unigram(last.clone());
			let followers = self
				.table
				.followers(&context)
				.ok_or_else(|| ChatError::MissingContext(context.to_string()))?;
			return Ok((ContextLevel::SentenceStart, followers));
		}

		if let Some(prev) = prev {
			let context = Context::Bigram(prev.clone(), last.clone());
			if let Some(followers) = self.table.followers(&context) {
				// A single observed follower is uninformative: fall back
				// to the unigram distribution instead of repeating it.
				if followers.len() >= 2 {
					return Ok((ContextLevel::Bigram, followers));
				}
			}
		}

		let context = Context::Unigram(last.clone());
		let followers = self
			.table
			.followers(&context)
			.ok_or_else(|| ChatError::MissingContext(context.to_string()))?;
		Ok((ContextLevel::Unigram, followers))
	}

	/// Generates a chat using the process-wide random generator.
	///
	/// # Errors
	/// See [`Generator::chat_with`].
	pub fn chat(&self, input: &ChatInput) -> Result<String, ChatError> {
		self.chat_with(input, &mut rand::rng())
	}

	/// Generates a chat, drawing randomness from `rng`.
	///
	/// The history is seeded with the table's canonical stopper, so the
	/// first sample always starts a sentence. Each step resolves a
	/// context, samples a follower and emits it:
	/// - a stopper is never preceded by a space; a stopper opening an
	///   otherwise empty line sits alone on it;
	/// - a word is emitted with a trailing separating space;
	/// - once the current line reaches `line_width` characters a line
	///   break is emitted. The width is a soft cap: a line may overshoot
	///   by the width of the token that tripped the check.
	///
	/// The run stops immediately after a sampled stopper once at least
	/// `line_count` lines are complete. Words never terminate the run.
	///
	/// # Errors
	/// - [`ChatError::BudgetExhausted`] if `input.max_tokens` is set and
	///   the run samples that many tokens without terminating.
	/// - [`ChatError::MissingContext`] on a table that violates the
	///   builder's invariants (see [`Generator::resolve`]).
	pub fn chat_with<R: Rng>(&self, input: &ChatInput, rng: &mut R) -> Result<String, ChatError> {
		let mut history: Vec<Token> = vec![self.table.seed_stopper()];
		let mut output = String::new();
		let mut line_length = 0usize;
		let mut completed_lines = 1usize;
		let mut sampled = 0usize;

		loop {
			let last = &history[history.len() - 1];
			let prev = if history.len() >= 2 { Some(&history[history.len() - 2]) } else { None };

			let (_, followers) = self.resolve(last, prev)?;
			let next = followers
				.choose(rng)
				.cloned()
				.ok_or_else(|| ChatError::MissingContext(last.to_string()))?;

			match &next {
				Token::Stopper(stopper) => {
					// A stopper is never preceded by a separating space
					if output.ends_with(' ') {
						output.pop();
						line_length = line_length.saturating_sub(1);
					}
					if line_length == 0 {
						// Stopper opening a line sits alone on it
						output.push(*stopper);
						output.push('\n');
						completed_lines += 1;
					} else {
						output.push(*stopper);
						output.push(' ');
						line_length += next.width() + 1;
					}
				}
				Token::Word(word) => {
					output.push_str(word);
					output.push(' ');
					line_length += next.width() + 1;
				}
			}

			if line_length >= input.line_width() {
				output.push('\n');
				line_length = 0;
				completed_lines += 1;
			}

			let terminal = next.is_stopper();
			sampled += 1;
			history.push(next);

			if terminal && completed_lines >= input.line_count() {
				break;
			}
			if let Some(max_tokens) = input.max_tokens {
				if sampled >= max_tokens {
					return Err(ChatError::BudgetExhausted(sampled));
				}
			}
		}

		debug!("generated {} tokens over {} lines", sampled, completed_lines);
		Ok(output)
	}
}
