use std::collections::HashMap;

use log::debug;

use super::error::ChatError;
use super::state::State;
use super::token::{Context, Token};
use crate::tokenizer::TokenConfig;

/// Builds a [`FollowerTable`] from a complete token sequence.
///
/// # Responsibilities
/// - Validate the token configuration (at least one stopper)
/// - Seed every stopper's unigram context with the first token, so
///   generation can start a sentence from any stopper kind
/// - Accumulate followers for every unigram and bigram context
///
/// # Invariants
/// - The stopper set is never empty
/// - Training is a pure function of the token sequence: repeated calls
///   produce identical tables
pub struct ModelBuilder {
	config: TokenConfig,
}

impl ModelBuilder {
	/// Creates a builder for the given token configuration.
	///
	/// # Errors
	/// Returns an error if no stopper is configured; the generator's
	/// seed and the sentence-start entries both depend on one.
	pub fn new(config: TokenConfig) -> Result<Self, ChatError> {
		if config.stoppers.is_empty() {
			return Err(ChatError::InvalidParameter("at least one stopper must be configured".to_owned()));
		}
		Ok(Self { config })
	}

	/// Trains a follower table from an ordered token sequence.
	///
	/// Three passes over the input:
	/// 1. The first token is recorded as a follower of every configured
	///    stopper's unigram context ("what starts a sentence").
	/// 2. For every adjacent pair, the second token is a follower of the
	///    first token's unigram context.
	/// 3. For every adjacent triple whose middle token is not a stopper,
	///    the third token is a follower of the leading pair's bigram
	///    context. A bigram context never straddles a sentence boundary
	///    at its second position.
	///
	/// # Errors
	/// Returns [`ChatError::EmptyInput`] on a zero-length sequence. A
	/// single-token sequence is degenerate but valid: only the
	/// sentence-start entries are produced.
	pub fn train(&self, tokens: &[Token]) -> Result<FollowerTable, ChatError> {
		let first = tokens.first().ok_or(ChatError::EmptyInput)?;

		let mut table = FollowerTable {
			stoppers: self.config.stoppers.clone(),
			states: HashMap::new(),
		};

		for stopper in &self.config.stoppers {
			table.add_follower(Context::Unigram(Token::Stopper(*stopper)), first.clone());
		}

		for pair in tokens.windows(2) {
			table.add_follower(Context::Unigram(pair[0].clone()), pair[1].clone());
		}

		for triple in tokens.windows(3) {
			if !triple[1].is_stopper() {
				table.add_follower(Context::Bigram(triple[0].clone(), triple[1].clone()), triple[2].clone());
			}
		}

		debug!("trained {} contexts from {} tokens", table.len(), tokens.len());
		Ok(table)
	}
}

/// Mapping from a unigram or bigram context to the ordered,
/// repetition-preserving list of tokens observed to follow it.
///
/// Built once by [`ModelBuilder::train`] from a complete token sequence,
/// read-only during a generation run. Keys exist only if at least one
/// follower was observed; no key maps to an empty list.
///
/// The table carries the stopper set it was trained with, so the
/// generator can derive its seed without re-supplying configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct FollowerTable {
	stoppers: Vec<char>,
	states: HashMap<Context, State>,
}

impl FollowerTable {
	/// Appends `follower` to the state for `key`, creating the state on
	/// first observation.
	fn add_follower(&mut self, key: Context, follower: Token) {
		let state = self.states.entry(key.clone()).or_insert_with(|| State::new(key));
		state.add_follower(follower);
	}

	/// Returns the ordered follower list for `context`, if the context
	/// was observed during training.
	pub fn followers(&self, context: &Context) -> Option<&[Token]> {
		self.states.get(context).map(State::followers)
	}

	/// Whether `context` was observed during training.
	pub fn contains(&self, context: &Context) -> bool {
		self.states.contains_key(context)
	}

	/// Iterates over all contexts observed during training.
	pub fn contexts(&self) -> impl Iterator<Item = &Context> {
		self.states.keys()
	}

	/// Number of contexts in the table.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	/// Whether the table has no contexts at all.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// The stopper set this table was trained with.
	pub fn stoppers(&self) -> &[char] {
		&self.stoppers
	}

	/// The canonical seed token: the first configured stopper. Its
	/// unigram entry always exists, so the first sampling step of a
	/// generation run always succeeds.
	pub fn seed_stopper(&self) -> Token {
		// Non-empty by ModelBuilder::new validation
		Token::Stopper(self.stoppers[0])
	}
}
