use super::token::{Context, Token};

/// Represents a state in the follower table.
///
/// A `State` corresponds to a fixed context (`key`) and stores all
/// tokens observed to follow this context during training, in order and
/// with repeats preserved.
///
/// Conceptually, this is a node in a Markov chain. Frequency is encoded
/// by repetition rather than by occurrence counts, so sampling uniformly
/// over the list is already frequency-weighted.
///
/// ## Invariants
/// - All followers belong to the same `key`
/// - The follower list is never empty once the state is in a table
#[derive(Clone, Debug, PartialEq)]
pub struct State {
	/// Identifier of the state (unigram or bigram context).
	key: Context,
	/// Tokens observed to follow `key`, in training order, repeats kept.
	followers: Vec<Token>,
}

impl State {
	/// Creates a new empty state for the given context.
	pub fn new(key: Context) -> Self {
		Self {
			key,
			followers: Vec::new(),
		}
	}

	/// Records an observation of `next` following this state's context.
	///
	/// Repeated observations are appended again rather than counted.
	pub fn add_follower(&mut self, next: Token) {
		self.followers.push(next);
	}

	/// The ordered follower list.
	pub fn followers(&self) -> &[Token] {
		&self.followers
	}
}
