use std::fmt;

/// Errors surfaced by training and generation.
///
/// All of these are local, pre-generation or generation-time validation
/// failures. They are surfaced immediately to the caller and never
/// retried; no partial output is recovered.
#[derive(Clone, Debug, PartialEq)]
pub enum ChatError {
	/// The token sequence given to the builder was empty. Rejected up
	/// front: an empty corpus leaves no valid seed for generation.
	EmptyInput,
	/// A configuration or generation parameter is out of range.
	InvalidParameter(String),
	/// A sample was attempted from a context absent from the table.
	/// Unreachable for tables built by `ModelBuilder` from a
	/// stopper-terminated corpus; indicates a builder/generator
	/// inconsistency otherwise.
	MissingContext(String),
	/// Generation sampled this many tokens without terminating while a
	/// token budget was set.
	BudgetExhausted(usize),
}

impl fmt::Display for ChatError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ChatError::EmptyInput => write!(f, "Empty input: no tokens to train on"),
			ChatError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
			ChatError::MissingContext(context) => write!(f, "No followers for context '{}'", context),
			ChatError::BudgetExhausted(sampled) => {
				write!(f, "Generation did not terminate within {} tokens", sampled)
			}
		}
	}
}

impl std::error::Error for ChatError {}
