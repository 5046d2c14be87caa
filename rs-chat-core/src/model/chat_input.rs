use super::error::ChatError;

/// Input parameters for generating a chat.
///
/// `ChatInput` contains the stopping and layout parameters of a
/// generation run: the minimum number of completed lines before a
/// stopper may end the run, the soft per-line character width, and an
/// optional safety budget on sampled tokens.
///
/// # Invariants
/// - `line_count` and `line_width` are always strictly positive
pub struct ChatInput {
	/// Minimum number of completed lines before stopping may trigger.
	line_count: usize,

	/// Soft cap on characters per line, separating spaces included.
	/// A line may overshoot by the width of the token that tripped the
	/// check; the cap is "at least", not "exactly".
	line_width: usize,

	/// Optional hard cap on sampled tokens. When set, a run that has not
	/// terminated after this many samples fails with
	/// [`ChatError::BudgetExhausted`] instead of looping forever. `None`
	/// leaves the run unbounded.
	pub max_tokens: Option<usize>,
}

impl ChatInput {
	/// Creates a parameter set with the given line count and width.
	///
	/// # Errors
	/// Returns an error if either value is zero.
	pub fn new(line_count: usize, line_width: usize) -> Result<Self, ChatError> {
		let mut input = Self::default();
		input.set_line_count(line_count)?;
		input.set_line_width(line_width)?;
		Ok(input)
	}

	/// Returns the target line count.
	pub fn line_count(&self) -> usize {
		self.line_count
	}

	/// Returns the soft line width.
	pub fn line_width(&self) -> usize {
		self.line_width
	}

	/// Sets the minimum number of completed lines (must be >= 1).
	///
	/// # Errors
	/// Returns an error if `line_count` is zero.
	pub fn set_line_count(&mut self, line_count: usize) -> Result<(), ChatError> {
		if line_count == 0 {
			return Err(ChatError::InvalidParameter("line count must be >= 1".to_owned()));
		}
		self.line_count = line_count;
		Ok(())
	}

	/// Sets the soft per-line width in characters (must be >= 1).
	///
	/// # Errors
	/// Returns an error if `line_width` is zero.
	pub fn set_line_width(&mut self, line_width: usize) -> Result<(), ChatError> {
		if line_width == 0 {
			return Err(ChatError::InvalidParameter("line width must be >= 1".to_owned()));
		}
		self.line_width = line_width;
		Ok(())
	}
}

impl Default for ChatInput {
	/// 30 lines wrapped at 70 columns, no token budget.
	fn default() -> Self {
		Self {
			line_count: 30,
			line_width: 70,
			max_tokens: None,
		}
	}
}
