use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_chat_core::model::chat_input::ChatInput;
use rs_chat_core::model::error::ChatError;
use rs_chat_core::model::follower_table::ModelBuilder;
use rs_chat_core::model::generator::{ContextLevel, Generator};
use rs_chat_core::model::token::Token;
use rs_chat_core::tokenizer::{TokenConfig, Tokenizer};

const CORPUS: &str = "the quick brown fox jumps over the lazy dog . \
	the dog barks at the fox ! the fox runs away . \
	does the dog chase the fox ? the fox hides in the bushes . \
	the dog gives up and sleeps . the fox comes back at night .";

fn word(text: &str) -> Token {
	Token::word(text)
}

fn generator(text: &str) -> Generator {
	let tokens = Tokenizer::default().tokenize(text);
	let builder = ModelBuilder::new(TokenConfig::default()).unwrap();
	Generator::new(builder.train(&tokens).unwrap())
}

#[cfg(test)]
mod resolve_tests {
	use super::*;

	#[test]
	fn test_stopper_resolves_to_sentence_start() {
		let generator = generator("the cat sat . the cat ran .");

		let (level, followers) = generator
			.resolve(&Token::Stopper('.'), Some(&word("sat")))
			.unwrap();
		assert_eq!(level, ContextLevel::SentenceStart);
		// Sentence-start entry: the seeded first word plus every word
		// observed right after a '.'
		assert_eq!(followers, &[word("the"), word("the")][..]);
	}

	#[test]
	fn test_informative_bigram_is_preferred() {
		// ("the cat") was observed twice with different followers
		let generator = generator("the cat sat . the cat ran .");

		let (level, followers) = generator.resolve(&word("cat"), Some(&word("the"))).unwrap();
		assert_eq!(level, ContextLevel::Bigram);
		assert_eq!(followers, &[word("sat"), word("ran")][..]);
	}

	#[test]
	fn test_single_follower_bigram_falls_back_to_unigram() {
		// ("the cat") was observed once: one follower is uninformative,
		// so the unigram entry for "cat" is used instead
		let generator = generator("the cat sat . cat ran .");

		let (level, followers) = generator.resolve(&word("cat"), Some(&word("the"))).unwrap();
		assert_eq!(level, ContextLevel::Unigram);
		assert_eq!(followers, &[word("sat"), word("ran")][..]);
	}

	#[test]
	fn test_missing_bigram_falls_back_to_unigram() {
		let generator = generator("the cat sat . the cat ran .");

		let (level, _) = generator.resolve(&word("cat"), Some(&word("ran"))).unwrap();
		assert_eq!(level, ContextLevel::Unigram);
	}

	#[test]
	fn test_absent_prev_falls_back_to_unigram() {
		let generator = generator("the cat sat . the cat ran .");

		let (level, _) = generator.resolve(&word("cat"), None).unwrap();
		assert_eq!(level, ContextLevel::Unigram);
	}

	#[test]
	fn test_unknown_word_is_a_missing_context() {
		let generator = generator("the cat sat .");

		assert!(matches!(
			generator.resolve(&word("dog"), None),
			Err(ChatError::MissingContext(_))
		));
	}
}

#[cfg(test)]
mod chat_tests {
	use super::*;

	#[test]
	fn test_terminates_once_enough_lines_are_complete() {
		// Every follower list is a singleton, so the walk is fully
		// deterministic: . -> a -> b -> . with a width of 1 wraps after
		// every word and puts the final stopper on its own line
		let generator = generator("a b .");
		let input = ChatInput::new(3, 1).unwrap();

		let output = generator
			.chat_with(&input, &mut StdRng::seed_from_u64(0))
			.unwrap();
		assert_eq!(output, "a \nb \n.\n");
		assert_eq!(output.matches('\n').count(), 3);
	}

	#[test]
	fn test_stopper_is_never_preceded_by_a_space() {
		let generator = generator(CORPUS);
		let mut input = ChatInput::new(3, 20).unwrap();
		input.max_tokens = Some(100_000);

		let output = generator
			.chat_with(&input, &mut StdRng::seed_from_u64(42))
			.unwrap();
		for stopper in ['.', '!', '?'] {
			assert!(!output.contains(&format!(" {}", stopper)));
		}
	}

	#[test]
	fn test_stopper_opening_a_line_sits_alone_on_it() {
		let generator = generator(CORPUS);
		let mut input = ChatInput::new(5, 10).unwrap();
		input.max_tokens = Some(100_000);

		let output = generator
			.chat_with(&input, &mut StdRng::seed_from_u64(7))
			.unwrap();
		for line in output.split('\n') {
			if line.starts_with(['.', '!', '?']) {
				assert_eq!(line.chars().count(), 1, "line {:?}", line);
			}
		}
	}

	#[test]
	fn test_line_width_is_a_soft_cap() {
		let generator = generator(CORPUS);
		let mut input = ChatInput::new(4, 10).unwrap();
		input.max_tokens = Some(100_000);

		let longest = Tokenizer::default()
			.tokenize(CORPUS)
			.iter()
			.map(Token::width)
			.max()
			.unwrap();

		let output = generator
			.chat_with(&input, &mut StdRng::seed_from_u64(11))
			.unwrap();
		let lines: Vec<&str> = output.split('\n').collect();
		// A complete line overshoots the width by at most the token that
		// tripped the check plus its separating space
		for line in &lines[..lines.len() - 1] {
			assert!(line.chars().count() <= 10 + longest + 1, "line {:?}", line);
		}
	}

	#[test]
	fn test_identical_seeds_give_identical_chats() {
		let generator = generator(CORPUS);
		let mut input = ChatInput::new(5, 30).unwrap();
		input.max_tokens = Some(100_000);

		let first = generator
			.chat_with(&input, &mut StdRng::seed_from_u64(1234))
			.unwrap();
		let second = generator
			.chat_with(&input, &mut StdRng::seed_from_u64(1234))
			.unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn test_budget_exhausted_when_no_stopper_is_reachable() {
		// "a" and "b" only ever follow each other; no stopper is ever
		// sampled, so an unbounded run would never terminate
		let generator = generator("a b a");
		let mut input = ChatInput::new(1, 10).unwrap();
		input.max_tokens = Some(32);

		let result = generator.chat_with(&input, &mut StdRng::seed_from_u64(5));
		assert_eq!(result, Err(ChatError::BudgetExhausted(32)));
	}
}

#[cfg(test)]
mod chat_input_tests {
	use super::*;

	#[test]
	fn test_defaults_match_the_console_usage() {
		let input = ChatInput::default();
		assert_eq!(input.line_count(), 30);
		assert_eq!(input.line_width(), 70);
		assert_eq!(input.max_tokens, None);
	}

	#[test]
	fn test_zero_parameters_are_rejected() {
		assert!(matches!(
			ChatInput::new(0, 70),
			Err(ChatError::InvalidParameter(_))
		));
		let mut input = ChatInput::default();
		assert!(input.set_line_width(0).is_err());
		assert!(input.set_line_count(0).is_err());
	}
}
