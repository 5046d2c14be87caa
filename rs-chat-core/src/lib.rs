//! Word-level Markov chat generation library.
//!
//! This crate turns free-form text into pseudo-text that mimics the
//! input's local word-order statistics. It provides:
//! - A word/stopper tokenizer with a configurable character set
//! - A follower table over unigram and bigram contexts (order-2 chain)
//! - Probabilistic chat generation with line wrapping and an optional
//!   token budget
//! - Internal utilities for I/O and path handling
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Core model types, training and generation logic.
///
/// This module exposes the high-level builder and generator interface
/// while keeping internal state representations private.
pub mod model;

/// Word/stopper tokenization of raw text.
///
/// Turns free-form text into the token stream the model consumes,
/// driven by an explicit [`tokenizer::TokenConfig`].
pub mod tokenizer;

/// I/O utilities (file loading, path helpers).
///
/// Thin helpers for the server and demo binaries; nothing here touches
/// the model itself.
pub mod io;
