//! Top-level module for the chat generation system.
//!
//! This module provides a word-level order-2 Markov generator, including:
//! - Token and context value types (`Token`, `Context`)
//! - The trained follower table and its builder (`FollowerTable`, `ModelBuilder`)
//! - Internal state management (`State`)
//! - Generation parameters (`ChatInput`)
//! - A high-level generation interface (`Generator`)

/// High-level interface for generating chats from a trained follower table.
///
/// Exposes context resolution with explicit fallback ordering and
/// chat generation with injectable randomness.
pub mod generator;

/// The follower table and its builder.
///
/// Handles token-stream ingestion, follower accumulation per context,
/// and lookup during generation.
pub mod follower_table;

/// Token and context value types.
///
/// A token is either a simplified word or a stopper punctuation mark;
/// a context is the one- or two-token key the table is indexed by.
pub mod token;

/// Internal representation of a single table state (context).
///
/// Tracks the ordered list of observed followers. This module is not
/// exposed publicly.
mod state;

/// Generation parameter structure.
///
/// Stores the target line count, the soft line width and the optional
/// token budget, with range-validated setters.
pub mod chat_input;

/// Error type shared by training and generation.
pub mod error;
