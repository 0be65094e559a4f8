//! Top-level module for the haiku generation system.
//!
//! This crate provides a syllable-exact constrained text generator,
//! including:
//! - Weighted tokens and streams (`Stream`)
//! - The fixed word table (`Vocabulary`)
//! - A probabilistic phrase grammar with rejection sampling (`Grammar`)
//! - Generation parameters (`GenerationInput`)
//! - A high-level assembly interface (`HaikuMaker`)

/// High-level interface for assembling haikus.
///
/// Exposes vocabulary loading, generation parameter creation, and the
/// three structural haiku shapes.
pub mod haiku_maker;

/// Phrase productions: noun clause, conjunction clause, and the
/// exact-weight sentence built by rejection sampling.
pub mod grammar;

/// The fixed table of weighted words grouped by grammatical class.
///
/// Handles JSON parsing, validation, binary-cached file loading, and
/// uniform draws.
pub mod vocabulary;

/// Weighted tokens and the ordered, appendable, splittable token stream.
///
/// Tracks a running weight total and renders to prose with comma-aware
/// spacing.
pub mod stream;

/// Generation parameter structure.
///
/// Stores the structural event probabilities and the rejection-sampling
/// attempt cap. Constructed through `HaikuMaker`.
pub mod generation_input;
