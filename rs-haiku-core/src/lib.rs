//! Haiku text generation library.
//!
//! This crate procedurally generates haiku-structured English text:
//! three lines whose syllable counts follow a fixed pattern. It provides:
//! - Weighted token streams with exact-weight splitting
//! - A fixed vocabulary of words tagged by class and syllable count
//! - A probabilistic phrase grammar with rejection sampling
//! - A top-level assembler choosing between the structural shapes
//!
//! Generation is synchronous and free of shared mutable state: the
//! vocabulary is immutable after load and every random decision draws
//! from a caller-supplied generator, so seeded runs are reproducible.

/// Core stream, vocabulary, grammar, and assembly logic.
pub mod model;

/// I/O utilities (file loading, path helpers, directory listing).
pub mod io;
