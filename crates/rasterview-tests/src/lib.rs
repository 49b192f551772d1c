//! Integration tests for rasterview crates.
//!
//! This crate contains end-to-end tests that exercise view chains built
//! from several modules and crates: transform views over crops and
//! edge-extended sources, iteration against indexing, sequential against
//! parallel fills, and transform failures propagating through a fill.
