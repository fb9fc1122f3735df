//! Core library for gre-extract
//!
//! This crate implements the **Functional Core** of the gre-extract
//! pipeline: pure transformation functions with zero I/O. The binary crate
//! (the Imperative Shell) reads page text out of the PDF and writes JSON
//! files; everything between those two edges lives here and is deterministic,
//! so every stage can be tested with string fixtures and no mocking.
//!
//! # Pipeline
//!
//! - [`outline`]: segment the document's bookmark outline into per-test page
//!   boundaries, and order a test's section boundaries.
//! - [`answer_key`]: recover a per-section answer table from the loosely
//!   formatted answer-key text.
//! - [`explanations`]: recover a per-section explanation table from the
//!   free-prose explanation block.
//! - [`passage`]: normalize extraction artifacts out of long-form passage
//!   and prompt text.
//! - [`questions`]: synthesize typed question records from positional
//!   classification rules and answer shape.
//! - [`format`]: the declarative description of the one supported book
//!   (section composition, time allotments, classification thresholds).
//! - [`assemble`]: compose Question -> Section -> MockTest records.
//! - [`model`]: the serde data model emitted to the consumer application.

use thiserror::Error;

pub mod answer_key;
pub mod assemble;
pub mod explanations;
pub mod format;
pub mod model;
pub mod outline;
pub mod passage;
pub mod questions;

/// Errors surfaced by the extraction pipeline.
///
/// Malformed answer-key or explanation lines are deliberately *not* errors:
/// the source text is noisy PDF extraction output, so unrecognized lines are
/// skipped silently by the parsers.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A test's outline lacks a boundary the pipeline cannot run without.
    /// Fatal for that single test only; the batch continues.
    #[error("Practice Test {test}: outline has no \"{missing}\" entry")]
    OutlineIncomplete { test: u32, missing: &'static str },

    /// A section label matched none of the known section kinds. The section
    /// is dropped from its test; the test itself still assembles.
    #[error("unrecognized section label: {0:?}")]
    SectionLabelUnrecognized(String),
}
