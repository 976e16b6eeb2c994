//! DEO Prompt
//!
//! Renders a [`DomainGenerationContext`](deo_model::DomainGenerationContext)
//! into the request text sent to the generation backend.
//!
//! The request always has the same block order:
//!
//! ```text
//! persona preamble → language directive → project framing → data blocks
//!   → target schema → writing guidelines → quality checklist → instruction
//! ```
//!
//! Every data block renders a fixed placeholder when its collection is
//! empty, so the request is well-formed for any context. Rendering is pure
//! and deterministic.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod assembler;
pub mod templates;

pub use assembler::{assemble_prompt, language_directive, PromptAssembler};
pub use templates::NO_DATA_PLACEHOLDER;
