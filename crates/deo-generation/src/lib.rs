//! DEO Generation
//!
//! The boundary to the external text-generation backend.
//!
//! - [`GenerationBackend`]: the seam; one call, prompt in, text blocks and
//!   usage out
//! - [`AnthropicBackend`]: Messages API implementation over `reqwest`
//! - [`recovery`]: finds the JSON object inside a free-form answer
//! - [`GenerationClient`]: one attempt per request, typed failures, metadata
//!
//! # Example
//!
//! ```rust,ignore
//! use deo_generation::{AnthropicBackend, GenerationClient, GenerationSettings};
//! use deo_model::SystemClock;
//! use std::sync::Arc;
//!
//! # async fn example(ctx: deo_model::DomainGenerationContext, prompt: String) -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(AnthropicBackend::from_env()?);
//! let client = GenerationClient::new(backend, Arc::new(SystemClock), GenerationSettings::default());
//! let content = client.generate(&prompt, &ctx).await?;
//! assert!(!content.is_fallback());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod anthropic;
pub mod backend;
pub mod client;
pub mod error;
pub mod recovery;

pub use anthropic::{AnthropicBackend, AnthropicConfig};
pub use backend::{
    CompletionRequest, CompletionResponse, ContentBlock, GenerationBackend, OfflineBackend,
};
pub use client::{GenerationClient, GenerationSettings};
pub use error::{BackendError, GenerationError};
pub use recovery::{extract_json_object, parse_sections};
