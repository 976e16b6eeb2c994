//! DEO Core
//!
//! The document-generation pipeline and its downstream stages.
//!
//! # Core Concepts
//!
//! - [`DocumentPipeline`]: `generate(designWeekId, documentType)`; the only
//!   caller-facing operation
//! - [`ConsistencyValidator`]: flags numeric claims no KPI supports
//! - [`FallbackSynthesizer`]: builds a complete document without the backend
//! - [`DocumentMerger`]: folds content into the base document
//! - [`DesignWeekStore`]: persistence seam, with [`InMemoryStore`]
//!
//! # Example
//!
//! ```rust,ignore
//! use deo_core::{DocumentPipeline, InMemoryStore, PipelineConfig};
//! use deo_generation::AnthropicBackend;
//! use deo_model::{DocumentType, SystemClock};
//! use std::sync::Arc;
//!
//! # async fn example(week: deo_model::DesignWeek) -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryStore::new());
//! let id = week.id;
//! store.insert_design_week(week);
//!
//! let pipeline = DocumentPipeline::new(
//!     PipelineConfig::default(),
//!     Arc::new(AnthropicBackend::from_env()?),
//!     store,
//!     Arc::new(SystemClock),
//! )?;
//! let output = pipeline.generate(id, DocumentType::DesignDocument).await?;
//! println!("{} warnings", output.warnings.len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod base;
pub mod config;
pub mod error;
pub mod fallback;
pub mod merger;
pub mod missing;
pub mod pipeline;
pub mod store;
pub mod validator;

// Re-exports for convenience
pub use base::BaseDocument;
pub use config::PipelineConfig;
pub use error::{ConfigError, PipelineError, StoreError};
pub use fallback::{synthesize_sections, FallbackSynthesizer};
pub use merger::{DocumentMerger, DocumentTree, GENERATED_CONTENT_KEY};
pub use missing::{missing_fields, required_item_types};
pub use pipeline::{DocumentPipeline, GenerationOutput};
pub use store::{DesignWeekStore, DocumentRecord, DocumentStatus, InMemoryStore, OperabilityLogEntry};
pub use validator::{check_consistency, ConsistencyValidator, WARNING_PREFIX};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
