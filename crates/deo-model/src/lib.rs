//! DEO Model
//!
//! Typed domain model shared by every stage of the document pipeline.
//!
//! # Core Concepts
//!
//! - [`ExtractedItem`]: one atomic requirement fact captured during a design week
//! - [`ItemPayload`]: closed, per-type view over an item's structured payload
//! - [`DesignWeek`]: the aggregate the persistence layer hands to the pipeline
//! - [`DomainGenerationContext`]: normalized, typed input for prompt and fallback
//! - [`GeneratedContent`]: the fixed section tree plus [`GenerationMetadata`]
//! - [`Clock`]: injected time source so metadata is assertable in tests
//!
//! # Example
//!
//! ```rust,ignore
//! use deo_model::{ExtractedItem, ExtractedItemType, ReviewStatus};
//!
//! let item = ExtractedItem::new(ExtractedItemType::Stakeholder, "Jane Smith - CEO")
//!     .with_status(ReviewStatus::Approved);
//! assert!(item.participates());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod clock;
pub mod content;
pub mod context;
pub mod item;
pub mod language;
pub mod metadata;
pub mod payload;
pub mod sources;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use content::{GeneratedContent, GeneratedSections};
pub use context::DomainGenerationContext;
pub use item::{ExtractedItem, ExtractedItemType, ReviewStatus};
pub use language::{Language, LanguageError};
pub use metadata::{GenerationMetadata, TokenUsage, FALLBACK_MODEL_ID};
pub use payload::ItemPayload;
pub use sources::{
    BusinessRuleRecord, DesignWeek, DesignWeekId, DocumentType, IntegrationRecord,
    ScopeClassification, ScopeItemRecord, Session,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
