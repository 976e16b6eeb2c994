//! DEO Mapper
//!
//! Turns the loosely-typed items of a design week into a
//! [`DomainGenerationContext`](deo_model::DomainGenerationContext).
//!
//! - Only approved or unreviewed items take part
//! - Structured payload fields win over text parsing, field by field
//! - Integrations and business rules prefer their relational tables
//!
//! The mapper is pure: no I/O, no clock, and missing optional data maps to
//! empty values rather than errors.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod mapper;
pub mod text;

pub use mapper::{map_design_week, map_items, ProjectHeader, RelationalSources};
pub use text::{extract_remainder, extract_title, parse_stakeholder, MAX_TITLE_CHARS};
