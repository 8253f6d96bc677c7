//! Core domain types, error handling, and extraction diagnostics
//! for slide-deck content extraction.

pub mod diag;
pub mod error;
pub mod types;

pub use diag::{Degradation, DegradationKind, Diagnostics};
pub use error::{Error, Result};
pub use types::{
    ContentBlock, DiagramNode, ListItem, ListStyle, Presentation, PresentationMetadata, Section,
    Slide, Stats,
};
