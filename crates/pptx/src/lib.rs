//! PPTX (Office Open XML) document access and structured-content
//! extraction.
//!
//! A `.pptx` file is a ZIP archive of XML parts. [`package`] reads the
//! archive and resolves relationships, [`document`]/[`reader`] build the
//! in-memory object model, and the extraction engine ([`sections`],
//! [`assemble`], [`classify`], [`diagram`]) turns that model into
//! [`deck_core::Presentation`] values. [`extract::PptxExtractor`] ties the
//! stages together for one file.

pub mod assemble;
pub mod classify;
pub mod diagram;
pub mod document;
pub mod extract;
pub mod media;
pub mod package;
mod reader;
pub mod sections;
#[cfg(test)]
mod testutil;
mod xml;

pub use extract::PptxExtractor;
