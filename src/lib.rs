//! Workbook Web — the HTML, CSS, SVG and JavaScript backend of a literate
//! workbook compiler.
//!
//! Each fragment of a workbook is classified as a hoisted definition or a
//! scene-local evaluation, and all fragments of one language are collated
//! into output artifacts. The JavaScript collator additionally emits a small
//! runtime that mounts a path-addressable store and dispatches scenes; a Rust
//! rendition of that runtime lives in [`runtime`].

pub mod core;
pub mod runtime;
pub mod schema;
