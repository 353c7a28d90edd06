//! Browser DOM layer for slide-compare blocks.
//!
//! This crate renders comparison blocks into the live DOM and wires their
//! pointer handling. It assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `dom`: `ElementBuilder` over `web_sys` elements
//! - `events`: mouse event and bounding box extraction
//! - `mounted`: event listeners that keep a rendered block interactive
//!
//! # Re-exports
//!
//! This crate re-exports `slide-compare-core` for convenience, so consumers
//! only need to depend on `slide-compare-browser`.

// Re-export core crate
pub use slide_compare_core;
pub use slide_compare_core::*;

pub mod dom;
pub mod events;
pub mod mounted;

pub use dom::{DomBuilder, TooltipHook};
pub use events::{bounding_box, pointer_input};
pub use mounted::MountedComparison;
