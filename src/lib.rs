//! # gsk-core
//!
//! Low-level building blocks shared by a toolkit's CSS engine and its scene-graph
//! renderer. Each piece is a leaf: none depends on another.
//!
//! ## Core Systems
//!
//! - **[`css`]** — Tokenizer, token cursor, dimension parsing (`10px`, `50%`, `90deg`)
//!   and canonical-unit computation
//! - **[`geometry`]** — Point, Scale, Rect and the packed per-edge [`geometry::RectSnap`] codec
//! - **[`aligned`]** — Power-of-two aligned heap blocks for render-node storage
//!
//! ## Example
//!
//! ```
//! use gsk_core::css::dimension::{parse_dimension_str, Dimension, ParseFlags};
//! use gsk_core::geometry::{Rect, RectSnap};
//!
//! let width = parse_dimension_str("12.5px", ParseFlags::LENGTH).unwrap();
//! assert_eq!(width, Dimension::px(12.5));
//!
//! let rect = Rect::new(0.25, 0.0, width.value as f32, 4.0);
//! assert_eq!(rect.snap(RectSnap::GROW), Rect::new(0.0, 0.0, 13.0, 4.0));
//! ```

// Foundation
pub mod geometry;

// CSS values
pub mod css;

// Render-node storage
pub mod aligned;
