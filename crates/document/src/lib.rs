//! SVG Document Assembly
//!
//! Takes path strings produced by the outline layer and wraps them into a
//! standalone SVG document: one `<path>` per stroke, a padded viewBox that
//! frames every stroke, and an optional trailing `<label>` carrying the
//! source annotation.
//!
//! ## Building blocks
//!
//! - [`assemble`]: bare `<svg>` root with one `<path>` per stroke
//! - [`with_view_box`]: adds `width`, `height`, `viewBox` and a white
//!   background to an assembled root
//! - [`append_label`]: inserts `<label>` as the last child of the root
//! - [`SvgDocument`]: the same three steps as a builder, plus
//!   [`SvgDocument::from_traced`] which follows a [`DocumentConfig`]
//!
//! ## viewBox
//!
//! Bounds are taken either from the rectangles tracked while paths were
//! written ([`view_box_from_bounds`]) or from a scan of the path strings
//! ([`view_box_from_paths`]). Both pad by [`DocumentConfig::padding`] and
//! snap outwards to whole units; an empty document gets
//! [`ViewBox::FALLBACK`].
//!
//! ## Example
//!
//! ```
//! use document::{append_label, assemble, with_view_box, SvgStyle};
//!
//! let paths = ["M0,0 Z", "M100,50 Z"];
//! let svg = assemble(&paths, &SvgStyle::default());
//! let svg = with_view_box(&svg, &paths, 10.0);
//! let svg = append_label(&svg, "x^2");
//!
//! assert!(svg.contains("viewBox=\"-10 -10 120 70\""));
//! assert!(svg.ends_with("<label>x^2</label>\n</svg>"));
//! ```

mod config;
mod svg;
mod view_box;

pub use crate::config::{DocumentConfig, DocumentError, SvgStyle, ViewBoxSource, DEFAULT_PADDING};
pub use crate::svg::{
    append_label, assemble, escape_attr, escape_text, with_view_box, SvgDocument, SVG_NAMESPACE,
};
pub use crate::view_box::{view_box_from_bounds, view_box_from_paths, ViewBox};
