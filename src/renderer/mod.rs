//! SVG output for composited avatars
//!
//! This module extracts drawable markup from fragment files and assembles
//! it inside the fixed canvas wrapper.

pub mod config;
pub mod fragment;
pub mod svg;

pub use config::CanvasConfig;
pub use fragment::{extract, FragmentError};
pub use svg::SvgDocument;
