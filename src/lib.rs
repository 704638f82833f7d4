//! Avatar Compositor - layered SVG avatars from a directory of fragments
//!
//! Assets are organized by selection attributes, with a `common` directory
//! standing in for any attribute:
//!
//! ```text
//! assets/
//!   cn/male/01_hair/*.svg
//!   common/male/01_hair/*.svg
//!   common/common/00_background/*.svg
//! ```
//!
//! Each layer directory is taken from the most specific location that has
//! it, one fragment is picked at random per layer, and the fragments are
//! stacked in layer-name order inside a fixed canvas.
//!
//! # Example
//!
//! ```rust
//! use avatar_compositor::source::MemoryAssetSource;
//! use avatar_compositor::{Compositor, Selection};
//!
//! let source = MemoryAssetSource::new()
//!     .with_file("common/common/00_bg/plain.svg", r#"<svg><rect width="512" height="512"/></svg>"#)
//!     .with_file("cn/common/01_face/round.svg", r#"<svg><circle r="100"/></svg>"#);
//!
//! let selection = Selection::new().with("country", "cn").with("gender", "male");
//! let svg = Compositor::new(source)
//!     .generate(&selection, &mut rand::rng())
//!     .unwrap();
//!
//! assert!(svg.starts_with("<svg"));
//! assert!(svg.contains("<circle"));
//! ```

pub mod compositor;
pub mod config;
pub mod error;
pub mod layer;
pub mod renderer;
pub mod selection;
pub mod source;

use std::path::Path;

pub use compositor::Compositor;
pub use config::{AvatarConfig, ConfigError};
pub use error::GenerateError;
pub use layer::ResolvedLayer;
pub use renderer::CanvasConfig;
pub use selection::{Selection, SelectionError};
pub use source::{AssetSource, FsAssetSource, MemoryAssetSource, SourcePath};

/// Generate an avatar from an asset directory with default settings
///
/// Uses the thread-local random generator.
pub fn generate(root: impl AsRef<Path>, selection: &Selection) -> Result<String, GenerateError> {
    Compositor::new(FsAssetSource::new(root.as_ref())).generate(selection, &mut rand::rng())
}

/// Generate an avatar using a loaded configuration
pub fn generate_with_config(
    config: &AvatarConfig,
    selection: &Selection,
) -> Result<String, GenerateError> {
    Compositor::from_config(FsAssetSource::new(&config.assets.root), config)
        .generate(selection, &mut rand::rng())
}
