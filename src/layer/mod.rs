//! Layer resolution and fragment selection
//!
//! A layer is a directory whose name sorts into its stacking position
//! (`00_background`, `01_body`, ...). The resolver decides which candidate
//! directory supplies each layer; the picker chooses one fragment file from it.

mod picker;
mod resolver;

pub use picker::{fragment_candidates, pick, PickError, DEFAULT_EXTENSIONS};
pub use resolver::{resolve_layers, ResolvedLayer};
