//! Avatar compositing
//!
//! The compositor resolves the layers for a selection, picks one fragment per
//! layer and stacks the fragments inside the canvas wrapper. A layer with no
//! fragment files is left out; any other failure aborts the whole document.

use rand::Rng;

use crate::config::AvatarConfig;
use crate::error::GenerateError;
use crate::layer::{self, PickError, ResolvedLayer, DEFAULT_EXTENSIONS};
use crate::renderer::{fragment, CanvasConfig, SvgDocument};
use crate::selection::{Selection, COMMON};
use crate::source::{AssetSource, SourceError};

/// Composes avatars from an asset source
#[derive(Debug, Clone)]
pub struct Compositor<S> {
    source: S,
    canvas: CanvasConfig,
    common: String,
    extensions: Vec<String>,
}

impl<S: AssetSource> Compositor<S> {
    /// Create a compositor with the default canvas and conventions
    pub fn new(source: S) -> Self {
        Self {
            source,
            canvas: CanvasConfig::default(),
            common: COMMON.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Create a compositor from a loaded configuration
    pub fn from_config(source: S, config: &AvatarConfig) -> Self {
        Self::new(source)
            .with_canvas(config.canvas.clone())
            .with_common(config.assets.common.clone())
            .with_extensions(config.assets.extensions.iter().cloned())
    }

    /// Set the canvas configuration
    pub fn with_canvas(mut self, canvas: CanvasConfig) -> Self {
        self.canvas = canvas;
        self
    }

    /// Set the name of the common directory
    pub fn with_common(mut self, common: impl Into<String>) -> Self {
        self.common = common.into();
        self
    }

    /// Set the recognized fragment extensions
    pub fn with_extensions<I, E>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve the layers that would be drawn for `selection`
    pub fn resolve(&self, selection: &Selection) -> Result<Vec<ResolvedLayer>, GenerateError> {
        layer::resolve_layers(&self.source, selection, &self.common)
    }

    /// Generate one composited SVG document
    #[tracing::instrument(skip_all, fields(selection = %selection))]
    pub fn generate<R: Rng + ?Sized>(
        &self,
        selection: &Selection,
        rng: &mut R,
    ) -> Result<String, GenerateError> {
        let layers = self.resolve(selection)?;
        if layers.is_empty() {
            return Err(GenerateError::no_layers(selection.describe(&self.common)));
        }

        let mut doc = SvgDocument::new(&self.canvas);
        for layer in &layers {
            match self.draw_layer(layer, rng)? {
                Some(markup) => doc.add_layer(&markup),
                None => tracing::debug!(layer = %layer.name, "skipping empty layer"),
            }
        }

        tracing::info!(
            resolved = layers.len(),
            drawn = doc.layer_count(),
            "avatar generated"
        );
        Ok(doc.finish())
    }

    /// Pick and extract one fragment of a layer; `None` means the layer is empty
    fn draw_layer<R: Rng + ?Sized>(
        &self,
        layer: &ResolvedLayer,
        rng: &mut R,
    ) -> Result<Option<String>, GenerateError> {
        let dir = layer.dir();
        let files = match self.source.list_files(&dir) {
            Ok(files) => files,
            Err(SourceError::NotFound { .. }) => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let candidates = layer::fragment_candidates(files, self.extensions.as_slice());
        let chosen = match layer::pick(rng, &candidates) {
            Ok(name) => name,
            Err(PickError::EmptyLayer) => return Ok(None),
        };

        let path = dir.child(chosen);
        tracing::debug!(layer = %layer.name, fragment = %path, "fragment chosen");
        let raw = self.source.read_file(&path)?;
        let markup = fragment::extract(&raw)
            .map_err(|e| GenerateError::malformed(&layer.name, path.clone(), e.reason()))?;
        Ok(Some(markup.to_string()))
    }
}
