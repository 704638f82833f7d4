//! Composited document assembly

use super::CanvasConfig;

/// Build the composited SVG document incrementally
///
/// Layers are appended in drawing order, each followed by a newline.
#[derive(Debug)]
pub struct SvgDocument {
    buf: String,
    layers: usize,
}

impl SvgDocument {
    /// Open the canvas wrapper
    pub fn new(config: &CanvasConfig) -> Self {
        let mut buf = String::new();
        if config.xml_declaration {
            buf.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            buf.push('\n');
        }
        buf.push_str(&config.open_tag());
        buf.push('\n');
        Self { buf, layers: 0 }
    }

    /// Append the inner markup of one layer
    pub fn add_layer(&mut self, markup: &str) {
        self.buf.push_str(markup);
        self.buf.push('\n');
        self.layers += 1;
    }

    /// Number of layers drawn so far
    pub fn layer_count(&self) -> usize {
        self.layers
    }

    /// Close the wrapper and return the document
    pub fn finish(mut self) -> String {
        self.buf.push_str("</svg>");
        self.buf
    }
}
