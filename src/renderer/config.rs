//! Configuration for the output canvas

use serde::Deserialize;

/// Fixed dimensions of the composited SVG document
///
/// All fragments of an avatar style are drawn in the same coordinate system,
/// so these values are configuration constants rather than computed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Value of the `width` attribute
    pub width: u32,

    /// Value of the `height` attribute
    pub height: u32,

    /// Value of the `viewBox` attribute
    pub view_box: String,

    /// Whether to emit an XML declaration before the `<svg>` element
    pub xml_declaration: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            view_box: "0 0 512 512".to_string(),
            xml_declaration: false,
        }
    }
}

impl CanvasConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outer size; the viewBox follows unless set afterwards
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self.view_box = format!("0 0 {} {}", width, height);
        self
    }

    /// Set the viewBox
    pub fn with_view_box(mut self, view_box: impl Into<String>) -> Self {
        self.view_box = view_box.into();
        self
    }

    /// Set whether an XML declaration is emitted
    pub fn with_xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }

    /// The opening `<svg>` tag
    pub fn open_tag(&self) -> String {
        format!(
            r#"<svg width="{}" height="{}" viewBox="{}" xmlns="http://www.w3.org/2000/svg">"#,
            self.width, self.height, self.view_box
        )
    }
}
