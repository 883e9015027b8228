//! Tableau Mapsource (TMS) documents.
//!
//! A TMS file has a single `mapsource` root with four sections. The
//! transformer rewrites five subtrees inside them:
//!
//! ```text
//! mapsource
//! ├── connection                       (singular; API connection)
//! ├── layers
//! │   └── layer*                       (one per style)
//! ├── map-styles
//! │   └── map-style*                   (one per style)
//! │       └── map-layer-style
//! └── mapsource-defaults
//!     └── style
//!         └── style-rule*              (one per style)
//! ```

mod element;
mod reader;
mod writer;

pub use element::{Element, Node};

use crate::error::{MapsourceError, Result};

pub const ROOT: &str = "mapsource";
pub const CONNECTION: &str = "connection";
pub const LAYERS: &str = "layers";
pub const LAYER: &str = "layer";
pub const MAP_STYLES: &str = "map-styles";
pub const MAP_STYLE: &str = "map-style";
pub const MAP_LAYER_STYLE: &str = "map-layer-style";
pub const MAPSOURCE_DEFAULTS: &str = "mapsource-defaults";
pub const STYLE: &str = "style";
pub const STYLE_RULE: &str = "style-rule";
pub const FORMAT: &str = "format";

/// A parsed TMS document, owned by exactly one caller at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TmsDocument {
    root: Element,
}

impl TmsDocument {
    /// Wrap an element tree. The root must be `mapsource`.
    pub fn from_root(root: Element) -> Result<Self> {
        if root.name != ROOT {
            return Err(MapsourceError::template_shape("mapsource"));
        }
        Ok(Self { root })
    }

    /// Parse a TMS document from bytes.
    pub fn read(input: &[u8]) -> Result<Self> {
        Self::from_root(reader::read_root(input)?)
    }

    /// Parse a TMS document from a string.
    pub fn parse(input: &str) -> Result<Self> {
        Self::read(input.as_bytes())
    }

    /// Serialize to UTF-8 XML bytes.
    pub fn write(&self) -> Result<Vec<u8>> {
        writer::write_root(&self.root)
    }

    /// Serialize to an XML string.
    pub fn to_xml_string(&self) -> Result<String> {
        String::from_utf8(self.write()?)
            .map_err(|e| MapsourceError::xml(format!("Invalid UTF-8: {e}")))
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Verify that every subtree the transformer rewrites is present.
    pub fn check_shape(&self) -> Result<()> {
        self.connection()?;
        self.layers()?;
        self.map_styles()?;
        self.default_style()?;
        Ok(())
    }

    pub fn connection(&self) -> Result<&Element> {
        self.root
            .child(CONNECTION)
            .ok_or_else(|| MapsourceError::template_shape("mapsource/connection"))
    }

    pub(crate) fn connection_mut(&mut self) -> Result<&mut Element> {
        self.root
            .child_mut(CONNECTION)
            .ok_or_else(|| MapsourceError::template_shape("mapsource/connection"))
    }

    /// The `layers` section.
    pub fn layers(&self) -> Result<&Element> {
        self.root
            .child(LAYERS)
            .ok_or_else(|| MapsourceError::template_shape("mapsource/layers"))
    }

    pub(crate) fn layers_mut(&mut self) -> Result<&mut Element> {
        self.root
            .child_mut(LAYERS)
            .ok_or_else(|| MapsourceError::template_shape("mapsource/layers"))
    }

    /// The `map-styles` section.
    pub fn map_styles(&self) -> Result<&Element> {
        self.root
            .child(MAP_STYLES)
            .ok_or_else(|| MapsourceError::template_shape("mapsource/map-styles"))
    }

    pub(crate) fn map_styles_mut(&mut self) -> Result<&mut Element> {
        self.root
            .child_mut(MAP_STYLES)
            .ok_or_else(|| MapsourceError::template_shape("mapsource/map-styles"))
    }

    /// The `style` element under `mapsource-defaults` that holds the rules.
    pub fn default_style(&self) -> Result<&Element> {
        let defaults = self
            .root
            .child(MAPSOURCE_DEFAULTS)
            .ok_or_else(|| MapsourceError::template_shape("mapsource/mapsource-defaults"))?;
        defaults
            .child(STYLE)
            .ok_or_else(|| MapsourceError::template_shape("mapsource/mapsource-defaults/style"))
    }

    pub(crate) fn default_style_mut(&mut self) -> Result<&mut Element> {
        let defaults = self
            .root
            .child_mut(MAPSOURCE_DEFAULTS)
            .ok_or_else(|| MapsourceError::template_shape("mapsource/mapsource-defaults"))?;
        defaults
            .child_mut(STYLE)
            .ok_or_else(|| MapsourceError::template_shape("mapsource/mapsource-defaults/style"))
    }

    /// `layer` entries in document order.
    pub fn layer_entries(&self) -> Result<Vec<&Element>> {
        Ok(self.layers()?.children_named(LAYER).collect())
    }

    /// `map-style` entries in document order.
    pub fn map_style_entries(&self) -> Result<Vec<&Element>> {
        Ok(self.map_styles()?.children_named(MAP_STYLE).collect())
    }

    /// `style-rule` entries in document order.
    pub fn style_rules(&self) -> Result<Vec<&Element>> {
        Ok(self.default_style()?.children_named(STYLE_RULE).collect())
    }
}
