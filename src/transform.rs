//! Rewrite a TMS template for a list of Atlas styles.
//!
//! Four independent edits, all applied to the same owned document:
//!
//! - **connection**: API attributes from the first style only; the format
//!   has one connection per file
//! - **layers**: one `layer` per style
//! - **map-styles**: one `map-style` (with its `map-layer-style`) per style
//! - **defaults**: one `style-rule` per style
//!
//! Every list is index-aligned with the input.

use crate::document::{Element, FORMAT, LAYER, MAP_LAYER_STYLE, MAP_STYLE, STYLE_RULE, TmsDocument};
use crate::error::{MapsourceError, Result};
use crate::style::{StyleDescriptor, decompose_all};

/// Background shown while a tile loads.
pub const DEFAULT_WAIT_TILE_COLOR: &str = "#dddddd";

/// Washout applied to every style by default.
pub const DEFAULT_WASHOUT: &str = "0";

/// Rewrite `template` so it describes `styles`, displayed as `names`.
///
/// `styles` and `names` must be non-empty and of equal length. The template
/// is checked before anything is changed, so on error no partially
/// rewritten document is produced.
pub fn transform<S: AsRef<str>>(
    mut template: TmsDocument,
    styles: &[StyleDescriptor],
    names: &[S],
) -> Result<TmsDocument> {
    if styles.is_empty() || styles.len() != names.len() {
        return Err(MapsourceError::InputCardinality {
            styles: styles.len(),
            names: names.len(),
        });
    }
    template.check_shape()?;

    let entries: Vec<(&StyleDescriptor, &str)> = styles
        .iter()
        .zip(names.iter().map(|name| name.as_ref()))
        .collect();

    rewrite_connection(&mut template, &styles[0])?;
    rewrite_layers(&mut template, &entries)?;
    rewrite_map_styles(&mut template, &entries)?;
    rewrite_defaults(&mut template, &entries)?;

    tracing::debug!(styles = styles.len(), "rewrote mapsource template");
    Ok(template)
}

/// Decompose `urls` and rewrite `template` for them in one step.
pub fn generate<U: AsRef<str>, S: AsRef<str>>(
    template: TmsDocument,
    urls: &[U],
    names: &[S],
) -> Result<TmsDocument> {
    if urls.is_empty() || urls.len() != names.len() {
        return Err(MapsourceError::InputCardinality {
            styles: urls.len(),
            names: names.len(),
        });
    }
    let styles = decompose_all(urls)?;
    transform(template, &styles, names)
}

fn rewrite_connection(doc: &mut TmsDocument, style: &StyleDescriptor) -> Result<()> {
    let connection = doc.connection_mut()?;
    connection.set_attr("api-key", style.token.as_str());
    connection.set_attr("server", style.server_url());
    connection.set_attr("url", style.api_path.as_str());
    connection.set_attr("port", style.port.as_str());
    connection.set_attr("username", style.username.as_str());
    connection.set_attr("url-format", style.url_format());

    tracing::debug!(server = style.server.as_str(), "rewrote connection");
    Ok(())
}

fn rewrite_layers(doc: &mut TmsDocument, entries: &[(&StyleDescriptor, &str)]) -> Result<()> {
    let layers = doc.layers_mut()?;
    let removed = layers.remove_children_named(LAYER);
    for (style, name) in entries {
        layers.push_child(
            Element::new(LAYER)
                .with_attr("display-name", *name)
                .with_attr("name", style.style_id.as_str())
                .with_attr("show-ui", "true")
                .with_attr("type", "features"),
        );
    }

    tracing::debug!(removed, added = entries.len(), "rewrote layers");
    Ok(())
}

fn rewrite_map_styles(doc: &mut TmsDocument, entries: &[(&StyleDescriptor, &str)]) -> Result<()> {
    let map_styles = doc.map_styles_mut()?;
    let removed = map_styles.remove_children_named(MAP_STYLE);
    for (style, name) in entries {
        map_styles.push_child(
            Element::new(MAP_STYLE)
                .with_attr("display-name", *name)
                .with_attr("name", style.style_url())
                .with_attr("wait-tile-color", DEFAULT_WAIT_TILE_COLOR)
                .with_child(
                    Element::new(MAP_LAYER_STYLE)
                        .with_attr("name", *name)
                        .with_attr("request-string", style.style_id.as_str()),
                ),
        );
    }

    tracing::debug!(removed, added = entries.len(), "rewrote map-styles");
    Ok(())
}

fn rewrite_defaults(doc: &mut TmsDocument, entries: &[(&StyleDescriptor, &str)]) -> Result<()> {
    let style_node = doc.default_style_mut()?;
    let removed = style_node.remove_children_named(STYLE_RULE);
    for (style, _) in entries {
        style_node.push_child(
            Element::new(STYLE_RULE)
                .with_attr("element", "map")
                .with_child(
                    Element::new(FORMAT)
                        .with_attr("attr", "map-style")
                        .with_attr("value", style.style_url()),
                )
                .with_child(
                    Element::new(FORMAT)
                        .with_attr("attr", "washout")
                        .with_attr("value", DEFAULT_WASHOUT),
                ),
        );
    }

    tracing::debug!(removed, added = entries.len(), "rewrote mapsource-defaults");
    Ok(())
}
