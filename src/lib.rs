//! # atlas-tms
//!
//! Generate Tableau Mapsource (TMS) files from Mapbox Atlas style URLs.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! mapsource → bundled template, Tableau repository output
//!   ↓
//! transform → rewrite a template for a list of styles
//!   ↓
//! document  → owned XML tree, quick-xml reader/writer, TMS sections
//! style     → Atlas style URL decomposition
//!   ↓
//! error     → MapsourceError
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use atlas_tms::{default_template, generate, write_mapsource, DEFAULT_FILE_STEM};
//! use std::path::Path;
//!
//! let urls = ["https://api.mapbox.com/styles/v1/atlas-user/streets.json?access_token=pk.abc"];
//! let names = ["Streets"];
//! let doc = generate(default_template()?, &urls, &names)?;
//! write_mapsource(Path::new("My Tableau Repository"), DEFAULT_FILE_STEM, &doc)?;
//! # Ok::<(), atlas_tms::MapsourceError>(())
//! ```

/// Error type shared by every module
pub mod error;

/// Style URL decomposition
pub mod style;

/// TMS document tree, reader and writer
pub mod document;

/// Template rewriting
pub mod transform;

/// Bundled template and output paths
pub mod mapsource;

pub use document::{Element, Node, TmsDocument};
pub use error::{MapsourceError, Result};
pub use mapsource::{
    DEFAULT_FILE_STEM, MAPSOURCES_DIR, default_template, load_template, mapsource_path,
    write_mapsource,
};
pub use style::{StyleDescriptor, decompose, decompose_all};
pub use transform::{DEFAULT_WAIT_TILE_COLOR, DEFAULT_WASHOUT, generate, transform};
