//! Bundled template and Tableau repository output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::document::TmsDocument;
use crate::error::Result;

/// Directory inside a Tableau repository that holds `.tms` files.
pub const MAPSOURCES_DIR: &str = "Mapsources";

/// File stem used when the caller does not choose one.
pub const DEFAULT_FILE_STEM: &str = "Atlas";

const TEMPLATE: &str = include_str!("../assets/Template.tms");

/// Parse the template shipped with the crate.
pub fn default_template() -> Result<TmsDocument> {
    TmsDocument::parse(TEMPLATE)
}

/// Read a template kept on disk.
pub fn load_template(path: &Path) -> Result<TmsDocument> {
    let bytes = fs::read(path)?;
    TmsDocument::read(&bytes)
}

/// `<repository>/Mapsources/<file_stem>.tms`
pub fn mapsource_path(repository: &Path, file_stem: &str) -> PathBuf {
    repository
        .join(MAPSOURCES_DIR)
        .join(format!("{file_stem}.tms"))
}

/// Serialize `doc` into the repository's `Mapsources` directory.
///
/// The directory is created if it does not exist. Returns the written path.
pub fn write_mapsource(repository: &Path, file_stem: &str, doc: &TmsDocument) -> Result<PathBuf> {
    let path = mapsource_path(repository, file_stem);
    let bytes = doc.write()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), "wrote mapsource");
    Ok(path)
}
