use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Lists the regular files in `dir` whose names end with `.<extension>`.
///
/// Directory order is platform dependent, so the names are sorted to keep the
/// generated scripts reproducible. Non-UTF-8 names are skipped.
pub fn list_files(dir: &Path, extension: &str) -> Result<Vec<String>> {
    let read_err = |source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let suffix = format!(".{}", extension);

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        // follows symlinks, like a plain `isfile` check
        let is_file = fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) if name.ends_with(&suffix) => files.push(name),
            Ok(_) => {}
            Err(name) => log::warn!("skipping non UTF-8 file name {:?}", name),
        }
    }

    files.sort();
    log::debug!(
        "found {} '{}' files in {}",
        files.len(),
        extension,
        dir.display()
    );
    Ok(files)
}
