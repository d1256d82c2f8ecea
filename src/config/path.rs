//! Module for searching for padmap config files

use std::{
    fs::{self, DirEntry},
    path::{Path, PathBuf},
};

/// Base system fallback path to use if one cannot be found with XDG
const FALLBACK_BASE_PATH: &str = "/usr/share/padmap";

/// Returns the base path for configuration data
pub fn get_base_path() -> PathBuf {
    let Ok(base_dirs) = xdg::BaseDirectories::with_prefix("padmap") else {
        log::warn!("Unable to determine config base path. Using fallback path.");
        return PathBuf::from(FALLBACK_BASE_PATH);
    };

    // Get the data directories in preference order
    if let Some(dir) = base_dirs.get_data_dirs().into_iter().find(|dir| dir.exists()) {
        return dir;
    }

    log::warn!("Config base path not found. Using fallback path.");
    PathBuf::from(FALLBACK_BASE_PATH)
}

/// Returns a list of directories in load order to find mapper configs.
/// E.g. ["./rootfs/usr/share/padmap/mappers", "/etc/padmap/mappers.d", "/usr/share/padmap/mappers"]
pub fn get_mappers_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("./rootfs/usr/share/padmap/mappers"),
        PathBuf::from("/etc/padmap/mappers.d"),
        get_base_path().join("mappers"),
    ]
}

/// Returns the directory the config JSON schemas are written to
pub fn get_schema_path() -> PathBuf {
    PathBuf::from("./rootfs/usr/share/padmap/schema")
}

/// Returns a list of file paths for the given directories sorted by filename
/// across all given directories. Files with the same name are ordered by the
/// position of their directory in `paths`. The filter argument is a closure
/// that should return `true` for any files that should be included.
pub fn get_multidir_sorted_files<F>(paths: &[PathBuf], filter: F) -> Vec<PathBuf>
where
    F: Fn(&DirEntry) -> bool,
{
    let mut file_entries: Vec<DirEntry> = Vec::new();
    for path in paths {
        log::trace!("Checking {path:?} for files");
        let files = match fs::read_dir(path) {
            Ok(files) => files,
            Err(e) => {
                log::debug!("Unable to read directory: {path:?}: {e}");
                continue;
            }
        };
        file_entries.extend(files.filter_map(Result::ok).filter(|entry| filter(entry)));
    }

    let priority = |entry: &DirEntry| -> usize {
        let path = entry.path();
        let directory = path.parent().unwrap_or(Path::new(""));
        paths
            .iter()
            .position(|base_path| base_path.as_os_str() == directory.as_os_str())
            .unwrap_or(paths.len())
    };
    file_entries.sort_by(|a, b| {
        a.file_name()
            .cmp(&b.file_name())
            .then_with(|| priority(a).cmp(&priority(b)))
    });
    log::trace!("Got sorted entries: {file_entries:?}");

    file_entries.into_iter().map(|entry| entry.path()).collect()
}
