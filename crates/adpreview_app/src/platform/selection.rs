use std::path::{Path, PathBuf};

use adpreview_core::FileRef;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Describes a path the way a browser file input would: base name plus a media
/// type guessed from the extension.
pub(crate) fn file_ref_for(path: &Path) -> FileRef {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let media_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MEDIA_TYPE);
    FileRef::new(name, media_type, path)
}

pub(crate) fn selection_from_paths(paths: &[PathBuf]) -> Vec<FileRef> {
    paths.iter().map(|path| file_ref_for(path)).collect()
}

/// One stdin line is one selection; paths are separated by whitespace.
pub(crate) fn parse_selection_line(line: &str) -> Vec<PathBuf> {
    line.split_whitespace().map(PathBuf::from).collect()
}
