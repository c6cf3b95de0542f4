/// Media types hosts report for ZIP archives.
///
/// `application/zip` is the registered type; Windows browsers and some
/// desktop environments label the same files with the legacy `x-` variants.
const ZIP_MEDIA_TYPES: &[&str] = &[
    "application/zip",
    "application/x-zip-compressed",
    "application/x-zip",
];

/// Returns true when `media_type` names a ZIP archive. Parameters are ignored.
pub fn is_zip_media_type(media_type: &str) -> bool {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or(media_type)
        .trim();
    ZIP_MEDIA_TYPES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(essence))
}
