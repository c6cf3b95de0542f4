use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

use crate::ArchiveError;

/// Decode entry bytes into text using: BOM -> UTF-8 -> chardetng fallback.
///
/// Valid UTF-8 without a BOM is returned verbatim. Text that is mostly UTF-8
/// with a few stray bytes keeps its UTF-8 reading, with U+FFFD in their place.
pub fn decode_text(bytes: &[u8]) -> Result<String, ArchiveError> {
    // 1) BOM wins over everything else
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(&bytes[bom_len..], encoding);
    }

    // 2) Ads are authored as UTF-8 almost always
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_owned());
    }

    // 3) Damaged UTF-8
    if mostly_utf8(bytes) {
        let (text, _) = UTF_8.decode_without_bom_handling(bytes);
        return Ok(text.into_owned());
    }

    // 4) Legacy single-byte pages, guessed from content
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, false))
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<String, ArchiveError> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(ArchiveError::Text {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}

/// True when valid multi-byte UTF-8 sequences outnumber invalid ones.
///
/// Legacy single-byte text almost never forms valid multi-byte sequences.
fn mostly_utf8(bytes: &[u8]) -> bool {
    let mut rest = bytes;
    let mut multibyte = 0usize;
    let mut invalid = 0usize;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                multibyte += count_multibyte(valid);
                break;
            }
            Err(err) => {
                let (valid, after) = rest.split_at(err.valid_up_to());
                multibyte += std::str::from_utf8(valid).map_or(0, count_multibyte);
                invalid += 1;
                let skip = err.error_len().unwrap_or(after.len());
                rest = &after[skip..];
            }
        }
    }
    multibyte > invalid
}

fn count_multibyte(text: &str) -> usize {
    text.chars().filter(|c| c.len_utf8() > 1).count()
}
