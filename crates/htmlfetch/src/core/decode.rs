use encoding_rs::{Encoding, UTF_8};

/// Decodes a response body using the declared charset label.
///
/// A recognised label is authoritative: a leading byte order mark is only
/// stripped when it matches that encoding. Without a usable label the body
/// is sniffed for a BOM and otherwise read as UTF-8. Malformed sequences are
/// replaced with U+FFFD instead of failing.
pub fn decode_body(bytes: &[u8], charset: Option<&str>) -> String {
    let declared = charset.and_then(|label| Encoding::for_label(label.trim().as_bytes()));

    let text = match declared {
        Some(encoding) => encoding.decode_with_bom_removal(bytes).0,
        None => UTF_8.decode(bytes).0,
    };
    text.into_owned()
}
