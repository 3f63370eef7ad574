//! Tolerant decoding of deck sources.
//!
//! Markdown decks arrive from editors on every platform, frequently in a legacy
//! Chinese code page. Decoding never fails: the worst case is a lossy UTF-8
//! reading with replacement characters. Only a missing or unreadable file is
//! reported to the caller.
//!
//! Order of attempts:
//! 1. Byte order mark, if present
//! 2. chardetng statistical guess, biased toward Chinese, when the detector is
//!    confident and the guess is one of the fallback encodings
//! 3. A fixed list of common encodings (UTF-8, GBK, GB2312, CP936, Latin-1, CP1252)
//! 4. Lossy UTF-8

use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use serde::Serialize;

use crate::error::{Error, Result};

/// Encodings tried in order when sniffing is inconclusive.
///
/// Each entry is (display name, WHATWG label). GB2312 and CP936 resolve to the
/// same decoder as GBK, and Latin-1 resolves to windows-1252.
pub const FALLBACK_ENCODINGS: &[(&str, &str)] = &[
    ("UTF-8", "utf-8"),
    ("GBK", "gbk"),
    ("GB2312", "gb2312"),
    ("CP936", "x-gbk"),
    ("Latin-1", "latin1"),
    ("CP1252", "cp1252"),
];

/// Top-level domain hint handed to chardetng. Decks are mostly Chinese, and
/// without a hint short GBK input is read as EUC-KR.
pub const DEFAULT_TLD_HINT: &[u8] = b"cn";

/// How the text was decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecodeMethod {
    /// Byte order mark at the start of the buffer
    Bom,
    /// Confident statistical detection
    Sniffed,
    /// One of [`FALLBACK_ENCODINGS`]
    Fallback,
    /// UTF-8 with replacement characters
    Lossy,
}

/// Decoded text and the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedText {
    /// Decoded content
    pub text: String,
    /// Name of the encoding used (e.g., "GBK")
    pub encoding: &'static str,
    /// Which step of the chain succeeded
    pub method: DecodeMethod,
}

/// Read a text file, detecting its encoding.
///
/// # Errors
///
/// [`Error::FileNotFound`] if the file does not exist, [`Error::Io`] if it
/// cannot be read. Undecodable content is never an error.
pub fn read_text_file<P: AsRef<Path>>(path: P) -> Result<DecodedText> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| Error::from_io(e, path))?;
    let decoded = decode_bytes(&bytes);
    log::info!(
        "Decoded {} as {} ({:?})",
        path.display(),
        decoded.encoding,
        decoded.method
    );
    Ok(decoded)
}

/// Decode a byte buffer to UTF-8.
pub fn decode_bytes(bytes: &[u8]) -> DecodedText {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        if let Some(text) = decode_strict(encoding, &bytes[bom_len..]) {
            return DecodedText {
                text,
                encoding: encoding.name(),
                method: DecodeMethod::Bom,
            };
        }
    }

    let (guess, confident) = sniff(bytes, DEFAULT_TLD_HINT);
    log::debug!("Sniffed encoding {} (confident: {})", guess.name(), confident);
    if confident && in_fallback_family(guess) {
        if let Some(text) = decode_strict(guess, bytes) {
            return DecodedText {
                text,
                encoding: guess.name(),
                method: DecodeMethod::Sniffed,
            };
        }
        log::debug!("Sniffed encoding {} failed to decode", guess.name());
    }

    decode_with_fallbacks(bytes, FALLBACK_ENCODINGS)
}

/// Try each `(name, label)` of `chain` in order, then fall back to lossy UTF-8.
///
/// Unknown labels are skipped.
pub fn decode_with_fallbacks(bytes: &[u8], chain: &[(&'static str, &str)]) -> DecodedText {
    for &(name, label) in chain {
        let Some(encoding) = Encoding::for_label(label.as_bytes()) else {
            log::debug!("Encoding label {} is not known, skipping", label);
            continue;
        };
        if let Some(text) = decode_strict(encoding, bytes) {
            return DecodedText {
                text,
                encoding: name,
                method: DecodeMethod::Fallback,
            };
        }
    }

    log::warn!("No encoding decoded cleanly, using UTF-8 with replacement");
    DecodedText {
        text: String::from_utf8_lossy(bytes).into_owned(),
        encoding: "UTF-8",
        method: DecodeMethod::Lossy,
    }
}

fn sniff(bytes: &[u8], tld: &[u8]) -> (&'static Encoding, bool) {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess_assess(Some(tld), true)
}

fn in_fallback_family(encoding: &'static Encoding) -> bool {
    FALLBACK_ENCODINGS
        .iter()
        .filter_map(|(_, label)| Encoding::for_label(label.as_bytes()))
        .any(|known| known == encoding)
}

fn decode_strict(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        let decoded = decode_bytes("# 标题\n内容".as_bytes());
        assert_eq!(decoded.text, "# 标题\n内容");
        assert_eq!(decoded.encoding, "UTF-8");
    }

    #[test]
    fn test_decode_ascii() {
        let decoded = decode_bytes(b"# Hello\nIntro text");
        assert_eq!(decoded.text, "# Hello\nIntro text");
    }

    #[test]
    fn test_decode_utf8_bom() {
        let decoded = decode_bytes(b"\xEF\xBB\xBF# Title");
        assert_eq!(decoded.text, "# Title");
        assert_eq!(decoded.method, DecodeMethod::Bom);
    }

    #[test]
    fn test_decode_utf16le_bom() {
        let decoded = decode_bytes(&[0xFF, 0xFE, b'#', 0x00, b' ', 0x00, b'A', 0x00]);
        assert_eq!(decoded.text, "# A");
        assert_eq!(decoded.method, DecodeMethod::Bom);
    }

    #[test]
    fn test_decode_latin1_never_fails() {
        // 0xE9 = 'é' in windows-1252; invalid as UTF-8 and GBK (truncated lead byte)
        let decoded = decode_bytes(&[b'C', b'a', b'f', 0xE9]);
        assert_eq!(decoded.text, "Café");
        assert_ne!(decoded.method, DecodeMethod::Lossy);
    }

    #[test]
    fn test_short_gbk_deck_is_not_read_as_korean() {
        let source = "# 你好\n## 方法\n编码器";
        let (bytes, _, _) = encoding_rs::GBK.encode(source);
        let decoded = decode_bytes(&bytes);
        assert_eq!(decoded.text, source);
        assert_eq!(decoded.encoding, "GBK");
    }

    #[test]
    fn test_guess_outside_fallback_family_is_ignored() {
        // Without the family check these come back as IBM866 or windows-1256
        for bytes in [&[0xFF, 0xFF, 0xFF][..], &[0x23, 0x20, 0x81, 0xFF, 0x0A][..]] {
            let decoded = decode_bytes(bytes);
            assert!(
                ["Latin-1", "windows-1252"].contains(&decoded.encoding),
                "{:?}",
                decoded
            );
            assert_ne!(decoded.method, DecodeMethod::Lossy);
        }
        assert_eq!(decode_bytes(&[0xFF, 0xFF, 0xFF]).text, "ÿÿÿ");
    }

    #[test]
    fn test_fallback_chain_decodes_gbk() {
        let (bytes, _, _) = encoding_rs::GBK.encode("方法");
        let decoded = decode_with_fallbacks(&bytes, FALLBACK_ENCODINGS);
        assert_eq!(decoded.text, "方法");
        assert_eq!(decoded.encoding, "GBK");
        assert_eq!(decoded.method, DecodeMethod::Fallback);
    }

    #[test]
    fn test_fallback_chain_order() {
        let decoded = decode_with_fallbacks(b"plain", FALLBACK_ENCODINGS);
        assert_eq!(decoded.encoding, "UTF-8");
        assert_eq!(decoded.method, DecodeMethod::Fallback);

        let decoded = decode_with_fallbacks(&[b'C', b'a', b'f', 0xE9], FALLBACK_ENCODINGS);
        assert_eq!(decoded.text, "Café");
        assert_eq!(decoded.encoding, "Latin-1");
    }

    #[test]
    fn test_lossy_when_chain_exhausted() {
        let chain = [("UTF-8", "utf-8"), ("GBK", "gbk"), ("Bogus", "no-such-label")];
        let decoded = decode_with_fallbacks(&[0x23, 0x20, 0x81, 0xFF, 0x0A], &chain);
        assert_eq!(decoded.method, DecodeMethod::Lossy);
        assert_eq!(decoded.encoding, "UTF-8");
        assert!(decoded.text.starts_with("# "));
        assert!(decoded.text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_fallback_labels_resolve() {
        for (name, label) in FALLBACK_ENCODINGS {
            assert!(
                Encoding::for_label(label.as_bytes()).is_some(),
                "label for {} should resolve",
                name
            );
        }
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_text_file("/nonexistent/deck.md");
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
