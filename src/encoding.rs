//! Text encoding for the markdown source, the template and the written deck.
//!
//! Encodings are looked up by their WHATWG label, so the usual spellings
//! (`utf8`, `utf-8`, `latin1`, `windows-1252`, `shift_jis`, ...) all resolve.
//! Decoding and encoding are strict: bytes that are not valid in the chosen
//! encoding, or characters it cannot represent, are reported as errors rather
//! than replaced.
//!
//! UTF-16 input may start with a byte order mark, which picks the byte order
//! and is dropped. The plain `utf-16` label also writes a little-endian mark
//! on output; `utf-16le` and `utf-16be` never do.

use crate::errors::{Result, SlidesError};
use encoding_rs::Encoding;
use std::borrow::Cow;

/// A resolved text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    label: &'static str,
    encoding: &'static Encoding,
    /// Write a byte order mark in front of encoded output.
    bom: bool,
}

/// Labels that name UTF-16 without a byte order.
const UNORDERED_UTF16_LABELS: &[&str] = &[
    "utf-16",
    "utf16",
    "unicode",
    "ucs-2",
    "csunicode",
    "iso-10646-ucs-2",
    "unicodefeff",
];

impl TextEncoding {
    /// Resolve an encoding label such as `utf8` or `latin1`.
    pub fn for_label(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        let unordered_utf16 = UNORDERED_UTF16_LABELS.contains(&normalized.as_str());
        let encoding = if unordered_utf16 {
            encoding_rs::UTF_16LE
        } else {
            Encoding::for_label(normalized.as_bytes()).ok_or_else(|| {
                SlidesError::EncodingError(format!("unknown encoding: {}", label))
            })?
        };
        Ok(Self {
            label: encoding.name(),
            encoding,
            bom: unordered_utf16,
        })
    }

    /// Canonical name of the encoding, e.g. `UTF-8`.
    pub fn name(&self) -> &'static str {
        self.label
    }

    /// Decode `bytes`, failing on the first malformed sequence.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
        let (encoding, bytes) = self.sniff_utf16_bom(bytes);
        encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| {
                SlidesError::EncodingError(format!(
                    "input is not valid {}",
                    encoding.name()
                ))
            })
    }

    fn sniff_utf16_bom<'a>(&self, bytes: &'a [u8]) -> (&'static Encoding, &'a [u8]) {
        if !self.is_utf16() {
            return (self.encoding, bytes);
        }
        match Encoding::for_bom(bytes) {
            Some((found, bom_len))
                if found == encoding_rs::UTF_16LE || found == encoding_rs::UTF_16BE =>
            {
                (found, &bytes[bom_len..])
            }
            _ => (self.encoding, bytes),
        }
    }

    fn is_utf16(&self) -> bool {
        self.encoding == encoding_rs::UTF_16LE || self.encoding == encoding_rs::UTF_16BE
    }

    /// Encode `text`, failing if a character has no representation.
    pub fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>> {
        // encoding_rs only decodes UTF-16; its encoder falls back to UTF-8.
        if self.encoding == encoding_rs::UTF_16LE {
            let bom = self.bom.then_some(0xFEFF_u16);
            return Ok(Cow::Owned(
                bom.into_iter()
                    .chain(text.encode_utf16())
                    .flat_map(u16::to_le_bytes)
                    .collect(),
            ));
        }
        if self.encoding == encoding_rs::UTF_16BE {
            return Ok(Cow::Owned(
                text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            ));
        }

        let (bytes, _, had_unmappable) = self.encoding.encode(text);
        if had_unmappable {
            return Err(SlidesError::EncodingError(format!(
                "output contains characters that cannot be encoded as {}",
                self.encoding.name()
            )));
        }
        Ok(bytes)
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self {
            label: encoding_rs::UTF_8.name(),
            encoding: encoding_rs::UTF_8,
            bom: false,
        }
    }
}
