//! Metadata field decoding: recovering the raw parameter blob from an image.
//!
//! Generators stash the parameter block in different places depending on the
//! export path, so extraction tries a fixed priority list of fields:
//! EXIF UserComment, then ImageDescription, then Software, then the XMP
//! `dc:description` packet. The first field yielding a non-empty decoded
//! string wins. Every failure along the way (missing field, malformed EXIF,
//! invalid UTF-8) is per-field and silent; an image with no usable metadata
//! decodes to the empty string, which is valid parser input downstream.

use exif::{In, Reader, Tag, Value};
use std::io::Cursor;

/// The excluded bytes of the `UNICODE\0` comment header.
const UNICODE_HEADER: &[u8] = b"UNICODE";

/// Total header length: the 7 ASCII bytes plus one padding byte.
const UNICODE_HEADER_LEN: usize = 8;

/// APP1 namespace identifier for XMP packets.
const XMP_NAMESPACE: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";

/// Recovers the raw parameter text from an image's embedded metadata.
pub struct FieldDecoder;

impl FieldDecoder {
    /// Decode the parameter blob from raw image bytes.
    ///
    /// Returns `""` when no candidate field yields text; never fails.
    pub fn decode(bytes: &[u8]) -> String {
        if let Ok(exif) = Reader::new().read_from_container(&mut Cursor::new(bytes)) {
            for tag in [Tag::UserComment, Tag::ImageDescription, Tag::Software] {
                let text = Self::field_text(&exif, tag);
                if !text.is_empty() {
                    return text;
                }
            }
        }
        Self::xmp_description(bytes)
    }

    /// Decode one EXIF field to text, empty on any mismatch.
    fn field_text(exif: &exif::Exif, tag: Tag) -> String {
        match exif.get_field(tag, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Ascii(lines)) => lines
                .first()
                .map(|line| Self::strip_nuls(line))
                .unwrap_or_default(),
            Some(Value::Undefined(bytes, _)) => Self::decode_comment_bytes(bytes),
            _ => String::new(),
        }
    }

    /// Decode a byte-valued comment field.
    ///
    /// An exact `UNICODE` + padding-byte header (8 bytes) is dropped when
    /// present; despite the header's name the body is UTF-8 in practice.
    /// Invalid UTF-8 yields the empty string, embedded NULs are stripped.
    pub fn decode_comment_bytes(bytes: &[u8]) -> String {
        let body = if bytes.len() >= UNICODE_HEADER_LEN && bytes.starts_with(UNICODE_HEADER) {
            &bytes[UNICODE_HEADER_LEN..]
        } else {
            bytes
        };
        Self::strip_nuls(body)
    }

    /// Strict UTF-8 decode with NUL removal; decode errors yield `""`.
    fn strip_nuls(bytes: &[u8]) -> String {
        match std::str::from_utf8(bytes) {
            Ok(text) => text.replace('\0', ""),
            Err(_) => String::new(),
        }
    }

    /// Extract the XMP `dc:description` text, walking the JPEG APP1 segments.
    fn xmp_description(bytes: &[u8]) -> String {
        match Self::find_xmp_packet(bytes) {
            Some(packet) => Self::description_from_packet(packet),
            None => String::new(),
        }
    }

    /// Locate the payload of the APP1 segment carrying the XMP namespace.
    fn find_xmp_packet(bytes: &[u8]) -> Option<&[u8]> {
        // SOI marker
        if bytes.len() < 4 || bytes[0] != 0xFF || bytes[1] != 0xD8 {
            return None;
        }
        let mut pos = 2;
        while pos + 4 <= bytes.len() {
            if bytes[pos] != 0xFF {
                return None;
            }
            let marker = bytes[pos + 1];
            // EOI or start-of-scan: no further metadata segments
            if marker == 0xD9 || marker == 0xDA {
                return None;
            }
            // RSTn and TEM carry no length field
            if (0xD0..=0xD7).contains(&marker) || marker == 0x01 {
                pos += 2;
                continue;
            }
            let len = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
            if len < 2 || pos + 2 + len > bytes.len() {
                return None;
            }
            let payload = &bytes[pos + 4..pos + 2 + len];
            if marker == 0xE1 && payload.starts_with(XMP_NAMESPACE) {
                return Some(&payload[XMP_NAMESPACE.len()..]);
            }
            pos += 2 + len;
        }
        None
    }

    /// Pull the first `dc:description` text out of an XMP packet.
    ///
    /// Handles both a bare element and the rdf:Alt wrapping, where the text
    /// sits inside the first `rdf:li`. Any structural surprise yields `""`.
    fn description_from_packet(packet: &[u8]) -> String {
        let text = String::from_utf8_lossy(packet);
        let Some(start) = text.find("<dc:description") else {
            return String::new();
        };
        let element = &text[start..];
        let (Some(open_end), Some(close)) = (element.find('>'), element.find("</dc:description>"))
        else {
            return String::new();
        };
        if open_end >= close {
            return String::new();
        }
        let body = &element[open_end + 1..close];

        let inner = match body.find("<rdf:li") {
            Some(li) => {
                let item = &body[li..];
                match (item.find('>'), item.find("</rdf:li>")) {
                    (Some(o), Some(c)) if o < c => &item[o + 1..c],
                    _ => "",
                }
            }
            None => body,
        };
        inner.trim().replace('\0', "")
    }
}
