//! Magic-byte MIME detection.
//!
//! Optional hardening for the upload path: declared content types are
//! trusted, so this only fills in missing types and flags mismatches.

/// Pluggable content-sniffing strategy, kept separate from the put-object
/// flow so it can be unit-tested independently.
pub trait MimeSniff: Send + Sync {
    fn sniff(&self, bytes: &[u8]) -> Option<&'static str>;
}

/// Detects the storefront's media types from leading magic bytes.
pub struct MagicByteSniffer;

impl MimeSniff for MagicByteSniffer {
    fn sniff(&self, bytes: &[u8]) -> Option<&'static str> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some("image/jpeg");
        }
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some("image/png");
        }
        if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            return Some("image/gif");
        }
        if bytes.len() >= 12 && &bytes[..4] == b"RIFF" {
            return match &bytes[8..12] {
                b"WEBP" => Some("image/webp"),
                b"WAVE" => Some("audio/wav"),
                _ => None,
            };
        }
        if bytes.starts_with(b"ID3") {
            return Some("audio/mpeg");
        }
        // Raw MPEG audio frame sync: 11 set bits.
        if bytes.len() >= 2 && bytes[0] == 0xFF && (bytes[1] & 0xE0) == 0xE0 {
            return Some("audio/mpeg");
        }
        if bytes.starts_with(b"OggS") {
            return Some("audio/ogg");
        }
        if bytes.starts_with(b"fLaC") {
            return Some("audio/flac");
        }
        if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
            return Some("video/mp4");
        }
        // EBML header, shared by the Matroska family (webm/mkv).
        if bytes.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
            return Some("video/webm");
        }
        if bytes.starts_with(b"%PDF") {
            return Some("application/pdf");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sniff(bytes: &[u8]) -> Option<&'static str> {
        MagicByteSniffer.sniff(bytes)
    }

    #[test]
    fn test_detects_jpeg() {
        assert_eq!(sniff(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]), Some("image/jpeg"));
    }

    #[test]
    fn test_detects_png() {
        assert_eq!(sniff(b"\x89PNG\r\n\x1a\nrest"), Some("image/png"));
    }

    #[test]
    fn test_detects_riff_variants() {
        assert_eq!(sniff(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff(b"RIFF\x00\x00\x00\x00WAVEfmt "), Some("audio/wav"));
        assert_eq!(sniff(b"RIFF\x00\x00\x00\x00AVI LIST"), None);
    }

    #[test]
    fn test_detects_mp3_with_and_without_id3() {
        assert_eq!(sniff(b"ID3\x04\x00"), Some("audio/mpeg"));
        assert_eq!(sniff(&[0xFF, 0xFB, 0x90, 0x00]), Some("audio/mpeg"));
    }

    #[test]
    fn test_detects_mp4_at_ftyp_offset() {
        assert_eq!(sniff(b"\x00\x00\x00\x20ftypisom"), Some("video/mp4"));
    }

    #[test]
    fn test_unknown_and_short_buffers_yield_none() {
        assert_eq!(sniff(b"plain text file"), None);
        assert_eq!(sniff(b""), None);
        assert_eq!(sniff(&[0xFF]), None);
    }
}
