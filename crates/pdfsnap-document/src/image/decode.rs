// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Photo decoding: base64 payload from the camera plugin to a `DynamicImage`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat};
use pdfsnap_core::PhotoFormat;
use pdfsnap_core::error::SnapError;
use tracing::{debug, instrument};

/// Decode a base64 photo payload into pixels.
///
/// Accepts a bare base64 string or a `data:image/...;base64,` URL, and
/// tolerates embedded line breaks. The container format is sniffed from the
/// bytes first; the platform's `format` tag is only a fallback hint, since
/// plugins report `jpeg` whenever they are unsure.
#[instrument(skip(payload), fields(payload_len = payload.len(), format = format.tag()))]
pub fn decode_photo(payload: &str, format: PhotoFormat) -> Result<DynamicImage, SnapError> {
    let bytes = decode_payload(payload)?;

    let decoded = match image::load_from_memory(&bytes) {
        Ok(img) => img,
        Err(sniff_err) => image::load_from_memory_with_format(&bytes, image_format(format))
            .map_err(|err| {
                SnapError::ImageDecode(format!(
                    "failed to decode {} image: {err} ({sniff_err})",
                    format.tag()
                ))
            })?,
    };

    debug!(
        width = decoded.width(),
        height = decoded.height(),
        "Photo decoded"
    );
    Ok(decoded)
}

fn decode_payload(payload: &str) -> Result<Vec<u8>, SnapError> {
    let body = match payload.find(";base64,") {
        Some(idx) if payload.starts_with("data:") => &payload[idx + ";base64,".len()..],
        _ => payload,
    };
    let body = body.trim();
    if body.is_empty() {
        return Err(SnapError::InvalidInput("no image data received".into()));
    }

    let compact: String;
    let body = if body.contains(char::is_whitespace) {
        compact = body.chars().filter(|c| !c.is_whitespace()).collect();
        compact.as_str()
    } else {
        body
    };

    STANDARD
        .decode(body)
        .map_err(|err| SnapError::InvalidInput(format!("photo payload is not valid base64: {err}")))
}

fn image_format(format: PhotoFormat) -> ImageFormat {
    match format {
        PhotoFormat::Jpeg => ImageFormat::Jpeg,
        PhotoFormat::Png => ImageFormat::Png,
        PhotoFormat::Gif => ImageFormat::Gif,
        PhotoFormat::Webp => ImageFormat::WebP,
        PhotoFormat::Bmp => ImageFormat::Bmp,
        PhotoFormat::Tiff => ImageFormat::Tiff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    fn png_base64(width: u32, height: u32) -> String {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([10, 200, 30])));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        STANDARD.encode(buf.into_inner())
    }

    #[test]
    fn decodes_plain_payload() {
        let img = decode_photo(&png_base64(12, 7), PhotoFormat::Png).unwrap();
        assert_eq!((img.width(), img.height()), (12, 7));
    }

    #[test]
    fn wrong_format_tag_still_decodes() {
        // Plugins default the tag to jpeg; the bytes decide.
        let img = decode_photo(&png_base64(4, 9), PhotoFormat::Jpeg).unwrap();
        assert_eq!((img.width(), img.height()), (4, 9));
    }

    #[test]
    fn accepts_data_url_and_line_breaks() {
        let b64 = png_base64(3, 3);
        let (a, b) = b64.split_at(b64.len() / 2);
        let wrapped = format!("data:image/png;base64,{a}\n{b}");
        let img = decode_photo(&wrapped, PhotoFormat::Png).unwrap();
        assert_eq!(img.width(), 3);
    }

    #[test]
    fn empty_payload_is_invalid_input() {
        let err = decode_photo("   ", PhotoFormat::Jpeg).unwrap_err();
        assert!(matches!(err, SnapError::InvalidInput(_)));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_photo(&STANDARD.encode(b"not an image"), PhotoFormat::Jpeg).unwrap_err();
        assert!(matches!(err, SnapError::ImageDecode(_)));
    }
}
