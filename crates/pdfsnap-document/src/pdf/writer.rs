// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: wrap a photo in a single-page PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use ::image::DynamicImage;
use pdfsnap_core::PhotoFormat;
use pdfsnap_core::error::SnapError;
use printpdf::{
    Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};

use super::geometry::{DEFAULT_DPI, PageGeometry};
use crate::image::decode::decode_photo;

/// Creates single-page PDFs whose page is exactly the photo's physical size.
///
/// The page is sized from the pixel dimensions at an assumed resolution and
/// the image is placed at the origin filling it, so there is never any
/// cropping or letterboxing.
pub struct PhotoPdfWriter {
    /// Resolution used for the pixel to millimetre conversion.
    dpi: f32,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PhotoPdfWriter {
    pub fn new(dpi: f32) -> Self {
        Self { dpi, title: None }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Decode a captured payload and build its document.
    pub fn create_from_base64(
        &self,
        payload: &str,
        format: PhotoFormat,
    ) -> Result<PhotoDocument, SnapError> {
        let image = decode_photo(payload, format)?;
        self.create_from_image(&image)
    }

    /// Build the document for an already decoded image.
    #[instrument(skip_all, fields(width = image.width(), height = image.height(), dpi = self.dpi))]
    pub fn create_from_image(&self, image: &DynamicImage) -> Result<PhotoDocument, SnapError> {
        let geometry = PageGeometry::from_pixels(image.width(), image.height(), self.dpi)?;
        let title = self.title.as_deref().unwrap_or("PdfSnap Photo");

        info!(
            width_mm = geometry.width_mm,
            height_mm = geometry.height_mm,
            orientation = ?geometry.orientation,
            title,
            "Creating photo PDF"
        );

        // printpdf takes raw pixels; flatten any alpha onto RGB.
        let rgb_image = image.to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb_image.into_raw()),
            width: geometry.width_px as usize,
            height: geometry.height_px as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let mut doc = PdfDocument::new(title);
        let xobject_id = doc.add_image(&raw);

        // At the same dpi the page was sized with, scale 1.0 covers the page exactly.
        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: Some(1.0),
                scale_y: Some(1.0),
                dpi: Some(self.dpi),
                rotate: None,
            },
        }];

        let (page_w, page_h) = geometry.page_size();
        doc.with_pages(vec![PdfPage::new(page_w, page_h, ops)]);

        Ok(PhotoDocument { doc, geometry })
    }
}

impl Default for PhotoPdfWriter {
    fn default() -> Self {
        Self::new(DEFAULT_DPI)
    }
}

/// A generated, not yet serialised, single-page document.
pub struct PhotoDocument {
    doc: PdfDocument,
    geometry: PageGeometry,
}

impl PhotoDocument {
    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Serialise to the exact PDF byte sequence.
    #[instrument(skip(self))]
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapError> {
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        // The photo is embedded at its captured resolution, never resampled.
        let options = PdfSaveOptions {
            image_optimization: None,
            ..PdfSaveOptions::default()
        };
        let output = self.doc.save(&options, &mut warnings);

        if !output.starts_with(b"%PDF-") {
            return Err(SnapError::PdfError(
                "serialised document is missing the PDF header".into(),
            ));
        }

        debug!(bytes = output.len(), warnings = warnings.len(), "Photo PDF serialised");
        Ok(output)
    }
}

impl std::fmt::Debug for PhotoDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoDocument")
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::PdfReader;
    use ::image::{Rgb, RgbImage, Rgba, RgbaImage};
    use pdfsnap_core::Orientation;

    fn solid(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([120, 60, 200])))
    }

    #[test]
    fn page_matches_photo_size() {
        let doc = PhotoPdfWriter::default().create_from_image(&solid(1200, 800)).unwrap();
        assert_eq!(doc.geometry().orientation, Orientation::Landscape);

        let bytes = doc.to_bytes().unwrap();
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.page_count(), 1);

        let (w, h) = reader.page_size_mm(1).unwrap();
        assert!((w - 317.5).abs() < 0.5, "width {w}");
        assert!((h - 211.7).abs() < 0.5, "height {h}");
    }

    #[test]
    fn photo_fills_page_at_full_resolution() {
        let doc = PhotoPdfWriter::default().create_from_image(&solid(1200, 800)).unwrap();
        let reader = PdfReader::from_bytes(&doc.to_bytes().unwrap()).unwrap();

        assert_eq!(reader.image_dimensions(1).unwrap(), vec![(1200, 800)]);

        // 1200x800 px at 96 dpi is a 900x600 pt page.
        let placements = reader.image_placements(1).unwrap();
        assert_eq!(placements.len(), 1);
        let [a, b, c, d, e, f] = placements[0];
        assert!((a - 900.0).abs() < 0.01, "a {a}");
        assert!((d - 600.0).abs() < 0.01, "d {d}");
        assert!(b.abs() < 1e-4 && c.abs() < 1e-4);
        assert!(e.abs() < 1e-4 && f.abs() < 1e-4);
    }

    #[test]
    fn large_photos_are_not_downsampled() {
        // Raw RGB well over 2 MB.
        let doc = PhotoPdfWriter::default().create_from_image(&solid(1600, 1200)).unwrap();
        let reader = PdfReader::from_bytes(&doc.to_bytes().unwrap()).unwrap();
        assert_eq!(reader.image_dimensions(1).unwrap(), vec![(1600, 1200)]);
    }

    #[test]
    fn portrait_photo_gives_portrait_page() {
        let doc = PhotoPdfWriter::default().create_from_image(&solid(300, 600)).unwrap();
        assert_eq!(doc.geometry().orientation, Orientation::Portrait);

        let reader = PdfReader::from_bytes(&doc.to_bytes().unwrap()).unwrap();
        let (w, h) = reader.page_size_mm(1).unwrap();
        assert!(h > w);
    }

    #[test]
    fn alpha_images_are_accepted() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(20, 10, Rgba([0, 0, 0, 0])));
        let bytes = PhotoPdfWriter::default().create_from_image(&img).unwrap().to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn undecodable_payload_aborts_conversion() {
        let err = PhotoPdfWriter::default()
            .create_from_base64("aGVsbG8=", PhotoFormat::Jpeg)
            .unwrap_err();
        assert!(matches!(err, SnapError::ImageDecode(_)));
    }
}
