// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page geometry: the physical page that exactly fits a photo.

use pdfsnap_core::Orientation;
use pdfsnap_core::error::SnapError;
use printpdf::Mm;

/// Resolution assumed for photos, which carry no reliable physical size.
pub const DEFAULT_DPI: f32 = 96.0;

const MM_PER_INCH: f64 = 25.4;

/// Physical page size derived from pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_px: u32,
    pub height_px: u32,
    pub dpi: f32,
    pub width_mm: f32,
    pub height_mm: f32,
    pub orientation: Orientation,
}

impl PageGeometry {
    /// `physical = pixels * 25.4 / dpi`; landscape iff wider than tall.
    pub fn from_pixels(width_px: u32, height_px: u32, dpi: f32) -> Result<Self, SnapError> {
        if width_px == 0 || height_px == 0 {
            return Err(SnapError::InvalidInput(format!(
                "image has no area ({width_px}x{height_px})"
            )));
        }
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(SnapError::InvalidInput(format!("invalid resolution {dpi} dpi")));
        }

        let to_mm = |px: u32| (f64::from(px) * MM_PER_INCH / f64::from(dpi)) as f32;
        let orientation = if width_px > height_px {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };

        Ok(Self {
            width_px,
            height_px,
            dpi,
            width_mm: to_mm(width_px),
            height_mm: to_mm(height_px),
            orientation,
        })
    }

    /// Page dimensions in printpdf's Mm units.
    pub fn page_size(&self) -> (Mm, Mm) {
        (Mm(self.width_mm), Mm(self.height_mm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn landscape_photo_at_96_dpi() {
        let g = PageGeometry::from_pixels(1200, 800, DEFAULT_DPI).unwrap();
        assert_eq!(g.orientation, Orientation::Landscape);
        assert!(close(g.width_mm, 317.5), "width {}", g.width_mm);
        assert!(close(g.height_mm, 211.67), "height {}", g.height_mm);
    }

    #[test]
    fn square_is_portrait() {
        let g = PageGeometry::from_pixels(500, 500, DEFAULT_DPI).unwrap();
        assert_eq!(g.orientation, Orientation::Portrait);
        assert!(close(g.width_mm, g.height_mm));
    }

    #[test]
    fn orientation_rule_holds_across_sizes() {
        for w in [1u32, 2, 3, 95, 96, 97, 640, 1080, 4032] {
            for h in [1u32, 2, 3, 95, 96, 97, 480, 1920, 3024] {
                let g = PageGeometry::from_pixels(w, h, DEFAULT_DPI).unwrap();
                assert_eq!(g.orientation == Orientation::Landscape, w > h, "{w}x{h}");
                assert_eq!(g.width_mm > g.height_mm, w > h, "{w}x{h}");
            }
        }
    }

    #[test]
    fn one_inch_of_pixels_is_one_inch_of_paper() {
        let g = PageGeometry::from_pixels(300, 150, 300.0).unwrap();
        assert!(close(g.width_mm, 25.4));
        assert!(close(g.height_mm, 12.7));
    }

    #[test]
    fn rejects_empty_image_and_bad_dpi() {
        assert!(PageGeometry::from_pixels(0, 10, DEFAULT_DPI).is_err());
        assert!(PageGeometry::from_pixels(10, 0, DEFAULT_DPI).is_err());
        assert!(PageGeometry::from_pixels(10, 10, 0.0).is_err());
        assert!(PageGeometry::from_pixels(10, 10, f32::NAN).is_err());
    }
}
