// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: page geometry, photo-to-PDF generation, and inspection.

pub mod geometry;
pub mod reader;
pub mod writer;

pub use geometry::PageGeometry;
pub use reader::PdfReader;
pub use writer::{PhotoDocument, PhotoPdfWriter};
