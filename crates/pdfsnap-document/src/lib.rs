// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdfsnap-document: Photo to PDF conversion for PdfSnap.
//
// Provides photo decoding, page geometry (pixels to millimetres at an assumed
// resolution), single-page PDF generation, PDF inspection, filename
// resolution, and the chunked base64 transport encoding used when handing a
// document to platform storage.

pub mod export;
pub mod image;
pub mod pdf;

// Re-export the primary items so callers can use `pdfsnap_document::PhotoPdfWriter` etc.
pub use crate::export::naming::{default_document_name, resolve_filename, unique_filename};
pub use crate::export::transport::{decode_transport, encode_transport};
pub use crate::image::decode::decode_photo;
pub use crate::pdf::geometry::PageGeometry;
pub use crate::pdf::reader::PdfReader;
pub use crate::pdf::writer::{PhotoDocument, PhotoPdfWriter};
