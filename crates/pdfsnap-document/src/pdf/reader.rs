// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: inspect generated or stored PDFs using the `lopdf` crate.

use lopdf::{Dictionary, Document, Object, ObjectId};
use pdfsnap_core::error::SnapError;
use tracing::{debug, instrument};

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Read-only view over an existing PDF.
///
/// Used to check what actually landed on disk: page count and page size.
pub struct PdfReader {
    document: Document,
}

impl PdfReader {
    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, SnapError> {
        let document = Document::load_mem(data).map_err(|err| {
            SnapError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");
        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Pixel width and height of every image XObject on a page.
    pub fn image_dimensions(&self, page_number: u32) -> Result<Vec<(u32, u32)>, SnapError> {
        let page_id = self.page_id(page_number)?;
        let images = self
            .document
            .get_page_images(page_id)
            .map_err(|err| SnapError::PdfError(format!("page {page_number} images: {err}")))?;
        Ok(images
            .iter()
            .map(|img| (img.width as u32, img.height as u32))
            .collect())
    }

    /// The `cm` matrices in a page's content stream, in drawing order.
    pub fn image_placements(&self, page_number: u32) -> Result<Vec<[f32; 6]>, SnapError> {
        let page_id = self.page_id(page_number)?;
        let content = self
            .document
            .get_and_decode_page_content(page_id)
            .map_err(|err| SnapError::PdfError(format!("page {page_number} content: {err}")))?;

        let mut placements = Vec::new();
        for op in content.operations.iter().filter(|op| op.operator == "cm") {
            let mut matrix = [0.0f32; 6];
            if op.operands.len() != 6 {
                return Err(SnapError::PdfError("malformed cm operator".into()));
            }
            for (slot, value) in matrix.iter_mut().zip(&op.operands) {
                *slot = number(value)
                    .ok_or_else(|| SnapError::PdfError("non-numeric cm operand".into()))?;
            }
            placements.push(matrix);
        }
        Ok(placements)
    }

    fn page_id(&self, page_number: u32) -> Result<ObjectId, SnapError> {
        let pages = self.document.get_pages();
        pages.get(&page_number).copied().ok_or_else(|| {
            SnapError::PdfError(format!(
                "page {} not found (document has {} pages)",
                page_number,
                pages.len()
            ))
        })
    }

    /// Width and height in millimetres of a page (1-indexed), from its MediaBox.
    pub fn page_size_mm(&self, page_number: u32) -> Result<(f32, f32), SnapError> {
        let page_id = self.page_id(page_number)?;
        let media_box = self.inherited_media_box(page_id).ok_or_else(|| {
            SnapError::PdfError(format!("page {} has no MediaBox", page_number))
        })?;

        let [llx, lly, urx, ury] = media_box;
        Ok(((urx - llx).abs() * MM_PER_PT, (ury - lly).abs() * MM_PER_PT))
    }

    /// MediaBox may live on the page or any ancestor in the page tree.
    fn inherited_media_box(&self, page_id: ObjectId) -> Option<[f32; 4]> {
        let mut current = self.document.get_dictionary(page_id).ok()?;
        // The page tree is shallow; the bound only guards against reference cycles.
        for _ in 0..32 {
            if let Some(rect) = media_box_of(current) {
                return Some(rect);
            }
            let parent = current.get(b"Parent").ok()?.as_reference().ok()?;
            current = self.document.get_dictionary(parent).ok()?;
        }
        None
    }
}

fn media_box_of(dict: &Dictionary) -> Option<[f32; 4]> {
    let array = dict.get(b"MediaBox").ok()?.as_array().ok()?;
    if array.len() != 4 {
        return None;
    }
    let mut rect = [0.0f32; 4];
    for (slot, value) in rect.iter_mut().zip(array) {
        *slot = number(value)?;
    }
    Some(rect)
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_pdf_bytes() {
        assert!(PdfReader::from_bytes(b"definitely not a pdf").is_err());
    }
}
