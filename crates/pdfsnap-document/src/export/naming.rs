// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filename resolution for saved documents.

use chrono::{DateTime, Utc};

/// Extension every saved document carries.
pub const PDF_EXTENSION: &str = ".pdf";

const PLACEHOLDER: char = '_';

/// Default name offered in the rename prompt: `PDF_` plus the UTC time with
/// separators made filesystem-safe, e.g. `PDF_2026-10-18T09-41-07`.
pub fn default_document_name(now: DateTime<Utc>) -> String {
    format!("PDF_{}", now.format("%Y-%m-%dT%H-%M-%S"))
}

/// Turn a user-supplied name into a safe `.pdf` filename.
///
/// Whitespace is trimmed, `.pdf` is appended unless already present in any
/// case, and characters illegal in common filesystems are replaced with `_`.
/// Empty or extension-only input falls back to `default_name`.
pub fn resolve_filename(proposed: &str, default_name: &str) -> String {
    let resolved = sanitize(&with_extension(proposed.trim()));
    if is_degenerate(&resolved) {
        return sanitize(&with_extension(default_name.trim()));
    }
    resolved
}

/// First name in `name`, `name (1).pdf`, `name (2).pdf`, ... for which
/// `exists` is false. Gives up after `max_probes` suffixed attempts.
pub fn unique_filename(
    name: &str,
    max_probes: u32,
    mut exists: impl FnMut(&str) -> bool,
) -> Option<String> {
    if !exists(name) {
        return Some(name.to_string());
    }

    let (stem, ext) = if has_pdf_extension(name) {
        name.split_at(name.len() - PDF_EXTENSION.len())
    } else {
        (name, "")
    };

    (1..=max_probes)
        .map(|n| format!("{stem} ({n}){ext}"))
        .find(|candidate| !exists(candidate))
}

fn has_pdf_extension(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(PDF_EXTENSION)
}

fn with_extension(name: &str) -> String {
    if has_pdf_extension(name) {
        name.to_string()
    } else {
        format!("{name}{PDF_EXTENSION}")
    }
}

fn is_illegal(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || c.is_control()
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if is_illegal(c) { PLACEHOLDER } else { c })
        .collect()
}

fn is_degenerate(name: &str) -> bool {
    name.is_empty() || name.eq_ignore_ascii_case(PDF_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const DEFAULT: &str = "PDF_2026-10-18T09-41-07";

    #[test]
    fn replaces_illegal_characters() {
        assert_eq!(resolve_filename("My/Doc?.pdf", DEFAULT), "My_Doc_.pdf");
        let out = resolve_filename(r#"a<b>c:d"e/f\g|h?i*j"#, DEFAULT);
        assert_eq!(out, "a_b_c_d_e_f_g_h_i_j.pdf");
        assert!(!out.contains(['<', '>', ':', '"', '/', '\\', '|', '?', '*']));
    }

    #[test]
    fn control_characters_are_replaced() {
        assert_eq!(resolve_filename("tab\there", DEFAULT), "tab_here.pdf");
    }

    #[test]
    fn extension_appended_exactly_once() {
        assert_eq!(resolve_filename("receipt", DEFAULT), "receipt.pdf");
        assert_eq!(resolve_filename("receipt.pdf", DEFAULT), "receipt.pdf");
        assert_eq!(resolve_filename("receipt.PDF", DEFAULT), "receipt.PDF");
        assert_eq!(resolve_filename("receipt.Pdf", DEFAULT), "receipt.Pdf");
        assert_eq!(resolve_filename("archive.pdf.txt", DEFAULT), "archive.pdf.txt.pdf");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(resolve_filename("  Lease scan  ", DEFAULT), "Lease scan.pdf");
    }

    #[test]
    fn empty_or_extension_only_falls_back_to_default() {
        let expected = format!("{DEFAULT}.pdf");
        assert_eq!(resolve_filename("", DEFAULT), expected);
        assert_eq!(resolve_filename("   ", DEFAULT), expected);
        assert_eq!(resolve_filename(".pdf", DEFAULT), expected);
        assert_eq!(resolve_filename(" .PDF ", DEFAULT), expected);
    }

    #[test]
    fn default_name_format() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 41, 7).unwrap();
        let name = default_document_name(at);
        assert_eq!(name, DEFAULT);
        assert!(!name.contains([':', '.']));
    }

    #[test]
    fn unique_filename_suffixes_until_free() {
        let taken = ["scan.pdf", "scan (1).pdf"];
        let name = unique_filename("scan.pdf", 10, |n| taken.contains(&n));
        assert_eq!(name.as_deref(), Some("scan (2).pdf"));

        assert_eq!(
            unique_filename("fresh.pdf", 10, |_| false).as_deref(),
            Some("fresh.pdf")
        );
        assert_eq!(unique_filename("scan.pdf", 3, |_| true), None);
    }
}
