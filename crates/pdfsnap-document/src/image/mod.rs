// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module: turning captured base64 payloads into decoded images.

pub mod decode;

pub use decode::decode_photo;
