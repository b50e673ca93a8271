// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export module: everything between a finished document and a storage write:
// choosing the filename and encoding the bytes for the storage API.

pub mod naming;
pub mod transport;
