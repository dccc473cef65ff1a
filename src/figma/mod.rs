// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Thin client for the parts of the Figma REST API the server needs.

mod client;
mod error;
#[cfg(test)]
pub(crate) mod stub;

pub use client::{FigmaAuth, FigmaClient, ImageFormat, DEFAULT_BASE_URL};
pub use error::FigmaError;
