// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

#[derive(Debug)]
pub enum FigmaError {
    /// The request never produced a response (connect, TLS, timeout).
    Http(reqwest::Error),
    Status {
        status: u16,
        body: String,
    },
    Auth {
        status: u16,
    },
    RateLimited,
    Decode {
        context: &'static str,
        message: String,
    },
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

impl FigmaError {
    /// Errors the caller can fix by changing its arguments or credentials.
    pub fn is_caller_error(&self) -> bool {
        match self {
            Self::Auth { .. } => true,
            Self::Status { status, .. } => *status == 400 || *status == 404,
            _ => false,
        }
    }
}

impl fmt::Display for FigmaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) if err.is_timeout() => write!(f, "figma request timed out: {err}"),
            Self::Http(err) => write!(f, "figma request failed: {err}"),
            Self::Status { status, body } if body.is_empty() => {
                write!(f, "figma api returned status {status}")
            }
            Self::Status { status, body } => {
                write!(f, "figma api returned status {status}: {body}")
            }
            Self::Auth { status } => {
                write!(f, "figma api rejected the credentials (status {status})")
            }
            Self::RateLimited => f.write_str("figma api rate limit exceeded"),
            Self::Decode { context, message } => {
                write!(f, "unexpected figma {context} response: {message}")
            }
            Self::Io { path, source } => write!(f, "cannot write {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for FigmaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FigmaError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}
