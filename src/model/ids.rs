// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

/// Validation and canonicalization rules for one family of identifiers.
pub trait IdKind {
    const LABEL: &'static str;

    fn canonicalize(raw: &str) -> Result<String, IdError>;
}

/// A validated identifier addressing something inside the Figma API.
///
/// The stored value is always canonical, so two ids compare equal iff they address the same
/// object (e.g. the URL form `1-2` and the API form `1:2` of a node id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T: IdKind> Id<T> {
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdError> {
        let value = T::canonicalize(value.as_ref().trim())?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }
}

impl<T> Id<T> {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T: IdKind> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<T: IdKind> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty { kind: &'static str },
    Malformed { kind: &'static str, value: String },
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { kind } => write!(f, "{kind} must not be empty"),
            Self::Malformed { kind, value } => write!(f, "malformed {kind}: {value:?}"),
        }
    }
}

impl std::error::Error for IdError {}

fn node_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^I?\d+[:-]\d+(?:;I?\d+[:-]\d+)*$").expect("node id pattern compiles")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileKeyTag {}

impl IdKind for FileKeyTag {
    const LABEL: &'static str = "file key";

    fn canonicalize(raw: &str) -> Result<String, IdError> {
        if raw.is_empty() {
            return Err(IdError::Empty { kind: Self::LABEL });
        }
        if !raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(IdError::Malformed {
                kind: Self::LABEL,
                value: raw.to_owned(),
            });
        }
        Ok(raw.to_owned())
    }
}

pub type FileKey = Id<FileKeyTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}

impl IdKind for NodeIdTag {
    const LABEL: &'static str = "node id";

    /// Accepts both the API form (`12:34`) and the form used in share URLs (`12-34`).
    fn canonicalize(raw: &str) -> Result<String, IdError> {
        if raw.is_empty() {
            return Err(IdError::Empty { kind: Self::LABEL });
        }
        if !node_id_pattern().is_match(raw) {
            return Err(IdError::Malformed {
                kind: Self::LABEL,
                value: raw.to_owned(),
            });
        }
        Ok(raw.replace('-', ":"))
    }
}

pub type NodeId = Id<NodeIdTag>;
