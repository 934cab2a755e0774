// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Name-based identifiers for workers and workflows.
//!
//! Unlike the generated IDs elsewhere in this family of tools, workers and
//! workflows are addressed by the name the operator gave them — the name
//! *is* the primary key in the registry and on the filesystem.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! name_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

name_id! {
    /// Unique name of a supervised worker, within the registry.
    pub struct WorkerName;
}

name_id! {
    /// Unique name of a workflow document/run.
    pub struct WorkflowName;
}

/// Validate a name usable as both a registry key and a path component.
///
/// Rejects empty names, names containing a path separator, and names
/// containing a NUL byte (composes into `logs/<name>.log` and
/// `workflows/<name>/state.json`).
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name must not be empty".to_string());
    }
    if name.contains('/') || name.contains('\\') {
        return Err(format!("name {name:?} must not contain a path separator"));
    }
    if name.contains('\0') {
        return Err(format!("name {name:?} must not contain a NUL byte"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "ids_tests.rs"]
mod tests;
