// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared load/save machinery for the registry and per-workflow state
//! documents: absent file → default, unparseable file → quarantine and
//! warn, then default.

use crate::atomic::{quarantine, save_atomic};
use crate::error::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub fn load_or_default<T>(path: &Path) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default + Serialize,
{
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(e.into()),
    };
    match serde_json::from_slice::<T>(&bytes) {
        Ok(doc) => Ok(doc),
        Err(_) => {
            quarantine(path)?;
            tracing::warn!(path = %path.display(), "corrupt state file");
            let fresh = T::default();
            save(path, &fresh)?;
            Ok(fresh)
        }
    }
}

pub fn save<T: Serialize>(path: &Path, doc: &T) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(doc)?;
    save_atomic(path, &bytes)
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
