// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Creating and updating note files

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_yaml::{Mapping, Value as YamlValue};
use tracing::info;
use uuid::Uuid;

use crate::error::DetailError;
use crate::schema::{ParsedRecord, Prompter};
use crate::workspace::Workspace;

/// A fresh note path: `<note dir>/<YYYY-MM-DD>-<6 hex>.yaml`
#[must_use]
pub fn new_note_path(workspace: &Workspace) -> PathBuf {
    let date = Utc::now().format("%Y-%m-%d");
    let id = Uuid::new_v4().simple().to_string();
    workspace
        .note_dir()
        .join(format!("{date}-{}.yaml", &id[..6]))
}

/// Create a note, or update the note at `path`.
///
/// An existing note's values are offered as defaults. The validated values
/// are written back as YAML, in schema order.
///
/// # Errors
///
/// Returns `DetailError` if the schema cannot be loaded, the existing note
/// cannot be read or parsed, the prompter fails, or the file cannot be
/// written.
pub fn write_note(
    workspace: &Workspace,
    path: Option<&Path>,
    prompter: &mut dyn Prompter,
) -> Result<(PathBuf, ParsedRecord), DetailError> {
    let schema = workspace.load_note_schema()?;

    let (path, defaults) = match path {
        Some(path) => (path.to_path_buf(), read_defaults(path)?),
        None => {
            let path = new_note_path(workspace);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|source| DetailError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            (path, Mapping::new())
        }
    };

    let record = schema
        .prompt(&defaults, prompter)
        .map_err(DetailError::Prompt)?;
    let yaml = serde_yaml::to_string(record.data())?;
    std::fs::write(&path, yaml).map_err(|source| DetailError::Io {
        path: path.clone(),
        source,
    })?;

    info!(
        path = %path.display(),
        valid = record.is_valid(),
        "Wrote note"
    );
    Ok((path, record))
}

fn read_defaults(path: &Path) -> Result<Mapping, DetailError> {
    let text = std::fs::read_to_string(path).map_err(|source| DetailError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match serde_yaml::from_str::<YamlValue>(&text)? {
        YamlValue::Mapping(mapping) => mapping,
        _ => Mapping::new(),
    })
}
