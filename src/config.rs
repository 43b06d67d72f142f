// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::store::PROGRESS_KEY;

pub const CONFIG_FILE: &str = "studynotes.toml";

/// Where the progress blob is kept.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// A JSON file.
    #[default]
    Json,
    /// A SQLite database.
    Sqlite,
}

impl StorageKind {
    /// The progress file's name, derived from the storage key.
    pub fn file_name(self) -> String {
        match self {
            StorageKind::Json => format!("{PROGRESS_KEY}.json"),
            StorageKind::Sqlite => format!("{PROGRESS_KEY}.db"),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub storage: StorageKind,
    /// The catalog directory, relative to the workspace.
    pub catalog: PathBuf,
    /// Reject topic and question ids that are not in the catalog.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            catalog: PathBuf::from("topics"),
            strict: true,
        }
    }
}

impl Config {
    /// Read the workspace's config file, or the defaults if there is none.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE}, using defaults.");
            return Ok(Self::default());
        }
        let content = read_to_string(&path)?;
        Self::parse(&content)
            .map_err(|e| ErrorReport::new(format!("invalid {CONFIG_FILE}: {e}")))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
