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

use std::env::current_dir;
use std::path::Path;
use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::catalog::Topic;
use crate::config::Config;
use crate::config::StorageKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::progress::Progress;
use crate::store::Store;
use crate::store::file::FileStore;
use crate::store::memory::MemoryStore;
use crate::store::sqlite::SqliteStore;

/// Everything a command needs: the configuration, the topic catalog, and the
/// loaded progress engine.
pub struct Workspace {
    pub directory: PathBuf,
    pub config: Config,
    pub catalog: Catalog,
    pub progress: Progress<Box<dyn Store>>,
}

impl Workspace {
    pub fn open(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };
        let config = Config::load(&directory)?;

        let catalog_dir = directory.join(&config.catalog);
        let catalog = if catalog_dir.exists() {
            Catalog::load(&catalog_dir)?
        } else {
            log::warn!(
                "Catalog directory {} does not exist, no topics loaded.",
                catalog_dir.display()
            );
            Catalog::new(Vec::new())?
        };

        let store = open_store(&directory, config.storage);
        let mut progress = Progress::new(store);
        progress.load();

        Ok(Self {
            directory,
            config,
            catalog,
            progress,
        })
    }

    /// Look up a topic. In strict mode, unknown ids are an error; otherwise
    /// they resolve to `None`.
    pub fn resolve_topic(&self, topic_id: &str) -> Fallible<Option<&Topic>> {
        match self.catalog.topic(topic_id) {
            Some(topic) => Ok(Some(topic)),
            None if self.config.strict => fail(format!("no topic with id '{topic_id}'.")),
            None => {
                if topic_id.trim().is_empty() {
                    log::warn!("Recording an empty topic id.");
                }
                Ok(None)
            }
        }
    }

    /// The display title of a topic, falling back to its id.
    pub fn topic_title<'a>(&'a self, topic_id: &'a str) -> &'a str {
        match self.catalog.topic(topic_id) {
            Some(topic) => &topic.title,
            None => topic_id,
        }
    }
}

/// Storage that cannot be opened degrades to memory-only rather than failing
/// the command.
fn open_store(directory: &Path, kind: StorageKind) -> Box<dyn Store> {
    let path = directory.join(kind.file_name());
    match kind {
        StorageKind::Json => Box::new(FileStore::new(path)),
        StorageKind::Sqlite => {
            let opened = path
                .to_str()
                .ok_or_else(|| ErrorReport::new("invalid path"))
                .and_then(SqliteStore::new);
            match opened {
                Ok(store) => Box::new(store),
                Err(e) => {
                    log::warn!(
                        "Failed to open {}, progress will not be saved: {e}",
                        path.display()
                    );
                    Box::new(MemoryStore::new())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;
    use crate::types::attempt::QuizAnswer;
    use crate::types::question_id::QuestionId;

    #[test]
    fn test_non_existent_directory() {
        let result = Workspace::open(Some("./derpherp".to_string()));
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: directory does not exist.".to_string())
        );
    }

    #[test]
    fn test_open_fixture() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let ws = Workspace::open(Some(dir.path().display().to_string()))?;
        assert!(ws.progress.is_ready());
        assert_eq!(ws.catalog.len(), 3);
        assert_eq!(ws.topic_title("nodejs"), "Node.js Event Loop");
        assert_eq!(ws.topic_title("gone"), "gone");
        Ok(())
    }

    #[test]
    fn test_progress_survives_reopen() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let path = dir.path().display().to_string();
        {
            let mut ws = Workspace::open(Some(path.clone()))?;
            ws.progress.toggle_favorite("nodejs");
            ws.progress.add_quiz_result(QuizAnswer {
                question_id: QuestionId::for_question("nodejs", 0),
                topic_id: "nodejs".to_string(),
                question: "Why?".to_string(),
                correct: false,
            });
        }
        let ws = Workspace::open(Some(path))?;
        assert_eq!(ws.progress.favorites(), ["nodejs"]);
        assert_eq!(ws.progress.quiz_history().len(), 1);
        assert!(dir.path().join(StorageKind::Json.file_name()).exists());
        Ok(())
    }

    #[test]
    fn test_sqlite_storage() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        std::fs::write(dir.path().join("studynotes.toml"), "storage = \"sqlite\"\n")?;
        let path = dir.path().display().to_string();
        {
            let mut ws = Workspace::open(Some(path.clone()))?;
            ws.progress.toggle_favorite("flexbox");
        }
        let ws = Workspace::open(Some(path))?;
        assert_eq!(ws.progress.favorites(), ["flexbox"]);
        assert!(dir.path().join(StorageKind::Sqlite.file_name()).exists());
        Ok(())
    }

    #[test]
    fn test_corrupt_progress_file() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let progress_path = dir.path().join(StorageKind::Json.file_name());
        std::fs::write(progress_path, "{\"favorites\": 7}")?;
        let ws = Workspace::open(Some(dir.path().display().to_string()))?;
        assert!(ws.progress.favorites().is_empty());
        assert!(ws.progress.quiz_history().is_empty());
        Ok(())
    }

    #[test]
    fn test_resolve_topic() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let mut ws = Workspace::open(Some(dir.path().display().to_string()))?;
        assert!(ws.resolve_topic("nodejs")?.is_some());
        assert!(ws.resolve_topic("cobol").is_err());
        ws.config.strict = false;
        assert!(ws.resolve_topic("cobol")?.is_none());
        Ok(())
    }

    #[test]
    fn test_missing_catalog_directory() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let ws = Workspace::open(Some(dir.path().display().to_string()))?;
        assert!(ws.catalog.is_empty());
        Ok(())
    }
}
