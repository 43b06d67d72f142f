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

use crate::store::Store;
use crate::types::progress::ProgressState;

/// Reads and writes the progress state through a [`Store`]. Never fails: a
/// missing or malformed blob loads as the empty state. A failed read or write
/// puts the adapter in memory-only mode for the rest of the session, so an
/// unreadable blob is never overwritten.
pub struct StoreAdapter<S: Store> {
    store: S,
    persistent: bool,
}

impl<S: Store> StoreAdapter<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            persistent: true,
        }
    }

    pub fn load(&mut self) -> ProgressState {
        let blob: Vec<u8> = match self.store.read() {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                log::debug!("No saved progress, starting fresh.");
                return ProgressState::default();
            }
            Err(e) => {
                log::warn!(
                    "Failed to read saved progress, it will not be saved this session: {e}"
                );
                self.persistent = false;
                return ProgressState::default();
            }
        };
        match serde_json::from_slice::<ProgressState>(&blob) {
            Ok(mut state) => {
                state.dedup_favorites();
                log::debug!(
                    "Loaded {} favorites and {} quiz attempts.",
                    state.favorites().len(),
                    state.quiz_history().len()
                );
                state
            }
            Err(e) => {
                log::warn!("Saved progress is malformed, starting fresh: {e}");
                ProgressState::default()
            }
        }
    }

    pub fn save(&mut self, state: &ProgressState) {
        if !self.persistent {
            return;
        }
        let blob: Vec<u8> = match serde_json::to_vec(state) {
            Ok(blob) => blob,
            Err(e) => {
                log::error!("Failed to serialize progress: {e}");
                return;
            }
        };
        if let Err(e) = self.store.write(&blob) {
            log::warn!("Failed to save progress, it will not be remembered this session: {e}");
            self.persistent = false;
        }
    }

    /// False once a read or write has failed.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::store::memory::MemoryStore;
    use crate::types::attempt::QuizAnswer;
    use crate::types::question_id::QuestionId;
    use crate::types::timestamp::Timestamp;

    fn sample_state() -> ProgressState {
        let mut state = ProgressState::default();
        state.toggle_favorite("nodejs");
        state.toggle_favorite("rust");
        for (ordinal, correct) in [(0, false), (1, true), (0, true)] {
            let answer = QuizAnswer {
                question_id: QuestionId::for_question("nodejs", ordinal),
                topic_id: "nodejs".to_string(),
                question: format!("Question {ordinal}"),
                correct,
            };
            let timestamp = Timestamp::from_millis(100 + ordinal as i64);
            state.push_attempt(answer.into_attempt(timestamp));
        }
        state
    }

    #[test]
    fn test_round_trip() {
        let state = sample_state();
        let mut adapter = StoreAdapter::new(MemoryStore::new());
        adapter.save(&state);
        assert_eq!(adapter.load(), state);
    }

    #[test]
    fn test_missing_blob_loads_default() {
        let mut adapter = StoreAdapter::new(MemoryStore::new());
        assert_eq!(adapter.load(), ProgressState::default());
    }

    #[test]
    fn test_malformed_blobs_load_default() {
        let blobs: [&[u8]; 6] = [
            b"not json at all",
            b"{\"favorites\": [\"a\"], \"quizHistory\": ",
            b"[1, 2, 3]",
            b"{\"favorites\": \"a\", \"quizHistory\": []}",
            b"{\"favorites\": [], \"quizHistory\": [{\"questionId\": 1}]}",
            &[0xff, 0xfe, 0x00],
        ];
        for blob in blobs {
            let mut adapter = StoreAdapter::new(MemoryStore::with_blob(blob));
            let state = adapter.load();
            assert!(state.favorites().is_empty());
            assert!(state.quiz_history().is_empty());
        }
    }

    #[test]
    fn test_missing_field_loads_default() {
        let mut adapter = StoreAdapter::new(MemoryStore::with_blob("{\"favorites\": [\"a\"]}"));
        assert_eq!(adapter.load(), ProgressState::default());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let blob = "{\"favorites\": [\"a\"], \"quizHistory\": [], \"theme\": \"dark\"}";
        let mut adapter = StoreAdapter::new(MemoryStore::with_blob(blob));
        assert_eq!(adapter.load().favorites(), ["a"]);
    }

    #[test]
    fn test_duplicate_favorites_collapse_on_load() {
        let blob = "{\"favorites\": [\"a\", \"b\", \"a\"], \"quizHistory\": []}";
        let mut adapter = StoreAdapter::new(MemoryStore::with_blob(blob));
        assert_eq!(adapter.load().favorites(), ["a", "b"]);
    }

    #[test]
    fn test_failed_write_switches_to_memory_only() -> Fallible<()> {
        let store = MemoryStore::new();
        let handle = store.clone();
        let mut adapter = StoreAdapter::new(store);
        adapter.save(&ProgressState::default());
        assert_eq!(handle.write_count()?, 1);

        handle.set_fail_writes(true)?;
        adapter.save(&sample_state());
        assert!(!adapter.is_persistent());

        // Storage recovers, but the session stays memory-only.
        handle.set_fail_writes(false)?;
        adapter.save(&sample_state());
        assert_eq!(handle.write_count()?, 1);
        assert_eq!(adapter.load(), ProgressState::default());
        Ok(())
    }

    #[test]
    fn test_failed_read_switches_to_memory_only() -> Fallible<()> {
        let mut saved = sample_state();
        saved.toggle_favorite("css");
        let blob = serde_json::to_vec(&saved)?;
        let store = MemoryStore::with_blob(blob.clone());
        let handle = store.clone();
        handle.set_fail_reads(true)?;
        let mut adapter = StoreAdapter::new(store);
        assert_eq!(adapter.load(), ProgressState::default());
        assert!(!adapter.is_persistent());

        adapter.save(&ProgressState::default());
        assert_eq!(handle.blob()?, Some(blob));
        assert_eq!(handle.write_count()?, 0);
        Ok(())
    }

    #[test]
    fn test_malformed_blob_stays_persistent() {
        let mut adapter = StoreAdapter::new(MemoryStore::with_blob("{{{"));
        adapter.load();
        assert!(adapter.is_persistent());
    }
}
