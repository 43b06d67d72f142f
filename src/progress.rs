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
use crate::store::adapter::StoreAdapter;
use crate::types::attempt::QuizAnswer;
use crate::types::attempt::QuizAttempt;
use crate::types::progress::ProgressState;
use crate::types::progress::TopicStats;
use crate::types::timestamp::Timestamp;

/// The authoritative progress state, kept in sync with a store.
///
/// Starts uninitialized. Reads before the first [`Progress::load`] return
/// empty results; mutations before it load first, so a saved blob is never
/// overwritten by an empty state. Every mutation is saved immediately.
pub struct Progress<S: Store> {
    adapter: StoreAdapter<S>,
    /// `None` until the first load.
    state: Option<ProgressState>,
}

impl<S: Store> Progress<S> {
    pub fn new(store: S) -> Self {
        Self {
            adapter: StoreAdapter::new(store),
            state: None,
        }
    }

    /// Load the saved state. Only the first call does anything.
    pub fn load(&mut self) {
        if self.state.is_none() {
            self.state = Some(self.adapter.load());
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    /// Whether changes are still being persisted.
    pub fn is_persistent(&self) -> bool {
        self.adapter.is_persistent()
    }

    pub fn state(&self) -> Option<&ProgressState> {
        self.state.as_ref()
    }

    pub fn favorites(&self) -> &[String] {
        match &self.state {
            Some(state) => state.favorites(),
            None => &[],
        }
    }

    pub fn quiz_history(&self) -> &[QuizAttempt] {
        match &self.state {
            Some(state) => state.quiz_history(),
            None => &[],
        }
    }

    pub fn is_favorite(&self, topic_id: &str) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.is_favorite(topic_id))
    }

    /// Returns whether the topic is a favorite afterwards.
    pub fn toggle_favorite(&mut self, topic_id: &str) -> bool {
        let favorite = self.mutate(|state| state.toggle_favorite(topic_id));
        log::debug!("Topic {topic_id} favorite: {favorite}.");
        favorite
    }

    /// Record an attempt stamped with the current time.
    pub fn add_quiz_result(&mut self, answer: QuizAnswer) -> QuizAttempt {
        self.add_quiz_result_at(answer, Timestamp::now())
    }

    /// Record an attempt at the given time. The timestamp is raised to the
    /// previous attempt's if it is earlier, so the history stays ordered.
    pub fn add_quiz_result_at(&mut self, answer: QuizAnswer, at: Timestamp) -> QuizAttempt {
        let attempt = self.mutate(|state| {
            let timestamp = match state.last_attempt() {
                Some(last) if last.timestamp > at => last.timestamp,
                _ => at,
            };
            let attempt = answer.into_attempt(timestamp);
            state.push_attempt(attempt.clone());
            attempt
        });
        log::debug!(
            "Recorded attempt on {}: correct={}.",
            attempt.question_id,
            attempt.correct
        );
        attempt
    }

    pub fn clear_quiz_history(&mut self) {
        self.mutate(|state| state.clear_quiz_history());
        log::debug!("Cleared quiz history.");
    }

    pub fn missed_questions(&self) -> Vec<&QuizAttempt> {
        match &self.state {
            Some(state) => state.missed_questions(),
            None => Vec::new(),
        }
    }

    pub fn topic_stats(&self, topic_id: &str) -> TopicStats {
        match &self.state {
            Some(state) => state.topic_stats(topic_id),
            None => TopicStats::default(),
        }
    }

    fn mutate<R>(&mut self, f: impl FnOnce(&mut ProgressState) -> R) -> R {
        let adapter = &mut self.adapter;
        let state = self.state.get_or_insert_with(|| adapter.load());
        let result = f(state);
        adapter.save(state);
        result
    }
}
