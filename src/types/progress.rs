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

use std::cmp::Reverse;
use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::types::attempt::QuizAttempt;
use crate::types::question_id::QuestionId;

/// Favorites and quiz history. This is also the persisted layout.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    /// Favorited topic ids, in the order they were added. No duplicates.
    favorites: Vec<String>,
    /// Every quiz attempt, in insertion order. Append-only.
    quiz_history: Vec<QuizAttempt>,
}

/// Raw attempt tallies for a topic. Repeated attempts on the same question
/// are all counted.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
pub struct TopicStats {
    pub correct: usize,
    pub incorrect: usize,
}

impl TopicStats {
    pub fn total(&self) -> usize {
        self.correct + self.incorrect
    }
}

impl ProgressState {
    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn quiz_history(&self) -> &[QuizAttempt] {
        &self.quiz_history
    }

    pub fn is_favorite(&self, topic_id: &str) -> bool {
        self.favorites.iter().any(|id| id == topic_id)
    }

    /// Add the topic to the favorites if absent, remove it otherwise. Returns
    /// whether the topic is a favorite afterwards.
    pub fn toggle_favorite(&mut self, topic_id: &str) -> bool {
        match self.favorites.iter().position(|id| id == topic_id) {
            Some(index) => {
                self.favorites.remove(index);
                false
            }
            None => {
                self.favorites.push(topic_id.to_string());
                true
            }
        }
    }

    pub fn push_attempt(&mut self, attempt: QuizAttempt) {
        self.quiz_history.push(attempt);
    }

    pub fn clear_quiz_history(&mut self) {
        self.quiz_history.clear();
    }

    /// The most recently inserted attempt.
    pub fn last_attempt(&self) -> Option<&QuizAttempt> {
        self.quiz_history.last()
    }

    /// Drop repeated favorites, keeping the first occurrence. Blobs written by
    /// other clients are not trusted to uphold the invariant.
    pub fn dedup_favorites(&mut self) {
        let mut seen: HashSet<String> = HashSet::new();
        self.favorites.retain(|id| seen.insert(id.clone()));
    }

    /// For every question whose most recent attempt was incorrect, that
    /// attempt. Most recent first, one entry per question. Among equal
    /// timestamps the later insertion counts as more recent.
    pub fn missed_questions(&self) -> Vec<&QuizAttempt> {
        let mut attempts: Vec<(usize, &QuizAttempt)> =
            self.quiz_history.iter().enumerate().collect();
        attempts.sort_by_key(|(index, attempt)| (Reverse(attempt.timestamp), Reverse(*index)));
        let mut seen: HashSet<&QuestionId> = HashSet::new();
        let mut missed = Vec::new();
        for (_, attempt) in attempts {
            // Only the most recent attempt on a question decides its standing.
            if seen.insert(&attempt.question_id) && !attempt.correct {
                missed.push(attempt);
            }
        }
        missed
    }

    pub fn topic_stats(&self, topic_id: &str) -> TopicStats {
        let mut stats = TopicStats::default();
        for attempt in self.quiz_history.iter().filter(|a| a.topic_id == topic_id) {
            if attempt.correct {
                stats.correct += 1;
            } else {
                stats.incorrect += 1;
            }
        }
        stats
    }
}
