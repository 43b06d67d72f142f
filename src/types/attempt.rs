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

use serde::Deserialize;
use serde::Serialize;

use crate::types::question_id::QuestionId;
use crate::types::timestamp::Timestamp;

/// One recorded instance of a user self-grading their recall of a quiz
/// question. Attempts are never edited after creation.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub question_id: QuestionId,
    pub topic_id: String,
    /// The question text at the time of the attempt.
    pub question: String,
    pub correct: bool,
    pub timestamp: Timestamp,
}

/// What the caller supplies when recording an attempt. The engine adds the
/// timestamp.
#[derive(Clone, Debug)]
pub struct QuizAnswer {
    pub question_id: QuestionId,
    pub topic_id: String,
    pub question: String,
    pub correct: bool,
}

impl QuizAnswer {
    pub fn into_attempt(self, timestamp: Timestamp) -> QuizAttempt {
        QuizAttempt {
            question_id: self.question_id,
            topic_id: self.topic_id,
            question: self.question,
            correct: self.correct,
            timestamp,
        }
    }
}
