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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

const SEPARATOR: &str = "-q-";

/// Identifies a quiz question: the owning topic's id plus the question's
/// position within that topic, e.g. `nodejs-q-0`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn for_question(topic_id: &str, ordinal: usize) -> Self {
        Self(format!("{topic_id}{SEPARATOR}{ordinal}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the id back into topic id and ordinal. Ids recorded by older
    /// clients may not follow the scheme, hence the `Option`.
    pub fn parts(&self) -> Option<(&str, usize)> {
        let (topic_id, ordinal) = self.0.rsplit_once(SEPARATOR)?;
        let ordinal = ordinal.parse().ok()?;
        Some((topic_id, ordinal))
    }
}

impl Display for QuestionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
