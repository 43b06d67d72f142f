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

//! The read-only topic catalog. Each topic is a TOML file somewhere under the
//! catalog directory.

use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;
use std::time::Instant;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::question_id::QuestionId;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub code_examples: Vec<CodeExample>,
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeExample {
    pub title: String,
    #[serde(default)]
    pub language: Option<String>,
    pub code: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuizQuestion {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

const UNCATEGORIZED: &str = "Uncategorized";

impl Topic {
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// The quiz questions paired with their ids.
    pub fn questions(&self) -> impl Iterator<Item = (QuestionId, &QuizQuestion)> {
        self.quiz
            .iter()
            .enumerate()
            .map(|(ordinal, q)| (QuestionId::for_question(&self.id, ordinal), q))
    }
}

pub struct Catalog {
    /// Sorted by category, then title.
    topics: Vec<Topic>,
    /// Topic id to index in `topics`.
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(mut topics: Vec<Topic>) -> Fallible<Self> {
        topics.sort_by(|a, b| {
            (a.category(), a.title.as_str(), a.id.as_str()).cmp(&(
                b.category(),
                b.title.as_str(),
                b.id.as_str(),
            ))
        });
        let mut index = HashMap::new();
        for (i, topic) in topics.iter().enumerate() {
            if topic.id.trim().is_empty() {
                return fail(format!("topic '{}' has an empty id.", topic.title));
            }
            if index.insert(topic.id.clone(), i).is_some() {
                return fail(format!("duplicate topic id: {}.", topic.id));
            }
        }
        Ok(Self { topics, index })
    }

    /// Load every `.toml` file under the directory.
    pub fn load(directory: &Path) -> Fallible<Self> {
        if !directory.exists() {
            return fail(format!(
                "catalog directory {} does not exist.",
                directory.display()
            ));
        }
        log::debug!("Loading catalog...");
        let start = Instant::now();
        let mut topics = Vec::new();
        for entry in WalkDir::new(directory) {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
                topics.push(parse_topic(path)?);
            }
        }
        let catalog = Self::new(topics)?;
        let duration = start.elapsed().as_millis();
        log::debug!(
            "Catalog loaded in {duration}ms: {} topics.",
            catalog.topics.len()
        );
        Ok(catalog)
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.index.get(id).map(|i| &self.topics[*i])
    }

    pub fn question(&self, id: &QuestionId) -> Option<(&Topic, &QuizQuestion)> {
        let (topic_id, ordinal) = id.parts()?;
        let topic = self.topic(topic_id)?;
        let question = topic.quiz.get(ordinal)?;
        Some((topic, question))
    }

    /// Distinct categories, in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for topic in &self.topics {
            if categories.last() != Some(&topic.category()) {
                categories.push(topic.category());
            }
        }
        categories
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

fn parse_topic(path: &Path) -> Fallible<Topic> {
    let content = read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ErrorReport::new(format!("failed to parse {}: {e}", path.display())))
}
