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

use std::io::Write;

use serde::Serialize;

use crate::cmd::OutputFormat;
use crate::error::Fallible;
use crate::types::question_id::QuestionId;
use crate::types::timestamp::Timestamp;
use crate::workspace::Workspace;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MissedExport {
    question_id: QuestionId,
    topic_id: String,
    topic_title: Option<String>,
    question: String,
    answer: Option<String>,
    missed_at: Timestamp,
}

/// Print the questions whose latest attempt was wrong, most recent first.
pub fn list_missed(
    ws: &Workspace,
    format: OutputFormat,
    out: &mut impl Write,
) -> Fallible<()> {
    let missed: Vec<MissedExport> = ws
        .progress
        .missed_questions()
        .into_iter()
        .map(|attempt| {
            let resolved = ws.catalog.question(&attempt.question_id);
            MissedExport {
                question_id: attempt.question_id.clone(),
                topic_id: attempt.topic_id.clone(),
                topic_title: ws.catalog.topic(&attempt.topic_id).map(|t| t.title.clone()),
                question: attempt.question.clone(),
                answer: resolved.map(|(_, q)| q.answer.clone()),
                missed_at: attempt.timestamp,
            }
        })
        .collect();
    match format {
        OutputFormat::Text => {
            if missed.is_empty() {
                writeln!(out, "No missed questions.")?;
            }
            for m in missed {
                let topic = m.topic_title.as_deref().unwrap_or(&m.topic_id);
                writeln!(out, "[{}] {topic}: {}", m.missed_at, m.question)?;
                if let Some(answer) = m.answer {
                    writeln!(out, "    A: {answer}")?;
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&missed)?;
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}
