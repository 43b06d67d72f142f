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
use crate::workspace::Workspace;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    topic_id: String,
    title: String,
    correct: usize,
    incorrect: usize,
}

/// Print attempt tallies for one topic, or for every topic in the catalog.
pub fn print_stats(
    ws: &Workspace,
    topic_id: Option<&str>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Fallible<()> {
    let topic_ids: Vec<String> = match topic_id {
        Some(topic_id) => {
            ws.resolve_topic(topic_id)?;
            vec![topic_id.to_string()]
        }
        None => ws.catalog.topics().iter().map(|t| t.id.clone()).collect(),
    };
    let stats: Vec<Stats> = topic_ids
        .into_iter()
        .map(|topic_id| {
            let tally = ws.progress.topic_stats(&topic_id);
            Stats {
                title: ws.topic_title(&topic_id).to_string(),
                topic_id,
                correct: tally.correct,
                incorrect: tally.incorrect,
            }
        })
        .collect();
    match format {
        OutputFormat::Text => {
            for s in stats {
                writeln!(
                    out,
                    "{} ({}): {} correct, {} incorrect",
                    s.title, s.topic_id, s.correct, s.incorrect
                )?;
            }
        }
        OutputFormat::Json => {
            let stats_json = serde_json::to_string_pretty(&stats)?;
            writeln!(out, "{stats_json}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::quiz::Outcome;
    use crate::cmd::quiz::record_attempt;
    use crate::helper::create_tmp_copy_of_test_directory;

    #[test]
    fn test_single_topic() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let mut ws = Workspace::open(Some(dir.path().display().to_string()))?;
        let mut sink = Vec::new();
        record_attempt(&mut ws, "nodejs-q-0", Outcome::Correct, &mut sink)?;
        record_attempt(&mut ws, "nodejs-q-0", Outcome::Incorrect, &mut sink)?;
        record_attempt(&mut ws, "nodejs-q-0", Outcome::Correct, &mut sink)?;
        let mut out = Vec::new();
        print_stats(&ws, Some("nodejs"), OutputFormat::Text, &mut out)?;
        assert_eq!(
            String::from_utf8_lossy(&out),
            "Node.js Event Loop (nodejs): 2 correct, 1 incorrect\n"
        );
        Ok(())
    }

    #[test]
    fn test_all_topics_json() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let mut ws = Workspace::open(Some(dir.path().display().to_string()))?;
        let mut sink = Vec::new();
        record_attempt(&mut ws, "flexbox-q-0", Outcome::Incorrect, &mut sink)?;
        let mut out = Vec::new();
        print_stats(&ws, None, OutputFormat::Json, &mut out)?;
        let json: serde_json::Value = serde_json::from_slice(&out)?;
        let stats = json.as_array().map(|a| a.len());
        assert_eq!(stats, Some(3));
        assert_eq!(json[2]["topicId"], "flexbox");
        assert_eq!(json[2]["incorrect"], 1);
        assert_eq!(json[0]["correct"], 0);
        Ok(())
    }

    #[test]
    fn test_unknown_topic() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let ws = Workspace::open(Some(dir.path().display().to_string()))?;
        let mut out = Vec::new();
        assert!(print_stats(&ws, Some("cobol"), OutputFormat::Text, &mut out).is_err());
        Ok(())
    }
}
