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

use std::collections::HashSet;
use std::io::Write;

use crate::error::Fallible;
use crate::workspace::Workspace;

/// The config and catalog were already validated when the workspace opened.
/// This reports favorites and attempts whose topic is no longer in the
/// catalog.
pub fn check_workspace(ws: &Workspace, out: &mut impl Write) -> Fallible<()> {
    for topic_id in ws.progress.favorites() {
        if ws.catalog.topic(topic_id).is_none() {
            writeln!(out, "orphan favorite: {topic_id}")?;
        }
    }
    let mut reported: HashSet<&str> = HashSet::new();
    for attempt in ws.progress.quiz_history() {
        let id = attempt.question_id.as_str();
        if ws.catalog.question(&attempt.question_id).is_none() && reported.insert(id) {
            writeln!(out, "orphan attempt: {id}")?;
        }
    }
    writeln!(out, "ok")?;
    Ok(())
}
