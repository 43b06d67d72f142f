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

use crate::cmd::count_noun;
use crate::error::Fallible;
use crate::workspace::Workspace;

/// List the catalog by category. Favorites are starred.
pub fn list_topics(ws: &Workspace, out: &mut impl Write) -> Fallible<()> {
    let mut category: Option<&str> = None;
    for topic in ws.catalog.topics() {
        if category != Some(topic.category()) {
            category = Some(topic.category());
            writeln!(out, "{}", topic.category())?;
        }
        let marker = if ws.progress.is_favorite(&topic.id) {
            '*'
        } else {
            ' '
        };
        writeln!(
            out,
            "  {marker} {} - {} ({})",
            topic.id,
            topic.title,
            count_noun(topic.quiz.len(), "question")
        )?;
    }
    Ok(())
}
