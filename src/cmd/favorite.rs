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

use crate::error::Fallible;
use crate::workspace::Workspace;

pub fn toggle_favorite(
    ws: &mut Workspace,
    topic_id: &str,
    out: &mut impl Write,
) -> Fallible<()> {
    ws.resolve_topic(topic_id)?;
    let favorite = ws.progress.toggle_favorite(topic_id);
    let title = ws.topic_title(topic_id);
    if favorite {
        writeln!(out, "Added {title} to favorites.")?;
    } else {
        writeln!(out, "Removed {title} from favorites.")?;
    }
    Ok(())
}

pub fn list_favorites(ws: &Workspace, out: &mut impl Write) -> Fallible<()> {
    for topic_id in ws.progress.favorites() {
        match ws.catalog.topic(topic_id) {
            Some(topic) => writeln!(out, "{} - {}", topic.id, topic.title)?,
            None => writeln!(out, "{topic_id} - (not in catalog)")?,
        }
    }
    Ok(())
}
