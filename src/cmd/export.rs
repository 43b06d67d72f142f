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
use crate::types::progress::ProgressState;
use crate::workspace::Workspace;

/// Print the progress state in its persisted layout.
pub fn export_progress(ws: &Workspace, out: &mut impl Write) -> Fallible<()> {
    let empty = ProgressState::default();
    let state: &ProgressState = ws.progress.state().unwrap_or(&empty);
    let json: String = serde_json::to_string_pretty(state)?;
    writeln!(out, "{json}")?;
    Ok(())
}
