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

//! Durable storage for the serialized progress blob.

pub mod adapter;
pub mod file;
pub mod memory;
pub mod sqlite;

use crate::error::Fallible;

/// The fixed identifier the progress blob is stored under.
pub const PROGRESS_KEY: &str = "study-notes-progress";

/// A slot holding a single blob.
pub trait Store {
    /// Read the blob. Returns `None` if nothing has been written yet.
    fn read(&self) -> Fallible<Option<Vec<u8>>>;

    /// Replace the blob. A subsequent `read` sees either the old or the new
    /// blob in full, never a mix.
    fn write(&self, blob: &[u8]) -> Fallible<()>;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn read(&self) -> Fallible<Option<Vec<u8>>> {
        (**self).read()
    }

    fn write(&self, blob: &[u8]) -> Fallible<()> {
        (**self).write(blob)
    }
}
