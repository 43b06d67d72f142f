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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::Store;

/// A store that lives in memory. Clones share the same slot, so a test can
/// keep a handle and inspect what the engine wrote.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Slot>>,
}

#[derive(Default)]
struct Slot {
    blob: Option<Vec<u8>>,
    fail_reads: bool,
    fail_writes: bool,
    write_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds the given bytes.
    pub fn with_blob(blob: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        if let Ok(mut slot) = store.acquire() {
            slot.blob = Some(blob.into());
        }
        store
    }

    /// Make every subsequent read fail, as unavailable storage would.
    pub fn set_fail_reads(&self, fail_reads: bool) -> Fallible<()> {
        self.acquire()?.fail_reads = fail_reads;
        Ok(())
    }

    /// Make every subsequent write fail, as a full or unavailable storage
    /// backend would.
    pub fn set_fail_writes(&self, fail_writes: bool) -> Fallible<()> {
        self.acquire()?.fail_writes = fail_writes;
        Ok(())
    }

    /// The current contents of the slot.
    pub fn blob(&self) -> Fallible<Option<Vec<u8>>> {
        Ok(self.acquire()?.blob.clone())
    }

    /// How many writes have succeeded.
    pub fn write_count(&self) -> Fallible<usize> {
        Ok(self.acquire()?.write_count)
    }

    fn acquire(&self) -> Fallible<MutexGuard<'_, Slot>> {
        self.inner
            .lock()
            .map_err(|_| ErrorReport::new("memory store lock poisoned"))
    }
}

impl Store for MemoryStore {
    fn read(&self) -> Fallible<Option<Vec<u8>>> {
        let slot = self.acquire()?;
        if slot.fail_reads {
            return fail("storage unavailable.");
        }
        Ok(slot.blob.clone())
    }

    fn write(&self, blob: &[u8]) -> Fallible<()> {
        let mut slot = self.acquire()?;
        if slot.fail_writes {
            return fail("storage quota exceeded.");
        }
        slot.blob = Some(blob.to_vec());
        slot.write_count += 1;
        Ok(())
    }
}
