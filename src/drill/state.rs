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

use tokio::sync::oneshot;

use crate::catalog::LearnableItem;
use crate::content::Deck;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::session::Session;
use crate::store::sqlite::Database;
use crate::store::sqlite::ProgressTable;

pub struct ServerState<I> {
    pub port: u16,
    pub deck: Deck,
    pub total_cards: usize,
    pub mutable: Arc<Mutex<MutableState<I>>>,
    pub shutdown_tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

// Derived `Clone` would demand `I: Clone` for no reason.
impl<I> Clone for ServerState<I> {
    fn clone(&self) -> Self {
        Self {
            port: self.port,
            deck: self.deck,
            total_cards: self.total_cards,
            mutable: Arc::clone(&self.mutable),
            shutdown_tx: Arc::clone(&self.shutdown_tx),
        }
    }
}

impl<I> ServerState<I> {
    pub fn lock(&self) -> Fallible<MutexGuard<'_, MutableState<I>>> {
        self.mutable
            .lock()
            .map_err(|_| ErrorReport::new("session state is poisoned."))
    }
}

pub struct MutableState<I> {
    pub reveal: bool,
    pub progress: ProgressTable,
    pub db: Database,
    pub session: Session<I>,
    /// Set when the learner ends the session before rating every card.
    pub ended: bool,
}

impl<I: LearnableItem> MutableState<I> {
    pub fn finished(&self) -> bool {
        self.ended || self.session.is_complete()
    }
}
