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

//! Composing and driving a single practice session.

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde::Serialize;

use crate::activity::record_review;
use crate::catalog::Catalog;
use crate::catalog::LearnableItem;
use crate::error::Fallible;
use crate::error::fail;
use crate::sm2::Quality;
use crate::sm2::Schedule;
use crate::sm2::compute_next;
use crate::store::ActivityStore;
use crate::store::ProgressStore;
use crate::types::item_id::ItemId;
use crate::types::progress::ProgressRecord;
use crate::types::progress::Status;
use crate::types::timestamp::Timestamp;

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionType {
    /// Due reviews and items never seen before.
    Mixed,
    /// Due reviews only.
    ReviewOnly,
}

impl Display for SessionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionType::Mixed => write!(f, "mixed"),
            SessionType::ReviewOnly => write!(f, "review-only"),
        }
    }
}

/// Optional caps on the size of a session. When a session has to be cut
/// down, due items are kept in preference to new ones.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionLimits {
    pub max_cards: Option<usize>,
    pub max_new: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct SessionCard<I> {
    pub item: I,
    /// Whether the item had a progress record when the session was built.
    pub is_review: bool,
    /// Which of the item's example contexts to show.
    pub context_index: usize,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub words_rated: usize,
    pub new_words_learned: usize,
    pub newly_mastered: usize,
}

/// What a single rating changed.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RatingOutcome {
    pub is_new_item: bool,
    pub newly_mastered: bool,
    pub schedule: Schedule,
}

pub struct Session<I> {
    cards: Vec<SessionCard<I>>,
    current_index: usize,
    summary: SessionSummary,
}

impl<I: LearnableItem + Clone> Session<I> {
    /// Select and order the cards for a session.
    pub fn build<P, R>(
        session_type: SessionType,
        catalog: &Catalog<I>,
        store: &P,
        limits: SessionLimits,
        now: Timestamp,
        rng: &mut R,
    ) -> Fallible<Self>
    where
        P: ProgressStore,
        R: Rng + ?Sized,
    {
        let mut due: Vec<SessionCard<I>> = Vec::new();
        for record in store.due_before(now.start_of_tomorrow())? {
            match catalog.get(&record.item_id) {
                Some(item) => {
                    let contexts = item.context_count().max(1);
                    due.push(SessionCard {
                        item: item.clone(),
                        is_review: true,
                        context_index: record.repetitions as usize % contexts,
                    });
                }
                None => {
                    log::debug!("Skipping progress for unknown item {}", record.item_id);
                }
            }
        }
        due.shuffle(rng);

        let mut new: Vec<SessionCard<I>> = match session_type {
            SessionType::ReviewOnly => Vec::new(),
            SessionType::Mixed => {
                let seen = store.progress_ids()?;
                catalog
                    .unseen(&seen)
                    .into_iter()
                    .map(|item| SessionCard {
                        item: item.clone(),
                        is_review: false,
                        context_index: 0,
                    })
                    .collect()
            }
        };
        new.shuffle(rng);
        if let Some(max_new) = limits.max_new {
            new.truncate(max_new);
        }

        log::debug!(
            "Composing session: {} due, {} new eligible.",
            due.len(),
            new.len()
        );

        let mut cards = due;
        cards.extend(new);
        if let Some(max_cards) = limits.max_cards {
            cards.truncate(max_cards);
        }
        cards.shuffle(rng);

        Ok(Self {
            cards,
            current_index: 0,
            summary: SessionSummary::default(),
        })
    }
}

impl<I: LearnableItem> Session<I> {
    /// The card being shown, or `None` once the session is complete.
    pub fn current_card(&self) -> Option<&SessionCard<I>> {
        self.cards.get(self.current_index)
    }

    pub fn advance(&mut self) {
        if !self.is_complete() {
            self.current_index += 1;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.cards.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[SessionCard<I>] {
        &self.cards
    }

    pub fn review_card_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_review).count()
    }

    pub fn new_card_count(&self) -> usize {
        self.cards.iter().filter(|card| !card.is_review).count()
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Apply a rating to one of this session's items: update and persist its
    /// progress record, then count the review in the activity store. If the
    /// progress write fails, no activity is recorded.
    pub fn rate<P, A>(
        &mut self,
        item_id: &ItemId,
        quality: Quality,
        now: Timestamp,
        progress: &mut P,
        activity: &mut A,
    ) -> Fallible<RatingOutcome>
    where
        P: ProgressStore,
        A: ActivityStore,
    {
        if !self.cards.iter().any(|card| card.item.id() == item_id) {
            return fail(format!("item {item_id} is not part of this session"));
        }

        let (mut record, is_new_item) = match progress.get_progress(item_id)? {
            Some(record) => (record, false),
            None => (ProgressRecord::new(item_id.clone(), now), true),
        };
        let was_mastered = record.status() == Status::Mastered;
        let schedule = compute_next(
            quality,
            record.ease_factor,
            record.interval,
            record.repetitions,
            now,
        );
        record.apply(&schedule, now);
        progress.upsert_progress(&record)?;

        log::debug!(
            "{} {} EF={:.2} I={}d R={} due={}",
            item_id,
            quality,
            schedule.ease_factor,
            schedule.interval,
            schedule.repetitions,
            schedule.next_review_date.local_date()
        );

        let newly_mastered = !was_mastered && record.status() == Status::Mastered;
        if newly_mastered {
            self.summary.newly_mastered += 1;
        }
        if is_new_item {
            self.summary.new_words_learned += 1;
        }
        self.summary.words_rated += 1;

        record_review(activity, is_new_item, now)?;

        Ok(RatingOutcome {
            is_new_item,
            newly_mastered,
            schedule,
        })
    }

    /// Rate the current card and move on to the next one.
    pub fn rate_current<P, A>(
        &mut self,
        quality: Quality,
        now: Timestamp,
        progress: &mut P,
        activity: &mut A,
    ) -> Fallible<RatingOutcome>
    where
        P: ProgressStore,
        A: ActivityStore,
    {
        let item_id = match self.current_card() {
            Some(card) => card.item.id().clone(),
            None => return fail("the session is already complete."),
        };
        let outcome = self.rate(&item_id, quality, now, progress, activity)?;
        self.advance();
        Ok(outcome)
    }
}
