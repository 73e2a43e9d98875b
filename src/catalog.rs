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

use std::collections::HashMap;
use std::collections::HashSet;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::item_id::ItemId;

/// Anything that can be scheduled for review.
pub trait LearnableItem {
    fn id(&self) -> &ItemId;

    /// How many example contexts the item can be shown in.
    fn context_count(&self) -> usize {
        1
    }
}

/// An immutable set of learnable items with unique identifiers.
pub struct Catalog<I> {
    items: Vec<I>,
    index: HashMap<ItemId, usize>,
}

impl<I: LearnableItem> Catalog<I> {
    pub fn new(items: Vec<I>) -> Fallible<Self> {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if index.insert(item.id().clone(), position).is_some() {
                return fail(format!("duplicate item id: {}", item.id()));
            }
        }
        Ok(Self { items, index })
    }

    pub fn get(&self, id: &ItemId) -> Option<&I> {
        self.index.get(id).map(|position| &self.items[*position])
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items that have no progress record, in catalog order.
    pub fn unseen(&self, seen: &HashSet<ItemId>) -> Vec<&I> {
        self.items
            .iter()
            .filter(|item| !seen.contains(item.id()))
            .collect()
    }
}
