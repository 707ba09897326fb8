// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::fptree::WeightedTransaction;
use crate::item::Item;
use crate::item_counter::ItemCounter;
use crate::itemizer::Itemizer;
use fnv::FnvHashMap;
use tracing::trace;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ItemCount {
    pub item: Item,
    pub count: u32,
}

/// The individually frequent items of a transaction set, ordered by
/// count descending then name ascending. The position of an item in this
/// ordering is its rank; ordered transactions list items by rank.
#[derive(Debug, Default)]
pub struct F1 {
    entries: Vec<ItemCount>,
    rank: FnvHashMap<Item, usize>,
}

impl F1 {
    /// Tallies every occurrence of every item, weighted by the transaction's
    /// count. An item repeated within one transaction is counted each time.
    pub fn build(transactions: &[WeightedTransaction], min_count: u32, itemizer: &Itemizer) -> F1 {
        if transactions.is_empty() {
            return F1::default();
        }

        let mut counter = ItemCounter::new();
        for (items, count) in transactions {
            for item in items {
                counter.add(item, *count);
            }
        }

        let mut items = counter.items_with_count_at_least(min_count);
        counter.sort_descending(&mut items, itemizer);

        let entries: Vec<ItemCount> = items
            .iter()
            .map(|&item| ItemCount {
                item,
                count: counter.get(&item),
            })
            .collect();
        let rank = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.item, index))
            .collect();
        trace!(frequent = entries.len(), min_count, "built F1");
        F1 { entries, rank }
    }

    /// Projects a transaction onto this ordering. Infrequent items are
    /// dropped and duplicates collapse into one occurrence.
    pub fn order(&self, transaction: &[Item]) -> Vec<Item> {
        let mut ranks: Vec<usize> = transaction
            .iter()
            .filter_map(|item| self.rank.get(item).cloned())
            .collect();
        ranks.sort();
        ranks.dedup();
        ranks.into_iter().map(|r| self.entries[r].item).collect()
    }

    pub fn rank_of(&self, item: &Item) -> Option<usize> {
        self.rank.get(item).cloned()
    }

    pub fn count_of(&self, item: &Item) -> u32 {
        match self.rank.get(item) {
            Some(&r) => self.entries[r].count,
            None => 0,
        }
    }

    pub fn entries(&self) -> &[ItemCount] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<ItemCount> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemCount, F1};
    use crate::item::Item;
    use crate::itemizer::Itemizer;

    fn itemize(itemizer: &mut Itemizer, rows: &[&[&str]]) -> Vec<(Vec<Item>, u32)> {
        rows.iter()
            .map(|row| (row.iter().map(|s| itemizer.id_of(s)).collect(), 1))
            .collect()
    }

    #[test]
    fn test_build_worked_example() {
        let mut itemizer = Itemizer::new();
        let transactions = itemize(
            &mut itemizer,
            &[&["a", "b", "c"], &["a", "b"], &["a", "c", "d"], &["a"], &["b", "c"]],
        );
        let f1 = F1::build(&transactions, 2, &itemizer);
        let names: Vec<(&str, u32)> = f1
            .iter()
            .map(|e| (itemizer.str_of(e.item), e.count))
            .collect();
        assert_eq!(names, vec![("a", 4), ("b", 3), ("c", 3)]);
        assert_eq!(f1.rank_of(&itemizer.id_of("d")), None);
        assert_eq!(f1.count_of(&itemizer.id_of("d")), 0);
    }

    #[test]
    fn test_build_empty() {
        let itemizer = Itemizer::new();
        let f1 = F1::build(&[], 1, &itemizer);
        assert!(f1.is_empty());
    }

    #[test]
    fn test_build_counts_repeats_and_weights() {
        let mut itemizer = Itemizer::new();
        let a = itemizer.id_of("a");
        let b = itemizer.id_of("b");
        let transactions = vec![(vec![a, a, b], 1), (vec![b], 3)];
        let f1 = F1::build(&transactions, 1, &itemizer);
        assert_eq!(
            f1.entries(),
            &[ItemCount { item: b, count: 4 }, ItemCount { item: a, count: 2 }]
        );
    }

    #[test]
    fn test_order() {
        let mut itemizer = Itemizer::new();
        let transactions = itemize(
            &mut itemizer,
            &[&["x", "y", "z"], &["y", "z"], &["z"], &["w"]],
        );
        let f1 = F1::build(&transactions, 2, &itemizer);
        let x = itemizer.id_of("x");
        let y = itemizer.id_of("y");
        let z = itemizer.id_of("z");
        let w = itemizer.id_of("w");
        let cases: Vec<(Vec<Item>, Vec<Item>)> = vec![
            (vec![x, y, z], vec![z, y]),
            (vec![y, z, y], vec![z, y]),
            (vec![w, x], vec![]),
            (vec![], vec![]),
        ];
        for (transaction, expected) in cases {
            assert_eq!(f1.order(&transaction), expected);
        }
    }
}
