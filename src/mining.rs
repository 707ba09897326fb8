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

use crate::combination::{combination, merge_counts, ItemsetCounts};
use crate::f1::F1;
use crate::fptree::{FPTree, WeightedTransaction};
use crate::itemizer::Itemizer;
use crate::paths::paths;
use crate::vec_sets::{is_subset, union};
use fnv::FnvHashMap;
use itertools::Itertools;
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Counts item frequencies and builds the FP-tree of `transactions`.
///
/// The same pipeline serves the top level and every conditional pattern
/// base. When no item reaches `min_count` the tree is only a root.
pub fn build_tree(
    transactions: &[WeightedTransaction],
    min_count: u32,
    itemizer: &Itemizer,
) -> (F1, FPTree) {
    let f1 = F1::build(transactions, min_count, itemizer);
    if f1.is_empty() {
        return (f1, FPTree::new());
    }
    let tree = FPTree::build(transactions, &f1);
    (f1, tree)
}

/// Collects the itemsets of every root-to-leaf path of `tree`, summing
/// counts across paths, and keeps those with count at least `min_count`.
/// A tree without children yields an empty map.
pub fn extract_prefix_patterns(tree: &FPTree, min_count: u32) -> ItemsetCounts {
    let mut patterns = ItemsetCounts::default();
    for &child in tree.children_of(tree.root()) {
        for path in paths(tree, child) {
            merge_counts(&mut patterns, combination(&path));
        }
    }
    patterns.retain(|_, count| *count >= min_count);
    patterns
}

/// Mines the multi-item frequent itemsets of `tree`.
///
/// Each item of `f1` is mined independently: its conditional pattern base
/// is built into a conditional tree whose prefix patterns, extended with the
/// item, are the frequent itemsets whose last item in F1 order is that item.
/// The items are mined in parallel and the partial results are merged
/// afterwards. Single items are not repeated here; they are `f1` itself.
#[instrument(level = "debug", skip_all, fields(items = f1.len()))]
pub fn mine(tree: &FPTree, f1: &F1, min_count: u32, itemizer: &Itemizer) -> ItemsetCounts {
    let partials: Vec<ItemsetCounts> = f1
        .entries()
        .par_iter()
        .map(|entry| {
            let base = tree.conditional_base(entry.item);
            let (_, conditional_tree) = build_tree(&base, min_count, itemizer);
            let mut found = ItemsetCounts::default();
            for (prefix, count) in extract_prefix_patterns(&conditional_tree, min_count) {
                found.insert(union(&prefix, &[entry.item]), count);
            }
            debug!(
                item = itemizer.str_of(entry.item),
                base = base.len(),
                patterns = found.len(),
                "mined conditional tree"
            );
            found
        })
        .collect();

    let mut patterns = ItemsetCounts::default();
    for partial in partials {
        merge_counts(&mut patterns, partial);
    }
    patterns
}

/// All itemsets of a transaction set with support at least some threshold.
#[derive(Debug, Default)]
pub struct FrequentItemsets {
    singles: Vec<(String, u32)>,
    patterns: FnvHashMap<Vec<String>, u32>,
}

impl FrequentItemsets {
    /// Frequent single items, in F1 order.
    pub fn singles(&self) -> &[(String, u32)] {
        &self.singles
    }

    /// Frequent itemsets of two or more items, keyed by sorted item names.
    pub fn patterns(&self) -> &FnvHashMap<Vec<String>, u32> {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.singles.len() + self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.singles.is_empty() && self.patterns.is_empty()
    }

    /// Support of an itemset, or `None` when it is not frequent.
    pub fn support(&self, items: &[&str]) -> Option<u32> {
        let key = sorted_names(items);
        match key.len() {
            0 => None,
            1 => self
                .singles
                .iter()
                .find(|(name, _)| *name == key[0])
                .map(|(_, count)| *count),
            _ => self.patterns.get(&key).cloned(),
        }
    }

    /// Multi-item itemsets that contain every one of `items`.
    pub fn containing(&self, items: &[&str]) -> Vec<(Vec<String>, u32)> {
        let key = sorted_names(items);
        self.sorted()
            .into_iter()
            .filter(|(itemset, _)| is_subset(&key, itemset))
            .collect()
    }

    /// Multi-item itemsets ordered by size, then by names.
    pub fn sorted(&self) -> Vec<(Vec<String>, u32)> {
        self.patterns
            .iter()
            .map(|(itemset, &count)| (itemset.clone(), count))
            .sorted_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| a.0.cmp(&b.0)))
            .collect()
    }
}

fn sorted_names(items: &[&str]) -> Vec<String> {
    items
        .iter()
        .map(|s| String::from(*s))
        .sorted()
        .dedup()
        .collect()
}

/// Finds every itemset occurring in at least `min_count` transactions.
pub fn fp_growth<S: AsRef<str>>(transactions: &[Vec<S>], min_count: u32) -> FrequentItemsets {
    let mut itemizer = Itemizer::new();
    let weighted: Vec<WeightedTransaction> = transactions
        .iter()
        .map(|t| (t.iter().map(|s| itemizer.id_of(s.as_ref())).collect(), 1))
        .collect();

    let (f1, tree) = build_tree(&weighted, min_count, &itemizer);
    debug!(
        distinct_items = itemizer.len(),
        frequent_items = f1.len(),
        nodes = tree.num_nodes(),
        "built initial FP-tree"
    );
    let patterns = mine(&tree, &f1, min_count, &itemizer);

    FrequentItemsets {
        singles: f1
            .iter()
            .map(|entry| (String::from(itemizer.str_of(entry.item)), entry.count))
            .collect(),
        patterns: patterns
            .into_iter()
            .map(|(itemset, count)| {
                let names: Vec<String> = itemset
                    .iter()
                    .map(|&item| String::from(itemizer.str_of(item)))
                    .sorted()
                    .collect();
                (names, count)
            })
            .collect(),
    }
}
