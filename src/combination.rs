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

use crate::item::Item;
use crate::paths::PathNode;
use crate::vec_sets::union;
use fnv::FnvHashMap;

/// Itemsets, as sorted item vectors, mapped to their support count.
pub type ItemsetCounts = FnvHashMap<Vec<Item>, u32>;

/// Generates every non-empty subset of the items on `path`.
///
/// The singleton of the shallowest node carries that node's count. Every
/// subset of the deeper sub-path is kept, and is also extended with the
/// shallowest item at the same count. A multi-item subset therefore carries
/// the count of its deepest member, which on a path with non-increasing
/// counts is the smallest count among its members.
///
/// An empty path yields an empty map.
pub fn combination(path: &[PathNode]) -> ItemsetCounts {
    let mut result = ItemsetCounts::default();
    let (first, rest) = match path.split_first() {
        Some(split) => split,
        None => return result,
    };

    result.insert(vec![first.item], first.count);
    for (itemset, count) in combination(rest) {
        let extended = union(&itemset, &[first.item]);
        result.insert(itemset, count);
        result.insert(extended, count);
    }
    result
}

/// Adds every count in `from` into `into`.
pub fn merge_counts(into: &mut ItemsetCounts, from: ItemsetCounts) {
    for (itemset, count) in from {
        *into.entry(itemset).or_insert(0) += count;
    }
}
