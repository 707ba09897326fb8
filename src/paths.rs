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

use crate::fptree::FPTree;
use crate::item::Item;

/// A node as seen along one enumerated path. Its count is either the tree
/// node's own count or, below a branch, the weight of that branch.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PathNode {
    pub item: Item,
    pub count: u32,
}

/// Enumerates the paths from `id` down to every leaf of its subtree.
///
/// Each path reads shallowest first with non-increasing counts. A path
/// stands for `path[0].count` transactions, and the support of a subset of
/// its items is the count of the subset's deepest member. Summed over the
/// returned paths, those supports equal the supports within the subtree.
///
/// Recursion depth is bounded by the depth of the subtree, which is at
/// most the number of frequent items the tree was built from.
pub fn paths(tree: &FPTree, id: usize) -> Vec<Vec<PathNode>> {
    let node = PathNode {
        item: tree.item_of(id),
        count: tree.count_of(id),
    };
    let children = tree.children_of(id);
    if children.is_empty() {
        return vec![vec![node]];
    }

    let mut below: Vec<Vec<PathNode>> = children
        .iter()
        .flat_map(|&child| paths(tree, child))
        .collect();

    // Unbranched chain: the node's own count applies to the whole path.
    if below.len() == 1 {
        let mut path = below.remove(0);
        path.insert(0, node);
        return vec![path];
    }

    // Branching: the node only contributes the weight of each branch.
    let mut result: Vec<Vec<PathNode>> = Vec::with_capacity(below.len() + 1);
    for mut path in below {
        let weight = path[0].count;
        path.insert(
            0,
            PathNode {
                item: node.item,
                count: weight,
            },
        );
        result.push(path);
    }

    // Transactions ending at this node pass through no child.
    let through: u32 = children.iter().map(|&child| tree.count_of(child)).sum();
    if node.count > through {
        result.push(vec![PathNode {
            item: node.item,
            count: node.count - through,
        }]);
    }
    result
}
