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

use crate::f1::F1;
use crate::item::Item;
use tracing::trace;

/// A transaction together with the number of times it occurs.
pub type WeightedTransaction = (Vec<Item>, u32);

#[derive(Debug)]
struct FPNode {
    item: Item,
    count: u32,
    children: Vec<usize>,
    parent: Option<usize>,
    next_homonym: Option<usize>,
}

impl FPNode {
    fn new(item: Item, parent: Option<usize>) -> FPNode {
        FPNode {
            item,
            count: 0,
            children: Vec::with_capacity(1),
            parent,
            next_homonym: None,
        }
    }

    fn is_root(&self) -> bool {
        self.item.is_null()
    }
}

// Ends of one item's node-link chain.
#[derive(Copy, Clone, Debug)]
struct NodeLink {
    head: usize,
    tail: usize,
}

/// Prefix tree over rank-ordered transactions. Nodes live in an arena and
/// refer to each other by index; node 0 is the root.
///
/// Every node carrying an item is reachable from that item's node-link
/// chain, which lists the item's nodes in creation order.
#[derive(Debug)]
pub struct FPTree {
    nodes: Vec<FPNode>,
    item_links: Vec<Option<NodeLink>>,
    num_transactions: u32,
}

impl Default for FPTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FPTree {
    pub fn new() -> FPTree {
        let mut tree = FPTree {
            nodes: vec![],
            item_links: Vec::new(),
            num_transactions: 0,
        };
        // Add root.
        tree.nodes.push(FPNode::new(Item::null(), None));
        tree
    }

    /// Builds a tree from raw transactions, ordering each one by `f1`
    /// before insertion.
    pub fn build(transactions: &[WeightedTransaction], f1: &F1) -> FPTree {
        let mut tree = FPTree::new();
        for (items, count) in transactions {
            tree.insert(&f1.order(items), *count);
        }
        trace!(
            nodes = tree.num_nodes(),
            transactions = tree.num_transactions(),
            "built FP-tree"
        );
        tree
    }

    pub fn root(&self) -> usize {
        0
    }

    fn add_node(&mut self, parent: usize, item: Item) -> usize {
        let id = self.nodes.len();
        self.nodes.push(FPNode::new(item, Some(parent)));
        self.nodes[parent].children.push(id);
        self.add_to_item_link(item, id);
        id
    }

    fn add_to_item_link(&mut self, item: Item, id: usize) {
        let index = item.as_index();
        if index >= self.item_links.len() {
            self.item_links.resize(index + 1, None);
        }
        let link = match self.item_links[index] {
            Some(link) => {
                self.nodes[link.tail].next_homonym = Some(id);
                NodeLink {
                    head: link.head,
                    tail: id,
                }
            }
            None => NodeLink { head: id, tail: id },
        };
        self.item_links[index] = Some(link);
    }

    pub fn child_of(&self, id: usize, item: Item) -> Option<usize> {
        for &node_id in &self.nodes[id].children {
            if self.nodes[node_id].item == item {
                return Some(node_id);
            }
        }
        None
    }

    fn insert_child(&mut self, id: usize, item: Item, count: u32) -> usize {
        let child_id = match self.child_of(id, item) {
            Some(child_id) => child_id,
            None => self.add_node(id, item),
        };
        self.nodes[child_id].count += count;
        child_id
    }

    /// Inserts an ordered transaction `count` times. Shared prefixes are
    /// merged into existing nodes; the unmatched suffix becomes a new chain.
    pub fn insert(&mut self, transaction: &[Item], count: u32) {
        self.num_transactions += count;
        let mut id = self.root();
        for &item in transaction {
            id = self.insert_child(id, item, count);
        }
    }

    pub fn item_of(&self, id: usize) -> Item {
        self.nodes[id].item
    }

    pub fn count_of(&self, id: usize) -> u32 {
        self.nodes[id].count
    }

    pub fn children_of(&self, id: usize) -> &[usize] {
        &self.nodes[id].children
    }

    pub fn parent_of(&self, id: usize) -> Option<usize> {
        self.nodes[id].parent
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[self.root()].children.is_empty()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_transactions(&self) -> u32 {
        self.num_transactions
    }

    /// Walks the node-link chain of `item`.
    pub fn node_link(&self, item: Item) -> NodeLinkIter {
        let head = match self.item_links.get(item.as_index()) {
            Some(Some(link)) => Some(link.head),
            _ => None,
        };
        NodeLinkIter {
            tree: self,
            next: head,
        }
    }

    /// The conditional pattern base of `item`: for each node in its chain,
    /// the root-first sequence of ancestor items weighted by the node's count.
    pub fn conditional_base(&self, item: Item) -> Vec<WeightedTransaction> {
        self.node_link(item)
            .map(|node_id| {
                (
                    self.path_from_root_to_excluding(node_id),
                    self.nodes[node_id].count,
                )
            })
            .collect()
    }

    fn path_from_root_to_excluding(&self, node_id: usize) -> Vec<Item> {
        let mut path = vec![];
        let mut parent = self.nodes[node_id].parent;
        while let Some(id) = parent {
            let node = &self.nodes[id];
            if node.is_root() {
                break;
            }
            path.push(node.item);
            parent = node.parent;
        }
        path.reverse();
        path
    }
}

pub struct NodeLinkIter<'a> {
    tree: &'a FPTree,
    next: Option<usize>,
}

impl<'a> Iterator for NodeLinkIter<'a> {
    type Item = usize;
    fn next(&mut self) -> Option<usize> {
        let id = self.next?;
        self.next = self.tree.nodes[id].next_homonym;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::FPTree;
    use crate::f1::F1;
    use crate::item::Item;
    use crate::itemizer::Itemizer;

    fn worked_example(itemizer: &mut Itemizer) -> Vec<(Vec<Item>, u32)> {
        let rows: &[&[&str]] = &[
            &["a", "b", "c"],
            &["a", "b"],
            &["a", "c", "d"],
            &["a"],
            &["b", "c"],
        ];
        rows.iter()
            .map(|row| (row.iter().map(|s| itemizer.id_of(s)).collect(), 1))
            .collect()
    }

    #[test]
    fn test_insert_merges_prefixes() {
        let mut itemizer = Itemizer::new();
        let a = itemizer.id_of("a");
        let b = itemizer.id_of("b");
        let c = itemizer.id_of("c");
        let mut tree = FPTree::new();
        assert!(tree.is_empty());
        tree.insert(&[a, b, c], 1);
        tree.insert(&[a, b], 1);
        tree.insert(&[a, c], 2);

        let root = tree.root();
        assert_eq!(tree.children_of(root).len(), 1);
        let node_a = tree.child_of(root, a).unwrap();
        assert_eq!(tree.count_of(node_a), 4);
        assert_eq!(tree.children_of(node_a).len(), 2);
        let node_ab = tree.child_of(node_a, b).unwrap();
        assert_eq!(tree.count_of(node_ab), 2);
        let node_ac = tree.child_of(node_a, c).unwrap();
        assert_eq!(tree.count_of(node_ac), 2);
        assert_eq!(tree.parent_of(node_ac), Some(node_a));
        assert_eq!(tree.parent_of(root), None);
        assert_eq!(tree.num_transactions(), 4);
        assert_eq!(tree.num_nodes(), 5);
    }

    #[test]
    fn test_node_link_in_creation_order() {
        let mut itemizer = Itemizer::new();
        let a = itemizer.id_of("a");
        let b = itemizer.id_of("b");
        let c = itemizer.id_of("c");
        let mut tree = FPTree::new();
        tree.insert(&[a, c], 1);
        tree.insert(&[b, c], 1);
        tree.insert(&[c], 1);
        tree.insert(&[a, c], 1);

        let chain: Vec<usize> = tree.node_link(c).collect();
        assert_eq!(chain.len(), 3);
        assert!(chain.windows(2).all(|w| w[0] < w[1]));
        let parents: Vec<Item> = chain
            .iter()
            .map(|&id| tree.item_of(tree.parent_of(id).unwrap()))
            .collect();
        assert_eq!(parents, vec![a, b, Item::null()]);
        assert_eq!(tree.node_link(itemizer.id_of("zz")).count(), 0);
    }

    #[test]
    fn test_node_link_sums_match_f1() {
        let mut itemizer = Itemizer::new();
        let transactions = worked_example(&mut itemizer);
        let f1 = F1::build(&transactions, 2, &itemizer);
        let tree = FPTree::build(&transactions, &f1);
        for entry in f1.iter() {
            let sum: u32 = tree.node_link(entry.item).map(|id| tree.count_of(id)).sum();
            assert_eq!(sum, entry.count);
        }
        // d is infrequent and never enters the tree.
        assert_eq!(tree.node_link(itemizer.id_of("d")).count(), 0);
    }

    #[test]
    fn test_counts_non_increasing() {
        let mut itemizer = Itemizer::new();
        let transactions = worked_example(&mut itemizer);
        let f1 = F1::build(&transactions, 1, &itemizer);
        let tree = FPTree::build(&transactions, &f1);
        for id in 1..tree.num_nodes() {
            let parent = tree.parent_of(id).unwrap();
            if parent != tree.root() {
                assert!(tree.count_of(id) <= tree.count_of(parent));
            }
            let mut names: Vec<Item> = tree
                .children_of(id)
                .iter()
                .map(|&c| tree.item_of(c))
                .collect();
            let before = names.len();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), before);
        }
    }

    #[test]
    fn test_conditional_base() {
        let mut itemizer = Itemizer::new();
        let transactions = worked_example(&mut itemizer);
        let f1 = F1::build(&transactions, 2, &itemizer);
        let tree = FPTree::build(&transactions, &f1);
        let a = itemizer.id_of("a");
        let b = itemizer.id_of("b");
        let c = itemizer.id_of("c");

        assert_eq!(tree.conditional_base(a), vec![(vec![], 4)]);
        assert_eq!(tree.conditional_base(b), vec![(vec![a], 2), (vec![], 1)]);
        assert_eq!(
            tree.conditional_base(c),
            vec![(vec![a, b], 1), (vec![a], 1), (vec![b], 1)]
        );
    }

    #[test]
    fn test_build_with_empty_f1() {
        let mut itemizer = Itemizer::new();
        let transactions = worked_example(&mut itemizer);
        let f1 = F1::build(&transactions, 10, &itemizer);
        assert!(f1.is_empty());
        let tree = FPTree::build(&transactions, &f1);
        assert!(tree.is_empty());
        assert_eq!(tree.num_nodes(), 1);
    }
}
