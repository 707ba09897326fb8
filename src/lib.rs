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

//! Frequent itemset mining with FP-Growth.
//!
//! Transactions are compressed into a prefix tree ordered by item
//! frequency, then each frequent item's conditional tree is mined for the
//! itemsets it completes.

pub mod combination;
pub mod f1;
pub mod fptree;
pub mod item;
pub mod item_counter;
pub mod itemizer;
pub mod mining;
pub mod paths;
pub mod vec_sets;

pub use crate::f1::{ItemCount, F1};
pub use crate::fptree::{FPTree, WeightedTransaction};
pub use crate::item::Item;
pub use crate::itemizer::Itemizer;
pub use crate::mining::{build_tree, extract_prefix_patterns, fp_growth, mine, FrequentItemsets};
