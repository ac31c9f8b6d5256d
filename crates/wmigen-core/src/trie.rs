use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::alphabet::WmiChar;
use crate::error::{Error, Result};

/// How a builder resolves two records claiming the same full path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// The later record replaces the earlier one.
    Overwrite,
    /// The earliest record is kept and later ones are reported.
    FirstWins,
}

/// Outcome of a single insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// The path was unmapped before.
    Fresh,
    /// An earlier label was replaced under [`ConflictPolicy::Overwrite`].
    Replaced { previous: String },
    /// An earlier label was kept under [`ConflictPolicy::FirstWins`].
    Duplicate { kept: String },
}

/// One node of a decision trie over WMI symbols.
///
/// Every path of the trie's depth resolves to a label; unmapped steps fall
/// back to the caller's default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionNode {
    Leaf(String),
    Branch(BTreeMap<WmiChar, DecisionNode>),
}

impl DecisionNode {
    /// Follow `path` through the trie. Total: any unmapped step or shape
    /// mismatch yields `default`.
    pub fn lookup<'a>(&'a self, path: &[WmiChar], default: &'a str) -> &'a str {
        match (self, path) {
            (DecisionNode::Leaf(label), []) => label.as_str(),
            (DecisionNode::Branch(children), [head, rest @ ..]) => match children.get(head) {
                Some(child) => child.lookup(rest, default),
                None => default,
            },
            _ => default,
        }
    }
}

/// Builds a fixed-depth decision trie from (path, label) facts.
///
/// Full paths are staged in a flat ordered map, so conflict resolution is
/// a plain key collision and the folded tree is independent of insertion
/// order once the policy has been applied.
#[derive(Debug, Clone)]
pub struct TrieBuilder {
    depth: usize,
    policy: ConflictPolicy,
    leaves: BTreeMap<Vec<WmiChar>, String>,
}

impl TrieBuilder {
    pub fn new(depth: usize, policy: ConflictPolicy) -> Self {
        Self {
            depth,
            policy,
            leaves: BTreeMap::new(),
        }
    }

    /// Number of mapped full paths.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Map `path` to `label`, resolving a collision per the policy.
    pub fn insert(&mut self, path: &[WmiChar], label: &str) -> Result<Insertion> {
        if path.len() != self.depth {
            return Err(Error::PathDepth {
                expected: self.depth,
                actual: path.len(),
            });
        }
        if label.is_empty() {
            let key: String = path.iter().map(|symbol| symbol.as_char()).collect();
            return Err(Error::EmptyLabel(key));
        }

        match self.leaves.get_mut(path) {
            None => {
                self.leaves.insert(path.to_vec(), label.to_string());
                Ok(Insertion::Fresh)
            }
            Some(existing) => match self.policy {
                ConflictPolicy::Overwrite => {
                    let previous = std::mem::replace(existing, label.to_string());
                    Ok(Insertion::Replaced { previous })
                }
                ConflictPolicy::FirstWins => Ok(Insertion::Duplicate {
                    kept: existing.clone(),
                }),
            },
        }
    }

    /// Fold the staged paths into a nested decision tree.
    pub fn finish(self) -> DecisionNode {
        let entries: Vec<(&[WmiChar], &str)> = self
            .leaves
            .iter()
            .map(|(path, label)| (path.as_slice(), label.as_str()))
            .collect();
        build_node(entries)
    }
}

fn build_node(entries: Vec<(&[WmiChar], &str)>) -> DecisionNode {
    // all staged paths share one length, so an exhausted path means this
    // node is the mapped leaf
    if let Some((path, label)) = entries.first() {
        if path.is_empty() {
            return DecisionNode::Leaf((*label).to_string());
        }
    }

    let mut groups: BTreeMap<WmiChar, Vec<(&[WmiChar], &str)>> = BTreeMap::new();
    for (path, label) in entries {
        if let Some((head, rest)) = path.split_first() {
            groups.entry(*head).or_default().push((rest, label));
        }
    }

    DecisionNode::Branch(
        groups
            .into_iter()
            .map(|(symbol, group)| (symbol, build_node(group)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ALPHABET;

    fn path(code: &str) -> Vec<WmiChar> {
        code.chars()
            .map(|ch| WmiChar::from_char(ch).expect("alphabet symbol"))
            .collect()
    }

    #[test]
    fn lookup_hits_and_misses() {
        let mut builder = TrieBuilder::new(2, ConflictPolicy::Overwrite);
        builder.insert(&path("JA"), "Japan").expect("insert");
        builder.insert(&path("JB"), "Japan").expect("insert");
        let tree = builder.finish();

        assert_eq!(tree.lookup(&path("JA"), "Unknown"), "Japan");
        assert_eq!(tree.lookup(&path("JB"), "Unknown"), "Japan");
        assert_eq!(tree.lookup(&path("JC"), "Unknown"), "Unknown");
        assert_eq!(tree.lookup(&path("KA"), "Unknown"), "Unknown");
    }

    #[test]
    fn overwrite_keeps_the_later_record() {
        let mut builder = TrieBuilder::new(2, ConflictPolicy::Overwrite);
        assert_eq!(
            builder.insert(&path("ZA"), "South Africa").expect("insert"),
            Insertion::Fresh
        );
        assert_eq!(
            builder.insert(&path("ZA"), "Zambia").expect("insert"),
            Insertion::Replaced {
                previous: "South Africa".to_string()
            }
        );
        let tree = builder.finish();
        assert_eq!(tree.lookup(&path("ZA"), "Unknown"), "Zambia");
    }

    #[test]
    fn first_wins_keeps_the_earlier_record() {
        let mut builder = TrieBuilder::new(3, ConflictPolicy::FirstWins);
        assert_eq!(
            builder.insert(&path("1GC"), "Chevrolet").expect("insert"),
            Insertion::Fresh
        );
        assert_eq!(
            builder.insert(&path("1GC"), "Buick").expect("insert"),
            Insertion::Duplicate {
                kept: "Chevrolet".to_string()
            }
        );
        let tree = builder.finish();
        assert_eq!(tree.lookup(&path("1GC"), "Unknown"), "Chevrolet");
    }

    #[test]
    fn insert_rejects_wrong_depth_and_empty_labels() {
        let mut builder = TrieBuilder::new(2, ConflictPolicy::Overwrite);
        assert!(matches!(
            builder.insert(&path("JAB"), "Japan"),
            Err(Error::PathDepth {
                expected: 2,
                actual: 3
            })
        ));
        assert!(matches!(
            builder.insert(&path("JA"), ""),
            Err(Error::EmptyLabel(_))
        ));
        assert!(builder.is_empty());
    }

    #[test]
    fn lookup_is_total_over_depth_two_paths() {
        let mut builder = TrieBuilder::new(2, ConflictPolicy::Overwrite);
        builder.insert(&path("JA"), "Japan").expect("insert");
        builder.insert(&path("W0"), "Germany").expect("insert");
        let tree = builder.finish();

        let mut hits = 0;
        for first in ALPHABET {
            for second in ALPHABET {
                let full = [
                    WmiChar::from_byte(first).expect("alphabet symbol"),
                    WmiChar::from_byte(second).expect("alphabet symbol"),
                ];
                let label = tree.lookup(&full, "Unknown");
                if label != "Unknown" {
                    hits += 1;
                }
            }
        }
        assert_eq!(hits, 2);
    }

    #[test]
    fn folded_tree_is_independent_of_insertion_order() {
        let entries = [("5T", "United States"), ("JA", "Japan"), ("J0", "Japan")];

        let mut forward = TrieBuilder::new(2, ConflictPolicy::FirstWins);
        for (code, label) in entries {
            forward.insert(&path(code), label).expect("insert");
        }
        let mut reverse = TrieBuilder::new(2, ConflictPolicy::FirstWins);
        for (code, label) in entries.iter().rev() {
            reverse.insert(&path(code), label).expect("insert");
        }

        assert_eq!(forward.finish(), reverse.finish());
    }
}
