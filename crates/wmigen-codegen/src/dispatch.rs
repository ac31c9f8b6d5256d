use std::collections::BTreeMap;

use wmigen_core::{DecisionNode, WmiChar};

/// Where a matched arm dispatches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArmTarget {
    /// Terminal: produce this label.
    Label(String),
    /// Descend: match on the next byte of the code.
    Descend(MatchLevel),
}

/// One alternative of a match level: the symbols it covers and where they
/// lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchArm {
    pub patterns: Vec<WmiChar>,
    pub target: ArmTarget,
}

/// An exhaustive match over one byte position of the code. Arms are ordered
/// by their first pattern in canonical alphabet order; anything unmatched
/// falls through to the dictionary default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLevel {
    pub byte_index: usize,
    pub arms: Vec<MatchArm>,
}

/// A lowered dictionary: one function dispatching over a fixed-width code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchModule {
    pub fn_name: String,
    pub default_label: String,
    pub root: MatchLevel,
}

/// Lower a decision tree into its match-level form.
///
/// Sibling leaves with identical labels collapse into one multi-pattern
/// arm; branch arms always keep a single pattern. Matched output is
/// unchanged either way.
pub fn lower(fn_name: &str, tree: &DecisionNode, default_label: &str) -> DispatchModule {
    let root = match tree {
        DecisionNode::Branch(children) => lower_level(children, 0),
        DecisionNode::Leaf(_) => MatchLevel {
            byte_index: 0,
            arms: Vec::new(),
        },
    };

    DispatchModule {
        fn_name: fn_name.to_string(),
        default_label: default_label.to_string(),
        root,
    }
}

fn lower_level(children: &BTreeMap<WmiChar, DecisionNode>, byte_index: usize) -> MatchLevel {
    let mut arms: Vec<MatchArm> = Vec::new();

    // children iterate in canonical order, and a label's arm is created at
    // its first symbol, so arms come out ordered by first pattern
    for (symbol, child) in children {
        match child {
            DecisionNode::Leaf(label) => {
                let merged = arms.iter_mut().find(|arm| {
                    matches!(&arm.target, ArmTarget::Label(existing) if existing == label)
                });
                match merged {
                    Some(arm) => arm.patterns.push(*symbol),
                    None => arms.push(MatchArm {
                        patterns: vec![*symbol],
                        target: ArmTarget::Label(label.clone()),
                    }),
                }
            }
            DecisionNode::Branch(sub) => arms.push(MatchArm {
                patterns: vec![*symbol],
                target: ArmTarget::Descend(lower_level(sub, byte_index + 1)),
            }),
        }
    }

    MatchLevel { byte_index, arms }
}
