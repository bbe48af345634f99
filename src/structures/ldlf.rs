/*!
LDLf formulas and the regular expressions inside their modalities.

Linear dynamic logic on finite traces pairs the boolean connectives with two modalities over regular expressions: `⟨ρ⟩φ` --- some prefix matching `ρ` leads to a position where `φ` holds --- and `[ρ]φ` --- every prefix matching `ρ` does.
Regular expressions are built from propositional guards (consume one letter satisfying the guard), tests `ψ?` (consume nothing, require `ψ` here), union, sequence, and star.

There are no atoms at the formula level: atoms live inside guards and tests.

# Markers

[FMarked](Ldlf::FMarked) and [TMarked](Ldlf::TMarked) wrap a formula during [δ-expansion](crate::procedures::delta) of a starred expression.
Unfolding `⟨ρ*⟩φ` wraps the re-entry into the star with an F-marker, and the expansion of a marked formula is constant --- false for F, true for T --- which cuts any attempt to re-enter a star without consuming a letter.
The markers are δ bookkeeping: they are stripped whenever a formula is quoted as a successor, so they never appear in an automaton state, and normalization removes them.

# Invariants

Within a database, by way of the [context factories](crate::context):
- `And`/`Or` nodes never contain a constant, a nested node of the same kind, or fewer than two operands, and `Not` nodes never wrap a constant or another `Not`.
- `Union` and `Seq` nodes are flat, with at least two operands.
*/

use std::collections::BTreeSet;

use crate::db::NodeKey;
use crate::structures::pl::PlId;

/// The key of an LDLf formula node.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LdlfId(u32);

impl NodeKey for LdlfId {
    fn from_index(index: usize) -> Self {
        LdlfId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The key of a regular expression node.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RegexId(u32);

impl NodeKey for RegexId {
    fn from_index(index: usize) -> Self {
        RegexId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// An LDLf formula node.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Ldlf {
    /// `tt`, true at every position of every trace.
    True,

    /// `ff`, true nowhere.
    False,

    /// Conjunction of a set of formulas.
    And(BTreeSet<LdlfId>),

    /// Disjunction of a set of formulas.
    Or(BTreeSet<LdlfId>),

    /// Negation.
    Not(LdlfId),

    /// `⟨ρ⟩φ`.
    Diamond(RegexId, LdlfId),

    /// `[ρ]φ`.
    Box(RegexId, LdlfId),

    /// A formula marked false for ε-purposes during star unfolding.
    FMarked(LdlfId),

    /// A formula marked true for ε-purposes during star unfolding.
    TMarked(LdlfId),
}

/// A regular expression node.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Regex {
    /// A propositional guard: consume one letter satisfying the guard.
    Prop(PlId),

    /// A test `ψ?`: consume nothing, require `ψ` at the current position.
    Test(LdlfId),

    /// Union of a set of expressions.
    Union(BTreeSet<RegexId>),

    /// Sequence of expressions. Order matters.
    Seq(Vec<RegexId>),

    /// Kleene star.
    Star(RegexId),
}
