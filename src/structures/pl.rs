/*!
Propositional formulas.

The interesting detail is the payload of an atom.
An atom is either a [named](AtomLabel::Name) proposition --- the familiar case --- or a [quoted](AtomLabel::Quoted) LDLf formula.
Quoted atoms let a propositional formula talk *about* LDLf formulas: the [δ-expansion](crate::procedures::delta) of a formula against a letter is a propositional formula whose atoms quote the subformulas the automaton must hold at the next step, and a model of that formula picks out a successor state.

Conjunction and disjunction carry *sets* of operands: operands are order-independent and duplicate-free, and the set order gives every formula a canonical shape.

The [context factories](crate::context) simplify while constructing, so within a database:
- `And`/`Or` nodes never contain a constant, a nested node of the same kind, or fewer than two operands.
- `Not` nodes never wrap a constant or another `Not`.
*/

use std::collections::BTreeSet;

use crate::db::{NodeKey, SymbolId};
use crate::structures::ldlf::LdlfId;

/// The key of a propositional formula node.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PlId(u32);

impl NodeKey for PlId {
    fn from_index(index: usize) -> Self {
        PlId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The payload of a propositional atom.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AtomLabel {
    /// A named proposition.
    Name(SymbolId),

    /// A quoted LDLf formula, used as a propositional variable.
    Quoted(LdlfId),
}

/// A propositional formula node.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Pl {
    /// Verum.
    True,

    /// Falsum.
    False,

    /// An atom.
    Atom(AtomLabel),

    /// Conjunction of a set of formulas.
    And(BTreeSet<PlId>),

    /// Disjunction of a set of formulas.
    Or(BTreeSet<PlId>),

    /// Negation.
    Not(PlId),
}
