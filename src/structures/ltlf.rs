/*!
LTLf formulas.

Linear temporal logic on finite traces, with the usual connectives and the strong/weak operator pairs: next and weak next, until and release, eventually and always.
LTLf is a front-end logic here: formulas are [normalized](crate::procedures::nnf) and [reduced to LDLf](crate::procedures::to_ldlf) before translation.

The factory invariants of the other logics apply: `And`/`Or` are flat non-trivial sets, `Not` never wraps a constant or a negation.
*/

use std::collections::BTreeSet;

use crate::db::{NodeKey, SymbolId};

/// The key of an LTLf formula node.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LtlfId(u32);

impl NodeKey for LtlfId {
    fn from_index(index: usize) -> Self {
        LtlfId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// An LTLf formula node.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Ltlf {
    /// `True`.
    True,

    /// `False`.
    False,

    /// A named proposition.
    Atom(SymbolId),

    /// Conjunction of a set of formulas.
    And(BTreeSet<LtlfId>),

    /// Disjunction of a set of formulas.
    Or(BTreeSet<LtlfId>),

    /// Negation.
    Not(LtlfId),

    /// `X φ`, strong next.
    Next(LtlfId),

    /// `WX φ`, weak next.
    WeakNext(LtlfId),

    /// `φ U ψ`, until.
    Until(LtlfId, LtlfId),

    /// `φ R ψ`, release.
    Release(LtlfId, LtlfId),

    /// `F φ`, eventually.
    Eventually(LtlfId),

    /// `G φ`, always.
    Always(LtlfId),
}
