/*!
NFA and DFA states of the on-the-fly subset construction.

An [NfaState] is a *set of LDLf formulas read conjunctively*: the automaton is in the state when every formula of the set holds over the remaining trace.
The empty NFA state is the vacuous conjunction, and so accepts everything.

A [DfaState] is a *set of NFA states read disjunctively*: a DFA state is, in effect, a disjunctive normal form over subformulas.
The empty DFA state is the vacuous disjunction --- the rejecting sink.

Both are keyed by the structural order of their contents.
As formulas are hash-consed, structural identity of states is identity of key sets, so the same state receives the same index whenever it is met during exploration --- which is what makes the construction terminate.

Finality is a question about ε-expansion and so lives with the [δ procedures](crate::procedures::delta): an NFA state is final when every member accepts the empty suffix, and a DFA state is final when some member NFA state is.
*/

use std::collections::BTreeSet;

use crate::structures::ldlf::LdlfId;

/// A set of LDLf formulas, read conjunctively.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NfaState {
    /// The member formulas.
    pub formulas: BTreeSet<LdlfId>,
}

impl NfaState {
    /// The state holding exactly `formulas`.
    pub fn new(formulas: BTreeSet<LdlfId>) -> Self {
        NfaState { formulas }
    }

    /// The state of a single formula.
    pub fn singleton(formula: LdlfId) -> Self {
        NfaState {
            formulas: BTreeSet::from([formula]),
        }
    }
}

/// A set of NFA states, read disjunctively.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DfaState {
    /// The member NFA states.
    pub states: BTreeSet<NfaState>,
}

impl DfaState {
    /// The state holding exactly `states`.
    pub fn new(states: BTreeSet<NfaState>) -> Self {
        DfaState { states }
    }

    /// The initial state of the construction for `formula`: the singleton disjunction of the singleton conjunction.
    pub fn initial(formula: LdlfId) -> Self {
        DfaState {
            states: BTreeSet::from([NfaState::singleton(formula)]),
        }
    }

    /// The rejecting sink: the empty disjunction.
    pub fn sink() -> Self {
        DfaState {
            states: BTreeSet::default(),
        }
    }
}
