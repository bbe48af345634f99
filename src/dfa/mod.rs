/*!
The symbolic deterministic finite automaton.

A [SymbolicDfa] does not store its transition function as a table.
Instead, states are encoded in `⌈log₂ n⌉` boolean state bits (at least one), and the transition function is a family of decision diagrams, one per state bit, each over the variable order `state bits ∥ atom bits`: the *k*th diagram evaluates to the *k*th bit of the successor state, given the current state bits and the letter.

Alongside the diagrams the automaton keeps its state count, initial state, final-state set, and the canonical atom ordering its letters are read in.
[Walking](SymbolicDfa::accepts) a trace is then: encode the current state, append the letter, evaluate each bit diagram, reassemble the successor index; accept if the state after the last letter is final.

The automaton is [assembled](assemble) from an explicit transition table after exploration and minimization, so behaviorally distinct states are structurally distinct and vice versa.
*/

pub mod assemble;
pub use assemble::TransitionTable;

use std::collections::BTreeSet;

use biodivine_lib_bdd::{Bdd, BddValuation, BddVariable, BddVariableSet};

use crate::structures::trace::Letter;

/// A deterministic finite automaton with a bit-encoded symbolic transition function.
pub struct SymbolicDfa {
    pub(crate) n_states: usize,
    pub(crate) bits: u32,
    pub(crate) initial: usize,
    pub(crate) finals: BTreeSet<usize>,
    pub(crate) atoms: Vec<String>,
    pub(crate) vars: BddVariableSet,
    pub(crate) state_vars: Vec<BddVariable>,
    pub(crate) atom_vars: Vec<BddVariable>,
    pub(crate) bit_bdds: Vec<Bdd>,
}

impl SymbolicDfa {
    /// A count of states.
    pub fn state_count(&self) -> usize {
        self.n_states
    }

    /// The width of the state encoding, in bits.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// The index of the initial state.
    pub fn initial_state(&self) -> usize {
        self.initial
    }

    /// The indices of the final states.
    pub fn finals(&self) -> &BTreeSet<usize> {
        &self.finals
    }

    /// Whether `state` is final.
    pub fn is_final(&self, state: usize) -> bool {
        self.finals.contains(&state)
    }

    /// The atom names, in the canonical ordering letters are read in.
    pub fn atoms(&self) -> &[String] {
        &self.atoms
    }

    /// The position of `name` in the canonical ordering, if `name` is an atom of the automaton.
    pub fn atom_index(&self, name: &str) -> Option<usize> {
        self.atoms.iter().position(|atom| atom == name)
    }

    /// The letter with exactly the named atoms true.
    ///
    /// Names outside the alphabet are ignored: an atom the formula never mentions cannot influence acceptance.
    pub fn letter(&self, names: &[&str]) -> Letter {
        let on = names
            .iter()
            .filter_map(|name| self.atom_index(name))
            .collect::<Vec<_>>();
        crate::structures::trace::letter(self.atoms.len(), &on)
    }

    /// The successor of `state` on `letter`.
    ///
    /// # Panics
    /// If the letter's width differs from the atom count.
    pub fn successor(&self, state: usize, letter: &[bool]) -> usize {
        assert_eq!(letter.len(), self.atoms.len());

        let mut values = Vec::with_capacity(self.state_vars.len() + letter.len());
        for bit in 0..self.bits {
            values.push(state & (1 << bit) != 0);
        }
        values.extend_from_slice(letter);
        let valuation = BddValuation::new(values);

        let mut successor = 0_usize;
        for (bit, bdd) in self.bit_bdds.iter().enumerate() {
            if bdd.eval_in(&valuation) {
                successor |= 1 << bit;
            }
        }
        successor
    }

    /// Whether the automaton accepts `trace`.
    pub fn accepts(&self, trace: &[Letter]) -> bool {
        let mut state = self.initial;
        for letter in trace {
            state = self.successor(state, letter);
        }
        self.is_final(state)
    }

    /// The variable set the bit diagrams live in: `state bits ∥ atom bits`.
    pub fn variables(&self) -> &BddVariableSet {
        &self.vars
    }
}

impl std::fmt::Display for SymbolicDfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "states: {} ({} bits)", self.n_states, self.bits)?;
        writeln!(f, "atoms: [{}]", self.atoms.join(", "))?;
        writeln!(f, "initial: {}", self.initial)?;
        let finals = self.finals.iter().map(|index| index.to_string()).collect::<Vec<_>>();
        writeln!(f, "finals: {{{}}}", finals.join(", "))?;
        let sizes = self.bit_bdds.iter().map(|bdd| bdd.size().to_string()).collect::<Vec<_>>();
        write!(f, "bit diagram nodes: [{}]", sizes.join(", "))
    }
}

/// Whether `dfa` accepts `trace`.
pub fn evaluate(dfa: &SymbolicDfa, trace: &[Letter]) -> bool {
    dfa.accepts(trace)
}
