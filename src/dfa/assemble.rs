/*!
The explicit transition table, its minimization, and assembly into a [SymbolicDfa](crate::dfa::SymbolicDfa).

Exploration produces a [TransitionTable]: states by index, and per state a row of `(guard, successor)` pairs whose guards --- decision diagrams over the atom variables alone --- partition the letter space.
Two passes turn the table into the final automaton:

1. **Minimization.** Partition refinement in the style of Moore: states start split by finality, and a block splits whenever two members disagree, for some block, on the guard under which they reach it.
   Guards are canonical diagrams, so "the same guard" is plain equality, and the refinement works over the symbolic alphabet without enumerating letters.
   At the fixed point, behaviorally equal states share a block, so the collapsed table has no duplicate states.
2. **Assembly.** States are encoded in `⌈log₂ n⌉` bits (at least one), the guards are re-expressed in the merged variable order `state bits ∥ atom bits`, and the *k*th bit diagram collects every transition whose target has bit *k* set, intersected with its source-state encoding.
*/

use std::collections::{BTreeMap, BTreeSet, HashMap};

use biodivine_lib_bdd::{Bdd, BddVariable, BddVariableSet};

use crate::misc::log::targets;
use crate::types::err::{CapacityError, ErrorKind};

use super::SymbolicDfa;

/// An explicit automaton: indexed states, guard-partitioned rows.
pub struct TransitionTable {
    /// Atom names, in the canonical ordering.
    pub atoms: Vec<String>,

    /// The atom-only variable set the guards live in.
    pub guard_vars: BddVariableSet,

    /// A count of states; indices run `0..n_states`.
    pub n_states: usize,

    /// The initial state.
    pub initial: usize,

    /// The final states.
    pub finals: BTreeSet<usize>,

    /// Per state, `(guard, successor)` pairs whose guards partition the letter space.
    pub rows: Vec<Vec<(Bdd, usize)>>,
}

impl TransitionTable {
    /// An equivalent table in which behaviorally equal states share an index.
    pub fn minimized(&self) -> TransitionTable {
        let n = self.n_states;

        let mut blocks: Vec<usize> = (0..n)
            .map(|state| usize::from(self.finals.contains(&state)))
            .collect();
        let mut block_count = blocks.iter().collect::<BTreeSet<_>>().len();

        loop {
            // Per state: for each target block, the union of guards leading there.
            let mut signatures: Vec<BTreeMap<usize, Bdd>> = Vec::with_capacity(n);
            for state in 0..n {
                let mut signature: BTreeMap<usize, Bdd> = BTreeMap::default();
                for (guard, successor) in &self.rows[state] {
                    signature
                        .entry(blocks[*successor])
                        .and_modify(|union| *union = union.or(guard))
                        .or_insert_with(|| guard.clone());
                }
                signatures.push(signature);
            }

            let mut assignment = vec![0_usize; n];
            let mut groups: Vec<usize> = Vec::default();
            'states: for state in 0..n {
                for (group, &member) in groups.iter().enumerate() {
                    if blocks[member] == blocks[state] && signatures[member] == signatures[state] {
                        assignment[state] = group;
                        continue 'states;
                    }
                }
                assignment[state] = groups.len();
                groups.push(state);
            }

            if groups.len() == block_count {
                log::debug!(target: targets::MINIMIZE, "{} states collapse to {}", n, block_count);
                return self.collapsed(&assignment, groups.len());
            }

            block_count = groups.len();
            blocks = assignment;
        }
    }

    /// The table over blocks, given a stable assignment of states to blocks.
    fn collapsed(&self, assignment: &[usize], block_count: usize) -> TransitionTable {
        let mut representatives = vec![usize::MAX; block_count];
        for state in 0..self.n_states {
            let block = assignment[state];
            if representatives[block] == usize::MAX {
                representatives[block] = state;
            }
        }

        let mut rows = Vec::with_capacity(block_count);
        for block in 0..block_count {
            let representative = representatives[block];
            let mut merged: BTreeMap<usize, Bdd> = BTreeMap::default();
            for (guard, successor) in &self.rows[representative] {
                merged
                    .entry(assignment[*successor])
                    .and_modify(|union| *union = union.or(guard))
                    .or_insert_with(|| guard.clone());
            }
            rows.push(merged.into_iter().map(|(target, guard)| (guard, target)).collect());
        }

        let finals = self
            .finals
            .iter()
            .map(|state| assignment[*state])
            .collect::<BTreeSet<_>>();

        TransitionTable {
            atoms: self.atoms.clone(),
            guard_vars: self.guard_vars.clone(),
            n_states: block_count,
            initial: assignment[self.initial],
            finals,
            rows,
        }
    }

    /// The bit-encoded automaton of the table.
    pub fn assemble(&self, max_state_bits: u32) -> Result<SymbolicDfa, ErrorKind> {
        let bits = state_bits(self.n_states);
        if bits > max_state_bits {
            return Err(CapacityError::StateBitsExhausted { bits: max_state_bits }.into());
        }

        let atom_count = self.atoms.len();
        let vars = BddVariableSet::new_anonymous(bits as u16 + atom_count as u16);
        let all_vars = vars.variables();
        let state_vars = all_vars[..bits as usize].to_vec();
        let atom_vars = all_vars[bits as usize..].to_vec();

        let guard_positions = self
            .guard_vars
            .variables()
            .into_iter()
            .enumerate()
            .map(|(position, var)| (var, position))
            .collect::<HashMap<BddVariable, usize>>();

        let mut bit_bdds = vec![vars.mk_false(); bits as usize];
        for (from, row) in self.rows.iter().enumerate() {
            let source = state_cube(&vars, &state_vars, from);
            for (guard, to) in row {
                if *to == 0 {
                    // Every bit diagram is false on this transition already.
                    continue;
                }
                let lifted = lift_guard(&vars, &atom_vars, &guard_positions, guard);
                let transition = source.and(&lifted);
                for (bit, diagram) in bit_bdds.iter_mut().enumerate() {
                    if to & (1 << bit) != 0 {
                        *diagram = diagram.or(&transition);
                    }
                }
            }
        }

        Ok(SymbolicDfa {
            n_states: self.n_states,
            bits,
            initial: self.initial,
            finals: self.finals.clone(),
            atoms: self.atoms.clone(),
            vars,
            state_vars,
            atom_vars,
            bit_bdds,
        })
    }
}

/// The encoding width for `n` states: `⌈log₂ n⌉`, and at least one.
fn state_bits(n: usize) -> u32 {
    match n {
        0 | 1 | 2 => 1,
        _ => usize::BITS - (n - 1).leading_zeros(),
    }
}

/// The conjunction of state-bit literals encoding `state`.
fn state_cube(vars: &BddVariableSet, state_vars: &[BddVariable], state: usize) -> Bdd {
    let mut cube = vars.mk_true();
    for (bit, var) in state_vars.iter().enumerate() {
        cube = cube.and(&vars.mk_literal(*var, state & (1 << bit) != 0));
    }
    cube
}

/// A guard over the atom-only variables, re-expressed in the merged variable set.
fn lift_guard(
    vars: &BddVariableSet,
    atom_vars: &[BddVariable],
    guard_positions: &HashMap<BddVariable, usize>,
    guard: &Bdd,
) -> Bdd {
    if guard.is_true() {
        return vars.mk_true();
    }
    if guard.is_false() {
        return vars.mk_false();
    }

    let mut lifted = vars.mk_false();
    for cube in guard.sat_clauses() {
        let mut conjunction = vars.mk_true();
        for (var, value) in cube.to_values() {
            let position = guard_positions[&var];
            conjunction = conjunction.and(&vars.mk_literal(atom_vars[position], value));
        }
        lifted = lifted.or(&conjunction);
    }
    lifted
}

#[cfg(test)]
mod assemble_tests {
    use super::*;

    #[test]
    fn bit_widths() {
        assert_eq!(state_bits(1), 1);
        assert_eq!(state_bits(2), 1);
        assert_eq!(state_bits(3), 2);
        assert_eq!(state_bits(4), 2);
        assert_eq!(state_bits(5), 3);
        assert_eq!(state_bits(1024), 10);
        assert_eq!(state_bits(1025), 11);
    }
}
