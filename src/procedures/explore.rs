/*!
Exploration: the breadth-first subset construction.

Exploration starts from the [initial DFA state](crate::structures::state::DfaState::initial) of the normalized formula and pops states from a queue.
For each popped state it asks a strategy for the successors, registers any state not seen before --- structural identity, so revisits are cheap --- and records the transitions in an explicit [table](crate::dfa::TransitionTable) for minimization and assembly.

Two strategies answer the successor question, behind the [Strategy] trait:

- [NaiveStrategy] enumerates every letter over the alphabet.
  For each letter, the δ of every member formula is evaluated against the letter, the member expansions are conjoined, and [model enumeration](crate::procedures::models) turns the conjunction into successor NFA states --- one per model, holding the quoted atoms the model makes true.
  The letter itself becomes the transition guard, as a minterm over the atom variables.
- [BddStrategy] expands each NFA state once, symbolically, into a decision diagram over the variable block `atoms ∥ quoted subformulas` (the quoted block is laid out up front from the [quoted closure](crate::context::GenericContext::quoted_closure)).
  Each path to 1 through the diagram is a cube: its positive quoted literals name a successor NFA state, and its atom literals contribute a guard cube.
  Guards are unioned per successor, and the successor maps of the member NFA states are then refined into a partition of the letter space, one cell per successor DFA state.

[CompositionalStrategy] is the symbolic strategy with one addition: diagram construction is memoized per propositional node, across all states of the exploration.
Hash-consing makes the memo sound --- equal keys are equal formulas --- and star-heavy formulas with shared subexpressions build each shared diagram once.

Exploration is cancelled cooperatively: the [time limit](crate::config::Config::time_limit), if armed, is checked at every state pop, and the state budget is checked at every registration.
On any failure the partial automaton is discarded.
*/

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::time::Instant;

use biodivine_lib_bdd::{Bdd, BddVariable, BddVariableSet};

use crate::context::GenericContext;
use crate::dfa::{SymbolicDfa, TransitionTable};
use crate::generic::powerset::{in_subset, SubsetMasks};
use crate::misc::log::targets;
use crate::procedures::eval::Interpretation;
use crate::structures::ldlf::LdlfId;
use crate::structures::pl::{AtomLabel, Pl, PlId};
use crate::structures::state::{DfaState, NfaState};
use crate::types::err::{CapacityError, ErrorKind, InternalError};

/// A way to build the transition table of a formula.
pub trait Strategy {
    /// The explored, unminimized transition table of `formula`.
    fn build<R: rand::Rng + std::default::Default>(
        &mut self,
        ctx: &mut GenericContext<R>,
        formula: LdlfId,
    ) -> Result<TransitionTable, ErrorKind>;
}

/// Drives a strategy from formula to finished automaton: explore, minimize, assemble.
pub struct Translator<S: Strategy> {
    strategy: S,
}

impl<S: Strategy> Translator<S> {
    /// A translator over the given strategy.
    pub fn new(strategy: S) -> Self {
        Translator { strategy }
    }

    /// The minimal symbolic automaton of `formula`.
    pub fn to_dfa<R: rand::Rng + std::default::Default>(
        &mut self,
        ctx: &mut GenericContext<R>,
        formula: LdlfId,
    ) -> Result<SymbolicDfa, ErrorKind> {
        let start = Instant::now();
        let table = self.strategy.build(ctx, formula)?;
        let minimized = table.minimized();
        let automaton = minimized.assemble(ctx.config.max_state_bits)?;
        ctx.counters.time = start.elapsed();
        Ok(automaton)
    }
}

/// Queue, registry, and rows of an exploration in progress.
struct Exploration {
    states: HashMap<DfaState, usize>,
    queue: VecDeque<(DfaState, usize)>,
    finals: BTreeSet<usize>,
    rows: Vec<Vec<(Bdd, usize)>>,
    capacity: usize,
    started: Instant,
}

impl Exploration {
    fn begin<R: rand::Rng + std::default::Default>(
        ctx: &mut GenericContext<R>,
        initial: DfaState,
    ) -> Result<Self, ErrorKind> {
        let mut exploration = Exploration {
            states: HashMap::default(),
            queue: VecDeque::default(),
            finals: BTreeSet::default(),
            rows: Vec::default(),
            capacity: 1_usize << ctx.config.max_state_bits,
            started: Instant::now(),
        };
        exploration.register(ctx, initial)?;
        Ok(exploration)
    }

    /// The index of `state`, registering and queueing it if new.
    fn register<R: rand::Rng + std::default::Default>(
        &mut self,
        ctx: &mut GenericContext<R>,
        state: DfaState,
    ) -> Result<usize, ErrorKind> {
        if let Some(index) = self.states.get(&state) {
            return Ok(*index);
        }

        let index = self.rows.len();
        if index >= self.capacity {
            return Err(CapacityError::StateBitsExhausted {
                bits: ctx.config.max_state_bits,
            }
            .into());
        }

        if ctx.dfa_is_final(&state)? {
            self.finals.insert(index);
        }
        self.rows.push(Vec::default());
        self.states.insert(state.clone(), index);
        self.queue.push_back((state, index));
        ctx.counters.states_discovered += 1;
        log::trace!(target: targets::EXPLORE, "state {index} registered");
        Ok(index)
    }

    /// Cooperative cancellation, checked at each state pop.
    fn tick<R: rand::Rng + std::default::Default>(
        &self,
        ctx: &GenericContext<R>,
    ) -> Result<(), ErrorKind> {
        let limit = ctx.config.time_limit;
        if !limit.is_zero() && self.started.elapsed() > limit {
            return Err(ErrorKind::Cancellation);
        }
        Ok(())
    }
}

/// The alphabet of the formula: name-sorted atoms, their nodes, and an atom-only variable set for guards.
struct Alphabet {
    names: Vec<String>,
    nodes: Vec<PlId>,
    guard_vars: BddVariableSet,
    guard_var_list: Vec<BddVariable>,
}

fn alphabet_of<R: rand::Rng + std::default::Default>(
    ctx: &mut GenericContext<R>,
    formula: LdlfId,
) -> Alphabet {
    let mut names = ctx
        .ldlf_alphabet(formula)
        .into_iter()
        .map(|symbol| (ctx.symbol_db.name(symbol).to_owned(), symbol))
        .collect::<Vec<_>>();
    names.sort();

    let nodes = names
        .iter()
        .map(|(_, symbol)| ctx.mk_pl_atom_symbol(*symbol))
        .collect::<Vec<_>>();

    let guard_vars = BddVariableSet::new_anonymous(names.len() as u16);
    let guard_var_list = guard_vars.variables();

    Alphabet {
        names: names.into_iter().map(|(name, _)| name).collect(),
        nodes,
        guard_vars,
        guard_var_list,
    }
}

/// Letter-enumerating exploration.
#[derive(Default)]
pub struct NaiveStrategy;

impl Strategy for NaiveStrategy {
    fn build<R: rand::Rng + std::default::Default>(
        &mut self,
        ctx: &mut GenericContext<R>,
        formula: LdlfId,
    ) -> Result<TransitionTable, ErrorKind> {
        let formula = ctx.ldlf_nnf(formula);
        let alphabet = alphabet_of(ctx, formula);
        if alphabet.nodes.len() >= 64 {
            return Err(CapacityError::AtomsExhausted {
                count: alphabet.nodes.len(),
            }
            .into());
        }

        let mut exploration = Exploration::begin(ctx, DfaState::initial(formula))?;

        while let Some((state, index)) = exploration.queue.pop_front() {
            exploration.tick(ctx)?;

            for mask in SubsetMasks::of(alphabet.nodes.len()) {
                let letter = alphabet
                    .nodes
                    .iter()
                    .enumerate()
                    .filter_map(|(position, node)| in_subset(mask, position).then_some(*node))
                    .collect::<Interpretation>();

                let successor = next_dfa_state(ctx, &state, &letter)?;
                let to = exploration.register(ctx, successor)?;

                let mut guard = alphabet.guard_vars.mk_true();
                for (position, var) in alphabet.guard_var_list.iter().enumerate() {
                    guard = guard.and(&alphabet.guard_vars.mk_literal(*var, in_subset(mask, position)));
                }
                exploration.rows[index].push((guard, to));
                ctx.counters.transitions_added += 1;
            }
        }

        Ok(TransitionTable {
            atoms: alphabet.names,
            guard_vars: alphabet.guard_vars,
            n_states: exploration.rows.len(),
            initial: 0,
            finals: exploration.finals,
            rows: exploration.rows,
        })
    }
}

/// The successor DFA state under a concrete letter: the union of member successor sets.
fn next_dfa_state<R: rand::Rng + std::default::Default>(
    ctx: &mut GenericContext<R>,
    state: &DfaState,
    letter: &Interpretation,
) -> Result<DfaState, ErrorKind> {
    let mut successors = BTreeSet::default();
    for member in &state.states {
        successors.extend(next_nfa_states(ctx, member, letter)?);
    }
    Ok(DfaState::new(successors))
}

/// The successor NFA states of one NFA state under a concrete letter: one per model of the conjoined member expansions.
fn next_nfa_states<R: rand::Rng + std::default::Default>(
    ctx: &mut GenericContext<R>,
    state: &NfaState,
    letter: &Interpretation,
) -> Result<BTreeSet<NfaState>, ErrorKind> {
    let mut expansions = vec![ctx.pl_true()];
    for member in state.formulas.clone() {
        expansions.push(ctx.delta(member, letter));
    }
    let conjunction = ctx.mk_pl_and(expansions);

    let mut successors = BTreeSet::default();
    for model in ctx.all_models(conjunction)? {
        let mut formulas = BTreeSet::default();
        for atom in model {
            match ctx.pl_db.get(atom) {
                Pl::Atom(AtomLabel::Quoted(quoted)) => {
                    formulas.insert(*quoted);
                }
                _ => return Err(InternalError::NamedAtomInSuccessor.into()),
            }
        }
        successors.insert(NfaState::new(formulas));
    }
    Ok(successors)
}

/// The role of a variable in a δ-diagram.
enum VarRole {
    /// An alphabet atom, by position in the canonical ordering.
    Atom(usize),

    /// A quoted subformula.
    Quoted(LdlfId),
}

/// The shared variable layout of the symbolic strategies.
struct SymbolicSpace {
    guard_vars: BddVariableSet,
    guard_var_list: Vec<BddVariable>,
    delta_vars: BddVariableSet,
    roles: HashMap<BddVariable, VarRole>,
    pl_vars: HashMap<PlId, BddVariable>,
}

fn symbolic_space<R: rand::Rng + std::default::Default>(
    ctx: &mut GenericContext<R>,
    formula: LdlfId,
    alphabet: &Alphabet,
) -> SymbolicSpace {
    let closure = ctx.quoted_closure(formula).into_iter().collect::<Vec<_>>();

    let delta_vars =
        BddVariableSet::new_anonymous(alphabet.nodes.len() as u16 + closure.len() as u16);
    let delta_var_list = delta_vars.variables();

    let mut roles = HashMap::default();
    let mut pl_vars = HashMap::default();

    for (position, node) in alphabet.nodes.iter().enumerate() {
        roles.insert(delta_var_list[position], VarRole::Atom(position));
        pl_vars.insert(*node, delta_var_list[position]);
    }
    for (offset, quoted) in closure.iter().enumerate() {
        let var = delta_var_list[alphabet.nodes.len() + offset];
        roles.insert(var, VarRole::Quoted(*quoted));
        let atom = ctx.mk_pl_quote(*quoted);
        pl_vars.insert(atom, var);
    }

    SymbolicSpace {
        guard_vars: alphabet.guard_vars.clone(),
        guard_var_list: alphabet.guard_var_list.clone(),
        delta_vars,
        roles,
        pl_vars,
    }
}

/// A propositional formula as a decision diagram over the δ-variable block.
fn pl_to_bdd<R: rand::Rng + std::default::Default>(
    ctx: &GenericContext<R>,
    space: &SymbolicSpace,
    memo: &mut Option<HashMap<PlId, Bdd>>,
    formula: PlId,
) -> Bdd {
    if let Some(memo_map) = memo {
        if let Some(found) = memo_map.get(&formula) {
            return found.clone();
        }
    }

    let result = match ctx.pl_db.get(formula).clone() {
        Pl::True => space.delta_vars.mk_true(),
        Pl::False => space.delta_vars.mk_false(),
        Pl::Atom(_) => space.delta_vars.mk_var(space.pl_vars[&formula]),
        Pl::And(operands) => {
            let mut conjunction = space.delta_vars.mk_true();
            for operand in operands {
                conjunction = conjunction.and(&pl_to_bdd(ctx, space, memo, operand));
            }
            conjunction
        }
        Pl::Or(operands) => {
            let mut disjunction = space.delta_vars.mk_false();
            for operand in operands {
                disjunction = disjunction.or(&pl_to_bdd(ctx, space, memo, operand));
            }
            disjunction
        }
        Pl::Not(argument) => pl_to_bdd(ctx, space, memo, argument).not(),
    };

    if let Some(memo_map) = memo {
        memo_map.insert(formula, result.clone());
    }
    result
}

/// The successor map of one NFA state: per successor, the union of the guard cubes reaching it.
fn nfa_transitions<R: rand::Rng + std::default::Default>(
    ctx: &mut GenericContext<R>,
    space: &SymbolicSpace,
    memo: &mut Option<HashMap<PlId, Bdd>>,
    cache: &mut HashMap<NfaState, BTreeMap<NfaState, Bdd>>,
    state: &NfaState,
) -> Result<BTreeMap<NfaState, Bdd>, ErrorKind> {
    if let Some(found) = cache.get(state) {
        return Ok(found.clone());
    }

    let mut expansions = vec![ctx.pl_true()];
    for member in state.formulas.clone() {
        expansions.push(ctx.delta_symbolic(member));
    }
    let conjunction = ctx.mk_pl_and(expansions);
    let diagram = pl_to_bdd(ctx, space, memo, conjunction);

    // A constant diagram has no variables to cube over: everything leads to the
    // vacuous state, or nothing leads anywhere.
    if diagram.is_true() {
        let everywhere =
            BTreeMap::from([(NfaState::new(BTreeSet::default()), space.guard_vars.mk_true())]);
        cache.insert(state.clone(), everywhere.clone());
        return Ok(everywhere);
    }
    if diagram.is_false() {
        cache.insert(state.clone(), BTreeMap::default());
        return Ok(BTreeMap::default());
    }

    let mut transitions: BTreeMap<NfaState, Bdd> = BTreeMap::default();
    for cube in diagram.sat_clauses() {
        let mut formulas = BTreeSet::default();
        let mut guard = space.guard_vars.mk_true();

        for (var, value) in cube.to_values() {
            match space.roles[&var] {
                VarRole::Atom(position) => {
                    guard = guard
                        .and(&space.guard_vars.mk_literal(space.guard_var_list[position], value));
                }
                VarRole::Quoted(quoted) => {
                    if value {
                        formulas.insert(quoted);
                    }
                }
            }
        }

        let successor = NfaState::new(formulas);
        transitions
            .entry(successor)
            .and_modify(|union| *union = union.or(&guard))
            .or_insert(guard);
    }

    cache.insert(state.clone(), transitions.clone());
    Ok(transitions)
}

/// Symbolic exploration: one δ-diagram per NFA state, successors from its cubes.
#[derive(Default)]
pub struct BddStrategy {
    share_expansions: bool,
}

impl BddStrategy {
    /// A symbolic strategy building each state diagram independently.
    pub fn new() -> Self {
        Self::default()
    }
}

/// The symbolic strategy with diagram construction memoized per propositional node, across states.
pub struct CompositionalStrategy;

impl Strategy for CompositionalStrategy {
    fn build<R: rand::Rng + std::default::Default>(
        &mut self,
        ctx: &mut GenericContext<R>,
        formula: LdlfId,
    ) -> Result<TransitionTable, ErrorKind> {
        let mut inner = BddStrategy {
            share_expansions: true,
        };
        inner.build(ctx, formula)
    }
}

impl Strategy for BddStrategy {
    fn build<R: rand::Rng + std::default::Default>(
        &mut self,
        ctx: &mut GenericContext<R>,
        formula: LdlfId,
    ) -> Result<TransitionTable, ErrorKind> {
        let formula = ctx.ldlf_nnf(formula);
        let alphabet = alphabet_of(ctx, formula);
        let space = symbolic_space(ctx, formula, &alphabet);

        let mut memo: Option<HashMap<PlId, Bdd>> = self.share_expansions.then(HashMap::default);
        let mut cache: HashMap<NfaState, BTreeMap<NfaState, Bdd>> = HashMap::default();

        let mut exploration = Exploration::begin(ctx, DfaState::initial(formula))?;

        while let Some((state, index)) = exploration.queue.pop_front() {
            exploration.tick(ctx)?;

            // Merge the successor maps of the member NFA states.
            let mut merged: BTreeMap<NfaState, Bdd> = BTreeMap::default();
            for member in &state.states {
                let transitions = nfa_transitions(ctx, &space, &mut memo, &mut cache, member)?;
                for (successor, guard) in transitions {
                    merged
                        .entry(successor)
                        .and_modify(|union| *union = union.or(&guard))
                        .or_insert(guard);
                }
            }

            // Refine the letter space into one cell per successor DFA state.
            let mut cells: Vec<(BTreeSet<NfaState>, Bdd)> =
                vec![(BTreeSet::default(), space.guard_vars.mk_true())];
            for (successor, guard) in merged {
                let mut refined = Vec::with_capacity(cells.len() * 2);
                for (members, cell_guard) in cells {
                    let inside = cell_guard.and(&guard);
                    if !inside.is_false() {
                        let mut extended = members.clone();
                        extended.insert(successor.clone());
                        refined.push((extended, inside));
                    }
                    let outside = cell_guard.and(&guard.not());
                    if !outside.is_false() {
                        refined.push((members, outside));
                    }
                }
                cells = refined;
            }

            for (members, guard) in cells {
                let to = exploration.register(ctx, DfaState::new(members))?;
                exploration.rows[index].push((guard, to));
                ctx.counters.transitions_added += 1;
            }
        }

        Ok(TransitionTable {
            atoms: alphabet.names,
            guard_vars: alphabet.guard_vars,
            n_states: exploration.rows.len(),
            initial: 0,
            finals: exploration.finals,
            rows: exploration.rows,
        })
    }
}
