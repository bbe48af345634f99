/*!
SAT-based model enumeration.

The formula is converted to conjunctive normal form and the clauses seed a small search: unit propagation to a fixed point, then a decision on the first unassigned atom, with chronological backtracking on conflict.
Whenever the valuation is total a model is recorded and its negation is added as a blocking clause, so resuming the search walks on to the next model and the enumeration is exhaustive.

Decisions range over every atom of the *original* formula --- atoms simplified away by the conversion are decided freely, which keeps the enumeration total on the same atom set as the naive strategy.
Decision polarity follows [polarity_lean](crate::config::Config::polarity_lean) through the context's source of randomness.
*/

use std::collections::{BTreeSet, HashMap};

use crate::context::GenericContext;
use crate::misc::log::targets;
use crate::structures::pl::PlId;
use crate::types::err::ErrorKind;

/// A decision: which variable, which value, and how much of the trail it owns.
struct Decision {
    variable: usize,
    value: bool,
    trail_mark: usize,
    flipped: bool,
}

/// The state of a model search over indexed variables.
struct ModelSearch {
    clauses: Vec<Vec<(usize, bool)>>,
    valuation: Vec<Option<bool>>,
    trail: Vec<usize>,
    decisions: Vec<Decision>,
}

impl ModelSearch {
    fn new(variable_count: usize, clauses: Vec<Vec<(usize, bool)>>) -> Self {
        ModelSearch {
            clauses,
            valuation: vec![None; variable_count],
            trail: Vec::default(),
            decisions: Vec::default(),
        }
    }

    /// Propagate units to a fixed point. False on conflict.
    fn propagate(&mut self) -> bool {
        loop {
            let mut progressed = false;

            for index in 0..self.clauses.len() {
                let mut satisfied = false;
                let mut unassigned = None;
                let mut unassigned_count = 0;

                for &(variable, polarity) in &self.clauses[index] {
                    match self.valuation[variable] {
                        Some(value) if value == polarity => {
                            satisfied = true;
                            break;
                        }
                        Some(_) => {}
                        None => {
                            unassigned_count += 1;
                            unassigned = Some((variable, polarity));
                        }
                    }
                }

                if satisfied {
                    continue;
                }

                match unassigned_count {
                    0 => return false,
                    1 => {
                        let (variable, polarity) = unassigned.expect("lost unit literal");
                        self.valuation[variable] = Some(polarity);
                        self.trail.push(variable);
                        progressed = true;
                    }
                    _ => {}
                }
            }

            if !progressed {
                return true;
            }
        }
    }

    /// Unwind to the most recent unflipped decision and flip it. False if none remains.
    fn backtrack(&mut self) -> bool {
        while let Some(decision) = self.decisions.pop() {
            while self.trail.len() > decision.trail_mark {
                let variable = self.trail.pop().expect("trail shorter than its mark");
                self.valuation[variable] = None;
            }

            if !decision.flipped {
                let value = !decision.value;
                self.valuation[decision.variable] = Some(value);
                self.trail.push(decision.variable);
                self.decisions.push(Decision {
                    variable: decision.variable,
                    value,
                    trail_mark: decision.trail_mark,
                    flipped: true,
                });
                return true;
            }
        }
        false
    }

    /// The next model, if any remains, banning it before returning.
    fn next_model(&mut self, mut polarity: impl FnMut() -> bool) -> Option<Vec<bool>> {
        loop {
            if !self.propagate() {
                if !self.backtrack() {
                    return None;
                }
                continue;
            }

            match self.valuation.iter().position(|value| value.is_none()) {
                Some(variable) => {
                    let value = polarity();
                    self.decisions.push(Decision {
                        variable,
                        value,
                        trail_mark: self.trail.len(),
                        flipped: false,
                    });
                    self.valuation[variable] = Some(value);
                    self.trail.push(variable);
                }

                None => {
                    let model = self.valuation.iter().map(|value| value.expect("partial model")).collect::<Vec<_>>();

                    let blocking = model
                        .iter()
                        .enumerate()
                        .map(|(variable, &value)| (variable, !value))
                        .collect::<Vec<_>>();
                    self.clauses.push(blocking);

                    self.backtrack();
                    return Some(model);
                }
            }
        }
    }
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// All models of `formula`, by CNF conversion and search with blocking clauses.
    pub(crate) fn all_models_sat(&mut self, formula: PlId) -> Result<Vec<BTreeSet<PlId>>, ErrorKind> {
        let atoms = self.pl_atoms(formula).into_iter().collect::<Vec<_>>();
        let atom_index = atoms
            .iter()
            .enumerate()
            .map(|(index, atom)| (*atom, index))
            .collect::<HashMap<PlId, usize>>();

        let cnf = self.pl_cnf(formula);
        let literal_clauses = self.pl_clauses(cnf)?;

        let mut clauses = Vec::with_capacity(literal_clauses.len());
        for literal_clause in literal_clauses {
            let mut clause = Vec::with_capacity(literal_clause.len());
            for (atom, polarity) in literal_clause {
                let index = atom_index.get(&atom).copied().expect("atom missing from index");
                clause.push((index, polarity));
            }
            clauses.push(clause);
        }

        let mut search = ModelSearch::new(atoms.len(), clauses);
        let lean = self.config.polarity_lean;

        let mut models = Vec::default();
        while let Some(model) = search.next_model(|| self.rng.random_bool(lean)) {
            let interpretation = model
                .iter()
                .enumerate()
                .filter_map(|(index, &value)| value.then_some(atoms[index]))
                .collect::<BTreeSet<_>>();
            models.push(interpretation);
        }

        self.counters.models_enumerated += models.len();
        log::trace!(target: targets::MODELS, "{} models over {} atoms", models.len(), atoms.len());
        Ok(models)
    }
}
