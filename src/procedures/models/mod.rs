/*!
Enumeration of the models of a propositional formula.

A model is a set of the atom nodes which are true; enumeration ranges over the atoms of the formula, so every model is total on those atoms.
Two strategies implement the same contract:

- [Naive](naive): enumerate the powerset of the atoms and keep the interpretations which satisfy the formula. Simple, and exact up to the 64-atom capacity of the mask iterator.
- [SAT](sat): convert to conjunctive normal form, then search with unit propagation and chronological backtracking, banning each model with a blocking clause until the search is exhausted.

The strategies agree on every formula both can handle; which runs is a [configuration](crate::config::Config::enumeration) choice.
No strategy is silently substituted for another: a formula too large for the naive strategy surfaces a [capacity error](crate::types::err::CapacityError::AtomsExhausted) for the caller to act on.
*/

pub mod naive;
pub mod sat;

use std::collections::BTreeSet;

use crate::context::GenericContext;
use crate::structures::pl::PlId;
use crate::types::err::ErrorKind;

/// Which model enumeration to use.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EnumerationStrategy {
    /// Powerset enumeration with evaluation.
    #[default]
    Naive,

    /// CNF conversion and solver-style search with blocking clauses.
    Sat,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// All models of `formula` over its atoms, using the configured strategy.
    pub fn all_models(&mut self, formula: PlId) -> Result<Vec<BTreeSet<PlId>>, ErrorKind> {
        self.all_models_with(formula, self.config.enumeration)
    }

    /// All models of `formula` over its atoms, using the given strategy.
    pub fn all_models_with(
        &mut self,
        formula: PlId,
        strategy: EnumerationStrategy,
    ) -> Result<Vec<BTreeSet<PlId>>, ErrorKind> {
        match strategy {
            EnumerationStrategy::Naive => self.all_models_naive(formula),
            EnumerationStrategy::Sat => self.all_models_sat(formula),
        }
    }
}
