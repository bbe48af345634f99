/*!
Naive model enumeration.

Find the atoms of the formula, enumerate the powerset of the atoms, and filter by truth under [evaluation](crate::procedures::eval).
*/

use std::collections::BTreeSet;

use crate::context::GenericContext;
use crate::generic::powerset::{in_subset, SubsetMasks};
use crate::misc::log::targets;
use crate::structures::pl::PlId;
use crate::types::err::{CapacityError, ErrorKind};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// All models of `formula`, by powerset enumeration.
    ///
    /// Fails with a capacity error on 64 or more atoms.
    pub(crate) fn all_models_naive(&mut self, formula: PlId) -> Result<Vec<BTreeSet<PlId>>, ErrorKind> {
        let atoms = self.pl_atoms(formula).into_iter().collect::<Vec<_>>();
        if atoms.len() >= 64 {
            return Err(CapacityError::AtomsExhausted { count: atoms.len() }.into());
        }

        let mut models = Vec::default();
        for mask in SubsetMasks::of(atoms.len()) {
            let interpretation = atoms
                .iter()
                .enumerate()
                .filter_map(|(index, atom)| in_subset(mask, index).then_some(*atom))
                .collect::<BTreeSet<_>>();

            if self.pl_eval(formula, &interpretation) {
                models.push(interpretation);
            }
        }

        self.counters.models_enumerated += models.len();
        log::trace!(target: targets::MODELS, "{} models over {} atoms", models.len(), atoms.len());
        Ok(models)
    }
}
