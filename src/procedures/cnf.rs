/*!
Conversion to conjunctive normal form, and clause extraction.

The conversion pushes negation into literals first, then distributes disjunction over the clause sets of its operands.
Semantics are preserved; size is not --- the distribution step may expand exponentially, which is why the naive and SAT enumeration strategies exist side by side and why larger formulas go through the symbolic δ instead.

[Clause extraction](GenericContext::pl_clauses) reads a converted formula back as a list of clauses over `(atom, polarity)` literals, ready to seed a solver.
An empty list is the vacuous conjunction (⊤); a list holding an empty clause is ⊥.
*/

use crate::context::GenericContext;
use crate::structures::pl::{Pl, PlId};
use crate::types::err::{ErrorKind, InternalError};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// An equivalent formula in conjunctive normal form.
    pub fn pl_cnf(&mut self, formula: PlId) -> PlId {
        match self.pl_db.get(formula).clone() {
            Pl::True | Pl::False | Pl::Atom(_) => formula,

            Pl::Not(argument) => match self.pl_db.get(argument) {
                Pl::Atom(_) => formula,
                _ => {
                    let pushed = self.pl_negate(argument);
                    self.pl_cnf(pushed)
                }
            },

            Pl::And(operands) => {
                let operands = operands.into_iter().map(|operand| self.pl_cnf(operand)).collect::<Vec<_>>();
                self.mk_pl_and(operands)
            }

            Pl::Or(operands) => {
                // Distribute: a clause of the result combines one clause from each operand.
                let mut combinations: Vec<Vec<PlId>> = vec![Vec::default()];
                for operand in operands {
                    let operand_cnf = self.pl_cnf(operand);
                    let clauses = self.cnf_container(operand_cnf);
                    let mut extended = Vec::with_capacity(combinations.len() * clauses.len());
                    for combination in &combinations {
                        for clause in &clauses {
                            let mut longer = combination.clone();
                            longer.push(*clause);
                            extended.push(longer);
                        }
                    }
                    combinations = extended;
                }

                let clauses = combinations
                    .into_iter()
                    .map(|combination| self.mk_pl_or(combination))
                    .collect::<Vec<_>>();
                self.mk_pl_and(clauses)
            }
        }
    }

    /// The clauses of a formula in conjunctive normal form: the operands of a conjunction, or the formula itself.
    fn cnf_container(&self, formula: PlId) -> Vec<PlId> {
        match self.pl_db.get(formula) {
            Pl::And(operands) => operands.iter().copied().collect(),
            _ => vec![formula],
        }
    }

    /// The clause list of a formula in conjunctive normal form, as `(atom, polarity)` literals.
    pub(crate) fn pl_clauses(&self, formula: PlId) -> Result<Vec<Vec<(PlId, bool)>>, ErrorKind> {
        match self.pl_db.get(formula) {
            Pl::True => Ok(Vec::default()),
            Pl::False => Ok(vec![Vec::default()]),
            Pl::And(operands) => {
                let mut clauses = Vec::with_capacity(operands.len());
                for operand in operands.clone() {
                    clauses.push(self.pl_clause(operand)?);
                }
                Ok(clauses)
            }
            _ => Ok(vec![self.pl_clause(formula)?]),
        }
    }

    fn pl_clause(&self, clause: PlId) -> Result<Vec<(PlId, bool)>, ErrorKind> {
        match self.pl_db.get(clause) {
            Pl::Or(operands) => {
                let mut literals = Vec::with_capacity(operands.len());
                for operand in operands.clone() {
                    literals.push(self.pl_literal(operand)?);
                }
                Ok(literals)
            }
            _ => Ok(vec![self.pl_literal(clause)?]),
        }
    }

    fn pl_literal(&self, literal: PlId) -> Result<(PlId, bool), ErrorKind> {
        match self.pl_db.get(literal) {
            Pl::Atom(_) => Ok((literal, true)),
            Pl::Not(argument) => match self.pl_db.get(*argument) {
                Pl::Atom(_) => Ok((*argument, false)),
                _ => Err(InternalError::NotInClausalForm.into()),
            },
            _ => Err(InternalError::NotInClausalForm.into()),
        }
    }
}

#[cfg(test)]
mod cnf_tests {
    use crate::config::Config;
    use crate::context::Context;
    use crate::structures::pl::Pl;

    #[test]
    fn distributes() {
        let mut the_context = Context::from_config(Config::default());
        let a = the_context.mk_pl_atom("a");
        let b = the_context.mk_pl_atom("b");
        let c = the_context.mk_pl_atom("c");

        // a ∨ (b ∧ c) becomes (a ∨ b) ∧ (a ∨ c)
        let b_and_c = the_context.mk_pl_and([b, c]);
        let formula = the_context.mk_pl_or([a, b_and_c]);
        let cnf = the_context.pl_cnf(formula);

        let a_or_b = the_context.mk_pl_or([a, b]);
        let a_or_c = the_context.mk_pl_or([a, c]);
        let expected = the_context.mk_pl_and([a_or_b, a_or_c]);
        assert_eq!(cnf, expected);
    }

    #[test]
    fn negation_pushed() {
        let mut the_context = Context::from_config(Config::default());
        let a = the_context.mk_pl_atom("a");
        let b = the_context.mk_pl_atom("b");

        // ¬(a ∧ b) becomes ¬a ∨ ¬b
        let a_and_b = the_context.mk_pl_and([a, b]);
        let negated = the_context.mk_pl_not(a_and_b);
        let cnf = the_context.pl_cnf(negated);

        match the_context.pl_db.get(cnf) {
            Pl::Or(operands) => assert_eq!(operands.len(), 2),
            other => panic!("expected a clause, found {other:?}"),
        }
    }
}
