/*!
Negation normal form.

A formula is in negation normal form when negation appears only immediately above atoms.
Each logic has a normalizer, written as a pair of mutually recursive procedures: one for a formula in positive position, one for a formula under a negation.
The negative twin pushes the negation one operator down with the appropriate duality and hands back to the positive side:

- Boolean duals for conjunction and disjunction, in every logic.
- `¬⟨ρ⟩φ ⇒ [ρ]¬φ` and `¬[ρ]φ ⇒ ⟨ρ⟩¬φ` for LDLf, with the regular expression rewritten structurally (guards are normalized, tests recurse).
- The finite-trace dualities for LTLf: next against weak next, until against release, eventually against always.

LDLf has no atoms at the formula level, so its normal form has no negations at all.
A negated LTLf atom stays as the negated atom.
δ-markers are erased by normalization.
*/

use crate::context::GenericContext;
use crate::structures::ldlf::{Ldlf, LdlfId, Regex, RegexId};
use crate::structures::ltlf::{Ltlf, LtlfId};
use crate::structures::pl::{Pl, PlId};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// The negation normal form of an LDLf formula.
    pub fn ldlf_nnf(&mut self, formula: LdlfId) -> LdlfId {
        match self.ldlf_db.get(formula).clone() {
            Ldlf::True | Ldlf::False => formula,
            Ldlf::And(operands) => {
                let operands = operands.into_iter().map(|operand| self.ldlf_nnf(operand)).collect::<Vec<_>>();
                self.mk_ldlf_and(operands)
            }
            Ldlf::Or(operands) => {
                let operands = operands.into_iter().map(|operand| self.ldlf_nnf(operand)).collect::<Vec<_>>();
                self.mk_ldlf_or(operands)
            }
            Ldlf::Not(argument) => self.ldlf_nnf_negated(argument),
            Ldlf::Diamond(regex, body) => {
                let regex = self.regex_nnf(regex);
                let body = self.ldlf_nnf(body);
                self.mk_ldlf_diamond(regex, body)
            }
            Ldlf::Box(regex, body) => {
                let regex = self.regex_nnf(regex);
                let body = self.ldlf_nnf(body);
                self.mk_ldlf_box(regex, body)
            }
            Ldlf::FMarked(argument) | Ldlf::TMarked(argument) => self.ldlf_nnf(argument),
        }
    }

    /// The negation normal form of the negation of an LDLf formula.
    pub(crate) fn ldlf_nnf_negated(&mut self, formula: LdlfId) -> LdlfId {
        match self.ldlf_db.get(formula).clone() {
            Ldlf::True => self.ldlf_false(),
            Ldlf::False => self.ldlf_true(),
            Ldlf::And(operands) => {
                let operands = operands
                    .into_iter()
                    .map(|operand| self.ldlf_nnf_negated(operand))
                    .collect::<Vec<_>>();
                self.mk_ldlf_or(operands)
            }
            Ldlf::Or(operands) => {
                let operands = operands
                    .into_iter()
                    .map(|operand| self.ldlf_nnf_negated(operand))
                    .collect::<Vec<_>>();
                self.mk_ldlf_and(operands)
            }
            Ldlf::Not(argument) => self.ldlf_nnf(argument),
            Ldlf::Diamond(regex, body) => {
                let regex = self.regex_nnf(regex);
                let body = self.ldlf_nnf_negated(body);
                self.mk_ldlf_box(regex, body)
            }
            Ldlf::Box(regex, body) => {
                let regex = self.regex_nnf(regex);
                let body = self.ldlf_nnf_negated(body);
                self.mk_ldlf_diamond(regex, body)
            }
            Ldlf::FMarked(argument) | Ldlf::TMarked(argument) => self.ldlf_nnf_negated(argument),
        }
    }

    fn regex_nnf(&mut self, regex: RegexId) -> RegexId {
        match self.regex_db.get(regex).clone() {
            Regex::Prop(guard) => {
                let guard = self.pl_nnf(guard);
                self.mk_regex_prop(guard)
            }
            Regex::Test(formula) => {
                let formula = self.ldlf_nnf(formula);
                self.mk_regex_test(formula)
            }
            Regex::Union(operands) => {
                let operands = operands.into_iter().map(|operand| self.regex_nnf(operand)).collect::<Vec<_>>();
                self.mk_regex_union(operands)
            }
            Regex::Seq(operands) => {
                let operands = operands.into_iter().map(|operand| self.regex_nnf(operand)).collect::<Vec<_>>();
                self.mk_regex_seq(operands)
            }
            Regex::Star(argument) => {
                let argument = self.regex_nnf(argument);
                self.mk_regex_star(argument)
            }
        }
    }

    /// The negation normal form of a propositional formula.
    pub fn pl_nnf(&mut self, formula: PlId) -> PlId {
        match self.pl_db.get(formula).clone() {
            Pl::True | Pl::False | Pl::Atom(_) => formula,
            Pl::And(operands) => {
                let operands = operands.into_iter().map(|operand| self.pl_nnf(operand)).collect::<Vec<_>>();
                self.mk_pl_and(operands)
            }
            Pl::Or(operands) => {
                let operands = operands.into_iter().map(|operand| self.pl_nnf(operand)).collect::<Vec<_>>();
                self.mk_pl_or(operands)
            }
            Pl::Not(argument) => match self.pl_db.get(argument) {
                Pl::Atom(_) => formula,
                _ => self.pl_negate(argument),
            },
        }
    }

    /// The negation normal form of the negation of a propositional formula.
    pub fn pl_negate(&mut self, formula: PlId) -> PlId {
        match self.pl_db.get(formula).clone() {
            Pl::True => self.pl_false(),
            Pl::False => self.pl_true(),
            Pl::Atom(_) => self.mk_pl_not(formula),
            Pl::And(operands) => {
                let operands = operands.into_iter().map(|operand| self.pl_negate(operand)).collect::<Vec<_>>();
                self.mk_pl_or(operands)
            }
            Pl::Or(operands) => {
                let operands = operands.into_iter().map(|operand| self.pl_negate(operand)).collect::<Vec<_>>();
                self.mk_pl_and(operands)
            }
            Pl::Not(argument) => self.pl_nnf(argument),
        }
    }

    /// The negation normal form of an LTLf formula.
    pub fn ltlf_nnf(&mut self, formula: LtlfId) -> LtlfId {
        match self.ltlf_db.get(formula).clone() {
            Ltlf::True | Ltlf::False | Ltlf::Atom(_) => formula,
            Ltlf::And(operands) => {
                let operands = operands.into_iter().map(|operand| self.ltlf_nnf(operand)).collect::<Vec<_>>();
                self.mk_ltlf_and(operands)
            }
            Ltlf::Or(operands) => {
                let operands = operands.into_iter().map(|operand| self.ltlf_nnf(operand)).collect::<Vec<_>>();
                self.mk_ltlf_or(operands)
            }
            Ltlf::Not(argument) => self.ltlf_nnf_negated(argument),
            Ltlf::Next(argument) => {
                let argument = self.ltlf_nnf(argument);
                self.mk_ltlf_next(argument)
            }
            Ltlf::WeakNext(argument) => {
                let argument = self.ltlf_nnf(argument);
                self.mk_ltlf_weak_next(argument)
            }
            Ltlf::Until(lhs, rhs) => {
                let lhs = self.ltlf_nnf(lhs);
                let rhs = self.ltlf_nnf(rhs);
                self.mk_ltlf_until(lhs, rhs)
            }
            Ltlf::Release(lhs, rhs) => {
                let lhs = self.ltlf_nnf(lhs);
                let rhs = self.ltlf_nnf(rhs);
                self.mk_ltlf_release(lhs, rhs)
            }
            Ltlf::Eventually(argument) => {
                let argument = self.ltlf_nnf(argument);
                self.mk_ltlf_eventually(argument)
            }
            Ltlf::Always(argument) => {
                let argument = self.ltlf_nnf(argument);
                self.mk_ltlf_always(argument)
            }
        }
    }

    /// The negation normal form of the negation of an LTLf formula.
    pub(crate) fn ltlf_nnf_negated(&mut self, formula: LtlfId) -> LtlfId {
        match self.ltlf_db.get(formula).clone() {
            Ltlf::True => self.ltlf_false(),
            Ltlf::False => self.ltlf_true(),
            // The negated atom is kept as-is, rather than weakened with an end-of-trace disjunct.
            Ltlf::Atom(_) => self.mk_ltlf_not(formula),
            Ltlf::And(operands) => {
                let operands = operands
                    .into_iter()
                    .map(|operand| self.ltlf_nnf_negated(operand))
                    .collect::<Vec<_>>();
                self.mk_ltlf_or(operands)
            }
            Ltlf::Or(operands) => {
                let operands = operands
                    .into_iter()
                    .map(|operand| self.ltlf_nnf_negated(operand))
                    .collect::<Vec<_>>();
                self.mk_ltlf_and(operands)
            }
            Ltlf::Not(argument) => self.ltlf_nnf(argument),
            Ltlf::Next(argument) => {
                let argument = self.ltlf_nnf_negated(argument);
                self.mk_ltlf_weak_next(argument)
            }
            Ltlf::WeakNext(argument) => {
                let argument = self.ltlf_nnf_negated(argument);
                self.mk_ltlf_next(argument)
            }
            Ltlf::Until(lhs, rhs) => {
                let lhs = self.ltlf_nnf_negated(lhs);
                let rhs = self.ltlf_nnf_negated(rhs);
                self.mk_ltlf_release(lhs, rhs)
            }
            Ltlf::Release(lhs, rhs) => {
                let lhs = self.ltlf_nnf_negated(lhs);
                let rhs = self.ltlf_nnf_negated(rhs);
                self.mk_ltlf_until(lhs, rhs)
            }
            Ltlf::Eventually(argument) => {
                let argument = self.ltlf_nnf_negated(argument);
                self.mk_ltlf_always(argument)
            }
            Ltlf::Always(argument) => {
                let argument = self.ltlf_nnf_negated(argument);
                self.mk_ltlf_eventually(argument)
            }
        }
    }
}
