/*!
Evaluation, of propositional formulas under an interpretation and of LDLf/LTLf formulas over a trace.

An interpretation is a set of the atom nodes which are true; everything absent is false.
Traces here are sequences of interpretations --- the internal, set-based view of a [trace](crate::structures::trace).

The trace evaluators are direct readings of the semantics: regular expressions are interpreted as reachability between trace positions, with the star as a closure over positions.
They make no use of δ-expansion or automata, which is the point --- they serve as independent oracles for the translation pipeline, and as a way to check a formula against a handful of traces without paying for a full translation.

A note on positions: an LDLf formula is evaluated at positions `0..=len`, where `len` --- one past the final letter --- is the *end* position at which `end` holds, no guard can step, and every box is vacuous.
LTLf formulas are evaluated over non-empty traces at positions `0..len`; on the empty trace every LTLf formula is false.
*/

use std::collections::BTreeSet;

use crate::context::GenericContext;
use crate::structures::ldlf::{Ldlf, LdlfId, Regex, RegexId};
use crate::structures::ltlf::{Ltlf, LtlfId};
use crate::structures::pl::{AtomLabel, Pl, PlId};

/// The internal view of a letter: the set of true atom nodes.
pub type Interpretation = BTreeSet<PlId>;

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// The truth of a propositional formula under an interpretation.
    pub fn pl_eval(&self, formula: PlId, interpretation: &Interpretation) -> bool {
        match self.pl_db.get(formula) {
            Pl::True => true,
            Pl::False => false,
            Pl::Atom(_) => interpretation.contains(&formula),
            Pl::And(operands) => operands.iter().all(|operand| self.pl_eval(*operand, interpretation)),
            Pl::Or(operands) => operands.iter().any(|operand| self.pl_eval(*operand, interpretation)),
            Pl::Not(argument) => !self.pl_eval(*argument, interpretation),
        }
    }

    /// The truth of an LDLf formula at `position` of `trace`.
    ///
    /// Positions run from `0` to `trace.len()` inclusive; the final position is the end of the trace.
    pub fn ldlf_holds_at(&self, formula: LdlfId, trace: &[Interpretation], position: usize) -> bool {
        match self.ldlf_db.get(formula).clone() {
            Ldlf::True => true,
            Ldlf::False => false,
            Ldlf::And(operands) => operands
                .iter()
                .all(|operand| self.ldlf_holds_at(*operand, trace, position)),
            Ldlf::Or(operands) => operands
                .iter()
                .any(|operand| self.ldlf_holds_at(*operand, trace, position)),
            Ldlf::Not(argument) => !self.ldlf_holds_at(argument, trace, position),
            Ldlf::Diamond(regex, body) => self
                .regex_steps(regex, trace, position)
                .iter()
                .any(|&landing| self.ldlf_holds_at(body, trace, landing)),
            Ldlf::Box(regex, body) => self
                .regex_steps(regex, trace, position)
                .iter()
                .all(|&landing| self.ldlf_holds_at(body, trace, landing)),
            // Markers are δ bookkeeping; under the trace semantics they are transparent.
            Ldlf::FMarked(argument) | Ldlf::TMarked(argument) => {
                self.ldlf_holds_at(argument, trace, position)
            }
        }
    }

    /// The truth of an LDLf formula over `trace`.
    pub fn ldlf_holds(&self, formula: LdlfId, trace: &[Interpretation]) -> bool {
        self.ldlf_holds_at(formula, trace, 0)
    }

    /// The positions reachable from `position` along `regex`.
    fn regex_steps(&self, regex: RegexId, trace: &[Interpretation], position: usize) -> BTreeSet<usize> {
        match self.regex_db.get(regex).clone() {
            Regex::Prop(guard) => {
                if position < trace.len() && self.pl_eval(guard, &trace[position]) {
                    BTreeSet::from([position + 1])
                } else {
                    BTreeSet::default()
                }
            }
            Regex::Test(formula) => {
                if self.ldlf_holds_at(formula, trace, position) {
                    BTreeSet::from([position])
                } else {
                    BTreeSet::default()
                }
            }
            Regex::Union(operands) => {
                let mut landings = BTreeSet::default();
                for operand in operands {
                    landings.extend(self.regex_steps(operand, trace, position));
                }
                landings
            }
            Regex::Seq(operands) => {
                let mut landings = BTreeSet::from([position]);
                for operand in operands {
                    let mut next = BTreeSet::default();
                    for landing in landings {
                        next.extend(self.regex_steps(operand, trace, landing));
                    }
                    landings = next;
                }
                landings
            }
            Regex::Star(argument) => {
                let mut landings = BTreeSet::from([position]);
                let mut frontier = vec![position];
                while let Some(from) = frontier.pop() {
                    for landing in self.regex_steps(argument, trace, from) {
                        if landings.insert(landing) {
                            frontier.push(landing);
                        }
                    }
                }
                landings
            }
        }
    }

    /// The truth of an LTLf formula over `trace`.
    ///
    /// LTLf formulas are read over non-empty traces: on the empty trace the result is false.
    pub fn ltlf_holds(&self, formula: LtlfId, trace: &[Interpretation]) -> bool {
        if trace.is_empty() {
            return false;
        }
        self.ltlf_holds_at(formula, trace, 0)
    }

    fn ltlf_holds_at(&self, formula: LtlfId, trace: &[Interpretation], position: usize) -> bool {
        match self.ltlf_db.get(formula).clone() {
            Ltlf::True => true,
            Ltlf::False => false,
            Ltlf::Atom(symbol) => {
                let atom = self.pl_db.key_of(&Pl::Atom(AtomLabel::Name(symbol)));
                match atom {
                    Some(atom) => trace[position].contains(&atom),
                    None => false,
                }
            }
            Ltlf::And(operands) => operands
                .iter()
                .all(|operand| self.ltlf_holds_at(*operand, trace, position)),
            Ltlf::Or(operands) => operands
                .iter()
                .any(|operand| self.ltlf_holds_at(*operand, trace, position)),
            Ltlf::Not(argument) => !self.ltlf_holds_at(argument, trace, position),
            Ltlf::Next(argument) => {
                position + 1 < trace.len() && self.ltlf_holds_at(argument, trace, position + 1)
            }
            Ltlf::WeakNext(argument) => {
                position + 1 >= trace.len() || self.ltlf_holds_at(argument, trace, position + 1)
            }
            Ltlf::Until(lhs, rhs) => (position..trace.len()).any(|witness| {
                self.ltlf_holds_at(rhs, trace, witness)
                    && (position..witness).all(|early| self.ltlf_holds_at(lhs, trace, early))
            }),
            Ltlf::Release(lhs, rhs) => {
                for witness in position..trace.len() {
                    if !self.ltlf_holds_at(rhs, trace, witness) {
                        return false;
                    }
                    if self.ltlf_holds_at(lhs, trace, witness) {
                        return true;
                    }
                }
                true
            }
            Ltlf::Eventually(argument) => {
                (position..trace.len()).any(|witness| self.ltlf_holds_at(argument, trace, witness))
            }
            Ltlf::Always(argument) => {
                (position..trace.len()).all(|witness| self.ltlf_holds_at(argument, trace, witness))
            }
        }
    }
}
