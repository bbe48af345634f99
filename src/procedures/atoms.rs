/*!
Atom extraction.

Three views of the atoms of a formula are needed at different points:

- The [atom nodes](GenericContext::pl_atoms) of a propositional formula, for evaluation and model enumeration. Quoted and named atoms alike.
- The [quoted subformulas](GenericContext::pl_quoted) of a propositional formula, to lay out the variables of a δ-diagram.
- The [alphabet](GenericContext::ldlf_alphabet) of an LDLf formula: every *name* in any guard or test, however deep. The alphabet fixes the canonical atom ordering of the automaton.
*/

use std::collections::BTreeSet;

use crate::context::GenericContext;
use crate::db::SymbolId;
use crate::structures::ldlf::{Ldlf, LdlfId, Regex, RegexId};
use crate::structures::ltlf::{Ltlf, LtlfId};
use crate::structures::pl::{AtomLabel, Pl, PlId};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// The atom nodes of a propositional formula, quoted and named alike.
    pub fn pl_atoms(&self, formula: PlId) -> BTreeSet<PlId> {
        let mut atoms = BTreeSet::default();
        self.collect_pl_atoms(formula, &mut atoms);
        atoms
    }

    fn collect_pl_atoms(&self, formula: PlId, atoms: &mut BTreeSet<PlId>) {
        match self.pl_db.get(formula) {
            Pl::True | Pl::False => {}
            Pl::Atom(_) => {
                atoms.insert(formula);
            }
            Pl::And(operands) | Pl::Or(operands) => {
                for operand in operands.clone() {
                    self.collect_pl_atoms(operand, atoms);
                }
            }
            Pl::Not(argument) => self.collect_pl_atoms(*argument, atoms),
        }
    }

    /// The LDLf formulas quoted by the atoms of a propositional formula.
    pub fn pl_quoted(&self, formula: PlId) -> BTreeSet<LdlfId> {
        let mut quoted = BTreeSet::default();
        for atom in self.pl_atoms(formula) {
            if let Pl::Atom(AtomLabel::Quoted(subformula)) = self.pl_db.get(atom) {
                quoted.insert(*subformula);
            }
        }
        quoted
    }

    /// The names used by the atoms of a propositional formula.
    pub fn pl_alphabet(&self, formula: PlId) -> BTreeSet<SymbolId> {
        let mut names = BTreeSet::default();
        for atom in self.pl_atoms(formula) {
            if let Pl::Atom(AtomLabel::Name(symbol)) = self.pl_db.get(atom) {
                names.insert(*symbol);
            }
        }
        names
    }

    /// The alphabet of an LDLf formula: every name in any guard or test.
    pub fn ldlf_alphabet(&self, formula: LdlfId) -> BTreeSet<SymbolId> {
        let mut names = BTreeSet::default();
        self.collect_ldlf_alphabet(formula, &mut names);
        names
    }

    fn collect_ldlf_alphabet(&self, formula: LdlfId, names: &mut BTreeSet<SymbolId>) {
        match self.ldlf_db.get(formula).clone() {
            Ldlf::True | Ldlf::False => {}
            Ldlf::And(operands) | Ldlf::Or(operands) => {
                for operand in operands {
                    self.collect_ldlf_alphabet(operand, names);
                }
            }
            Ldlf::Not(argument) | Ldlf::FMarked(argument) | Ldlf::TMarked(argument) => {
                self.collect_ldlf_alphabet(argument, names)
            }
            Ldlf::Diamond(regex, body) | Ldlf::Box(regex, body) => {
                self.collect_regex_alphabet(regex, names);
                self.collect_ldlf_alphabet(body, names);
            }
        }
    }

    fn collect_regex_alphabet(&self, regex: RegexId, names: &mut BTreeSet<SymbolId>) {
        match self.regex_db.get(regex).clone() {
            Regex::Prop(guard) => names.extend(self.pl_alphabet(guard)),
            Regex::Test(formula) => self.collect_ldlf_alphabet(formula, names),
            Regex::Union(operands) => {
                for operand in operands {
                    self.collect_regex_alphabet(operand, names);
                }
            }
            Regex::Seq(operands) => {
                for operand in operands {
                    self.collect_regex_alphabet(operand, names);
                }
            }
            Regex::Star(argument) => self.collect_regex_alphabet(argument, names),
        }
    }

    /// Whether every guard of the formula is over named atoms alone.
    ///
    /// Quoted atoms belong to δ output; a guard holding one is outside the grammar.
    pub(crate) fn ldlf_guards_plain(&self, formula: LdlfId) -> bool {
        match self.ldlf_db.get(formula).clone() {
            Ldlf::True | Ldlf::False => true,
            Ldlf::And(operands) | Ldlf::Or(operands) => operands
                .iter()
                .all(|operand| self.ldlf_guards_plain(*operand)),
            Ldlf::Not(argument) | Ldlf::FMarked(argument) | Ldlf::TMarked(argument) => {
                self.ldlf_guards_plain(argument)
            }
            Ldlf::Diamond(regex, body) | Ldlf::Box(regex, body) => {
                self.regex_guards_plain(regex) && self.ldlf_guards_plain(body)
            }
        }
    }

    fn regex_guards_plain(&self, regex: RegexId) -> bool {
        match self.regex_db.get(regex).clone() {
            Regex::Prop(guard) => self
                .pl_atoms(guard)
                .iter()
                .all(|atom| matches!(self.pl_db.get(*atom), Pl::Atom(AtomLabel::Name(_)))),
            Regex::Test(formula) => self.ldlf_guards_plain(formula),
            Regex::Union(operands) => operands
                .iter()
                .all(|operand| self.regex_guards_plain(*operand)),
            Regex::Seq(operands) => operands
                .iter()
                .all(|operand| self.regex_guards_plain(*operand)),
            Regex::Star(argument) => self.regex_guards_plain(argument),
        }
    }

    /// The alphabet of an LTLf formula.
    pub fn ltlf_alphabet(&self, formula: LtlfId) -> BTreeSet<SymbolId> {
        let mut names = BTreeSet::default();
        self.collect_ltlf_alphabet(formula, &mut names);
        names
    }

    fn collect_ltlf_alphabet(&self, formula: LtlfId, names: &mut BTreeSet<SymbolId>) {
        match self.ltlf_db.get(formula).clone() {
            Ltlf::True | Ltlf::False => {}
            Ltlf::Atom(symbol) => {
                names.insert(symbol);
            }
            Ltlf::And(operands) | Ltlf::Or(operands) => {
                for operand in operands {
                    self.collect_ltlf_alphabet(operand, names);
                }
            }
            Ltlf::Not(argument)
            | Ltlf::Next(argument)
            | Ltlf::WeakNext(argument)
            | Ltlf::Eventually(argument)
            | Ltlf::Always(argument) => self.collect_ltlf_alphabet(argument, names),
            Ltlf::Until(lhs, rhs) | Ltlf::Release(lhs, rhs) => {
                self.collect_ltlf_alphabet(lhs, names);
                self.collect_ltlf_alphabet(rhs, names);
            }
        }
    }
}
