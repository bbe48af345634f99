//! Factories for LDLf formulas and regular expressions.

use std::collections::BTreeSet;

use crate::context::GenericContext;
use crate::db::NodeKey;
use crate::structures::ldlf::{Ldlf, LdlfId, Regex, RegexId};
use crate::structures::pl::PlId;

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// The `tt` singleton.
    pub fn ldlf_true(&self) -> LdlfId {
        LdlfId::from_index(0)
    }

    /// The `ff` singleton.
    pub fn ldlf_false(&self) -> LdlfId {
        LdlfId::from_index(1)
    }

    /// `tt` or `ff`, by value.
    pub fn mk_ldlf_bool(&self, value: bool) -> LdlfId {
        if value {
            self.ldlf_true()
        } else {
            self.ldlf_false()
        }
    }

    /// The conjunction of `args`.
    ///
    /// # Panics
    /// If `args` is empty.
    pub fn mk_ldlf_and(&mut self, args: impl IntoIterator<Item = LdlfId>) -> LdlfId {
        self.ldlf_junction(args, false)
    }

    /// The disjunction of `args`.
    ///
    /// # Panics
    /// If `args` is empty.
    pub fn mk_ldlf_or(&mut self, args: impl IntoIterator<Item = LdlfId>) -> LdlfId {
        self.ldlf_junction(args, true)
    }

    /// The negation of `arg`.
    pub fn mk_ldlf_not(&mut self, arg: LdlfId) -> LdlfId {
        match self.ldlf_db.get(arg) {
            Ldlf::True => self.ldlf_false(),
            Ldlf::False => self.ldlf_true(),
            Ldlf::Not(inner) => *inner,
            _ => self.ldlf_db.intern(Ldlf::Not(arg)),
        }
    }

    /// `⟨regex⟩formula`.
    pub fn mk_ldlf_diamond(&mut self, regex: RegexId, formula: LdlfId) -> LdlfId {
        self.ldlf_db.intern(Ldlf::Diamond(regex, formula))
    }

    /// `[regex]formula`.
    pub fn mk_ldlf_box(&mut self, regex: RegexId, formula: LdlfId) -> LdlfId {
        self.ldlf_db.intern(Ldlf::Box(regex, formula))
    }

    /// `arg`, marked false for ε-purposes.
    pub fn mk_ldlf_fmarked(&mut self, arg: LdlfId) -> LdlfId {
        self.ldlf_db.intern(Ldlf::FMarked(arg))
    }

    /// `arg`, marked true for ε-purposes.
    pub fn mk_ldlf_tmarked(&mut self, arg: LdlfId) -> LdlfId {
        self.ldlf_db.intern(Ldlf::TMarked(arg))
    }

    /// `end`, true exactly when the trace has ended: `[true]ff`.
    pub fn mk_ldlf_end(&mut self) -> LdlfId {
        let guard_true = self.pl_true();
        let regex_true = self.mk_regex_prop(guard_true);
        let ff = self.ldlf_false();
        self.mk_ldlf_box(regex_true, ff)
    }

    /// `last`, true exactly at the final letter: `⟨true⟩end`.
    pub fn mk_ldlf_last(&mut self) -> LdlfId {
        let guard_true = self.pl_true();
        let regex_true = self.mk_regex_prop(guard_true);
        let end = self.mk_ldlf_end();
        self.mk_ldlf_diamond(regex_true, end)
    }

    /// The guard expression of a propositional formula.
    pub fn mk_regex_prop(&mut self, guard: PlId) -> RegexId {
        self.regex_db.intern(Regex::Prop(guard))
    }

    /// The test `formula?`.
    pub fn mk_regex_test(&mut self, formula: LdlfId) -> RegexId {
        self.regex_db.intern(Regex::Test(formula))
    }

    /// The union of `args`, flattened.
    ///
    /// # Panics
    /// If `args` is empty.
    pub fn mk_regex_union(&mut self, args: impl IntoIterator<Item = RegexId>) -> RegexId {
        let args = args.into_iter().collect::<Vec<_>>();
        assert!(!args.is_empty());

        let mut operands: BTreeSet<RegexId> = BTreeSet::default();
        for arg in args {
            match self.regex_db.get(arg) {
                Regex::Union(inner) => operands.extend(inner.iter().copied()),
                _ => {
                    operands.insert(arg);
                }
            }
        }

        match operands.len() {
            1 => *operands.first().unwrap(),
            _ => self.regex_db.intern(Regex::Union(operands)),
        }
    }

    /// The sequence of `args`, in order, flattened.
    ///
    /// # Panics
    /// If `args` is empty.
    pub fn mk_regex_seq(&mut self, args: impl IntoIterator<Item = RegexId>) -> RegexId {
        let args = args.into_iter().collect::<Vec<_>>();
        assert!(!args.is_empty());

        let mut operands: Vec<RegexId> = Vec::default();
        for arg in args {
            match self.regex_db.get(arg) {
                Regex::Seq(inner) => operands.extend(inner.iter().copied()),
                _ => operands.push(arg),
            }
        }

        match operands.len() {
            1 => operands[0],
            _ => self.regex_db.intern(Regex::Seq(operands)),
        }
    }

    /// The Kleene star of `arg`.
    pub fn mk_regex_star(&mut self, arg: RegexId) -> RegexId {
        self.regex_db.intern(Regex::Star(arg))
    }
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    fn ldlf_junction(&mut self, args: impl IntoIterator<Item = LdlfId>, disjunction: bool) -> LdlfId {
        let args = args.into_iter().collect::<Vec<_>>();
        assert!(!args.is_empty());

        let identity = if disjunction { self.ldlf_false() } else { self.ldlf_true() };
        let annihilator = if disjunction { self.ldlf_true() } else { self.ldlf_false() };

        let mut operands: BTreeSet<LdlfId> = BTreeSet::default();
        for arg in args {
            if arg == identity {
                continue;
            }
            if arg == annihilator {
                return annihilator;
            }
            match self.ldlf_db.get(arg) {
                Ldlf::And(inner) if !disjunction => operands.extend(inner.iter().copied()),
                Ldlf::Or(inner) if disjunction => operands.extend(inner.iter().copied()),
                _ => {
                    operands.insert(arg);
                }
            }
        }

        match operands.len() {
            0 => identity,
            1 => *operands.first().unwrap(),
            _ => match disjunction {
                true => self.ldlf_db.intern(Ldlf::Or(operands)),
                false => self.ldlf_db.intern(Ldlf::And(operands)),
            },
        }
    }
}
