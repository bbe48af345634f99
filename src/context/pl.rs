//! Factories for propositional formulas.

use std::collections::BTreeSet;

use crate::context::GenericContext;
use crate::db::{NodeKey, SymbolId};
use crate::structures::ldlf::LdlfId;
use crate::structures::pl::{AtomLabel, Pl, PlId};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// The `⊤` singleton.
    pub fn pl_true(&self) -> PlId {
        PlId::from_index(0)
    }

    /// The `⊥` singleton.
    pub fn pl_false(&self) -> PlId {
        PlId::from_index(1)
    }

    /// `⊤` or `⊥`, by value.
    pub fn mk_pl_bool(&self, value: bool) -> PlId {
        if value {
            self.pl_true()
        } else {
            self.pl_false()
        }
    }

    /// The atom named `name`.
    pub fn mk_pl_atom(&mut self, name: &str) -> PlId {
        let symbol = self.symbol_db.intern(name);
        self.mk_pl_atom_symbol(symbol)
    }

    /// The atom of an interned name.
    pub fn mk_pl_atom_symbol(&mut self, symbol: SymbolId) -> PlId {
        self.pl_db.intern(Pl::Atom(AtomLabel::Name(symbol)))
    }

    /// The atom quoting `formula`.
    ///
    /// Quoted atoms name LDLf formulas inside δ-expansions; see [structures::pl](crate::structures::pl).
    pub fn mk_pl_quote(&mut self, formula: LdlfId) -> PlId {
        self.pl_db.intern(Pl::Atom(AtomLabel::Quoted(formula)))
    }

    /// The conjunction of `args`.
    ///
    /// # Panics
    /// If `args` is empty.
    pub fn mk_pl_and(&mut self, args: impl IntoIterator<Item = PlId>) -> PlId {
        self.pl_junction(args, false)
    }

    /// The disjunction of `args`.
    ///
    /// # Panics
    /// If `args` is empty.
    pub fn mk_pl_or(&mut self, args: impl IntoIterator<Item = PlId>) -> PlId {
        self.pl_junction(args, true)
    }

    /// The negation of `arg`.
    pub fn mk_pl_not(&mut self, arg: PlId) -> PlId {
        match self.pl_db.get(arg) {
            Pl::True => self.pl_false(),
            Pl::False => self.pl_true(),
            Pl::Not(inner) => *inner,
            _ => self.pl_db.intern(Pl::Not(arg)),
        }
    }

    fn pl_junction(&mut self, args: impl IntoIterator<Item = PlId>, disjunction: bool) -> PlId {
        let args = args.into_iter().collect::<Vec<_>>();
        assert!(!args.is_empty());

        let identity = if disjunction { self.pl_false() } else { self.pl_true() };
        let annihilator = if disjunction { self.pl_true() } else { self.pl_false() };

        let mut operands: BTreeSet<PlId> = BTreeSet::default();
        for arg in args {
            if arg == identity {
                continue;
            }
            if arg == annihilator {
                return annihilator;
            }
            match self.pl_db.get(arg) {
                Pl::And(inner) if !disjunction => operands.extend(inner.iter().copied()),
                Pl::Or(inner) if disjunction => operands.extend(inner.iter().copied()),
                _ => {
                    operands.insert(arg);
                }
            }
        }

        match operands.len() {
            0 => identity,
            1 => *operands.first().unwrap(),
            _ => match disjunction {
                true => self.pl_db.intern(Pl::Or(operands)),
                false => self.pl_db.intern(Pl::And(operands)),
            },
        }
    }
}
