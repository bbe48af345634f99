//! Factories for LTLf formulas.

use std::collections::BTreeSet;

use crate::context::GenericContext;
use crate::db::{NodeKey, SymbolId};
use crate::structures::ltlf::{Ltlf, LtlfId};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// The `True` singleton.
    pub fn ltlf_true(&self) -> LtlfId {
        LtlfId::from_index(0)
    }

    /// The `False` singleton.
    pub fn ltlf_false(&self) -> LtlfId {
        LtlfId::from_index(1)
    }

    /// The atom named `name`.
    pub fn mk_ltlf_atom(&mut self, name: &str) -> LtlfId {
        let symbol = self.symbol_db.intern(name);
        self.mk_ltlf_atom_symbol(symbol)
    }

    /// The atom of an interned name.
    pub fn mk_ltlf_atom_symbol(&mut self, symbol: SymbolId) -> LtlfId {
        self.ltlf_db.intern(Ltlf::Atom(symbol))
    }

    /// The conjunction of `args`.
    ///
    /// # Panics
    /// If `args` is empty.
    pub fn mk_ltlf_and(&mut self, args: impl IntoIterator<Item = LtlfId>) -> LtlfId {
        self.ltlf_junction(args, false)
    }

    /// The disjunction of `args`.
    ///
    /// # Panics
    /// If `args` is empty.
    pub fn mk_ltlf_or(&mut self, args: impl IntoIterator<Item = LtlfId>) -> LtlfId {
        self.ltlf_junction(args, true)
    }

    /// The negation of `arg`.
    pub fn mk_ltlf_not(&mut self, arg: LtlfId) -> LtlfId {
        match self.ltlf_db.get(arg) {
            Ltlf::True => self.ltlf_false(),
            Ltlf::False => self.ltlf_true(),
            Ltlf::Not(inner) => *inner,
            _ => self.ltlf_db.intern(Ltlf::Not(arg)),
        }
    }

    /// `X arg`.
    pub fn mk_ltlf_next(&mut self, arg: LtlfId) -> LtlfId {
        self.ltlf_db.intern(Ltlf::Next(arg))
    }

    /// `WX arg`.
    pub fn mk_ltlf_weak_next(&mut self, arg: LtlfId) -> LtlfId {
        self.ltlf_db.intern(Ltlf::WeakNext(arg))
    }

    /// `lhs U rhs`.
    pub fn mk_ltlf_until(&mut self, lhs: LtlfId, rhs: LtlfId) -> LtlfId {
        self.ltlf_db.intern(Ltlf::Until(lhs, rhs))
    }

    /// `lhs R rhs`.
    pub fn mk_ltlf_release(&mut self, lhs: LtlfId, rhs: LtlfId) -> LtlfId {
        self.ltlf_db.intern(Ltlf::Release(lhs, rhs))
    }

    /// `F arg`.
    pub fn mk_ltlf_eventually(&mut self, arg: LtlfId) -> LtlfId {
        self.ltlf_db.intern(Ltlf::Eventually(arg))
    }

    /// `G arg`.
    pub fn mk_ltlf_always(&mut self, arg: LtlfId) -> LtlfId {
        self.ltlf_db.intern(Ltlf::Always(arg))
    }

    fn ltlf_junction(&mut self, args: impl IntoIterator<Item = LtlfId>, disjunction: bool) -> LtlfId {
        let args = args.into_iter().collect::<Vec<_>>();
        assert!(!args.is_empty());

        let identity = if disjunction { self.ltlf_false() } else { self.ltlf_true() };
        let annihilator = if disjunction { self.ltlf_true() } else { self.ltlf_false() };

        let mut operands: BTreeSet<LtlfId> = BTreeSet::default();
        for arg in args {
            if arg == identity {
                continue;
            }
            if arg == annihilator {
                return annihilator;
            }
            match self.ltlf_db.get(arg) {
                Ltlf::And(inner) if !disjunction => operands.extend(inner.iter().copied()),
                Ltlf::Or(inner) if disjunction => operands.extend(inner.iter().copied()),
                _ => {
                    operands.insert(arg);
                }
            }
        }

        match operands.len() {
            0 => identity,
            1 => *operands.first().unwrap(),
            _ => match disjunction {
                true => self.ltlf_db.intern(Ltlf::Or(operands)),
                false => self.ltlf_db.intern(Ltlf::And(operands)),
            },
        }
    }
}
