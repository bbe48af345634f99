/*!
Reduction of LTLf to LDLf.

The embedding is the standard one, with atoms read as `⟨a⟩tt`:

- `X φ ⇒ ⟨true⟩(φ ∧ ¬end)` and `WX φ ⇒ [true](φ ∨ end)`.
- `φ U ψ ⇒ ⟨(φ? ; true)*⟩(ψ ∧ ¬end)` and `φ R ψ ⇒ [((¬φ)? ; true)*](ψ ∨ end)`.
- `F φ ⇒ ⟨true*⟩(φ ∧ ¬end)` and `G φ ⇒ [true*](φ ∨ end)`.

Here `end` is `[true]ff` and `¬end` is `⟨true⟩tt`.
The strong operators guard their continuation with `¬end` so the end position cannot stand in for a witness, and the weak operators carry the dual `∨ end` so the end position is vacuous; each weak rule is exactly the negation of its strong partner.

One convention to note: LTLf formulas are read over *non-empty* traces, so the reduction of a whole formula conjoins `¬end` at the top level.
With that conjunct, `G a` rejects the empty trace while still accepting every trace in which `a` holds throughout --- and the reduction agrees with the [reference evaluator](crate::procedures::eval) on every trace.
*/

use crate::context::GenericContext;
use crate::structures::ldlf::LdlfId;
use crate::structures::ltlf::{Ltlf, LtlfId};

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// The LDLf reduction of an LTLf formula, over non-empty traces.
    pub fn ltlf_to_ldlf(&mut self, formula: LtlfId) -> LdlfId {
        let reduced = self.to_ldlf_core(formula);
        let nonempty = self.ldlf_not_end();
        self.mk_ldlf_and([reduced, nonempty])
    }

    /// `¬end`, i.e. `⟨true⟩tt`: some letter remains.
    fn ldlf_not_end(&mut self) -> LdlfId {
        let top = self.pl_true();
        let step = self.mk_regex_prop(top);
        let tt = self.ldlf_true();
        self.mk_ldlf_diamond(step, tt)
    }

    /// A `true*` expression.
    fn regex_any(&mut self) -> crate::structures::ldlf::RegexId {
        let top = self.pl_true();
        let step = self.mk_regex_prop(top);
        self.mk_regex_star(step)
    }

    fn to_ldlf_core(&mut self, formula: LtlfId) -> LdlfId {
        match self.ltlf_db.get(formula).clone() {
            Ltlf::True => self.ldlf_true(),
            Ltlf::False => self.ldlf_false(),

            Ltlf::Atom(symbol) => {
                let guard = self.mk_pl_atom_symbol(symbol);
                let step = self.mk_regex_prop(guard);
                let tt = self.ldlf_true();
                self.mk_ldlf_diamond(step, tt)
            }

            Ltlf::And(operands) => {
                let operands = operands.into_iter().map(|operand| self.to_ldlf_core(operand)).collect::<Vec<_>>();
                self.mk_ldlf_and(operands)
            }

            Ltlf::Or(operands) => {
                let operands = operands.into_iter().map(|operand| self.to_ldlf_core(operand)).collect::<Vec<_>>();
                self.mk_ldlf_or(operands)
            }

            Ltlf::Not(argument) => {
                let argument = self.to_ldlf_core(argument);
                self.mk_ldlf_not(argument)
            }

            Ltlf::Next(argument) => {
                let argument = self.to_ldlf_core(argument);
                let nonempty = self.ldlf_not_end();
                let body = self.mk_ldlf_and([argument, nonempty]);
                let top = self.pl_true();
                let step = self.mk_regex_prop(top);
                self.mk_ldlf_diamond(step, body)
            }

            Ltlf::WeakNext(argument) => {
                let argument = self.to_ldlf_core(argument);
                let end = self.mk_ldlf_end();
                let body = self.mk_ldlf_or([argument, end]);
                let top = self.pl_true();
                let step = self.mk_regex_prop(top);
                self.mk_ldlf_box(step, body)
            }

            Ltlf::Until(lhs, rhs) => {
                let lhs = self.to_ldlf_core(lhs);
                let rhs = self.to_ldlf_core(rhs);
                let nonempty = self.ldlf_not_end();
                let body = self.mk_ldlf_and([rhs, nonempty]);

                let test = self.mk_regex_test(lhs);
                let top = self.pl_true();
                let step = self.mk_regex_prop(top);
                let advance = self.mk_regex_seq([test, step]);
                let unfold = self.mk_regex_star(advance);
                self.mk_ldlf_diamond(unfold, body)
            }

            Ltlf::Release(lhs, rhs) => {
                let lhs = self.to_ldlf_core(lhs);
                let rhs = self.to_ldlf_core(rhs);
                let end = self.mk_ldlf_end();
                let body = self.mk_ldlf_or([rhs, end]);

                let released = self.mk_ldlf_not(lhs);
                let test = self.mk_regex_test(released);
                let top = self.pl_true();
                let step = self.mk_regex_prop(top);
                let advance = self.mk_regex_seq([test, step]);
                let unfold = self.mk_regex_star(advance);
                self.mk_ldlf_box(unfold, body)
            }

            Ltlf::Eventually(argument) => {
                let argument = self.to_ldlf_core(argument);
                let nonempty = self.ldlf_not_end();
                let body = self.mk_ldlf_and([argument, nonempty]);
                let unfold = self.regex_any();
                self.mk_ldlf_diamond(unfold, body)
            }

            Ltlf::Always(argument) => {
                let argument = self.to_ldlf_core(argument);
                let end = self.mk_ldlf_end();
                let body = self.mk_ldlf_or([argument, end]);
                let unfold = self.regex_any();
                self.mk_ldlf_box(unfold, body)
            }
        }
    }
}
