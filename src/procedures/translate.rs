/*!
Translation: the public entry points from formula to automaton.

`formula → normal form → (if LTLf) reduction to LDLf → exploration → minimization → bit encoding`.

The text entry points own their context for the duration of the translation; programmatic builders construct formulas on a context of their own and call [to_dfa](crate::context::GenericContext::to_dfa) (or [to_dfa_with](crate::context::GenericContext::to_dfa_with) to pick a strategy).

# Example

```rust
use marten_dfa::config::Config;
use marten_dfa::procedures::translate::translate_ldlf;

let dfa = translate_ldlf("<a>tt", &Config::default()).unwrap();

let a = dfa.letter(&["a"]);
let blank = dfa.letter(&[]);

assert!(dfa.accepts(&[a.clone()]));
assert!(dfa.accepts(&[a, blank.clone()]));
assert!(!dfa.accepts(&[]));
assert!(!dfa.accepts(&[blank]));
```
*/

use crate::config::Config;
use crate::context::{Context, GenericContext};
use crate::dfa::SymbolicDfa;
use crate::procedures::explore::{BddStrategy, Strategy, Translator};
use crate::structures::ldlf::LdlfId;
use crate::types::err::{ErrorKind, UnsupportedError};

/// The minimal symbolic automaton of an LDLf formula, from source text.
pub fn translate_ldlf(source: &str, config: &Config) -> Result<SymbolicDfa, ErrorKind> {
    let mut ctx = Context::from_config(config.clone());
    let formula = ctx.parse_ldlf(source)?;
    ctx.to_dfa(formula)
}

/// The minimal symbolic automaton of an LTLf formula, from source text.
pub fn translate_ltlf(source: &str, config: &Config) -> Result<SymbolicDfa, ErrorKind> {
    let mut ctx = Context::from_config(config.clone());
    let formula = ctx.parse_ltlf(source)?;
    let reduced = ctx.ltlf_to_ldlf(formula);
    ctx.to_dfa(reduced)
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// The minimal symbolic automaton of `formula`, under the symbolic strategy.
    pub fn to_dfa(&mut self, formula: LdlfId) -> Result<SymbolicDfa, ErrorKind> {
        self.to_dfa_with(formula, BddStrategy::default())
    }

    /// The minimal symbolic automaton of `formula`, under the given strategy.
    pub fn to_dfa_with<S: Strategy>(
        &mut self,
        formula: LdlfId,
        strategy: S,
    ) -> Result<SymbolicDfa, ErrorKind> {
        if !self.ldlf_guards_plain(formula) {
            return Err(UnsupportedError::QuotedAtomInGuard.into());
        }
        Translator::new(strategy).to_dfa(self, formula)
    }
}
