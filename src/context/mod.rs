/*!
The context --- within which formulas are built and translations take place.

Strictly, a [GenericContext] and a [Context].

The generic context is parameterised to a source of randomness, used for decision polarity during SAT-based model enumeration.
[from_config](Context::from_config) is implemented for a context rather than a generic context to avoid requiring a source of randomness to be supplied alongside a config.

A context owns the [node databases](crate::db) for every logic, the symbol interner, the configuration, and counters.
Every formula is built through the `mk_` factory methods, which canonicalise while constructing:

- Associative-commutative flattening of `And`/`Or` (and of `Union`/`Seq` for expressions).
- Absorption (`x ∧ ⊤ = x`, `x ∨ ⊥ = x`) and annihilation (`x ∧ ⊥ = ⊥`, `x ∨ ⊤ = ⊤`).
- Double-negation elimination, and negation of constants.
- Preallocated `⊤`/`⊥` singletons for each logic.

So, two structurally equal formulas always share a key, whichever route built them, and key equality may stand in for structural equality everywhere downstream.

# Example

```rust
use marten_dfa::config::Config;
use marten_dfa::context::Context;

let mut the_context = Context::from_config(Config::default());

let a = the_context.mk_pl_atom("a");
let b = the_context.mk_pl_atom("b");

let a_and_b = the_context.mk_pl_and([a, b]);
let b_and_a = the_context.mk_pl_and([b, a]);
assert_eq!(a_and_b, b_and_a);

let not_not_a = {
    let not_a = the_context.mk_pl_not(a);
    the_context.mk_pl_not(not_a)
};
assert_eq!(a, not_not_a);
```
*/

mod counters;
pub use counters::Counters;

mod ldlf;
mod ltlf;
mod pl;

use std::collections::HashMap;

use rand::SeedableRng;

use crate::config::Config;
use crate::db::{NodeDB, SymbolDB, SymbolId};
use crate::generic::minimal_pcg::MinimalPCG32;
use crate::structures::ldlf::{Ldlf, LdlfId, Regex, RegexId};
use crate::structures::ltlf::{Ltlf, LtlfId};
use crate::structures::pl::{Pl, PlId};

/// A generic context, parameterised to a source of randomness.
pub struct GenericContext<R: rand::Rng + std::default::Default> {
    /// The configuration of the context.
    pub config: Config,

    /// Counters related to the context.
    pub counters: Counters,

    /// The name database.
    pub symbol_db: SymbolDB,

    /// The propositional node database.
    pub pl_db: NodeDB<PlId, Pl>,

    /// The LDLf node database.
    pub ldlf_db: NodeDB<LdlfId, Ldlf>,

    /// The regular expression node database.
    pub regex_db: NodeDB<RegexId, Regex>,

    /// The LTLf node database.
    pub ltlf_db: NodeDB<LtlfId, Ltlf>,

    /// The source of rng.
    pub rng: R,

    /// Memoized δ-expansions, keyed by formula and an ε flag.
    pub(crate) delta_cache: HashMap<(LdlfId, bool), PlId>,
}

/// A context which uses [MinimalPCG32] as a source of randomness.
pub type Context = GenericContext<MinimalPCG32>;

impl Context {
    /// Creates a context from some given configuration.
    pub fn from_config(config: Config) -> Self {
        Self::with_rng(config, MinimalPCG32::from_seed(0_u64.to_le_bytes()))
    }
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Creates a context from a configuration and a source of randomness.
    pub fn with_rng(config: Config, rng: R) -> Self {
        let mut ctx = GenericContext {
            config,
            counters: Counters::default(),
            symbol_db: SymbolDB::default(),
            pl_db: NodeDB::default(),
            ldlf_db: NodeDB::default(),
            regex_db: NodeDB::default(),
            ltlf_db: NodeDB::default(),
            rng,
            delta_cache: HashMap::default(),
        };

        // Singletons, interned first so their keys are fixed for the lifetime of the context.
        ctx.pl_db.intern(Pl::True);
        ctx.pl_db.intern(Pl::False);
        ctx.ldlf_db.intern(Ldlf::True);
        ctx.ldlf_db.intern(Ldlf::False);
        ctx.ltlf_db.intern(Ltlf::True);
        ctx.ltlf_db.intern(Ltlf::False);

        ctx
    }

    /// The canonical id of `name`.
    pub fn symbol(&mut self, name: &str) -> SymbolId {
        self.symbol_db.intern(name)
    }
}
