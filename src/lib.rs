/*!
A library for compiling linear temporal and dynamic logic on finite traces into minimal symbolic deterministic finite automata.

marten_dfa translates LDLf and LTLf formulas --- linear dynamic, resp. temporal, logic over finite traces --- into deterministic finite automata which accept exactly the traces satisfying the formula.
The automata are *symbolic*: states are encoded in boolean state bits and the transition function is a family of binary decision diagrams, one per bit, so the result is compact over large propositional alphabets and ready for downstream use in model checking, synthesis, or reward shaping.

# Orientation

The library is designed around the core structure of a [context].

Formulas may be added through [source text](crate::builder) or [programmatically](crate::context) through factory methods, and every formula lives in a hash-consed node database owned by the context, so structurally equal formulas are the same formula.

Internally, and at a high level, a translation is a pipeline of [procedures] over the context:
- The formula is [normalized](crate::procedures::nnf), and an LTLf formula is [reduced to LDLf](crate::procedures::to_ldlf).
- [δ-expansion](crate::procedures::delta) rewrites one formula and one letter into the propositional description of the successor states, quoting subformulas as propositional variables.
- [Exploration](crate::procedures::explore) runs the breadth-first subset construction under a strategy --- letter enumeration, or decision-diagram cubes --- and records an explicit transition table.
- The table is [minimized and bit-encoded](crate::dfa::assemble) into the final [symbolic automaton](crate::dfa::SymbolicDfa).

Useful starting points, then, may be:
- The top-level [translation entry points](crate::procedures::translate) to run the whole pipeline.
- The [δ-expansion rules](crate::procedures::delta) to inspect the heart of the construction.
- The [structures] to familiarise yourself with the formulas and states involved.
- The [configuration](crate::config) to see what can be adjusted.

# Examples

+ Translate an LDLf formula and walk some traces.

```rust
use marten_dfa::config::Config;
use marten_dfa::procedures::translate::translate_ldlf;

let dfa = translate_ldlf("<true*><a>tt", &Config::default()).unwrap();

let a = dfa.letter(&["a"]);
let blank = dfa.letter(&[]);

assert!(dfa.accepts(&[a.clone()]));
assert!(dfa.accepts(&[blank.clone(), a]));
assert!(!dfa.accepts(&[]));
assert!(!dfa.accepts(&[blank]));
```

+ Translate an LTLf formula, choosing a strategy.

```rust
use marten_dfa::config::Config;
use marten_dfa::context::Context;
use marten_dfa::procedures::explore::NaiveStrategy;

let mut ctx = Context::from_config(Config::default());

let formula = ctx.parse_ltlf("G a").unwrap();
let reduced = ctx.ltlf_to_ldlf(formula);
let dfa = ctx.to_dfa_with(reduced, NaiveStrategy).unwrap();

let a = dfa.letter(&["a"]);
assert!(dfa.accepts(&[a.clone(), a]));
assert!(!dfa.accepts(&[]));
```

# Guiding principles

## Canonical structure

+ Every formula is built through context factories which flatten, absorb, and simplify while constructing, and every node is interned once.
  Handle equality is structural equality, which is what makes state identity --- and so termination of the subset construction --- cheap.
+ The automaton handed back is minimal: behaviorally equal states are merged by partition refinement before the bit encoding is fixed.

## Modularity

+ The subset construction is factored from the successor computation: strategies answer "what follows this state", exploration owns the queue, registry, and budget.
+ Use of external crates is limited to crates which carry a well-bounded concern: [log](https://docs.rs/log/latest/log/) for diagnostics, [rand](https://docs.rs/rand/latest/rand/) for decision polarity, [nom](https://docs.rs/nom/latest/nom/) for the surface syntax, and [biodivine-lib-bdd](https://docs.rs/biodivine-lib-bdd/latest/biodivine_lib_bdd/) as the decision diagram package.

# Logs

To help diagnose issues calls to [log!](log) are made throughout the library, and a variety of targets are defined in order to help narrow output to relevant parts.
The targets are listed in [misc::log].

For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/), logs related to exploration can be filtered with `RUST_LOG=explore …`, and δ-expansions with `RUST_LOG=delta …`.
*/

#![allow(clippy::match_bool)]

pub mod builder;
pub mod procedures;

pub mod config;
pub mod context;
pub mod structures;
pub mod types;

pub mod generic;

pub mod db;
pub mod dfa;

pub mod misc;
