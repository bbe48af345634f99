/*!
Procedures, implemented on a [context](crate::context).

The translation of a formula to an automaton is factored into a collection of procedures:

- [Normalization](nnf) rewrites formulas to negation normal form, and [reduction](to_ldlf) embeds LTLf into LDLf.
- [Evaluation and atom extraction](eval) give the propositional groundwork, with [CNF conversion](cnf) and [model enumeration](models) on top.
- [δ-expansion](delta) turns a formula and a letter into the propositional description of its successor states.
- [Exploration](explore) drives the breadth-first subset construction under a chosen strategy.
- [Translation](translate) wires the above into the public entry points.

Each procedure is an `impl` block on the generic context, so a procedure may build formulas through the factories while it works.
*/

pub mod atoms;
pub mod cnf;
pub mod delta;
pub mod eval;
pub mod explore;
pub mod models;
pub mod nnf;
pub mod to_ldlf;
pub mod translate;
