/*!
Structures, to represent formulas, automaton states, and traces.

Each structure is an immutable description of an abstract object:

- [Propositional formulas](pl), over named atoms and quoted subformulas.
- [LDLf formulas and regular expressions](ldlf), the logic automata are built from.
- [LTLf formulas](ltlf), reduced to LDLf before translation.
- [NFA and DFA states](state), sets of formulas with conjunctive, resp. disjunctive, readings.
- [Letters and traces](trace), the words an automaton reads.

Formula nodes are plain enums and hold [keys](crate::db::NodeKey) rather than child nodes.
A node is only meaningful together with the [context](crate::context) whose databases issued its keys, and nodes are only created through the context factories, which canonicalise as they build.
*/

pub mod ldlf;
pub mod ltlf;
pub mod pl;
pub mod state;
pub mod trace;
