/*!
Databases, and things related to databases.

Formulas are stored in node databases --- one per logic --- and are accessed through [keys](NodeKey).
A node database is a hash-cons table: interning a node either returns the key of a structurally equal node interned earlier, or stores the node under a fresh key.
As every node reaches a database through the [context factories](crate::context), and the factories intern whatever they build, key equality coincides with structural equality, and a key may stand in for its formula wherever comparison or hashing is needed.

Names are stored in a [symbol database](SymbolDB) under the same discipline.

The internal structure of a database is private; a key is valid only for the database which issued it, and for the lifetime of that database.
*/

mod node;
pub use node::{NodeDB, NodeKey};

mod symbol;
pub use symbol::{SymbolDB, SymbolId};
