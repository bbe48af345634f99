/*!
Building formulas from source text.

Parsing happens in two stages, in the manner of most combinator front-ends: a [nom]-based parser produces a borrowed parse tree, and the tree is lowered into [context](crate::context)-owned nodes through the factories.
The split keeps the grammar free of the context --- parsers are plain functions over `&str` --- and gives the factories one place to canonicalise whatever the surface syntax produced.

Lowering is also where sugar disappears: `->` and `<->` are rewritten to negation and the lattice connectives, and `end` and `last` become their LDLf definitions (`[true]ff`, `⟨true⟩end`).

# Example

```rust
use marten_dfa::config::Config;
use marten_dfa::context::Context;

let mut the_context = Context::from_config(Config::default());

let parsed = the_context.parse_ldlf("<a ; b*> (tt & !end)").unwrap();
let roundabout = the_context.parse_ldlf("<(a) ; (b)*> (!end & tt)").unwrap();
assert_eq!(parsed, roundabout);

assert!(the_context.parse_ldlf("<a tt").is_err());
```
*/

mod ldlf;
mod ltlf;
mod prop;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, multispace0},
    combinator::recognize,
    multi::many0_count,
    sequence::{delimited, pair},
    IResult,
};

use crate::context::GenericContext;
use crate::misc::log::targets;
use crate::structures::ldlf::{LdlfId, RegexId};
use crate::structures::ltlf::LtlfId;
use crate::structures::pl::PlId;
use crate::types::err::{ErrorKind, ParseError};

use ldlf::{LdlfTree, RegexTree};
use ltlf::LtlfTree;
use prop::PropTree;

/// A name: a letter or underscore, then letters, digits, and underscores.
pub(crate) fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))(input)
}

/// `inner`, allowing surrounding whitespace.
pub(crate) fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// The LDLf formula written in `source`.
    pub fn parse_ldlf(&mut self, source: &str) -> Result<LdlfId, ErrorKind> {
        match ldlf::parse(source) {
            Ok(tree) => Ok(self.lower_ldlf(&tree)),
            Err(detail) => {
                log::info!(target: targets::BUILDER, "rejected LDLf input: {detail}");
                Err(ParseError::Formula(detail).into())
            }
        }
    }

    /// The LTLf formula written in `source`.
    pub fn parse_ltlf(&mut self, source: &str) -> Result<LtlfId, ErrorKind> {
        match ltlf::parse(source) {
            Ok(tree) => Ok(self.lower_ltlf(&tree)),
            Err(detail) => {
                log::info!(target: targets::BUILDER, "rejected LTLf input: {detail}");
                Err(ParseError::Formula(detail).into())
            }
        }
    }

    fn lower_ldlf(&mut self, tree: &LdlfTree) -> LdlfId {
        match tree {
            LdlfTree::True => self.ldlf_true(),
            LdlfTree::False => self.ldlf_false(),
            LdlfTree::End => self.mk_ldlf_end(),
            LdlfTree::Last => self.mk_ldlf_last(),
            LdlfTree::Not(inner) => {
                let inner = self.lower_ldlf(inner);
                self.mk_ldlf_not(inner)
            }
            LdlfTree::And(lhs, rhs) => {
                let lhs = self.lower_ldlf(lhs);
                let rhs = self.lower_ldlf(rhs);
                self.mk_ldlf_and([lhs, rhs])
            }
            LdlfTree::Or(lhs, rhs) => {
                let lhs = self.lower_ldlf(lhs);
                let rhs = self.lower_ldlf(rhs);
                self.mk_ldlf_or([lhs, rhs])
            }
            LdlfTree::Imp(lhs, rhs) => {
                let lhs = self.lower_ldlf(lhs);
                let rhs = self.lower_ldlf(rhs);
                let negated = self.mk_ldlf_not(lhs);
                self.mk_ldlf_or([negated, rhs])
            }
            LdlfTree::Iff(lhs, rhs) => {
                let lhs = self.lower_ldlf(lhs);
                let rhs = self.lower_ldlf(rhs);
                let not_lhs = self.mk_ldlf_not(lhs);
                let not_rhs = self.mk_ldlf_not(rhs);
                let forwards = self.mk_ldlf_or([not_lhs, rhs]);
                let backwards = self.mk_ldlf_or([not_rhs, lhs]);
                self.mk_ldlf_and([forwards, backwards])
            }
            LdlfTree::Diamond(expression, body) => {
                let expression = self.lower_regex(expression);
                let body = self.lower_ldlf(body);
                self.mk_ldlf_diamond(expression, body)
            }
            LdlfTree::BoxModality(expression, body) => {
                let expression = self.lower_regex(expression);
                let body = self.lower_ldlf(body);
                self.mk_ldlf_box(expression, body)
            }
        }
    }

    fn lower_regex(&mut self, tree: &RegexTree) -> RegexId {
        match tree {
            RegexTree::Prop(guard) => {
                let guard = self.lower_prop(guard);
                self.mk_regex_prop(guard)
            }
            RegexTree::Test(formula) => {
                let formula = self.lower_ldlf(formula);
                self.mk_regex_test(formula)
            }
            RegexTree::Union(lhs, rhs) => {
                let lhs = self.lower_regex(lhs);
                let rhs = self.lower_regex(rhs);
                self.mk_regex_union([lhs, rhs])
            }
            RegexTree::Seq(lhs, rhs) => {
                let lhs = self.lower_regex(lhs);
                let rhs = self.lower_regex(rhs);
                self.mk_regex_seq([lhs, rhs])
            }
            RegexTree::Star(inner) => {
                let inner = self.lower_regex(inner);
                self.mk_regex_star(inner)
            }
        }
    }

    fn lower_prop(&mut self, tree: &PropTree) -> PlId {
        match tree {
            PropTree::True => self.pl_true(),
            PropTree::False => self.pl_false(),
            PropTree::Atom(name) => self.mk_pl_atom(name),
            PropTree::Not(inner) => {
                let inner = self.lower_prop(inner);
                self.mk_pl_not(inner)
            }
            PropTree::And(lhs, rhs) => {
                let lhs = self.lower_prop(lhs);
                let rhs = self.lower_prop(rhs);
                self.mk_pl_and([lhs, rhs])
            }
            PropTree::Or(lhs, rhs) => {
                let lhs = self.lower_prop(lhs);
                let rhs = self.lower_prop(rhs);
                self.mk_pl_or([lhs, rhs])
            }
            PropTree::Imp(lhs, rhs) => {
                let lhs = self.lower_prop(lhs);
                let rhs = self.lower_prop(rhs);
                let negated = self.mk_pl_not(lhs);
                self.mk_pl_or([negated, rhs])
            }
            PropTree::Iff(lhs, rhs) => {
                let lhs = self.lower_prop(lhs);
                let rhs = self.lower_prop(rhs);
                let not_lhs = self.mk_pl_not(lhs);
                let not_rhs = self.mk_pl_not(rhs);
                let forwards = self.mk_pl_or([not_lhs, rhs]);
                let backwards = self.mk_pl_or([not_rhs, lhs]);
                self.mk_pl_and([forwards, backwards])
            }
        }
    }

    fn lower_ltlf(&mut self, tree: &LtlfTree) -> LtlfId {
        match tree {
            LtlfTree::True => self.ltlf_true(),
            LtlfTree::False => self.ltlf_false(),
            LtlfTree::Atom(name) => self.mk_ltlf_atom(name),
            LtlfTree::Not(inner) => {
                let inner = self.lower_ltlf(inner);
                self.mk_ltlf_not(inner)
            }
            LtlfTree::And(lhs, rhs) => {
                let lhs = self.lower_ltlf(lhs);
                let rhs = self.lower_ltlf(rhs);
                self.mk_ltlf_and([lhs, rhs])
            }
            LtlfTree::Or(lhs, rhs) => {
                let lhs = self.lower_ltlf(lhs);
                let rhs = self.lower_ltlf(rhs);
                self.mk_ltlf_or([lhs, rhs])
            }
            LtlfTree::Imp(lhs, rhs) => {
                let lhs = self.lower_ltlf(lhs);
                let rhs = self.lower_ltlf(rhs);
                let negated = self.mk_ltlf_not(lhs);
                self.mk_ltlf_or([negated, rhs])
            }
            LtlfTree::Iff(lhs, rhs) => {
                let lhs = self.lower_ltlf(lhs);
                let rhs = self.lower_ltlf(rhs);
                let not_lhs = self.mk_ltlf_not(lhs);
                let not_rhs = self.mk_ltlf_not(rhs);
                let forwards = self.mk_ltlf_or([not_lhs, rhs]);
                let backwards = self.mk_ltlf_or([not_rhs, lhs]);
                self.mk_ltlf_and([forwards, backwards])
            }
            LtlfTree::Next(inner) => {
                let inner = self.lower_ltlf(inner);
                self.mk_ltlf_next(inner)
            }
            LtlfTree::WeakNext(inner) => {
                let inner = self.lower_ltlf(inner);
                self.mk_ltlf_weak_next(inner)
            }
            LtlfTree::Until(lhs, rhs) => {
                let lhs = self.lower_ltlf(lhs);
                let rhs = self.lower_ltlf(rhs);
                self.mk_ltlf_until(lhs, rhs)
            }
            LtlfTree::Release(lhs, rhs) => {
                let lhs = self.lower_ltlf(lhs);
                let rhs = self.lower_ltlf(rhs);
                self.mk_ltlf_release(lhs, rhs)
            }
            LtlfTree::Eventually(inner) => {
                let inner = self.lower_ltlf(inner);
                self.mk_ltlf_eventually(inner)
            }
            LtlfTree::Always(inner) => {
                let inner = self.lower_ltlf(inner);
                self.mk_ltlf_always(inner)
            }
        }
    }
}

#[cfg(test)]
mod builder_tests {
    use crate::config::Config;
    use crate::context::Context;

    #[test]
    fn ldlf_keywords() {
        let mut the_context = Context::from_config(Config::default());
        assert!(the_context.parse_ldlf("tt").is_ok());
        assert!(the_context.parse_ldlf("ff").is_ok());
        assert!(the_context.parse_ldlf("end").is_ok());
        assert!(the_context.parse_ldlf("last").is_ok());
        assert!(the_context.parse_ldlf("tt extra").is_err());
        assert!(the_context.parse_ldlf("a").is_err());
    }

    #[test]
    fn ldlf_sugar() {
        let mut the_context = Context::from_config(Config::default());
        let sugared = the_context.parse_ldlf("<a>tt -> <b>tt").unwrap();
        let plain = the_context.parse_ldlf("!<a>tt | <b>tt").unwrap();
        assert_eq!(sugared, plain);
    }

    #[test]
    fn ldlf_regex_shapes() {
        let mut the_context = Context::from_config(Config::default());
        assert!(the_context.parse_ldlf("<(a + b) ; c*> tt").is_ok());
        assert!(the_context.parse_ldlf("[(tt? ; true)*] ff").is_ok());
        assert!(the_context.parse_ldlf("<true*>(<a>tt)").is_ok());
    }

    #[test]
    fn ltlf_operators() {
        let mut the_context = Context::from_config(Config::default());
        assert!(the_context.parse_ltlf("G (request -> F grant)").is_ok());
        assert!(the_context.parse_ltlf("a U b").is_ok());
        assert!(the_context.parse_ltlf("WX (a R b)").is_ok());
        assert!(the_context.parse_ltlf("X").is_err());
    }

    #[test]
    fn ltlf_until_is_right_associative() {
        let mut the_context = Context::from_config(Config::default());
        let implicit = the_context.parse_ltlf("a U b U c").unwrap();
        let explicit = the_context.parse_ltlf("a U (b U c)").unwrap();
        assert_eq!(implicit, explicit);
    }
}
