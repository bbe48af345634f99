//! The LDLf surface syntax.
//!
//! Formulas: `tt`, `ff`, `end`, `last`, `!`, `&`, `|`, `->`, `<->`, `<ρ>φ`, `[ρ]φ`, parentheses.
//! Expressions: propositional guards, tests `φ?`, sequence `;`, union `+`, star `*`, parentheses.
//! Precedence among expressions, loosest first: `+`, `;`, `*`.
//!
//! There are no bare atoms at the formula level, so a name is only meaningful inside a guard.

use nom::{
    branch::alt,
    character::complete::char,
    combinator::{all_consuming, opt},
    multi::{many0, many0_count},
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

use crate::builder::{identifier, ws};
use crate::builder::prop::{prop_formula, PropTree};

/// A parsed regular expression, still borrowing the input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum RegexTree<'a> {
    Prop(PropTree<'a>),
    Test(Box<LdlfTree<'a>>),
    Union(Box<RegexTree<'a>>, Box<RegexTree<'a>>),
    Seq(Box<RegexTree<'a>>, Box<RegexTree<'a>>),
    Star(Box<RegexTree<'a>>),
}

/// A parsed LDLf formula, still borrowing the input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum LdlfTree<'a> {
    True,
    False,
    End,
    Last,
    Not(Box<LdlfTree<'a>>),
    And(Box<LdlfTree<'a>>, Box<LdlfTree<'a>>),
    Or(Box<LdlfTree<'a>>, Box<LdlfTree<'a>>),
    Imp(Box<LdlfTree<'a>>, Box<LdlfTree<'a>>),
    Iff(Box<LdlfTree<'a>>, Box<LdlfTree<'a>>),
    Diamond(Box<RegexTree<'a>>, Box<LdlfTree<'a>>),
    BoxModality(Box<RegexTree<'a>>, Box<LdlfTree<'a>>),
}

/// The parse tree of `source`, which must be a single LDLf formula.
pub(crate) fn parse(source: &str) -> Result<LdlfTree, String> {
    match all_consuming(formula)(source) {
        Ok((_, tree)) => Ok(tree),
        Err(e) => Err(format!("{e:?}")),
    }
}

fn formula(input: &str) -> IResult<&str, LdlfTree> {
    iff(input)
}

fn iff(input: &str) -> IResult<&str, LdlfTree> {
    let (input, first) = imp(input)?;
    let (input, rest) = many0(preceded(ws(nom::bytes::complete::tag("<->")), imp))(input)?;
    let tree = rest
        .into_iter()
        .fold(first, |lhs, rhs| LdlfTree::Iff(Box::new(lhs), Box::new(rhs)));
    Ok((input, tree))
}

fn imp(input: &str) -> IResult<&str, LdlfTree> {
    let (input, lhs) = or(input)?;
    let (input, rhs) = opt(preceded(ws(nom::bytes::complete::tag("->")), imp))(input)?;
    let tree = match rhs {
        Some(rhs) => LdlfTree::Imp(Box::new(lhs), Box::new(rhs)),
        None => lhs,
    };
    Ok((input, tree))
}

fn or(input: &str) -> IResult<&str, LdlfTree> {
    let (input, first) = and(input)?;
    let (input, rest) = many0(preceded(ws(char('|')), and))(input)?;
    let tree = rest
        .into_iter()
        .fold(first, |lhs, rhs| LdlfTree::Or(Box::new(lhs), Box::new(rhs)));
    Ok((input, tree))
}

fn and(input: &str) -> IResult<&str, LdlfTree> {
    let (input, first) = unary(input)?;
    let (input, rest) = many0(preceded(ws(char('&')), unary))(input)?;
    let tree = rest
        .into_iter()
        .fold(first, |lhs, rhs| LdlfTree::And(Box::new(lhs), Box::new(rhs)));
    Ok((input, tree))
}

fn unary(input: &str) -> IResult<&str, LdlfTree> {
    alt((not, diamond, box_modality, primary))(input)
}

fn not(input: &str) -> IResult<&str, LdlfTree> {
    let (input, inner) = preceded(ws(char('!')), unary)(input)?;
    Ok((input, LdlfTree::Not(Box::new(inner))))
}

fn diamond(input: &str) -> IResult<&str, LdlfTree> {
    let (input, (_, expression, _, body)) =
        tuple((ws(char('<')), regex, ws(char('>')), unary))(input)?;
    Ok((input, LdlfTree::Diamond(Box::new(expression), Box::new(body))))
}

fn box_modality(input: &str) -> IResult<&str, LdlfTree> {
    let (input, (_, expression, _, body)) =
        tuple((ws(char('[')), regex, ws(char(']')), unary))(input)?;
    Ok((input, LdlfTree::BoxModality(Box::new(expression), Box::new(body))))
}

fn primary(input: &str) -> IResult<&str, LdlfTree> {
    alt((parens, leaf))(input)
}

fn parens(input: &str) -> IResult<&str, LdlfTree> {
    delimited(ws(char('(')), formula, ws(char(')')))(input)
}

fn leaf(input: &str) -> IResult<&str, LdlfTree> {
    let (rest, name) = ws(identifier)(input)?;
    let tree = match name {
        "tt" => LdlfTree::True,
        "ff" => LdlfTree::False,
        "end" => LdlfTree::End,
        "last" => LdlfTree::Last,
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Tag,
            )))
        }
    };
    Ok((rest, tree))
}

fn regex(input: &str) -> IResult<&str, RegexTree> {
    let (input, first) = seq(input)?;
    let (input, rest) = many0(preceded(ws(char('+')), seq))(input)?;
    let tree = rest
        .into_iter()
        .fold(first, |lhs, rhs| RegexTree::Union(Box::new(lhs), Box::new(rhs)));
    Ok((input, tree))
}

fn seq(input: &str) -> IResult<&str, RegexTree> {
    let (input, first) = starred(input)?;
    let (input, rest) = many0(preceded(ws(char(';')), starred))(input)?;
    let tree = rest
        .into_iter()
        .fold(first, |lhs, rhs| RegexTree::Seq(Box::new(lhs), Box::new(rhs)));
    Ok((input, tree))
}

fn starred(input: &str) -> IResult<&str, RegexTree> {
    let (input, base) = regex_base(input)?;
    let (input, stars) = many0_count(ws(char('*')))(input)?;
    let mut tree = base;
    for _ in 0..stars {
        tree = RegexTree::Star(Box::new(tree));
    }
    Ok((input, tree))
}

fn regex_base(input: &str) -> IResult<&str, RegexTree> {
    alt((test, guard, regex_parens))(input)
}

fn test(input: &str) -> IResult<&str, RegexTree> {
    let (input, inner) = terminated(formula, ws(char('?')))(input)?;
    Ok((input, RegexTree::Test(Box::new(inner))))
}

fn guard(input: &str) -> IResult<&str, RegexTree> {
    let (input, inner) = prop_formula(input)?;
    Ok((input, RegexTree::Prop(inner)))
}

fn regex_parens(input: &str) -> IResult<&str, RegexTree> {
    delimited(ws(char('(')), regex, ws(char(')')))(input)
}
