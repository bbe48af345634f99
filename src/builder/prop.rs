//! The propositional layer of the surface syntax.
//!
//! Guards inside regular expressions are full propositional formulas: `true`, `false`, names, `!`, `&`, `|`, `->`, `<->`, parentheses.
//! Precedence, loosest first: `<->`, `->`, `|`, `&`, `!`.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::opt,
    multi::many0,
    sequence::{delimited, preceded},
    IResult,
};

use crate::builder::{identifier, ws};

/// A parsed propositional formula, still borrowing the input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum PropTree<'a> {
    True,
    False,
    Atom(&'a str),
    Not(Box<PropTree<'a>>),
    And(Box<PropTree<'a>>, Box<PropTree<'a>>),
    Or(Box<PropTree<'a>>, Box<PropTree<'a>>),
    Imp(Box<PropTree<'a>>, Box<PropTree<'a>>),
    Iff(Box<PropTree<'a>>, Box<PropTree<'a>>),
}

pub(crate) fn prop_formula(input: &str) -> IResult<&str, PropTree> {
    prop_iff(input)
}

fn prop_iff(input: &str) -> IResult<&str, PropTree> {
    let (input, first) = prop_imp(input)?;
    let (input, rest) = many0(preceded(ws(tag("<->")), prop_imp))(input)?;
    let tree = rest
        .into_iter()
        .fold(first, |lhs, rhs| PropTree::Iff(Box::new(lhs), Box::new(rhs)));
    Ok((input, tree))
}

fn prop_imp(input: &str) -> IResult<&str, PropTree> {
    let (input, lhs) = prop_or(input)?;
    let (input, rhs) = opt(preceded(ws(tag("->")), prop_imp))(input)?;
    let tree = match rhs {
        Some(rhs) => PropTree::Imp(Box::new(lhs), Box::new(rhs)),
        None => lhs,
    };
    Ok((input, tree))
}

fn prop_or(input: &str) -> IResult<&str, PropTree> {
    let (input, first) = prop_and(input)?;
    let (input, rest) = many0(preceded(ws(char('|')), prop_and))(input)?;
    let tree = rest
        .into_iter()
        .fold(first, |lhs, rhs| PropTree::Or(Box::new(lhs), Box::new(rhs)));
    Ok((input, tree))
}

fn prop_and(input: &str) -> IResult<&str, PropTree> {
    let (input, first) = prop_unary(input)?;
    let (input, rest) = many0(preceded(ws(char('&')), prop_unary))(input)?;
    let tree = rest
        .into_iter()
        .fold(first, |lhs, rhs| PropTree::And(Box::new(lhs), Box::new(rhs)));
    Ok((input, tree))
}

fn prop_unary(input: &str) -> IResult<&str, PropTree> {
    alt((prop_not, prop_primary))(input)
}

fn prop_not(input: &str) -> IResult<&str, PropTree> {
    let (input, inner) = preceded(ws(char('!')), prop_unary)(input)?;
    Ok((input, PropTree::Not(Box::new(inner))))
}

fn prop_primary(input: &str) -> IResult<&str, PropTree> {
    alt((prop_parens, prop_leaf))(input)
}

fn prop_parens(input: &str) -> IResult<&str, PropTree> {
    delimited(ws(char('(')), prop_formula, ws(char(')')))(input)
}

fn prop_leaf(input: &str) -> IResult<&str, PropTree> {
    let (rest, name) = ws(identifier)(input)?;
    let tree = match name {
        "true" => PropTree::True,
        "false" => PropTree::False,
        _ => PropTree::Atom(name),
    };
    Ok((rest, tree))
}
