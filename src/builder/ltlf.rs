//! The LTLf surface syntax.
//!
//! `True`, `False`, names, `!`, `&`, `|`, `->`, `<->`, and the temporal operators `X`, `WX`, `U`, `R`, `F`, `G`.
//! Operator words are reserved: a name may not be `X`, `WX`, `U`, `R`, `F`, `G`, `True`, or `False`.
//! `U` and `R` associate to the right and bind looser than the unary operators, tighter than `&`.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{all_consuming, opt},
    multi::many0,
    sequence::{delimited, pair, preceded},
    IResult,
};

use crate::builder::{identifier, ws};

const RESERVED: [&str; 8] = ["X", "WX", "U", "R", "F", "G", "True", "False"];

/// A parsed LTLf formula, still borrowing the input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum LtlfTree<'a> {
    True,
    False,
    Atom(&'a str),
    Not(Box<LtlfTree<'a>>),
    And(Box<LtlfTree<'a>>, Box<LtlfTree<'a>>),
    Or(Box<LtlfTree<'a>>, Box<LtlfTree<'a>>),
    Imp(Box<LtlfTree<'a>>, Box<LtlfTree<'a>>),
    Iff(Box<LtlfTree<'a>>, Box<LtlfTree<'a>>),
    Next(Box<LtlfTree<'a>>),
    WeakNext(Box<LtlfTree<'a>>),
    Until(Box<LtlfTree<'a>>, Box<LtlfTree<'a>>),
    Release(Box<LtlfTree<'a>>, Box<LtlfTree<'a>>),
    Eventually(Box<LtlfTree<'a>>),
    Always(Box<LtlfTree<'a>>),
}

/// The parse tree of `source`, which must be a single LTLf formula.
pub(crate) fn parse(source: &str) -> Result<LtlfTree, String> {
    match all_consuming(formula)(source) {
        Ok((_, tree)) => Ok(tree),
        Err(e) => Err(format!("{e:?}")),
    }
}

/// A parser for the exact operator word `word`.
fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    move |input| {
        let (rest, name) = ws(identifier)(input)?;
        if name == word {
            Ok((rest, name))
        } else {
            Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Tag,
            )))
        }
    }
}

fn formula(input: &str) -> IResult<&str, LtlfTree> {
    iff(input)
}

fn iff(input: &str) -> IResult<&str, LtlfTree> {
    let (input, first) = imp(input)?;
    let (input, rest) = many0(preceded(ws(tag("<->")), imp))(input)?;
    let tree = rest
        .into_iter()
        .fold(first, |lhs, rhs| LtlfTree::Iff(Box::new(lhs), Box::new(rhs)));
    Ok((input, tree))
}

fn imp(input: &str) -> IResult<&str, LtlfTree> {
    let (input, lhs) = or(input)?;
    let (input, rhs) = opt(preceded(ws(tag("->")), imp))(input)?;
    let tree = match rhs {
        Some(rhs) => LtlfTree::Imp(Box::new(lhs), Box::new(rhs)),
        None => lhs,
    };
    Ok((input, tree))
}

fn or(input: &str) -> IResult<&str, LtlfTree> {
    let (input, first) = and(input)?;
    let (input, rest) = many0(preceded(ws(char('|')), and))(input)?;
    let tree = rest
        .into_iter()
        .fold(first, |lhs, rhs| LtlfTree::Or(Box::new(lhs), Box::new(rhs)));
    Ok((input, tree))
}

fn and(input: &str) -> IResult<&str, LtlfTree> {
    let (input, first) = until(input)?;
    let (input, rest) = many0(preceded(ws(char('&')), until))(input)?;
    let tree = rest
        .into_iter()
        .fold(first, |lhs, rhs| LtlfTree::And(Box::new(lhs), Box::new(rhs)));
    Ok((input, tree))
}

fn until(input: &str) -> IResult<&str, LtlfTree> {
    let (input, lhs) = unary(input)?;
    let (input, rhs) = opt(pair(alt((keyword("U"), keyword("R"))), until))(input)?;
    let tree = match rhs {
        Some(("U", rhs)) => LtlfTree::Until(Box::new(lhs), Box::new(rhs)),
        Some((_, rhs)) => LtlfTree::Release(Box::new(lhs), Box::new(rhs)),
        None => lhs,
    };
    Ok((input, tree))
}

fn unary(input: &str) -> IResult<&str, LtlfTree> {
    alt((not, next, weak_next, eventually, always, primary))(input)
}

fn not(input: &str) -> IResult<&str, LtlfTree> {
    let (input, inner) = preceded(ws(char('!')), unary)(input)?;
    Ok((input, LtlfTree::Not(Box::new(inner))))
}

fn next(input: &str) -> IResult<&str, LtlfTree> {
    let (input, inner) = preceded(keyword("X"), unary)(input)?;
    Ok((input, LtlfTree::Next(Box::new(inner))))
}

fn weak_next(input: &str) -> IResult<&str, LtlfTree> {
    let (input, inner) = preceded(keyword("WX"), unary)(input)?;
    Ok((input, LtlfTree::WeakNext(Box::new(inner))))
}

fn eventually(input: &str) -> IResult<&str, LtlfTree> {
    let (input, inner) = preceded(keyword("F"), unary)(input)?;
    Ok((input, LtlfTree::Eventually(Box::new(inner))))
}

fn always(input: &str) -> IResult<&str, LtlfTree> {
    let (input, inner) = preceded(keyword("G"), unary)(input)?;
    Ok((input, LtlfTree::Always(Box::new(inner))))
}

fn primary(input: &str) -> IResult<&str, LtlfTree> {
    alt((parens, leaf))(input)
}

fn parens(input: &str) -> IResult<&str, LtlfTree> {
    delimited(ws(char('(')), formula, ws(char(')')))(input)
}

fn leaf(input: &str) -> IResult<&str, LtlfTree> {
    let (rest, name) = ws(identifier)(input)?;
    let tree = match name {
        "True" => LtlfTree::True,
        "False" => LtlfTree::False,
        _ if RESERVED.contains(&name) => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Tag,
            )))
        }
        _ => LtlfTree::Atom(name),
    };
    Ok((rest, tree))
}
