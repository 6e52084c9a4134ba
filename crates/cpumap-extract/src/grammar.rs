//! Grammar for the C initializer dialect used by QEMU's CPU definitions.
//!
//! ```text
//! list     := value ("," value)* ","?
//! map      := keyvalue ("," keyvalue)* ","?
//! keyvalue := IDENTIFIER "=" value
//! value    := "{" "}" | "{" map "}" | "{" list "}" | text
//! text     := (IDENTIFIER | '"' [^"]* '"')+
//! ```
//!
//! Whitespace, `|`, `//` and `/* */` comments and the compound-literal casts
//! `(X86CPUVersionDefinition[])` and `(PropValue[])` may appear between any
//! two tokens and are skipped.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{char, multispace1},
    combinator::{all_consuming, map, opt, value},
    error::{context, convert_error, ContextError, ParseError as NomParseError, VerboseError},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult, Parser,
};

use crate::error::{ExtractError, Result};

/// Generic syntax tree of an initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `{ a, b, ... }`, or the top-level array body.
    List(Vec<Node>),
    /// `{ .key = value, ... }`
    Map(Vec<Entry>),
    /// Identifiers and string fragments, in source order.
    Text(Vec<String>),
    /// `{}`, a placeholder for "nothing here".
    Empty,
}

/// One `key = value` pair of a [`Node::Map`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Node,
    pub value: Node,
}

/// Parse an array body into a [`Node::List`].
pub fn parse(input: &str) -> Result<Node> {
    match all_consuming(terminated(list::<VerboseError<&str>>, ignorable))(input) {
        Ok((_, node)) => Ok(node),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(ExtractError::Parse {
            detail: convert_error(input, e),
        }),
        Err(nom::Err::Incomplete(_)) => Err(ExtractError::Parse {
            detail: "incomplete input".to_string(),
        }),
    }
}

// ============================================================================
// Ignorable input
// ============================================================================

fn line_comment<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, (), E> {
    value((), tuple((tag("//"), take_until("\n"), char('\n'))))(input)
}

fn block_comment<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, (), E> {
    value((), tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}

fn cast<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, (), E> {
    value(
        (),
        tuple((
            char('('),
            alt((tag("X86CPUVersionDefinition"), tag("PropValue"))),
            tag("[])"),
        )),
    )(input)
}

fn ignorable<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, (), E> {
    value(
        (),
        many0(alt((
            value((), multispace1),
            value((), char('|')),
            line_comment,
            block_comment,
            cast,
        ))),
    )(input)
}

/// Skip ignorable input, then run `parser`.
fn token<'a, O, E, F>(parser: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    E: NomParseError<&'a str>,
    F: Parser<&'a str, O, E>,
{
    preceded(ignorable, parser)
}

// ============================================================================
// Terminals
// ============================================================================

fn identifier<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || matches!(c, '[' | ']' | '.' | '_' | '&'))(
        input,
    )
}

/// A double-quoted fragment; `""` yields `None`.
fn string_fragment<'a, E: NomParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Option<&'a str>, E> {
    map(
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        |s: &str| (!s.is_empty()).then_some(s),
    )(input)
}

// ============================================================================
// Rules
// ============================================================================

fn text<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Node, E> {
    let fragment = alt((map(identifier, Some), string_fragment));
    map(many1(token(fragment)), |parts| {
        Node::Text(parts.into_iter().flatten().map(str::to_string).collect())
    })(input)
}

fn keyvalue<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Entry, E> {
    let (input, key) = token(identifier)(input)?;
    let (input, _) = token(char('='))(input)?;
    let (input, value) = context("value", node)(input)?;
    Ok((
        input,
        Entry {
            key: Node::Text(vec![key.to_string()]),
            value,
        },
    ))
}

fn map_body<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Node, E> {
    map(
        terminated(
            separated_list1(token(char(',')), keyvalue),
            opt(token(char(','))),
        ),
        Node::Map,
    )(input)
}

fn list<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Node, E> {
    map(
        terminated(
            separated_list1(token(char(',')), node),
            opt(token(char(','))),
        ),
        Node::List,
    )(input)
}

fn braced<'a, E, F>(body: F) -> impl FnMut(&'a str) -> IResult<&'a str, Node, E>
where
    E: NomParseError<&'a str> + ContextError<&'a str>,
    F: Parser<&'a str, Node, E>,
{
    delimited(
        token(char('{')),
        body,
        context("closing brace", token(char('}'))),
    )
}

fn node<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Node, E> {
    alt((
        value(Node::Empty, pair(token(char('{')), token(char('}')))),
        braced(map_body),
        braced(list),
        text,
    ))(input)
}
