//! A `nom`-based parser for the selector language.
//!
//! Parsing runs in three stages: the input is split into chains on top-level
//! commas, each chain into tokens on top-level whitespace, and each non-combinator
//! token is parsed into a [`Step`]. Brackets and quoted attribute values shield
//! their content from the first two stages.

use super::ast::*;
use crate::error::SelectorError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::{map, opt, verify},
    multi::many0,
    sequence::{delimited, pair, preceded},
};

// --- Main Public Parser ---

pub fn parse_selector(input: &str) -> Result<SelectorList, SelectorError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SelectorError::Empty);
    }

    let chains = split_top_level(trimmed, |c| c == ',')
        .into_iter()
        .map(|raw| match raw.trim() {
            "" => Err(SelectorError::EmptyChain(input.to_string())),
            raw => parse_chain(raw),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let selector = SelectorList { chains };
    log::debug!("Parsed selector '{}' as '{}'", input, selector);
    Ok(selector)
}

/// Parses a single chain (no top-level commas) such as `a > b c`.
pub fn parse_chain(input: &str) -> Result<Chain, SelectorError> {
    let mut steps: Vec<Step> = Vec::new();
    let mut pending: Option<Combinator> = None;

    let tokens = split_top_level(input, char::is_whitespace)
        .into_iter()
        .filter(|t| !t.is_empty());

    for token in tokens {
        if let Some(combinator) = Combinator::from_glyph(token) {
            if steps.is_empty() {
                return Err(SelectorError::LeadingCombinator {
                    selector: input.to_string(),
                    combinator: combinator.glyph(),
                });
            }
            if let Some(first) = pending {
                return Err(SelectorError::ConsecutiveCombinators {
                    selector: input.to_string(),
                    first: first.glyph(),
                    second: combinator.glyph(),
                });
            }
            pending = Some(combinator);
            continue;
        }

        let combinator = pending.take().unwrap_or(Combinator::Descendant);
        steps.push(parse_step(token)?.with_combinator(combinator));
    }

    if let Some(combinator) = pending {
        return Err(SelectorError::TrailingCombinator {
            selector: input.to_string(),
            combinator: combinator.glyph(),
        });
    }
    if steps.is_empty() {
        return Err(SelectorError::EmptyChain(input.to_string()));
    }

    Ok(Chain::new(steps))
}

/// Parses one compound token such as `item[id="2"]:empty`.
pub fn parse_step(token: &str) -> Result<Step, SelectorError> {
    let (rest, (name, segments)) = match compound(token) {
        Ok(parsed) => parsed,
        Err(e) => return Err(malformed(token, e.to_string())),
    };

    if !rest.is_empty() {
        let reason = if rest.starts_with('[') {
            "unterminated or malformed attribute".to_string()
        } else if rest.starts_with(':') {
            "dangling ':'".to_string()
        } else {
            format!("unexpected '{}'", rest)
        };
        return Err(malformed(token, reason));
    }

    let mut step = match name {
        "" | "*" => Step::wildcard(),
        name if name.contains('*') => {
            return Err(malformed(token, "a wildcard must stand alone".to_string()));
        }
        name => Step::named(name),
    };

    for segment in segments {
        match segment {
            Segment::Attribute(raw) => {
                step = step.with_attribute(raw.into_predicate(token)?);
            }
            Segment::Pseudo(name) => match PseudoClass::parse(name) {
                Some(pseudo_class) => step = step.with_pseudo_class(pseudo_class),
                None => log::debug!("Ignoring unsupported pseudo-class ':{}' in '{}'", name, token),
            },
        }
    }

    Ok(step)
}

fn malformed(token: &str, reason: String) -> SelectorError {
    SelectorError::Malformed {
        token: token.to_string(),
        reason,
    }
}

// --- Tokenization ---

/// Splits on `is_separator`, ignoring separators inside `[...]` and inside
/// quoted attribute values. Empty pieces are kept so callers can reject them.
fn split_top_level(input: &str, is_separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' if depth > 0 => quote = Some(c),
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                c if depth == 0 && is_separator(c) => {
                    pieces.push(&input[start..i]);
                    start = i + c.len_utf8();
                }
                _ => {}
            },
        }
    }
    pieces.push(&input[start..]);
    pieces
}

// --- Compound Selector Grammar ---

enum Segment<'a> {
    Attribute(RawAttribute<'a>),
    Pseudo(&'a str),
}

/// An attribute segment as written, validated later so errors can be specific.
struct RawAttribute<'a> {
    name: &'a str,
    operator: &'a str,
    value: Option<&'a str>,
}

impl RawAttribute<'_> {
    fn into_predicate(self, token: &str) -> Result<AttributePredicate, SelectorError> {
        let name = self.name;
        if name.is_empty() {
            return Err(malformed(token, "attribute without a name".to_string()));
        }

        if self.operator.is_empty() {
            return match self.value {
                None => Ok(AttributePredicate::new(name, AttributeOperator::Exists)),
                Some(value) => Err(malformed(
                    token,
                    format!("expected an operator before '{}'", value),
                )),
            };
        }

        let Some(value) = self.value else {
            return Err(SelectorError::MissingValue {
                token: token.to_string(),
                attribute: name.to_string(),
            });
        };

        AttributeOperator::from_parts(self.operator, value.to_string())
            .map(|operator| AttributePredicate::new(name, operator))
            .ok_or_else(|| SelectorError::UnknownOperator {
                token: token.to_string(),
                operator: self.operator.to_string(),
            })
    }
}

fn is_name_char(c: char) -> bool {
    !matches!(c, '[' | ']' | ':' | '"' | '\'' | ',' | '(' | ')' | '>' | '+' | '~')
        && !c.is_whitespace()
}

fn is_attribute_name_char(c: char) -> bool {
    !is_operator_char(c) && !matches!(c, '[' | ']' | '"' | '\'') && !c.is_whitespace()
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '=' | '~' | '^' | '$' | '*' | '|' | '!')
}

fn compound(input: &str) -> IResult<&str, (&str, Vec<Segment<'_>>)> {
    pair(take_while(is_name_char), many0(segment)).parse(input)
}

fn segment(input: &str) -> IResult<&str, Segment<'_>> {
    alt((
        map(attribute, Segment::Attribute),
        map(pseudo_class, Segment::Pseudo),
    ))
    .parse(input)
}

fn attribute(input: &str) -> IResult<&str, RawAttribute<'_>> {
    let (input, _) = char('[').parse(input)?;
    let (input, _) = take_while(char::is_whitespace).parse(input)?;
    let (input, name) = take_while(is_attribute_name_char).parse(input)?;
    let (input, _) = take_while(char::is_whitespace).parse(input)?;
    let (input, operator) = take_while(is_operator_char).parse(input)?;
    let (input, value) = attribute_value(input)?;
    let (input, _) = char(']').parse(input)?;

    Ok((
        input,
        RawAttribute {
            name,
            operator,
            value,
        },
    ))
}

/// A double- or single-quoted value (quotes stripped, may be empty), or a bare
/// value up to the closing bracket (trimmed, absent when blank). An unterminated
/// quote fails, leaving the segment unparsed.
fn attribute_value(input: &str) -> IResult<&str, Option<&str>> {
    let (input, _) = take_while(char::is_whitespace).parse(input)?;
    alt((
        map(quoted('"'), Some),
        map(quoted('\''), Some),
        // A bare value may not open a quote it never closes.
        map(
            verify(take_while(|c: char| c != ']' && c != '['), |bare: &str| {
                !bare.starts_with(['"', '\''])
            }),
            |bare: &str| Some(bare.trim()).filter(|v| !v.is_empty()),
        ),
    ))
    .parse(input)
}

fn quoted<'a>(quote: char) -> impl Parser<&'a str, Output = &'a str, Error = nom::error::Error<&'a str>> {
    delimited(
        char(quote),
        take_while(move |c: char| c != quote),
        preceded(char(quote), take_while(char::is_whitespace)),
    )
}

fn pseudo_class(input: &str) -> IResult<&str, &str> {
    let (input, _) = pair(char(':'), opt(char(':'))).parse(input)?;
    let (input, name) =
        take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_').parse(input)?;
    let (input, _) = opt(delimited(char('('), take_while(|c: char| c != ')'), char(')'))).parse(input)?;
    Ok((input, name))
}
