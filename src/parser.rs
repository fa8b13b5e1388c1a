//! Parsers for the textual notation of bounds, zones and zone sets.
//!
//! The notation is the one produced by the [`Display`](std::fmt::Display) implementations of
//! [`Interval`], [`Zone`] and [`ZoneSet`]: an interval is written `[2, 5)` with brackets giving the
//! closedness of each bound, a zone is a sequence of intervals joined by `x`, and a zone set is a
//! list of zones separated by `;` between braces. Values are rational literals such as `7`, `-1.4`
//! or `3/2`.
//!
//! ```rust
//! use robust_tre::parser::parse_zone_set;
//! use robust_tre::rational::integer;
//! use robust_tre::zone::Point;
//!
//! let zones = parse_zone_set("{ [0, 10] x [0, 10]; (12, 15] x [3, 4] }").unwrap();
//!
//! assert_eq!(zones.len(), 2);
//! assert!(zones.contains(&Point::from([integer(13), integer(3)])).unwrap());
//! ```

use std::str::FromStr;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1, one_of, space0};
use nom::combinator::{map, map_res, opt, recognize};
use nom::multi::{separated_list0, separated_list1};
use nom::sequence::{delimited, pair, tuple};
use nom::IResult;
use thiserror::Error;

use crate::bound::Bound;
use crate::rational::{self, Rational};
use crate::zone::{Interval, Zone};
use crate::zone_set::ZoneSet;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Could not parse remaining input \"{0}\"")]
    Incomplete(String),

    #[error("Invalid syntax at \"{0}\"")]
    Syntax(String),
}

fn op0<'a>(op: &'a str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    move |input: &'a str| -> IResult<&'a str, &'a str> {
        let mut parser = delimited(space0, tag(op), space0);
        parser(input)
    }
}

/// Rational literal: an integer, a decimal or a fraction, with an optional leading `-`.
pub fn rational(input: &str) -> IResult<&str, Rational> {
    let decimal = recognize(pair(char('.'), digit1));
    let fraction = recognize(tuple((space0, char('/'), space0, digit1)));
    let number = recognize(tuple((opt(char('-')), digit1, opt(alt((decimal, fraction))))));
    let mut parser = map_res(number, rational::literal);

    parser(input)
}

/// Interval between two rationals, e.g. `[2, 5)` or `(-1/2, 3]`.
pub fn interval(input: &str) -> IResult<&str, Interval> {
    let body = tuple((one_of("[("), space0, rational, op0(","), rational, space0, one_of("])")));
    let mut parser = map(body, |(opening, _, lower, _, upper, _, closing)| {
        Interval::new(Bound::new(lower, opening == '['), Bound::new(upper, closing == ']'))
    });

    parser(input)
}

/// Intervals joined by `x`, one per dimension.
pub fn zone(input: &str) -> IResult<&str, Zone> {
    let mut parser = map_res(separated_list1(op0("x"), interval), Zone::from_intervals);
    parser(input)
}

/// Zones separated by `;` between braces. All zones must have the same dimension.
pub fn zone_set(input: &str) -> IResult<&str, ZoneSet> {
    let zones = separated_list0(op0(";"), zone);
    let body = delimited(pair(char('{'), space0), zones, pair(space0, char('}')));
    let mut parser = map_res(body, ZoneSet::from_zones);

    parser(input)
}

fn complete<'a, T, P>(mut parser: P, input: &'a str) -> Result<T, ParseError>
where
    P: FnMut(&'a str) -> IResult<&'a str, T>,
{
    match parser(input.trim()) {
        Ok(("", value)) => Ok(value),
        Ok((rest, _)) => Err(ParseError::Incomplete(rest.trim().to_string())),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(ParseError::Syntax(e.input.to_string())),
        Err(nom::Err::Incomplete(_)) => Err(ParseError::Syntax(input.to_string())),
    }
}

pub fn parse_rational(input: &str) -> Result<Rational, ParseError> {
    complete(rational, input)
}

pub fn parse_interval(input: &str) -> Result<Interval, ParseError> {
    complete(interval, input)
}

pub fn parse_zone(input: &str) -> Result<Zone, ParseError> {
    complete(zone, input)
}

/// Parse a complete zone set.
///
/// The notation does not record the dimension of an empty set, so `{ }` always parses to a set
/// without a dimension.
pub fn parse_zone_set(input: &str) -> Result<ZoneSet, ParseError> {
    complete(zone_set, input)
}

impl FromStr for Zone {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_zone(s)
    }
}

impl FromStr for ZoneSet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_zone_set(s)
    }
}
