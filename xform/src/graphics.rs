//! Content stream operators written by transform scopes.

use crate::trans::AffineMatrix;
use log::debug;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{multispace0, multispace1},
    combinator::{all_consuming, map, value},
    number::complete::double,
    sequence::{delimited, terminated, tuple},
    IResult,
};
use std::{fmt, str::FromStr};

/// Decimals of `cm` operands unless configured otherwise.
pub const DEFAULT_PRECISION: usize = 6;

#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid content stream operation: {0:?}")]
    InvalidOperation(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    SaveGraphicsState,
    RestoreGraphicsState,
    ModifyCTM(AffineMatrix),
}

impl Operation {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::SaveGraphicsState => "q",
            Self::RestoreGraphicsState => "Q",
            Self::ModifyCTM(_) => "cm",
        }
    }

    /// Command text of the operation, `cm` operands use `precision` decimals.
    pub fn encode(&self, precision: usize) -> String {
        format!("{:.*}", precision, self)
    }
}

/// Formatter precision applies to `cm` operands, default to [`DEFAULT_PRECISION`].
impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModifyCTM(m) => {
                let p = f.precision().unwrap_or(DEFAULT_PRECISION);
                write!(
                    f,
                    "{:.p$} {:.p$} {:.p$} {:.p$} {:.p$} {:.p$} cm",
                    m.m11, m.m12, m.m21, m.m22, m.m31, m.m32,
                )
            }
            _ => f.write_str(self.tag()),
        }
    }
}

fn operand(input: &[u8]) -> IResult<&[u8], f64> {
    terminated(double, multispace1)(input)
}

fn parse_operation(input: &[u8]) -> IResult<&[u8], Operation> {
    delimited(
        multispace0,
        alt((
            map(
                terminated(
                    tuple((operand, operand, operand, operand, operand, operand)),
                    tag("cm"),
                ),
                |(a, b, c, d, e, f)| Operation::ModifyCTM(AffineMatrix::new(a, b, c, d, e, f)),
            ),
            value(Operation::SaveGraphicsState, tag("q")),
            value(Operation::RestoreGraphicsState, tag("Q")),
        )),
        multispace0,
    )(input)
}

impl FromStr for Operation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_consuming(parse_operation)(s.as_bytes())
            .map(|(_, op)| op)
            .map_err(|_| ParseError::InvalidOperation(s.to_owned()))
    }
}

/// Parse a content buffer, one command per line. Returns each operation
/// with the offset of its line, other commands are skipped.
pub fn parse_operations(buf: &[u8]) -> Vec<(usize, Operation)> {
    let mut r = vec![];
    let mut offset = 0;
    for line in buf.split_inclusive(|b| *b == b'\n') {
        match all_consuming(parse_operation)(line) {
            Ok((_, op)) => r.push((offset, op)),
            Err(_) => debug!("skip command at {}", offset),
        }
        offset += line.len();
    }
    r
}
