//! Streaming DIMACS edge-list parser
//!
//! Reads one line at a time into a reused buffer and tokenizes it in place,
//! so parsing allocates nothing per line. Only `a <from> <to> <weight>`
//! lines are edges; everything else is skipped.

use crate::algo::{EdgeRecord, NodeId, Weight};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::warn;

/// Parser errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// Edge line with missing or non-integer fields
    #[error("Malformed edge line {line}: {reason}")]
    MalformedEdgeLine { line: usize, reason: String },

    /// Edge line with a negative weight
    #[error("Invalid weight {weight} on line {line}: weights must be non-negative")]
    InvalidWeight { line: usize, weight: i64 },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ParseError {
    /// Data-quality errors can be skipped under [`ParsePolicy::Lenient`]; I/O errors cannot.
    pub fn is_data_error(&self) -> bool {
        !matches!(self, ParseError::Io(_))
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MalformedEdgeLine { line, .. } | ParseError::InvalidWeight { line, .. } => {
                Some(*line)
            }
            ParseError::Io(_) => None,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// What to do with a bad edge line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Yield the error and stop
    #[default]
    Strict,
    /// Log, count and continue
    Lenient,
}

/// Size hint from a `p <kind> <nodes> <arcs>` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemLine {
    pub nodes: usize,
    pub arcs: usize,
}

enum Line {
    Skip,
    Problem(ProblemLine),
    Edge(ParseResult<EdgeRecord>),
}

/// Lazy, single-pass iterator of edge records over a buffered reader.
#[derive(Debug)]
pub struct EdgeReader<R> {
    reader: R,
    policy: ParsePolicy,
    buf: Vec<u8>,
    line: usize,
    accepted: usize,
    skipped: usize,
    problem: Option<ProblemLine>,
    done: bool,
}

impl<R: BufRead> EdgeReader<R> {
    pub fn new(reader: R, policy: ParsePolicy) -> Self {
        Self {
            reader,
            policy,
            buf: Vec::with_capacity(64),
            line: 0,
            accepted: 0,
            skipped: 0,
            problem: None,
            done: false,
        }
    }

    /// Number of edge records yielded so far
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Number of bad edge lines skipped under [`ParsePolicy::Lenient`]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line
    }

    /// First problem line seen so far, if any
    pub fn problem(&self) -> Option<ProblemLine> {
        self.problem
    }

    pub fn policy(&self) -> ParsePolicy {
        self.policy
    }
}

impl<R: BufRead> Iterator for EdgeReader<R> {
    type Item = ParseResult<EdgeRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
            self.line += 1;

            match classify(&self.buf, self.line) {
                Line::Skip => {}
                Line::Problem(problem) => {
                    self.problem.get_or_insert(problem);
                }
                Line::Edge(Ok(edge)) => {
                    self.accepted += 1;
                    return Some(Ok(edge));
                }
                Line::Edge(Err(err)) => match self.policy {
                    ParsePolicy::Strict => {
                        self.done = true;
                        return Some(Err(err));
                    }
                    ParsePolicy::Lenient => {
                        warn!("Skipping edge line: {}", err);
                        self.skipped += 1;
                    }
                },
            }
        }
    }
}

/// Parse an in-memory edge list.
pub fn parse_str(input: &str, policy: ParsePolicy) -> EdgeReader<&[u8]> {
    EdgeReader::new(input.as_bytes(), policy)
}

fn tokens(line: &[u8]) -> impl Iterator<Item = &[u8]> {
    line.split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty())
}

fn classify(raw: &[u8], line: usize) -> Line {
    let mut fields = tokens(raw);
    match fields.next() {
        Some(b"a") => Line::Edge(parse_edge(fields, line)),
        Some(b"p") => parse_problem(fields).map_or(Line::Skip, Line::Problem),
        _ => Line::Skip,
    }
}

fn parse_edge<'a>(mut fields: impl Iterator<Item = &'a [u8]>, line: usize) -> ParseResult<EdgeRecord> {
    let mut next_field = |name: &str| {
        fields.next().ok_or_else(|| ParseError::MalformedEdgeLine {
            line,
            reason: format!("missing {} field", name),
        })
    };

    let from = next_field("source")?;
    let to = next_field("target")?;
    let weight = next_field("weight")?;

    let from = parse_node(from, line)?;
    let to = parse_node(to, line)?;
    let weight = parse_weight(weight, line)?;

    Ok(EdgeRecord::new(from, to, weight))
}

fn parse_node(token: &[u8], line: usize) -> ParseResult<NodeId> {
    parse_int::<NodeId>(token).ok_or_else(|| ParseError::MalformedEdgeLine {
        line,
        reason: format!("invalid node id '{}'", String::from_utf8_lossy(token)),
    })
}

fn parse_weight(token: &[u8], line: usize) -> ParseResult<Weight> {
    let weight = parse_int::<i64>(token).ok_or_else(|| ParseError::MalformedEdgeLine {
        line,
        reason: format!("invalid weight '{}'", String::from_utf8_lossy(token)),
    })?;

    Weight::try_from(weight).map_err(|_| ParseError::InvalidWeight { line, weight })
}

fn parse_problem<'a>(mut fields: impl Iterator<Item = &'a [u8]>) -> Option<ProblemLine> {
    let _kind = fields.next()?;
    let nodes = parse_int(fields.next()?)?;
    let arcs = parse_int(fields.next()?)?;
    Some(ProblemLine { nodes, arcs })
}

fn parse_int<T: std::str::FromStr>(token: &[u8]) -> Option<T> {
    std::str::from_utf8(token).ok()?.parse().ok()
}
