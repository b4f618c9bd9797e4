//! Turn snapshot reader for the whitespace-delimited line protocol.
//!
//! # Format
//!
//! One turn is:
//!
//! ```text
//! <budget>
//! <link count>
//! <a> <b> <capacity>                      × link count   (capacity 0 = instant)
//! <unit count>
//! <unit id> <stop count> <stop> <stop> …  × unit count
//! <new node count>
//! 0 <id> <x> <y> <n> <tag> × n            source
//! <tag> <id> <x> <y>                      sink (tag > 0)
//!                                         × new node count
//! ```
//!
//! Records with non-numeric tokens or too few fields are skipped with a
//! warning.  Count lines cannot be skipped without losing sync, so a bad
//! count is an error.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use tn_core::{NodeId, Point, Tag, UnitId};
use tn_engine::TurnSnapshot;
use tn_network::{Link, Node};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input ended while reading {0}")]
    Truncated(&'static str),

    #[error("line {line}: expected a single non-negative {what}, got {got:?}")]
    BadCount { what: &'static str, line: u64, got: String },
}

pub type FeedResult<T> = Result<T, FeedError>;

/// Pulls one [`TurnSnapshot`] at a time from a byte stream.
pub struct FeedReader<R: Read> {
    reader: csv::Reader<R>,
    record: StringRecord,
}

impl<R: Read> FeedReader<R> {
    pub fn new(input: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b' ')
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input);
        Self { reader, record: StringRecord::new() }
    }

    /// The next turn, or `None` when the input ends cleanly between turns.
    pub fn next_turn(&mut self) -> FeedResult<Option<TurnSnapshot>> {
        let Some(budget) = self.count("budget", true)? else {
            return Ok(None);
        };
        let mut snapshot = TurnSnapshot::new(budget);

        for _ in 0..self.required_count("link count")? {
            let fields = self.required_fields("link")?;
            match fields.as_deref().and_then(parse_link) {
                Some(link) => snapshot.links.push(link),
                None => self.skip("link"),
            }
        }

        for _ in 0..self.required_count("unit count")? {
            let fields = self.required_fields("unit")?;
            match fields.as_deref().and_then(parse_unit) {
                Some(unit) => snapshot.units.push(unit),
                None => self.skip("unit"),
            }
        }

        for _ in 0..self.required_count("new node count")? {
            let fields = self.required_fields("new node")?;
            match fields.as_deref().and_then(parse_node) {
                Some(node) => snapshot.new_nodes.push(node),
                None => self.skip("new node"),
            }
        }

        Ok(Some(snapshot))
    }

    /// Read the next record into `self.record`.  `false` at end of input.
    fn advance(&mut self) -> FeedResult<bool> {
        Ok(self.reader.read_record(&mut self.record)?)
    }

    fn line(&self) -> u64 {
        self.record.position().map_or(0, |p| p.line())
    }

    fn count(&mut self, what: &'static str, eof_ok: bool) -> FeedResult<Option<u64>> {
        if !self.advance()? {
            return if eof_ok { Ok(None) } else { Err(FeedError::Truncated(what)) };
        }
        match integers(&self.record).as_deref() {
            Some(&[n]) if n >= 0 => Ok(Some(n as u64)),
            _ => Err(FeedError::BadCount {
                what,
                line: self.line(),
                got:  self.record.iter().collect::<Vec<_>>().join(" "),
            }),
        }
    }

    fn required_count(&mut self, what: &'static str) -> FeedResult<u64> {
        self.count(what, false)?.ok_or(FeedError::Truncated(what))
    }

    /// Next record as integers; `Ok(None)` if it has a non-numeric token.
    fn required_fields(&mut self, what: &'static str) -> FeedResult<Option<Vec<i64>>> {
        if !self.advance()? {
            return Err(FeedError::Truncated(what));
        }
        Ok(integers(&self.record))
    }

    fn skip(&self, what: &str) {
        log::warn!(
            "line {}: skipping malformed {what} record {:?}",
            self.line(),
            self.record.iter().collect::<Vec<_>>().join(" "),
        );
    }
}

// ── Record parsing ────────────────────────────────────────────────────────────

/// All non-empty fields as integers.  Runs of spaces yield empty fields,
/// which are ignored.
fn integers(record: &StringRecord) -> Option<Vec<i64>> {
    record
        .iter()
        .filter(|f| !f.is_empty())
        .map(|f| f.parse().ok())
        .collect()
}

fn id(v: i64) -> Option<u32> {
    u32::try_from(v).ok()
}

fn coord(v: i64) -> Option<i32> {
    i32::try_from(v).ok()
}

fn parse_link(fields: &[i64]) -> Option<Link> {
    let &[a, b, capacity] = fields else { return None };
    Some(Link { a: NodeId(id(a)?), b: NodeId(id(b)?), capacity: id(capacity)? })
}

fn parse_unit(fields: &[i64]) -> Option<(UnitId, Vec<NodeId>)> {
    let [unit, _count, stops @ ..] = fields else { return None };
    if stops.len() < 2 {
        return None;
    }
    let stops = stops.iter().map(|&s| id(s).map(NodeId)).collect::<Option<Vec<_>>>()?;
    Some((UnitId(id(*unit)?), stops))
}

fn parse_node(fields: &[i64]) -> Option<Node> {
    match *fields {
        [0, node, x, y, n, ref tags @ ..] => {
            let n = usize::try_from(n).ok()?;
            let demand = tags.get(..n)?.iter().map(|&t| id(t).map(Tag)).collect::<Option<Vec<_>>>()?;
            Some(Node::source(NodeId(id(node)?), Point::new(coord(x)?, coord(y)?), demand))
        }
        [tag, node, x, y, ..] if tag > 0 => {
            Some(Node::sink(NodeId(id(node)?), Point::new(coord(x)?, coord(y)?), Tag(id(tag)?)))
        }
        _ => None,
    }
}
