use std::fmt;

use crate::{ConvertErrorKind, ConvertResult, ConvertResultExt};

/// One input line, with enough context to report where it came from.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    path: &'a str,
    number: usize,
    text: &'a str,
}

impl<'a> Line<'a> {
    pub fn new(path: &'a str, number: usize, text: &'a str) -> Line<'a> {
        Line { path, number, text }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn malformed(&self) -> ConvertErrorKind {
        ConvertErrorKind::MalformedLine(self.path.to_string(), self.number, self.text.to_string())
    }

    fn fields(&self) -> Vec<&'a str> {
        self.text.trim().split('\t').collect()
    }

    /// Tab-separated fields of the trimmed line, exactly `n` of them.
    pub fn exact(&self, n: usize) -> ConvertResult<Vec<&'a str>> {
        let fields = self.fields();
        if fields.len() != n {
            bail!(self.malformed());
        }
        Ok(fields)
    }

    /// The first `n` fields; extra trailing columns are dropped.
    pub fn at_least(&self, n: usize) -> ConvertResult<Vec<&'a str>> {
        let mut fields = self.fields();
        if fields.len() < n {
            bail!(self.malformed());
        }
        fields.truncate(n);
        Ok(fields)
    }

    pub fn integer(&self, field: &str) -> ConvertResult<i64> {
        field.trim().parse::<i64>().chain_err(|| self.malformed())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp<'a> {
    /// Copied through without being parsed.
    Raw(&'a str),
    Value(i64),
}

impl<'a> fmt::Display for Timestamp<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Timestamp::Raw(s) => f.write_str(s),
            Timestamp::Value(v) => write!(f, "{}", v),
        }
    }
}

/// A quadruple `(subject, predicate, object, timestamp)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fact<'a> {
    pub subject: &'a str,
    pub predicate: &'a str,
    pub object: &'a str,
    pub time: Timestamp<'a>,
}

impl<'a> fmt::Display for Fact<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}\t{}\t{}", self.subject, self.predicate, self.object, self.time)
    }
}

/// A row of `entity2id.txt` or `relation2id.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictEntry<I> {
    pub name: String,
    pub id: I,
}

impl<I: fmt::Display> fmt::Display for DictEntry<I> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}", self.name, self.id)
    }
}
