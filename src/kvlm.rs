//! Codec for the header-block + free-text-message encoding used by
//! commit and tag payloads ("key-value-list with message").
//!
//! The format is a sequence of `key ' ' value '\n'` header lines, a
//! single blank line, then the message running to the end of the buffer.
//! A value may span multiple physical lines: continuation lines carry a
//! single leading space in the stored form, which is stripped when
//! parsing and restored when serializing. A key may repeat (`parent` in
//! a merge commit); repeated keys aggregate into a list in input order.

use crate::error::{Error, Result};

/// The value slot for a header key: a single value, or the aggregation
/// of every line that repeated the key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    Scalar(Vec<u8>),
    List(Vec<Vec<u8>>),
}

impl Value {
    /// Iterate the value(s) in stored order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        let items: Vec<&[u8]> = match self {
            Value::Scalar(v) => vec![v.as_slice()],
            Value::List(vs) => vs.iter().map(|v| v.as_slice()).collect(),
        };
        items.into_iter()
    }
}

/// A parsed header-block + message document.
///
/// Header fields preserve their input order, which `serialize` reproduces
/// exactly; the message is held verbatim with no trailing modification.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Kvlm {
    fields: Vec<(Vec<u8>, Value)>,
    message: Vec<u8>,
}

impl Kvlm {
    /// Parse a document from its stored byte form.
    ///
    /// A buffer whose header block runs off the end without a blank-line
    /// separator, whose separator line is not blank, or whose last header
    /// value is missing its terminating newline fails with
    /// [`Error::MalformedMetadata`].
    pub fn parse(buf: &[u8]) -> Result<Kvlm> {
        let mut fields: Vec<(Vec<u8>, Value)> = Vec::new();
        let mut pos = 0;

        loop {
            let space = find(buf, pos, b' ');
            let newline = find(buf, pos, b'\n');

            // A header line starts with `key ' '`. If no space is found
            // before the next newline, the current line must be the blank
            // separator and the rest of the buffer is the message.
            let space = match (space, newline) {
                (Some(s), Some(n)) if s < n => s,
                _ => {
                    return match newline {
                        Some(n) if n == pos => Ok(Kvlm {
                            fields,
                            message: buf[pos + 1..].to_vec(),
                        }),
                        _ => Err(Error::MalformedMetadata(
                            "header block is not terminated by a blank line".to_string(),
                        )),
                    }
                }
            };
            let key = buf[pos..space].to_vec();

            // The value ends at the first newline NOT followed by a space;
            // a newline+space pair marks a continuation line.
            let mut scan = space + 1;
            let end = loop {
                match find(buf, scan, b'\n') {
                    Some(n) if buf.get(n + 1) == Some(&b' ') => scan = n + 1,
                    Some(n) => break n,
                    None => {
                        return Err(Error::MalformedMetadata(format!(
                            "value for key `{}` is not newline-terminated",
                            String::from_utf8_lossy(&key)
                        )))
                    }
                }
            };

            let value = unfold(&buf[space + 1..end]);
            push_field(&mut fields, key, value);

            pos = end + 1;
        }
    }

    /// Serialize the document back to its stored byte form.
    ///
    /// This is the exact inverse of `parse`: header lines in original
    /// order (list values as one line per element), interior newlines
    /// refolded to newline+space, a single blank line, then the message
    /// verbatim.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();

        for (key, value) in &self.fields {
            for v in value.iter() {
                out.extend_from_slice(key);
                out.push(b' ');
                fold(v, &mut out);
                out.push(b'\n');
            }
        }

        out.push(b'\n');
        out.extend_from_slice(&self.message);

        out
    }

    /// Look up a header key's value slot.
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up a header key expected to appear at most once.
    ///
    /// Returns the first stored value if the key was promoted to a list.
    pub fn scalar(&self, key: &[u8]) -> Option<&[u8]> {
        match self.get(key)? {
            Value::Scalar(v) => Some(v.as_slice()),
            Value::List(vs) => vs.first().map(|v| v.as_slice()),
        }
    }

    /// Collect every value stored under a key, in input order.
    ///
    /// Returns an empty vec for an absent key.
    pub fn all(&self, key: &[u8]) -> Vec<&[u8]> {
        match self.get(key) {
            Some(value) => value.iter().collect(),
            None => Vec::new(),
        }
    }

    /// The free-text message following the header block.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// Append a header line during document construction.
    ///
    /// Repeating a key aggregates into a list, just as parsing does.
    pub fn push(&mut self, key: &[u8], value: &[u8]) {
        push_field(&mut self.fields, key.to_vec(), value.to_vec());
    }

    /// Replace the message.
    pub fn set_message(&mut self, message: &[u8]) {
        self.message = message.to_vec();
    }
}

fn find(buf: &[u8], from: usize, byte: u8) -> Option<usize> {
    if from > buf.len() {
        return None;
    }
    buf[from..].iter().position(|&b| b == byte).map(|i| from + i)
}

/// Strip the continuation markers from a raw value: every
/// `newline + space` pair becomes a bare newline.
fn unfold(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        out.push(raw[i]);
        if raw[i] == b'\n' && raw.get(i + 1) == Some(&b' ') {
            i += 2;
        } else {
            i += 1;
        }
    }

    out
}

/// The inverse of `unfold`: every interior newline gains a trailing
/// space so the value folds back across physical lines.
fn fold(value: &[u8], out: &mut Vec<u8>) {
    for &b in value {
        out.push(b);
        if b == b'\n' {
            out.push(b' ');
        }
    }
}

fn push_field(fields: &mut Vec<(Vec<u8>, Value)>, key: Vec<u8>, value: Vec<u8>) {
    if let Some((_, slot)) = fields.iter_mut().find(|(k, _)| *k == key) {
        match slot {
            Value::Scalar(first) => {
                let first = std::mem::take(first);
                *slot = Value::List(vec![first, value]);
            }
            Value::List(items) => items.push(value),
        }
    } else {
        fields.push((key, Value::Scalar(value)));
    }
}
