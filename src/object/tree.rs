use crate::error::{Error, Result};

use super::Id;

/// One entry in a tree: a mode string, a path segment, and the ID of the
/// object the entry points at.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    mode: Vec<u8>,
    name: Vec<u8>,
    id: Id,
}

impl Entry {
    pub fn new(mode: &[u8], name: &[u8], id: Id) -> Entry {
        Entry {
            mode: mode.to_vec(),
            name: name.to_vec(),
            id,
        }
    }

    /// The permission/mode string, verbatim as stored (e.g. `100644`).
    pub fn mode(&self) -> &[u8] {
        &self.mode
    }

    /// The path segment this entry names.
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    /// True if the entry points at a subtree (mode begins `40`).
    pub fn is_tree(&self) -> bool {
        self.mode == b"40000" || self.mode == b"040000"
    }

    /// The key git orders tree entries by: the entry name, with subtree
    /// names compared as if they carried a trailing `/`.
    fn sort_key(&self) -> Vec<u8> {
        let mut key = self.name.clone();
        if self.is_tree() {
            key.push(b'/');
        }
        key
    }
}

/// An ordered sequence of tree entries.
///
/// The wire form of each entry is `mode ' ' name NUL <20 raw id bytes>`,
/// entries back to back with no outer delimiter. Serialization and
/// deserialization preserve insertion order; callers that need identical
/// trees to hash identically apply [`Tree::canonical_sort`] before
/// writing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tree {
    entries: Vec<Entry>,
}

impl Tree {
    pub fn new(entries: Vec<Entry>) -> Tree {
        Tree { entries }
    }

    /// Decode the entry sequence from payload bytes.
    pub fn deserialize(payload: &[u8]) -> Result<Tree> {
        let mut entries = Vec::new();
        let mut pos = 0;

        while pos < payload.len() {
            let space = payload[pos..]
                .iter()
                .position(|&b| b == b' ')
                .map(|i| pos + i)
                .ok_or_else(|| {
                    Error::MalformedObject("tree entry is missing its mode terminator".to_string())
                })?;

            let nul = payload[space + 1..]
                .iter()
                .position(|&b| b == b'\0')
                .map(|i| space + 1 + i)
                .ok_or_else(|| {
                    Error::MalformedObject("tree entry is missing its name terminator".to_string())
                })?;

            let id_end = nul + 21;
            if payload.len() < id_end {
                return Err(Error::MalformedObject(
                    "tree entry is truncated before its 20-byte ID".to_string(),
                ));
            }

            entries.push(Entry {
                mode: payload[pos..space].to_vec(),
                name: payload[space + 1..nul].to_vec(),
                id: Id::new(&payload[nul + 1..id_end])?,
            });

            pos = id_end;
        }

        Ok(Tree { entries })
    }

    /// Encode the entry sequence in its stored order.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();

        for entry in &self.entries {
            out.extend_from_slice(&entry.mode);
            out.push(b' ');
            out.extend_from_slice(&entry.name);
            out.push(b'\0');
            out.extend_from_slice(entry.id.as_bytes());
        }

        out
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Sort entries into git's canonical order so that trees with the
    /// same content always serialize to the same bytes.
    ///
    /// Subtree entries compare as if their name ended in `/`, so
    /// `foo` (subtree) sorts after `foo.c` but before `foo0`. This is an
    /// explicit policy step; `serialize` never reorders on its own.
    pub fn canonical_sort(&mut self) {
        self.entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    }
}
