use crate::error::{Error, Result};
use crate::kvlm::Kvlm;

use super::Id;

/// A commit: a header-block document naming a tree, zero or more parents,
/// an author and a committer, optionally a GPG signature, followed by the
/// commit message.
///
/// The payload encoding is delegated entirely to the KVLM codec; the
/// accessors here give typed views over the well-known header keys.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Commit {
    doc: Kvlm,
}

impl Commit {
    pub fn new(doc: Kvlm) -> Commit {
        Commit { doc }
    }

    pub fn deserialize(payload: &[u8]) -> Result<Commit> {
        Ok(Commit {
            doc: Kvlm::parse(payload)?,
        })
    }

    pub fn serialize(&self) -> Vec<u8> {
        self.doc.serialize()
    }

    /// The ID of the tree this commit snapshots.
    pub fn tree_id(&self) -> Result<Id> {
        let hex = self
            .doc
            .scalar(b"tree")
            .ok_or_else(|| Error::MalformedMetadata("commit has no tree header".to_string()))?;

        Ok(Id::from_hex(hex)?)
    }

    /// Parent commit IDs in header order; empty for a root commit.
    pub fn parent_ids(&self) -> Result<Vec<Id>> {
        self.doc
            .all(b"parent")
            .into_iter()
            .map(|hex| Id::from_hex(hex).map_err(Error::from))
            .collect()
    }

    /// The raw `author` header value, if present.
    pub fn author(&self) -> Option<&[u8]> {
        self.doc.scalar(b"author")
    }

    /// The raw `committer` header value, if present.
    pub fn committer(&self) -> Option<&[u8]> {
        self.doc.scalar(b"committer")
    }

    /// The unfolded GPG signature, if the commit is signed.
    pub fn gpg_signature(&self) -> Option<&[u8]> {
        self.doc.scalar(b"gpgsig")
    }

    /// The commit message, verbatim.
    pub fn message(&self) -> &[u8] {
        self.doc.message()
    }

    /// The underlying header document.
    pub fn doc(&self) -> &Kvlm {
        &self.doc
    }
}
