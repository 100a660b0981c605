//! Represents the concept of an "object": an immutable, typed payload
//! identified by the hash of its framed byte representation.
//!
//! Objects are created exactly once, either from deserialized store bytes
//! or from an in-memory value about to be persisted, and never mutated
//! afterward. An "edit" is always a new object with a new ID.

use crate::error::Result;
use crate::frame;

mod blob;
pub use blob::Blob;

mod commit;
pub use commit::Commit;

mod id;
pub use id::{Id, ParseIdError};

mod kind;
pub use kind::Kind;

mod tag;
pub use tag::Tag;

mod tree;
pub use tree::{Entry, Tree};

/// A single typed object, stored (or about to be stored) in a repository.
///
/// This is a closed set: the store dispatches a frame's type tag to one
/// of these variants exactly once, at [`Object::deserialize`], and no
/// other code inspects tag bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
}

impl Object {
    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        match self {
            Object::Blob(_) => Kind::Blob,
            Object::Tree(_) => Kind::Tree,
            Object::Commit(_) => Kind::Commit,
            Object::Tag(_) => Kind::Tag,
        }
    }

    /// Encode the object's payload bytes (the content inside the frame).
    pub fn serialize(&self) -> Vec<u8> {
        match self {
            Object::Blob(b) => b.serialize(),
            Object::Tree(t) => t.serialize(),
            Object::Commit(c) => c.serialize(),
            Object::Tag(t) => t.serialize(),
        }
    }

    /// Decode payload bytes into the variant the frame's type tag named.
    pub fn deserialize(kind: Kind, payload: &[u8]) -> Result<Object> {
        match kind {
            Kind::Blob => Ok(Object::Blob(Blob::deserialize(payload))),
            Kind::Tree => Ok(Object::Tree(Tree::deserialize(payload)?)),
            Kind::Commit => Ok(Object::Commit(Commit::deserialize(payload)?)),
            Kind::Tag => Ok(Object::Tag(Tag::deserialize(payload)?)),
        }
    }

    /// Compute the object's ID from its framed content.
    ///
    /// This is functionally equivalent to the
    /// [`git hash-object`](https://git-scm.com/docs/git-hash-object) command
    /// without the `-w` option that would write the object to the repo.
    pub fn id(&self) -> Id {
        frame::id_of(&frame::frame(self.kind(), &self.serialize()))
    }
}
