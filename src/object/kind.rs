use std::fmt::{self, Display, Formatter};

use crate::error::Error;

/// Describes the fundamental object type (blob, tree, commit, or tag).
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
    Tag,
}

impl Kind {
    /// Return the type tag as it appears in an object's frame header.
    pub fn tag(self) -> &'static [u8] {
        match self {
            Kind::Blob => b"blob",
            Kind::Tree => b"tree",
            Kind::Commit => b"commit",
            Kind::Tag => b"tag",
        }
    }

    /// Parse a frame header's type tag.
    ///
    /// Any tag outside {blob, tree, commit, tag} fails with
    /// [`Error::UnknownObjectType`]. This is the single dispatch point for
    /// type tags; nothing else in the crate compares tag bytes.
    pub fn from_tag(tag: &[u8]) -> Result<Kind, Error> {
        match tag {
            b"blob" => Ok(Kind::Blob),
            b"tree" => Ok(Kind::Tree),
            b"commit" => Ok(Kind::Commit),
            b"tag" => Ok(Kind::Tag),
            _ => Err(Error::UnknownObjectType(
                String::from_utf8_lossy(tag).into_owned(),
            )),
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Kind::Blob => write!(f, "blob"),
            Kind::Tree => write!(f, "tree"),
            Kind::Commit => write!(f, "commit"),
            Kind::Tag => write!(f, "tag"),
        }
    }
}
