use crate::error::{Error, Result};
use crate::kvlm::Kvlm;

use super::{Id, Kind};

/// An annotated tag: a header-block document naming a target object, its
/// type, the tag name, and the tagger, followed by the tag message.
///
/// Like [`Commit`](super::Commit), the payload encoding is delegated
/// entirely to the KVLM codec.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tag {
    doc: Kvlm,
}

impl Tag {
    pub fn new(doc: Kvlm) -> Tag {
        Tag { doc }
    }

    pub fn deserialize(payload: &[u8]) -> Result<Tag> {
        Ok(Tag {
            doc: Kvlm::parse(payload)?,
        })
    }

    pub fn serialize(&self) -> Vec<u8> {
        self.doc.serialize()
    }

    /// The ID of the object this tag points at.
    pub fn target_id(&self) -> Result<Id> {
        let hex = self
            .doc
            .scalar(b"object")
            .ok_or_else(|| Error::MalformedMetadata("tag has no object header".to_string()))?;

        Ok(Id::from_hex(hex)?)
    }

    /// The declared kind of the target object.
    pub fn target_kind(&self) -> Result<Kind> {
        let tag = self
            .doc
            .scalar(b"type")
            .ok_or_else(|| Error::MalformedMetadata("tag has no type header".to_string()))?;

        Kind::from_tag(tag)
    }

    /// The tag's name (the `tag` header), if present.
    pub fn name(&self) -> Option<&[u8]> {
        self.doc.scalar(b"tag")
    }

    /// The raw `tagger` header value, if present.
    pub fn tagger(&self) -> Option<&[u8]> {
        self.doc.scalar(b"tagger")
    }

    /// The tag message, verbatim.
    pub fn message(&self) -> &[u8] {
        self.doc.message()
    }

    /// The underlying header document.
    pub fn doc(&self) -> &Kvlm {
        &self.doc
    }
}
