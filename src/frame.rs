//! Object framing and content hashing.
//!
//! The framed representation of an object is
//! `<type tag> ' ' <decimal payload length> NUL <payload>`. The object ID
//! is the SHA-1 digest of those framed bytes, header included. That is
//! why retagging a payload under a different type yields a different ID
//! even when the payload bytes are identical.

use sha1::{Digest, Sha1};

use crate::error::{Error, Result};
use crate::object::{Id, Kind};

/// Produce the canonical framed byte sequence for a payload.
pub fn frame(kind: Kind, payload: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(payload.len() + 16);

    framed.extend_from_slice(kind.tag());
    framed.push(b' ');
    framed.extend_from_slice(payload.len().to_string().as_bytes());
    framed.push(b'\0');
    framed.extend_from_slice(payload);

    framed
}

/// Compute the object ID for a framed byte sequence.
pub fn id_of(framed: &[u8]) -> Id {
    let mut hasher = Sha1::new();
    hasher.update(framed);

    let digest = hasher.finalize();

    // We use unwrap here because the hasher is guaranteed
    // to return a 20-byte slice.
    Id::new(digest.as_ref()).unwrap()
}

/// Split a framed byte sequence back into its type and payload.
///
/// The declared length must match the actual payload length; a mismatch
/// fails with [`Error::MalformedObject`], as do missing or unparseable
/// header fields. A type tag outside the known set fails with
/// [`Error::UnknownObjectType`].
pub fn unframe(framed: &[u8]) -> Result<(Kind, &[u8])> {
    let space = framed
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| Error::MalformedObject("missing space after type tag".to_string()))?;

    let kind = Kind::from_tag(&framed[..space])?;

    let rest = &framed[space + 1..];
    let nul = rest
        .iter()
        .position(|&b| b == b'\0')
        .ok_or_else(|| Error::MalformedObject("missing NUL after declared length".to_string()))?;

    let declared: usize = std::str::from_utf8(&rest[..nul])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            Error::MalformedObject(format!(
                "length field `{}` is not a decimal number",
                String::from_utf8_lossy(&rest[..nul])
            ))
        })?;

    let payload = &rest[nul + 1..];
    if payload.len() != declared {
        return Err(Error::MalformedObject(format!(
            "declared length {} but payload is {} bytes",
            declared,
            payload.len()
        )));
    }

    Ok((kind, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_blob() {
        assert_eq!(frame(Kind::Blob, b"hello\n"), b"blob 6\x00hello\n");
        assert_eq!(frame(Kind::Tree, b""), b"tree 0\x00");
    }

    #[test]
    fn id_of_known_blob() {
        // $ echo 'hello' | git hash-object --stdin
        // ce013625030ba8dba906f756967f9e9ca394464a
        let framed = frame(Kind::Blob, b"hello\n");
        assert_eq!(
            id_of(&framed).to_string(),
            "ce013625030ba8dba906f756967f9e9ca394464a"
        );
    }

    #[test]
    fn id_is_deterministic() {
        let framed = frame(Kind::Blob, b"same content");
        assert_eq!(id_of(&framed), id_of(&framed));
    }

    #[test]
    fn id_depends_on_type_tag() {
        let as_blob = frame(Kind::Blob, b"payload");
        let as_tag = frame(Kind::Tag, b"payload");
        assert_ne!(id_of(&as_blob), id_of(&as_tag));
    }

    #[test]
    fn unframe_round_trip() {
        let framed = frame(Kind::Commit, b"tree abc\n\nmessage\n");
        let (kind, payload) = unframe(&framed).unwrap();

        assert_eq!(kind, Kind::Commit);
        assert_eq!(payload, b"tree abc\n\nmessage\n");
    }

    #[test]
    fn unframe_empty_payload() {
        let (kind, payload) = unframe(b"blob 0\x00").unwrap();
        assert_eq!(kind, Kind::Blob);
        assert_eq!(payload, b"");
    }

    #[test]
    fn unframe_unknown_type() {
        let err = unframe(b"foo 3\x00abc").unwrap_err();
        match err {
            Error::UnknownObjectType(tag) => assert_eq!(tag, "foo"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn unframe_length_mismatch() {
        let err = unframe(b"blob 6\x00hello").unwrap_err();
        match err {
            Error::MalformedObject(msg) => {
                assert_eq!(msg, "declared length 6 but payload is 5 bytes")
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn unframe_missing_space() {
        let err = unframe(b"blob6\x00hello").unwrap_err();
        match err {
            Error::MalformedObject(_) => (),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn unframe_missing_nul() {
        let err = unframe(b"blob 6 hello").unwrap_err();
        match err {
            Error::MalformedObject(_) => (),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn unframe_bad_length_digits() {
        let err = unframe(b"blob six\x00hello").unwrap_err();
        match err {
            Error::MalformedObject(msg) => assert!(msg.contains("six")),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
