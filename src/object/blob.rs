/// An opaque byte payload with no internal structure.
///
/// Any byte sequence is a valid blob; serialization is the identity.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Blob {
    data: Vec<u8>,
}

impl Blob {
    /// Create a blob owning the given bytes.
    pub fn new(data: Vec<u8>) -> Blob {
        Blob { data }
    }

    /// Store payload bytes verbatim.
    pub fn deserialize(payload: &[u8]) -> Blob {
        Blob {
            data: payload.to_vec(),
        }
    }

    /// Return the stored bytes verbatim.
    pub fn serialize(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// Borrow the stored bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let b = Blob::deserialize(b"hello\n");
        assert_eq!(b.serialize(), b"hello\n");
        assert_eq!(b.data(), b"hello\n");
        assert_eq!(b.len(), 6);
        assert!(!b.is_empty());
    }

    #[test]
    fn empty() {
        let b = Blob::new(Vec::new());
        assert_eq!(b.serialize(), b"");
        assert!(b.is_empty());
    }

    #[test]
    fn arbitrary_bytes_are_valid() {
        let raw: Vec<u8> = (0u8..=255).collect();
        let b = Blob::deserialize(&raw);
        assert_eq!(b.serialize(), raw);
    }
}
