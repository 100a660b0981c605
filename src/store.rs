//! The loose-object store: read and write paths for a [`Repository`].
//!
//! An object lives at `objects/<first 2 hex chars>/<remaining 38>`, its
//! contents the zlib-compressed framed bytes. The two-character prefix
//! gives 256-way fan-out so no single directory grows unbounded. The
//! store is append-only: there is no update or delete, and a path that
//! already exists is trusted to hold the right bytes (content addressing
//! means identical content hashes to the identical path).

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::frame;
use crate::object::{Id, Object};
use crate::repo::Repository;
use crate::zlib;

impl Repository {
    /// Write an object to the store and return its ID.
    ///
    /// A no-op if the object is already present. New objects are written
    /// to a temporary file in the fan-out directory and renamed into
    /// place, so a concurrent reader never observes a partially-written
    /// object.
    pub fn put_object(&self, object: &Object) -> Result<Id> {
        let framed = frame::frame(object.kind(), &object.serialize());
        let id = frame::id_of(&framed);

        let hex = id.to_string();
        let dir = self.objects_dir().join(&hex[..2]);
        let path = dir.join(&hex[2..]);
        if path.exists() {
            return Ok(id);
        }

        fs::create_dir_all(&dir)?;

        let compressed = zlib::compress(&framed)?;

        let mut temp = NamedTempFile::new_in(&dir)?;
        temp.write_all(&compressed)?;
        temp.persist(&path).map_err(|err| Error::Io(err.error))?;

        Ok(id)
    }

    /// Read the object stored under `id`.
    ///
    /// Fails with [`Error::ObjectNotFound`] if no entry exists,
    /// [`Error::CorruptObject`] if the entry does not decompress,
    /// [`Error::MalformedObject`] if the frame header disagrees with the
    /// payload, and [`Error::UnknownObjectType`] for an unrecognized
    /// type tag.
    pub fn read_object(&self, id: &Id) -> Result<Object> {
        let hex = id.to_string();
        let path = self.objects_dir().join(&hex[..2]).join(&hex[2..]);

        let compressed = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::ObjectNotFound(hex))
            }
            Err(err) => return Err(err.into()),
        };

        let framed = zlib::decompress(&compressed)?;
        let (kind, payload) = frame::unframe(&framed)?;

        Object::deserialize(kind, payload)
    }

    /// The store path an object ID maps to.
    pub fn object_path(&self, id: &Id) -> PathBuf {
        let hex = id.to_string();
        self.objects_dir().join(&hex[..2]).join(&hex[2..])
    }
}
