//! In-memory ZIP extraction.
//!
//! The whole upload is already resident in memory by the time it reaches the
//! pipeline, so extraction operates over an owned byte buffer and never
//! touches the filesystem. Entries are exposed in the archive's stored
//! (central directory) order; no sorting is applied anywhere downstream.

use crate::error::{Result, ValidationError};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// A ZIP archive opened over an in-memory buffer.
pub struct Archive {
    inner: ZipArchive<Cursor<Vec<u8>>>,
}

impl Archive {
    /// Open an archive from its complete byte content.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedArchive`] when the bytes are not
    /// a readable ZIP container (truncated header, bad central directory).
    pub fn open(bytes: Vec<u8>) -> Result<Self> {
        let inner = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            ValidationError::MalformedArchive {
                reason: e.to_string(),
            }
        })?;
        Ok(Self { inner })
    }

    /// Number of entries in the archive, directories included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true when the archive holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Entry name at `index`, in stored (central directory) order.
    ///
    /// Directory entries keep their trailing `/`, which the candidate filter
    /// naturally rejects. Returns `None` only for an out-of-range index.
    #[must_use]
    pub fn name_for_index(&self, index: usize) -> Option<&str> {
        self.inner.name_for_index(index)
    }

    /// Read the full content of the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns the decompression or I/O failure as a string; the caller
    /// records it as a per-file outcome rather than aborting the batch.
    pub fn read_entry(&mut self, index: usize) -> std::result::Result<Vec<u8>, String> {
        let mut entry = self.inner.by_index(index).map_err(|e| e.to_string())?;
        let mut content = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry
            .read_to_end(&mut content)
            .map_err(|e| e.to_string())?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .expect("start zip entry");
            writer.write_all(content).expect("write zip entry");
        }
        writer.finish().expect("finish zip").into_inner()
    }

    #[test]
    fn open_rejects_garbage_bytes() {
        let err = Archive::open(b"definitely not a zip".to_vec())
            .err()
            .expect("garbage should not open");
        assert!(matches!(err, ValidationError::MalformedArchive { .. }));
    }

    #[test]
    fn open_rejects_truncated_archive() {
        let mut bytes = build_zip(&[("a.php", b"<?php")]);
        bytes.truncate(bytes.len() / 2);
        let result = Archive::open(bytes);
        assert!(matches!(
            result,
            Err(ValidationError::MalformedArchive { .. })
        ));
    }

    #[test]
    fn entry_names_preserve_stored_order() {
        let bytes = build_zip(&[
            ("zeta.php", b"<?php"),
            ("alpha.txt", b"notes"),
            ("mid/beta.php", b"<?php"),
        ]);
        let archive = Archive::open(bytes).expect("valid zip");
        let names: Vec<&str> = (0..archive.len())
            .filter_map(|index| archive.name_for_index(index))
            .collect();
        assert_eq!(names, vec!["zeta.php", "alpha.txt", "mid/beta.php"]);
    }

    #[test]
    fn every_in_range_index_has_a_name() {
        let bytes = build_zip(&[("a.php", b"<?php"), ("b.txt", b"notes")]);
        let archive = Archive::open(bytes).expect("valid zip");
        for index in 0..archive.len() {
            assert!(archive.name_for_index(index).is_some(), "index {index}");
        }
        assert!(archive.name_for_index(archive.len()).is_none());
    }

    #[test]
    fn read_entry_returns_full_content() {
        let bytes = build_zip(&[("a.php", b"<?php echo 1;")]);
        let mut archive = Archive::open(bytes).expect("valid zip");
        let content = archive.read_entry(0).expect("entry should read");
        assert_eq!(content, b"<?php echo 1;");
    }

    #[test]
    fn empty_archive_opens_with_no_entries() {
        let bytes = build_zip(&[]);
        let archive = Archive::open(bytes).expect("empty zip is still a zip");
        assert!(archive.is_empty());
        assert!(archive.name_for_index(0).is_none());
    }
}
