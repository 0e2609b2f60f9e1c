//! Zip-family container re-packing.

use crate::deflate::deflate;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::collections::BTreeSet;
use std::io::{Cursor, Read, Write};
use tracing::instrument;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Rebuild a zip-family container with every file entry deflated.
///
/// Each non-directory entry is read, its bytes deflated at `level`, and the
/// result written to a fresh container under the same path, itself stored
/// with the DEFLATE method at the same level. Directory entries in the input
/// are skipped; the directories that file paths imply are recreated instead.
#[instrument(level = "debug", skip(input), fields(entries))]
pub(crate) fn repack(input: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(input)).or_raise(|| ErrorKind::Archive)?;
    tracing::Span::current().record("entries", archive.len());

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(i64::from(level.min(9))));
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut directories = BTreeSet::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).or_raise(|| ErrorKind::Archive)?;
        if entry.is_dir() {
            continue;
        }
        let path = entry.name().to_string();
        let mut content = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry.read_to_end(&mut content).or_raise(|| ErrorKind::Archive)?;

        for directory in parent_directories(&path) {
            if directories.insert(directory.clone()) {
                writer.add_directory(directory, options).or_raise(|| ErrorKind::Io)?;
            }
        }
        writer.start_file(path, options).or_raise(|| ErrorKind::Io)?;
        writer.write_all(&deflate(&content, level)?).or_raise(|| ErrorKind::Io)?;
    }

    Ok(writer.finish().or_raise(|| ErrorKind::Io)?.into_inner())
}

/// Every ancestor directory of a zip path, outermost first, each with a
/// trailing slash: `a/b/c.txt` → `a/`, `a/b/`.
fn parent_directories(path: &str) -> Vec<String> {
    let mut directories = Vec::new();
    let mut end = 0;
    while let Some(offset) = path[end..].find('/') {
        end += offset + 1;
        // Skip empty segments from leading or doubled slashes.
        if end > 1 && !path[..end - 1].ends_with('/') {
            directories.push(path[..end].to_string());
        }
    }
    directories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inflate;
    use rstest::rstest;

    fn zip_of(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, content) in entries {
            match content {
                Some(content) => {
                    writer.start_file(*name, options).unwrap();
                    writer.write_all(content).unwrap();
                },
                None => writer.add_directory(*name, options).unwrap(),
            }
        }
        writer.finish().unwrap().into_inner()
    }

    fn read_all(bytes: &[u8]) -> Vec<(String, bool, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut entry = archive.by_index(i).unwrap();
                let mut content = Vec::new();
                entry.read_to_end(&mut content).unwrap();
                (entry.name().to_string(), entry.is_dir(), content)
            })
            .collect()
    }

    #[rstest]
    #[case("file.txt", &[])]
    #[case("a/file.txt", &["a/"])]
    #[case("a/b/c.txt", &["a/", "a/b/"])]
    #[case("/abs/file.txt", &["/abs/"])]
    fn test_parent_directories(#[case] path: &str, #[case] expected: &[&str]) {
        assert_eq!(parent_directories(path), expected);
    }

    #[test]
    fn test_repack_deflates_every_file() {
        let readme = b"read me, read me, read me, read me".as_slice();
        let data = b"0123456789".repeat(50);
        let input = zip_of(&[("docs/", None), ("docs/readme.txt", Some(readme)), ("data.bin", Some(data.as_slice()))]);

        let output = repack(&input, 7).unwrap();
        let entries = read_all(&output);

        let files: Vec<_> = entries.iter().filter(|(_, is_dir, _)| !is_dir).collect();
        assert_eq!(files.len(), 2);
        for (name, _, content) in files {
            let expected: &[u8] = if name == "docs/readme.txt" { readme } else { &data };
            assert_eq!(inflate(content).unwrap(), expected, "entry {name}");
        }
    }

    #[test]
    fn test_repack_recreates_implied_directories() {
        // No explicit directory entries in the input at all.
        let input = zip_of(&[("a/b/one.txt", Some(b"1".as_slice())), ("a/two.txt", Some(b"2".as_slice()))]);
        let output = repack(&input, 7).unwrap();
        let directories: Vec<_> =
            read_all(&output).into_iter().filter(|(_, is_dir, _)| *is_dir).map(|(name, _, _)| name).collect();
        assert_eq!(directories, vec!["a/".to_string(), "a/b/".to_string()]);
    }

    #[test]
    fn test_repack_empty_archive() {
        let output = repack(&zip_of(&[]), 7).unwrap();
        assert!(read_all(&output).is_empty());
    }

    #[test]
    fn test_repack_corrupt_archive() {
        let mut input = zip_of(&[("file.txt", Some(b"content".as_slice()))]);
        // Destroy the end-of-central-directory record.
        let len = input.len();
        input.truncate(len - 10);
        let err = repack(&input, 7).unwrap_err();
        assert_eq!(*err, ErrorKind::Archive);
    }
}
