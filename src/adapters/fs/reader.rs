use crate::domain::error::SpanError;
use crate::domain::ports::SpanReader;
use crate::domain::symbol::FunctionSymbol;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

/// File system span reader implementation
///
/// Opens the file on every call; the handle is dropped when the call returns, whichever path
/// it returns through.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSpanReader;

impl FileSpanReader {
    pub fn new() -> Self {
        Self
    }
}

impl SpanReader for FileSpanReader {
    fn read_span(&self, symbol: &FunctionSymbol) -> Result<Vec<u8>, SpanError> {
        if symbol.start_offset > symbol.end_offset {
            return Err(SpanError::InvertedRange {
                start: symbol.start_offset,
                end: symbol.end_offset,
            });
        }
        let path = &symbol.file_path;
        let mut file = File::open(path).map_err(|source| SpanError::Open {
            path: path.clone(),
            source,
        })?;
        file.seek(SeekFrom::Start(symbol.start_offset as u64))
            .map_err(|source| SpanError::Seek {
                path: path.clone(),
                offset: symbol.start_offset,
                source,
            })?;

        let expected = symbol.byte_len();
        let mut data = Vec::with_capacity(expected);
        let actual = file
            .take(expected as u64)
            .read_to_end(&mut data)
            .map_err(|source| SpanError::Read {
                path: path.clone(),
                source,
            })?;
        if actual < expected {
            return Err(SpanError::ShortRead { expected, actual });
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::package::PackageId;
    use std::path::{Path, PathBuf};

    fn symbol(path: &Path, name: &str, start: usize, end: usize) -> FunctionSymbol {
        FunctionSymbol {
            package: PackageId::new("mypkg"),
            name: name.to_string(),
            file_path: path.to_path_buf(),
            start_offset: start,
            end_offset: end,
            declaration_line: 1,
        }
    }

    #[test]
    fn test_reads_exact_span() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.go");
        std::fs::write(&path, "package a\n\nfunc Foo() {\n\n}\n").unwrap();

        let span = FileSpanReader::new()
            .read_span(&symbol(&path, "Foo", 11, 26))
            .unwrap();
        assert_eq!(span, b"func Foo() {\n\n}");
    }

    #[test]
    fn test_repeated_reads_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.go");
        std::fs::write(&path, "package a\n\nfunc Foo() {}\n").unwrap();

        let reader = FileSpanReader::new();
        let s = symbol(&path, "Foo", 11, 24);
        assert_eq!(reader.read_span(&s).unwrap(), reader.read_span(&s).unwrap());
    }

    #[test]
    fn test_empty_range_reads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.go");
        std::fs::write(&path, "package a\n").unwrap();

        let span = FileSpanReader::new().read_span(&symbol(&path, "F", 3, 3)).unwrap();
        assert!(span.is_empty());
    }

    #[test]
    fn test_range_beyond_eof_is_short_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.go");
        std::fs::write(&path, "package a\n").unwrap();

        let err = FileSpanReader::new()
            .read_span(&symbol(&path, "Baz", 5, 50))
            .unwrap_err();
        assert!(matches!(
            err,
            SpanError::ShortRead {
                expected: 45,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_seek_past_eof_is_short_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.go");
        std::fs::write(&path, "package a\n").unwrap();

        let err = FileSpanReader::new()
            .read_span(&symbol(&path, "Baz", 100, 110))
            .unwrap_err();
        assert!(matches!(err, SpanError::ShortRead { actual: 0, .. }));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = FileSpanReader::new()
            .read_span(&symbol(&PathBuf::from("/nonexistent/blanklint/a.go"), "F", 0, 4))
            .unwrap_err();
        assert!(matches!(err, SpanError::Open { .. }));
        assert!(err.to_string().starts_with("open /nonexistent/blanklint/a.go"));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = FileSpanReader::new()
            .read_span(&symbol(Path::new("a.go"), "F", 9, 4))
            .unwrap_err();
        assert!(matches!(err, SpanError::InvertedRange { start: 9, end: 4 }));
    }
}
