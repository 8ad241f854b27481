//! Loaded package model: the contract between a source loader and the audit pipeline.
//!
//! A [`Package`] owns its files; each [`SourceFile`] carries its raw bytes, a [`LineIndex`]
//! for offset → line lookups, and the top-level [`Declaration`]s the loader found in it.
//! Everything here is read-only to the scanner.

use std::fmt;
use std::path::PathBuf;

/// Package identifier as supplied on the command line (import path or local directory).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One compilation unit: an identifier plus its files in file-name order.
#[derive(Debug, Clone)]
pub struct Package {
    pub id: PackageId,
    /// Package clause name shared by every file (e.g. `main`).
    pub name: String,
    pub dir: PathBuf,
    pub files: Vec<SourceFile>,
}

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: Vec<u8>,
    pub line_index: LineIndex,
    /// Top-level declarations in source order.
    pub declarations: Vec<Declaration>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: Vec<u8>, declarations: Vec<Declaration>) -> Self {
        let line_index = LineIndex::new(&content);
        Self {
            path: path.into(),
            content,
            line_index,
            declarations,
        }
    }

    /// 1-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_index.line_of(offset)
    }
}

/// Byte offset → 1-based line lookup built from the positions of `\n` bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset at which each line starts; `line_starts[0]` is always 0.
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &[u8]) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .iter()
                .enumerate()
                .filter(|&(_, &b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// Returns the 1-based line for `offset`. Offsets past the end map to the last line.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(insert_at) => insert_at,
        }
    }
}

/// Kind of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// Plain `func` without a receiver.
    Function,
    /// `func` with a receiver; bound to its type, not to package scope.
    Method,
    Type,
    Variable,
    Constant,
}

/// A top-level declaration located by byte offsets within its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: String,
    /// Offset of the first byte of the declaration (the `func` keyword for functions).
    pub start: usize,
    /// Offset one past the last byte of the declaration.
    pub end: usize,
    /// Offset of the declared name token.
    pub name_offset: usize,
}
