//! On-disk Go workspaces for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use blanklint::adapters::go::loader::GoSourceLoader;
use blanklint::adapters::go::resolver::ResolverConfig;
use tempfile::TempDir;

/// A temporary directory laid out as a Go workspace.
pub struct GoWorkspace {
    dir: TempDir,
}

impl GoWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Declares the workspace root as module `path`.
    pub fn with_module(self, path: &str) -> Self {
        self.with_file("go.mod", &format!("module {path}\n\ngo 1.21\n"))
    }

    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create package dir");
        }
        fs::write(&path, content).expect("write fixture file");
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn file_path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Loader resolving from the workspace root with no GOPATH or GOROOT.
    pub fn loader(&self) -> GoSourceLoader {
        GoSourceLoader::new(ResolverConfig::with_working_dir(self.root()))
    }
}

impl Default for GoWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
