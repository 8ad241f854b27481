//! Maps Go package identifiers to directories on disk.
//!
//! Lookup order follows the Go toolchain: local paths, the enclosing module (`go.mod`), each
//! `GOPATH` entry, then `GOROOT`.

use crate::domain::error::LoadError;
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where to look for packages.
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    pub working_dir: PathBuf,
    pub gopath: Vec<PathBuf>,
    pub goroot: Option<PathBuf>,
}

impl ResolverConfig {
    /// Build from the process environment (`GOPATH`, `GOROOT`, current directory).
    pub fn from_env() -> Result<Self, LoadError> {
        let working_dir = env::current_dir().map_err(|source| LoadError::Io {
            path: PathBuf::from("."),
            source,
        })?;
        let gopath = match env::var_os("GOPATH") {
            Some(value) if !value.is_empty() => split_list(&value),
            _ => dirs::home_dir()
                .map(|home| vec![home.join("go")])
                .unwrap_or_default(),
        };
        let goroot = env::var_os("GOROOT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Ok(Self {
            working_dir,
            gopath,
            goroot,
        })
    }

    pub fn with_working_dir(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            ..Self::default()
        }
    }
}

fn split_list(value: &OsStr) -> Vec<PathBuf> {
    env::split_paths(value)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

/// The module declared by the nearest `go.mod`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Module {
    path: String,
    root: PathBuf,
}

/// Package identifier → directory resolver
#[derive(Debug, Clone)]
pub struct GoResolver {
    config: ResolverConfig,
    module: Option<Module>,
}

impl GoResolver {
    pub fn new(config: ResolverConfig) -> Self {
        let module = find_module(&config.working_dir);
        if let Some(m) = &module {
            debug!(module = %m.path, root = %m.root.display(), "found go.mod");
        }
        Self { config, module }
    }

    /// Returns the directory holding package `id`.
    pub fn resolve(&self, id: &str) -> Result<PathBuf, LoadError> {
        let candidates = self.candidates(id);
        for candidate in &candidates {
            if candidate.is_dir() {
                debug!(package = id, dir = %candidate.display(), "resolved package");
                return Ok(candidate.clone());
            }
        }
        Err(LoadError::NotFound {
            id: id.to_string(),
            candidates,
        })
    }

    fn candidates(&self, id: &str) -> Vec<PathBuf> {
        if is_local_import(id) {
            // `components()` drops interior `.` segments.
            return vec![self.config.working_dir.join(id).components().collect()];
        }

        let mut candidates = Vec::new();
        if let Some(module) = &self.module {
            if id == module.path {
                candidates.push(module.root.clone());
            } else if let Some(rest) = id
                .strip_prefix(module.path.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
            {
                candidates.push(module.root.join(rest));
            }
        }
        for entry in &self.config.gopath {
            candidates.push(entry.join("src").join(id));
        }
        if let Some(goroot) = &self.config.goroot {
            candidates.push(goroot.join("src").join(id));
        }
        candidates
    }
}

/// `.`, `..`, `./x`, `../x` and absolute paths are taken relative to the working directory.
fn is_local_import(id: &str) -> bool {
    id == "."
        || id == ".."
        || id.starts_with("./")
        || id.starts_with("../")
        || Path::new(id).is_absolute()
}

/// Walks up from `start` looking for a `go.mod` with a `module` directive.
fn find_module(start: &Path) -> Option<Module> {
    start.ancestors().find_map(|dir| {
        let content = std::fs::read_to_string(dir.join("go.mod")).ok()?;
        let path = parse_module_path(&content)?;
        Some(Module {
            path,
            root: dir.to_path_buf(),
        })
    })
}

/// Extracts the module path from `go.mod` content.
fn parse_module_path(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) && !rest.starts_with('"') {
            return None;
        }
        let path = rest.trim().trim_matches('"');
        (!path.is_empty()).then(|| path.to_string())
    })
}
