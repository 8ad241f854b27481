use crate::adapters::go::constraint::BuildContext;
use crate::adapters::go::parser::GoParser;
use crate::adapters::go::resolver::{GoResolver, ResolverConfig};
use crate::domain::error::LoadError;
use crate::domain::package::{Package, PackageId, SourceFile};
use crate::domain::ports::SourceLoader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Go package loader adapter
pub struct GoSourceLoader {
    resolver: GoResolver,
    build: BuildContext,
}

impl GoSourceLoader {
    /// Loader targeting the host platform.
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            resolver: GoResolver::new(config),
            build: BuildContext::host(),
        }
    }

    pub fn with_build_context(mut self, build: BuildContext) -> Self {
        self.build = build;
        self
    }

    pub fn from_env() -> Result<Self, LoadError> {
        Ok(Self::new(ResolverConfig::from_env()?).with_build_context(BuildContext::from_env()))
    }
}

impl SourceLoader for GoSourceLoader {
    fn load(&self, id: &PackageId) -> Result<Package, LoadError> {
        let dir = self.resolver.resolve(id.as_str())?;
        let paths = list_go_files(&dir)?;
        if paths.is_empty() {
            return Err(LoadError::NoGoFiles { dir });
        }

        let mut parser = GoParser::new()?;
        let mut package_name: Option<(String, PathBuf)> = None;
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            if !self.build.matches_file_name(&file_name(&path)) {
                debug!(file = %path.display(), goos = %self.build.goos, goarch = %self.build.goarch, "excluded by file name");
                continue;
            }
            let content = std::fs::read(&path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            if !self.build.matches_header(&path, &content)? {
                debug!(file = %path.display(), "excluded by build constraint");
                continue;
            }
            let parsed = parser.parse(&path, &content)?;

            if package_name.is_none() {
                package_name = Some((parsed.package_name.clone(), path.clone()));
            } else if let Some((first, first_file)) = &package_name
                && *first != parsed.package_name
            {
                return Err(LoadError::MixedPackages {
                    dir,
                    first: first.clone(),
                    first_file: first_file.clone(),
                    second: parsed.package_name,
                    second_file: path,
                });
            }

            debug!(
                file = %path.display(),
                declarations = parsed.declarations.len(),
                "parsed file"
            );
            files.push(SourceFile::new(path, content, parsed.declarations));
        }

        let Some((name, _)) = package_name else {
            return Err(LoadError::ConstraintsExcludeAll { dir });
        };
        Ok(Package {
            id: id.clone(),
            name,
            dir,
            files,
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Buildable Go files of `dir`, sorted by file name.
fn list_go_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if !entry.file_type().map_err(io_err)?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        if is_buildable_go_file(&file_name.to_string_lossy()) {
            paths.push(entry.path());
        }
    }
    paths.sort();
    Ok(paths)
}

/// `.go` files, skipping `_test.go` and names the go tool ignores (leading `_` or `.`).
fn is_buildable_go_file(file_name: &str) -> bool {
    file_name.ends_with(".go")
        && !file_name.ends_with("_test.go")
        && !file_name.starts_with('_')
        && !file_name.starts_with('.')
}
