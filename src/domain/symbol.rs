use crate::domain::package::PackageId;
use std::fmt;
use std::path::PathBuf;

/// A located top-level function declaration.
///
/// Offsets index into the originating file's bytes; `start_offset <= end_offset` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSymbol {
    pub package: PackageId,
    pub name: String,
    pub file_path: PathBuf,
    pub start_offset: usize,
    pub end_offset: usize,
    /// 1-based line of the function name token.
    pub declaration_line: usize,
}

impl FunctionSymbol {
    /// Number of bytes covered by the declaration; zero for an inverted range.
    pub fn byte_len(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset)
    }

    /// `<package>.<name>`, used to tell same-named functions apart across packages.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }
}

/// A function whose span contains an empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub package: PackageId,
    pub name: String,
    pub file_path: PathBuf,
    pub declaration_line: usize,
}

impl Finding {
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }
}

impl From<&FunctionSymbol> for Finding {
    fn from(symbol: &FunctionSymbol) -> Self {
        Self {
            package: symbol.package.clone(),
            name: symbol.name.clone(),
            file_path: symbol.file_path.clone(),
            declaration_line: symbol.declaration_line,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} - {}:{}",
            self.package,
            self.name,
            self.file_path.display(),
            self.declaration_line
        )
    }
}
