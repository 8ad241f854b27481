use crate::domain::package::{DeclKind, Package};
use crate::domain::symbol::FunctionSymbol;

/// Symbol scanner - enumerates top-level functions of a loaded package
#[derive(Debug, Default, Clone, Copy)]
pub struct SymbolScanner;

impl SymbolScanner {
    pub fn new() -> Self {
        Self
    }

    /// One `FunctionSymbol` per `DeclKind::Function` declaration, in file-then-declaration order.
    pub fn scan<'a>(&self, package: &'a Package) -> impl Iterator<Item = FunctionSymbol> + 'a {
        package.files.iter().flat_map(move |file| {
            file.declarations
                .iter()
                .filter(|decl| matches!(decl.kind, DeclKind::Function))
                .map(move |decl| FunctionSymbol {
                    package: package.id.clone(),
                    name: decl.name.clone(),
                    file_path: file.path.clone(),
                    start_offset: decl.start,
                    end_offset: decl.end,
                    declaration_line: file.line_of(decl.name_offset),
                })
        })
    }
}
