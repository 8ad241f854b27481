use crate::domain::error::{LoadError, SpanError};
use crate::domain::package::{Package, PackageId};
use crate::domain::symbol::{Finding, FunctionSymbol};
use std::io;

/// Package loader port (implemented by Infrastructure)
pub trait SourceLoader {
    /// Resolve and parse one package.
    fn load(&self, id: &PackageId) -> Result<Package, LoadError>;
}

/// Span reader port: fetches the literal bytes of a function declaration.
pub trait SpanReader {
    /// Reads exactly `symbol.end_offset - symbol.start_offset` bytes from `symbol.file_path`.
    fn read_span(&self, symbol: &FunctionSymbol) -> Result<Vec<u8>, SpanError>;
}

/// Report output port.
pub trait ReportSink {
    fn finding(&mut self, finding: &Finding) -> io::Result<()>;

    /// A single symbol could not be extracted; the scan keeps going.
    fn symbol_error(&mut self, symbol: &FunctionSymbol, error: &SpanError) -> io::Result<()>;

    /// Loading failed; nothing else will be reported.
    fn load_error(&mut self, error: &LoadError) -> io::Result<()>;
}
