use crate::domain::error::{LoadError, SpanError};
use crate::domain::ports::ReportSink;
use crate::domain::symbol::{Finding, FunctionSymbol};
use std::io::{self, Write};

/// Line-oriented text report.
///
/// Findings and both kinds of error share one stream, one line each, written in the order they
/// arrive.
#[derive(Debug)]
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TextReport<W> {
    fn finding(&mut self, finding: &Finding) -> io::Result<()> {
        writeln!(self.out, "{finding}")
    }

    fn symbol_error(&mut self, symbol: &FunctionSymbol, error: &SpanError) -> io::Result<()> {
        writeln!(self.out, "error handling funcs for {}: {}", symbol.name, error)
    }

    fn load_error(&mut self, error: &LoadError) -> io::Result<()> {
        writeln!(self.out, "error loading code {error}")
    }
}
