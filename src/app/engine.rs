use crate::app::dto::AuditSummary;
use crate::domain::detector::BlankLineDetector;
use crate::domain::error::LoadError;
use crate::domain::package::{Package, PackageId};
use crate::domain::ports::{ReportSink, SourceLoader, SpanReader};
use crate::domain::scanner::SymbolScanner;
use crate::domain::symbol::Finding;
use std::collections::HashSet;
use std::io;
use tracing::{debug, info, warn};

/// Audit engine - drives loader → scanner → reader → detector → report
pub struct AuditEngine {
    loader: Box<dyn SourceLoader>,
    reader: Box<dyn SpanReader>,
    scanner: SymbolScanner,
    detector: BlankLineDetector,
}

impl AuditEngine {
    pub fn new(loader: Box<dyn SourceLoader>, reader: Box<dyn SpanReader>) -> Self {
        Self {
            loader,
            reader,
            scanner: SymbolScanner::new(),
            detector: BlankLineDetector::new(),
        }
    }

    /// Audits `ids` in order, writing findings and errors to `sink`.
    ///
    /// Every package is loaded before any is scanned: a single load failure is reported once and
    /// nothing else is emitted. Span read failures are reported per symbol and the scan goes on.
    /// The returned error is only ever a failure to write to `sink`.
    pub fn run(&self, ids: &[PackageId], sink: &mut dyn ReportSink) -> io::Result<AuditSummary> {
        let mut summary = AuditSummary::default();

        let packages = match self.load_all(ids) {
            Ok(packages) => packages,
            Err(err) => {
                warn!(error = %err, "failed to load packages");
                sink.load_error(&err)?;
                summary.load_failed = true;
                return Ok(summary);
            }
        };

        for package in &packages {
            self.audit_package(package, sink, &mut summary)?;
        }

        info!(
            packages = summary.packages,
            functions = summary.functions,
            findings = summary.findings,
            symbol_errors = summary.symbol_errors,
            "audit complete"
        );
        Ok(summary)
    }

    /// Loads each distinct id once, in first-seen order.
    fn load_all(&self, ids: &[PackageId]) -> Result<Vec<Package>, LoadError> {
        if ids.is_empty() {
            return Err(LoadError::NoPackages);
        }
        let mut seen = HashSet::new();
        ids.iter()
            .filter(|id| seen.insert(id.as_str()))
            .map(|id| {
                debug!(package = %id, "loading package");
                self.loader.load(id)
            })
            .collect()
    }

    fn audit_package(
        &self,
        package: &Package,
        sink: &mut dyn ReportSink,
        summary: &mut AuditSummary,
    ) -> io::Result<()> {
        summary.packages += 1;
        summary.files += package.files.len();

        for symbol in self.scanner.scan(package) {
            summary.functions += 1;
            let span = match self.reader.read_span(&symbol) {
                Ok(span) => span,
                Err(err) => {
                    warn!(function = %symbol.qualified_name(), error = %err, "failed to read span");
                    summary.symbol_errors += 1;
                    sink.symbol_error(&symbol, &err)?;
                    continue;
                }
            };

            if self.detector.has_empty_line(&span) {
                debug!(function = %symbol.qualified_name(), line = symbol.declaration_line, "empty line");
                summary.findings += 1;
                sink.finding(&Finding::from(&symbol))?;
            }
        }
        Ok(())
    }
}
