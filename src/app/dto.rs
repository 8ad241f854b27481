/// Counters for one audit run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub packages: usize,
    pub files: usize,
    pub functions: usize,
    pub findings: usize,
    /// Symbols whose span could not be read.
    pub symbol_errors: usize,
    /// Loading failed and nothing was scanned.
    pub load_failed: bool,
}
