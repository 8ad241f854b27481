use crate::adapters::fs::reader::FileSpanReader;
use crate::adapters::go::loader::GoSourceLoader;
use crate::adapters::report::text::TextReport;
use crate::app::dto::AuditSummary;
use crate::app::engine::AuditEngine;
use crate::domain::package::PackageId;
use crate::domain::ports::{ReportSink, SourceLoader};
use anyhow::{Context as _, Result};
use clap::Parser;
use std::io::{self, Write};

/// Report Go functions whose bodies contain empty lines.
#[derive(Debug, Parser)]
#[command(name = "blanklint", version, about)]
pub struct Cli {
    /// Packages to audit: import paths, or local directories such as `./pkg`.
    #[arg(value_name = "PACKAGE")]
    pub packages: Vec<String>,
}

impl Cli {
    pub fn package_ids(&self) -> Vec<PackageId> {
        self.packages.iter().map(PackageId::new).collect()
    }
}

/// Runs an audit with the Go loader resolved from the environment, reporting to `out`.
pub fn run(cli: &Cli, out: impl Write) -> Result<AuditSummary> {
    let mut report = TextReport::new(out);
    let loader = match GoSourceLoader::from_env() {
        Ok(loader) => loader,
        Err(err) => {
            report
                .load_error(&err)
                .context("Failed to write report")?;
            return Ok(AuditSummary {
                load_failed: true,
                ..AuditSummary::default()
            });
        }
    };
    run_with(cli, Box::new(loader), &mut report)
}

/// Runs an audit with an explicit loader.
pub fn run_with(
    cli: &Cli,
    loader: Box<dyn SourceLoader>,
    report: &mut dyn ReportSink,
) -> Result<AuditSummary> {
    let engine = AuditEngine::new(loader, Box::new(FileSpanReader::new()));
    engine
        .run(&cli.package_ids(), report)
        .context("Failed to write report")
}

/// Entry point used by the binary: stdout, line buffered through a lock.
pub fn run_stdout(cli: &Cli) -> Result<AuditSummary> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    let summary = run(cli, &mut lock)?;
    lock.flush().context("Failed to flush stdout")?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::go::resolver::ResolverConfig;
    use std::fs;

    #[test]
    fn test_parses_positional_packages() {
        let cli = Cli::try_parse_from(["blanklint", "a", "./b", "example.com/c"]).unwrap();
        let ids: Vec<_> = cli.package_ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["a", "./b", "example.com/c"]);
    }

    #[test]
    fn test_no_packages_is_accepted() {
        let cli = Cli::try_parse_from(["blanklint"]).unwrap();
        assert!(cli.packages.is_empty());
    }

    #[test]
    fn test_run_with_go_loader() {
        let dir = tempfile::tempdir().unwrap();
        let pkg_dir = dir.path().join("p");
        fs::create_dir(&pkg_dir).unwrap();
        fs::write(pkg_dir.join("p.go"), "package p\n\nfunc Foo() {\n\n}\n").unwrap();

        let cli = Cli::try_parse_from(["blanklint", "./p"]).unwrap();
        let loader = GoSourceLoader::new(ResolverConfig::with_working_dir(dir.path()));
        let mut report = TextReport::new(Vec::new());
        let summary = run_with(&cli, Box::new(loader), &mut report).unwrap();

        let out = String::from_utf8(report.into_inner()).unwrap();
        let expected = format!("./p.Foo - {}:3\n", pkg_dir.join("p.go").display());
        assert_eq!(out, expected);
        assert_eq!(summary.findings, 1);
    }
}
