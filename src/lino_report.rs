//! Links Notation (Lino) Report Generator
//!
//! Writes timing results in Links Notation and converts them to Markdown.
//! Links Notation represents structured data as indented links:
//!
//! ```text
//! results:
//!   size_50000:
//!     mergesort3:
//!       family mergesort
//!       time_ms 41.250
//! ```

use std::fmt::{self, Write};
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{HarnessError, HarnessResult};

/// Algorithm every other result is compared against.
pub const REFERENCE_ALGORITHM: &str = "native";

/// One algorithm timed at one array size.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    /// Algorithm identifier (e.g. "quicksort_ip", "mergesort3", "native")
    pub algorithm: String,
    /// "quicksort", "mergesort" or "baseline"
    pub family: String,
    /// Array size in elements
    pub array_size: usize,
    /// Number of timed passes
    pub repeats: u32,
    /// Mean milliseconds per pass
    pub time_ms: f64,
    /// Whether the output was checked against the reference
    pub verified: bool,
}

/// A complete benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    /// When the run happened (RFC 3339, UTC)
    pub timestamp: String,
    pub description: String,
    pub system_info: SystemInfo,
    pub results: Vec<BenchmarkResult>,
}

/// Host the benchmark ran on.
#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    /// Threads available to the parallel baseline
    pub threads: usize,
}

impl Default for SystemInfo {
    fn default() -> Self {
        SystemInfo {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            threads: rayon::current_num_threads(),
        }
    }
}

impl BenchmarkReport {
    pub fn new(description: &str) -> Self {
        BenchmarkReport {
            timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            description: description.to_string(),
            system_info: SystemInfo::default(),
            results: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: BenchmarkResult) {
        self.results.push(result);
    }

    /// Distinct array sizes, ascending.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.results.iter().map(|r| r.array_size).collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }

    /// Results for one size, fastest first.
    pub fn ranked(&self, size: usize) -> Vec<&BenchmarkResult> {
        let mut ranked: Vec<&BenchmarkResult> =
            self.results.iter().filter(|r| r.array_size == size).collect();
        ranked.sort_by(|a, b| a.time_ms.total_cmp(&b.time_ms));
        ranked
    }

    /// How many times faster `result` is than the reference at the same size.
    pub fn speedup_vs_reference(&self, result: &BenchmarkResult) -> Option<f64> {
        let reference = self
            .results
            .iter()
            .find(|r| r.array_size == result.array_size && r.algorithm == REFERENCE_ALGORITHM)?;
        if result.time_ms > 0.0 {
            Some(reference.time_ms / result.time_ms)
        } else {
            None
        }
    }

    /// Generate the report in Links Notation format
    pub fn to_lino(&self) -> String {
        let mut output = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_lino(&mut output);
        output
    }

    fn write_lino(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "benchmark_report:")?;
        writeln!(out, "  timestamp '{}'", self.timestamp)?;
        writeln!(out, "  description '{}'", escape_lino_string(&self.description))?;

        writeln!(out)?;
        writeln!(out, "system_info:")?;
        writeln!(out, "  os '{}'", escape_lino_string(&self.system_info.os))?;
        writeln!(out, "  arch '{}'", escape_lino_string(&self.system_info.arch))?;
        writeln!(out, "  threads {}", self.system_info.threads)?;

        let sizes = self.sizes();

        writeln!(out)?;
        writeln!(out, "results:")?;
        for &size in &sizes {
            writeln!(out, "  size_{}:", size)?;
            for result in self.results.iter().filter(|r| r.array_size == size) {
                writeln!(out, "    {}:", result.algorithm)?;
                writeln!(out, "      family {}", result.family)?;
                writeln!(out, "      repeats {}", result.repeats)?;
                writeln!(out, "      time_ms {:.3}", result.time_ms)?;
                writeln!(out, "      verified {}", result.verified)?;
            }
        }

        writeln!(out)?;
        writeln!(out, "comparisons:")?;
        for &size in &sizes {
            writeln!(out, "  size_{}:", size)?;
            for (rank, result) in self.ranked(size).into_iter().enumerate() {
                writeln!(out, "    {}_vs_{}:", result.algorithm, REFERENCE_ALGORITHM)?;
                writeln!(out, "      rank {}", rank + 1)?;
                if let Some(speedup) = self.speedup_vs_reference(result) {
                    writeln!(out, "      speedup {:.2}", speedup)?;
                }
            }
        }
        Ok(())
    }

    /// Save the report to a file in Links Notation format
    pub fn save_lino(&self, path: &Path) -> HarnessResult<()> {
        write_report(path, self.to_lino())
    }

    /// Generate a markdown summary of the report
    pub fn to_markdown_table(&self) -> String {
        let mut output = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_markdown(&mut output);
        output
    }

    fn write_markdown(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "# Sorting Benchmark Report")?;
        writeln!(out)?;
        writeln!(out, "**Timestamp:** {}", self.timestamp)?;
        writeln!(out, "**Description:** {}", self.description)?;
        writeln!(out)?;

        writeln!(out, "## System Information")?;
        writeln!(out)?;
        writeln!(out, "| Property | Value |")?;
        writeln!(out, "|----------|-------|")?;
        writeln!(out, "| OS | {} |", self.system_info.os)?;
        writeln!(out, "| Arch | {} |", self.system_info.arch)?;
        writeln!(out, "| Threads | {} |", self.system_info.threads)?;
        writeln!(out)?;

        for size in self.sizes() {
            writeln!(out, "## {} elements", format_size(size))?;
            writeln!(out)?;
            writeln!(out, "| Rank | Algorithm | Family | ms/pass | vs {} |", REFERENCE_ALGORITHM)?;
            writeln!(out, "|------|-----------|--------|---------|-----------|")?;
            for (rank, result) in self.ranked(size).into_iter().enumerate() {
                let speedup = self
                    .speedup_vs_reference(result)
                    .map(|s| format!("{:.2}x", s))
                    .unwrap_or_else(|| "N/A".to_string());
                writeln!(
                    out,
                    "| {} | {} | {} | {:.3} | {} |",
                    rank + 1,
                    result.algorithm,
                    result.family,
                    result.time_ms,
                    speedup
                )?;
            }
            writeln!(out)?;
        }

        writeln!(out, "---")?;
        writeln!(out, "*Speedup > 1.00x means faster than the {} baseline*", REFERENCE_ALGORITHM)?;
        Ok(())
    }

    /// Save the report as a markdown file
    pub fn save_markdown(&self, path: &Path) -> HarnessResult<()> {
        write_report(path, self.to_markdown_table())
    }
}

fn write_report(path: &Path, content: String) -> HarnessResult<()> {
    fs::write(path, content).map_err(|source| HarnessError::Report {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), "report written");
    Ok(())
}

/// Escape a string for use in Links Notation (handle single quotes)
fn escape_lino_string(s: &str) -> String {
    s.replace('\'', "\\'")
}

/// Format a size as a human-readable string (e.g., "1K", "1M")
fn format_size(size: usize) -> String {
    if size >= 1_000_000 {
        format!("{}M", size / 1_000_000)
    } else if size >= 1_000 {
        format!("{}K", size / 1_000)
    } else {
        size.to_string()
    }
}

/// Indentation width in spaces, or `None` for a blank line.
fn indent_of(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        None
    } else {
        Some(line.len() - trimmed.len())
    }
}

/// Parse a report written by [`BenchmarkReport::to_lino`].
///
/// Only the metadata and the `results:` section are read back; comparisons
/// are derived data. Returns `None` when no results were found.
pub fn parse_lino_report(content: &str) -> Option<BenchmarkReport> {
    let mut report = BenchmarkReport::new("Parsed report");
    let mut section = "";
    let mut current_size: Option<usize> = None;
    let mut current: Option<BenchmarkResult> = None;

    for line in content.lines() {
        let Some(indent) = indent_of(line) else {
            continue;
        };
        let trimmed = line.trim();

        if indent == 0 {
            report.results.extend(current.take());
            section = trimmed.trim_end_matches(':');
            current_size = None;
            continue;
        }

        match section {
            "benchmark_report" => {
                if let Some(ts) = extract_quoted_value(trimmed, "timestamp") {
                    report.timestamp = ts;
                } else if let Some(desc) = extract_quoted_value(trimmed, "description") {
                    report.description = desc;
                }
            }
            "system_info" => {
                if let Some(os) = extract_quoted_value(trimmed, "os") {
                    report.system_info.os = os;
                } else if let Some(arch) = extract_quoted_value(trimmed, "arch") {
                    report.system_info.arch = arch;
                } else if let Some(threads) = trimmed.strip_prefix("threads ") {
                    if let Ok(threads) = threads.parse() {
                        report.system_info.threads = threads;
                    }
                }
            }
            "results" => match indent {
                2 => {
                    report.results.extend(current.take());
                    current_size = trimmed
                        .strip_prefix("size_")
                        .and_then(|s| s.strip_suffix(':'))
                        .and_then(|s| s.parse().ok());
                }
                4 => {
                    report.results.extend(current.take());
                    if let (Some(size), Some(algorithm)) = (current_size, trimmed.strip_suffix(':')) {
                        current = Some(BenchmarkResult {
                            algorithm: algorithm.to_string(),
                            family: String::new(),
                            array_size: size,
                            repeats: 0,
                            time_ms: 0.0,
                            verified: false,
                        });
                    }
                }
                _ => {
                    if let Some(ref mut result) = current {
                        apply_property(result, trimmed);
                    }
                }
            },
            _ => {}
        }
    }

    report.results.extend(current);

    if report.results.is_empty() {
        None
    } else {
        Some(report)
    }
}

fn apply_property(result: &mut BenchmarkResult, line: &str) {
    let Some((key, value)) = line.split_once(' ') else {
        return;
    };
    match key {
        "family" => result.family = value.to_string(),
        "repeats" => result.repeats = value.parse().unwrap_or(result.repeats),
        "time_ms" => result.time_ms = value.parse().unwrap_or(result.time_ms),
        "verified" => result.verified = value == "true",
        _ => {}
    }
}

fn extract_quoted_value(line: &str, key: &str) -> Option<String> {
    let value = line.strip_prefix(key)?.trim();
    let inner = value.strip_prefix('\'')?.strip_suffix('\'')?;
    Some(inner.replace("\\'", "'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(algorithm: &str, family: &str, array_size: usize, time_ms: f64) -> BenchmarkResult {
        BenchmarkResult {
            algorithm: algorithm.to_string(),
            family: family.to_string(),
            array_size,
            repeats: 10,
            time_ms,
            verified: true,
        }
    }

    fn sample_report() -> BenchmarkReport {
        let mut report = BenchmarkReport::new("Test benchmark");
        report.add_result(result("native", "baseline", 1024, 0.5));
        report.add_result(result("mergesort3", "mergesort", 1024, 2.0));
        report.add_result(result("quicksort_ip", "quicksort", 1024, 1.0));
        report.add_result(result("native", "baseline", 50_000, 16.0));
        report
    }

    #[test]
    fn test_report_to_lino() {
        let lino = sample_report().to_lino();
        assert!(lino.contains("benchmark_report:"));
        assert!(lino.contains("  size_1024:"));
        assert!(lino.contains("    mergesort3:"));
        assert!(lino.contains("      time_ms 2.000"));
        assert!(lino.contains("    quicksort_ip_vs_native:"));
        assert!(lino.contains("      speedup 0.50"));
    }

    #[test]
    fn test_ranked_fastest_first() {
        let report = sample_report();
        let names: Vec<&str> = report.ranked(1024).iter().map(|r| r.algorithm.as_str()).collect();
        assert_eq!(names, vec!["native", "quicksort_ip", "mergesort3"]);
    }

    #[test]
    fn test_speedup_vs_reference() {
        let report = sample_report();
        let mergesort = &report.results[1];
        assert_eq!(report.speedup_vs_reference(mergesort), Some(0.25));

        let orphan = result("mergesort", "mergesort", 7, 1.0);
        assert_eq!(report.speedup_vs_reference(&orphan), None);
    }

    #[test]
    fn test_markdown_table() {
        let markdown = sample_report().to_markdown_table();
        assert!(markdown.contains("# Sorting Benchmark Report"));
        assert!(markdown.contains("## 1K elements"));
        assert!(markdown.contains("## 50K elements"));
        assert!(markdown.contains("| 1 | native | baseline | 0.500 | 1.00x |"));
        assert!(markdown.contains("| 3 | mergesort3 | mergesort | 2.000 | 0.25x |"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500");
        assert_eq!(format_size(1000), "1K");
        assert_eq!(format_size(1024), "1K");
        assert_eq!(format_size(1_000_000), "1M");
    }

    #[test]
    fn test_escape_lino_string() {
        assert_eq!(escape_lino_string("hello"), "hello");
        assert_eq!(escape_lino_string("it's"), "it\\'s");
    }

    #[test]
    fn test_parse_lino_report() {
        let mut report = sample_report();
        report.description = "Val's run".to_string();
        report.system_info.threads = 3;

        let parsed = parse_lino_report(&report.to_lino()).unwrap();
        assert_eq!(parsed.description, "Val's run");
        assert_eq!(parsed.timestamp, report.timestamp);
        assert_eq!(parsed.system_info.threads, 3);
        assert_eq!(parsed.results, report_sorted_by_size(&report));
    }

    #[test]
    fn test_parse_empty_report() {
        assert!(parse_lino_report("benchmark_report:\n  description 'x'\n").is_none());
    }

    #[test]
    fn test_save_and_load_files() {
        let dir = tempfile::tempdir().unwrap();
        let lino_path = dir.path().join("report.lino");
        let md_path = dir.path().join("report.md");

        let report = sample_report();
        report.save_lino(&lino_path).unwrap();
        report.save_markdown(&md_path).unwrap();

        let content = fs::read_to_string(&lino_path).unwrap();
        assert_eq!(parse_lino_report(&content).unwrap().results.len(), 4);
        assert!(fs::read_to_string(&md_path).unwrap().contains("mergesort3"));
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.lino");
        let err = sample_report().save_lino(&path).unwrap_err();
        assert!(matches!(err, HarnessError::Report { .. }));
    }

    /// `to_lino` groups results by size; the order within a size is kept.
    fn report_sorted_by_size(report: &BenchmarkReport) -> Vec<BenchmarkResult> {
        let mut results = report.results.clone();
        results.sort_by_key(|r| r.array_size);
        results
    }
}
