// src/output/writer.rs
//! Executes output operations by performing actual I/O.

use super::types::*;
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Delivers the output plan, performing all I/O operations.
///
/// Every operation is attempted; failures are collected in the report
/// rather than aborting the remaining operations.
pub fn deliver(plan: OutputPlan) -> Result<OutputReport, AppError> {
    let mut report = OutputReport::new();
    let start_time = Instant::now();

    log::info!(
        "Executing output plan with {} operations",
        plan.operations.len()
    );

    for operation in plan.operations {
        let op_start = Instant::now();
        match execute_operation(&operation) {
            Ok(bytes_written) => {
                let duration_ms = op_start.elapsed().as_millis() as u64;
                report = report.with_completed(CompletedOperation {
                    operation,
                    bytes_written,
                    duration_ms,
                });
            }
            Err(e) => {
                log::error!("Operation failed: {}", e);
                report = report.with_failed(FailedOperation {
                    operation,
                    error: e.to_string(),
                });
            }
        }
    }

    report.stats.total_duration_ms = start_time.elapsed().as_millis() as u64;

    log::info!(
        "Output plan execution complete: {} succeeded, {} failed in {}ms",
        report.stats.operations_completed,
        report.stats.operations_failed,
        report.stats.total_duration_ms
    );

    Ok(report)
}

fn execute_operation(operation: &DeliveryTarget) -> Result<usize, AppError> {
    match operation {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::PrintToStdout { content } => {
            print_to_stdout(content)?;
            Ok(content.len())
        }
    }
}

/// Writes content to a file.
///
/// The content goes to a sibling temp file first and is renamed into place,
/// so a reader never sees a half-written page.
fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut staging = path.as_os_str().to_owned();
    staging.push(".partial");
    let staged = fs::write(&staging, content).and_then(|()| fs::rename(&staging, path));
    if let Err(e) = staged {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

fn print_to_stdout(content: &str) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hub2page-writer-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = scratch_dir("parents");
        let path = dir.join("nested").join("index.page.json");
        let plan = OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
            path: path.clone(),
            content: "{}".to_string(),
        });

        let report = deliver(plan).unwrap();
        assert!(report.is_success());
        assert_eq!(report.stats.bytes_written, 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        assert!(!dir.join("nested").join("index.page.json.partial").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_failures_are_reported_not_raised() {
        let dir = scratch_dir("blocked");
        fs::create_dir_all(&dir).unwrap();
        // A directory where the file should go makes the rename fail
        let path = dir.join("taken");
        fs::create_dir_all(path.join("inner")).unwrap();

        let plan = OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
            path,
            content: "x".to_string(),
        });
        let report = deliver(plan).unwrap();
        assert!(!report.is_success());
        assert_eq!(report.stats.operations_failed, 1);
        assert!(!dir.join("taken.partial").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
