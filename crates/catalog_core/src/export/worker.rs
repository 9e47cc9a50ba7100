//! Background thread that renders and writes PDF exports.

use super::pdf::write_to_path;
use super::{ExportDocument, ExportSurface, PaperConfig};
use crate::error::CatalogError;
use crate::models::ProductRecord;
use crossbeam_channel::{unbounded, Sender};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{info, warn};

struct ExportJob {
    document: ExportDocument,
}

/// Export surface that hands documents to a dedicated writer thread.
///
/// Every job overwrites the same destination file. Failures are logged by the
/// worker and never reach the caller.
pub struct PdfExportHandle {
    job_tx: Option<Sender<ExportJob>>,
    worker: Option<JoinHandle<()>>,
    path: PathBuf,
}

impl std::fmt::Debug for PdfExportHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfExportHandle")
            .field("path", &self.path)
            .field("running", &self.worker.is_some())
            .finish()
    }
}

impl PdfExportHandle {
    /// Destination written by every export.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn shutdown(&mut self) {
        // Dropping the sender ends the worker loop once queued jobs drain.
        self.job_tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!(path = %self.path.display(), "pdf export worker panicked");
            }
        }
    }
}

impl ExportSurface for PdfExportHandle {
    fn save(&self, records: &[Arc<ProductRecord>]) {
        let Some(job_tx) = self.job_tx.as_ref() else {
            warn!("pdf export requested after close");
            return;
        };
        let job = ExportJob {
            document: ExportDocument::from_records(records),
        };
        if job_tx.send(job).is_err() {
            warn!(path = %self.path.display(), "pdf export worker is gone; export dropped");
        }
    }

    fn close(mut self: Box<Self>) {
        self.shutdown();
    }
}

impl Drop for PdfExportHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Spawn the export writer thread targeting `path`.
///
/// # Errors
/// Returns [`CatalogError::Io`] if the thread cannot be spawned.
pub fn spawn_pdf_export(
    path: PathBuf,
    paper: PaperConfig,
) -> Result<PdfExportHandle, CatalogError> {
    let (job_tx, job_rx) = unbounded::<ExportJob>();
    let worker_path = path.clone();
    let worker = thread::Builder::new()
        .name("catalog-pdf-export".to_string())
        .spawn(move || {
            for job in job_rx.iter() {
                let started = Instant::now();
                let rows = job.document.rows.len();
                match write_to_path(&job.document, &paper, &worker_path) {
                    Ok(()) => info!(
                        path = %worker_path.display(),
                        rows,
                        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
                        "pdf export finished"
                    ),
                    Err(err) => warn!(
                        path = %worker_path.display(),
                        error = %err,
                        "pdf export failed"
                    ),
                }
            }
        })?;
    info!(path = %path.display(), "pdf export surface ready");
    Ok(PdfExportHandle {
        job_tx: Some(job_tx),
        worker: Some(worker),
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_catalog;
    use tempfile::TempDir;

    fn records() -> Vec<Arc<ProductRecord>> {
        sample_catalog().into_iter().map(Arc::new).collect()
    }

    #[test]
    fn save_then_close_writes_the_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("products.pdf");
        let handle = spawn_pdf_export(path.clone(), PaperConfig::default()).expect("spawn");
        assert_eq!(handle.path(), path.as_path());

        let surface: Box<dyn ExportSurface> = Box::new(handle);
        surface.save(&records());
        surface.close();

        let bytes = std::fs::read(&path).expect("export written");
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn repeated_saves_overwrite_one_destination() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("products.pdf");
        let handle = spawn_pdf_export(path.clone(), PaperConfig::default()).expect("spawn");
        let all = records();
        handle.save(&all);
        handle.save(&all[..2]);
        drop(handle);

        let entries = std::fs::read_dir(dir.path()).expect("list").count();
        assert_eq!(entries, 1);
        let bytes = std::fs::read(&path).expect("export written");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(Chang) Tj"));
        assert!(!text.contains("(Aniseed Syrup) Tj"));
    }

    #[test]
    fn write_failures_do_not_reach_the_caller() {
        let dir = TempDir::new().expect("temp dir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").expect("blocker");
        let path = blocker.join("products.pdf");

        let handle = spawn_pdf_export(path.clone(), PaperConfig::default()).expect("spawn");
        handle.save(&records());
        drop(handle);
        assert!(!path.exists());
    }
}
