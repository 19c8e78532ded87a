//! Async-friendly export facade backed by a dedicated worker thread.
//!
//! The worker thread owns the renderer configuration and the print
//! pipeline and executes commands sent from async tasks, so callers get an
//! async interface without the export machinery being `Send` across tasks.
//!
//! At most one export is in flight at a time: a boolean flag is taken with
//! a compare-and-swap before a command is queued, and a second request
//! while it is held fails synchronously with [`Error::ExportInFlight`].
//! There is no queue and no cancellation. The flag is released by a drop
//! guard on every exit path: completion, export failure, or worker death.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;

use tokio::sync::oneshot;

use crate::error::{Error, Result};
use crate::record::AllotmentRecord;
use crate::rendering;
use crate::CertificateConfig;

#[cfg(feature = "print")]
use crate::export::print::{PrintPipeline, SystemPrintPipeline};

enum Command {
    ExportPdf(AllotmentRecord, PathBuf, oneshot::Sender<Result<PathBuf>>),
    #[cfg(feature = "print")]
    Print(AllotmentRecord, oneshot::Sender<Result<()>>),
    Close(oneshot::Sender<Result<()>>),
}

/// Clears the busy flag when the current export settles, whatever happened
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Handle to the export worker
#[derive(Clone)]
pub struct ExportHandle {
    cmd_tx: Sender<Command>,
    busy: Arc<AtomicBool>,
}

impl ExportHandle {
    /// Create a handle with the platform print pipeline.
    #[cfg(feature = "print")]
    pub async fn new(config: CertificateConfig) -> Result<Self> {
        Self::with_pipeline(config, Box::new(SystemPrintPipeline::new())).await
    }

    /// Create a handle with a caller-supplied print pipeline.
    #[cfg(feature = "print")]
    pub async fn with_pipeline(
        config: CertificateConfig,
        pipeline: Box<dyn PrintPipeline>,
    ) -> Result<Self> {
        Self::spawn(config, pipeline).await
    }

    /// Create a handle without print support.
    #[cfg(not(feature = "print"))]
    pub async fn new(config: CertificateConfig) -> Result<Self> {
        Self::spawn(config).await
    }

    async fn spawn(
        config: CertificateConfig,
        #[cfg(feature = "print")] mut pipeline: Box<dyn PrintPipeline>,
    ) -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx) = oneshot::channel::<Result<()>>();

        thread::spawn(move || {
            if let Err(e) = url::Url::parse(&config.verify_base_url) {
                let _ = init_tx.send(Err(Error::ConfigError(format!(
                    "Bad verification base URL: {e}"
                ))));
                return;
            }
            let _ = init_tx.send(Ok(()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::ExportPdf(record, dir, resp) => {
                        let res = rendering::render_certificate(&record, &config).and_then(
                            |surface| crate::export::pdf::export_pdf(&record, &surface, &dir),
                        );
                        let _ = resp.send(res);
                    }
                    #[cfg(feature = "print")]
                    Command::Print(record, resp) => {
                        let res =
                            rendering::render_certificate(&record, &config).and_then(|surface| {
                                crate::export::print::print_certificate(
                                    &record,
                                    &surface,
                                    pipeline.as_mut(),
                                )
                            });
                        let _ = resp.send(res);
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(Ok(()));
                        break;
                    }
                }
            }
        });

        init_rx
            .await
            .map_err(|_| Error::ConfigError("Export worker failed to start".to_string()))??;

        Ok(Self {
            cmd_tx,
            busy: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Whether an export is currently in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<BusyGuard> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::ExportInFlight);
        }
        Ok(BusyGuard(self.busy.clone()))
    }

    /// Render the record and write its PDF under `dir`.
    pub async fn export_pdf(
        &self,
        record: AllotmentRecord,
        dir: impl Into<PathBuf>,
    ) -> Result<PathBuf> {
        let _guard = self.begin()?;
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::ExportPdf(record, dir.into(), tx))
            .map_err(|_| Error::ExportError("Export worker is gone".to_string()))?;
        rx.await
            .map_err(|_| Error::ExportError("Export worker dropped the reply".to_string()))?
    }

    /// Render the record and hand it to the print pipeline.
    #[cfg(feature = "print")]
    pub async fn print(&self, record: AllotmentRecord) -> Result<()> {
        let _guard = self.begin()?;
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Print(record, tx))
            .map_err(|_| Error::PrintError("Export worker is gone".to_string()))?;
        rx.await
            .map_err(|_| Error::PrintError("Export worker dropped the reply".to_string()))?
    }

    /// Shut the worker down.
    pub async fn close(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Close(tx))
            .map_err(|_| Error::ExportError("Export worker is gone".to_string()))?;
        rx.await
            .map_err(|_| Error::ExportError("Export worker dropped the reply".to_string()))?
    }
}
