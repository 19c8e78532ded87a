//! Platform print pipeline.
//!
//! The print path assembles the same single-page PDF as the download path
//! and hands it to a `PrintPipeline` with fixed page geometry: A4,
//! landscape, fit-to-page, zero margins. The default pipeline spools
//! through `lp`; a recording pipeline is provided for tests.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};
use crate::record::AllotmentRecord;
use crate::rendering::CertificateImage;

/// Fixed page geometry handed to the spooler with every job
const PAGE_OPTIONS: [&str; 12] = [
    "-o",
    "media=A4",
    "-o",
    "orientation-requested=4",
    "-o",
    "fit-to-page",
    "-o",
    "page-left=0",
    "-o",
    "page-right=0",
    "-o",
    "page-top=0",
];

/// Something that accepts a finished document for printing
pub trait PrintPipeline: Send {
    fn submit(&mut self, job_name: &str, document: &[u8]) -> Result<()>;
}

/// Spools jobs through the platform `lp` command
pub struct SystemPrintPipeline {
    printer: Option<String>,
}

impl SystemPrintPipeline {
    pub fn new() -> Self {
        SystemPrintPipeline { printer: None }
    }

    /// Target a named printer instead of the system default
    pub fn with_printer(printer: impl Into<String>) -> Self {
        SystemPrintPipeline {
            printer: Some(printer.into()),
        }
    }
}

impl Default for SystemPrintPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintPipeline for SystemPrintPipeline {
    fn submit(&mut self, job_name: &str, document: &[u8]) -> Result<()> {
        let mut cmd = Command::new("lp");
        cmd.arg("-t")
            .arg(job_name)
            .args(PAGE_OPTIONS)
            .args(["-o", "page-bottom=0"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        if let Some(printer) = &self.printer {
            cmd.arg("-d").arg(printer);
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::PrintError(format!("Failed to spawn print spooler: {e}")))?;

        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| Error::PrintError("Print spooler stdin unavailable".to_string()))?;
            stdin
                .write_all(document)
                .map_err(|e| Error::PrintError(format!("Failed to stream job: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| Error::PrintError(format!("Print spooler did not finish: {e}")))?;
        if !output.status.success() {
            return Err(Error::PrintError(format!(
                "lp exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        log::info!("spooled print job {job_name}");
        Ok(())
    }
}

/// Records submitted jobs instead of printing; used in tests
pub struct RecordingPrintPipeline {
    pub jobs: Vec<(String, usize)>,
}

impl RecordingPrintPipeline {
    pub fn new() -> Self {
        RecordingPrintPipeline { jobs: Vec::new() }
    }
}

impl Default for RecordingPrintPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintPipeline for RecordingPrintPipeline {
    fn submit(&mut self, job_name: &str, document: &[u8]) -> Result<()> {
        self.jobs.push((job_name.to_string(), document.len()));
        Ok(())
    }
}

/// Assemble the certificate document and hand it to a print pipeline.
pub fn print_certificate(
    record: &AllotmentRecord,
    surface: &CertificateImage,
    pipeline: &mut dyn PrintPipeline,
) -> Result<()> {
    let job_name = format!("Plot Allotment {}", record.reference_id());
    let document = super::pdf::build_pdf(surface, &job_name)?;
    pipeline.submit(&job_name, &document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::raster::rasterize;
    use crate::{RasterParams, Viewport};

    #[test]
    fn recording_pipeline_captures_jobs() {
        let record = AllotmentRecord {
            full_name: "A Khan".to_string(),
            cnic: "1".to_string(),
            phone: "2".to_string(),
            plot_no: "A-12".to_string(),
            ..Default::default()
        };
        let surface = rasterize(
            &[],
            Viewport {
                width: 80,
                height: 60,
            },
            &RasterParams::default(),
        )
        .unwrap();

        let mut pipeline = RecordingPrintPipeline::new();
        print_certificate(&record, &surface, &mut pipeline).unwrap();
        assert_eq!(pipeline.jobs.len(), 1);
        assert_eq!(pipeline.jobs[0].0, "Plot Allotment 1-A-12");
        assert!(pipeline.jobs[0].1 > 0);
    }
}
