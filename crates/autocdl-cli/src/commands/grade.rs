use std::path::PathBuf;

use anyhow::{Context, Result};
use autocdl_core::cdl::CdlParameters;
use autocdl_core::error::GradeError;
use autocdl_core::frame::ColorFrame;
use autocdl_core::io::image_io::load_frame;
use autocdl_core::io::records::{read_request, write_cdl_record, write_json};
use autocdl_core::pipeline::{GradeHost, Orchestrator};
use clap::Args;
use tracing::{debug, error};

use crate::summary::print_grade_summary;

use super::{load_config, load_detector};

#[derive(Args)]
pub struct GradeArgs {
    /// Frame image (PNG, TIFF, JPEG) or host thumbnail record (.json).
    /// Without it there is nothing to grade.
    pub file: Option<PathBuf>,

    /// Manual parameter record (JSON)
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// Face boxes from an external detector (JSON array)
    #[arg(long)]
    pub faces: Option<PathBuf>,

    /// Grade config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Grading node index (overrides the config)
    #[arg(long)]
    pub node: Option<u32>,

    /// Camera / gamma tag of the source, e.g. "Sony S-Log3"
    #[arg(long)]
    pub camera: Option<String>,

    /// Output CDL record path
    #[arg(short, long, default_value = "cdl.json")]
    pub output: PathBuf,

    /// Also write the full decision report (JSON)
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Host backed by an image on disk; applying a CDL writes its record.
struct FileHost {
    frame_path: Option<PathBuf>,
    camera: Option<String>,
    output: PathBuf,
}

impl GradeHost for FileHost {
    fn current_frame(&mut self) -> autocdl_core::error::Result<Option<ColorFrame>> {
        let Some(ref path) = self.frame_path else {
            return Ok(None);
        };
        let mut frame = load_frame(path)?;
        if self.camera.is_some() {
            frame.metadata.camera = self.camera.clone();
        }
        Ok(Some(frame))
    }

    fn apply_parameters(&mut self, cdl: &CdlParameters) -> bool {
        match write_cdl_record(&cdl.to_record(), &self.output) {
            Ok(()) => true,
            Err(e) => {
                error!(path = %self.output.display(), error = %e, "Failed to write CDL record");
                false
            }
        }
    }
}

pub fn run(args: &GradeArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(node) = args.node {
        config.node_index = node;
    }

    let request = args
        .request
        .as_deref()
        .map(|p| {
            read_request(p).with_context(|| format!("Failed to read request {}", p.display()))
        })
        .transpose()?;

    let mut orchestrator = Orchestrator::new(config);
    if let Some(ref faces) = args.faces {
        orchestrator = orchestrator.with_detector(load_detector(faces)?);
    }

    let mut host = FileHost {
        frame_path: args.file.clone(),
        camera: args.camera.clone(),
        output: args.output.clone(),
    };

    let report = match orchestrator.run(&mut host, request.as_ref()) {
        Ok(report) => report,
        Err(GradeError::NoTarget) => {
            anyhow::bail!("No frame selected: pass an image file to grade")
        }
        Err(e) => {
            return Err(e).context("Grading failed");
        }
    };

    debug!("Decision trace:\n{}", report.outcome.trace);
    print_grade_summary(&report, &args.output);

    if let Some(ref path) = args.report {
        write_json(&report, path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        println!("Report saved to {}", path.display());
    }

    if !report.applied {
        anyhow::bail!("CDL could not be applied to {}", args.output.display());
    }
    Ok(())
}
