use std::path::PathBuf;

use anyhow::{Context, Result};
use autocdl_core::io::image_io::load_frame;
use autocdl_core::io::records::{read_request, write_json};
use autocdl_core::pipeline::Orchestrator;
use clap::Args;

use crate::summary::print_verification_summary;

use super::{load_config, load_detector};

#[derive(Args)]
pub struct VerifyArgs {
    /// Frame image (PNG, TIFF, JPEG) or host thumbnail record (.json)
    pub file: PathBuf,

    /// Manual parameter record (JSON)
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// Face boxes from an external detector (JSON array)
    #[arg(long)]
    pub faces: Option<PathBuf>,

    /// Grade config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Camera / gamma tag of the source, e.g. "Sony S-Log3"
    #[arg(long)]
    pub camera: Option<String>,

    /// Write the verification report (JSON)
    #[arg(long)]
    pub report: Option<PathBuf>,
}

pub fn run(args: &VerifyArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut frame = load_frame(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    if args.camera.is_some() {
        frame.metadata.camera = args.camera.clone();
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

    let report = orchestrator.verify(&frame, request.as_ref());
    print_verification_summary(&report, &args.file);

    if let Some(ref path) = args.report {
        write_json(&report, path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        println!("Report saved to {}", path.display());
    }
    Ok(())
}
