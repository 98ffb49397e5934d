use std::path::PathBuf;

use anyhow::{Context, Result};
use autocdl_core::detection::FaceDetector;
use autocdl_core::io::image_io::load_frame;
use autocdl_core::scene::classify;
use autocdl_core::stats::{analyze_frame, select_primary};
use clap::Args;

use super::{load_config, load_detector};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Frame image (PNG, TIFF, JPEG) or host thumbnail record (.json)
    pub file: PathBuf,

    /// Face boxes from an external detector (JSON array)
    #[arg(long)]
    pub faces: Option<PathBuf>,

    /// Grade config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Camera / gamma tag of the source, e.g. "Sony S-Log3"
    #[arg(long)]
    pub camera: Option<String>,
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut frame = load_frame(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    frame.metadata.camera = args.camera.clone();

    let mut detector = args.faces.as_deref().map(load_detector).transpose()?;
    let detector: Option<&mut dyn FaceDetector> = match detector {
        Some(ref mut d) => Some(d.as_mut()),
        None => None,
    };
    let analysis = analyze_frame(
        &frame,
        detector,
        &config.extraction,
        &config.faces,
    );
    let stats = &analysis.stats;
    let scene = classify(stats, &config.classifier);

    println!("File:            {}", args.file.display());
    println!("Dimensions:      {}x{}", frame.width(), frame.height());
    println!("Mean luma:       {:.4} (std {:.4})", stats.mean_luma, stats.luma_std);
    println!(
        "Mean saturation: {:.4} (std {:.4})",
        stats.mean_saturation, stats.saturation_std
    );
    println!("Highlights:      {:.2}%", stats.highlight_ratio * 100.0);
    println!("Shadows:         {:.2}%", stats.shadow_ratio * 100.0);
    println!("Scene:           {} (rule: {})", scene.category, scene.rule);
    println!(
        "Preset:          {:+.2} EV, contrast {:.2}",
        scene.preset.exposure_ev, scene.preset.contrast_factor
    );

    println!("Faces:           {}", analysis.faces.len());
    let primary = select_primary(&analysis.faces, config.faces.sharpness_weight);
    for (i, face) in analysis.faces.iter().enumerate() {
        let marker = if Some(i) == primary { "*" } else { " " };
        println!(
            "  {}#{} ({},{} {}x{}) conf={:.2} luma={:.4} sat={:.4} sharp={:.5}",
            marker,
            face.id,
            face.rect.x,
            face.rect.y,
            face.rect.width,
            face.rect.height,
            face.confidence,
            face.luma_mean,
            face.saturation_mean,
            face.sharpness
        );
    }

    Ok(())
}
