use std::path::Path;

use autocdl_core::exposure::DecisionSource;
use autocdl_core::pipeline::{GradeReport, VerificationReport};
use autocdl_core::verify::Severity;
use console::Style;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    warn: Style,
    ok: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            warn: Style::new().yellow(),
            ok: Style::new().green().bold(),
            path: Style::new().underlined(),
        }
    }
}

fn row(s: &Styles, label: &str, value: impl std::fmt::Display) {
    println!("  {:<14}{}", s.label.apply_to(label), s.value.apply_to(value));
}

pub fn print_grade_summary(report: &GradeReport, output: &Path) {
    let s = Styles::new();
    let trace = &report.outcome.trace;
    let record = report.outcome.cdl.to_record();

    println!();
    println!("  {}", s.title.apply_to("Auto CDL"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(8)));
    println!();

    let source = match trace.source {
        DecisionSource::FaceWeighted => "Face weighted",
        DecisionSource::SceneRule => "Scene rule",
        DecisionSource::Manual => "Manual",
    };
    println!("  {:<14}{}", s.label.apply_to("Source"), s.method.apply_to(source));
    if let Some(scene) = trace.scene {
        row(&s, "Scene", scene);
    }
    if let Some(ref camera) = trace.camera {
        row(&s, "Camera", camera);
    }
    if let Some(faces) = trace.faces_detected {
        row(&s, "Faces", faces);
    }
    if let Some(luma) = trace.global_luma {
        row(&s, "Global luma", format!("{:.4}", luma));
    }
    if let Some(luma) = trace.blended_luma {
        row(&s, "Blended luma", format!("{:.4}", luma));
    }
    row(&s, "Exposure", format!("{:+.2} EV", trace.exposure_ev));
    row(&s, "Contrast", format!("{:.2}", trace.contrast_factor));

    println!();
    row(&s, "Node", &record.node_index);
    row(&s, "Slope", &record.slope);
    row(&s, "Offset", &record.offset);
    row(&s, "Power", &record.power);
    row(&s, "Saturation", &record.saturation);

    for clamp in &trace.clamps {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Clamped"),
            s.warn.apply_to(format!(
                "{} {} -> {}",
                clamp.axis, clamp.requested, clamp.applied
            ))
        );
    }

    println!();
    if report.applied {
        println!(
            "  {} {}",
            s.ok.apply_to("Written to"),
            s.path.apply_to(output.display())
        );
    } else {
        println!("  {}", s.warn.apply_to("Host rejected the CDL"));
    }
    println!();
}

pub fn print_verification_summary(report: &VerificationReport, input: &Path) {
    let s = Styles::new();
    let check = &report.check;
    let trace = &report.outcome.trace;

    println!();
    println!("  {}", s.title.apply_to("Grade check"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(11)));
    println!();

    row(&s, "Input", input.display());
    row(&s, "Source", trace.source);
    if let Some(scene) = trace.scene {
        row(&s, "Scene", scene);
    }
    row(&s, "Exposure", format!("{:+.2} EV", trace.exposure_ev));
    row(&s, "Contrast", format!("{:.2}", trace.contrast_factor));
    if !trace.clamps.is_empty() {
        row(&s, "Clamped", trace.clamps.len());
    }

    println!();
    row(&s, "Graded luma", format!("{:.4}", check.graded.mean_luma));
    row(&s, "Highlights", format!("{:.2}%", check.graded.highlight_ratio * 100.0));
    row(&s, "Shadows", format!("{:.2}%", check.graded.shadow_ratio * 100.0));

    for flag in &check.flags {
        let style = match flag.severity {
            Severity::High => &s.warn,
            Severity::Medium => &s.value,
        };
        println!(
            "  {:<14}{}",
            s.label.apply_to("Flag"),
            style.apply_to(format!(
                "{} [{}] {:.4} vs {:.4}",
                flag.rule, flag.severity, flag.value, flag.threshold
            ))
        );
    }

    println!();
    let verdict = |ok: bool, yes: &str, no: &str| {
        if ok {
            s.ok.apply_to(yes.to_string())
        } else {
            s.warn.apply_to(no.to_string())
        }
    };
    println!(
        "  {:<14}{}",
        s.label.apply_to("Usable"),
        verdict(check.usable, "yes", "no")
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Repeatable"),
        verdict(report.deterministic, "yes", "no (second pass differs)")
    );
    println!();
}
