//! Two-page PDF profile export, composed entirely in memory.
//!
//! Page 1 carries the radar drawn as vector line art from the same geometry
//! the SVG renderer uses, plus a one-line caption. Page 2 is the text
//! summary: header block, figures, the category's longer recommendation list
//! as bullets, and a footer caption.

use super::chart::{radar_angles, SCORE_MAX};
use super::profile::CompetencyProfile;
use chrono::Local;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::fmt;

const PAGE_WIDTH: f64 = 595.0; // A4 portrait, points
const PAGE_HEIGHT: f64 = 842.0;

const RADAR_CENTER: (f64, f64) = (297.5, 470.0);
const RADAR_RADIUS: f64 = 170.0;

// #004B87 and a light tint of #5DADE2 (no alpha in plain PDF fills).
const PRIMARY: (f64, f64, f64) = (0.0, 0.294, 0.529);
const FILL: (f64, f64, f64) = (0.80, 0.89, 0.96);
const GRID: (f64, f64, f64) = (0.74, 0.765, 0.78);

#[derive(Debug)]
pub enum ReportError {
    Pdf(lopdf::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Pdf(err) => write!(f, "failed to compose PDF report: {err}"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Pdf(err) => Some(err),
        }
    }
}

impl From<lopdf::Error> for ReportError {
    fn from(err: lopdf::Error) -> Self {
        Self::Pdf(err)
    }
}

/// Download name from the fixed template, spaces replaced by underscores.
pub fn suggested_file_name(cluster: &str, name: &str) -> String {
    format!(
        "Profil_{}_{}.pdf",
        cluster.replace(' ', "_"),
        name.replace(' ', "_")
    )
}

/// Compose the two-page profile document and return its bytes.
pub fn render_profile_pdf(profile: &CompetencyProfile) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let italic = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Oblique",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
            "F3" => italic,
        },
    });

    let page_ids: Vec<Object> = [radar_page_ops(profile), summary_page_ops(profile)]
        .into_iter()
        .map(|operations| {
            let content = Content { operations };
            let stream = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => stream,
            });
            Ok(page_id.into())
        })
        .collect::<Result<_, lopdf::Error>>()?;

    let count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).map_err(lopdf::Error::from)?;
    Ok(buffer)
}

fn radar_page_ops(profile: &CompetencyProfile) -> Vec<Operation> {
    let mut ops = Vec::new();

    set_fill(&mut ops, PRIMARY);
    centered_text(&mut ops, "F2", 16.0, 780.0, "PROFIL KOMPETENSI SDM");

    let angles = radar_angles(profile.dimensions.len());
    let (cx, cy) = RADAR_CENTER;

    set_stroke(&mut ops, GRID);
    ops.push(Operation::new("w", vec![0.8.into()]));
    for ring in 1..=SCORE_MAX as usize {
        let radius = ring as f64 / SCORE_MAX * RADAR_RADIUS;
        stroke_closed_path(
            &mut ops,
            angles
                .iter()
                .map(|a| (cx + radius * a.cos(), cy + radius * a.sin())),
        );
    }
    for angle in &angles {
        ops.push(Operation::new("m", vec![cx.into(), cy.into()]));
        ops.push(Operation::new(
            "l",
            vec![
                (cx + RADAR_RADIUS * angle.cos()).into(),
                (cy + RADAR_RADIUS * angle.sin()).into(),
            ],
        ));
        ops.push(Operation::new("S", vec![]));
    }

    let vertices: Vec<(f64, f64)> = angles
        .iter()
        .zip(profile.scores())
        .map(|(angle, score)| {
            let radius = score / SCORE_MAX * RADAR_RADIUS;
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect();

    set_fill(&mut ops, FILL);
    fill_closed_path(&mut ops, vertices.iter().copied());
    set_stroke(&mut ops, PRIMARY);
    ops.push(Operation::new("w", vec![1.5.into()]));
    stroke_closed_path(&mut ops, vertices.iter().copied());

    set_fill(&mut ops, PRIMARY);
    for (entry, angle) in profile.dimensions.iter().zip(&angles) {
        let x = cx + (RADAR_RADIUS + 18.0) * angle.cos();
        let y = cy + (RADAR_RADIUS + 18.0) * angle.sin();
        let half = approx_width(&entry.label, 9.0) / 2.0;
        show_text(&mut ops, "F1", 9.0, x - half, y - 3.0, &entry.label);
    }

    let caption = format!(
        "Nama: {}   |   Klaster: {}   |   Rata-rata: {:.2}   |   Kategori: {}",
        profile.name, profile.cluster, profile.average, profile.category_label
    );
    centered_text(&mut ops, "F1", 9.0, 180.0, &caption);

    ops
}

fn summary_page_ops(profile: &CompetencyProfile) -> Vec<Operation> {
    let mut ops = Vec::new();

    set_fill(&mut ops, PRIMARY);
    show_text(&mut ops, "F2", 13.0, 50.0, 780.0, "PROFIL PENGEMBANGAN KOMPETENSI");

    set_fill(&mut ops, (0.0, 0.0, 0.0));
    let mut y = 740.0;
    let lines = [
        format!("Nama: {}", profile.name),
        format!("Klaster: {}", profile.cluster),
        format!("Rata-rata Kompetensi: {:.2}", profile.average),
        format!("Kategori: {}", profile.category_label),
        format!("Kompetensi tertinggi: {}", profile.strongest),
        format!("Kompetensi terendah: {}", profile.weakest),
    ];
    for line in &lines {
        show_text(&mut ops, "F1", 11.0, 50.0, y, line);
        y -= 18.0;
    }

    y -= 12.0;
    set_fill(&mut ops, PRIMARY);
    show_text(&mut ops, "F2", 12.0, 50.0, y, "REKOMENDASI PENGEMBANGAN:");
    y -= 20.0;

    set_fill(&mut ops, (0.0, 0.0, 0.0));
    for item in profile.category.development_plan() {
        show_text(&mut ops, "F1", 11.0, 58.0, y, &format!("- {item}"));
        y -= 16.0;
    }

    set_fill(&mut ops, (0.4, 0.4, 0.4));
    let footer = format!(
        "Dihasilkan otomatis oleh dashboard kompetensi - {}",
        Local::now().format("%Y-%m-%d")
    );
    centered_text(&mut ops, "F3", 10.0, 40.0, &footer);

    ops
}

fn set_fill(ops: &mut Vec<Operation>, (r, g, b): (f64, f64, f64)) {
    ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
}

fn set_stroke(ops: &mut Vec<Operation>, (r, g, b): (f64, f64, f64)) {
    ops.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
}

fn stroke_closed_path(ops: &mut Vec<Operation>, points: impl IntoIterator<Item = (f64, f64)>) {
    path_ops(ops, points);
    ops.push(Operation::new("s", vec![]));
}

fn fill_closed_path(ops: &mut Vec<Operation>, points: impl IntoIterator<Item = (f64, f64)>) {
    path_ops(ops, points);
    ops.push(Operation::new("f", vec![]));
}

fn path_ops(ops: &mut Vec<Operation>, points: impl IntoIterator<Item = (f64, f64)>) {
    let mut points = points.into_iter();
    if let Some((x, y)) = points.next() {
        ops.push(Operation::new("m", vec![x.into(), y.into()]));
        for (x, y) in points {
            ops.push(Operation::new("l", vec![x.into(), y.into()]));
        }
    }
}

fn show_text(ops: &mut Vec<Operation>, font: &str, size: f64, x: f64, y: f64, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
}

fn centered_text(ops: &mut Vec<Operation>, font: &str, size: f64, y: f64, text: &str) {
    let x = (PAGE_WIDTH - approx_width(text, size)) / 2.0;
    show_text(ops, font, size, x.max(20.0), y, text);
}

// Helvetica averages roughly half an em per glyph; close enough for layout.
fn approx_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * 0.5
}
