//! Radar-chart geometry and SVG rendering.
//!
//! One vertex per dimension, evenly spaced (2π/N, starting at angle 0),
//! closed by repeating the first vertex. The radial axis is fixed to the
//! 0–5 score domain.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fmt;

/// Upper bound of the score domain.
pub const SCORE_MAX: f64 = 5.0;

const PRIMARY: RGBColor = RGBColor(0, 75, 135);
const FILL: RGBColor = RGBColor(93, 173, 226);
const GRID: RGBColor = RGBColor(189, 195, 199);

#[derive(Debug)]
pub enum ChartError {
    EmptyDimensions,
    LengthMismatch { labels: usize, scores: usize },
    Backend(String),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::EmptyDimensions => write!(f, "cannot draw a radar with no dimensions"),
            ChartError::LengthMismatch { labels, scores } => {
                write!(f, "{labels} dimension labels but {scores} scores")
            }
            ChartError::Backend(detail) => write!(f, "chart rendering failed: {detail}"),
        }
    }
}

impl std::error::Error for ChartError {}

/// Angles for an N-vertex radar, `2π·k/N` starting at 0.
pub fn radar_angles(n: usize) -> Vec<f64> {
    (0..n)
        .map(|k| k as f64 * std::f64::consts::TAU / n as f64)
        .collect()
}

/// Unit-circle vertices for the given scores (radius = score / 5), not closed.
pub fn radar_vertices(scores: &[f64]) -> Vec<(f64, f64)> {
    radar_angles(scores.len())
        .into_iter()
        .zip(scores)
        .map(|(angle, score)| {
            let radius = score / SCORE_MAX;
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Close a polygon by repeating its first vertex.
pub fn close_polygon(mut points: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

fn backend_error<E: fmt::Display>(err: E) -> ChartError {
    ChartError::Backend(err.to_string())
}

/// Render the closed, shaded radar polygon as a standalone SVG document.
pub fn render_radar_svg(labels: &[String], scores: &[f64], title: &str) -> Result<String, ChartError> {
    if labels.len() != scores.len() {
        return Err(ChartError::LengthMismatch {
            labels: labels.len(),
            scores: scores.len(),
        });
    }
    if labels.is_empty() {
        return Err(ChartError::EmptyDimensions);
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (640, 640)).into_drawing_area();
        root.fill(&WHITE).map_err(backend_error)?;
        let root = root
            .titled(title, ("sans-serif", 20).into_font().color(&PRIMARY))
            .map_err(backend_error)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(30)
            .build_cartesian_2d(-1.45f64..1.45f64, -1.45f64..1.45f64)
            .map_err(backend_error)?;

        let angles = radar_angles(labels.len());

        // Concentric grid rings at whole-score radii.
        for ring in 1..=SCORE_MAX as usize {
            let radius = ring as f64 / SCORE_MAX;
            let ring_points = close_polygon(
                angles
                    .iter()
                    .map(|a| (radius * a.cos(), radius * a.sin()))
                    .collect(),
            );
            chart
                .draw_series(std::iter::once(PathElement::new(ring_points, &GRID)))
                .map_err(backend_error)?;
        }

        // One spoke per dimension.
        for angle in &angles {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(0.0, 0.0), (angle.cos(), angle.sin())],
                    &GRID,
                )))
                .map_err(backend_error)?;
        }

        // Whole-score tick labels along the first spoke.
        let tick_style = TextStyle::from(("sans-serif", 11).into_font())
            .color(&GRID)
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        chart
            .draw_series((1..=SCORE_MAX as usize).map(|ring| {
                Text::new(
                    ring.to_string(),
                    (ring as f64 / SCORE_MAX + 0.02, 0.02),
                    tick_style.clone(),
                )
            }))
            .map_err(backend_error)?;

        let vertices = radar_vertices(scores);
        chart
            .draw_series(std::iter::once(Polygon::new(
                vertices.clone(),
                &FILL.mix(0.25),
            )))
            .map_err(backend_error)?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                close_polygon(vertices),
                ShapeStyle::from(&PRIMARY).stroke_width(2),
            )))
            .map_err(backend_error)?;

        // Dimension labels just outside the outer ring.
        let label_style = TextStyle::from(("sans-serif", 13).into_font())
            .color(&PRIMARY)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart
            .draw_series(labels.iter().zip(&angles).map(|(label, angle)| {
                Text::new(
                    label.clone(),
                    (1.18 * angle.cos(), 1.18 * angle.sin()),
                    label_style.clone(),
                )
            }))
            .map_err(backend_error)?;

        root.present().map_err(backend_error)?;
    }

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_are_evenly_spaced_from_zero() {
        let angles = radar_angles(4);
        assert_eq!(angles.len(), 4);
        assert!(angles[0].abs() < f64::EPSILON);
        for pair in angles.windows(2) {
            assert!((pair[1] - pair[0] - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        }
    }

    #[test]
    fn polygon_is_closed_by_repeating_the_first_vertex() {
        let closed = close_polygon(radar_vertices(&[5.0, 2.5, 1.0]));
        assert_eq!(closed.len(), 4);
        assert_eq!(closed.first(), closed.last());
    }

    #[test]
    fn full_score_vertex_sits_on_the_unit_circle() {
        let vertices = radar_vertices(&[5.0, 5.0]);
        assert!((vertices[0].0 - 1.0).abs() < 1e-12);
        assert!(vertices[0].1.abs() < 1e-12);
    }

    #[test]
    fn svg_output_names_every_dimension() {
        let labels = vec!["P1".to_string(), "P2".to_string(), "P3".to_string()];
        let svg = render_radar_svg(&labels, &[4.0, 3.0, 5.0], "Radar Kompetensi - Jane")
            .expect("radar renders");
        assert!(svg.contains("<svg"));
        for label in &labels {
            assert!(svg.contains(label.as_str()), "label {label} missing");
        }
    }

    #[test]
    fn mismatched_inputs_are_rejected() {
        let labels = vec!["P1".to_string()];
        let err = render_radar_svg(&labels, &[1.0, 2.0], "x").expect_err("must fail");
        assert!(matches!(err, ChartError::LengthMismatch { labels: 1, scores: 2 }));
        let err = render_radar_svg(&[], &[], "x").expect_err("must fail");
        assert!(matches!(err, ChartError::EmptyDimensions));
    }
}
