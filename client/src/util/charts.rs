//! Chart data assembly for the dashboard and lote management screens.
//!
//! Series are built here from API rows and drawn by `components::line_chart`
//! as inline SVG.

#[cfg(test)]
#[path = "charts_test.rs"]
mod charts_test;

use std::fmt::Write as _;

use super::listing::{SortOrder, format_date, parse_api_date, sort_by_date};
use crate::net::types::{ClasificacionPoint, EstadoLote, ProduccionPoint};

/// Egg size categories in display order.
pub const SIZE_CATEGORIES: [&str; 5] = ["Pigui", "Pequeño", "Mediano", "Grande", "Extra Grande"];

const GREEN: &str = "rgb(107, 142, 35)";
const BROWN: &str = "rgb(139, 69, 19)";

fn size_color(size: &str) -> &'static str {
    match size {
        "Pigui" => BROWN,
        "Pequeño" => "rgb(85, 107, 47)",
        "Mediano" => "rgb(218, 165, 32)",
        "Grande" => GREEN,
        _ => "rgb(154, 205, 50)",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartSeries {
    pub label: String,
    pub color: &'static str,
    pub values: Vec<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Axis label for a period key: calendar dates are reformatted, week or
/// month keys pass through.
fn axis_label(raw: &str) -> String {
    if parse_api_date(raw).is_some() { format_date(raw) } else { raw.to_owned() }
}

pub fn produccion_chart(points: &[ProduccionPoint]) -> ChartData {
    ChartData {
        labels: points.iter().map(|p| axis_label(&p.fecha_registro)).collect(),
        series: vec![
            ChartSeries {
                label: "Producción".to_owned(),
                color: GREEN,
                values: points.iter().map(|p| p.produccion).collect(),
            },
            ChartSeries {
                label: "Defectuosos".to_owned(),
                color: BROWN,
                values: points.iter().map(|p| p.defectuosos).collect(),
            },
        ],
    }
}

/// One series per size category over the unique dates; a missing
/// date/size combination plots as zero.
pub fn clasificacion_chart(points: &[ClasificacionPoint]) -> ChartData {
    let mut dates: Vec<&str> = Vec::new();
    for point in points {
        if !dates.contains(&point.fecha_registro.as_str()) {
            dates.push(&point.fecha_registro);
        }
    }
    let series = SIZE_CATEGORIES
        .iter()
        .map(|size| ChartSeries {
            label: (*size).to_owned(),
            color: size_color(size),
            values: dates
                .iter()
                .map(|date| {
                    points
                        .iter()
                        .find(|p| p.fecha_registro == *date && p.tamano == *size)
                        .map_or(0, |p| p.total_unitaria)
                })
                .collect(),
        })
        .collect();
    ChartData { labels: dates.iter().map(|d| axis_label(d)).collect(), series }
}

/// Hen count and bajas per status record, oldest first.
pub fn estado_chart(estados: &[EstadoLote]) -> ChartData {
    let mut sorted = estados.to_vec();
    sort_by_date(&mut sorted, SortOrder::Asc, |e| e.fecha_registro.as_str());
    ChartData {
        labels: sorted.iter().map(|e| format_date(&e.fecha_registro)).collect(),
        series: vec![
            ChartSeries {
                label: "Cantidad de Gallinas".to_owned(),
                color: GREEN,
                values: sorted.iter().map(|e| e.cantidad_g).collect(),
            },
            ChartSeries { label: "Bajas".to_owned(), color: BROWN, values: sorted.iter().map(|e| e.bajas).collect() },
        ],
    }
}

/// Largest plotted value; never below 1 so scaling cannot divide by zero.
pub fn chart_max(data: &ChartData) -> i64 {
    data.series.iter().flat_map(|s| s.values.iter().copied()).max().unwrap_or(0).max(1)
}

/// SVG `points` attribute for `values` scaled into a `width` x `height` box.
#[allow(clippy::cast_precision_loss)]
pub fn polyline_points(values: &[i64], width: f64, height: f64, max: i64) -> String {
    let max = max.max(1) as f64;
    let step = if values.len() > 1 { width / (values.len() - 1) as f64 } else { 0.0 };
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        let x = if values.len() == 1 { width / 2.0 } else { i as f64 * step };
        let y = height - (*value).clamp(0, i64::MAX) as f64 / max * height;
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "{x:.1},{y:.1}");
    }
    out
}
