//! Inline SVG line chart.
//!
//! DESIGN
//! ======
//! Series are scaled against the largest value across all series so lines
//! share one vertical axis. Labels are drawn under the first, middle, and
//! last points only.

use leptos::prelude::*;

use crate::util::charts::{ChartData, chart_max, polyline_points};

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 220.0;

#[component]
pub fn LineChart(title: &'static str, #[prop(into)] data: Signal<ChartData>) -> impl IntoView {
    let lines = move || {
        let data = data.get();
        let max = chart_max(&data);
        data.series
            .into_iter()
            .map(|series| {
                view! {
                    <polyline
                        fill="none"
                        stroke=series.color
                        stroke-width="2"
                        points=polyline_points(&series.values, WIDTH, HEIGHT, max)
                    />
                }
            })
            .collect_view()
    };

    let axis = move || {
        let labels = data.get().labels;
        let last = labels.len().saturating_sub(1);
        let picks: Vec<usize> = if labels.len() <= 2 { (0..labels.len()).collect() } else { vec![0, last / 2, last] };
        picks
            .into_iter()
            .filter_map(|i| labels.get(i).cloned())
            .map(|label| view! { <span class="chart__label">{label}</span> })
            .collect_view()
    };

    let legend = move || {
        data.get()
            .series
            .into_iter()
            .map(|s| {
                view! {
                    <span class="chart__legend-item">
                        <span class="chart__swatch" style=format!("background:{}", s.color)></span>
                        {s.label}
                    </span>
                }
            })
            .collect_view()
    };

    view! {
        <figure class="chart">
            <figcaption class="chart__title">{title}</figcaption>
            <Show
                when=move || !data.get().is_empty()
                fallback=|| view! { <p class="chart__empty">"Sin datos para mostrar."</p> }
            >
                <svg class="chart__plot" viewBox=format!("0 0 {WIDTH} {HEIGHT}") preserveAspectRatio="none">
                    {lines}
                </svg>
                <div class="chart__axis">{axis}</div>
                <div class="chart__legend">{legend}</div>
                <p class="chart__max">{move || format!("Máximo: {}", chart_max(&data.get()))}</p>
            </Show>
        </figure>
    }
}
