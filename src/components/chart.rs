//! Chart Component
//!
//! Daily passenger series chart using HTML5 Canvas, with event and holiday
//! day markers.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::format::format_date_fr;
use crate::state::global::DayPoint;

/// Series color (passenger counts)
const LINE_COLOR: &str = "#3b82f6";
/// Marker color for event days
const EVENT_COLOR: &str = "#ef4444";
/// Marker color for holiday days
const HOLIDAY_COLOR: &str = "#22c55e";

/// Rendering style of the daily series
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

/// Daily passenger chart
#[component]
pub fn Chart(
    #[prop(into)]
    series: Signal<Vec<DayPoint>>,
    #[prop(into)]
    kind: Signal<ChartKind>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw when the series or the chart type changes
    create_effect(move |_| {
        let points = series.get();
        let kind = kind.get();

        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &points, kind);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="w-full h-64 md:h-96 rounded-lg"
            />

            // Legend
            <div class="flex justify-center flex-wrap gap-4 mt-4 text-sm text-gray-600">
                <LegendEntry color=LINE_COLOR label="Prédiction passagers (moyenne)" />
                <LegendEntry color=EVENT_COLOR label="Jours avec événements" />
                <LegendEntry color=HOLIDAY_COLOR label="Jours de vacances" />
            </div>
        </div>
    }
}

#[component]
fn LegendEntry(color: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <div class="flex items-center space-x-2">
            <div
                class="w-3 h-3 rounded-full"
                style=format!("background-color: {}", color)
            />
            <span>{label}</span>
        </div>
    }
}

/// Line/bar chart type toggle
#[component]
pub fn ChartTypeToggle(
    #[prop(into)]
    kind: Signal<ChartKind>,
    #[prop(into)]
    set_kind: Callback<ChartKind>,
) -> impl IntoView {
    view! {
        <div class="flex items-center space-x-2">
            <ChartTypeButton label="Ligne" target=ChartKind::Line kind set_kind />
            <ChartTypeButton label="Barres" target=ChartKind::Bar kind set_kind />
        </div>
    }
}

#[component]
fn ChartTypeButton(
    label: &'static str,
    target: ChartKind,
    #[prop(into)]
    kind: Signal<ChartKind>,
    #[prop(into)]
    set_kind: Callback<ChartKind>,
) -> impl IntoView {
    view! {
        <button
            on:click=move |_| set_kind.call(target)
            class=move || {
                let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                if kind.get() == target {
                    format!("{} bg-blue-600 text-white", base)
                } else {
                    format!("{} bg-gray-200 text-gray-600 hover:bg-gray-300", base)
                }
            }
        >
            {label}
        </button>
    }
}

/// Y-axis bounds with 10% padding around the data
fn y_bounds(points: &[DayPoint]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for point in points {
        min = min.min(point.value);
        max = max.max(point.value);
    }

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let range = max - min;
    let padding = if range > 0.0 { range * 0.1 } else { 1.0 };
    (min - padding, max + padding)
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, points: &[DayPoint], kind: ChartKind) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 60.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    if points.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("Aucune donnée à afficher", width / 2.0 - 90.0, height / 2.0);
        return;
    }

    let (y_min, y_max) = y_bounds(points);
    let y_span = y_max - y_min;

    // X position of the i-th day (category scale, evenly spaced)
    let n = points.len();
    let x_at = |i: usize| margin_left + ((i as f64 + 0.5) / n as f64) * chart_width;
    let y_at = |value: f64| margin_top + ((y_max - value) / y_span) * chart_height;

    // Grid lines and y-axis labels
    ctx.set_stroke_style(&"#e5e7eb".into());
    ctx.set_line_width(1.0);
    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 5.0) * y_span;
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    match kind {
        ChartKind::Line => {
            ctx.set_stroke_style(&LINE_COLOR.into());
            ctx.set_line_width(2.0);
            ctx.begin_path();
            for (i, point) in points.iter().enumerate() {
                let x = x_at(i);
                let y = y_at(point.value);
                if i == 0 {
                    ctx.move_to(x, y);
                } else {
                    ctx.line_to(x, y);
                }
            }
            ctx.stroke();

            ctx.set_fill_style(&LINE_COLOR.into());
            for (i, point) in points.iter().enumerate() {
                ctx.begin_path();
                let _ = ctx.arc(x_at(i), y_at(point.value), 3.0, 0.0, std::f64::consts::PI * 2.0);
                ctx.fill();
            }
        }
        ChartKind::Bar => {
            let bar_width = (chart_width / n as f64) * 0.6;
            ctx.set_fill_style(&LINE_COLOR.into());
            for (i, point) in points.iter().enumerate() {
                let x = x_at(i) - bar_width / 2.0;
                let y = y_at(point.value);
                ctx.fill_rect(x, y, bar_width, margin_top + chart_height - y);
            }
        }
    }

    // Event and holiday day markers
    for (i, point) in points.iter().enumerate() {
        if point.has_event {
            ctx.set_fill_style(&EVENT_COLOR.into());
            ctx.begin_path();
            let _ = ctx.arc(x_at(i), y_at(point.value), 6.0, 0.0, std::f64::consts::PI * 2.0);
            ctx.fill();
        }
        if point.has_holiday {
            ctx.set_fill_style(&HOLIDAY_COLOR.into());
            ctx.begin_path();
            let _ = ctx.arc(x_at(i), y_at(point.value), 4.0, 0.0, std::f64::consts::PI * 2.0);
            ctx.fill();
        }
    }

    // X-axis labels: at most 6, in DD/MM/YYYY
    ctx.set_fill_style(&"#6b7280".into());
    ctx.set_font("12px sans-serif");
    let step = (n / 6).max(1);
    for (i, point) in points.iter().enumerate().step_by(step) {
        let label = format_date_fr(&point.date);
        let _ = ctx.fill_text(&label, x_at(i) - 30.0, height - 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, value: f64) -> DayPoint {
        DayPoint {
            date: date.to_string(),
            value,
            has_event: false,
            event_name: None,
            has_holiday: false,
            holiday_name: None,
        }
    }

    #[test]
    fn y_bounds_pads_range() {
        let (min, max) = y_bounds(&[point("2024-03-01", 100.0), point("2024-03-02", 200.0)]);
        assert_eq!(min, 90.0);
        assert_eq!(max, 210.0);
    }

    #[test]
    fn y_bounds_flat_series_still_has_span() {
        let (min, max) = y_bounds(&[point("2024-03-01", 50.0)]);
        assert!(max > min);
    }

    #[test]
    fn y_bounds_empty_defaults() {
        assert_eq!(y_bounds(&[]), (0.0, 1.0));
    }
}
