//! Drawing of the graph.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

use super::{model::ChartModel, style::Styles, view::ViewWindow};

const TITLE: &str = "Metrics Tracker";
const PLACEHOLDER: &str = "No data recorded yet";
const KEY_HELP: &str = "+/- zoom  \u{2190}/\u{2192} pan  r reset  q quit";

/// Main render function. Without data or a window only a placeholder is drawn.
pub fn render(frame: &mut Frame, model: &ChartModel, view: Option<&ViewWindow>) {
    let [chart_area, status_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(frame.area());

    match view.filter(|_| !model.is_empty()) {
        Some(view) => render_chart(frame, chart_area, model, view),
        None => render_placeholder(frame, chart_area),
    }
    render_status(frame, status_area, view);
}

fn chart_block() -> Block<'static> {
    Block::bordered().title(Span::styled(TITLE, Styles::title()))
}

fn render_placeholder(frame: &mut Frame, area: Rect) {
    let block = chart_block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let row = Rect {
        y: inner.y + inner.height / 2,
        height: inner.height.min(1),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(PLACEHOLDER)
            .style(Styles::placeholder())
            .alignment(Alignment::Center),
        row,
    );
}

fn render_chart(frame: &mut Frame, area: Rect, model: &ChartModel, view: &ViewWindow) {
    let x_bounds = view.bounds();
    // One extra day on each side keeps segments that enter the window.
    let visible = |point: &&(f64, f64)| x_bounds[0] - 1. <= point.0 && point.0 <= x_bounds[1] + 1.;

    let clipped = model
        .series
        .iter()
        .map(|series| {
            let line = series.line.iter().filter(visible).copied().collect::<Vec<_>>();
            let points = series.points.iter().filter(visible).copied().collect::<Vec<_>>();
            (series, line, points)
        })
        .collect::<Vec<_>>();

    let mut datasets = Vec::with_capacity(clipped.len() * 2);
    for (series, line, points) in &clipped {
        let style = Style::default().fg(series.color);
        datasets.push(
            Dataset::default()
                .name(legend_name(&series.name, points, x_bounds))
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(style)
                .data(line),
        );
        datasets.push(
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(style)
                .data(points),
        );
    }

    let y_bounds = value_bounds(
        clipped.iter().flat_map(|(_, line, _)| line.iter()),
        x_bounds,
    );

    let chart = Chart::new(datasets)
        .block(chart_block())
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Styles::axis())
                .bounds(x_bounds)
                .labels(view.labels(area.width)),
        )
        .y_axis(
            Axis::default()
                .title("Measurement")
                .style(Styles::axis())
                .bounds(y_bounds)
                .labels(value_labels(y_bounds)),
        )
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Percentage(50), Constraint::Percentage(50)));

    frame.render_widget(chart, area);
}

/// Metric name followed by the latest recorded value inside of `x_bounds`, if there is one.
fn legend_name(name: &str, points: &[(f64, f64)], x_bounds: [f64; 2]) -> String {
    points
        .iter()
        .rev()
        .find(|(x, _)| x_bounds[0] <= *x && *x <= x_bounds[1])
        .map(|(_, value)| format!("{name}  {value:.1}"))
        .unwrap_or_else(|| name.to_string())
}

fn render_status(frame: &mut Frame, area: Rect, view: Option<&ViewWindow>) {
    let text = match view {
        Some(view) => {
            let current = view.current();
            format!(
                " {} .. {}  |  {KEY_HELP}",
                current.start().format("%Y-%m-%d"),
                current.end().format("%Y-%m-%d")
            )
        }
        None => " q quit".to_string(),
    };
    frame.render_widget(Paragraph::new(Line::from(text)).style(Styles::status()), area);
}

/// Bounds for values that are inside of `x_bounds`, padded by 5%. Flat values get a band of 1 on
/// each side.
pub fn value_bounds<'a>(
    points: impl IntoIterator<Item = &'a (f64, f64)>,
    x_bounds: [f64; 2],
) -> [f64; 2] {
    let range = points
        .into_iter()
        .filter(|(x, _)| x_bounds[0] <= *x && *x <= x_bounds[1])
        .fold(None, |range: Option<(f64, f64)>, (_, y)| match range {
            Some((min, max)) => Some((min.min(*y), max.max(*y))),
            None => Some((*y, *y)),
        });
    match range {
        None => [0., 1.],
        Some((min, max)) if min == max => [min - 1., max + 1.],
        Some((min, max)) => {
            let padding = (max - min) * 0.05;
            [min - padding, max + padding]
        }
    }
}

fn value_labels([min, max]: [f64; 2]) -> Vec<String> {
    [min, (min + max) / 2., max]
        .into_iter()
        .map(|v| format!("{v:.1}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use crate::{
        series::{interpolation::FillPolicy, DateRange},
        storage::entities::{Dataset, Metric},
        tui::{model::ChartModel, view::ViewWindow},
    };

    use super::{legend_name, render, value_bounds};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_empty_model_renders_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();

        terminal
            .draw(|frame| render(frame, &ChartModel::default(), None))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Metrics Tracker"));
        assert!(text.contains("No data recorded yet"));
    }

    #[test]
    fn test_chart_shows_metrics_and_window() {
        let dataset = Dataset::from_iter([(
            "pushups",
            Metric::from_iter([(day(1), 10.), (day(3), 20.)]),
        )]);
        let model = ChartModel::build(&dataset, FillPolicy::Linear);
        let view = ViewWindow::new(model.span.unwrap(), None);
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();

        terminal
            .draw(|frame| render(frame, &model, Some(&view)))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("pushups  20.0"));
        assert!(text.contains("Measurement"));
        assert!(text.contains("2023-12-31 .. 2024-01-04"));
        assert!(!text.contains("No data recorded yet"));
    }

    #[test]
    fn test_legend_shows_latest_visible_value() {
        let dataset = Dataset::from_iter([(
            "pushups",
            Metric::from_iter([(day(1), 10.), (day(3), 20.)]),
        )]);
        let model = ChartModel::build(&dataset, FillPolicy::Linear);
        let view = ViewWindow::new(model.span.unwrap(), DateRange::new(day(1), day(2)));
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();

        terminal
            .draw(|frame| render(frame, &model, Some(&view)))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("pushups  10.0"));
        assert!(!text.contains("pushups  20.0"));
    }

    #[test]
    fn test_legend_name_without_visible_values() {
        let points = [(1., 10.), (3., 20.)];
        assert_eq!(legend_name("pushups", &points, [4., 8.]), "pushups");
        assert_eq!(legend_name("pushups", &points, [0., 2.]), "pushups  10.0");
    }

    #[test]
    fn test_value_bounds() {
        let points = [(1., 10.), (2., 20.), (5., 100.)];
        assert_eq!(value_bounds(&points, [0., 3.]), [9.5, 20.5]);
        assert_eq!(value_bounds(&points[..1], [0., 3.]), [9., 11.]);
        assert_eq!(value_bounds(&points, [10., 20.]), [0., 1.]);
    }
}
