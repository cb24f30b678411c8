//! Time-series chart widget.
//!
//! Plots every series against a shared time axis. The visible window is the
//! chart's viewport; wheel zoom and drag pan change it, cursor movement
//! highlights the nearest data index.

use chrono::{TimeZone, Utc};
use iced::mouse;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke, Text};
use iced::{Element, Length, Point, Rectangle, Renderer, Size, Theme};

use framesync_common::{Result, TimelineIndex, Timestamp, ViewportConfig, ViewportRange};

use super::formatting::{format_clock, format_reading, format_span};
use super::theme::{ThemeColors, colors};
use crate::message::Message;
use crate::sync::{ChartAdapter, HighlightEvent, HighlightItem};

/// Left edge of the plot area, in chart pixels.
pub const PLOT_LEFT: f32 = 50.0;
/// Gap between the plot area and the right edge.
pub const PLOT_RIGHT: f32 = 20.0;
const PLOT_TOP: f32 = 36.0;
const PLOT_BOTTOM: f32 = 28.0;

/// Height of the chart canvas.
pub const CHART_HEIGHT: f32 = 320.0;

/// Narrowest viewport zoom can reach.
pub const MIN_SPAN_MS: i64 = 1_000;

/// Zoom factor applied per wheel notch.
const ZOOM_STEP: f64 = 0.8;

/// One plotted series. `values[i]` belongs to the i-th dataset timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub unit: String,
    /// Value range mapped onto the plot height.
    pub axis: (f64, f64),
    pub values: Vec<f64>,
}

impl Series {
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Position of `value` on the axis, 0.0 at the bottom and 1.0 at the top.
    fn normalized(&self, value: f64) -> f32 {
        let (low, high) = self.axis;
        if high <= low {
            return 0.5;
        }
        ((value - low) / (high - low)).clamp(0.0, 1.0) as f32
    }
}

/// State for the time-series chart.
#[derive(Debug)]
pub struct ChartState {
    timeline: TimelineIndex,
    /// Plot positions of the timeline, as Unix epoch milliseconds.
    times: Vec<i64>,
    series: Vec<Series>,
    /// Visible window `(start, end)` in milliseconds; `None` until data is set.
    viewport: Option<(i64, i64)>,
    width: f32,
    /// Highlighted data index.
    crosshair: Option<usize>,
    /// Highlight emitted by a synthetic dispatch, not yet delivered.
    echo: Option<HighlightEvent>,
    cache: Cache,
}

impl ChartState {
    pub fn new(width: f32) -> Self {
        Self {
            timeline: TimelineIndex::new(),
            times: Vec::new(),
            series: Vec::new(),
            viewport: None,
            width: width.max(0.0),
            crosshair: None,
            echo: None,
            cache: Cache::new(),
        }
    }

    /// Replace the plotted data and reset the viewport to the configured
    /// share of the dataset span.
    pub fn set_data(
        &mut self,
        timestamps: &[Timestamp],
        series: Vec<Series>,
        initial: &ViewportConfig,
    ) -> Result<()> {
        let mut timeline = TimelineIndex::new();
        timeline.load(timestamps.to_vec())?;
        self.timeline = timeline;
        self.times = timestamps.iter().map(Timestamp::millis).collect();
        self.series = series;
        self.crosshair = None;
        self.echo = None;

        self.viewport = match (self.times.first(), self.times.last()) {
            (Some(&first), Some(&last)) => {
                let span = (last - first) as f64;
                let start = first + (span * initial.start_percent / 100.0).round() as i64;
                let end = first + (span * initial.end_percent / 100.0).round() as i64;
                Some((start.min(end), end.max(start)))
            }
            _ => None,
        };
        tracing::debug!(points = self.times.len(), viewport = ?self.viewport, "Chart data set");
        self.cache.clear();
        Ok(())
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_width(&mut self, width: f32) {
        let width = width.max(0.0);
        if width != self.width {
            self.width = width;
            self.cache.clear();
        }
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn viewport(&self) -> Option<(i64, i64)> {
        self.viewport
    }

    pub fn crosshair(&self) -> Option<usize> {
        self.crosshair
    }

    pub fn set_crosshair(&mut self, index: Option<usize>) {
        self.crosshair = index.filter(|i| *i < self.times.len());
    }

    /// Highlight produced by the last synthetic dispatch, if any.
    pub fn take_echo(&mut self) -> Option<HighlightEvent> {
        self.echo.take()
    }

    fn plot_width(&self) -> f32 {
        (self.width - PLOT_LEFT - PLOT_RIGHT).max(0.0)
    }

    /// Chart x coordinate of `timestamp_ms`.
    pub fn x_for(&self, timestamp_ms: i64) -> f32 {
        let Some((start, end)) = self.viewport else {
            return PLOT_LEFT;
        };
        let span = end - start;
        if span == 0 {
            return PLOT_LEFT;
        }
        PLOT_LEFT + ((timestamp_ms - start) as f64 / span as f64) as f32 * self.plot_width()
    }

    /// Time under chart coordinate `x`, clamped to the viewport.
    pub fn time_at(&self, x: f32) -> Option<i64> {
        let (start, end) = self.viewport?;
        let plot_width = self.plot_width();
        if plot_width == 0.0 {
            return Some(start);
        }
        let fraction = ((x - PLOT_LEFT) / plot_width).clamp(0.0, 1.0) as f64;
        Some(start + ((end - start) as f64 * fraction).round() as i64)
    }

    /// Index of the visible data point closest to `timestamp_ms`.
    ///
    /// Ties resolve to the earlier point.
    pub fn nearest_index(&self, timestamp_ms: i64) -> Option<usize> {
        let range = self.viewport_range()?;
        let instant = Utc.timestamp_millis_opt(timestamp_ms).single()?;
        match self.timeline.nearest_index_within(&range, instant) {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!(error = %e, "Nearest point lookup failed");
                None
            }
        }
    }

    /// Indices of the data points inside the viewport.
    pub fn visible(&self) -> std::ops::Range<usize> {
        self.viewport_range()
            .and_then(|range| self.timeline.positions(&range).ok())
            .unwrap_or(0..0)
    }

    /// Data index under chart coordinate `x`.
    pub fn index_at(&self, x: f32) -> Option<usize> {
        self.nearest_index(self.time_at(x)?)
    }

    /// Highlight event covering every series at `index`.
    pub fn highlight_event(&self, index: usize) -> HighlightEvent {
        let count = self.series.len().max(1);
        HighlightEvent {
            batch: (0..count)
                .map(|series_index| HighlightItem {
                    series_index,
                    data_index: index,
                })
                .collect(),
        }
    }

    /// Scale the viewport span by `factor` around chart coordinate `anchor`.
    ///
    /// Returns `false` when the viewport did not change.
    pub fn zoom(&mut self, factor: f64, anchor: f32) -> bool {
        let (Some((start, end)), Some(pivot)) = (self.viewport, self.time_at(anchor)) else {
            return false;
        };
        if !(factor > 0.0) {
            return false;
        }

        let span = (((end - start) as f64 * factor).round() as i64).max(MIN_SPAN_MS);
        let left = ((pivot - start) as f64 * factor).round() as i64;
        self.set_window(pivot - left, span)
    }

    /// Shift the viewport by `dx` chart pixels; dragging right moves back in time.
    pub fn pan(&mut self, dx: f32) -> bool {
        let Some((start, end)) = self.viewport else {
            return false;
        };
        let plot_width = self.plot_width();
        if plot_width == 0.0 {
            return false;
        }
        let shift = (-(dx as f64) / plot_width as f64 * (end - start) as f64).round() as i64;
        self.set_window(start + shift, end - start)
    }

    /// Move the viewport to `start..start + span`, kept within the data.
    fn set_window(&mut self, start: i64, span: i64) -> bool {
        let (Some(&first), Some(&last)) = (self.times.first(), self.times.last()) else {
            return false;
        };
        let span = span.min(last - first).max(0);
        let start = start.clamp(first, last - span);
        let next = Some((start, start + span));
        if next == self.viewport {
            return false;
        }
        self.viewport = next;
        self.cache.clear();
        true
    }
}

impl ChartAdapter for ChartState {
    fn viewport_range(&self) -> Option<ViewportRange> {
        let (start, end) = self.viewport?;
        ViewportRange::covering_millis(start, end).ok()
    }

    fn time_to_pixel(&self, timestamp: &Timestamp) -> f32 {
        self.x_for(timestamp.millis())
    }

    fn dispatch_highlight_at(&mut self, x: f32, y: f32) {
        let index = self.index_at(x);
        tracing::trace!(x, y, ?index, "Dispatched chart highlight");
        self.crosshair = index;
        self.echo = index.map(|i| self.highlight_event(i));
    }
}

/// Chart widget that renders the series.
pub struct Chart<'a> {
    state: &'a ChartState,
}

impl<'a> Chart<'a> {
    pub fn new(state: &'a ChartState) -> Self {
        Self { state }
    }
}

/// Pointer state of the chart canvas.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    /// Last pointer position while dragging.
    drag_from: Option<Point>,
    /// Data index the pointer currently highlights.
    hovered: Option<usize>,
}

impl<'a> canvas::Program<Message> for Chart<'a> {
    type State = Interaction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let canvas::Event::Mouse(mouse_event) = event else {
            return None;
        };

        match mouse_event {
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                interaction.drag_from = cursor.position_in(bounds);
                None
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) => {
                interaction.drag_from = None;
                None
            }
            mouse::Event::CursorMoved { .. } => {
                let Some(position) = cursor.position_in(bounds) else {
                    return self.leave(interaction);
                };

                if let Some(from) = interaction.drag_from {
                    interaction.drag_from = Some(position);
                    let dx = position.x - from.x;
                    return (dx != 0.0).then(|| canvas::Action::publish(Message::ChartPan(dx)));
                }

                match self.state.index_at(position.x) {
                    Some(index) if interaction.hovered != Some(index) => {
                        interaction.hovered = Some(index);
                        Some(canvas::Action::publish(Message::ChartHighlight(
                            self.state.highlight_event(index),
                        )))
                    }
                    Some(_) => None,
                    None => self.leave(interaction),
                }
            }
            mouse::Event::CursorLeft => self.leave(interaction),
            mouse::Event::WheelScrolled { delta } => {
                let position = cursor.position_in(bounds)?;
                let scroll = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => *y,
                    mouse::ScrollDelta::Pixels { y, .. } => *y / 50.0,
                };

                let factor = if scroll > 0.0 {
                    ZOOM_STEP
                } else if scroll < 0.0 {
                    1.0 / ZOOM_STEP
                } else {
                    return None;
                };
                Some(canvas::Action::publish(Message::ChartZoom {
                    factor,
                    anchor: position.x,
                }))
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let palette = colors(theme);
        let content = self.state.cache.draw(renderer, bounds.size(), |frame| {
            self.draw_chart(frame, bounds.size(), &palette);
        });

        let mut overlay = Frame::new(renderer, bounds.size());
        self.draw_crosshair(&mut overlay, bounds.size(), &palette);

        vec![content, overlay.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if interaction.drag_from.is_some() {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

impl<'a> Chart<'a> {
    /// Pointer left the plot; downplay whatever was highlighted.
    fn leave(&self, interaction: &mut Interaction) -> Option<canvas::Action<Message>> {
        interaction.drag_from = None;
        interaction
            .hovered
            .take()
            .map(|_| canvas::Action::publish(Message::ChartDownplay))
    }

    fn plot_height(size: Size) -> f32 {
        size.height - PLOT_TOP - PLOT_BOTTOM
    }

    fn y_for(series: &Series, value: f64, plot_height: f32) -> f32 {
        PLOT_TOP + plot_height - series.normalized(value) * plot_height
    }

    /// Draw the chart onto the frame.
    fn draw_chart(&self, frame: &mut Frame, size: Size, palette: &ThemeColors<'_>) {
        let plot_width = self.state.plot_width();
        let plot_height = Self::plot_height(size);

        let background = Path::rectangle(Point::ORIGIN, size);
        frame.fill(&background, palette.chart_outer_background());

        if plot_width <= 0.0 || plot_height <= 0.0 {
            return;
        }

        let plot = Path::rectangle(
            Point::new(PLOT_LEFT, PLOT_TOP),
            Size::new(plot_width, plot_height),
        );
        frame.fill(&plot, palette.chart_background());

        let Some((start, end)) = self.state.viewport else {
            frame.fill_text(Text {
                content: "No data".to_string(),
                position: Point::new(size.width / 2.0 - 30.0, size.height / 2.0),
                color: palette.chart_label(),
                size: 16.0.into(),
                ..Text::default()
            });
            return;
        };

        self.draw_grid(frame, plot_width, plot_height, start, end, palette);
        self.draw_legend(frame, size, palette);

        let visible = self.state.visible();
        for (series_index, series) in self.state.series.iter().enumerate() {
            let mut builder = canvas::path::Builder::new();
            let mut first = true;

            for index in visible.clone() {
                let Some(value) = series.value_at(index) else {
                    break;
                };
                let point = Point::new(
                    self.state.x_for(self.state.times[index]),
                    Self::y_for(series, value, plot_height),
                );
                if first {
                    builder.move_to(point);
                    first = false;
                } else {
                    builder.line_to(point);
                }
            }

            frame.stroke(
                &builder.build(),
                Stroke::default()
                    .with_color(palette.series(series_index))
                    .with_width(1.5),
            );
        }
    }

    /// Draw grid lines and time labels.
    fn draw_grid(
        &self,
        frame: &mut Frame,
        plot_width: f32,
        plot_height: f32,
        start: i64,
        end: i64,
        palette: &ThemeColors<'_>,
    ) {
        let grid = Stroke::default()
            .with_color(palette.chart_grid())
            .with_width(1.0);

        let num_h_lines = 4;
        for i in 0..=num_h_lines {
            let y = PLOT_TOP + (i as f32 / num_h_lines as f32) * plot_height;
            let line = Path::line(Point::new(PLOT_LEFT, y), Point::new(PLOT_LEFT + plot_width, y));
            frame.stroke(&line, grid.clone());
        }

        let num_v_lines = 4;
        for i in 0..=num_v_lines {
            let fraction = i as f64 / num_v_lines as f64;
            let x = PLOT_LEFT + fraction as f32 * plot_width;
            let line = Path::line(
                Point::new(x, PLOT_TOP),
                Point::new(x, PLOT_TOP + plot_height),
            );
            frame.stroke(&line, grid.clone());

            let at = start + ((end - start) as f64 * fraction).round() as i64;
            frame.fill_text(Text {
                content: format_clock(at),
                position: Point::new(x - 24.0, PLOT_TOP + plot_height + 8.0),
                color: palette.chart_label(),
                size: 10.0.into(),
                ..Text::default()
            });
        }

        frame.fill_text(Text {
            content: format!("Window: {}", format_span(end - start)),
            position: Point::new(PLOT_LEFT, 8.0),
            color: palette.chart_label(),
            size: 12.0.into(),
            ..Text::default()
        });
    }

    /// Draw series names, right-aligned above the plot.
    fn draw_legend(&self, frame: &mut Frame, size: Size, palette: &ThemeColors<'_>) {
        let entry_width = 96.0;
        let count = self.state.series.len() as f32;
        let origin = size.width - PLOT_RIGHT - count * entry_width;

        for (i, series) in self.state.series.iter().enumerate() {
            let x = origin + i as f32 * entry_width;
            let swatch = Path::rectangle(Point::new(x, 12.0), Size::new(10.0, 10.0));
            frame.fill(&swatch, palette.series(i));
            frame.fill_text(Text {
                content: series.name.clone(),
                position: Point::new(x + 14.0, 10.0),
                color: palette.chart_label(),
                size: 12.0.into(),
                ..Text::default()
            });
        }
    }

    /// Draw the crosshair and the tooltip for the highlighted index.
    fn draw_crosshair(&self, frame: &mut Frame, size: Size, palette: &ThemeColors<'_>) {
        let Some(index) = self.state.crosshair else {
            return;
        };
        let Some(&at) = self.state.times.get(index) else {
            return;
        };
        if !self.state.visible().contains(&index) {
            return;
        }

        let plot_height = Self::plot_height(size);
        if plot_height <= 0.0 {
            return;
        }
        let x = self.state.x_for(at);

        let line = Path::line(Point::new(x, PLOT_TOP), Point::new(x, PLOT_TOP + plot_height));
        frame.stroke(
            &line,
            Stroke::default()
                .with_color(palette.chart_highlight())
                .with_width(1.0),
        );

        let mut lines = vec![format_clock(at)];
        for (series_index, series) in self.state.series.iter().enumerate() {
            let Some(value) = series.value_at(index) else {
                continue;
            };
            let dot = Path::circle(Point::new(x, Self::y_for(series, value, plot_height)), 3.0);
            frame.fill(&dot, palette.series(series_index));
            lines.push(format!("{}: {}", series.name, format_reading(value, &series.unit)));
        }

        let line_height = 16.0;
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let box_size = Size::new(longest as f32 * 7.0 + 16.0, lines.len() as f32 * line_height + 8.0);
        let box_x = if x + 12.0 + box_size.width > size.width {
            x - 12.0 - box_size.width
        } else {
            x + 12.0
        };
        let origin = Point::new(box_x, PLOT_TOP + 8.0);

        frame.fill(
            &Path::rectangle(origin, box_size),
            palette.chart_tooltip_background(),
        );
        for (i, content) in lines.into_iter().enumerate() {
            frame.fill_text(Text {
                content,
                position: Point::new(origin.x + 8.0, origin.y + 4.0 + i as f32 * line_height),
                color: palette.chart_tooltip_text(),
                size: 12.0.into(),
                ..Text::default()
            });
        }
    }
}

/// Create a chart element.
pub fn chart_view(state: &ChartState) -> Element<'_, Message> {
    Canvas::new(Chart::new(state))
        .width(Length::Fixed(state.width()))
        .height(Length::Fixed(CHART_HEIGHT))
        .into()
}
