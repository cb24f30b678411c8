//! FrameSync Iced application.

use std::time::Instant;

use iced::widget::{column, row, text};
use iced::{Alignment, Element, Size, Subscription, Task, Theme};

use framesync_common::{FrameSyncConfig, Timestamp, load_dataset};

use crate::demo::demo_series;
use crate::message::Message;
use crate::subscription::{debounce_subscription, resize_subscription};
use crate::sync::{StripState, Synchronizer, render};
use crate::view::chart::{ChartState, chart_view};
use crate::view::theme;
use crate::view::thumbnails::thumbnails_view;

/// Initial window size.
pub const WINDOW_SIZE: Size = Size::new(1280.0, 640.0);

/// Padding around the page; the chart and the strip share its left edge.
pub const PADDING: f32 = 16.0;

/// Width available to the chart and the strip in a window `window_width` wide.
pub fn content_width(window_width: f32) -> f32 {
    (window_width - PADDING * 2.0).max(0.0)
}

/// Dataset loading progress.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready { frames: usize },
    Failed(String),
}

/// The main FrameSync application.
pub struct FrameSync {
    config: FrameSyncConfig,
    chart: ChartState,
    sync: Synchronizer<StripState>,
    load_state: LoadState,
}

impl FrameSync {
    /// Create the application without starting the dataset load.
    pub fn new(config: FrameSyncConfig) -> Self {
        let width = content_width(WINDOW_SIZE.width);
        let sync = Synchronizer::new(StripState::new(width), &config.thumbnails);

        Self {
            config,
            chart: ChartState::new(width),
            sync,
            load_state: LoadState::Loading,
        }
    }

    /// Boot the FrameSync application (called by iced::application).
    pub fn boot(config: FrameSyncConfig) -> (Self, Task<Message>) {
        let app = Self::new(config);
        let source = app.config.dataset.clone();

        let task = Task::perform(
            async move { load_dataset(&source).await.map_err(|e| e.to_string()) },
            Message::DatasetLoaded,
        );

        (app, task)
    }

    /// Get the window title.
    pub fn title(&self) -> String {
        match self.load_state {
            LoadState::Ready { frames } => format!("FrameSync - {} frames", frames),
            _ => "FrameSync".to_string(),
        }
    }

    pub fn config(&self) -> &FrameSyncConfig {
        &self.config
    }

    pub fn chart(&self) -> &ChartState {
        &self.chart
    }

    pub fn sync(&self) -> &Synchronizer<StripState> {
        &self.sync
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Handle incoming messages.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        self.update_at(message, Instant::now())
    }

    /// Handle `message` as if it arrived at `now`.
    pub fn update_at(&mut self, message: Message, now: Instant) -> Task<Message> {
        match message {
            Message::DatasetLoaded(Ok(timestamps)) => match self.load_timeline(timestamps) {
                Ok(rendered) => {
                    let frames = self.sync.index().len();
                    tracing::info!(frames, rendered, "Dataset loaded");
                    self.load_state = LoadState::Ready { frames };
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load timeline");
                    self.load_state = LoadState::Failed(e.to_string());
                }
            },

            Message::DatasetLoaded(Err(error)) => {
                tracing::error!(error = %error, source = %self.config.dataset, "Failed to load dataset");
                self.load_state = LoadState::Failed(error);
            }

            Message::ChartZoom { factor, anchor } => {
                if self.chart.zoom(factor, anchor) {
                    self.refresh_strip();
                }
            }

            Message::ChartPan(dx) => {
                if self.chart.pan(dx) {
                    self.refresh_strip();
                }
            }

            Message::ChartHighlight(event) => {
                self.chart.set_crosshair(event.data_index());
                if let Err(e) = self.sync.on_highlight(&event, now) {
                    tracing::warn!(error = %e, "Ignoring chart highlight");
                }
            }

            Message::ChartDownplay => {
                self.chart.set_crosshair(None);
                self.sync.on_downplay(now);
            }

            Message::ThumbnailEntered(timestamp) => {
                self.sync.on_thumbnail_enter(timestamp, &mut self.chart);
                // The chart reports its own highlight back; it lands while suppressed.
                if let Some(echo) = self.chart.take_echo() {
                    if let Err(e) = self.sync.on_highlight(&echo, now) {
                        tracing::warn!(error = %e, "Ignoring chart highlight");
                    }
                }
            }

            Message::ThumbnailLeft(timestamp) => {
                self.sync.on_thumbnail_leave(&timestamp);
            }

            Message::WindowResized(size) => {
                self.resize(size.width);
            }

            Message::Tick => {
                self.sync.tick(&self.chart, now);
            }
        }

        Task::none()
    }

    /// Resize events always; the fast tick only while a highlight is pending.
    pub fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![resize_subscription()];
        if self.sync.has_pending() {
            subscriptions.push(debounce_subscription());
        }
        Subscription::batch(subscriptions)
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        column![
            self.header(),
            chart_view(&self.chart),
            thumbnails_view(
                self.sync.view(),
                &self.config.frames_dir,
                self.config.thumbnails.width
            ),
        ]
        .spacing(12)
        .padding(PADDING)
        .into()
    }

    /// Get the application theme.
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn header(&self) -> Element<'_, Message> {
        let status = match &self.load_state {
            LoadState::Loading => text(format!("Loading dataset from {}", self.config.dataset))
                .size(14)
                .style(|t: &Theme| text::Style {
                    color: Some(theme::colors(t).text_muted()),
                }),
            LoadState::Ready { frames } => {
                text(format!("{} frames", frames))
                    .size(14)
                    .style(|t: &Theme| text::Style {
                        color: Some(theme::colors(t).text_muted()),
                    })
            }
            LoadState::Failed(error) => text(format!("Failed to load dataset: {}", error))
                .size(14)
                .style(|t: &Theme| text::Style {
                    color: Some(theme::colors(t).text_error()),
                }),
        };

        row![text("FrameSync").size(20), status]
            .spacing(20)
            .align_y(Alignment::Center)
            .into()
    }

    /// Install a (re)loaded timeline into the synchronizer and the chart.
    fn load_timeline(&mut self, timestamps: Vec<Timestamp>) -> framesync_common::Result<usize> {
        self.sync.load(timestamps)?;

        let timestamps = self.sync.index().timestamps()?;
        let series = demo_series(timestamps)?;
        self.chart.set_data(timestamps, series, &self.config.viewport)?;
        self.sync.hide_target();

        if self.chart.viewport().is_none() {
            render(self.sync.view_mut(), Vec::new());
            return Ok(0);
        }
        self.sync.on_viewport_change(&self.chart)
    }

    fn refresh_strip(&mut self) {
        if let Err(e) = self.sync.on_viewport_change(&self.chart) {
            tracing::warn!(error = %e, "Failed to refresh thumbnail strip");
        }
    }

    fn resize(&mut self, window_width: f32) {
        let width = content_width(window_width);
        self.chart.set_width(width);
        self.sync.view_mut().set_width(width);

        if !self.sync.index().is_loaded() {
            return;
        }
        if let Err(e) = self.sync.on_resize(&self.chart) {
            tracing::warn!(error = %e, "Failed to relayout after resize");
        }
    }
}
