//! Thumbnail strip view.
//!
//! Draws the [`StripState`] model: the row of sampled thumbnails (or the
//! empty-state text) with the target thumbnail layered on top at its offset.

use std::path::Path;

use iced::widget::{Column, Row, Stack, column, container, image, mouse_area, text};
use iced::{Element, Length, Padding, Theme};

use framesync_common::{ThumbnailDescriptor, resolve};

use crate::message::Message;
use crate::sync::{StripState, ThumbnailView};
use crate::view::theme;

/// Shown when the viewport holds no thumbnails.
pub const EMPTY_TEXT: &str = "No thumbnails in the visible range";

/// Frame images are 16:9.
const ASPECT: f32 = 9.0 / 16.0;
const CAPTION_HEIGHT: f32 = 18.0;

/// Height of the strip for thumbnails `thumbnail_width` wide.
pub fn strip_height(thumbnail_width: f32) -> f32 {
    thumbnail_width * ASPECT + CAPTION_HEIGHT + 8.0
}

/// Render the thumbnail strip.
pub fn thumbnails_view<'a>(
    strip: &'a StripState,
    frames_dir: &'a Path,
    thumbnail_width: f32,
) -> Element<'a, Message> {
    let body: Element<'a, Message> = if strip.row_visible() {
        Row::with_children(
            strip
                .thumbnails()
                .iter()
                .map(|descriptor| hover_tile(descriptor, frames_dir, thumbnail_width)),
        )
        .into()
    } else if strip.empty_visible() {
        container(
            text(EMPTY_TEXT)
                .size(14)
                .style(|t: &Theme| text::Style {
                    color: Some(theme::colors(t).text_muted()),
                }),
        )
        .padding(12)
        .into()
    } else {
        Column::new().into()
    };

    let mut layers = Stack::new().push(body);

    if let Some(target) = strip.target() {
        let highlighted = container(tile(&target.descriptor, frames_dir, thumbnail_width))
            .style(target_style);
        layers = layers.push(container(highlighted).padding(Padding {
            left: target.offset.max(0.0),
            ..Padding::ZERO
        }));
    }

    container(layers)
        .width(Length::Fixed(strip.container_width()))
        .height(Length::Fixed(strip_height(thumbnail_width)))
        .style(|t: &Theme| container::Style {
            background: Some(iced::Background::Color(theme::colors(t).strip_background())),
            ..Default::default()
        })
        .into()
}

/// Image and caption for one thumbnail.
fn tile<'a>(
    descriptor: &ThumbnailDescriptor,
    frames_dir: &Path,
    width: f32,
) -> Element<'a, Message> {
    let handle = image::Handle::from_path(resolve(frames_dir, &descriptor.url));

    column![
        image(handle)
            .width(Length::Fixed(width))
            .height(Length::Fixed(width * ASPECT)),
        text(descriptor.timestamp.as_str().to_string())
            .size(10)
            .style(|t: &Theme| text::Style {
                color: Some(theme::colors(t).text_muted()),
            }),
    ]
    .spacing(2)
    .width(Length::Fixed(width))
    .into()
}

/// Strip tile that reports pointer enter/leave.
fn hover_tile<'a>(
    descriptor: &ThumbnailDescriptor,
    frames_dir: &Path,
    width: f32,
) -> Element<'a, Message> {
    mouse_area(tile(descriptor, frames_dir, width))
        .on_enter(Message::ThumbnailEntered(descriptor.timestamp.clone()))
        .on_exit(Message::ThumbnailLeft(descriptor.timestamp.clone()))
        .into()
}

fn target_style(t: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(theme::colors(t).chart_background())),
        border: iced::Border {
            color: theme::colors(t).target_border(),
            width: 2.0,
            radius: 2.0.into(),
        },
        ..Default::default()
    }
}
