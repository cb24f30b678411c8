//! Thumbnail strip rendering.

use framesync_common::ThumbnailDescriptor;

use super::ThumbnailView;
use super::tracker::TargetHighlight;

/// Replace the strip contents with `descriptors`.
///
/// An empty list shows the empty-state indicator instead of the row.
/// Rendering is full replacement, so repeating a call is idempotent.
pub fn render<V: ThumbnailView>(view: &mut V, descriptors: Vec<ThumbnailDescriptor>) {
    view.clear();

    if descriptors.is_empty() {
        view.set_empty_state(true);
        tracing::debug!("Strip empty");
        return;
    }

    view.set_empty_state(false);
    let count = descriptors.len();
    for descriptor in descriptors {
        view.append(descriptor);
    }
    tracing::debug!(count, "Rendered strip");
}

/// In-memory strip model.
///
/// The desktop view draws from it and tests inspect it directly. Before the
/// first render neither the row nor the empty-state indicator is shown.
#[derive(Debug, Clone, Default)]
pub struct StripState {
    width: f32,
    thumbnails: Vec<ThumbnailDescriptor>,
    row_visible: bool,
    empty_visible: bool,
    target: Option<TargetHighlight>,
}

impl StripState {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(0.0);
    }

    /// Thumbnails in display order.
    pub fn thumbnails(&self) -> &[ThumbnailDescriptor] {
        &self.thumbnails
    }

    pub fn row_visible(&self) -> bool {
        self.row_visible
    }

    pub fn empty_visible(&self) -> bool {
        self.empty_visible
    }

    /// The highlighted (target) thumbnail and its horizontal offset.
    pub fn target(&self) -> Option<&TargetHighlight> {
        self.target.as_ref()
    }

    /// Whether the container currently shows a target thumbnail.
    pub fn showing_target(&self) -> bool {
        self.target.is_some()
    }

    /// Look up a rendered thumbnail by its source timestamp string.
    pub fn find(&self, timestamp: &str) -> Option<&ThumbnailDescriptor> {
        self.thumbnails
            .iter()
            .find(|d| d.timestamp.as_str() == timestamp)
    }
}

impl ThumbnailView for StripState {
    fn container_width(&self) -> f32 {
        self.width
    }

    fn clear(&mut self) {
        self.thumbnails.clear();
    }

    fn append(&mut self, descriptor: ThumbnailDescriptor) {
        self.thumbnails.push(descriptor);
    }

    fn set_empty_state(&mut self, empty: bool) {
        self.empty_visible = empty;
        self.row_visible = !empty;
    }

    fn upsert_highlighted(&mut self, descriptor: &ThumbnailDescriptor, offset: f32) {
        match &mut self.target {
            Some(target) => {
                target.descriptor.clone_from(descriptor);
                target.offset = offset;
            }
            None => {
                self.target = Some(TargetHighlight {
                    descriptor: descriptor.clone(),
                    offset,
                });
            }
        }
    }

    fn remove_highlighted(&mut self) {
        self.target = None;
    }
}
