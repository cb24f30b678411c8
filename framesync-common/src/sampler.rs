//! Downsampling of the visible timestamps to the thumbnails that fit the strip.

/// Number of whole thumbnails that fit in a container.
///
/// Non-positive or non-finite widths yield zero.
pub fn capacity(container_width: f32, thumbnail_width: f32) -> usize {
    if !(thumbnail_width > 0.0) || !(container_width > 0.0) || !container_width.is_finite() {
        return 0;
    }
    (container_width / thumbnail_width).floor() as usize
}

/// Pick the items to display for a container of the given width.
///
/// Everything is kept when it fits. Otherwise every `ceil(n / capacity)`-th
/// item is taken starting from the first, which keeps order, never exceeds
/// the capacity and always includes the earliest item.
pub fn sample<T: Clone>(items: &[T], container_width: f32, thumbnail_width: f32) -> Vec<T> {
    let capacity = capacity(container_width, thumbnail_width);
    if items.len() <= capacity {
        return items.to_vec();
    }
    if capacity == 0 {
        return Vec::new();
    }

    let stride = items.len().div_ceil(capacity);
    items.iter().step_by(stride).cloned().collect()
}
