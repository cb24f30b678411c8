use std::time::Duration;

use iced::Subscription;

use crate::message::Message;

/// Interval of the tick that drains the highlight debounce.
pub const DEBOUNCE_TICK: Duration = Duration::from_millis(10);

/// Emit the new size whenever the window is resized.
pub fn resize_subscription() -> Subscription<Message> {
    iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size))
}

/// Create a tick subscription that drives pending debounced actions.
pub fn debounce_subscription() -> Subscription<Message> {
    iced::time::every(DEBOUNCE_TICK).map(|_| Message::Tick)
}
