pub mod scroll_metrics;
pub mod scrollbar;
pub mod text_input;
pub mod visibility;

pub use scroll_metrics::ScrollMetrics;
pub use scrollbar::render_vertical_scrollbar;
pub use text_input::TextInputState;
pub use visibility::{DEFAULT_REVEAL_THRESHOLD, VisibilityObserver};
