//! Transient notifications.

mod state;
mod toast_component;

pub use state::{ActiveToast, MAX_VISIBLE_TOASTS, ToastState};
pub use toast_component::ToastComponent;
