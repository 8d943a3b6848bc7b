//! UI components: navigation bar, page, contact form, toasts.

pub mod common;
pub mod component;
pub mod contact;
pub mod nav_bar;
pub mod page;
pub mod toast;

pub use component::*;
pub use contact::ContactFormComponent;
pub use nav_bar::NavBarComponent;
pub use page::PageComponent;
pub use toast::ToastComponent;
