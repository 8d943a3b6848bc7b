//! The single scrolling page: hero, content sections and the contact block.

mod page_component;
mod scroll_spy;
mod state;

pub use page_component::PageComponent;
pub use scroll_spy::{PageViewport, ScrollSpy, SectionObserver, SectionSpan};
pub use state::{CONTACT_SECTION_ID, PageState, SectionLayout};
