//! Contact section: side panel with the agency's details and the form that
//! hands a pre-filled message to the visitor's mail client.

mod contact_component;
mod state;

use digitalfront_types::ViewportClass;

pub use contact_component::ContactFormComponent;
pub use state::{ContactFormState, SubmitError};

/// Rows taken by the side panel when it is stacked above the form.
pub const SIDE_PANEL_HEIGHT: u16 = 12;
/// Rows taken by the form when name and email share a row.
pub const FORM_HEIGHT_DESKTOP: u16 = 18;
/// Rows taken by the form with every input on its own row.
pub const FORM_HEIGHT_MOBILE: u16 = 21;

/// Height of the whole contact block for a layout.
pub fn contact_block_height(viewport: ViewportClass) -> u16 {
    match viewport {
        ViewportClass::Desktop => FORM_HEIGHT_DESKTOP,
        ViewportClass::Mobile => SIDE_PANEL_HEIGHT + FORM_HEIGHT_MOBILE,
    }
}
