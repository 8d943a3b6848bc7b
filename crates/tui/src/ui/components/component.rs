//! Component system for the Digital Front terminal site.
//!
//! Components are self-contained UI elements that handle their own events
//! and rendering while sharing state through [`App`]. They never perform
//! side effects directly; they return [`Effect`]s for the runtime to execute.

use crossterm::event::{KeyEvent, MouseEvent};
use digitalfront_types::{Effect, Msg};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::Span,
};

use crate::app::App;

/// A UI component with its own event handling and rendering.
///
/// # Component Lifecycle
///
/// 1. **Messages**: `handle_message()` receives system messages (ticks,
///    resizes, completed side effects)
/// 2. **Input**: `handle_key_events()` and `handle_mouse_events()` receive
///    terminal input routed by the main view
/// 3. **Rendering**: `render()` draws into the given area and records any
///    hit-test areas on the component's state
pub trait Component {
    /// Handle an application message. The default forwards it to [`App::update`].
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        app.update(&msg)
    }

    /// Handle key events while this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events that landed on this component.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations may record layout (areas for mouse hit testing) on
    /// their state but must not change anything the user can observe.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hint bar while this component has focus.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }

    /// Areas this component splits `area` into.
    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        vec![area]
    }
}

/// Index of the first area in `areas` containing (`x`, `y`), provided the
/// point is inside `container` at all.
pub fn find_target_index_by_mouse_position(container: &Rect, areas: &[Rect], x: u16, y: u16) -> Option<usize> {
    let position = Position::new(x, y);
    if !container.contains(position) {
        return None;
    }
    areas.iter().position(|area| area.contains(position))
}
