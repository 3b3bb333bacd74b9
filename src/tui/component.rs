use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Props arrive as struct fields. Wrappers over persistent state hold
/// `&mut` borrows so `render` can update things like scroll offsets.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Persistent component state that reacts to terminal input.
pub trait EventHandler {
    /// What the component reports upwards, e.g. a module to add.
    type Event;

    /// Returns `Some` when the input means something beyond the component.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
