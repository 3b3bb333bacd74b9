//! # TUI Components
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status bar showing the server, status and last error
//!
//! ## Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a transient wrapper borrowing it is
//! built each frame with the props it needs.
//!
//! - `ModuleInput`: text input with catalog suggestions, emits `InputEvent`
//! - `ChosenList`: the chosen modules, emits `ChosenEvent`
//! - `TimetableView`: scrollable aggregated timetable
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (top status bar)
//! ├── module_input.rs    (input + suggestions)
//! ├── chosen_list.rs     (chosen modules)
//! └── timetable_view.rs  (aggregated timetable)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod chosen_list;
pub mod module_input;
pub mod timetable_view;
pub use chosen_list::{ChosenEvent, ChosenList, ChosenListState};
pub use module_input::{InputEvent, ModuleInput, ModuleInputState};
pub use timetable_view::{TimetableView, TimetableViewState};
