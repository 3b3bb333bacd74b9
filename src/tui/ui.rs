use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::{App, CatalogStatus};
use crate::tui::component::Component;
use crate::tui::components::{ChosenList, ModuleInput, TimetableView, TitleBar};
use crate::tui::{Focus, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min, Percentage};

    // Input grows upwards when suggestions are showing
    let input_height = if tui.focus == Focus::Input {
        tui.module_input.height()
    } else {
        3
    };
    let [title_area, main_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(frame.area());
    let [chosen_area, timetable_area] =
        Layout::horizontal([Percentage(40), Percentage(60)]).areas(main_area);

    TitleBar::new(
        tui.server.clone(),
        app.status_message.clone(),
        app.error.clone(),
        app.is_loading(),
    )
    .render(frame, title_area);

    ChosenList::new(&mut tui.chosen_list, tui.focus == Focus::Chosen).render(frame, chosen_area);

    TimetableView::new(
        &mut tui.timetable_view,
        app.selection.list(),
        app.timetable.current(),
        app.is_refreshing(),
    )
    .render(frame, timetable_area);

    ModuleInput::new(
        &tui.module_input,
        tui.focus == Focus::Input,
        app.catalog_status == CatalogStatus::Ready,
    )
    .render(frame, input_area);
}
