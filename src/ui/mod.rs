//! UI module for rendering the TUI

mod analytics;
mod components;
mod dashboard;
mod forms;
mod layout;
mod widgets;
mod workflow_detail;
mod workflows;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (sidebar_area, main_area) = layout::create_layout(frame.area());

    layout::draw_sidebar(frame, sidebar_area, app);

    match app.state.current_view {
        View::Dashboard => dashboard::draw(frame, main_area, app),
        View::Workflows => workflows::draw(frame, main_area, app),
        View::WorkflowDetail => workflow_detail::draw(frame, main_area, app),
        View::Analytics => analytics::draw(frame, main_area, app),
        View::NewOnboarding => forms::draw_wizard(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);
}
