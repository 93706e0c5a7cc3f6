pub mod chat_view;
pub mod main_window;
pub mod motion;
pub mod sidebar;
pub mod theme;

use adw::Application;

pub fn build_ui(app: &Application) {
    let settings = crate::app::Settings::load();
    theme::install();
    main_window::show_main_window(app, settings);
}
