pub mod input;
pub mod notify;
pub mod render;

pub use input::{parse_action, Action, ActionParseError};
pub use notify::{Notification, NotificationLevel};
pub use render::{help_text, print_lines, print_notification, render_session_line, render_view};
