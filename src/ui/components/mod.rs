mod email_list;
mod help;
mod popup;
mod result;

pub use email_list::{EmailRow, render_email_list};
pub use help::render_help_popup;
pub use result::{email_lines, result_lines};
