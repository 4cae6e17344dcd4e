use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::infra::import::SUPPORTED_EXTENSIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info,
    Success,
    Error,
}

/// `None` when the user cancels.
pub fn pick_spreadsheet() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select spreadsheet")
        .add_filter("Excel", &["xlsx", "xlsm", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("All spreadsheets", SUPPORTED_EXTENSIONS)
        .pick_file()
}

pub fn notify(kind: Notice, title: &str, message: &str) {
    let level = match kind {
        Notice::Info | Notice::Success => MessageLevel::Info,
        Notice::Error => MessageLevel::Error,
    };
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

pub fn confirm(title: &str, message: &str) -> bool {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::YesNo)
        .show()
        == MessageDialogResult::Yes
}
