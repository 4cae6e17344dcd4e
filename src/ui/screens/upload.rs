use dioxus::prelude::*;
use tracing::error;

use crate::context::AppContext;
use crate::domain::entities::activity::ScreenActivity;
use crate::platform::desktop::blocking::run_blocking;
use crate::platform::desktop::dialogs::{notify, pick_spreadsheet, Notice};
use crate::ui::state::app_state::{begin_activity, finish_activity, UploadState};

fn upload_sheet(ctx: &AppContext, state: UploadState) {
    let UploadState {
        activity,
        mut status,
        mut last_upload,
    } = state;

    let Some(path) = pick_spreadsheet() else {
        notify(Notice::Info, "Info", "No file selected.");
        return;
    };
    if !begin_activity(activity, status, ScreenActivity::Importing) {
        return;
    }

    match run_blocking(|| ctx.upload.upload(&path)) {
        Ok(summary) => {
            let message = format!("Excel data saved ({} rows).", summary.saved);
            status.set(message.clone());
            last_upload.set(Some(summary));
            notify(Notice::Success, "Success", &message);
        }
        Err(err) => {
            error!("failed to upload {}: {err:#}", path.display());
            status.set("Upload failed.".to_string());
            notify(
                Notice::Error,
                "Error",
                "Failed to process and upload Excel file.",
            );
        }
    }

    finish_activity(activity);
}

#[component]
pub fn UploadScreen() -> Element {
    let ctx = use_context::<AppContext>();
    let state = UploadState::new();

    let current = (state.activity)();
    let busy = !current.is_idle();
    let button_label = if busy { current.label() } else { "Upload Excel" };
    let status_text = (state.status)();
    let last_saved = (state.last_upload)().map(|summary| summary.ids.len());
    let backend = ctx.store.backend_name();
    let collection = ctx.config.collection.clone();

    rsx! {
        div { style: "padding: 20px; display: flex; flex-direction: column; gap: 12px;",
            h2 { "Upload Excel File" }
            p { style: "color: #666;", "Rows are saved to the {backend} collection \"{collection}\"." }
            button {
                style: "padding: 10px; background: blue; color: white; border-radius: 5px; border: none;",
                disabled: busy,
                onclick: move |_| upload_sheet(&ctx, state),
                "{button_label}"
            }
            if !status_text.is_empty() {
                p { "{status_text}" }
            }
            if let Some(saved) = last_saved {
                p { style: "color: #666;", "Last upload stored {saved} record(s)." }
            }
        }
    }
}
