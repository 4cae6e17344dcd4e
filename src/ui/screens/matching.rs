use dioxus::prelude::*;
use tracing::{error, info};

use crate::context::AppContext;
use crate::domain::entities::activity::ScreenActivity;
use crate::infra::import::XLSX_MIME;
use crate::platform::desktop::blocking::run_blocking;
use crate::platform::desktop::dialogs::{confirm, notify, pick_spreadsheet, Notice};
use crate::platform::desktop::share::{share_file, ShareOutcome};
use crate::ui::format::{partition_summary, record_json, row_preview};
use crate::ui::state::app_state::{
    advance_activity, begin_activity, finish_activity, MatchState,
};

fn load_known(ctx: &AppContext, state: MatchState) {
    let MatchState {
        mut known,
        activity,
        mut status,
        ..
    } = state;

    if !begin_activity(activity, status, ScreenActivity::Loading) {
        return;
    }
    match run_blocking(|| ctx.matching.load_known()) {
        Ok(records) => known.set(records),
        Err(err) => {
            error!("failed to load known records: {err:#}");
            status.set("Failed to fetch existing data.".to_string());
        }
    }
    finish_activity(activity);
}

fn compare_sheet(ctx: &AppContext, state: MatchState) {
    let MatchState {
        known,
        mut partition,
        activity,
        mut status,
    } = state;

    let Some(path) = pick_spreadsheet() else {
        notify(Notice::Info, "Info", "No file selected.");
        return;
    };
    if !begin_activity(activity, status, ScreenActivity::Importing) {
        return;
    }

    let imported = match run_blocking(|| ctx.matching.read_imported(&path)) {
        Ok(rows) => rows,
        Err(err) => {
            error!("failed to read {}: {err:#}", path.display());
            status.set("Failed to read the selected file.".to_string());
            notify(Notice::Error, "Error", "Failed to read the selected file.");
            finish_activity(activity);
            return;
        }
    };

    advance_activity(activity, ScreenActivity::Reconciling);
    let result = ctx.matching.reconcile(&imported, &known.peek());
    if result.common.is_empty() {
        notify(Notice::Info, "Info", "No common data found.");
    }
    status.set(partition_summary(&result));
    partition.set(Some(result));
    finish_activity(activity);
}

fn share_result(ctx: &AppContext, state: MatchState) {
    let MatchState {
        partition,
        activity,
        mut status,
        ..
    } = state;

    let Some(result) = partition.peek().clone() else {
        return;
    };
    if result.is_empty() {
        notify(Notice::Info, "Info", "Nothing to share yet.");
        return;
    }
    if !begin_activity(activity, status, ScreenActivity::Exporting) {
        return;
    }
    let exported = run_blocking(|| ctx.export.export_match(&result.common, &result.unmatched));
    finish_activity(activity);

    let path = match exported {
        Ok(path) => path,
        Err(err) => {
            error!("failed to export match result: {err:#}");
            notify(Notice::Error, "Error", "Failed to share the result.");
            return;
        }
    };

    match share_file(&path, XLSX_MIME, "Share Match Result") {
        Ok(ShareOutcome::Saved(destination)) => {
            info!(file = %destination.display(), "shared match result");
            status.set(format!("Saved to {}", destination.display()));
        }
        Ok(ShareOutcome::Cancelled) => {
            status.set(format!("Result generated at: {}", path.display()));
        }
        Ok(ShareOutcome::Unavailable) => notify(
            Notice::Info,
            "Sharing not available",
            "Sharing is not available on this device.",
        ),
        Err(err) => {
            error!("failed to share {}: {err:#}", path.display());
            notify(Notice::Error, "Error", "Failed to share the result.");
        }
    }
}

fn export_common(ctx: &AppContext, state: MatchState) {
    let MatchState {
        partition,
        activity,
        mut status,
        ..
    } = state;

    let common = partition
        .peek()
        .as_ref()
        .map(|result| result.common.clone())
        .unwrap_or_default();
    if common.is_empty() {
        notify(Notice::Info, "Info", "No common data to export.");
        return;
    }
    if !begin_activity(activity, status, ScreenActivity::Exporting) {
        return;
    }
    match run_blocking(|| ctx.export.export_common(&common)) {
        Ok(path) => {
            let message = format!("Excel file created at: {}", path.display());
            status.set(message.clone());
            notify(Notice::Success, "Success", &message);
        }
        Err(err) => {
            error!("failed to export common data: {err:#}");
            notify(Notice::Error, "Error", "Failed to export common data.");
        }
    }
    finish_activity(activity);
}

fn delete_common(ctx: &AppContext, state: MatchState) {
    let MatchState {
        mut known,
        mut partition,
        activity,
        mut status,
    } = state;

    let common = partition
        .peek()
        .as_ref()
        .map(|result| result.common.clone())
        .unwrap_or_default();
    if common.is_empty() {
        notify(Notice::Info, "Info", "No common data to delete.");
        return;
    }
    if !confirm(
        "Delete Common Data",
        &format!(
            "Delete {} common record(s) from the store? This cannot be undone.",
            common.len()
        ),
    ) {
        return;
    }
    if !begin_activity(activity, status, ScreenActivity::Deleting) {
        return;
    }

    let snapshot = known.peek().clone();
    match run_blocking(|| ctx.matching.delete_common(&snapshot, &common)) {
        Ok(remaining) => {
            known.set(remaining);
            if let Some(result) = partition.write().as_mut() {
                result.common.clear();
            }
            status.set("Common data deleted successfully.".to_string());
            notify(Notice::Success, "Success", "Common data deleted successfully.");
            finish_activity(activity);
        }
        Err(err) => {
            error!("failed to delete common data: {err:#}");
            notify(Notice::Error, "Error", "Failed to delete common data.");
            finish_activity(activity);
            // Part of the batch may already be gone; reload what is left.
            load_known(ctx, state);
        }
    }
}

#[component]
pub fn MatchScreen() -> Element {
    let ctx = use_context::<AppContext>();
    let state = MatchState::new();

    let ctx_for_load = ctx.clone();
    use_effect(move || {
        load_known(&ctx_for_load, state);
    });

    let MatchState {
        known,
        partition,
        activity,
        status,
    } = state;

    let current = activity();
    let busy = !current.is_idle();
    let compare_label = match current {
        ScreenActivity::Importing | ScreenActivity::Reconciling => current.label(),
        _ => "Upload & Compare",
    };
    let delete_label = if current == ScreenActivity::Deleting {
        current.label()
    } else {
        "Delete Common Data"
    };
    let known_count = known.read().len();
    let status_text = status();
    let result = partition();
    let has_common = result.as_ref().is_some_and(|r| !r.common.is_empty());
    let has_result = result.as_ref().is_some_and(|r| !r.is_empty());
    let common_count = result.as_ref().map_or(0, |r| r.common.len());
    let unmatched_count = result.as_ref().map_or(0, |r| r.unmatched.len());

    let ctx_compare = ctx.clone();
    let ctx_share = ctx.clone();
    let ctx_export = ctx.clone();
    let ctx_delete = ctx.clone();

    rsx! {
        div { style: "padding: 20px; display: flex; flex-direction: column; gap: 10px; height: 100%; box-sizing: border-box; overflow-y: auto;",
            h2 { "Match Excel Data" }
            p { style: "color: #666;", "{known_count} stored record(s) loaded." }
            div { style: "display: flex; flex-wrap: wrap; gap: 8px;",
                button {
                    disabled: busy,
                    onclick: move |_| compare_sheet(&ctx_compare, state),
                    "{compare_label}"
                }
                button {
                    disabled: busy || !has_result,
                    onclick: move |_| share_result(&ctx_share, state),
                    "Share Result"
                }
                button {
                    disabled: busy || !has_common,
                    onclick: move |_| export_common(&ctx_export, state),
                    "Export Common Data"
                }
                button {
                    style: "background: #c33; color: white;",
                    disabled: busy || !has_common,
                    onclick: move |_| delete_common(&ctx_delete, state),
                    "{delete_label}"
                }
            }
            if !status_text.is_empty() {
                p { "{status_text}" }
            }
            if let Some(result) = result {
                h3 { "Common Data ({common_count})" }
                div { style: "display: flex; flex-direction: column; gap: 6px;",
                    {result.common.iter().enumerate().map(|(idx, record)| {
                        let json = record_json(record);
                        rsx!(
                            pre { key: "common-{idx}", style: "margin: 0; padding: 8px; background: #eef7ee; white-space: pre-wrap;", "{json}" }
                        )
                    })}
                }
                h3 { "Unmatched Data ({unmatched_count})" }
                div { style: "display: flex; flex-direction: column; gap: 6px;",
                    {result.unmatched.iter().enumerate().map(|(idx, row)| {
                        let preview = row_preview(row);
                        rsx!(
                            div { key: "unmatched-{idx}", style: "padding: 8px; background: #f7eeee;", "{preview}" }
                        )
                    })}
                }
            }
        }
    }
}
