use dioxus::prelude::*;
use tracing::{error, info};

use crate::context::AppContext;
use crate::domain::entities::activity::ScreenActivity;
use crate::infra::import::XLSX_MIME;
use crate::platform::desktop::blocking::run_blocking;
use crate::platform::desktop::dialogs::{notify, Notice};
use crate::platform::desktop::share::{share_file, ShareOutcome};
use crate::ui::format::{page_label, record_json, source_label};
use crate::ui::state::app_state::{begin_activity, finish_activity, DisplayState};

fn refresh_records(ctx: &AppContext, state: DisplayState) {
    let DisplayState {
        mut records,
        mut source,
        mut page,
        activity,
        mut status,
        ..
    } = state;

    if !begin_activity(activity, status, ScreenActivity::Loading) {
        return;
    }

    match run_blocking(|| ctx.query.load_records()) {
        Ok(loaded) => {
            status.set(String::new());
            source.set(Some(loaded.source));
            records.set(loaded.records);
            page.set(1);
        }
        Err(err) => {
            error!("failed to load records: {err:#}");
            status.set("Failed to load data.".to_string());
            notify(Notice::Error, "Error", "Failed to load data.");
        }
    }

    finish_activity(activity);
}

fn download_records(ctx: &AppContext, state: DisplayState) {
    let DisplayState {
        records,
        activity,
        mut status,
        ..
    } = state;

    if !begin_activity(activity, status, ScreenActivity::Exporting) {
        return;
    }
    let snapshot = records.peek().clone();
    let exported = run_blocking(|| ctx.export.export_records(&snapshot));
    finish_activity(activity);

    let path = match exported {
        Ok(path) => path,
        Err(err) => {
            error!("failed to export records: {err:#}");
            notify(
                Notice::Error,
                "Error",
                "Failed to generate or share the Excel file.",
            );
            return;
        }
    };

    match share_file(&path, XLSX_MIME, "Share Excel File") {
        Ok(ShareOutcome::Saved(destination)) => {
            info!(file = %destination.display(), "shared export");
            status.set(format!("Saved to {}", destination.display()));
        }
        Ok(ShareOutcome::Cancelled) => {
            status.set(format!("Excel file generated at: {}", path.display()));
        }
        Ok(ShareOutcome::Unavailable) => notify(
            Notice::Info,
            "Sharing not supported",
            "Your device does not support file sharing.",
        ),
        Err(err) => {
            error!("failed to share {}: {err:#}", path.display());
            notify(
                Notice::Error,
                "Error",
                "Failed to generate or share the Excel file.",
            );
        }
    }
}

#[component]
pub fn DisplayScreen() -> Element {
    let ctx = use_context::<AppContext>();
    let state = DisplayState::new();

    let ctx_for_load = ctx.clone();
    use_effect(move || {
        refresh_records(&ctx_for_load, state);
    });

    let DisplayState {
        records,
        source,
        mut search,
        mut page,
        activity,
        status,
    } = state;

    let current = activity();
    let busy = !current.is_idle();
    let refresh_label = if current == ScreenActivity::Loading {
        current.label()
    } else {
        "Refresh"
    };
    let all_records = records();
    let search_text = search();
    let status_text = status();
    let source_text = source_label(source());

    let body = match ctx.query.page(&all_records, &search_text, page()) {
        Ok(result) => {
            let summary = result.summary();
            let label = page_label(&result);
            let has_previous = result.has_previous();
            let has_next = result.has_next();
            let current_page = result.page;
            rsx! {
                p { style: "color: #555;", "{summary}" }
                div { style: "flex: 1; overflow-y: auto; display: flex; flex-direction: column; gap: 8px;",
                    {result.records.iter().enumerate().map(|(idx, record)| {
                        let key = record
                            .id
                            .as_ref()
                            .map(|id| id.0.clone())
                            .unwrap_or_else(|| format!("row-{idx}"));
                        let json = record_json(record);
                        rsx!(
                            div { key: "{key}", style: "padding: 10px; background: white; border-radius: 5px; border-bottom: 1px solid #ddd;",
                                pre { style: "margin: 0; white-space: pre-wrap;", "{json}" }
                            }
                        )
                    })}
                }
                div { style: "display: flex; align-items: center; justify-content: space-between; margin-top: 8px;",
                    button {
                        disabled: !has_previous,
                        onclick: move |_| page.set(current_page.saturating_sub(1).max(1)),
                        "Previous"
                    }
                    span { "{label}" }
                    button {
                        disabled: !has_next,
                        onclick: move |_| page.set(current_page + 1),
                        "Next"
                    }
                }
            }
        }
        Err(err) => rsx! {
            p { "Failed to page records: {err}" }
        },
    };

    let ctx_for_download = ctx.clone();
    let ctx_for_refresh = ctx.clone();

    rsx! {
        div { style: "padding: 20px; display: flex; flex-direction: column; gap: 10px; height: 100%; box-sizing: border-box;",
            h2 { "Excel Data" }
            input {
                r#type: "search",
                placeholder: "Search...",
                value: "{search_text}",
                oninput: move |evt| {
                    search.set(evt.value());
                    page.set(1);
                },
            }
            div { style: "display: flex; gap: 8px;",
                button {
                    disabled: busy,
                    onclick: move |_| download_records(&ctx_for_download, state),
                    "Download Excel"
                }
                button {
                    disabled: busy,
                    onclick: move |_| refresh_records(&ctx_for_refresh, state),
                    "{refresh_label}"
                }
            }
            if !source_text.is_empty() {
                p { style: "color: #a60;", "{source_text}" }
            }
            if !status_text.is_empty() {
                p { "{status_text}" }
            }
            {body}
        }
    }
}
