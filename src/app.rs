use anyhow::Result;
use dioxus::prelude::*;
use tracing::error;

use crate::config::{default_config_path, default_db_path, AppConfig};
use crate::context::AppContext;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::screens::display::DisplayScreen;
use crate::ui::screens::matching::MatchScreen;
use crate::ui::screens::upload::UploadScreen;
use crate::ui::state::app_state::Screen;

fn load_context() -> Result<AppContext> {
    let config = AppConfig::resolve(&default_config_path()?)?;
    let db_path = default_db_path()?;
    let export_dir = config.export_dir_or_default()?;
    run_blocking(move || AppContext::build(config, &db_path, export_dir))
}

#[component]
pub fn App() -> Element {
    let startup = use_hook(|| load_context().map_err(|err| format!("{err:#}")));

    match startup {
        Ok(ctx) => rsx! { Shell { ctx } },
        Err(message) => {
            error!("startup failed: {message}");
            rsx! {
                div { style: "padding: 20px;",
                    h2 { "Unable to start" }
                    p { "{message}" }
                }
            }
        }
    }
}

#[component]
fn Shell(ctx: AppContext) -> Element {
    use_context_provider(|| ctx.clone());
    let mut screen = use_signal(Screen::default);
    let mut drawer_open = use_signal(|| true);

    let current = screen();
    let current_title = current.title();
    let drawer_width = if drawer_open() { "180px" } else { "0px" };
    let body = match current {
        Screen::Upload => rsx! { UploadScreen {} },
        Screen::Display => rsx! { DisplayScreen {} },
        Screen::Match => rsx! { MatchScreen {} },
    };

    rsx! {
        div { style: "display: flex; height: 100vh; font-family: sans-serif; background: #f5f5f5;",
            nav { style: "width: {drawer_width}; overflow: hidden; background: #263238; color: white; display: flex; flex-direction: column; transition: width 0.2s;",
                h3 { style: "padding: 0 16px;", "recordbook" }
                {Screen::ALL.iter().map(|&target| {
                    let background = if target == current { "#37474f" } else { "transparent" };
                    let title = target.title();
                    rsx!(
                        button {
                            key: "{title}",
                            style: "padding: 12px 16px; text-align: left; border: none; color: white; background: {background}; cursor: pointer;",
                            onclick: move |_| screen.set(target),
                            "{title}"
                        }
                    )
                })}
            }
            div { style: "flex: 1; display: flex; flex-direction: column; min-width: 0;",
                header { style: "display: flex; align-items: center; gap: 12px; padding: 8px 12px; background: white; border-bottom: 1px solid #ddd;",
                    button {
                        onclick: move |_| drawer_open.toggle(),
                        "☰"
                    }
                    strong { "{current_title}" }
                }
                main { style: "flex: 1; overflow: hidden;",
                    {body}
                }
            }
        }
    }
}
