use anyhow::Result;
use recordbook::app::App;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    launch()
}

#[cfg(feature = "desktop")]
fn launch() -> Result<()> {
    let webview_data_dir = recordbook::config::default_webview_data_dir()?;

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("recordbook"))
                .with_data_directory(webview_data_dir),
        )
        .launch(App);
    Ok(())
}

#[cfg(not(feature = "desktop"))]
fn launch() -> Result<()> {
    dioxus::launch(App);
    Ok(())
}
