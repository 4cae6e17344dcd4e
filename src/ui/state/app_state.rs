use dioxus::prelude::*;
use tracing::warn;

use crate::domain::entities::activity::ScreenActivity;
use crate::domain::entities::record::Record;
use crate::domain::reconcile::PartitionResult;
use crate::usecase::services::query_service::RecordSource;
use crate::usecase::services::upload_service::UploadSummary;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Upload,
    Display,
    Match,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Upload, Screen::Display, Screen::Match];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Upload => "Upload",
            Screen::Display => "Display",
            Screen::Match => "Match",
        }
    }
}

/// Starts `next` if the screen is idle. A refused start is reported on the
/// status line.
pub fn begin_activity(
    mut activity: Signal<ScreenActivity>,
    mut status: Signal<String>,
    next: ScreenActivity,
) -> bool {
    let current = *activity.peek();
    match current.begin(next) {
        Ok(started) => {
            activity.set(started);
            true
        }
        Err(err) => {
            warn!("{err}");
            status.set(err.to_string());
            false
        }
    }
}

pub fn advance_activity(mut activity: Signal<ScreenActivity>, next: ScreenActivity) {
    let current = *activity.peek();
    match current.advance(next) {
        Ok(advanced) => activity.set(advanced),
        Err(err) => warn!("{err}"),
    }
}

pub fn finish_activity(mut activity: Signal<ScreenActivity>) {
    let current = *activity.peek();
    activity.set(current.finish());
}

#[derive(Clone, Copy)]
pub struct UploadState {
    pub activity: Signal<ScreenActivity>,
    pub status: Signal<String>,
    pub last_upload: Signal<Option<UploadSummary>>,
}

impl UploadState {
    pub fn new() -> Self {
        Self {
            activity: use_signal(ScreenActivity::default),
            status: use_signal(String::new),
            last_upload: use_signal(|| None::<UploadSummary>),
        }
    }
}

#[derive(Clone, Copy)]
pub struct DisplayState {
    pub records: Signal<Vec<Record>>,
    pub source: Signal<Option<RecordSource>>,
    pub search: Signal<String>,
    pub page: Signal<usize>,
    pub activity: Signal<ScreenActivity>,
    pub status: Signal<String>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self {
            records: use_signal(Vec::<Record>::new),
            source: use_signal(|| None::<RecordSource>),
            search: use_signal(String::new),
            page: use_signal(|| 1_usize),
            activity: use_signal(ScreenActivity::default),
            status: use_signal(String::new),
        }
    }
}

#[derive(Clone, Copy)]
pub struct MatchState {
    pub known: Signal<Vec<Record>>,
    pub partition: Signal<Option<PartitionResult>>,
    pub activity: Signal<ScreenActivity>,
    pub status: Signal<String>,
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            known: use_signal(Vec::<Record>::new),
            partition: use_signal(|| None::<PartitionResult>),
            activity: use_signal(ScreenActivity::default),
            status: use_signal(String::new),
        }
    }
}
