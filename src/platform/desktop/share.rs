use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rfd::FileDialog;

use crate::infra::import::XLSX_MIME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Saved(PathBuf),
    Cancelled,
    Unavailable,
}

const EXCEL_EXTENSIONS: &[&str] = &["xlsx"];
const CSV_EXTENSIONS: &[&str] = &["csv"];

fn filter_for_mime(mime: &str) -> Option<(&'static str, &'static [&'static str])> {
    match mime {
        XLSX_MIME => Some(("Excel", EXCEL_EXTENSIONS)),
        "text/csv" => Some(("CSV", CSV_EXTENSIONS)),
        _ => None,
    }
}

pub fn suggested_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("export.xlsx")
        .to_string()
}

/// Desktop stand-in for a share sheet: asks where to put a copy of the file.
pub fn share_file(path: &Path, mime: &str, title: &str) -> Result<ShareOutcome> {
    let Some((label, extensions)) = filter_for_mime(mime) else {
        return Ok(ShareOutcome::Unavailable);
    };

    let mut dialog = FileDialog::new()
        .set_title(title)
        .set_file_name(suggested_file_name(path))
        .add_filter(label, extensions);
    if let Some(parent) = path.parent() {
        dialog = dialog.set_directory(parent);
    }

    let Some(destination) = dialog.save_file() else {
        return Ok(ShareOutcome::Cancelled);
    };
    if destination != path {
        std::fs::copy(path, &destination).with_context(|| {
            format!(
                "failed to copy {} to {}",
                path.display(),
                destination.display()
            )
        })?;
    }
    Ok(ShareOutcome::Saved(destination))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_spreadsheet_mimes_are_shareable() {
        assert!(filter_for_mime(XLSX_MIME).is_some());
        assert!(filter_for_mime("text/csv").is_some());
        assert!(filter_for_mime("image/png").is_none());
    }

    #[test]
    fn suggested_file_name_uses_source_name() {
        assert_eq!(
            suggested_file_name(Path::new("/tmp/out/common_data.xlsx")),
            "common_data.xlsx"
        );
        assert_eq!(suggested_file_name(Path::new("/")), "export.xlsx");
    }
}
