use std::fmt;

use thiserror::Error;

/// What a screen is doing right now. Only one action runs at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScreenActivity {
    #[default]
    Idle,
    Loading,
    Importing,
    Reconciling,
    Deleting,
    Exporting,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityError {
    #[error("cannot start {requested} while {current}")]
    Busy {
        current: ScreenActivity,
        requested: ScreenActivity,
    },
    #[error("cannot move from {from} to {to}")]
    InvalidTransition {
        from: ScreenActivity,
        to: ScreenActivity,
    },
}

impl ScreenActivity {
    pub fn is_idle(self) -> bool {
        self == ScreenActivity::Idle
    }

    /// Label shown on the screen while the action runs.
    pub fn label(self) -> &'static str {
        match self {
            ScreenActivity::Idle => "idle",
            ScreenActivity::Loading => "Refreshing...",
            ScreenActivity::Importing => "Uploading...",
            ScreenActivity::Reconciling => "Comparing...",
            ScreenActivity::Deleting => "Deleting...",
            ScreenActivity::Exporting => "Exporting...",
        }
    }

    pub fn begin(self, next: ScreenActivity) -> Result<ScreenActivity, ActivityError> {
        if next.is_idle() {
            return Err(ActivityError::InvalidTransition {
                from: self,
                to: next,
            });
        }
        if !self.is_idle() {
            return Err(ActivityError::Busy {
                current: self,
                requested: next,
            });
        }
        Ok(next)
    }

    /// Importing hands over to reconciling once the sheet is decoded.
    pub fn advance(self, next: ScreenActivity) -> Result<ScreenActivity, ActivityError> {
        match (self, next) {
            (ScreenActivity::Importing, ScreenActivity::Reconciling) => Ok(next),
            (from, to) => Err(ActivityError::InvalidTransition { from, to }),
        }
    }

    pub fn finish(self) -> ScreenActivity {
        ScreenActivity::Idle
    }
}

impl fmt::Display for ScreenActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScreenActivity::Idle => "idle",
            ScreenActivity::Loading => "loading",
            ScreenActivity::Importing => "importing",
            ScreenActivity::Reconciling => "reconciling",
            ScreenActivity::Deleting => "deleting",
            ScreenActivity::Exporting => "exporting",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_from_idle_succeeds() {
        let next = ScreenActivity::Idle
            .begin(ScreenActivity::Importing)
            .expect("idle screen should accept work");
        assert_eq!(next, ScreenActivity::Importing);
        assert!(next.finish().is_idle());
    }

    #[test]
    fn begin_while_busy_is_rejected() {
        let err = ScreenActivity::Deleting
            .begin(ScreenActivity::Loading)
            .expect_err("busy screen should reject work");
        assert_eq!(
            err,
            ActivityError::Busy {
                current: ScreenActivity::Deleting,
                requested: ScreenActivity::Loading,
            }
        );
        assert_eq!(err.to_string(), "cannot start loading while deleting");
    }

    #[test]
    fn begin_idle_is_not_an_action() {
        assert!(ScreenActivity::Idle.begin(ScreenActivity::Idle).is_err());
    }

    #[test]
    fn only_importing_advances_to_reconciling() {
        assert_eq!(
            ScreenActivity::Importing.advance(ScreenActivity::Reconciling),
            Ok(ScreenActivity::Reconciling)
        );
        assert!(ScreenActivity::Idle
            .advance(ScreenActivity::Reconciling)
            .is_err());
        assert!(ScreenActivity::Importing
            .advance(ScreenActivity::Deleting)
            .is_err());
    }
}
