use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::error::LaunchError;

/// Platform service that opens a path with its default handler.
pub trait Opener {
    fn open_path(&self, path: &str) -> Result<(), LaunchError>;
}

/// What the user sees when a launch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LaunchFailurePolicy {
    /// Only the log records the failure.
    #[default]
    LogOnly,
    /// The view also shows a transient notice.
    Notify,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Launched,
    Failed { notice: Option<String> },
}

pub struct LaunchDispatcher<O> {
    opener: O,
    policy: LaunchFailurePolicy,
}

impl<O: Opener> LaunchDispatcher<O> {
    pub fn new(opener: O, policy: LaunchFailurePolicy) -> Self {
        Self { opener, policy }
    }

    /// Opens `path`. Errors never propagate; they are logged and, under
    /// [`LaunchFailurePolicy::Notify`], turned into a notice for the view.
    pub fn launch(&self, path: &str) -> LaunchOutcome {
        let result = if path.trim().is_empty() {
            Err(LaunchError::EmptyPath)
        } else {
            self.opener.open_path(path)
        };

        match result {
            Ok(()) => {
                info!("launched shortcut {path}");
                LaunchOutcome::Launched
            }
            Err(err) => {
                error!("error launching shortcut {path:?}: {err}");
                let notice = match self.policy {
                    LaunchFailurePolicy::LogOnly => None,
                    LaunchFailurePolicy::Notify => Some(err.to_string()),
                };
                LaunchOutcome::Failed { notice }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingOpener {
        opened: RefCell<Vec<String>>,
        fail: bool,
    }

    impl Opener for &RecordingOpener {
        fn open_path(&self, path: &str) -> Result<(), LaunchError> {
            self.opened.borrow_mut().push(path.to_string());
            if self.fail {
                Err(LaunchError::Open {
                    path: path.to_string(),
                    message: "no handler".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn successful_launch_reaches_opener() {
        let opener = RecordingOpener::default();
        let dispatcher = LaunchDispatcher::new(&opener, LaunchFailurePolicy::Notify);

        assert_eq!(dispatcher.launch("/usr/bin/vim"), LaunchOutcome::Launched);
        assert_eq!(*opener.opened.borrow(), ["/usr/bin/vim"]);
    }

    #[test]
    fn failures_are_swallowed_by_default() {
        let opener = RecordingOpener {
            fail: true,
            ..Default::default()
        };
        let dispatcher = LaunchDispatcher::new(&opener, LaunchFailurePolicy::default());

        assert_eq!(
            dispatcher.launch("/missing"),
            LaunchOutcome::Failed { notice: None }
        );
    }

    #[test]
    fn notify_policy_carries_message() {
        let opener = RecordingOpener {
            fail: true,
            ..Default::default()
        };
        let dispatcher = LaunchDispatcher::new(&opener, LaunchFailurePolicy::Notify);

        let LaunchOutcome::Failed { notice: Some(notice) } = dispatcher.launch("/missing") else {
            panic!("expected a notice");
        };
        assert!(notice.contains("/missing"));
    }

    #[test]
    fn empty_path_never_reaches_opener() {
        let opener = RecordingOpener::default();
        let dispatcher = LaunchDispatcher::new(&opener, LaunchFailurePolicy::Notify);

        assert_eq!(
            dispatcher.launch("  "),
            LaunchOutcome::Failed {
                notice: Some("shortcut path is empty".into())
            }
        );
        assert!(opener.opened.borrow().is_empty());
    }
}
