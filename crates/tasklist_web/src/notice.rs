//! Notices carried across redirects in the query string.
//!
//! Stands in for session flash messages: the handler that performed an
//! operation redirects to `/?notice=..&kind=..` and the list page shows it.

use axum::response::Redirect;
use serde::{Deserialize, Serialize};
use tasklist_core::{NoticeKind, TaskOutcome};

/// Query parameters read by pages that display a notice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
    pub kind: Option<String>,
}

impl NoticeQuery {
    /// Parses the query back into an outcome; unknown kinds are dropped.
    pub fn into_outcome(self) -> Option<TaskOutcome> {
        let message = self.notice.filter(|message| !message.is_empty())?;
        let kind = NoticeKind::parse(self.kind.as_deref()?)?;
        Some(TaskOutcome { kind, message })
    }
}

/// Builds the `/` redirect target carrying `outcome`.
pub fn index_location(outcome: &TaskOutcome) -> String {
    let query = NoticeQuery {
        notice: Some(outcome.message.clone()),
        kind: Some(outcome.kind.as_str().to_string()),
    };
    match serde_urlencoded::to_string(&query) {
        Ok(encoded) => format!("/?{encoded}"),
        Err(_) => "/".to_string(),
    }
}

/// 303 redirect back to the list page with a notice.
pub fn redirect_home(outcome: &TaskOutcome) -> Redirect {
    Redirect::to(&index_location(outcome))
}

#[cfg(test)]
mod tests {
    use super::{index_location, NoticeQuery};
    use tasklist_core::{NoticeKind, TaskOutcome};

    #[test]
    fn location_encodes_message_and_kind() {
        let location = index_location(&TaskOutcome::success("Task added successfully!"));
        assert_eq!(location, "/?notice=Task+added+successfully%21&kind=success");
    }

    #[test]
    fn query_roundtrips_into_outcome() {
        let query = NoticeQuery {
            notice: Some("Task not found!".to_string()),
            kind: Some("error".to_string()),
        };
        let outcome = query.into_outcome().unwrap();
        assert_eq!(outcome.kind, NoticeKind::Error);
        assert_eq!(outcome.message, "Task not found!");
    }

    #[test]
    fn unknown_kind_or_missing_message_yields_nothing() {
        let unknown = NoticeQuery {
            notice: Some("hi".to_string()),
            kind: Some("info".to_string()),
        };
        assert!(unknown.into_outcome().is_none());
        assert!(NoticeQuery::default().into_outcome().is_none());
    }
}
