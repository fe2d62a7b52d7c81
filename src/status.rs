use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::model::{BuildState, CheckStatus};

/// Reduce every check status on a head commit to one combined verdict.
///
/// `None` means no usable status survived the reduction (no entries,
/// only timestamp-less entries, or everything was on the ignore list).
///
/// Reduction, in order:
/// 1. drop entries without an `updated_at`
/// 2. keep one entry per context, the one with the strictly greatest
///    timestamp; an equal timestamp does not replace the first-seen entry
/// 3. drop entries whose context is in `ignored_contexts` (lowercased set)
/// 4. failure dominates, then pending, then success
pub fn combined_build_status(
  statuses: &[CheckStatus],
  ignored_contexts: &HashSet<String>,
) -> Option<BuildState> {
  let mut latest_by_context: HashMap<&str, (DateTime<Utc>, &CheckStatus)> = HashMap::new();

  for status in statuses {
    let Some(updated) = status.updated_at else {
      continue;
    };

    match latest_by_context.get(status.context.as_str()) {
      // non-strict comparison keeps the first-seen entry
      Some((kept_at, _)) if updated <= *kept_at => {}
      _ => {
        latest_by_context.insert(&status.context, (updated, status));
      }
    }
  }

  let retained: Vec<&CheckStatus> = latest_by_context
    .values()
    .filter(|(_, s)| !ignored_contexts.contains(&s.context.to_lowercase()))
    .map(|(_, s)| *s)
    .collect();

  if retained.is_empty() {
    return None;
  }

  // Scan everything before concluding: a failure must win even when a
  // pending entry happens to be visited first.
  let mut any_pending = false;

  for status in &retained {
    match status.state {
      BuildState::Failure => return Some(BuildState::Failure),
      BuildState::Pending => any_pending = true,
      BuildState::Success => {}
    }
  }

  if any_pending {
    Some(BuildState::Pending)
  } else {
    Some(BuildState::Success)
  }
}
