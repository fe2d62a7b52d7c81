// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the plain data records (pull requests, reviews, commits, check statuses) the core reduces over
// role: model/types
// outputs: Immutable input records plus the two closed verdict enums (BuildState, ReviewGroup)
// invariants: Records carry no provider object shapes; adapters populate them once, the core only reads
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Utc};

/// Per-check state reported by a single status context.
///
/// Also doubles as the combined verdict: the aggregator returns
/// `Option<BuildState>` where `None` means "no usable status at all",
/// which is a distinct outcome rather than a fourth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
  Success,
  Pending,
  Failure,
}

/// One raw status entry for a head commit.
#[derive(Debug, Clone)]
pub struct CheckStatus {
  pub context: String,
  pub state: BuildState,
  /// The provider can omit this; entries without a timestamp are ignored.
  pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
  Approved,
  ChangesRequested,
  Commented,
  Other,
}

/// A submitted review. Unsubmitted (pending) reviews never reach the
/// core; the provider adapter drops anything without a submission time.
#[derive(Debug, Clone)]
pub struct Review {
  pub author: String,
  pub state: ReviewState,
  pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Commit {
  pub sha: String,
  pub committed_at: DateTime<Utc>,
}

/// A fetched pull request with its associated record sets attached.
#[derive(Debug, Clone)]
pub struct PullRequest {
  pub repo: String,
  pub number: i64,
  pub title: String,
  pub author: String,
  pub html_url: String,
  pub head_sha: String,
  pub open: bool,
  pub reviews: Vec<Review>,
  pub commits: Vec<Commit>,
  pub statuses: Vec<CheckStatus>,
}

/// Five-way review classification. Every pull request lands in exactly
/// one group; the formatter matches exhaustively so a new variant
/// cannot ship without a header mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewGroup {
  Unreviewed,
  ChangesSinceReview,
  MixedReception,
  ChangesRequested,
  Approved,
}

impl ReviewGroup {
  /// Fixed rendering order for the grouped report.
  pub const DISPLAY_ORDER: [ReviewGroup; 5] = [
    ReviewGroup::Unreviewed,
    ReviewGroup::ChangesSinceReview,
    ReviewGroup::MixedReception,
    ReviewGroup::ChangesRequested,
    ReviewGroup::Approved,
  ];
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_order_covers_every_group_once() {
    let order = ReviewGroup::DISPLAY_ORDER;
    for group in [
      ReviewGroup::Unreviewed,
      ReviewGroup::ChangesSinceReview,
      ReviewGroup::MixedReception,
      ReviewGroup::ChangesRequested,
      ReviewGroup::Approved,
    ] {
      assert_eq!(order.iter().filter(|g| **g == group).count(), 1);
    }
  }
}
