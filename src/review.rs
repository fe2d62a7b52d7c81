use std::collections::HashSet;

use anyhow::{bail, Result};

use crate::model::{Commit, Review, ReviewGroup, ReviewState};

/// Classify reviewer sentiment for one pull request.
///
/// Self-reviews and comment-only reviews are excluded up front, then
/// each reviewer is reduced to their most recent review. The decision
/// tree has five terminal outcomes and no intermediate state:
///
/// - an outstanding change request with a commit newer than the newest
///   retained review is `ChangesSinceReview`
/// - an outstanding change request next to an approval is `MixedReception`
/// - an outstanding change request alone is `ChangesRequested`
/// - an approval alone is `Approved`
/// - everything else is `Unreviewed`
///
/// A change request on a pull request with zero commits cannot happen on
/// real data (a PR needs at least one commit to exist), so it is surfaced
/// as an error rather than guessed around.
pub fn review_group(reviews: &[Review], commits: &[Commit], pr_author: &str) -> Result<ReviewGroup> {
  // newest first; the sort is stable so equal timestamps keep input order
  let mut candidates: Vec<&Review> = reviews
    .iter()
    .filter(|r| !r.author.eq_ignore_ascii_case(pr_author))
    .filter(|r| r.state != ReviewState::Commented)
    .collect();
  candidates.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

  // one review per reviewer: the most recent supersedes the rest
  let mut seen: HashSet<String> = HashSet::new();
  let mut last_reviews: Vec<&Review> = Vec::new();

  for review in candidates {
    if seen.insert(review.author.to_lowercase()) {
      last_reviews.push(review);
    }
  }

  let Some(newest_review) = last_reviews.first() else {
    return Ok(ReviewGroup::Unreviewed);
  };

  let has_changes_requested = last_reviews.iter().any(|r| r.state == ReviewState::ChangesRequested);
  let has_approved = last_reviews.iter().any(|r| r.state == ReviewState::Approved);

  if has_changes_requested {
    let Some(newest_commit) = commits.iter().map(|c| c.committed_at).max() else {
      bail!("changes requested but the pull request has no commits");
    };

    if newest_commit > newest_review.submitted_at {
      return Ok(ReviewGroup::ChangesSinceReview);
    }
    if has_approved {
      return Ok(ReviewGroup::MixedReception);
    }
    return Ok(ReviewGroup::ChangesRequested);
  }

  if has_approved {
    Ok(ReviewGroup::Approved)
  } else {
    Ok(ReviewGroup::Unreviewed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{DateTime, TimeZone, Utc};

  fn at(epoch: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(epoch, 0).single().unwrap()
  }

  fn review(author: &str, state: ReviewState, epoch: i64) -> Review {
    Review {
      author: author.into(),
      state,
      submitted_at: at(epoch),
    }
  }

  fn commit(epoch: i64) -> Commit {
    Commit {
      sha: format!("sha-{}", epoch),
      committed_at: at(epoch),
    }
  }

  #[test]
  fn no_reviews_is_unreviewed() {
    let group = review_group(&[], &[commit(1)], "alice").unwrap();
    assert_eq!(group, ReviewGroup::Unreviewed);
  }

  #[test]
  fn comment_only_review_is_unreviewed() {
    let reviews = vec![review("bob", ReviewState::Commented, 5)];
    let group = review_group(&reviews, &[commit(1)], "alice").unwrap();
    assert_eq!(group, ReviewGroup::Unreviewed);
  }

  #[test]
  fn self_review_does_not_count() {
    let reviews = vec![review("alice", ReviewState::Approved, 5)];
    let group = review_group(&reviews, &[commit(1)], "alice").unwrap();
    assert_eq!(group, ReviewGroup::Unreviewed);
  }

  #[test]
  fn single_approval_is_approved() {
    let reviews = vec![review("bob", ReviewState::Approved, 5)];
    let group = review_group(&reviews, &[commit(1)], "alice").unwrap();
    assert_eq!(group, ReviewGroup::Approved);
  }

  #[test]
  fn change_request_without_newer_commit_is_changes_requested() {
    let reviews = vec![review("bob", ReviewState::ChangesRequested, 5)];
    let group = review_group(&reviews, &[commit(1)], "alice").unwrap();
    assert_eq!(group, ReviewGroup::ChangesRequested);
  }

  #[test]
  fn commit_after_change_request_is_changes_since_review() {
    let reviews = vec![review("bob", ReviewState::ChangesRequested, 5)];
    let group = review_group(&reviews, &[commit(1), commit(9)], "alice").unwrap();
    assert_eq!(group, ReviewGroup::ChangesSinceReview);
  }

  #[test]
  fn approval_plus_open_change_request_is_mixed_reception() {
    let reviews = vec![
      review("bob", ReviewState::ChangesRequested, 5),
      review("carol", ReviewState::Approved, 6),
    ];
    let group = review_group(&reviews, &[commit(1)], "alice").unwrap();
    assert_eq!(group, ReviewGroup::MixedReception);
  }

  #[test]
  fn later_review_by_same_reviewer_supersedes_earlier_one() {
    let reviews = vec![
      review("bob", ReviewState::ChangesRequested, 5),
      review("bob", ReviewState::Approved, 8),
    ];
    let group = review_group(&reviews, &[commit(1)], "alice").unwrap();
    assert_eq!(group, ReviewGroup::Approved);
  }

  #[test]
  fn commit_at_exact_review_time_does_not_reopen() {
    // strict comparison: the commit must be after the newest review
    let reviews = vec![review("bob", ReviewState::ChangesRequested, 5)];
    let group = review_group(&reviews, &[commit(5)], "alice").unwrap();
    assert_eq!(group, ReviewGroup::ChangesRequested);
  }

  #[test]
  fn change_request_with_zero_commits_is_an_error() {
    let reviews = vec![review("bob", ReviewState::ChangesRequested, 5)];
    let err = review_group(&reviews, &[], "alice").unwrap_err();
    assert!(format!("{:#}", err).contains("no commits"));
  }

  #[test]
  fn self_review_exclusion_ignores_login_case() {
    let reviews = vec![review("Alice", ReviewState::Approved, 5)];
    let group = review_group(&reviews, &[commit(1)], "alice").unwrap();
    assert_eq!(group, ReviewGroup::Unreviewed);
  }
}
