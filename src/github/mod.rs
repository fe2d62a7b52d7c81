// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Map provider JSON into core records and orchestrate the per-run fetch of reportable pull requests
// role: github/adapter
// inputs: A GithubApi backend plus the normalized run configuration
// outputs: PullRequest records with reviews, commits, and statuses attached, in a stable order
// invariants:
// - The core never sees provider shapes; adapters extract plain fields here
// - Eligibility and title filters run before the per-PR fetches
// - Results are sorted by (repo, title) so grouped output is fetch-order independent
// errors: Any fetch failure aborts the run with context naming the repo/PR
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

mod api;

pub use api::{make_default_api, GithubApi, GithubEnvApi, GithubHttpApi};

use anyhow::{Context, Result};

use crate::cli::EffectiveConfig;
use crate::ext::serde_json::JsonPick;
use crate::filter;
use crate::model::{BuildState, CheckStatus, Commit, PullRequest, Review, ReviewState};
use crate::util::parse_rfc3339_utc;

fn review_state_from(raw: &str) -> ReviewState {
  match raw {
    "APPROVED" => ReviewState::Approved,
    "CHANGES_REQUESTED" => ReviewState::ChangesRequested,
    "COMMENTED" => ReviewState::Commented,
    _ => ReviewState::Other,
  }
}

fn build_state_from(raw: &str) -> Option<BuildState> {
  match raw {
    "success" => Some(BuildState::Success),
    "pending" => Some(BuildState::Pending),
    // GitHub reports both "failure" and "error"; an errored check must
    // not read as green
    "failure" | "error" => Some(BuildState::Failure),
    _ => None,
  }
}

/// Map one pull JSON object onto a bare PullRequest (record sets are
/// attached later). Returns None when identity fields are missing.
pub fn pull_request_from_json(repo: &str, v: &serde_json::Value) -> Option<PullRequest> {
  Some(PullRequest {
    repo: repo.to_string(),
    number: v.pick("number").to::<i64>()?,
    title: v.pick("title").to_or_default(),
    author: v.pick("user.login").to::<String>()?,
    html_url: v.pick("html_url").to_or_default(),
    head_sha: v.pick("head.sha").to::<String>()?,
    open: v.pick("state").as_str() == Some("open"),
    reviews: Vec::new(),
    commits: Vec::new(),
    statuses: Vec::new(),
  })
}

/// Unsubmitted (pending) reviews carry no submission time and are
/// dropped here; they can never count toward a verdict.
pub fn review_from_json(v: &serde_json::Value) -> Option<Review> {
  let author = v.pick("user.login").to::<String>()?;
  let submitted_at = v.pick("submitted_at").as_str().and_then(parse_rfc3339_utc)?;
  let state = review_state_from(v.pick("state").as_str().unwrap_or(""));

  Some(Review { author, state, submitted_at })
}

/// Extracts the committer date directly; the core has no use for the
/// rest of the provider's commit object.
pub fn commit_from_json(v: &serde_json::Value) -> Option<Commit> {
  let sha = v.pick("sha").to::<String>()?;
  let committed_at = v.pick("commit.committer.date").as_str().and_then(parse_rfc3339_utc)?;

  Some(Commit { sha, committed_at })
}

pub fn status_from_json(v: &serde_json::Value) -> Option<CheckStatus> {
  let context = v.pick("context").to::<String>()?;

  let raw_state = v.pick("state").to_or_default::<String>();
  let Some(state) = build_state_from(&raw_state) else {
    eprintln!("[github] ignoring check {:?} with unknown state {:?}", context, raw_state);
    return None;
  };

  // updated_at stays optional; the aggregator is the one that decides
  // timestamp-less entries never count
  let updated_at = v.pick("updated_at").as_str().and_then(parse_rfc3339_utc);

  Some(CheckStatus { context, state, updated_at })
}

/// Fetch every reportable pull request for the configured organization.
///
/// Repo allow-list is applied before listing pulls, and the eligibility
/// and title filters before the three per-PR fetches, so excluded PRs
/// cost nothing beyond their listing entry. Any fetch failure aborts
/// the whole run; a partial report is worse than none.
pub fn fetch_open_pulls(api: &dyn GithubApi, cfg: &EffectiveConfig) -> Result<Vec<PullRequest>> {
  let repos = api
    .list_org_repos(&cfg.org)
    .with_context(|| format!("listing repositories for {}", cfg.org))?;

  let mut pulls: Vec<PullRequest> = Vec::new();

  for repo_json in &repos {
    let Some(repo_name) = repo_json.pick("name").to::<String>() else {
      continue;
    };
    if !filter::is_repo_allowed(&repo_name, &cfg.allowed_repos) {
      continue;
    }

    let raw_pulls = api
      .list_open_pulls(&cfg.org, &repo_name)
      .with_context(|| format!("listing pull requests for {}/{}", cfg.org, repo_name))?;

    for pull_json in &raw_pulls {
      let Some(mut pr) = pull_request_from_json(&repo_name, pull_json) else {
        continue;
      };

      if !filter::is_eligible(&pr, &cfg.allowed_authors, &cfg.allowed_repos) {
        continue;
      }
      if !filter::is_title_allowed(&pr.title, &cfg.blocked_words) {
        continue;
      }

      let label = format!("{}/{}#{}", cfg.org, repo_name, pr.number);

      pr.reviews = api
        .list_pull_reviews(&cfg.org, &repo_name, pr.number)
        .with_context(|| format!("listing reviews for {}", label))?
        .iter()
        .filter_map(review_from_json)
        .collect();

      pr.commits = api
        .list_pull_commits(&cfg.org, &repo_name, pr.number)
        .with_context(|| format!("listing commits for {}", label))?
        .iter()
        .filter_map(commit_from_json)
        .collect();

      pr.statuses = api
        .list_commit_statuses(&cfg.org, &repo_name, &pr.head_sha)
        .with_context(|| format!("listing statuses for {}", label))?
        .iter()
        .filter_map(status_from_json)
        .collect();

      pulls.push(pr);
    }
  }

  // stable key so grouped output does not depend on fetch order
  pulls.sort_by_key(|p| (p.repo.to_lowercase(), p.title.to_lowercase()));

  Ok(pulls)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn pull_adapter_extracts_identity_fields() {
    let v = json!({
      "number": 7,
      "title": "Add feature",
      "state": "open",
      "html_url": "https://github.com/acme/widgets/pull/7",
      "user": { "login": "alice" },
      "head": { "sha": "abc123" }
    });

    let pr = pull_request_from_json("widgets", &v).unwrap();
    assert_eq!(pr.number, 7);
    assert_eq!(pr.author, "alice");
    assert_eq!(pr.head_sha, "abc123");
    assert!(pr.open);
  }

  #[test]
  fn pull_adapter_rejects_objects_without_identity() {
    let v = json!({ "title": "No number or author" });
    assert!(pull_request_from_json("widgets", &v).is_none());
  }

  #[test]
  fn review_adapter_drops_unsubmitted_reviews() {
    let pending = json!({ "user": { "login": "bob" }, "state": "PENDING", "submitted_at": null });
    assert!(review_from_json(&pending).is_none());

    let submitted = json!({
      "user": { "login": "bob" },
      "state": "CHANGES_REQUESTED",
      "submitted_at": "2024-01-01T00:00:00Z"
    });
    let review = review_from_json(&submitted).unwrap();
    assert_eq!(review.state, ReviewState::ChangesRequested);
  }

  #[test]
  fn unknown_review_state_maps_to_other() {
    let v = json!({
      "user": { "login": "bob" },
      "state": "DISMISSED",
      "submitted_at": "2024-01-01T00:00:00Z"
    });
    assert_eq!(review_from_json(&v).unwrap().state, ReviewState::Other);
  }

  #[test]
  fn commit_adapter_reads_the_committer_date() {
    let v = json!({
      "sha": "abc123",
      "commit": { "committer": { "date": "2024-01-01T00:00:00Z" } }
    });
    let commit = commit_from_json(&v).unwrap();
    assert_eq!(commit.sha, "abc123");
    assert_eq!(commit.committed_at.timestamp(), 1_704_067_200);
  }

  #[test]
  fn status_adapter_maps_error_to_failure() {
    let v = json!({ "context": "ci/build", "state": "error", "updated_at": "2024-01-01T00:00:00Z" });
    assert_eq!(status_from_json(&v).unwrap().state, BuildState::Failure);
  }

  #[test]
  fn status_adapter_keeps_null_updated_at_as_none() {
    let v = json!({ "context": "ci/build", "state": "success", "updated_at": null });
    let status = status_from_json(&v).unwrap();
    assert!(status.updated_at.is_none());
  }

  #[test]
  fn status_adapter_drops_unknown_states() {
    let v = json!({ "context": "ci/build", "state": "neutral" });
    assert!(status_from_json(&v).is_none());
  }
}
