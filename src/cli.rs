use std::collections::HashSet;

use anyhow::{bail, Result};
use clap::Parser;
use serde::Serialize;

use crate::model::ReviewGroup;

#[derive(Parser, Debug)]
#[command(
    name = "pull-reminder",
    version,
    about = "Post a Slack reminder summarizing an organization's open pull requests",
    long_about = None
)]
pub struct Cli {
  /// GitHub organization to scan
  #[arg(long, env = "ORGANIZATION")]
  pub org: Option<String>,

  /// GitHub API token
  #[arg(long, env = "GITHUB_API_TOKEN", hide_env_values = true)]
  pub github_token: Option<String>,

  /// Slack API token used for chat.postMessage
  #[arg(long, env = "SLACK_API_TOKEN", hide_env_values = true)]
  pub slack_token: Option<String>,

  /// Slack channel to post into
  #[arg(long, env = "SLACK_CHANNEL", default_value = "#general")]
  pub channel: String,

  /// Comma-separated words; a PR whose title contains one is skipped
  #[arg(long, env = "IGNORE_WORDS")]
  pub ignore_words: Option<String>,

  /// Comma-separated repository allow-list (empty = every repo)
  #[arg(long, env = "REPOSITORIES")]
  pub repositories: Option<String>,

  /// Comma-separated author allow-list (empty = every author)
  #[arg(long, env = "USERNAMES")]
  pub usernames: Option<String>,

  /// Comma-separated build-status contexts to leave out of the verdict
  #[arg(long, env = "IGNORE_BUILD_STATUS_CONTEXTS")]
  pub ignore_contexts: Option<String>,

  /// Drop the build-status glyph column from every line
  #[arg(long, env = "HIDE_BUILD_STATUS")]
  pub hide_build_status: bool,

  /// One flat list instead of review-status sections
  #[arg(long, env = "NO_SPLIT_BY_REVIEW_STATUS")]
  pub flat: bool,

  /// Glyph shown when the combined build status is success
  #[arg(long, env = "SUCCESS_EMOJI", default_value = "✓")]
  pub success_glyph: String,

  /// Glyph shown when the combined build status is pending
  #[arg(long, env = "PENDING_EMOJI", default_value = "⟳")]
  pub pending_glyph: String,

  /// Glyph shown when the combined build status is failure
  #[arg(long, env = "FAILURE_EMOJI", default_value = "⨉")]
  pub failure_glyph: String,

  /// Placeholder when a PR has no build status at all (keeps columns aligned)
  #[arg(long, env = "ABSENT_EMOJI", default_value = "       ")]
  pub absent_glyph: String,

  /// Header for the needs-review section
  #[arg(long, env = "UNREVIEWED_GROUP_MSG", default_value = ":eyetwitch: _Needs Review_")]
  pub unreviewed_msg: String,

  /// Header for the changes-since-last-review section
  #[arg(long, env = "CHANGES_SINCE_REVIEW_GROUP_MSG", default_value = ":eyes: _Changes Since Last Review_")]
  pub changes_since_review_msg: String,

  /// Header for the mixed-reception section
  #[arg(long, env = "MIXED_RECEPTION_GROUP_MSG", default_value = ":confounded: _Mixed Reception_")]
  pub mixed_reception_msg: String,

  /// Header for the changes-requested section
  #[arg(long, env = "CHANGES_REQUESTED_GROUP_MSG", default_value = ":thinking_face: _Changes Requested_")]
  pub changes_requested_msg: String,

  /// Header for the approved section
  #[arg(long, env = "APPROVED_GROUP_MSG", default_value = ":heart_eyes: _Approved_")]
  pub approved_msg: String,

  /// Print the message to stdout instead of posting to Slack
  #[arg(long)]
  pub dry_run: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
  pub org: String,
  pub github_token: String,
  pub slack_token: String,
  pub channel: String,
  pub blocked_words: Vec<String>,
  pub allowed_repos: HashSet<String>,
  pub allowed_authors: HashSet<String>,
  pub ignored_contexts: HashSet<String>,
  pub show_build_status: bool,
  pub split_by_review_status: bool,
  pub success_glyph: String,
  pub pending_glyph: String,
  pub failure_glyph: String,
  pub absent_glyph: String,
  pub unreviewed_msg: String,
  pub changes_since_review_msg: String,
  pub mixed_reception_msg: String,
  pub changes_requested_msg: String,
  pub approved_msg: String,
  pub dry_run: bool,
}

impl EffectiveConfig {
  /// Section header for a review group. Exhaustive on purpose: adding a
  /// group without a header is a compile error, not a runtime assert.
  pub fn header_for(&self, group: ReviewGroup) -> &str {
    match group {
      ReviewGroup::Unreviewed => &self.unreviewed_msg,
      ReviewGroup::ChangesSinceReview => &self.changes_since_review_msg,
      ReviewGroup::MixedReception => &self.mixed_reception_msg,
      ReviewGroup::ChangesRequested => &self.changes_requested_msg,
      ReviewGroup::Approved => &self.approved_msg,
    }
  }
}

fn require(value: Option<String>, what: &str) -> Result<String> {
  match value {
    Some(s) if !s.trim().is_empty() => Ok(s),
    _ => bail!("missing required setting: {}", what),
  }
}

fn csv_list(raw: &Option<String>) -> Vec<String> {
  raw
    .as_deref()
    .map(|s| {
      s.split(',')
        .map(|word| word.trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect()
    })
    .unwrap_or_default()
}

fn csv_set(raw: &Option<String>) -> HashSet<String> {
  csv_list(raw).into_iter().collect()
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  // Required settings fail here, before anything is fetched
  let org = require(cli.org, "--org (or ORGANIZATION)")?;
  let github_token = require(cli.github_token, "--github-token (or GITHUB_API_TOKEN)")?;
  let slack_token = require(cli.slack_token, "--slack-token (or SLACK_API_TOKEN)")?;

  Ok(EffectiveConfig {
    org,
    github_token,
    slack_token,
    channel: cli.channel,
    blocked_words: csv_list(&cli.ignore_words),
    allowed_repos: csv_set(&cli.repositories),
    allowed_authors: csv_set(&cli.usernames),
    ignored_contexts: csv_set(&cli.ignore_contexts),
    show_build_status: !cli.hide_build_status,
    split_by_review_status: !cli.flat,
    success_glyph: cli.success_glyph,
    pending_glyph: cli.pending_glyph,
    failure_glyph: cli.failure_glyph,
    absent_glyph: cli.absent_glyph,
    unreviewed_msg: cli.unreviewed_msg,
    changes_since_review_msg: cli.changes_since_review_msg,
    mixed_reception_msg: cli.mixed_reception_msg,
    changes_requested_msg: cli.changes_requested_msg,
    approved_msg: cli.approved_msg,
    dry_run: cli.dry_run,
  })
}
