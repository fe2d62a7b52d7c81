use std::collections::HashMap;

use crate::cli::EffectiveConfig;
use crate::model::{BuildState, PullRequest, ReviewGroup};
use crate::review;
use crate::status;

fn build_glyph<'a>(cfg: &'a EffectiveConfig, combined: Option<BuildState>) -> &'a str {
  if !cfg.show_build_status {
    return "";
  }

  match combined {
    Some(BuildState::Success) => &cfg.success_glyph,
    Some(BuildState::Pending) => &cfg.pending_glyph,
    Some(BuildState::Failure) => &cfg.failure_glyph,
    // placeholder keeps the rest of the line aligned for PRs with no checks
    None => &cfg.absent_glyph,
  }
}

/// One report line for one pull request.
pub fn format_line(cfg: &EffectiveConfig, pr: &PullRequest, combined: Option<BuildState>) -> String {
  format!(
    "*{}[{}/{}]* <{}|{} - by {}>",
    build_glyph(cfg, combined),
    cfg.org,
    pr.repo,
    pr.html_url,
    pr.title,
    pr.author
  )
}

/// Build the final ordered line sequence for the notification body.
///
/// Each pull request gets one line tagged with its review group; groups
/// are then rendered in the fixed display order. With splitting disabled
/// the lines come back flat, in input order, with no headers.
///
/// A pull request whose classification fails (the zero-commit anomaly)
/// is dropped from the report with a stderr note; it is never silently
/// misfiled into a group.
pub fn build_lines(cfg: &EffectiveConfig, pulls: &[PullRequest]) -> Vec<String> {
  let mut by_group: HashMap<ReviewGroup, Vec<String>> = HashMap::new();
  let mut flat: Vec<String> = Vec::new();

  for pr in pulls {
    let combined = status::combined_build_status(&pr.statuses, &cfg.ignored_contexts);
    let line = format_line(cfg, pr, combined);

    if !cfg.split_by_review_status {
      flat.push(line);
      continue;
    }

    match review::review_group(&pr.reviews, &pr.commits, &pr.author) {
      Ok(group) => by_group.entry(group).or_default().push(line),
      Err(err) => {
        eprintln!("[classify] skipping {}/{}#{}: {:#}", cfg.org, pr.repo, pr.number, err);
      }
    }
  }

  if !cfg.split_by_review_status {
    return flat;
  }

  render_groups(&by_group, cfg)
}

/// Emit non-empty groups in display order, each header followed by its
/// lines in the order they were appended. Empty groups emit nothing.
pub fn render_groups(by_group: &HashMap<ReviewGroup, Vec<String>>, cfg: &EffectiveConfig) -> Vec<String> {
  let mut out: Vec<String> = Vec::new();

  for group in ReviewGroup::DISPLAY_ORDER {
    let Some(lines) = by_group.get(&group) else {
      continue;
    };
    if lines.is_empty() {
      continue;
    }

    out.push(cfg.header_for(group).to_string());
    out.extend(lines.iter().cloned());
  }

  out
}
