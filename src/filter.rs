use std::collections::HashSet;

use crate::model::PullRequest;

/// Repository allow-list gate; an empty list admits every repository.
pub fn is_repo_allowed(repo: &str, allowed_repos: &HashSet<String>) -> bool {
  allowed_repos.is_empty() || allowed_repos.contains(&repo.to_lowercase())
}

/// Eligibility gate applied before any per-PR fetching or classification:
/// the pull request must be open, its author must pass the (optional)
/// allow-list, and its repository must pass the (optional) allow-list.
/// The allow-list sets are pre-lowercased at config time.
pub fn is_eligible(
  pr: &PullRequest,
  allowed_authors: &HashSet<String>,
  allowed_repos: &HashSet<String>,
) -> bool {
  if !pr.open {
    return false;
  }
  if !allowed_authors.is_empty() && !allowed_authors.contains(&pr.author.to_lowercase()) {
    return false;
  }
  is_repo_allowed(&pr.repo, allowed_repos)
}

/// A title is rejected when any blocked word appears as a
/// case-insensitive substring; an empty block-list admits everything.
pub fn is_title_allowed(title: &str, blocked_words: &[String]) -> bool {
  let lowered = title.to_lowercase();
  !blocked_words.iter().any(|word| lowered.contains(word.as_str()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn pr(repo: &str, author: &str, open: bool) -> PullRequest {
    PullRequest {
      repo: repo.into(),
      number: 1,
      title: "Add feature".into(),
      author: author.into(),
      html_url: "https://example.invalid/pr/1".into(),
      head_sha: "abc".into(),
      open,
      reviews: Vec::new(),
      commits: Vec::new(),
      statuses: Vec::new(),
    }
  }

  fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn closed_pull_requests_are_never_eligible() {
    assert!(!is_eligible(&pr("widgets", "alice", false), &set(&[]), &set(&[])));
  }

  #[test]
  fn empty_allow_lists_admit_everyone() {
    assert!(is_eligible(&pr("widgets", "alice", true), &set(&[]), &set(&[])));
  }

  #[test]
  fn author_allow_list_is_case_insensitive() {
    let authors = set(&["alice"]);
    assert!(is_eligible(&pr("widgets", "Alice", true), &authors, &set(&[])));
    assert!(!is_eligible(&pr("widgets", "bob", true), &authors, &set(&[])));
  }

  #[test]
  fn repo_allow_list_is_case_insensitive() {
    let repos = set(&["widgets"]);
    assert!(is_eligible(&pr("Widgets", "alice", true), &set(&[]), &repos));
    assert!(!is_eligible(&pr("gadgets", "alice", true), &set(&[]), &repos));
  }

  #[test]
  fn blocked_word_rejects_title_as_substring() {
    let blocked = vec!["wip".to_string()];
    assert!(!is_title_allowed("WIP: add feature", &blocked));
    assert!(!is_title_allowed("reswiprocate", &blocked));
    assert!(is_title_allowed("Add feature", &blocked));
  }

  #[test]
  fn empty_block_list_admits_everything() {
    assert!(is_title_allowed("WIP: anything at all", &[]));
  }
}
