// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: GitHub REST seam: trait for the five list endpoints, HTTP backend with pagination, env-backed test backend
// role: github/api
// inputs: org/repo identifiers; bearer token; PULLREM_TEST_* JSON fixtures when mocking
// outputs: Raw JSON arrays per endpoint; adapters elsewhere turn them into core records
// side_effects: Network calls to api.github.com (HTTP backend only)
// invariants:
// - Fetch failures are errors, not empties: a failed run must not produce a partial report
// - Pagination walks per_page=100 pages until a short page
// - Env backend returns empty arrays for absent fixture keys
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{bail, Context, Result};

const API_ROOT: &str = "https://api.github.com";
const PAGE_SIZE: usize = 100;

/// The provider queries the reminder needs, one method per endpoint.
/// Everything returns raw JSON entries; mapping into core records stays
/// at the adapter layer so backends can be swapped wholesale in tests.
pub trait GithubApi {
  fn list_org_repos(&self, org: &str) -> Result<Vec<serde_json::Value>>;
  fn list_open_pulls(&self, org: &str, repo: &str) -> Result<Vec<serde_json::Value>>;
  fn list_pull_reviews(&self, org: &str, repo: &str, number: i64) -> Result<Vec<serde_json::Value>>;
  fn list_pull_commits(&self, org: &str, repo: &str, number: i64) -> Result<Vec<serde_json::Value>>;
  fn list_commit_statuses(&self, org: &str, repo: &str, sha: &str) -> Result<Vec<serde_json::Value>>;
}

pub struct GithubHttpApi {
  agent: ureq::Agent,
  token: String,
}

impl GithubHttpApi {
  pub fn new(token: String) -> Self {
    Self {
      agent: ureq::AgentBuilder::new().build(),
      token,
    }
  }

  /// GET a list endpoint, following page numbers until a short page.
  fn get_array_paged(&self, path: &str) -> Result<Vec<serde_json::Value>> {
    let mut out: Vec<serde_json::Value> = Vec::new();
    let joiner = if path.contains('?') { '&' } else { '?' };

    for page in 1.. {
      let url = format!("{}/{}{}per_page={}&page={}", API_ROOT, path, joiner, PAGE_SIZE, page);

      let response = self
        .agent
        .get(&url)
        .set("Accept", "application/vnd.github+json")
        .set("User-Agent", "pull-reminder")
        .set("Authorization", &format!("Bearer {}", self.token))
        .call()
        .with_context(|| format!("GET {}", path))?;

      let parsed: serde_json::Value = response
        .into_json()
        .with_context(|| format!("decoding response from {}", path))?;

      let Some(entries) = parsed.as_array() else {
        bail!("unexpected non-array response from {}", path);
      };

      let page_len = entries.len();
      out.extend(entries.iter().cloned());

      if page_len < PAGE_SIZE {
        break;
      }
    }

    Ok(out)
  }
}

impl GithubApi for GithubHttpApi {
  fn list_org_repos(&self, org: &str) -> Result<Vec<serde_json::Value>> {
    self.get_array_paged(&format!("orgs/{}/repos", org))
  }

  fn list_open_pulls(&self, org: &str, repo: &str) -> Result<Vec<serde_json::Value>> {
    self.get_array_paged(&format!("repos/{}/{}/pulls?state=open", org, repo))
  }

  fn list_pull_reviews(&self, org: &str, repo: &str, number: i64) -> Result<Vec<serde_json::Value>> {
    self.get_array_paged(&format!("repos/{}/{}/pulls/{}/reviews", org, repo, number))
  }

  fn list_pull_commits(&self, org: &str, repo: &str, number: i64) -> Result<Vec<serde_json::Value>> {
    self.get_array_paged(&format!("repos/{}/{}/pulls/{}/commits", org, repo, number))
  }

  fn list_commit_statuses(&self, org: &str, repo: &str, sha: &str) -> Result<Vec<serde_json::Value>> {
    self.get_array_paged(&format!("repos/{}/{}/commits/{}/statuses", org, repo, sha))
  }
}

/// Env-backed backend for tests: fixture JSON comes from PULLREM_TEST_*
/// variables so integration tests can drive the whole binary offline.
///
/// - `PULLREM_TEST_REPOS_JSON`: array of repo objects
/// - `PULLREM_TEST_PULLS_JSON`: map of repo name -> array of pulls
/// - `PULLREM_TEST_REVIEWS_JSON` / `PULLREM_TEST_COMMITS_JSON`:
///   map of `repo#number` -> array
/// - `PULLREM_TEST_STATUSES_JSON`: map of `repo@sha` -> array
pub struct GithubEnvApi;

fn env_json(var: &str) -> Result<Option<serde_json::Value>> {
  match std::env::var(var) {
    Ok(raw) => {
      let parsed = serde_json::from_str(&raw).with_context(|| format!("parsing {}", var))?;
      Ok(Some(parsed))
    }
    Err(_) => Ok(None),
  }
}

fn env_keyed_array(var: &str, key: &str) -> Result<Vec<serde_json::Value>> {
  let Some(map) = env_json(var)? else {
    return Ok(Vec::new());
  };

  Ok(
    map
      .get(key)
      .and_then(|v| v.as_array())
      .cloned()
      .unwrap_or_default(),
  )
}

impl GithubApi for GithubEnvApi {
  fn list_org_repos(&self, _org: &str) -> Result<Vec<serde_json::Value>> {
    let Some(v) = env_json("PULLREM_TEST_REPOS_JSON")? else {
      return Ok(Vec::new());
    };
    Ok(v.as_array().cloned().unwrap_or_default())
  }

  fn list_open_pulls(&self, _org: &str, repo: &str) -> Result<Vec<serde_json::Value>> {
    env_keyed_array("PULLREM_TEST_PULLS_JSON", repo)
  }

  fn list_pull_reviews(&self, _org: &str, repo: &str, number: i64) -> Result<Vec<serde_json::Value>> {
    env_keyed_array("PULLREM_TEST_REVIEWS_JSON", &format!("{}#{}", repo, number))
  }

  fn list_pull_commits(&self, _org: &str, repo: &str, number: i64) -> Result<Vec<serde_json::Value>> {
    env_keyed_array("PULLREM_TEST_COMMITS_JSON", &format!("{}#{}", repo, number))
  }

  fn list_commit_statuses(&self, _org: &str, repo: &str, sha: &str) -> Result<Vec<serde_json::Value>> {
    env_keyed_array("PULLREM_TEST_STATUSES_JSON", &format!("{}@{}", repo, sha))
  }
}

pub fn env_wants_mock() -> bool {
  std::env::var("PULLREM_TEST_REPOS_JSON").is_ok()
}

/// Pick the backend: env fixtures when present, HTTP otherwise.
pub fn make_default_api(token: String) -> Box<dyn GithubApi> {
  if env_wants_mock() {
    Box::new(GithubEnvApi)
  } else {
    Box::new(GithubHttpApi::new(token))
  }
}
