// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path navigation over serde_json::Value with typed extraction for provider payloads
// role: extension/serde_json
// outputs: JsonPick trait and Picked wrapper; path segments may be object keys or array indices
// invariants: No panics; a missing or mistyped path yields None; to_or_default falls back to T::default
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;

/// A location inside a JSON document, possibly absent.
pub struct Picked<'a> {
  inner: Option<&'a serde_json::Value>,
}

impl<'a> Picked<'a> {
  /// Deserialize the picked value as `T`, if present and convertible.
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.inner.and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  /// Deserialize as `T`, falling back to `T::default()`.
  pub fn to_or_default<T>(&self) -> T
  where
    T: DeserializeOwned + Default,
  {
    self.to::<T>().unwrap_or_default()
  }

  /// Borrow the picked value as a string slice without cloning.
  pub fn as_str(&self) -> Option<&'a str> {
    self.inner.and_then(|v| v.as_str())
  }
}

/// Navigate nested JSON with paths like `"user.login"` or `"parents.0.sha"`.
pub trait JsonPick {
  fn pick(&self, path: &str) -> Picked<'_>;
}

impl JsonPick for serde_json::Value {
  fn pick(&self, path: &str) -> Picked<'_> {
    let mut current = Some(self);

    for segment in path.split('.').filter(|s| !s.is_empty()) {
      current = current.and_then(|value| match segment.parse::<usize>() {
        Ok(index) => value.get(index),
        Err(_) => value.get(segment),
      });
    }

    Picked { inner: current }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn picks_object_keys_and_array_indices() {
    let v = serde_json::json!({
      "user": { "login": "octocat" },
      "commits": [ { "sha": "abc" }, { "sha": "def" } ]
    });

    assert_eq!(v.pick("user.login").as_str(), Some("octocat"));
    assert_eq!(v.pick("commits.1.sha").as_str(), Some("def"));
    assert_eq!(v.pick("commits.9.sha").as_str(), None);
    assert_eq!(v.pick("user.missing").to::<String>(), None);
  }

  #[test]
  fn empty_path_picks_the_root() {
    let v = serde_json::json!(42);
    assert_eq!(v.pick("").to::<i64>(), Some(42));
  }

  #[test]
  fn to_or_default_falls_back() {
    let v = serde_json::json!({});
    let s: String = v.pick("nope").to_or_default();
    assert_eq!(s, "");
    let n: i64 = v.pick("nope").to_or_default();
    assert_eq!(n, 0);
  }
}
