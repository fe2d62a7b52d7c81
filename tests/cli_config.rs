use assert_cmd::Command;
use predicates::prelude::*;

fn bare_cmd() -> Command {
  let mut cmd = Command::cargo_bin("pull-reminder").unwrap();

  for var in ["ORGANIZATION", "GITHUB_API_TOKEN", "SLACK_API_TOKEN", "SLACK_CHANNEL"] {
    cmd.env_remove(var);
  }

  cmd
}

#[test]
fn missing_organization_fails_before_any_fetching() {
  bare_cmd()
    .env("GITHUB_API_TOKEN", "x")
    .env("SLACK_API_TOKEN", "x")
    .assert()
    .failure()
    .stderr(predicate::str::contains("missing required setting").and(predicate::str::contains("ORGANIZATION")));
}

#[test]
fn missing_tokens_fail_before_any_fetching() {
  bare_cmd()
    .env("ORGANIZATION", "acme")
    .assert()
    .failure()
    .stderr(predicate::str::contains("missing required setting"));
}

#[test]
fn gen_man_needs_no_configuration() {
  bare_cmd()
    .arg("--gen-man")
    .assert()
    .success()
    .stdout(predicate::str::contains(".TH"));
}
