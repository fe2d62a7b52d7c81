use anyhow::{bail, Context, Result};

use crate::cli::EffectiveConfig;
use crate::ext::serde_json::JsonPick;

const POST_URL: &str = "https://slack.com/api/chat.postMessage";

/// Form fields for chat.postMessage. Split out so the payload shape is
/// testable without a network.
pub fn payload<'a>(cfg: &'a EffectiveConfig, text: &'a str) -> Vec<(&'static str, &'a str)> {
  vec![
    ("token", cfg.slack_token.as_str()),
    ("channel", cfg.channel.as_str()),
    ("username", "Pull Request Reminder"),
    ("icon_emoji", ":bell:"),
    ("text", text),
  ]
}

/// Post the notification. Slack reports failures inside a 200 response,
/// so the body's `ok` flag is the real verdict; a rejection is fatal.
pub fn post_message(cfg: &EffectiveConfig, text: &str) -> Result<()> {
  let agent = ureq::AgentBuilder::new().build();

  let response = agent
    .post(POST_URL)
    .send_form(&payload(cfg, text))
    .context("posting Slack message")?;

  let answer: serde_json::Value = response.into_json().context("decoding Slack response")?;

  if !answer.pick("ok").to::<bool>().unwrap_or(false) {
    bail!(
      "Slack rejected the message: {}",
      answer.pick("error").to_or_default::<String>()
    );
  }

  Ok(())
}
