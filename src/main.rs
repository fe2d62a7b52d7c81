use anyhow::Result;
use clap::Parser;

mod cli;
mod ext;
mod filter;
mod github;
mod model;
mod report;
mod review;
mod slack;
mod status;
mod util;

use crate::cli::{normalize, Cli};

const GREETING: &str = "Hi! There's a few open pull requests you should take a look at:\n\n";

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  // Phase 1: normalize CLI/env into one immutable config
  let cfg = normalize(cli)?;

  // Phase 2: fetch open pull requests, filtered down to the reportable set
  let api = github::make_default_api(cfg.github_token.clone());
  let pulls = github::fetch_open_pulls(api.as_ref(), &cfg)?;

  // Phase 3: classify, group, and render
  let lines = report::build_lines(&cfg, &pulls);

  if lines.is_empty() {
    // nothing to report means nothing gets posted
    return Ok(());
  }

  let text = format!("{}{}", GREETING, lines.join("\n"));

  if cfg.dry_run {
    println!("{}", text);
    return Ok(());
  }

  slack::post_message(&cfg, &text)
}
