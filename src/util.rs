use chrono::{DateTime, Utc};
use clap::CommandFactory;

/// Parse an RFC3339 timestamp into UTC. Returns None on anything the
/// provider should not have sent, letting callers decide whether that
/// means "drop the record" or "keep it timestamp-less".
pub fn parse_rfc3339_utc(raw: &str) -> Option<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc))
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
