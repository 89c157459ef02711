use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::date::PuzzleDate;

pub const DEFAULT_BASE_URL: &str = "https://adventofcode.com";

/// Where puzzle input comes from.
pub trait InputSource {
    fn fetch(&self, date: PuzzleDate) -> Result<String>;
}

/// Input stored in a local file, regardless of the requested date.
#[derive(Debug, Clone)]
pub struct FileInput {
    path: PathBuf,
}

impl FileInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InputSource for FileInput {
    fn fetch(&self, date: PuzzleDate) -> Result<String> {
        debug!(path = %self.path.display(), %date, "reading puzzle input");
        fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))
    }
}

/// Input downloaded with a session cookie. One request per fetch; the
/// response is neither retried nor persisted.
#[derive(Debug)]
pub struct HttpInput {
    agent: ureq::Agent,
    base_url: String,
    session: String,
}

impl HttpInput {
    pub fn new(session: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, session)
    }

    pub fn with_base_url(base_url: impl Into<String>, session: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("puzzlekit/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: session.into(),
        }
    }

    pub fn url_for(&self, date: PuzzleDate) -> String {
        format!("{}/{}", self.base_url, date.input_path())
    }
}

impl InputSource for HttpInput {
    fn fetch(&self, date: PuzzleDate) -> Result<String> {
        let url = self.url_for(date);
        info!(%url, "fetching puzzle input");
        let response = self
            .agent
            .get(&url)
            .set("Cookie", &format!("session={}", self.session))
            .call()
            .with_context(|| format!("failed to fetch input for {date}; is the session valid?"))?;
        response
            .into_string()
            .with_context(|| format!("failed to read input body for {date}"))
    }
}

/// Splits input into lines on `'\n'`, dropping the empty segment after a
/// trailing newline.
pub fn input_lines(input: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = input.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_drop_trailing_newline_only() {
        assert_eq!(input_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(input_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert_eq!(input_lines("a\nb"), vec!["a", "b"]);
        assert!(input_lines("").is_empty());
    }

    #[test]
    fn http_urls_follow_puzzle_date() {
        let source = HttpInput::with_base_url("http://localhost:8080/", "token");
        let date = PuzzleDate::clamped(2022, 1, 2024);
        assert_eq!(
            source.url_for(date),
            "http://localhost:8080/2022/day/1/input"
        );
    }

    #[test]
    fn file_input_reads_contents() -> Result<()> {
        let dir = tempfile::Builder::new()
            .prefix("puzzlekit-input-test")
            .tempdir()?;
        let path = dir.path().join("input.txt");
        fs::write(&path, "1\n2\n")?;

        let source = FileInput::new(&path);
        let input = source.fetch(PuzzleDate::clamped(2022, 1, 2024))?;
        assert_eq!(input, "1\n2\n");
        Ok(())
    }

    #[test]
    fn missing_file_reports_path() {
        let source = FileInput::new("/definitely/not/here.txt");
        let err = source
            .fetch(PuzzleDate::clamped(2022, 1, 2024))
            .expect_err("file does not exist");
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
