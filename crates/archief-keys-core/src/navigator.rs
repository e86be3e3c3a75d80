//! Navigation backends.
//!
//! A [`Navigator`] receives the fully resolved [`Location`] for every
//! navigation decided by the router and carries it out: log it, record it,
//! or hand it to an opener program such as `xdg-open`.

use std::fmt;
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Errors raised while carrying out a navigation.
#[derive(Debug, thiserror::Error)]
pub enum NavigateError {
    /// The opener program could not be started.
    #[error("failed to spawn {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The opener ran but exited unsuccessfully.
    #[error("{program:?} exited with {status}")]
    Exit { program: String, status: ExitStatus },

    /// Waiting for the opener failed.
    #[error("failed to wait for {program:?}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The opener was used outside a tokio runtime.
    #[error("{program:?} needs a tokio runtime to run in")]
    NoRuntime { program: String },

    /// The site base URL is not an `http(s)` URL.
    #[error("invalid site base URL {0:?}")]
    InvalidBaseUrl(String),
}

/// An absolute URL: the site base URL joined with a navigation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: String,
    path: String,
}

impl Location {
    /// Join `path` onto `base_url`. A trailing slash on the base is dropped so
    /// that the result has exactly one slash between host and path.
    pub fn new(base_url: &str, path: &str) -> Result<Self, NavigateError> {
        let base = base_url.trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(NavigateError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            url: format!("{base}{path}"),
            path: path.to_string(),
        })
    }

    /// The absolute URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The site path the URL was built from.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Output boundary for navigations.
pub trait Navigator {
    /// Replace the current location with `location`.
    fn navigate(&mut self, location: &Location) -> Result<(), NavigateError>;
}

impl<N: Navigator + ?Sized> Navigator for Box<N> {
    fn navigate(&mut self, location: &Location) -> Result<(), NavigateError> {
        (**self).navigate(location)
    }
}

/// Logs each navigation and does nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&mut self, location: &Location) -> Result<(), NavigateError> {
        info!(url = %location, "navigate");
        Ok(())
    }
}

/// Keeps every navigated URL in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    visited: Vec<Location>,
}

impl RecordingNavigator {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locations navigated to, oldest first.
    pub fn visited(&self) -> &[Location] {
        &self.visited
    }

    /// Navigated URLs, oldest first.
    pub fn urls(&self) -> Vec<&str> {
        self.visited.iter().map(Location::url).collect()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, location: &Location) -> Result<(), NavigateError> {
        self.visited.push(location.clone());
        Ok(())
    }
}

/// Opens each URL with an external program: `program [args..] <url>`.
///
/// The child runs detached from the terminal's stdio. It is reaped on a
/// background task of the current tokio runtime, which logs a failing exit
/// status; `navigate` itself returns as soon as the child has started.
#[derive(Debug, Clone)]
pub struct CommandNavigator {
    program: String,
    args: Vec<String>,
}

impl CommandNavigator {
    /// An opener running `program` with `args` before the URL.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// The opener program.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The full argument vector passed for `location`, excluding the program.
    pub fn argv(&self, location: &Location) -> Vec<String> {
        let mut argv = self.args.clone();
        argv.push(location.url().to_string());
        argv
    }

    fn spawn(&self, location: &Location) -> Result<Child, NavigateError> {
        Command::new(&self.program)
            .args(self.argv(location))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| NavigateError::Spawn {
                program: self.program.clone(),
                source,
            })
    }
}

/// Wait for an opener to exit. A non-zero exit status is an error.
pub(crate) async fn reap_opener(program: String, mut child: Child) -> Result<(), NavigateError> {
    match child.wait().await {
        Ok(status) if status.success() => {
            debug!(program = %program, "opener exited");
            Ok(())
        }
        Ok(status) => Err(NavigateError::Exit { program, status }),
        Err(source) => Err(NavigateError::Wait { program, source }),
    }
}

impl Navigator for CommandNavigator {
    fn navigate(&mut self, location: &Location) -> Result<(), NavigateError> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return Err(NavigateError::NoRuntime {
                program: self.program.clone(),
            });
        };
        info!(program = %self.program, url = %location, "opening location");

        let child = self.spawn(location).inspect_err(|e| {
            warn!(error = %e, "opener failed to start");
        })?;
        let program = self.program.clone();
        runtime.spawn(async move {
            if let Err(e) = reap_opener(program, child).await {
                warn!(error = %e, "opener failed");
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_location_join() {
        let loc = Location::new("http://localhost:5000", "/archief").unwrap();
        assert_eq!(loc.url(), "http://localhost:5000/archief");
        assert_eq!(loc.path(), "/archief");
    }

    #[test]
    fn test_location_trailing_slash() {
        let loc = Location::new("https://archief.example.org/", "/").unwrap();
        assert_eq!(loc.url(), "https://archief.example.org/");
        let loc = Location::new("https://archief.example.org//", "/informatie").unwrap();
        assert_eq!(loc.to_string(), "https://archief.example.org/informatie");
    }

    #[test]
    fn test_location_rejects_non_http_base() {
        assert!(matches!(
            Location::new("ftp://example.org", "/"),
            Err(NavigateError::InvalidBaseUrl(_))
        ));
        assert!(Location::new("", "/").is_err());
    }

    #[test]
    fn test_recording_navigator() {
        let mut nav = RecordingNavigator::new();
        let a = Location::new("http://h", "/a").unwrap();
        let b = Location::new("http://h", "/b").unwrap();
        nav.navigate(&a).unwrap();
        nav.navigate(&b).unwrap();
        assert_eq!(nav.urls(), vec!["http://h/a", "http://h/b"]);
        assert_eq!(nav.visited().len(), 2);
    }

    #[test]
    fn test_boxed_navigator_delegates() {
        let mut nav: Box<dyn Navigator> = Box::new(LogNavigator);
        let loc = Location::new("http://h", "/").unwrap();
        assert!(nav.navigate(&loc).is_ok());
    }

    #[test]
    fn test_command_argv_appends_url() {
        let nav = CommandNavigator::new("firefox", vec!["--new-tab".to_string()]);
        let loc = Location::new("http://h", "/berichten").unwrap();
        assert_eq!(nav.argv(&loc), vec!["--new-tab", "http://h/berichten"]);
        assert_eq!(nav.program(), "firefox");
    }

    #[tokio::test]
    async fn test_command_spawn_failure() {
        let mut nav = CommandNavigator::new("/nonexistent/archief-keys-opener", Vec::new());
        let loc = Location::new("http://h", "/").unwrap();
        let err = nav.navigate(&loc).unwrap_err();
        assert!(matches!(err, NavigateError::Spawn { .. }));
        assert!(err.to_string().contains("archief-keys-opener"));
    }

    #[test]
    fn test_command_outside_runtime() {
        let mut nav = CommandNavigator::new("true", Vec::new());
        let loc = Location::new("http://h", "/").unwrap();
        assert!(matches!(
            nav.navigate(&loc),
            Err(NavigateError::NoRuntime { .. })
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_reap_reports_failing_exit() {
        let nav = CommandNavigator::new("false", Vec::new());
        let loc = Location::new("http://h", "/").unwrap();
        let child = nav.spawn(&loc).unwrap();
        let err = reap_opener(nav.program().to_string(), child)
            .await
            .unwrap_err();
        match err {
            NavigateError::Exit { program, status } => {
                assert_eq!(program, "false");
                assert!(!status.success());
            }
            other => panic!("expected exit error, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_reap_accepts_success() {
        let nav = CommandNavigator::new("true", Vec::new());
        let loc = Location::new("http://h", "/").unwrap();
        let child = nav.spawn(&loc).unwrap();
        assert!(reap_opener("true".to_string(), child).await.is_ok());
    }

    /// Children of this process that have exited but were never waited on.
    #[cfg(target_os = "linux")]
    fn zombie_children() -> usize {
        let me = std::process::id().to_string();
        let Ok(entries) = std::fs::read_dir("/proc") else {
            return 0;
        };
        entries
            .flatten()
            .filter_map(|entry| std::fs::read_to_string(entry.path().join("stat")).ok())
            .filter(|stat| {
                // Fields after the parenthesised command name: state, ppid, ...
                let Some((_, rest)) = stat.rsplit_once(')') else {
                    return false;
                };
                let mut fields = rest.split_whitespace();
                fields.next() == Some("Z") && fields.next() == Some(me.as_str())
            })
            .count()
    }

    #[cfg(target_os = "linux")]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_opener_children_are_reaped() {
        let mut nav = CommandNavigator::new("true", Vec::new());
        let loc = Location::new("http://h", "/archief").unwrap();
        for _ in 0..5 {
            nav.navigate(&loc).unwrap();
        }
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        assert_eq!(zombie_children(), 0);
    }
}
