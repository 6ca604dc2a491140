use std::fmt;
use std::process::{Command, Stdio};

/// Outcome of one liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Up,
    Down,
    UnknownHost,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Up => "up",
            Status::Down => "down",
            Status::UnknownHost => "unknown-host",
        };

        f.write_str(label)
    }
}

/// A liveness check against a single target.
///
/// The production implementation shells out to the platform ping utility;
/// tests substitute canned results.
pub trait Probe {
    fn probe(&self, target: &str) -> Status;
}

/// Probes by spawning the platform `ping` binary for a single echo request
/// and classifying its exit status. The child's output is discarded; the exit
/// status is the only channel. Blocks for however long the platform ping's
/// own default timeout is.
pub struct PingProbe;

impl Probe for PingProbe {
    fn probe(&self, target: &str) -> Status {
        let count_flag = if cfg!(windows) { "-n" } else { "-c" };

        let status = Command::new("ping")
            .arg(count_flag)
            .arg("1")
            .arg(target)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) => classify(status.code()),
            // A ping binary that cannot even be spawned tells us nothing
            // about the target, so stay on the unreachable side.
            Err(_) => Status::Down,
        }
    }
}

/// Exit code the platform ping uses when it cannot resolve the target name.
/// BSD-derived pings (macOS) exit with `EX_NOHOST`; iputils exits 2 for
/// resolution failures (and other errors) and 1 when no reply arrives.
#[cfg(target_os = "macos")]
const UNKNOWN_HOST_CODE: i32 = 68;
#[cfg(not(target_os = "macos"))]
const UNKNOWN_HOST_CODE: i32 = 2;

/// Map a ping exit status to a [`Status`].
///
/// Only exit 0 counts as reachable. Codes outside the table, and death by
/// signal (`None`), classify as down rather than up.
pub fn classify(code: Option<i32>) -> Status {
    match code {
        Some(0) => Status::Up,
        Some(UNKNOWN_HOST_CODE) => Status::UnknownHost,
        _ => Status::Down,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_exit_is_up() {
        assert_eq!(classify(Some(0)), Status::Up);
    }

    #[test]
    fn resolution_failure_code_is_unknown_host() {
        assert_eq!(classify(Some(UNKNOWN_HOST_CODE)), Status::UnknownHost);
    }

    #[test]
    fn unrecognized_codes_are_down() {
        assert_eq!(classify(Some(1)), Status::Down);
        assert_eq!(classify(Some(42)), Status::Down);
        assert_eq!(classify(None), Status::Down);
    }

    #[test]
    fn status_labels() {
        assert_eq!(Status::Up.to_string(), "up");
        assert_eq!(Status::Down.to_string(), "down");
        assert_eq!(Status::UnknownHost.to_string(), "unknown-host");
    }
}
