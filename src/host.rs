//! Read-only snapshot of the host the gates run on.
//!
//! Everything a gate needs to know about the process (runtime version,
//! platform, arguments, whether stderr exists) is captured once into a
//! [`HostEnvironment`] so each gate can be exercised with a hand-built one.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::runtime::Runtime;

/// The only command-line token the gates react to.
pub const DEBUG_FLAG: &str = "--debug";

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("version pattern is valid")
});

/// A `major.minor.patch` runtime version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extract the first version number found in free-form text.
    ///
    /// Interpreter banners look like `Python 3.11.4` or `Python 3.4`; a
    /// missing patch component is read as `0`.
    pub fn extract(text: &str) -> Option<Self> {
        let caps = VERSION_REGEX.captures(text)?;
        let major = caps.get(1)?.as_str().parse().ok()?;
        let minor = caps.get(2)?.as_str().parse().ok()?;
        let patch = match caps.get(3) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        Some(Self::new(major, minor, patch))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl std::str::FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let full = VERSION_REGEX
            .find(trimmed)
            .filter(|m| m.start() == 0 && m.end() == trimmed.len());
        match full {
            Some(m) => Self::extract(m.as_str()).ok_or_else(|| format!("invalid version '{}'", s)),
            None => Err(format!("invalid version '{}'", s)),
        }
    }
}

/// Platform family, as far as the gates care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOS,
    Windows,
    Other(String),
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Self {
        Self::from_identifier(std::env::consts::OS)
    }

    /// Classify a platform identifier.
    ///
    /// Anything starting with `linux` (e.g. `linux`, `linux2`) is Linux.
    pub fn from_identifier(id: &str) -> Self {
        let id = id.to_ascii_lowercase();
        if id.starts_with("linux") {
            Platform::Linux
        } else if id == "macos" || id == "darwin" {
            Platform::MacOS
        } else if id == "windows" || id == "win32" {
            Platform::Windows
        } else {
            Platform::Other(id)
        }
    }
}

/// What the runtime said about its version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeVersion {
    Detected(Version),
    Unavailable { reason: String },
}

/// Snapshot of the process the gates are running in.
#[derive(Debug, Clone)]
pub struct HostEnvironment {
    pub runtime_version: RuntimeVersion,
    pub platform: Platform,
    pub args: Vec<String>,
    pub stderr_available: bool,
}

impl HostEnvironment {
    /// Capture the real process state, asking `runtime` for its version.
    pub fn capture(runtime: &dyn Runtime) -> Self {
        let runtime_version = match runtime.version() {
            Ok(v) => RuntimeVersion::Detected(v),
            Err(reason) => RuntimeVersion::Unavailable { reason },
        };
        Self {
            runtime_version,
            platform: Platform::current(),
            args: std::env::args().collect(),
            stderr_available: stderr_available(),
        }
    }

    /// Whether the debug flag was passed anywhere on the command line.
    pub fn debug_requested(&self) -> bool {
        self.args.iter().any(|a| a == DEBUG_FLAG)
    }
}

/// Check whether the process has a usable standard-error stream.
#[cfg(unix)]
pub fn stderr_available() -> bool {
    // SAFETY: fcntl with F_GETFD only queries descriptor flags.
    unsafe { libc::fcntl(libc::STDERR_FILENO, libc::F_GETFD) != -1 }
}

/// GUI-subsystem processes on Windows start without a console handle.
#[cfg(windows)]
pub fn stderr_available() -> bool {
    use std::os::windows::io::AsRawHandle;
    !std::io::stderr().as_raw_handle().is_null()
}

#[cfg(not(any(unix, windows)))]
pub fn stderr_available() -> bool {
    true
}
