//! Crash diagnostics with no stderr stream.
//!
//! Signal dispositions are process-wide, so this lives in its own test binary
//! where nothing else can install handlers first.
#![cfg(unix)]

use std::collections::HashMap;

use earlyinit::gates::diagnostics::{enable_crash_diagnostics, DiagnosticsUnavailable};
use earlyinit::host::{HostEnvironment, Platform, RuntimeVersion, Version};

const WATCHED: &[libc::c_int] = &[
    libc::SIGSEGV,
    libc::SIGBUS,
    libc::SIGFPE,
    libc::SIGILL,
    libc::SIGABRT,
    libc::SIGUSR1,
];

fn disposition(signum: libc::c_int) -> libc::sighandler_t {
    // SAFETY: a null new action only queries the current one.
    unsafe {
        let mut old: libc::sigaction = std::mem::zeroed();
        libc::sigaction(signum, std::ptr::null(), &mut old);
        old.sa_sigaction
    }
}

#[test]
fn no_stderr_leaves_signal_handlers_untouched() {
    let host = HostEnvironment {
        runtime_version: RuntimeVersion::Detected(Version::new(3, 11, 0)),
        platform: Platform::Linux,
        args: vec!["earlyinit".into()],
        stderr_available: false,
    };
    let before: Vec<_> = WATCHED.iter().map(|s| disposition(*s)).collect();

    let mut env: HashMap<String, String> = HashMap::new();
    let result = enable_crash_diagnostics(&host, &mut env);

    assert_eq!(result, Err(DiagnosticsUnavailable::NoStderr));
    assert!(env.is_empty());
    let after: Vec<_> = WATCHED.iter().map(|s| disposition(*s)).collect();
    assert_eq!(before, after);
    assert_eq!(disposition(libc::SIGUSR1), libc::SIG_DFL);
}
