//! Crash diagnostics.
//!
//! Best effort only: installs handlers that print a one-line fault notice on
//! fatal signals, registers `SIGUSR1` as an on-demand diagnostic dump where
//! the platform has it, and asks interpreter children for their own native
//! fault traces. Nothing here can stop the launch.
//!
//! Handlers are process-wide, so installation happens at most once no matter
//! how often [`enable_crash_diagnostics`] is called.

use std::sync::OnceLock;

use thiserror::Error;

use crate::env::EnvTable;
use crate::host::HostEnvironment;

/// Environment variable that turns on the interpreter's own fault handler.
pub const FAULT_HANDLER_VAR: &str = "PYTHONFAULTHANDLER";

/// Which handlers ended up installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handlers {
    /// Number of fatal signals that now print a fault notice.
    pub fatal_signals: usize,
    /// Whether `SIGUSR1` triggers a diagnostic dump.
    pub user_signal: bool,
}

/// Why crash diagnostics were skipped.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticsUnavailable {
    #[error("standard error is not available")]
    NoStderr,
    #[error("no fault handler could be installed")]
    RegistrationFailed,
}

static INSTALLED: OnceLock<Result<Handlers, DiagnosticsUnavailable>> = OnceLock::new();

/// Enable crash diagnostics if there is somewhere to write them.
///
/// Without a standard-error stream nothing is registered and the
/// environment is left alone.
pub fn enable_crash_diagnostics(
    host: &HostEnvironment,
    env: &mut dyn EnvTable,
) -> Result<Handlers, DiagnosticsUnavailable> {
    if !host.stderr_available {
        tracing::debug!("No stderr, leaving crash diagnostics off");
        return Err(DiagnosticsUnavailable::NoStderr);
    }

    let handlers = (*INSTALLED.get_or_init(install_handlers))?;

    if env.get(FAULT_HANDLER_VAR).is_none() {
        env.set(FAULT_HANDLER_VAR, "1");
    }
    tracing::debug!(
        "Crash diagnostics on: {} fatal signals, user signal {}",
        handlers.fatal_signals,
        handlers.user_signal
    );
    Ok(handlers)
}

/// Put `SIGUSR1` back to its default action.
///
/// Called once the checks are over, so the diagnostic message cannot claim
/// they are still running while the application is.
pub fn release_user_signal() {
    #[cfg(unix)]
    unix::release_user_signal();
}

#[cfg(unix)]
fn install_handlers() -> Result<Handlers, DiagnosticsUnavailable> {
    unix::install()
}

#[cfg(not(unix))]
fn install_handlers() -> Result<Handlers, DiagnosticsUnavailable> {
    // No signal-based fault reporting here; children still get theirs.
    Ok(Handlers {
        fatal_signals: 0,
        user_signal: false,
    })
}

#[cfg(unix)]
mod unix {
    use super::{DiagnosticsUnavailable, Handlers};
    use libc::c_int;

    const ALT_STACK_SIZE: usize = 64 * 1024;

    const FATAL_SIGNALS: &[(c_int, &[u8])] = &[
        (libc::SIGSEGV, b"Segmentation fault"),
        (libc::SIGBUS, b"Bus error"),
        (libc::SIGFPE, b"Floating point exception"),
        (libc::SIGILL, b"Illegal instruction"),
        (libc::SIGABRT, b"Aborted"),
    ];

    pub(super) fn install() -> Result<Handlers, DiagnosticsUnavailable> {
        ensure_alt_stack();

        let fatal_signals = FATAL_SIGNALS
            .iter()
            .filter(|(signum, _)| {
                // SAFETY: the handler only calls async-signal-safe functions.
                let ok = unsafe {
                    register(
                        *signum,
                        on_fatal_signal,
                        libc::SA_RESETHAND | libc::SA_ONSTACK | libc::SA_NODEFER,
                    )
                };
                if !ok {
                    tracing::warn!("Could not install fault handler for signal {}", signum);
                }
                ok
            })
            .count();

        // SAFETY: as above.
        let user_signal = unsafe { register(libc::SIGUSR1, on_user_signal, libc::SA_RESTART) };

        if fatal_signals == 0 {
            return Err(DiagnosticsUnavailable::RegistrationFailed);
        }
        Ok(Handlers {
            fatal_signals,
            user_signal,
        })
    }

    pub(super) fn release_user_signal() {
        // SAFETY: restoring SIG_DFL installs no handler code.
        let mut action: libc::sigaction = unsafe { std::mem::zeroed() };
        action.sa_sigaction = libc::SIG_DFL;
        unsafe {
            libc::sigemptyset(&mut action.sa_mask);
            libc::sigaction(libc::SIGUSR1, &action, std::ptr::null_mut());
        }
    }

    /// Current disposition of `signum`.
    #[cfg(test)]
    pub(super) fn disposition(signum: c_int) -> libc::sighandler_t {
        let mut old: libc::sigaction = unsafe { std::mem::zeroed() };
        // SAFETY: a null new action only queries.
        unsafe { libc::sigaction(signum, std::ptr::null(), &mut old) };
        old.sa_sigaction
    }

    /// Give the main thread a signal stack so stack overflows still report.
    fn ensure_alt_stack() {
        // SAFETY: querying with a null new-stack pointer changes nothing.
        let mut current: libc::stack_t = unsafe { std::mem::zeroed() };
        if unsafe { libc::sigaltstack(std::ptr::null(), &mut current) } != 0 {
            return;
        }
        if current.ss_flags & libc::SS_DISABLE == 0 {
            return;
        }

        let stack: &'static mut [u8] = Box::leak(vec![0u8; ALT_STACK_SIZE].into_boxed_slice());
        let mut alt: libc::stack_t = unsafe { std::mem::zeroed() };
        alt.ss_sp = stack.as_mut_ptr().cast();
        alt.ss_size = stack.len();
        alt.ss_flags = 0;
        // SAFETY: `stack` is leaked and outlives the process.
        if unsafe { libc::sigaltstack(&alt, std::ptr::null_mut()) } != 0 {
            tracing::debug!("sigaltstack failed, stack overflows will not be reported");
        }
    }

    unsafe fn register(signum: c_int, handler: extern "C" fn(c_int), flags: c_int) -> bool {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = handler as libc::sighandler_t;
        action.sa_flags = flags;
        libc::sigemptyset(&mut action.sa_mask);
        libc::sigaction(signum, &action, std::ptr::null_mut()) == 0
    }

    fn write_stderr(bytes: &[u8]) {
        // SAFETY: write(2) is async-signal-safe; short writes are ignored.
        unsafe {
            libc::write(libc::STDERR_FILENO, bytes.as_ptr().cast(), bytes.len());
        }
    }

    extern "C" fn on_fatal_signal(signum: c_int) {
        let name = FATAL_SIGNALS
            .iter()
            .find(|(s, _)| *s == signum)
            .map(|(_, name)| *name)
            .unwrap_or(b"Fatal signal");
        write_stderr(b"earlyinit: fatal error: ");
        write_stderr(name);
        write_stderr(b" during startup\n");
        // SA_RESETHAND restored the default action, so this terminates.
        unsafe {
            libc::raise(signum);
        }
    }

    extern "C" fn on_user_signal(_signum: c_int) {
        write_stderr(b"earlyinit: SIGUSR1 received, startup checks still running\n");
    }
}
