//! Platform compatibility patch.
//!
//! Qt's bundled HarfBuzz shaper crashes on some pages with the newer code
//! path (QTBUG-36099). On Linux we force the old shaper before anything
//! loads Qt; Qt reads the variable once, at library load.

use crate::env::EnvTable;
use crate::host::Platform;

/// Variable Qt consults to pick its HarfBuzz implementation.
pub const HARFBUZZ_VAR: &str = "QT_HARFBUZZ";

/// Value selecting the older, stable shaper.
pub const HARFBUZZ_OLD: &str = "old";

/// Apply the patch for `platform`. Returns whether anything was written.
pub fn apply_compat_patch(platform: &Platform, env: &mut dyn EnvTable) -> bool {
    match platform {
        Platform::Linux => {
            env.set(HARFBUZZ_VAR, HARFBUZZ_OLD);
            tracing::debug!("Set {}={}", HARFBUZZ_VAR, HARFBUZZ_OLD);
            true
        }
        _ => false,
    }
}
