//! Process-wide validation switch.
//!
//! Every `to_json` consults this flag unless the caller passes an explicit
//! override. Validation is on by default; turning it off lets callers emit
//! payloads the remote API will reject (useful when testing how the API
//! reports its own errors).
//!
//! The flag is an atomic, so reads are never torn, but flipping it while
//! other threads serialize builders is still a logical race. Set it once at
//! startup.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

static VALIDATION_ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn schema validation on for every subsequent `to_json` call.
pub fn enable_validators() {
    VALIDATION_ENABLED.store(true, Ordering::Relaxed);
    debug!("component validation enabled");
}

/// Turn schema validation off for every subsequent `to_json` call.
pub fn disable_validators() {
    VALIDATION_ENABLED.store(false, Ordering::Relaxed);
    debug!("component validation disabled");
}

/// Whether validation is currently enabled process-wide.
pub fn is_validation_enabled() -> bool {
    VALIDATION_ENABLED.load(Ordering::Relaxed)
}

/// Resolve a per-call override against the global flag.
pub(crate) fn should_validate(validation_override: Option<bool>) -> bool {
    validation_override.unwrap_or_else(is_validation_enabled)
}

#[cfg(test)]
mod tests {
    use super::should_validate;

    // The global flag itself is exercised in `tests/validation_toggle.rs`;
    // flipping it here would race the other unit tests.

    #[test]
    fn explicit_override_wins() {
        assert!(should_validate(Some(true)));
        assert!(!should_validate(Some(false)));
    }
}
