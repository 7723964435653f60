use thiserror::Error;

/// Failures inside the morph core.
///
/// None of these cross the public control surface: `open()`/`close()` handle
/// them locally (log and no-op), because an unmeasurable host or a double-tap
/// are normal, expected races rather than caller bugs.
#[derive(Debug, Error)]
pub enum MorphError {
    /// The host element could not be measured (not mounted yet, or the
    /// platform returned non-finite coordinates). The pending open aborts
    /// with no state change; the caller may retry.
    #[error("host element is not measurable")]
    HostUnmeasurable,
}
