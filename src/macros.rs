/// Awaits a remote call and substitutes fallback data when it fails.
///
/// On success the value is returned as-is. On error the failure is logged at
/// `warn` with the given context and the fallback expression is evaluated
/// instead, so the expression's type is the success type, not a `Result`.
///
/// # Arguments
/// * `$context`: Short label for the call, used in the log line.
/// * `$call`: A future resolving to `AppResult<T>`.
/// * `$fallback`: Expression producing a `T`; only evaluated on failure.
///
/// # Example
/// ```rust,ignore
/// let stats = with_fallback!("viewing_stats", api.viewing_stats(), fallback::viewing_stats());
/// ```
#[macro_export]
macro_rules! with_fallback {
    ($context:expr, $call:expr, $fallback:expr) => {{
        match $call.await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    call = $context,
                    "Remote call failed, serving fallback data"
                );
                $fallback
            }
        }
    }};
}
