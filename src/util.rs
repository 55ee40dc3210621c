/// Asserts that a numerical value is in the provided interval and panics
/// with a helpful message if not
///
/// The interval is closed `[a,b]` by default. Pass `exclusive_start` for `(a,b]`
/// or `exclusive_end` for `[a,b)`.
///
/// ### Example
/// ```should_panic
/// use qlearn::assert_interval;
///
/// let gamma = 1.0;
/// assert_interval!(gamma, 0.0, 1.0, exclusive_end);
/// ```
/// This will panic with the message "Invalid value for \`gamma\`. Must be in the interval \[0, 1)."
#[macro_export]
macro_rules! assert_interval {
    ($var:expr, $a:expr, $b:expr) => {
        assert!(
            $var >= $a && $var <= $b,
            "Invalid value for `{}`. Must be in the interval [{}, {}].",
            stringify!($var),
            $a,
            $b,
        );
    };
    ($var:expr, $a:expr, $b:expr, exclusive_start) => {
        assert!(
            $var > $a && $var <= $b,
            "Invalid value for `{}`. Must be in the interval ({}, {}].",
            stringify!($var),
            $a,
            $b,
        );
    };
    ($var:expr, $a:expr, $b:expr, exclusive_end) => {
        assert!(
            $var >= $a && $var < $b,
            "Invalid value for `{}`. Must be in the interval [{}, {}).",
            stringify!($var),
            $a,
            $b,
        );
    };
}
