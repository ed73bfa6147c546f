//! Private macros used for error handling and diagnostics.

/// Matches a result, returning the `Ok` value in case of success,
/// exits the calling function otherwise.
/// A closure which returns the return value for the function can
/// be passed as second parameter.
macro_rules! try_else_return {
    ($x:expr) => {
        try_else_return!($x, || {});
    };
    ($x:expr, $el:expr) => {
        match $x {
            Ok(x) => x,
            Err(e) => {
                crate::error::log_error(&e);
                let closure = $el;
                return closure();
            }
        }
    };
}

/// Print an error message to stderr. Format is the same as println! or format!
macro_rules! error {
    ($($arg:tt)*) => (
        eprintln!("confint ERROR: {}", &format!($($arg)*))
    )
}

/// Print a debug message to stderr. Format is the same as println! or format!
macro_rules! info {
    ($($arg:tt)*) => (
        if $crate::debug_enabled() {
            eprintln!("confint DEBUG: {}", &format!($($arg)*))
        }
    )
}
