pub use log::debug;

/// Debug message which is either logged or printed directly
///
/// The first argument is a local debug flag. When it is true the message is printed to stderr
/// regardless of log level, otherwise it is sent to the debug log, which is only written when the
/// global `--debug` option is given.
///
/// # Examples
///
/// ```ignore
/// debug_msg!(false, "Chromosome {chrom} overlaps: {count}"); // debug log only
/// debug_msg!(true, "Chromosome {chrom} overlaps: {count}"); // always printed to stderr
/// ```
macro_rules! debug_msg {
    ($flag:expr, $($arg:tt)+) => {
        if $flag {
            eprintln!($($arg)+);
        } else {
            $crate::log_utils::debug!($($arg)+);
        }
    }
}

pub(crate) use debug_msg;
