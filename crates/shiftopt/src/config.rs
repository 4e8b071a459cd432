use crate::spec::ShortSpec;

/// How options and non-option arguments may be interleaved in argv.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ordering {
    /// Options may appear anywhere; non-options are moved behind them.
    #[default]
    Permute,
    /// The first non-option ends option scanning (`+` prefix, `POSIXLY_CORRECT`).
    RequireOrder,
}

/// What to do with a token that fails to scan as an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPolicy {
    /// Abort the parse with the scan error.
    #[default]
    Error,
    /// Log a warning and keep the offending flag in the option segment.
    PassThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    pub ordering: Ordering,
    pub unknown: UnknownPolicy,
    /// Accept unique prefixes of long option names.
    pub abbreviations: bool,
    /// Behave as if `POSIXLY_CORRECT` were set.
    pub posixly_correct: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ordering: Ordering::Permute,
            unknown: UnknownPolicy::Error,
            abbreviations: true,
            posixly_correct: false,
        }
    }
}

impl ScanConfig {
    /// The ordering actually used for `short`.
    ///
    /// A `+`/`-` spec prefix beats `posixly_correct`, which beats `ordering`.
    pub fn effective_ordering(&self, short: &ShortSpec<'_>) -> Ordering {
        match short.ordering() {
            Some(ordering) => ordering,
            None if self.posixly_correct => Ordering::RequireOrder,
            None => self.ordering,
        }
    }
}
