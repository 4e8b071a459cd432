//! `getopt_long`-style argument normalization.
//!
//! Given argv, a short option string (`"ab:c::"`) and a long option list
//! (`"all,output:,size::"`), produce one flat stream:
//!
//! ```text
//! [program, opt1, arg1?, opt2, ..., "--", positional1, positional2, ...]
//! ```
//!
//! Short clusters are split (`-al` becomes `-a -l`), abbreviated long options
//! are expanded to their full name, attached values (`-ofile`, `--out=file`)
//! become separate elements, and non-option arguments are moved behind the
//! `--` separator. The result is an [`Args`] queue that is consumed with
//! [`Args::get`] and [`Args::shift`] the way a shell script walks `$1`/`shift`.
//!
//! ```
//! use shiftopt::getopt;
//!
//! let args = getopt(&["prog", "-abc", "file"], "ab:", "").unwrap();
//! assert_eq!(args.as_slice(), ["prog", "-a", "-b", "c", "--", "file"]);
//! ```

mod args;
mod config;
mod error;
mod normalize;
mod scan;
mod spec;

pub use args::{Args, SEPARATOR};
pub use config::{Ordering, ScanConfig, UnknownPolicy};
pub use error::{ERROR_MARKER, Error, Result};
pub use normalize::normalize;
pub use scan::{Scan, Scanner};
pub use spec::{ArgPolicy, LongOption, LongOptionSet, ShortSpec, parse_long_spec};

/// Parse `argv` with the default [`ScanConfig`].
///
/// Fails with [`Error::InvalidSpec`] for a malformed `long` spec and with the
/// scan error for the first option that does not match.
pub fn getopt<S: AsRef<str>>(argv: &[S], short: &str, long: &str) -> Result<Args> {
    GetOpt::new(short, long).parse(argv)
}

/// Builder for a parse with non-default scanning behavior.
///
/// ```
/// use shiftopt::{GetOpt, UnknownPolicy};
///
/// let args = GetOpt::new("a", "")
///     .unknown(UnknownPolicy::PassThrough)
///     .parse(&["prog", "-x", "-a"])
///     .unwrap();
/// assert_eq!(args.as_slice(), ["prog", "-x", "-a", "--"]);
/// ```
#[derive(Debug, Clone)]
pub struct GetOpt<'s> {
    short: &'s str,
    long: &'s str,
    config: ScanConfig,
}

impl<'s> GetOpt<'s> {
    pub fn new(short: &'s str, long: &'s str) -> Self {
        Self {
            short,
            long,
            config: ScanConfig::default(),
        }
    }

    pub fn config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn ordering(mut self, ordering: Ordering) -> Self {
        self.config.ordering = ordering;
        self
    }

    pub fn unknown(mut self, unknown: UnknownPolicy) -> Self {
        self.config.unknown = unknown;
        self
    }

    pub fn abbreviations(mut self, enabled: bool) -> Self {
        self.config.abbreviations = enabled;
        self
    }

    pub fn posixly_correct(mut self, enabled: bool) -> Self {
        self.config.posixly_correct = enabled;
        self
    }

    /// Normalize `argv`. The long spec is validated before any argument is
    /// looked at.
    pub fn parse<S: AsRef<str>>(&self, argv: &[S]) -> Result<Args> {
        let long = parse_long_spec(self.long)?;
        let short = ShortSpec::new(self.short);
        normalize(argv, &short, &long, &self.config)
    }
}
