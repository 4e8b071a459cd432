//! The normalized argument queue.

use std::ops::Deref;

use crate::GetOpt;
use crate::config::ScanConfig;
use crate::error::Result;

/// Separator between the option segment and positional arguments.
pub const SEPARATOR: &str = "--";

/// A normalized argument stream consumed like shell positional parameters.
///
/// Layout: `[program, opt1, arg1?, ..., "--", positional...]`. Element 0 is
/// never removed by [`Args::shift`], so a loop can keep looking at
/// `get(1)` and shifting until it reaches the separator:
///
/// ```
/// let mut args = shiftopt::getopt(&["ls", "-al", "/etc"], "al", "all").unwrap();
/// loop {
///     match args.get(1) {
///         "-a" | "-l" => args.shift(1),
///         "--" => {
///             args.shift(1);
///             break;
///         }
///         other => panic!("unexpected {other}"),
///     }
/// }
/// assert_eq!(&args[1..], ["/etc"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    items: Vec<String>,
    /// Index of the separator; `Some(0)` once it has been shifted away, in
    /// which case everything after the head is positional.
    separator: Option<usize>,
}

impl Args {
    pub(crate) fn from_normalized(items: Vec<String>, separator: usize) -> Self {
        Self {
            items,
            separator: Some(separator),
        }
    }

    /// Element at `n`, or `""` when `n` is out of range.
    pub fn get(&self, n: usize) -> &str {
        self.items.get(n).map(String::as_str).unwrap_or_default()
    }

    /// Drop up to `n` elements after the head, keeping element 0.
    pub fn shift(&mut self, n: usize) {
        if self.items.len() <= 1 {
            return;
        }
        let m = n.min(self.items.len() - 1);
        if m == 0 {
            return;
        }
        self.items.drain(1..1 + m);
        self.separator = self.separator.map(|sep| sep.saturating_sub(m));
    }

    /// Re-run the parse for `argv` and replace the contents on success.
    ///
    /// On error the current contents are left untouched.
    pub fn reload<S: AsRef<str>>(&mut self, argv: &[S], short: &str, long: &str) -> Result<()> {
        self.reload_with(argv, short, long, &ScanConfig::default())
    }

    pub fn reload_with<S: AsRef<str>>(
        &mut self,
        argv: &[S],
        short: &str,
        long: &str,
        config: &ScanConfig,
    ) -> Result<()> {
        *self = GetOpt::new(short, long).config(*config).parse(argv)?;
        Ok(())
    }

    /// The head element, conventionally the program name.
    pub fn program(&self) -> &str {
        self.get(0)
    }

    /// Elements after the separator recorded at normalization. An option
    /// argument that is literally `--` is not mistaken for it.
    pub fn positionals(&self) -> &[String] {
        match self.separator {
            Some(sep) => self.items.get(sep + 1..).unwrap_or_default(),
            None => &[],
        }
    }

    /// Option tokens (and their arguments) still in front of the separator.
    pub fn options(&self) -> &[String] {
        match self.separator {
            Some(sep) if sep > 0 => &self.items[1..sep],
            Some(_) => &[],
            None => self.items.get(1..).unwrap_or_default(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl Deref for Args {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl From<Args> for Vec<String> {
    fn from(args: Args) -> Self {
        args.items
    }
}

impl IntoIterator for Args {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
