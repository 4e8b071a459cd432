//! The option scanner: a small state machine over argv.
//!
//! State is the argv `index` plus a byte offset `cluster` into the current
//! short option cluster (`0` when not inside one). Each call to `next` yields
//! exactly one classified token; scan errors are yielded in-stream and the
//! scanner keeps going after the offending flag.

use crate::config::{Ordering, ScanConfig};
use crate::error::{Error, Result};
use crate::spec::{ArgPolicy, LongOptionSet, ShortSpec};

/// One classified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan<'a> {
    Short { flag: char, arg: Option<&'a str> },
    /// `index` points into the [`LongOptionSet`] the scanner was built with.
    Long { index: usize, arg: Option<&'a str> },
    /// A non-option met while options were still being scanned.
    Positional(&'a str),
}

#[derive(Debug)]
pub struct Scanner<'a, S> {
    argv: &'a [S],
    short: &'a ShortSpec<'a>,
    long: &'a LongOptionSet,
    ordering: Ordering,
    abbreviations: bool,
    index: usize,
    cluster: usize,
    done: bool,
}

impl<'a, S: AsRef<str>> Scanner<'a, S> {
    /// Scan `argv[1..]`; `argv[0]` is the program name and never scanned.
    pub fn new(
        argv: &'a [S],
        short: &'a ShortSpec<'a>,
        long: &'a LongOptionSet,
        config: &ScanConfig,
    ) -> Self {
        Self {
            argv,
            short,
            long,
            ordering: config.effective_ordering(short),
            abbreviations: config.abbreviations,
            index: 1,
            cluster: 0,
            done: false,
        }
    }

    /// Arguments the scanner has not consumed.
    ///
    /// Once iteration has ended this is everything after a literal `--`, or
    /// (with [`Ordering::RequireOrder`]) everything from the first non-option.
    pub fn remaining(&self) -> &'a [S] {
        let argv: &'a [S] = self.argv;
        argv.get(self.index..).unwrap_or_default()
    }

    fn take_next(&mut self) -> Option<&'a str> {
        let argv: &'a [S] = self.argv;
        let value = argv.get(self.index)?.as_ref();
        self.index += 1;
        Some(value)
    }

    fn end_cluster(&mut self) {
        self.index += 1;
        self.cluster = 0;
    }

    fn next_short(&mut self) -> Option<Result<Scan<'a>>> {
        let argv: &'a [S] = self.argv;
        let arg = argv.get(self.index)?.as_ref();
        let Some(flag) = arg.get(self.cluster..).and_then(|s| s.chars().next()) else {
            self.end_cluster();
            return self.next();
        };
        let after = self.cluster + flag.len_utf8();
        let tail = &arg[after..];
        if tail.is_empty() {
            self.end_cluster();
        } else {
            self.cluster = after;
        }

        let Some(policy) = self.short.policy(flag) else {
            return Some(Err(Error::UnrecognizedOption(format!("-{flag}"))));
        };
        let scan = match policy {
            ArgPolicy::None => Ok(Scan::Short { flag, arg: None }),
            ArgPolicy::Optional if tail.is_empty() => Ok(Scan::Short { flag, arg: None }),
            ArgPolicy::Optional | ArgPolicy::Required if !tail.is_empty() => {
                self.end_cluster();
                Ok(Scan::Short {
                    flag,
                    arg: Some(tail),
                })
            }
            _ => match self.take_next() {
                Some(value) => Ok(Scan::Short {
                    flag,
                    arg: Some(value),
                }),
                None => Err(Error::MissingArgument(format!("-{flag}"))),
            },
        };
        Some(scan)
    }

    fn next_long(&mut self, body: &'a str) -> Result<Scan<'a>> {
        let (name, attached) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        let index = self.lookup_long(name)?;
        let long: &'a LongOptionSet = self.long;
        let option = &long[index];

        match option.policy {
            ArgPolicy::None if attached.is_some() => {
                Err(Error::UnexpectedArgument(format!("--{}", option.name)))
            }
            ArgPolicy::None => Ok(Scan::Long { index, arg: None }),
            ArgPolicy::Optional => Ok(Scan::Long {
                index,
                arg: attached,
            }),
            ArgPolicy::Required => match attached.or_else(|| self.take_next()) {
                Some(value) => Ok(Scan::Long {
                    index,
                    arg: Some(value),
                }),
                None => Err(Error::MissingArgument(format!("--{}", option.name))),
            },
        }
    }

    fn lookup_long(&self, name: &str) -> Result<usize> {
        let unrecognized = || Error::UnrecognizedOption(format!("--{name}"));
        if name.is_empty() {
            // `--=value`: keep the `=` so the flag is never mistaken for `--`.
            return Err(Error::UnrecognizedOption("--=".to_string()));
        }
        if let Some(index) = self.long.position(name) {
            return Ok(index);
        }
        if !self.abbreviations {
            return Err(unrecognized());
        }

        let mut matches = self
            .long
            .iter()
            .enumerate()
            .filter(|(_, o)| o.name.starts_with(name));
        let Some((first, first_opt)) = matches.next() else {
            return Err(unrecognized());
        };

        // Duplicate definitions of one name are not ambiguous: first wins.
        let mut candidates = vec![format!("--{}", first_opt.name)];
        for (_, o) in matches {
            let candidate = format!("--{}", o.name);
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
        if candidates.len() > 1 {
            return Err(Error::AmbiguousOption {
                option: format!("--{name}"),
                candidates,
            });
        }
        Ok(first)
    }
}

impl<'a, S: AsRef<str>> Iterator for Scanner<'a, S> {
    type Item = Result<Scan<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cluster > 0 {
            return self.next_short();
        }
        if self.done {
            return None;
        }

        let argv: &'a [S] = self.argv;
        let arg = argv.get(self.index)?.as_ref();

        if arg == "--" {
            self.index += 1;
            self.done = true;
            return None;
        }

        if arg == "-" || !arg.starts_with('-') {
            return match self.ordering {
                Ordering::RequireOrder => {
                    self.done = true;
                    None
                }
                Ordering::Permute => {
                    self.index += 1;
                    Some(Ok(Scan::Positional(arg)))
                }
            };
        }

        if let Some(body) = arg.strip_prefix("--") {
            self.index += 1;
            return Some(self.next_long(body));
        }

        self.cluster = 1;
        self.next_short()
    }
}
