//! Option specification strings.
//!
//! Long options are declared as a delimiter-separated list such as
//! `"all, size::, output:"`; short options use the classic getopt string
//! such as `"ab:c::"`.

use std::ops::Index;
use std::str::FromStr;

use crate::config::Ordering;
use crate::error::{Error, Result};

/// Whether an option takes a trailing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgPolicy {
    #[default]
    None,
    Required,
    Optional,
}

impl ArgPolicy {
    fn from_colons(colons: usize) -> Self {
        match colons {
            0 => Self::None,
            1 => Self::Required,
            _ => Self::Optional,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongOption {
    /// Name without leading dashes. Never empty.
    pub name: String,
    pub policy: ArgPolicy,
}

impl LongOption {
    pub fn new(name: impl Into<String>, policy: ArgPolicy) -> Self {
        Self {
            name: name.into(),
            policy,
        }
    }
}

/// Ordered long option definitions; the first definition of a name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LongOptionSet {
    options: Vec<LongOption>,
}

impl LongOptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LongOption> {
        self.options.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LongOption> {
        self.options.iter()
    }

    /// Index of the first option named exactly `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.options.iter().position(|o| o.name == name)
    }
}

impl Index<usize> for LongOptionSet {
    type Output = LongOption;

    fn index(&self, index: usize) -> &Self::Output {
        &self.options[index]
    }
}

impl FromIterator<LongOption> for LongOptionSet {
    fn from_iter<T: IntoIterator<Item = LongOption>>(iter: T) -> Self {
        Self {
            options: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LongOptionSet {
    type Item = &'a LongOption;
    type IntoIter = std::slice::Iter<'a, LongOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

impl FromStr for LongOptionSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_long_spec(s)
    }
}

fn is_delimiter(ch: char) -> bool {
    matches!(ch, ',' | ' ' | '\t' | '\n')
}

/// Parse a long option spec like `"all,size::, output:"`.
///
/// Entries are separated by any run of `,`, space, tab or newline. Each entry
/// is `NAME`, `NAME:` (argument required) or `NAME::` (argument optional).
pub fn parse_long_spec(spec: &str) -> Result<LongOptionSet> {
    let mut options = Vec::new();
    let mut start: Option<usize> = None;

    // A virtual delimiter at end-of-input closes the last entry.
    let chars = spec
        .char_indices()
        .chain(std::iter::once((spec.len(), ',')));
    for (idx, ch) in chars {
        if !is_delimiter(ch) {
            start.get_or_insert(idx);
            continue;
        }
        let Some(begin) = start.take() else {
            continue;
        };
        options.push(parse_long_entry(spec, begin, idx)?);
    }

    Ok(LongOptionSet { options })
}

fn parse_long_entry(spec: &str, begin: usize, end: usize) -> Result<LongOption> {
    let entry = &spec[begin..end];
    let name = entry.trim_end_matches(':');
    let colons = entry.len() - name.len();

    // `a:::` and `a:b` would leave a colon inside the name.
    if name.is_empty() || colons > 2 || name.contains(':') || name.starts_with('-') {
        return Err(Error::InvalidSpec {
            entry: entry.to_string(),
            position: begin,
            spec: spec.to_string(),
        });
    }

    Ok(LongOption::new(name, ArgPolicy::from_colons(colons)))
}

/// Short option spec such as `"ab:c::"`.
///
/// A leading `+` asks for [`Ordering::RequireOrder`]; a leading `-` is
/// accepted and scans with [`Ordering::Permute`]. A `:` right after that
/// (or at the very start) is the getopt "silent" marker and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortSpec<'a> {
    flags: &'a str,
    ordering: Option<Ordering>,
}

impl<'a> ShortSpec<'a> {
    pub fn new(spec: &'a str) -> Self {
        let (ordering, rest) = match spec.as_bytes().first() {
            Some(b'+') => (Some(Ordering::RequireOrder), &spec[1..]),
            Some(b'-') => (Some(Ordering::Permute), &spec[1..]),
            _ => (None, spec),
        };
        let flags = rest.strip_prefix(':').unwrap_or(rest);
        Self { flags, ordering }
    }

    /// Ordering requested by the spec prefix, if any.
    pub fn ordering(&self) -> Option<Ordering> {
        self.ordering
    }

    /// Flag characters and their colons, without the prefix.
    pub fn flags(&self) -> &'a str {
        self.flags
    }

    /// `:` and `?` are never option characters.
    pub fn policy(&self, flag: char) -> Option<ArgPolicy> {
        if flag == ':' || flag == '?' {
            return None;
        }
        let (idx, _) = self.flags.char_indices().find(|&(_, c)| c == flag)?;
        let after = &self.flags[idx + flag.len_utf8()..];
        let colons = after.chars().take_while(|&c| c == ':').take(2).count();
        Some(ArgPolicy::from_colons(colons))
    }

    pub fn contains(&self, flag: char) -> bool {
        self.policy(flag).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(set: &LongOptionSet) -> Vec<&str> {
        set.iter().map(|o| o.name.as_str()).collect()
    }

    #[test]
    fn parses_all_policies() {
        let set = parse_long_spec("all,size::,output:").unwrap();
        assert_eq!(
            set.iter().cloned().collect::<Vec<_>>(),
            vec![
                LongOption::new("all", ArgPolicy::None),
                LongOption::new("size", ArgPolicy::Optional),
                LongOption::new("output", ArgPolicy::Required),
            ]
        );
    }

    #[test]
    fn delimiter_runs_collapse() {
        let set = parse_long_spec(" ,,all \t\n verbose,, ").unwrap();
        assert_eq!(names(&set), vec!["all", "verbose"]);
    }

    #[test]
    fn last_entry_needs_no_trailing_delimiter() {
        let set = parse_long_spec("all").unwrap();
        assert_eq!(names(&set), vec!["all"]);

        let set = parse_long_spec("a,b:").unwrap();
        assert_eq!(set[1].policy, ArgPolicy::Required);
    }

    #[test]
    fn empty_spec_is_empty_set() {
        assert!(parse_long_spec("").unwrap().is_empty());
        assert!(parse_long_spec(" , \n").unwrap().is_empty());
    }

    #[test]
    fn bare_colons_are_rejected() {
        for spec in ["a,:,b", "a,::,b", ":", "::", "a,:", ":: a"] {
            let err = parse_long_spec(spec).unwrap_err();
            assert!(
                matches!(err, Error::InvalidSpec { .. }),
                "expected InvalidSpec for {spec:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn invalid_spec_reports_entry_and_position() {
        let err = parse_long_spec("all, ::,x").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidSpec {
                entry: "::".to_string(),
                position: 5,
                spec: "all, ::,x".to_string(),
            }
        );
    }

    #[test]
    fn stray_colons_in_names_are_rejected() {
        assert!(parse_long_spec("a:::").is_err());
        assert!(parse_long_spec("a:b").is_err());
        assert!(parse_long_spec("--all").is_err());
    }

    #[test]
    fn invalid_spec_message_names_the_entry() {
        let err = parse_long_spec("x,a:::").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid long option entry 'a:::' at index [2]: 'x,a:::'"
        );
        let err = parse_long_spec("--all").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid long option entry '--all' at index [0]: '--all'"
        );
    }

    #[test]
    fn question_mark_is_never_a_short_option() {
        let short = ShortSpec::new("a?b");
        assert!(!short.contains('?'));
        assert_eq!(short.policy('b'), Some(ArgPolicy::None));
    }

    #[test]
    fn from_str_matches_parse() {
        let set: LongOptionSet = "x, y:".parse().unwrap();
        assert_eq!(set.position("y"), Some(1));
        assert_eq!(set.position("z"), None);
    }

    #[test]
    fn short_spec_policies() {
        let spec = ShortSpec::new("ab:c::");
        assert_eq!(spec.policy('a'), Some(ArgPolicy::None));
        assert_eq!(spec.policy('b'), Some(ArgPolicy::Required));
        assert_eq!(spec.policy('c'), Some(ArgPolicy::Optional));
        assert_eq!(spec.policy('d'), None);
        assert_eq!(spec.policy(':'), None);
    }

    #[test]
    fn short_spec_prefixes() {
        let spec = ShortSpec::new("+:ab");
        assert_eq!(spec.ordering(), Some(Ordering::RequireOrder));
        assert_eq!(spec.flags(), "ab");

        let spec = ShortSpec::new("-a");
        assert_eq!(spec.ordering(), Some(Ordering::Permute));
        assert!(spec.contains('a'));

        let spec = ShortSpec::new(":x:");
        assert_eq!(spec.ordering(), None);
        assert_eq!(spec.policy('x'), Some(ArgPolicy::Required));
    }
}
