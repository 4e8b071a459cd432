use tracing::{debug, trace, warn};

use crate::args::{Args, SEPARATOR};
use crate::config::{ScanConfig, UnknownPolicy};
use crate::error::Result;
use crate::scan::{Scan, Scanner};
use crate::spec::{LongOptionSet, ShortSpec};

/// Drive the scanner over `argv` and assemble the normalized stream.
///
/// Options come first in the order they were met, then [`SEPARATOR`], then
/// every non-option argument in its original relative order.
pub fn normalize<S: AsRef<str>>(
    argv: &[S],
    short: &ShortSpec<'_>,
    long: &LongOptionSet,
    config: &ScanConfig,
) -> Result<Args> {
    let program = argv.first().map_or("", |s| s.as_ref());
    let mut stream = Vec::with_capacity(argv.len() + 1);
    stream.push(program.to_string());

    let mut deferred: Vec<&str> = Vec::new();
    let mut scanner = Scanner::new(argv, short, long, config);
    for step in scanner.by_ref() {
        trace!(?step, "scanned");
        match step {
            Ok(Scan::Short { flag, arg }) => {
                stream.push(format!("-{flag}"));
                stream.extend(arg.map(str::to_string));
            }
            Ok(Scan::Long { index, arg }) => {
                stream.push(format!("--{}", long[index].name));
                stream.extend(arg.map(str::to_string));
            }
            Ok(Scan::Positional(value)) => deferred.push(value),
            Err(err) => match config.unknown {
                UnknownPolicy::Error => return Err(err),
                UnknownPolicy::PassThrough => {
                    warn!(%err, "passing through");
                    stream.extend(err.pass_through().map(str::to_string));
                }
            },
        }
    }

    let separator = stream.len();
    stream.push(SEPARATOR.to_string());
    stream.extend(deferred.into_iter().map(str::to_string));
    stream.extend(scanner.remaining().iter().map(|s| s.as_ref().to_string()));

    debug!(
        program,
        options = separator - 1,
        positionals = stream.len() - separator - 1,
        "normalized arguments"
    );
    Ok(Args::from_normalized(stream, separator))
}
