//! Slice length inference.
//!
//! A slice field has no flag of its own; its length is implied by the
//! highest element index any flag refers to. For the candidate names
//! `--databases` and `-d`, the keys `--databases[1].host` and `-d[4].n.c`
//! imply a length of 5.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::{FlagReader, SliceIndexError};

static INDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+").expect("static regex must compile"));

const INDEX_OPEN: char = '[';
const INDEX_CLOSE: char = ']';

/// An index that could not be used, with the key it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIndex {
    pub key: String,
    pub error: SliceIndexError,
}

/// Smallest length covering every index referenced under any of `prefixes`.
///
/// Every key starting with `<prefix>[` contributes the run of digits that
/// follows the bracket. Returns 0 when no key refers to an element.
///
/// # Errors
///
/// Fails on the first key whose index is not a non-negative integer
/// (including overflow), or whose index would make the slice longer than
/// `max_len`.
///
/// # Examples
///
/// ```
/// use flagbind_core::{Group, KeyValue, infer_slice_len};
///
/// let group = Group::root()
///     .with_flag(KeyValue::new("--databases[1].host", "b"))
///     .with_flag(KeyValue::new("-d[4].h", "e"));
/// let prefixes = ["--databases".to_string(), "-d".to_string()];
/// assert_eq!(infer_slice_len(&group, &prefixes, 100).unwrap(), 5);
/// assert_eq!(infer_slice_len(&group, &["--other".to_string()], 100).unwrap(), 0);
/// ```
pub fn infer_slice_len(
    reader: &dyn FlagReader,
    prefixes: &[String],
    max_len: usize,
) -> Result<usize, InvalidIndex> {
    let mut len = 0usize;

    for prefix in prefixes {
        let open = format!("{prefix}{INDEX_OPEN}");
        for key in reader.keys(&open) {
            let index = parse_index(&key[open.len()..]).map_err(|error| InvalidIndex {
                key: key.clone(),
                error,
            })?;
            if index >= max_len {
                return Err(InvalidIndex {
                    key,
                    error: SliceIndexError::ExceedsLimit {
                        index,
                        limit: max_len,
                    },
                });
            }
            trace!(key = %key, index, "slice element referenced");
            len = len.max(index + 1);
        }
    }

    Ok(len)
}

/// Parses the index at the start of `rest` (the text after `[`).
fn parse_index(rest: &str) -> Result<usize, SliceIndexError> {
    let digits = match INDEX_RE.find(rest) {
        Some(m) => m.as_str(),
        // Nothing numeric: parse the bracket content to report why.
        None => rest.split(INDEX_CLOSE).next().unwrap_or(rest),
    };
    Ok(digits.parse::<usize>()?)
}
