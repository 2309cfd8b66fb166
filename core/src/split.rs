//! Command-line tokenizer.
//!
//! Turns an argument list (without the executable path) into [`Group`]s:
//!
//! ```text
//! mycli --global command1 --for-command1 sub --for-sub=1
//! ```
//!
//! becomes a root group holding `--global`, a `command1` group holding
//! `--for-command1` and a `sub` group holding `--for-sub`.
//!
//! Values are attached with `=` only; a flag without `=` is a boolean switch
//! with value `"true"`. A bare `--` stops tokenization.

use crate::{Group, KeyValue};

const KEY_VALUE_SEPARATOR: char = '=';
const ARG_LIST_END: &str = "--";
const IMPLICIT_VALUE: &str = "true";

/// Splits `args` into command groups.
///
/// The root group (empty label) is always first, even for an empty argument
/// list. Bundled short switches such as `-efh` are expanded into `-e`, `-f`
/// and `-h`, each carrying the bundle's value. Short keys that carry path
/// structure (`-d[3].n.c=40s`) are kept whole.
///
/// # Examples
///
/// ```
/// use flagbind_core::split;
///
/// let groups = split(["--verbose", "serve", "--port=8080", "-ab"]);
/// assert_eq!(groups.len(), 2);
/// assert!(groups[0].is_root());
/// assert_eq!(groups[0].flags[0].key, "--verbose");
/// assert_eq!(groups[0].flags[0].value, "true");
/// assert_eq!(groups[1].command_name, "serve");
/// let keys: Vec<&str> = groups[1].flags.iter().map(|f| f.key.as_str()).collect();
/// assert_eq!(keys, ["--port", "-a", "-b"]);
/// ```
pub fn split<I, S>(args: I) -> Vec<Group>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups = vec![Group::root()];

    for arg in args {
        let arg = arg.as_ref();
        if arg == ARG_LIST_END {
            break;
        }

        if !is_flag(arg) {
            groups.push(Group::new(arg));
            continue;
        }

        let (key, value) = arg
            .split_once(KEY_VALUE_SEPARATOR)
            .unwrap_or((arg, IMPLICIT_VALUE));

        // `groups` starts non-empty and only grows.
        let Some(current) = groups.last_mut() else {
            continue;
        };
        if is_bundled_short(key) {
            current.flags.extend(
                key.chars()
                    .skip(1)
                    .map(|c| KeyValue::new(format!("-{c}"), value)),
            );
        } else {
            current.flags.push(KeyValue::new(key, value));
        }
    }

    groups
}

/// Applies [`split`] to the arguments of the current process.
pub fn split_env_args() -> Vec<Group> {
    split(std::env::args().skip(1))
}

fn is_flag(arg: &str) -> bool {
    arg.starts_with('-') && arg.len() != 1
}

fn is_bundled_short(key: &str) -> bool {
    match key.strip_prefix('-') {
        Some(rest) if !rest.starts_with('-') => {
            rest.chars().count() > 1 && rest.chars().all(char::is_alphanumeric)
        }
        _ => false,
    }
}
