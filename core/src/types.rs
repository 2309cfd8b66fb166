//! Flag assignment data model.
//!
//! A command line is tokenized into [`Group`]s: one group per sub-command
//! segment, each holding the ordered [`KeyValue`] assignments that appeared
//! in that segment. The types serialize with [`serde`] so tokenized input can
//! be inspected or replayed.

use serde::{Deserialize, Serialize};

/// One flag assignment, e.g. `--name=chris` or the expanded `-e` of `-efh`.
///
/// Keys keep their leading dashes (`"--name"`, `"-e"`).
///
/// # Examples
///
/// ```
/// use flagbind_core::KeyValue;
///
/// let kv = KeyValue::new("--name", "chris");
/// assert_eq!(kv.key, "--name");
/// assert_eq!(kv.value, "chris");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Flag name including its dash prefix.
    pub key: String,
    /// Raw, not yet coerced value.
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Flags belonging to one command segment of the argument list.
///
/// The first group of a tokenized command line always has an empty
/// `command_name`; it holds the global flags that precede any sub-command.
///
/// Names are not unique within a group. Lookups through
/// [`FlagReader`](crate::FlagReader) return the first assignment in order.
///
/// # Examples
///
/// ```
/// use flagbind_core::{Group, KeyValue};
///
/// let group = Group::new("serve")
///     .with_flag(KeyValue::new("--port", "8080"))
///     .with_flag(KeyValue::new("-v", "true"));
/// assert_eq!(group.command_name, "serve");
/// assert_eq!(group.flags.len(), 2);
/// assert!(!group.is_root());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Sub-command label, empty for the root group.
    pub command_name: String,
    /// Assignments in command-line order.
    pub flags: Vec<KeyValue>,
}

impl Group {
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            flags: Vec::new(),
        }
    }

    /// The root (global) group.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builder-style append of one assignment.
    pub fn with_flag(mut self, flag: KeyValue) -> Self {
        self.flags.push(flag);
        self
    }

    /// Returns `true` for the unlabelled global group.
    pub fn is_root(&self) -> bool {
        self.command_name.is_empty()
    }
}

impl FromIterator<KeyValue> for Group {
    fn from_iter<I: IntoIterator<Item = KeyValue>>(iter: I) -> Self {
        Self {
            command_name: String::new(),
            flags: iter.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Group {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(key, value)| KeyValue::new(key, value))
            .collect()
    }
}
