//! Key/value sources consulted by the binding engine.
//!
//! The engine never looks at raw arguments. It asks a [`FlagReader`] for the
//! value of an exact flag name and for all names sharing a prefix (used to
//! infer slice lengths). Implementations must answer consistently for the
//! duration of a bind call; the engine does not cache lookups.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::Group;

/// Read access to flag assignments.
pub trait FlagReader {
    /// Value of the first assignment named exactly `flag_name`.
    fn get(&self, flag_name: &str) -> Option<&str>;

    /// Every distinct key starting with `prefix`, sorted. `""` matches all keys.
    fn keys(&self, prefix: &str) -> Vec<String>;
}

impl<R: FlagReader + ?Sized> FlagReader for &R {
    fn get(&self, flag_name: &str) -> Option<&str> {
        (**self).get(flag_name)
    }

    fn keys(&self, prefix: &str) -> Vec<String> {
        (**self).keys(prefix)
    }
}

impl FlagReader for Group {
    fn get(&self, flag_name: &str) -> Option<&str> {
        self.flags
            .iter()
            .find(|flag| flag.key == flag_name)
            .map(|flag| flag.value.as_str())
    }

    fn keys(&self, prefix: &str) -> Vec<String> {
        self.flags
            .iter()
            .filter(|flag| flag.key.starts_with(prefix))
            .map(|flag| flag.key.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Groups are searched in order, so the root group wins over sub-command
/// groups when the same name appears in both.
impl FlagReader for [Group] {
    fn get(&self, flag_name: &str) -> Option<&str> {
        self.iter().find_map(|group| group.get(flag_name))
    }

    fn keys(&self, prefix: &str) -> Vec<String> {
        self.iter()
            .flat_map(|group| group.keys(prefix))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl FlagReader for Vec<Group> {
    fn get(&self, flag_name: &str) -> Option<&str> {
        FlagReader::get(self.as_slice(), flag_name)
    }

    fn keys(&self, prefix: &str) -> Vec<String> {
        self.as_slice().keys(prefix)
    }
}

impl FlagReader for HashMap<String, String> {
    fn get(&self, flag_name: &str) -> Option<&str> {
        HashMap::get(self, flag_name).map(String::as_str)
    }

    fn keys(&self, prefix: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

impl FlagReader for BTreeMap<String, String> {
    fn get(&self, flag_name: &str) -> Option<&str> {
        BTreeMap::get(self, flag_name).map(String::as_str)
    }

    fn keys(&self, prefix: &str) -> Vec<String> {
        self.range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect()
    }
}
