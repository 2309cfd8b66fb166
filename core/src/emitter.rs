//! Change notifications.
//!
//! A [`SetReceiver`] hears about every field the engine actually set from a
//! flag, which lets layered configuration loaders record where each value
//! came from.

use serde::{Deserialize, Serialize};

use crate::{Group, KeyValue, StructPath};

/// Notified once per field set from a flag value.
pub trait SetReceiver {
    fn receive_set(&mut self, struct_path: &StructPath, flag_name: &str, value: &str);
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpReceiver;

impl SetReceiver for NoOpReceiver {
    fn receive_set(&mut self, _struct_path: &StructPath, _flag_name: &str, _value: &str) {}
}

/// One audited assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRecord {
    /// Structural path of the field, e.g. `Databases[0].Host`.
    pub struct_path: String,
    /// Candidate name that matched in the source.
    pub flag_name: String,
    /// Raw value before coercion.
    pub value: String,
}

/// Collects every notification in order.
///
/// # Examples
///
/// ```
/// use flagbind_core::{Bindable, Flags, Group, KeyValue, SetRecorder};
///
/// #[derive(Debug, Default, Bindable)]
/// struct Config {
///     #[flag(long = "name", short = "n")]
///     name: Option<String>,
/// }
///
/// let group = Group::root().with_flag(KeyValue::new("-n", "chris"));
/// let mut config = Config::default();
/// let mut recorder = SetRecorder::new();
/// Flags::new(&group)
///     .unmarshal_with_emitter(&mut config, &mut recorder)
///     .unwrap();
///
/// assert_eq!(recorder.records().len(), 1);
/// assert_eq!(recorder.records()[0].struct_path, "name");
/// assert_eq!(recorder.records()[0].flag_name, "-n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRecorder {
    records: Vec<SetRecord>,
}

impl SetRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SetRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SetRecord> {
        self.records
    }

    /// Replays the audit trail as a root group, one assignment per record.
    ///
    /// Binding the returned group into a fresh destination reproduces every
    /// field that was set.
    ///
    /// Only assignments that set a field are recorded. A slice sized by a
    /// key that set nothing (`--databases[2].bogus=1`) replays shorter: it
    /// ends at the highest index that did set a field.
    pub fn to_group(&self) -> Group {
        self.records
            .iter()
            .map(|record| KeyValue::new(record.flag_name.clone(), record.value.clone()))
            .collect()
    }
}

impl SetReceiver for SetRecorder {
    fn receive_set(&mut self, struct_path: &StructPath, flag_name: &str, value: &str) {
        self.records.push(SetRecord {
            struct_path: struct_path.to_string(),
            flag_name: flag_name.to_string(),
            value: value.to_string(),
        });
    }
}
