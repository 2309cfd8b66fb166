//! Structural paths into a destination record tree.

use std::fmt;

/// Naming information for one record field.
///
/// `name` is the field's identifier as written in the struct. `long` and
/// `short` come from `#[flag(long = "...", short = "...")]`.
///
/// # Examples
///
/// ```
/// use flagbind_core::FieldTag;
///
/// const DATABASES: FieldTag = FieldTag::new("Databases").with_long("databases").with_short("d");
/// assert_eq!(DATABASES.long_token(), "databases");
///
/// // Without a long name the identifier itself is used, case preserved.
/// assert_eq!(FieldTag::new("ConnTimeout").long_token(), "ConnTimeout");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldTag {
    /// Structural identifier.
    pub name: &'static str,
    /// Declared long flag name.
    pub long: Option<&'static str>,
    /// Declared short flag name; exactly one character when well formed.
    pub short: Option<&'static str>,
}

impl FieldTag {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            long: None,
            short: None,
        }
    }

    pub const fn with_long(mut self, long: &'static str) -> Self {
        self.long = Some(long);
        self
    }

    pub const fn with_short(mut self, short: &'static str) -> Self {
        self.short = Some(short);
        self
    }

    /// Token used on the long-name branch: the declared long name, otherwise
    /// the structural identifier.
    pub fn long_token(&self) -> &'static str {
        self.long.unwrap_or(self.name)
    }
}

/// One hop from a record into one of its fields.
///
/// `index` is set while the hop enters element `index` of a slice field; it
/// belongs to the slice field's own step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathStep {
    pub tag: FieldTag,
    pub index: Option<usize>,
}

impl PathStep {
    pub const fn new(tag: FieldTag) -> Self {
        Self { tag, index: None }
    }

    pub const fn at(tag: FieldTag, index: usize) -> Self {
        Self {
            tag,
            index: Some(index),
        }
    }

    /// `"[n]"` for slice element steps, empty otherwise.
    pub fn index_suffix(&self) -> String {
        self.index.map(|i| format!("[{i}]")).unwrap_or_default()
    }
}

/// Sequence of [`PathStep`]s from the destination root to a field.
///
/// Displays with structural identifiers, e.g. `Databases[0].Nested.ConnTimeout`.
///
/// # Examples
///
/// ```
/// use flagbind_core::{FieldTag, PathStep, StructPath};
///
/// let path: StructPath = [
///     PathStep::at(FieldTag::new("Databases").with_long("databases"), 0),
///     PathStep::new(FieldTag::new("Nested")),
///     PathStep::new(FieldTag::new("ConnTimeout")),
/// ]
/// .into_iter()
/// .collect();
/// assert_eq!(path.to_string(), "Databases[0].Nested.ConnTimeout");
/// assert_eq!(path.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StructPath {
    steps: Vec<PathStep>,
}

impl StructPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Deepest step, if any.
    pub fn top(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    pub fn push(&mut self, step: PathStep) {
        self.steps.push(step);
    }

    pub fn pop(&mut self) -> Option<PathStep> {
        self.steps.pop()
    }

    /// Sets or clears the slice index of the deepest step.
    pub(crate) fn set_top_index(&mut self, index: Option<usize>) {
        if let Some(step) = self.steps.last_mut() {
            step.index = index;
        }
    }

    /// Returns a copy extended by `step`.
    pub fn child(&self, step: PathStep) -> Self {
        let mut path = self.clone();
        path.push(step);
        path
    }
}

impl FromIterator<PathStep> for StructPath {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for StructPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, step) in self.steps.iter().enumerate() {
            if position > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}{}", step.tag.name, step.index_suffix())?;
        }
        Ok(())
    }
}
