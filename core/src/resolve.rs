//! Candidate flag names for a structural path.
//!
//! Every step of a [`StructPath`] contributes its long token (declared long
//! name, or the field identifier) and, when declared, its short name. Two
//! lineages are built level by level and never mixed:
//!
//! - the long lineage starts with `--<long>` and appends `.<long>` at every
//!   level;
//! - the short lineage starts with `-<short>` and appends `.<short>` where a
//!   short name is declared, `.<long>` elsewhere.
//!
//! When the first short name appears below the root, the short lineage
//! branches off the long one at that level. Slice indices render as `[n]`
//! right after the token of the step that carries them.

use crate::StructPath;

/// Ordered candidate flag names for `path`.
///
/// At most two names come back: the long lineage first, then the short
/// lineage if any step declares a short name. The binding engine tries them
/// in this order, so a long name always wins. An empty path has no
/// candidates.
///
/// # Examples
///
/// ```
/// use flagbind_core::{FieldTag, PathStep, StructPath, candidate_names};
///
/// let path: StructPath = [
///     PathStep::at(FieldTag::new("Databases").with_long("databases").with_short("d"), 3),
///     PathStep::new(FieldTag::new("NestedNamed").with_long("nestednamed").with_short("n")),
///     PathStep::new(FieldTag::new("ConnTimeout").with_long("ConnTimeout").with_short("c")),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(
///     candidate_names(&path),
///     ["--databases[3].nestednamed.ConnTimeout", "-d[3].n.c"]
/// );
/// ```
pub fn candidate_names(path: &StructPath) -> Vec<String> {
    let mut steps = path.steps().iter();
    let Some(first) = steps.next() else {
        return Vec::new();
    };

    let index = first.index_suffix();
    let mut long = format!("--{}{index}", first.tag.long_token());
    let mut short = first.tag.short.map(|token| format!("-{token}{index}"));

    for step in steps {
        let token = step.tag.long_token();
        let index = step.index_suffix();

        short = match (short.take(), step.tag.short) {
            (Some(parent), declared) => {
                Some(format!("{parent}.{}{index}", declared.unwrap_or(token)))
            }
            (None, Some(declared)) => Some(format!("{long}.{declared}{index}")),
            (None, None) => None,
        };
        long = format!("{long}.{token}{index}");
    }

    let mut names = vec![long];
    names.extend(short);
    names
}
