//! Annotation validation.
//!
//! Runs over the static schema of a destination before any field is touched,
//! so a malformed annotation never leaves a half-populated record behind.
//! Nested records and slice element records are checked recursively.
//!
//! # Examples
//!
//! ```
//! use flagbind_core::{Bindable, BindError, validate_schema};
//!
//! #[derive(Default, Bindable)]
//! struct Good {
//!     #[flag(long = "verbose", short = "v")]
//!     verbose: bool,
//! }
//! assert!(validate_schema(&Good::schema()).is_ok());
//!
//! #[derive(Default, Bindable)]
//! struct Bad {
//!     #[flag(short = "vv")]
//!     verbose: bool,
//! }
//! let err = validate_schema(&Bad::schema()).unwrap_err();
//! assert!(matches!(err, BindError::ShortFlagDeclaration { .. }));
//! ```

use crate::{BindError, FieldDescriptor};

/// Checks every declared short name in `schema` and below it.
///
/// # Errors
///
/// Returns [`ShortFlagDeclaration`](BindError::ShortFlagDeclaration) for the
/// first short name, in declaration order, that is not exactly one character.
pub fn validate_schema(schema: &[FieldDescriptor]) -> Result<(), BindError> {
    let mut path = Vec::new();
    validate_fields(schema, &mut path)
}

fn validate_fields(
    schema: &[FieldDescriptor],
    path: &mut Vec<&'static str>,
) -> Result<(), BindError> {
    for descriptor in schema {
        let tag = &descriptor.tag;
        path.push(tag.name);

        if let Some(short) = tag.short {
            if short.chars().count() != 1 {
                return Err(BindError::ShortFlagDeclaration {
                    field: path.join("."),
                    short: short.to_string(),
                });
            }
        }

        if let Some(nested) = descriptor.nested {
            validate_fields(&nested(), path)?;
        }

        path.pop();
    }

    Ok(())
}
