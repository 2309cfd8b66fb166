//! Field-walking capability for destination types.
//!
//! Destination records implement [`Bindable`], normally through
//! `#[derive(Bindable)]`. Every field type implements [`BindField`], which
//! tells the engine what kind of target it is:
//!
//! - [`FieldKind::Value`]: an opaque value. The coercion registry decides
//!   whether it can be set from a string.
//! - [`FieldKind::Record`]: a nested record, walked with the same rules.
//! - [`FieldKind::Slice`]: a `Vec` of records whose length is inferred from
//!   the indexed flag names present in the source.
//! - [`FieldKind::Ignored`]: never a configuration target.
//!
//! Custom value types are declared with [`value_field!`](crate::value_field)
//! and registered with a [`ParseRegistry`](crate::ParseRegistry).

use std::any::Any;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::time::Duration;

use crate::{BindError, FieldTag};

/// Static description of one record field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub tag: FieldTag,
    /// Schema of the nested record, or of the element record for slices.
    pub nested: Option<fn() -> Vec<FieldDescriptor>>,
}

/// Receives the fields of a record during [`Bindable::visit_fields`].
pub trait FieldVisitor {
    fn visit(&mut self, tag: &FieldTag, field: &mut dyn BindField) -> Result<(), BindError>;
}

/// A record whose writable fields can be enumerated in declaration order.
///
/// # Examples
///
/// ```
/// use flagbind_core::Bindable;
///
/// #[derive(Debug, Default, Bindable)]
/// struct Server {
///     #[flag(long = "port", short = "p")]
///     port: u16,
///     #[flag(skip)]
///     connections: Vec<String>,
/// }
///
/// let schema = Server::schema();
/// assert_eq!(schema.len(), 1);
/// assert_eq!(schema[0].tag.name, "port");
/// assert_eq!(schema[0].tag.short, Some("p"));
/// ```
pub trait Bindable: Any {
    /// Descriptors of the writable fields, in declaration order.
    fn schema() -> Vec<FieldDescriptor>
    where
        Self: Sized;

    /// Object-safe access to [`Bindable::schema`].
    fn descriptors(&self) -> Vec<FieldDescriptor>;

    /// Hands every writable field to `visitor`, in declaration order,
    /// stopping at the first error.
    fn visit_fields(&mut self, visitor: &mut dyn FieldVisitor) -> Result<(), BindError>;
}

/// What the engine may do with a field.
pub enum FieldKind<'a> {
    Value,
    Record(&'a mut dyn Bindable),
    Slice(&'a mut dyn SliceField),
    Ignored,
}

/// Implemented by every type that may appear as a field of a [`Bindable`]
/// record.
pub trait BindField: Any {
    fn field_kind(&mut self) -> FieldKind<'_>;

    /// Schema of the record reached through this field, if any.
    fn nested_schema() -> Option<fn() -> Vec<FieldDescriptor>>
    where
        Self: Sized,
    {
        None
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A growable sequence of records.
pub trait SliceField {
    /// Replaces the contents with `len` default-initialized elements.
    fn reset(&mut self, len: usize);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Bindable>;
}

impl<T: Bindable + Default> SliceField for Vec<T> {
    fn reset(&mut self, len: usize) {
        self.clear();
        self.resize_with(len, T::default);
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Bindable> {
        self.get_mut(index).map(|element| element as &mut dyn Bindable)
    }
}

impl<T: Bindable + Default> BindField for Vec<T> {
    fn field_kind(&mut self) -> FieldKind<'_> {
        FieldKind::Slice(self)
    }

    fn nested_schema() -> Option<fn() -> Vec<FieldDescriptor>> {
        Some(T::schema)
    }
}

impl<T: Any> BindField for Option<T> {
    fn field_kind(&mut self) -> FieldKind<'_> {
        FieldKind::Value
    }
}

impl<T: 'static> BindField for PhantomData<T> {
    fn field_kind(&mut self) -> FieldKind<'_> {
        FieldKind::Ignored
    }
}

/// Declares types as opaque value fields.
///
/// The engine only sets such a field when the coercion registry in use
/// supports the type.
///
/// ```
/// use flagbind_core::{BindField, FieldKind, value_field};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Port(u16);
/// value_field!(Port);
///
/// let mut port = Port::default();
/// assert!(matches!(port.field_kind(), FieldKind::Value));
/// ```
#[macro_export]
macro_rules! value_field {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::BindField for $ty {
                fn field_kind(&mut self) -> $crate::FieldKind<'_> {
                    $crate::FieldKind::Value
                }
            }
        )+
    };
}

value_field!(
    bool, char, String, PathBuf, Duration, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64,
    u128, usize, f32, f64,
);
