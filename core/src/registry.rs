//! Type coercion registry.
//!
//! A [`ValueSetter`] turns a raw flag value into a typed field. The engine
//! asks [`ValueSetter::is_supported`] before anything else, so a registered
//! type is always set as a whole value, even if it is also a record.
//!
//! [`ParseRegistry`] is the stock implementation: a table of setters keyed by
//! [`TypeId`], filled by explicit registration. Registering `T` also
//! registers `Option<T>`, which is set to `Some(value)` on a match and stays
//! `None` when the flag is absent.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::{CoercionError, parse_duration};

/// Converts raw strings into typed destinations.
pub trait ValueSetter {
    /// Whether `target` has a registered conversion.
    fn is_supported(&self, target: &dyn Any) -> bool;

    /// Parses `raw` into `target`.
    ///
    /// Returns `Ok(true)` when the value was applied, `Ok(false)` when the
    /// setter accepted the input but chose not to change the field.
    fn set_value(&self, target: &mut dyn Any, raw: &str) -> Result<bool, CoercionError>;
}

impl<S: ValueSetter + ?Sized> ValueSetter for &S {
    fn is_supported(&self, target: &dyn Any) -> bool {
        (**self).is_supported(target)
    }

    fn set_value(&self, target: &mut dyn Any, raw: &str) -> Result<bool, CoercionError> {
        (**self).set_value(target, raw)
    }
}

type Setter = Box<dyn Fn(&mut dyn Any, &str) -> Result<bool, CoercionError> + Send + Sync>;

/// [`TypeId`]-keyed table of setters.
///
/// # Examples
///
/// ```
/// use flagbind_core::{CoercionError, ParseRegistry, ValueSetter};
///
/// #[derive(Debug, PartialEq)]
/// struct Level(u8);
///
/// let mut registry = ParseRegistry::with_primitives();
/// registry.register(|raw: &str| match raw {
///     "low" => Ok(Level(1)),
///     "high" => Ok(Level(9)),
///     other => Err(CoercionError::Custom(format!("unknown level '{other}'"))),
/// });
///
/// let mut level = Level(0);
/// assert!(registry.set_value(&mut level, "high").unwrap());
/// assert_eq!(level, Level(9));
///
/// let mut maybe: Option<Level> = None;
/// assert!(registry.is_supported(&maybe));
/// registry.set_value(&mut maybe, "low").unwrap();
/// assert_eq!(maybe, Some(Level(1)));
/// ```
#[derive(Default)]
pub struct ParseRegistry {
    setters: HashMap<TypeId, Setter>,
}

impl ParseRegistry {
    /// Registry without any conversion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh registry with the built-in conversions: `bool`, every integer
    /// width, `f32`, `f64`, `char`, `String`, `PathBuf` and `Duration`, each
    /// also as `Option<_>`.
    pub fn with_primitives() -> Self {
        let mut registry = Self::new();
        registry.register(parse_bool);
        registry.register(parse_char);
        registry.register(|raw: &str| Ok(raw.to_string()));
        registry.register(|raw: &str| Ok(PathBuf::from(raw)));
        registry.register(parse_duration);
        registry.register_from_str::<i8>();
        registry.register_from_str::<i16>();
        registry.register_from_str::<i32>();
        registry.register_from_str::<i64>();
        registry.register_from_str::<i128>();
        registry.register_from_str::<isize>();
        registry.register_from_str::<u8>();
        registry.register_from_str::<u16>();
        registry.register_from_str::<u32>();
        registry.register_from_str::<u64>();
        registry.register_from_str::<u128>();
        registry.register_from_str::<usize>();
        registry.register_from_str::<f32>();
        registry.register_from_str::<f64>();
        registry
    }

    /// Registers `T` and `Option<T>` with a parsing function. Replaces any
    /// previous registration of either type.
    pub fn register<T, F>(&mut self, parse: F) -> &mut Self
    where
        T: Any,
        F: Fn(&str) -> Result<T, CoercionError> + Send + Sync + 'static,
    {
        let parse = Arc::new(parse);
        let plain = Arc::clone(&parse);
        self.register_setter(move |target: &mut T, raw| {
            *target = plain(raw)?;
            Ok(true)
        });
        self.register_setter(move |target: &mut Option<T>, raw| {
            *target = Some(parse(raw)?);
            Ok(true)
        })
    }

    /// Registers `T` and `Option<T>` through their [`FromStr`] implementation.
    pub fn register_from_str<T>(&mut self) -> &mut Self
    where
        T: Any + FromStr,
        T::Err: Into<CoercionError>,
    {
        self.register(|raw: &str| raw.parse::<T>().map_err(Into::into))
    }

    /// Registers a setter with full control over the field, including
    /// reporting that nothing was applied.
    pub fn register_setter<T, F>(&mut self, setter: F) -> &mut Self
    where
        T: Any,
        F: Fn(&mut T, &str) -> Result<bool, CoercionError> + Send + Sync + 'static,
    {
        let erased: Setter = Box::new(move |target: &mut dyn Any, raw: &str| {
            match target.downcast_mut::<T>() {
                Some(target) => setter(target, raw),
                None => Err(CoercionError::Unsupported(std::any::type_name::<T>())),
            }
        });
        self.setters.insert(TypeId::of::<T>(), erased);
        self
    }

    pub fn len(&self) -> usize {
        self.setters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.setters.is_empty()
    }
}

impl ValueSetter for ParseRegistry {
    fn is_supported(&self, target: &dyn Any) -> bool {
        self.setters.contains_key(&target.type_id())
    }

    fn set_value(&self, target: &mut dyn Any, raw: &str) -> Result<bool, CoercionError> {
        match self.setters.get(&(*target).type_id()) {
            Some(setter) => setter(target, raw),
            None => Err(CoercionError::Unsupported("unregistered type")),
        }
    }
}

impl fmt::Debug for ParseRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseRegistry")
            .field("types", &self.setters.len())
            .finish()
    }
}

/// Boolean spellings accepted on the command line.
pub fn parse_bool(raw: &str) -> Result<bool, CoercionError> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        other => Err(CoercionError::InvalidBool(other.to_string())),
    }
}

fn parse_char(raw: &str) -> Result<char, CoercionError> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CoercionError::InvalidChar(raw.to_string())),
    }
}
