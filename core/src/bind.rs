//! The binding engine.
//!
//! [`Flags`] walks a destination record depth-first in declaration order.
//! For every field it computes the candidate flag names of the field's
//! structural path and, depending on the field:
//!
//! - slice of records: infers the length from indexed keys, replaces the
//!   slice with that many default elements and walks each element;
//! - type supported by the coercion registry: sets it from the first
//!   candidate present in the source and notifies the [`SetReceiver`];
//! - nested record: walks it;
//! - anything else: skips it.
//!
//! Absent flags are not errors. The first coercion or index failure aborts
//! the whole call.

use tracing::{debug, trace};

use crate::{
    BindError, BindField, FieldKind, FieldTag, FieldVisitor, FlagReader, NoOpReceiver,
    ParseRegistry, PathStep, SetReceiver, SliceField, StructPath, ValueSetter, candidate_names,
    infer_slice_len, split, validate_schema,
};

/// Default upper bound for an inferred slice length.
pub const DEFAULT_MAX_SLICE_LEN: usize = 4096;

/// Tunables for a bind call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindOptions {
    /// Largest slice length a flag index may imply; `--items[n]` requires
    /// `n < max_slice_len`.
    pub max_slice_len: usize,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            max_slice_len: DEFAULT_MAX_SLICE_LEN,
        }
    }
}

/// Binds flag assignments from a [`FlagReader`] onto
/// [`Bindable`](crate::Bindable) records.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use flagbind_core::{Bindable, Flags, split};
///
/// #[derive(Debug, Default, Bindable)]
/// struct Database {
///     #[flag(long = "host", short = "h")]
///     host: Option<String>,
///     #[flag(long = "timeout", short = "t")]
///     timeout: Option<Duration>,
/// }
///
/// #[derive(Debug, Default, Bindable)]
/// struct Config {
///     #[flag(long = "name", short = "n")]
///     name: Option<String>,
///     #[flag(long = "databases", short = "d")]
///     databases: Vec<Database>,
///     verbose: bool,
/// }
///
/// let groups = split(["-n=api", "--databases[1].host=b.example", "-d[0].t=30s", "--verbose"]);
/// let mut config = Config::default();
/// Flags::new(&groups[0]).unmarshal(&mut config).unwrap();
///
/// assert_eq!(config.name.as_deref(), Some("api"));
/// assert_eq!(config.databases.len(), 2);
/// assert_eq!(config.databases[0].timeout, Some(Duration::from_secs(30)));
/// assert_eq!(config.databases[1].host.as_deref(), Some("b.example"));
/// assert!(config.verbose);
/// ```
pub struct Flags<'a> {
    reader: &'a dyn FlagReader,
    registry: Box<dyn ValueSetter + 'a>,
    options: BindOptions,
}

impl<'a> Flags<'a> {
    /// Binder over `reader` using a fresh [`ParseRegistry::with_primitives`].
    pub fn new(reader: &'a dyn FlagReader) -> Self {
        Self::with_registry(reader, ParseRegistry::with_primitives())
    }

    /// Binder over `reader` using a caller-supplied coercion registry.
    pub fn with_registry(reader: &'a dyn FlagReader, registry: impl ValueSetter + 'a) -> Self {
        Self {
            reader,
            registry: Box::new(registry),
            options: BindOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BindOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &BindOptions {
        &self.options
    }

    /// Populates `into` from the flags. See [`Flags::unmarshal_with_emitter`].
    pub fn unmarshal(&self, into: &mut dyn BindField) -> Result<(), BindError> {
        self.unmarshal_with_emitter(into, &mut NoOpReceiver)
    }

    /// Populates `into` from the flags, reporting every applied value to
    /// `emitter`.
    ///
    /// Every slice field is replaced by as many default elements as its
    /// highest flag index implies, so a slice no flag refers to ends up empty.
    ///
    /// # Errors
    ///
    /// - [`Programming`](BindError::Programming) if `into` is not a record.
    /// - [`ShortFlagDeclaration`](BindError::ShortFlagDeclaration) if an
    ///   annotation is malformed; nothing is modified in that case.
    /// - [`PathParse`](BindError::PathParse) for an unusable slice index.
    /// - [`Parse`](BindError::Parse) when a value fails coercion.
    pub fn unmarshal_with_emitter(
        &self,
        into: &mut dyn BindField,
        emitter: &mut dyn SetReceiver,
    ) -> Result<(), BindError> {
        let type_name = into.type_name();
        let FieldKind::Record(record) = into.field_kind() else {
            return Err(BindError::Programming(format!(
                "destination must be a record deriving Bindable, got {type_name}"
            )));
        };

        validate_schema(&record.descriptors())?;

        let mut binder = Binder {
            reader: self.reader,
            registry: self.registry.as_ref(),
            emitter,
            options: self.options,
            path: StructPath::new(),
        };
        record.visit_fields(&mut binder)
    }
}

/// Splits `args` and binds the root group into a fresh `T`.
///
/// # Examples
///
/// ```
/// use flagbind_core::{Bindable, parse_args};
///
/// #[derive(Debug, Default, Bindable)]
/// struct Switches {
///     #[flag(short = "e")]
///     e: bool,
///     #[flag(short = "f")]
///     f: bool,
///     #[flag(short = "g")]
///     g: bool,
/// }
///
/// let switches: Switches = parse_args(["-ef"]).unwrap();
/// assert!(switches.e && switches.f && !switches.g);
/// ```
pub fn parse_args<T, I, S>(args: I) -> Result<T, BindError>
where
    T: BindField + Default,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let root = split(args).into_iter().next().unwrap_or_default();
    let mut value = T::default();
    Flags::new(&root).unmarshal(&mut value)?;
    Ok(value)
}

/// Traversal state of one bind call.
struct Binder<'a, 'e> {
    reader: &'a dyn FlagReader,
    registry: &'a dyn ValueSetter,
    emitter: &'e mut dyn SetReceiver,
    options: BindOptions,
    path: StructPath,
}

impl Binder<'_, '_> {
    fn bind_field(&mut self, field: &mut dyn BindField) -> Result<(), BindError> {
        if let FieldKind::Slice(slice) = field.field_kind() {
            return self.bind_slice(slice);
        }

        if self.registry.is_supported(&*field) {
            return self.bind_value(field);
        }

        let kind = field.type_name();
        match field.field_kind() {
            FieldKind::Record(record) => record.visit_fields(self),
            FieldKind::Value | FieldKind::Ignored | FieldKind::Slice(_) => {
                trace!(path = %self.path, kind, "skipping field");
                Ok(())
            }
        }
    }

    fn bind_value(&mut self, field: &mut dyn BindField) -> Result<(), BindError> {
        let reader = self.reader;
        let names = candidate_names(&self.path);
        trace!(path = %self.path, candidates = ?names, "resolving value");

        for name in names {
            let Some(raw) = reader.get(&name) else {
                continue;
            };

            let applied = self
                .registry
                .set_value(&mut *field, raw)
                .map_err(|source| BindError::Parse {
                    struct_path: self.path.to_string(),
                    flag: name.clone(),
                    source,
                })?;
            if applied {
                debug!(path = %self.path, flag = %name, value = raw, "field set from flag");
                self.emitter.receive_set(&self.path, &name, raw);
            }
            return Ok(());
        }

        Ok(())
    }

    fn bind_slice(&mut self, slice: &mut dyn SliceField) -> Result<(), BindError> {
        let names = candidate_names(&self.path);
        let len = infer_slice_len(self.reader, &names, self.options.max_slice_len).map_err(
            |invalid| BindError::PathParse {
                struct_path: self.path.to_string(),
                key: invalid.key,
                source: invalid.error,
            },
        )?;
        debug!(path = %self.path, len, "sized slice from flag indices");
        slice.reset(len);
        for index in 0..len {
            let Some(element) = slice.element_mut(index) else {
                break;
            };
            self.path.set_top_index(Some(index));
            element.visit_fields(self)?;
        }
        self.path.set_top_index(None);

        Ok(())
    }
}

impl FieldVisitor for Binder<'_, '_> {
    fn visit(&mut self, tag: &FieldTag, field: &mut dyn BindField) -> Result<(), BindError> {
        self.path.push(PathStep::new(*tag));
        let result = self.bind_field(field);
        self.path.pop();
        result
    }
}
