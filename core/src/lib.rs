//! Binds command-line flag assignments onto nested configuration records.
//!
//! A flat list of assignments such as `--name=api -d[1].h=db2 -efh` is
//! mapped onto a tree of records, slices of records and scalar fields:
//!
//! - [`split`] tokenizes arguments into [`Group`]s of [`KeyValue`]s, one
//!   group per sub-command segment.
//! - [`Bindable`] (usually derived) exposes a record's fields in declaration
//!   order, with optional `#[flag(long = "...", short = "...")]` names.
//! - [`candidate_names`] lists the flag spellings that may address a field:
//!   the all-long name, then the short lineage when any level declares one.
//! - [`Flags`] walks the record, infers slice lengths from indexed keys,
//!   coerces values through a [`ParseRegistry`] and reports every applied
//!   value to a [`SetReceiver`].
//!
//! Errors are reported as [`BindError`].
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use flagbind_core::*;
//!
//! #[derive(Debug, Default, Bindable)]
//! struct Nested {
//!     #[flag(long = "ConnTimeout", short = "c")]
//!     conn_timeout: Option<Duration>,
//! }
//!
//! #[derive(Debug, Default, Bindable)]
//! struct Database {
//!     #[flag(long = "host", short = "h")]
//!     host: Option<String>,
//!     #[flag(long = "nestednamed", short = "n")]
//!     nested_named: Nested,
//! }
//!
//! #[derive(Debug, Default, Bindable)]
//! struct App {
//!     #[flag(long = "databases", short = "d")]
//!     databases: Vec<Database>,
//!     #[flag(short = "e")]
//!     enabled: bool,
//! }
//!
//! let groups = split(["-d[1].n.c=40s", "--databases[0].host=primary", "-e"]);
//! let mut app = App::default();
//! let mut recorder = SetRecorder::new();
//! Flags::new(&groups[0])
//!     .unmarshal_with_emitter(&mut app, &mut recorder)
//!     .unwrap();
//!
//! assert_eq!(app.databases.len(), 2);
//! assert_eq!(app.databases[0].host.as_deref(), Some("primary"));
//! assert_eq!(
//!     app.databases[1].nested_named.conn_timeout,
//!     Some(Duration::from_secs(40))
//! );
//! assert!(app.enabled);
//! assert_eq!(recorder.records().len(), 3);
//! ```

extern crate self as flagbind_core;

mod bind;
mod duration;
mod emitter;
mod error;
mod field;
mod path;
mod registry;
mod resolve;
mod slice;
mod source;
mod split;
mod types;
mod validate;

pub use bind::{BindOptions, DEFAULT_MAX_SLICE_LEN, Flags, parse_args};
pub use duration::parse_duration;
pub use emitter::{NoOpReceiver, SetReceiver, SetRecord, SetRecorder};
pub use error::{BindError, CoercionError, Result, SliceIndexError};
pub use field::{BindField, Bindable, FieldDescriptor, FieldKind, FieldVisitor, SliceField};
pub use flagbind_derive::Bindable;
pub use path::{FieldTag, PathStep, StructPath};
pub use registry::{ParseRegistry, ValueSetter, parse_bool};
pub use resolve::candidate_names;
pub use slice::{InvalidIndex, infer_slice_len};
pub use source::FlagReader;
pub use split::{split, split_env_args};
pub use types::*;
pub use validate::validate_schema;
