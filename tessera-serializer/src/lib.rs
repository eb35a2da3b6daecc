//! # tessera-serializer
//!
//! Pluggable, priority-ordered serialization of model values into plain JSON.
//!
//! A [`Serializer`] owns [`SerializerComponent`]s bucketed by [`Group`]. For a
//! value it:
//!
//! 1. visits groups in the order they were first registered,
//! 2. skips every group whose predicate rejects the value,
//! 3. asks each component of a matching group whether it `supports` the value,
//! 4. folds the supporting components over the initial object, highest
//!    priority first.
//!
//! [`Serializer::serialize_entry_point`] wraps a pass in `begin`/`end`
//! events so other code can seed or post-process the output.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use tessera_model::{ProjectReflection, Type};
//! use tessera_serializer::Serializer;
//!
//! let serializer = Serializer::with_builtins();
//!
//! let ty = Type::intrinsic("string");
//! assert_eq!(
//!     serializer.to_value(&ty).unwrap(),
//!     json!({ "type": "intrinsic", "name": "string" })
//! );
//!
//! let project = ProjectReflection::new("demo");
//! let output = serializer.to_value(&project).unwrap();
//! assert_eq!(output["kindString"], json!("Project"));
//! ```

pub mod builtin;
pub mod component;
mod dispatch;
pub mod error;
pub mod events;
pub mod group;
pub mod serializer;

pub use builtin::{Subject, builtin_components};
pub use component::{Describe, Output, SerializerComponent};
pub use error::SerializeError;
pub use events::{EntryPointHooks, SerializeEvent, SerializeEventData, SerializeEventKind};
pub use group::Group;
pub use serializer::Serializer;
