//! # apcodec
//! > schema driven (de)serialization of ActivityStreams objects
//!
//! every ActivityStreams type is described by a [Vocabulary] (a toml document, the builtin one
//! covers activitystreams core, vocabulary and activitypub actors), which gets resolved into a
//! [Registry] of [TypeSchema]s. an [Entity] is an instance of one of those types: each of its
//! properties holds one or more [Node]s, each being an embedded entity, a scalar or an unknown
//! value kept verbatim
//!
//! ```rust
//! let entity = apcodec::Registry::global()
//! 	.decode(&serde_json::json!({
//! 		"type": "Announce",
//! 		"actor": "https://a.example/alice",
//! 		"object": "https://b.example/note/1",
//! 	}))
//! 	.unwrap();
//! assert_eq!(entity.first("actor").unwrap().id(), Ok("https://a.example/alice"));
//! ```

mod macros;
#[allow(unused_imports)]
pub(crate) use macros::{getter, setter};

mod error;
pub use error::{DecodeError, EncodeError, Field, MissingField, SchemaError, ShapeMismatch, VocabularyError};

mod scalar;
pub use scalar::{Iri, LanguageTag, MediaType, NaturalLanguageMap, Scalar, ScalarKind};

mod vocabulary;
pub use vocabulary::{PropertyDecl, TypeDecl, Vocabulary};

mod registry;
pub use registry::{PropertySchema, Range, Registry, TypeSchema};

mod node;
pub use node::Node;

mod sequence;
pub use sequence::Sequence;

mod types;
pub use types::{TypeSequence, TypeValue};

mod entity;
pub use entity::{Entity, Property};

mod target;
pub use target::{Addressed, PUBLIC};

#[cfg(feature = "shortcuts")]
mod shortcuts;

#[cfg(feature = "jsonld")]
mod jsonld;

#[cfg(feature = "jsonld")]
pub use jsonld::{ACTIVITYSTREAMS_CONTEXT, LD};
