use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;

use crate::{DecodeError, EncodeError, Entity, Iri, LanguageTag, MediaType, PropertySchema, Registry, Scalar, ScalarKind};

/// one value of a property: an embedded entity, a scalar (iris included), or whatever the
/// wire carried that matched none of the property alternatives
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
	Entity(Box<Entity>),
	Scalar(Scalar),
	Unknown(Value),
}

impl Node {
	pub fn iri(uri: &str) -> Result<Self, xsd::XsdError> {
		Ok(Node::Scalar(Scalar::Iri(Iri::parse(uri)?)))
	}

	pub fn string(text: impl ToString) -> Self {
		Node::Scalar(Scalar::String(text.to_string()))
	}

	/// read a single wire value for given property, trying its alternatives in order.
	/// values matching nothing are kept as [Node::Unknown], only objects given to properties
	/// which can't hold entities are an error
	pub fn decode(property: &PropertySchema, registry: &Registry, value: &Value) -> Result<Self, DecodeError> {
		if let Value::Object(obj) = value {
			if property.capabilities().next().is_none() {
				return Err(DecodeError::WrongShape {
					expected: property.scalars().next().map_or("nothing", ScalarKind::name),
					found: "object",
				});
			}

			if !obj.contains_key("type") {
				tracing::debug!("untyped object in '{}', keeping it as unknown", property.name());
				return Ok(Node::Unknown(value.clone()));
			}

			for name in crate::types::type_names(value) {
				for capability in property.capabilities() {
					if let Some(mut entity) = registry.resolve(name, capability) {
						entity.deserialize_with(registry, value)?;
						return Ok(Node::Entity(Box::new(entity)));
					}
				}
			}

			tracing::debug!("no type admitted by '{}' matches object, keeping it as unknown", property.name());
			return Ok(Node::Unknown(value.clone()));
		}

		for kind in property.scalars() {
			if let Ok(scalar) = kind.decode(value) {
				return Ok(Node::Scalar(scalar));
			}
		}

		tracing::debug!("no alternative of '{}' matches {}, keeping it as unknown", property.name(), crate::error::kind_of(value));
		Ok(Node::Unknown(value.clone()))
	}

	pub fn serialize(&self) -> Result<Value, EncodeError> {
		match self {
			Node::Entity(x) => x.serialize(),
			Node::Scalar(x) => Ok(x.encode()),
			Node::Unknown(x) => Ok(x.clone()),
		}
	}

	/// true only if Node holds an embedded entity
	pub fn is_entity(&self) -> bool {
		matches!(self, Node::Entity(_))
	}

	/// true only if Node holds a scalar
	pub fn is_scalar(&self) -> bool {
		matches!(self, Node::Scalar(_))
	}

	/// true only if Node is a bare iri reference
	pub fn is_iri(&self) -> bool {
		matches!(self, Node::Scalar(Scalar::Iri(_)))
	}

	/// true only if Node matched no alternative while decoding
	pub fn is_unknown(&self) -> bool {
		matches!(self, Node::Unknown(_))
	}

	pub fn as_entity(&self) -> Option<&Entity> {
		match self {
			Node::Entity(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_entity_mut(&mut self) -> Option<&mut Entity> {
		match self {
			Node::Entity(x) => Some(x),
			_ => None,
		}
	}

	pub fn into_entity(self) -> Option<Entity> {
		match self {
			Node::Entity(x) => Some(*x),
			_ => None,
		}
	}

	pub fn as_scalar(&self) -> Option<&Scalar> {
		match self {
			Node::Scalar(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_unknown(&self) -> Option<&Value> {
		match self {
			Node::Unknown(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		self.as_scalar()?.as_str()
	}

	pub fn as_iri(&self) -> Option<&Iri> {
		self.as_scalar()?.as_iri()
	}

	pub fn as_date_time(&self) -> Option<&DateTime<Utc>> {
		self.as_scalar()?.as_date_time()
	}

	pub fn as_duration(&self) -> Option<&TimeDelta> {
		self.as_scalar()?.as_duration()
	}

	pub fn as_float(&self) -> Option<f64> {
		self.as_scalar()?.as_float()
	}

	pub fn as_media_type(&self) -> Option<&MediaType> {
		self.as_scalar()?.as_media_type()
	}

	pub fn as_bool(&self) -> Option<bool> {
		self.as_scalar()?.as_bool()
	}

	pub fn as_u64(&self) -> Option<u64> {
		self.as_scalar()?.as_u64()
	}

	pub fn as_language_tag(&self) -> Option<&LanguageTag> {
		self.as_scalar()?.as_language_tag()
	}

	/// returns id of referenced thing: href for links, id for other entities, the iri itself
	/// for bare references
	pub fn id(&self) -> crate::Field<&str> {
		match self {
			Node::Scalar(Scalar::Iri(x)) => Ok(x.as_str()),
			Node::Entity(x) if x.schema().satisfies("Link") => x.href(),
			Node::Entity(x) => x.id(),
			_ => Err(crate::MissingField("id")),
		}
	}

	/// short human readable name of the held alternative
	pub fn describe(&self) -> String {
		match self {
			Node::Entity(x) => x.schema().name().to_string(),
			Node::Scalar(x) => x.kind().to_string(),
			Node::Unknown(_) => "unknown value".to_string(),
		}
	}
}

impl From<Entity> for Node {
	fn from(value: Entity) -> Self {
		Node::Entity(Box::new(value))
	}
}

impl From<Scalar> for Node {
	fn from(value: Scalar) -> Self {
		Node::Scalar(value)
	}
}

macro_rules! scalar_into_node {
	($($t:ty),+) => {
		$(
			impl From<$t> for Node {
				fn from(value: $t) -> Self {
					Node::Scalar(Scalar::from(value))
				}
			}
		)+
	};
}

scalar_into_node!(String, Iri, DateTime<Utc>, TimeDelta, f64, MediaType, bool, u64, LanguageTag);

#[cfg(test)]
mod test {
	use serde_json::json;

	use super::Node;
	use crate::{DecodeError, Registry};

	fn decode(kind: &str, property: &str, value: serde_json::Value) -> Result<Node, DecodeError> {
		let registry = Registry::global();
		let schema = registry.schema(kind).unwrap().property(property).unwrap().clone();
		Node::decode(&schema, registry, &value)
	}

	#[test]
	fn iris_decode_as_references() {
		let node = decode("Announce", "actor", json!("https://a.example/alice")).unwrap();
		assert!(node.is_iri());
		assert_eq!(node.id(), Ok("https://a.example/alice"));
	}

	#[test]
	fn typed_objects_resolve_by_capability() {
		let node = decode("Announce", "object", json!({"type": "Note", "id": "https://b.example/note/1"})).unwrap();
		assert_eq!(node.as_entity().map(|x| x.schema().name()), Some("Note"));
		assert_eq!(node.id(), Ok("https://b.example/note/1"));

		let node = decode("Announce", "object", json!({"type": "Mention", "href": "https://b.example/users/bob"})).unwrap();
		assert_eq!(node.as_entity().map(|x| x.schema().name()), Some("Mention"));
		assert_eq!(node.id(), Ok("https://b.example/users/bob"));
	}

	#[test]
	fn first_known_type_wins() {
		let node = decode("Note", "tag", json!({"type": ["Emoji", "Hashtag", "Mention"], "name": "#rust"})).unwrap();
		#[cfg(feature = "toot")]
		assert_eq!(node.as_entity().map(|x| x.schema().name()), Some("Emoji"));
		#[cfg(all(not(feature = "toot"), feature = "activitypub-miscellaneous-terms"))]
		assert_eq!(node.as_entity().map(|x| x.schema().name()), Some("Hashtag"));
		assert!(node.is_entity());
	}

	#[test]
	fn narrow_capabilities_filter_types() {
		let node = decode("Note", "icon", json!({"type": "Note", "content": "not an image"})).unwrap();
		assert!(node.is_unknown());
		let node = decode("Note", "icon", json!({"type": "Image", "url": "https://c.example/cat.png"})).unwrap();
		assert!(node.is_entity());
	}

	#[test]
	fn unmatched_values_become_unknown() {
		assert_eq!(decode("Note", "altitude", json!("nowhere")).unwrap(), Node::Unknown(json!("nowhere")));
		assert_eq!(decode("Note", "altitude", json!(null)).unwrap(), Node::Unknown(json!(null)));
		assert_eq!(decode("Note", "to", json!({"id": "https://x/1"})).unwrap(), Node::Unknown(json!({"id": "https://x/1"})));
		assert_eq!(decode("Note", "to", json!({"type": "Florp"})).unwrap(), Node::Unknown(json!({"type": "Florp"})));
	}

	#[test]
	fn objects_for_scalar_properties_are_errors() {
		assert_eq!(
			decode("Note", "published", json!({"type": "Note"})),
			Err(DecodeError::WrongShape { expected: "dateTime", found: "object" })
		);
	}

	#[test]
	fn scalars_serialize_to_wire_form() {
		assert_eq!(Node::from(1.5).serialize().unwrap(), json!(1.5));
		assert_eq!(Node::from(true).serialize().unwrap(), json!(true));
		assert_eq!(Node::string("hello").serialize().unwrap(), json!("hello"));
		assert_eq!(Node::iri("https://x/1").unwrap().serialize().unwrap(), json!("https://x/1"));
		assert!(Node::iri("not an iri").is_err());
	}

	#[test]
	fn describe_names_the_alternative() {
		assert_eq!(Node::from(3u64).describe(), "nonNegativeInteger");
		assert_eq!(Node::Unknown(json!(1)).describe(), "unknown value");
		let note = Registry::global().create("Note").unwrap();
		assert_eq!(Node::from(note).describe(), "Note");
	}
}
