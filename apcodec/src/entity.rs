use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{
	DecodeError, EncodeError, NaturalLanguageMap, Node, PropertySchema, Registry, SchemaError,
	Sequence, TypeSchema, TypeSequence,
};

/// stored values of one property
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
	Functional(Node),
	Sequence(Sequence),
}

impl Property {
	pub fn values(&self) -> &[Node] {
		match self {
			Property::Functional(x) => std::slice::from_ref(x),
			Property::Sequence(x) => x.as_slice(),
		}
	}

	pub fn is_empty(&self) -> bool {
		match self {
			Property::Functional(_) => false,
			Property::Sequence(x) => x.is_empty(),
		}
	}

	pub fn serialize(&self) -> Result<Option<Value>, EncodeError> {
		match self {
			Property::Functional(x) => Ok(Some(x.serialize()?)),
			Property::Sequence(x) => x.serialize(),
		}
	}
}

/// an instance of some vocabulary type: its `type` list, the properties its schema
/// declares, natural language maps and every wire key we didn't recognize
#[derive(Clone)]
pub struct Entity {
	schema: Arc<TypeSchema>,
	types: TypeSequence,
	properties: BTreeMap<String, Property>,
	language_maps: BTreeMap<String, NaturalLanguageMap>,
	unknown: Map<String, Value>,
}

impl std::fmt::Debug for Entity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Entity")
			.field("schema", &self.schema.name())
			.field("types", &self.types)
			.field("properties", &self.properties)
			.field("language_maps", &self.language_maps)
			.field("unknown", &self.unknown)
			.finish()
	}
}

impl PartialEq for Entity {
	fn eq(&self, other: &Self) -> bool {
		self.schema.name() == other.schema.name()
			&& self.types == other.types
			&& self.properties == other.properties
			&& self.language_maps == other.language_maps
			&& self.unknown == other.unknown
	}
}

fn emit(out: &mut Map<String, Value>, key: &str, value: Value) -> Result<(), EncodeError> {
	if out.contains_key(key) {
		return Err(EncodeError::DuplicateKey(key.to_string()));
	}
	out.insert(key.to_string(), value);
	Ok(())
}

impl Entity {
	/// empty entity of given type, already listing its own type name
	pub fn new(schema: Arc<TypeSchema>) -> Self {
		Entity {
			types: TypeSequence::of(schema.name()),
			schema,
			properties: BTreeMap::new(),
			language_maps: BTreeMap::new(),
			unknown: Map::new(),
		}
	}

	pub fn schema(&self) -> &Arc<TypeSchema> {
		&self.schema
	}

	pub fn types(&self) -> &TypeSequence {
		&self.types
	}

	pub fn types_mut(&mut self) -> &mut TypeSequence {
		&mut self.types
	}

	/// every value of given property, empty if unset or unknown
	pub fn get(&self, property: &str) -> &[Node] {
		self.properties.get(property)
			.map(Property::values)
			.unwrap_or(&[])
	}

	pub fn first(&self, property: &str) -> Option<&Node> {
		self.get(property).first()
	}

	pub fn property(&self, property: &str) -> Option<&Property> {
		self.properties.get(property)
	}

	pub fn sequence(&self, property: &str) -> Option<&Sequence> {
		match self.properties.get(property)? {
			Property::Sequence(x) => Some(x),
			Property::Functional(_) => None,
		}
	}

	pub fn lang_map(&self, property: &str) -> Option<&NaturalLanguageMap> {
		self.language_maps.get(property)
	}

	pub fn unknown(&self, key: &str) -> Option<&Value> {
		self.unknown.get(key)
	}

	pub fn unknown_entries(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.unknown.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn id(&self) -> crate::Field<&str> {
		self.first("id")
			.and_then(Node::as_iri)
			.map(crate::Iri::as_str)
			.ok_or(crate::MissingField("id"))
	}

	pub fn href(&self) -> crate::Field<&str> {
		self.first("href")
			.and_then(Node::as_iri)
			.map(crate::Iri::as_str)
			.ok_or(crate::MissingField("href"))
	}

	fn property_schema(&self, property: &str) -> Result<Arc<PropertySchema>, SchemaError> {
		self.schema.property(property)
			.cloned()
			.ok_or_else(|| SchemaError::UnknownProperty {
				kind: self.schema.name().to_string(),
				property: property.to_string(),
			})
	}

	fn admitted(&self, property: &str, node: &Node) -> Result<Arc<PropertySchema>, SchemaError> {
		let schema = self.property_schema(property)?;
		if !schema.admits(node) {
			return Err(SchemaError::NotAdmitted { property: property.to_string(), alternative: node.describe() });
		}
		Ok(schema)
	}

	fn sequence_mut(&mut self, property: &str) -> Result<&mut Sequence, SchemaError> {
		let slot = self.properties.entry(property.to_string())
			.or_insert_with(|| Property::Sequence(Sequence::default()));
		match slot {
			Property::Sequence(x) => Ok(x),
			Property::Functional(_) => Err(SchemaError::Functional(property.to_string())),
		}
	}

	/// replace every value of given property with this one
	pub fn set(&mut self, property: &str, node: impl Into<Node>) -> Result<(), SchemaError> {
		let node = node.into();
		let schema = self.admitted(property, &node)?;
		let slot = if schema.is_functional() {
			Property::Functional(node)
		} else {
			Property::Sequence(Sequence::from(vec![node]))
		};
		self.properties.insert(property.to_string(), slot);
		Ok(())
	}

	pub fn append(&mut self, property: &str, node: impl Into<Node>) -> Result<(), SchemaError> {
		let node = node.into();
		if self.admitted(property, &node)?.is_functional() {
			return Err(SchemaError::Functional(property.to_string()));
		}
		self.sequence_mut(property)?.append(node);
		Ok(())
	}

	pub fn prepend(&mut self, property: &str, node: impl Into<Node>) -> Result<(), SchemaError> {
		let node = node.into();
		if self.admitted(property, &node)?.is_functional() {
			return Err(SchemaError::Functional(property.to_string()));
		}
		self.sequence_mut(property)?.prepend(node);
		Ok(())
	}

	/// insert before `index`, which may be at most the current length
	pub fn insert(&mut self, property: &str, index: usize, node: impl Into<Node>) -> Result<(), SchemaError> {
		let node = node.into();
		if self.admitted(property, &node)?.is_functional() {
			return Err(SchemaError::Functional(property.to_string()));
		}
		let len = self.get(property).len();
		if index > len {
			return Err(SchemaError::OutOfBounds { property: property.to_string(), index, len });
		}
		self.sequence_mut(property)?.insert(index, node);
		Ok(())
	}

	/// take out value at `index`, a functional property only has index 0
	pub fn remove(&mut self, property: &str, index: usize) -> Result<Node, SchemaError> {
		self.property_schema(property)?;
		let len = self.get(property).len();
		let out_of_bounds = SchemaError::OutOfBounds { property: property.to_string(), index, len };
		if index >= len {
			return Err(out_of_bounds);
		}
		match self.properties.remove(property) {
			None => Err(out_of_bounds),
			Some(Property::Functional(x)) => Ok(x),
			Some(Property::Sequence(mut seq)) => {
				let removed = seq.remove(index);
				if !seq.is_empty() {
					self.properties.insert(property.to_string(), Property::Sequence(seq));
				}
				removed.ok_or(out_of_bounds)
			},
		}
	}

	/// drop every value of given property, returning what it held
	pub fn clear(&mut self, property: &str) -> Result<Option<Property>, SchemaError> {
		self.property_schema(property)?;
		Ok(self.properties.remove(property))
	}

	pub fn set_lang_map(&mut self, property: &str, map: NaturalLanguageMap) -> Result<Option<NaturalLanguageMap>, SchemaError> {
		if !self.property_schema(property)?.has_language_map() {
			return Err(SchemaError::NoLanguageMap(property.to_string()));
		}
		Ok(self.language_maps.insert(property.to_string(), map))
	}

	pub fn clear_lang_map(&mut self, property: &str) -> Option<NaturalLanguageMap> {
		self.language_maps.remove(property)
	}

	/// store an arbitrary extra key, emitted verbatim when serializing
	pub fn set_unknown(&mut self, key: impl ToString, value: Value) -> Option<Value> {
		self.unknown.insert(key.to_string(), value)
	}

	pub fn remove_unknown(&mut self, key: &str) -> Option<Value> {
		self.unknown.remove(key)
	}

	/// builder flavor of [Entity::set]: misuse gets logged and leaves the entity untouched
	pub fn with(mut self, property: &str, node: impl Into<Node>) -> Self {
		if let Err(e) = self.set(property, node) {
			tracing::error!("cannot set '{property}' on {}: {e}", self.schema.name());
		}
		self
	}

	/// builder flavor of [Entity::append]
	pub fn with_appended(mut self, property: &str, node: impl Into<Node>) -> Self {
		if let Err(e) = self.append(property, node) {
			tracing::error!("cannot append to '{property}' on {}: {e}", self.schema.name());
		}
		self
	}

	/// fill this entity from a wire object, using the process wide registry for sub entities
	pub fn deserialize(&mut self, value: &Value) -> Result<(), DecodeError> {
		self.deserialize_with(Registry::global(), value)
	}

	/// fill this entity from a wire object. previous content is dropped, and on error the
	/// entity is left partially populated
	pub fn deserialize_with(&mut self, registry: &Registry, value: &Value) -> Result<(), DecodeError> {
		let Value::Object(map) = value else {
			return Err(DecodeError::NotAnObject(crate::error::kind_of(value)));
		};

		self.types = TypeSequence::default();
		self.properties.clear();
		self.language_maps.clear();
		self.unknown.clear();

		let schema = self.schema.clone();
		for (key, value) in map {
			if key == "@context" {
				continue;
			}

			if key == "type" {
				self.types = TypeSequence::decode(value);
				continue;
			}

			if let Some(property) = schema.property(key) {
				let slot = if property.is_functional() {
					Property::Functional(Node::decode(property, registry, value).map_err(|e| e.at(key))?)
				} else {
					Property::Sequence(Sequence::decode(property, registry, value).map_err(|e| e.at(key))?)
				};
				if !slot.is_empty() {
					self.properties.insert(key.clone(), slot);
				}
				continue;
			}

			if let Some(property) = schema.language_map(key) {
				match NaturalLanguageMap::decode(value) {
					Ok(map) => { self.language_maps.insert(property.name().to_string(), map); },
					Err(e) => {
						tracing::debug!("keeping malformed '{key}' as unknown: {e}");
						self.unknown.insert(key.clone(), value.clone());
					},
				}
				continue;
			}

			tracing::debug!("{} has no property '{key}', keeping it as unknown", schema.name());
			self.unknown.insert(key.clone(), value.clone());
		}

		Ok(())
	}

	/// wire form: unknown keys, then `type`, then properties in schema order, then
	/// natural language maps. never emits `@context`
	pub fn serialize(&self) -> Result<Value, EncodeError> {
		let mut out = Map::new();

		for (key, value) in &self.unknown {
			if key == "@context" { continue }
			out.insert(key.clone(), value.clone());
		}

		emit(&mut out, "type", self.types.serialize(self.schema.name()))?;

		for property in self.schema.properties() {
			let Some(slot) = self.properties.get(property.name()) else { continue };
			if let Some(value) = slot.serialize().map_err(|e| e.at(property.name()))? {
				emit(&mut out, property.name(), value)?;
			}
		}

		for property in self.schema.properties() {
			let (Some(key), Some(map)) = (property.language_map_key(), self.language_maps.get(property.name())) else { continue };
			emit(&mut out, &key, map.encode())?;
		}

		Ok(Value::Object(out))
	}
}

impl serde::Serialize for Entity {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let value = Entity::serialize(self).map_err(serde::ser::Error::custom)?;
		serde::Serialize::serialize(&value, serializer)
	}
}

impl<'de> serde::Deserialize<'de> for Entity {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
		Registry::global().decode(&value).map_err(serde::de::Error::custom)
	}
}
