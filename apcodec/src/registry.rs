use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::{DecodeError, Entity, Node, ScalarKind, Vocabulary, VocabularyError};

/// one alternative a property may hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Range {
	/// a sub entity whose type satisfies this capability
	Capability(String),
	Scalar(ScalarKind),
}

impl std::fmt::Display for Range {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Range::Capability(x) => write!(f, "{x}"),
			Range::Scalar(x) => write!(f, "{x}"),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
	name: String,
	range: Vec<Range>,
	functional: bool,
	language_map: bool,
}

impl PropertySchema {
	pub fn name(&self) -> &str {
		&self.name
	}

	/// legal alternatives, in decoding priority order
	pub fn range(&self) -> &[Range] {
		&self.range
	}

	pub fn is_functional(&self) -> bool {
		self.functional
	}

	pub fn has_language_map(&self) -> bool {
		self.language_map
	}

	/// wire key of the natural language map beside this property, if it has one
	pub fn language_map_key(&self) -> Option<String> {
		if self.language_map {
			Some(format!("{}Map", self.name))
		} else {
			None
		}
	}

	pub fn capabilities(&self) -> impl Iterator<Item = &str> {
		self.range.iter().filter_map(|r| match r {
			Range::Capability(x) => Some(x.as_str()),
			Range::Scalar(_) => None,
		})
	}

	pub fn scalars(&self) -> impl Iterator<Item = ScalarKind> + '_ {
		self.range.iter().filter_map(|r| match r {
			Range::Scalar(x) => Some(*x),
			Range::Capability(_) => None,
		})
	}

	/// whether this property may hold given node. unknown values are always admitted, they
	/// only come from wire data that matched nothing else
	pub fn admits(&self, node: &Node) -> bool {
		match node {
			Node::Unknown(_) => true,
			Node::Scalar(x) => self.scalars().any(|k| k == x.kind()),
			Node::Entity(x) => self.capabilities().any(|c| x.schema().satisfies(c)),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSchema {
	name: String,
	is_abstract: bool,
	capabilities: BTreeSet<String>,
	properties: Vec<Arc<PropertySchema>>,
	index: BTreeMap<String, usize>,
	language_maps: BTreeMap<String, usize>,
}

impl TypeSchema {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn is_abstract(&self) -> bool {
		self.is_abstract
	}

	/// own name, every ancestor name and every declared capability tag
	pub fn capabilities(&self) -> &BTreeSet<String> {
		&self.capabilities
	}

	pub fn satisfies(&self, capability: &str) -> bool {
		self.capabilities.contains(capability)
	}

	/// every property this type carries, inherited first, in emission order
	pub fn properties(&self) -> &[Arc<PropertySchema>] {
		&self.properties
	}

	pub fn property(&self, name: &str) -> Option<&Arc<PropertySchema>> {
		self.index.get(name).map(|i| &self.properties[*i])
	}

	/// property owning given `<name>Map` wire key
	pub fn language_map(&self, key: &str) -> Option<&Arc<PropertySchema>> {
		self.language_maps.get(key).map(|i| &self.properties[*i])
	}
}

struct Resolved {
	properties: Vec<String>,
	capabilities: BTreeSet<String>,
}

fn resolve_type(
	name: &str,
	vocabulary: &Vocabulary,
	done: &mut BTreeMap<String, Resolved>,
	visiting: &mut BTreeSet<String>,
) -> Result<(), VocabularyError> {
	if done.contains_key(name) { return Ok(()) }
	if !visiting.insert(name.to_string()) {
		return Err(VocabularyError::Cycle(name.to_string()));
	}

	let decl = &vocabulary.types[name];
	let mut properties : Vec<String> = Vec::new();
	let mut capabilities = BTreeSet::from([name.to_string()]);

	for parent in &decl.extends {
		if !vocabulary.types.contains_key(parent) {
			return Err(VocabularyError::UnknownParent { kind: name.to_string(), parent: parent.clone() });
		}
		resolve_type(parent, vocabulary, done, visiting)?;
		let inherited = &done[parent];
		for property in &inherited.properties {
			if !properties.contains(property) && !decl.excludes.contains(property) {
				properties.push(property.clone());
			}
		}
		capabilities.extend(inherited.capabilities.iter().cloned());
	}

	for property in &decl.properties {
		if !vocabulary.properties.contains_key(property) {
			return Err(VocabularyError::UnknownProperty { kind: name.to_string(), property: property.clone() });
		}
		if !properties.contains(property) {
			properties.push(property.clone());
		}
	}

	capabilities.extend(decl.capabilities.iter().cloned());

	visiting.remove(name);
	done.insert(name.to_string(), Resolved { properties, capabilities });
	Ok(())
}

/// every known type, resolved from a [Vocabulary] once and immutable afterwards
#[derive(Debug, Clone)]
pub struct Registry {
	types: BTreeMap<String, Arc<TypeSchema>>,
	context: BTreeMap<String, String>,
}

static GLOBAL : OnceLock<Registry> = OnceLock::new();

impl Registry {
	pub fn new(vocabulary: &Vocabulary) -> Result<Self, VocabularyError> {
		let capability_tags : BTreeSet<&str> = vocabulary.types.values()
			.flat_map(|t| t.capabilities.iter().map(String::as_str))
			.collect();

		let mut properties = BTreeMap::new();
		for (name, decl) in &vocabulary.properties {
			let mut range = Vec::new();
			for entry in &decl.range {
				let alternative = match ScalarKind::from_name(entry) {
					Some(kind) => Range::Scalar(kind),
					None if vocabulary.types.contains_key(entry) || capability_tags.contains(entry.as_str())
						=> Range::Capability(entry.clone()),
					None => return Err(VocabularyError::UnknownRange { property: name.clone(), range: entry.clone() }),
				};
				if !range.contains(&alternative) {
					range.push(alternative);
				}
			}
			if decl.iri && !range.contains(&Range::Scalar(ScalarKind::AnyUri)) {
				range.push(Range::Scalar(ScalarKind::AnyUri));
			}
			properties.insert(name.clone(), Arc::new(PropertySchema {
				name: name.clone(),
				range,
				functional: decl.functional,
				language_map: decl.natural_language_map,
			}));
		}

		let mut resolved = BTreeMap::new();
		for name in vocabulary.types.keys() {
			resolve_type(name, vocabulary, &mut resolved, &mut BTreeSet::new())?;
		}

		let mut types = BTreeMap::new();
		for (name, Resolved { properties: names, capabilities }) in resolved {
			let mut keys = BTreeSet::from(["type".to_string(), "@context".to_string()]);
			let mut index = BTreeMap::new();
			let mut language_maps = BTreeMap::new();
			let mut schemas = Vec::with_capacity(names.len());
			for (i, property) in names.into_iter().enumerate() {
				let schema : Arc<PropertySchema> = properties[&property].clone();
				if !keys.insert(property.clone()) {
					return Err(VocabularyError::KeyCollision { kind: name.clone(), key: property });
				}
				if let Some(key) = schema.language_map_key() {
					if !keys.insert(key.clone()) {
						return Err(VocabularyError::KeyCollision { kind: name.clone(), key });
					}
					language_maps.insert(key, i);
				}
				index.insert(property, i);
				schemas.push(schema);
			}
			let is_abstract = vocabulary.types[&name].is_abstract;
			types.insert(name.clone(), Arc::new(TypeSchema {
				name, is_abstract, capabilities, index, language_maps,
				properties: schemas,
			}));
		}

		Ok(Registry { types, context: vocabulary.context.clone() })
	}

	/// process wide registry, built from [Vocabulary::activitystreams] unless something else
	/// got installed before first use
	pub fn global() -> &'static Registry {
		GLOBAL.get_or_init(|| {
			Registry::new(&Vocabulary::activitystreams())
				.expect("builtin vocabulary is inconsistent")
		})
	}

	/// replace the process wide registry. only works before anything used it: on failure
	/// given registry is handed back
	pub fn install(registry: Registry) -> Result<(), Registry> {
		GLOBAL.set(registry)
	}

	/// schema of any known type, abstract ones included
	pub fn schema(&self, name: &str) -> Option<&Arc<TypeSchema>> {
		self.types.get(name)
	}

	pub fn types(&self) -> impl Iterator<Item = &Arc<TypeSchema>> {
		self.types.values()
	}

	/// extra json-ld terms declared by the vocabulary
	pub fn context(&self) -> &BTreeMap<String, String> {
		&self.context
	}

	/// empty entity for a concrete type name satisfying given predicate
	pub fn resolve_with(&self, name: &str, predicate: impl Fn(&TypeSchema) -> bool) -> Option<Entity> {
		let schema = self.types.get(name)?;
		if schema.is_abstract || !predicate(schema) { return None }
		Some(Entity::new(schema.clone()))
	}

	pub fn resolve(&self, name: &str, capability: &str) -> Option<Entity> {
		self.resolve_with(name, |t| t.satisfies(capability))
	}

	pub fn resolve_object(&self, name: &str) -> Option<Entity> {
		self.resolve(name, "Object")
	}

	pub fn resolve_link(&self, name: &str) -> Option<Entity> {
		self.resolve(name, "Link")
	}

	/// empty entity of any concrete type
	pub fn create(&self, name: &str) -> Option<Entity> {
		self.resolve_with(name, |_| true)
	}

	/// decode a top level wire object, as the first type it declares that we know about
	pub fn decode(&self, value: &Value) -> Result<Entity, DecodeError> {
		if !value.is_object() {
			return Err(DecodeError::NotAnObject(crate::error::kind_of(value)));
		}
		let names = crate::types::type_names(value);
		let Some(mut entity) = names.iter().find_map(|n| self.create(n)) else {
			return Err(DecodeError::UnresolvedType(names.iter().map(|x| x.to_string()).collect()));
		};
		entity.deserialize_with(self, value)?;
		Ok(entity)
	}
}
