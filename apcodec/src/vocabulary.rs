use std::collections::BTreeMap;

use crate::VocabularyError;

const ACTIVITYSTREAMS : &str = include_str!("../vocab/activitystreams.toml");
#[cfg(feature = "activitypub-miscellaneous-terms")]
const MISCELLANY : &str = include_str!("../vocab/miscellany.toml");
#[cfg(feature = "toot")]
const TOOT : &str = include_str!("../vocab/toot.toml");
#[cfg(feature = "litepub")]
const LITEPUB : &str = include_str!("../vocab/litepub.toml");

/// a vocabulary document: which types exist, which properties they carry and what each
/// property may hold. see `vocab/activitystreams.toml` for the builtin one
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Vocabulary {
	#[serde(default)]
	/// extra json-ld terms, emitted by the jsonld helper
	pub context: BTreeMap<String, String>,

	#[serde(default)]
	pub properties: BTreeMap<String, PropertyDecl>,

	#[serde(default)]
	pub types: BTreeMap<String, TypeDecl>,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct PropertyDecl {
	#[serde(default)]
	/// alternatives in priority order: capability names or scalar kind names
	pub range: Vec<String>,

	#[serde(default)]
	/// holds at most one value and is never emitted as an array
	pub functional: bool,

	#[serde(default)]
	/// also read and write a `<name>Map` key holding language tagged variants
	pub natural_language_map: bool,

	#[serde_inline_default(true)]
	/// accept a bare iri after every listed alternative
	pub iri: bool,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TypeDecl {
	#[serde(default)]
	/// parent types, whose properties and capabilities get inherited
	pub extends: Vec<String>,

	#[serde(default)]
	/// own properties, following inherited ones
	pub properties: Vec<String>,

	#[serde(default)]
	/// extra capability tags on top of the type name and its ancestors
	pub capabilities: Vec<String>,

	#[serde(default)]
	/// inherited properties this type (and its descendants) don't carry
	pub excludes: Vec<String>,

	#[serde(default, rename = "abstract")]
	/// abstract types are only capabilities and never get instantiated
	pub is_abstract: bool,
}

fn extend_unique(into: &mut Vec<String>, from: Vec<String>) {
	for x in from {
		if !into.contains(&x) {
			into.push(x);
		}
	}
}

impl Vocabulary {
	pub fn from_toml(document: &str) -> Result<Self, VocabularyError> {
		Ok(toml::from_str(document)?)
	}

	pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
		toml::to_string_pretty(self)
	}

	fn builtin(document: &str) -> Self {
		// these are compiled in and covered by tests
		Self::from_toml(document).expect("builtin vocabulary is not valid toml")
	}

	/// activitystreams core and vocabulary, plus every extension enabled at compile time
	pub fn activitystreams() -> Self {
		#[allow(unused_mut)]
		let mut vocabulary = Self::builtin(ACTIVITYSTREAMS);
		#[cfg(feature = "activitypub-miscellaneous-terms")]
		vocabulary.merge(Self::builtin(MISCELLANY));
		#[cfg(feature = "toot")]
		vocabulary.merge(Self::builtin(TOOT));
		#[cfg(feature = "litepub")]
		vocabulary.merge(Self::builtin(LITEPUB));
		vocabulary
	}

	/// builtin vocabulary, extended with the document at `path` if given and readable
	pub fn load(path: Option<&std::path::Path>) -> Self {
		let mut vocabulary = Self::activitystreams();
		let Some(path) = path else { return vocabulary };
		match std::fs::read_to_string(path) {
			Ok(x) => match Self::from_toml(&x) {
				Ok(extension) => vocabulary.merge(extension),
				Err(e) => tracing::error!("failed parsing vocabulary file: {e}"),
			},
			Err(e) => tracing::error!("failed reading vocabulary file: {e}"),
		}
		vocabulary
	}

	/// lay an extension on top: known types gain its parents, properties and capabilities,
	/// properties it declares replace ours
	pub fn merge(&mut self, other: Vocabulary) {
		self.context.extend(other.context);

		for (name, property) in other.properties {
			if self.properties.insert(name.clone(), property).is_some() {
				tracing::debug!("extension redefines property '{name}'");
			}
		}

		for (name, decl) in other.types {
			match self.types.get_mut(&name) {
				None => { self.types.insert(name, decl); },
				Some(known) => {
					extend_unique(&mut known.extends, decl.extends);
					extend_unique(&mut known.properties, decl.properties);
					extend_unique(&mut known.capabilities, decl.capabilities);
					extend_unique(&mut known.excludes, decl.excludes);
					known.is_abstract |= decl.is_abstract;
				},
			}
		}
	}
}
