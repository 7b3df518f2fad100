/// json kind of a wire value, for error messages
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "boolean",
		serde_json::Value::Number(_) => "number",
		serde_json::Value::String(_) => "string",
		serde_json::Value::Array(_) => "array",
		serde_json::Value::Object(_) => "object",
	}
}

/// a scalar codec was handed a wire value it can't read. never leaves the crate during
/// decoding: the property just tries its next alternative
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found {found}")]
pub struct ShapeMismatch {
	pub expected: &'static str,
	pub found: &'static str,
}

impl ShapeMismatch {
	pub(crate) fn new(expected: &'static str, value: &serde_json::Value) -> Self {
		ShapeMismatch { expected, found: kind_of(value) }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing field '{0}'")]
pub struct MissingField(pub &'static str);

pub type Field<T> = Result<T, MissingField>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
	#[error("entities must be json objects, got {0}")]
	NotAnObject(&'static str),

	#[error("expected {expected}, found {found}")]
	WrongShape { expected: &'static str, found: &'static str },

	#[error("no registered type matches {0:?}")]
	UnresolvedType(Vec<String>),

	#[error("malformed '{property}': {source}")]
	Property {
		property: String,
		#[source]
		source: Box<DecodeError>,
	},
}

impl DecodeError {
	pub(crate) fn at(self, property: &str) -> Self {
		DecodeError::Property { property: property.to_string(), source: Box::new(self) }
	}

	/// innermost error, skipping the property path
	pub fn root(&self) -> &DecodeError {
		match self {
			DecodeError::Property { source, .. } => source.root(),
			x => x,
		}
	}

	/// dotted path of properties leading to the innermost error
	pub fn path(&self) -> String {
		let mut path = Vec::new();
		let mut cursor = self;
		while let DecodeError::Property { property, source } = cursor {
			path.push(property.as_str());
			cursor = source.as_ref();
		}
		path.join(".")
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
	#[error("key '{0}' would be emitted twice")]
	DuplicateKey(String),

	#[error("could not serialize '{property}': {source}")]
	Property {
		property: String,
		#[source]
		source: Box<EncodeError>,
	},
}

impl EncodeError {
	pub(crate) fn at(self, property: &str) -> Self {
		EncodeError::Property { property: property.to_string(), source: Box::new(self) }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
	#[error("type '{kind}' has no property '{property}'")]
	UnknownProperty { kind: String, property: String },

	#[error("property '{0}' is functional and holds a single value")]
	Functional(String),

	#[error("property '{property}' can't hold {alternative}")]
	NotAdmitted { property: String, alternative: String },

	#[error("property '{0}' has no natural language map")]
	NoLanguageMap(String),

	#[error("index {index} out of bounds for '{property}' (len {len})")]
	OutOfBounds { property: String, index: usize, len: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
	#[error("could not parse vocabulary: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("could not read vocabulary: {0}")]
	Io(#[from] std::io::Error),

	#[error("type '{kind}' extends unknown type '{parent}'")]
	UnknownParent { kind: String, parent: String },

	#[error("type '{kind}' lists undeclared property '{property}'")]
	UnknownProperty { kind: String, property: String },

	#[error("property '{property}' has unknown range '{range}'")]
	UnknownRange { property: String, range: String },

	#[error("type '{0}' inherits from itself")]
	Cycle(String),

	#[error("key '{key}' of type '{kind}' is claimed by two properties")]
	KeyCollision { kind: String, key: String },
}
