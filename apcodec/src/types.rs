use serde_json::Value;

/// one entry of an entity `type` list: a type name, or any extension value the wire carried
#[derive(Debug, Clone, PartialEq)]
pub enum TypeValue {
	Name(String),
	Other(Value),
}

impl TypeValue {
	pub fn as_name(&self) -> Option<&str> {
		match self {
			TypeValue::Name(x) => Some(x.as_str()),
			TypeValue::Other(_) => None,
		}
	}

	fn encode(&self) -> Value {
		match self {
			TypeValue::Name(x) => Value::String(x.clone()),
			TypeValue::Other(x) => x.clone(),
		}
	}
}

impl From<&str> for TypeValue {
	fn from(value: &str) -> Self {
		TypeValue::Name(value.to_string())
	}
}

impl From<String> for TypeValue {
	fn from(value: String) -> Self {
		TypeValue::Name(value)
	}
}

/// ordered `type` list of an entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeSequence(Vec<TypeValue>);

impl TypeSequence {
	pub fn of(name: &str) -> Self {
		TypeSequence(vec![TypeValue::from(name)])
	}

	pub(crate) fn decode(value: &Value) -> Self {
		match value {
			Value::Null => TypeSequence::default(),
			Value::String(x) => TypeSequence(vec![TypeValue::Name(x.clone())]),
			Value::Array(arr) => TypeSequence(
				arr.iter()
					.map(|x| match x {
						Value::String(x) => TypeValue::Name(x.clone()),
						x => TypeValue::Other(x.clone()),
					})
					.collect()
			),
			x => TypeSequence(vec![TypeValue::Other(x.clone())]),
		}
	}

	/// wire form, always mentioning `canonical`: one entry is emitted bare, more as an array
	pub(crate) fn serialize(&self, canonical: &str) -> Value {
		let mut values : Vec<Value> = self.0.iter().map(TypeValue::encode).collect();
		if !self.contains(canonical) {
			values.push(Value::String(canonical.to_string()));
		}
		if values.len() == 1 {
			values.remove(0)
		} else {
			Value::Array(values)
		}
	}

	pub fn append(&mut self, value: impl Into<TypeValue>) {
		self.0.push(value.into());
	}

	pub fn prepend(&mut self, value: impl Into<TypeValue>) {
		self.0.insert(0, value.into());
	}

	/// indexes past the end append
	pub fn insert(&mut self, index: usize, value: impl Into<TypeValue>) {
		let index = index.min(self.0.len());
		self.0.insert(index, value.into());
	}

	pub fn remove(&mut self, index: usize) -> Option<TypeValue> {
		if index < self.0.len() {
			Some(self.0.remove(index))
		} else {
			None
		}
	}

	pub fn clear(&mut self) {
		self.0.clear();
	}

	pub fn contains(&self, name: &str) -> bool {
		self.names().any(|x| x == name)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.iter().filter_map(TypeValue::as_name)
	}

	pub fn iter(&self) -> impl Iterator<Item = &TypeValue> {
		self.0.iter()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// candidate type names of a wire object, in declaration order
pub(crate) fn type_names(value: &Value) -> Vec<&str> {
	match value.get("type") {
		Some(Value::String(x)) => vec![x.as_str()],
		Some(Value::Array(arr)) => arr.iter().filter_map(Value::as_str).collect(),
		_ => Vec::new(),
	}
}
