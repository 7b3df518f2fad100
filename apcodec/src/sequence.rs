use serde_json::Value;

use crate::{DecodeError, EncodeError, Node, PropertySchema, Registry};

/// ordered values of a repeatable property
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence(Vec<Node>);

impl Sequence {
	/// wire shape decides cardinality: arrays hold many values, anything else is one value
	pub fn decode(property: &PropertySchema, registry: &Registry, value: &Value) -> Result<Self, DecodeError> {
		match value {
			Value::Array(arr) => {
				let mut out = Vec::with_capacity(arr.len());
				for (i, x) in arr.iter().enumerate() {
					out.push(Node::decode(property, registry, x).map_err(|e| e.at(&i.to_string()))?);
				}
				Ok(Sequence(out))
			},
			x => Ok(Sequence(vec![Node::decode(property, registry, x)?])),
		}
	}

	/// nothing when empty, the bare value when alone, an array otherwise
	pub fn serialize(&self) -> Result<Option<Value>, EncodeError> {
		match self.0.as_slice() {
			[] => Ok(None),
			[x] => Ok(Some(x.serialize()?)),
			values => {
				let mut out = Vec::with_capacity(values.len());
				for (i, x) in values.iter().enumerate() {
					out.push(x.serialize().map_err(|e| e.at(&i.to_string()))?);
				}
				Ok(Some(Value::Array(out)))
			},
		}
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&Node> {
		self.0.get(index)
	}

	pub fn first(&self) -> Option<&Node> {
		self.0.first()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Node> {
		self.0.iter()
	}

	pub fn as_slice(&self) -> &[Node] {
		&self.0
	}

	/// ids of every referenced thing, skipping values without one
	pub fn all_ids(&self) -> Vec<String> {
		self.0.iter()
			.filter_map(|x| Some(x.id().ok()?.to_string()))
			.collect()
	}

	pub(crate) fn append(&mut self, node: Node) {
		self.0.push(node);
	}

	pub(crate) fn prepend(&mut self, node: Node) {
		self.0.insert(0, node);
	}

	pub(crate) fn insert(&mut self, index: usize, node: Node) {
		self.0.insert(index, node);
	}

	pub(crate) fn remove(&mut self, index: usize) -> Option<Node> {
		if index < self.0.len() {
			Some(self.0.remove(index))
		} else {
			None
		}
	}

}

impl From<Vec<Node>> for Sequence {
	fn from(value: Vec<Node>) -> Self {
		Sequence(value)
	}
}

impl FromIterator<Node> for Sequence {
	fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
		Sequence(iter.into_iter().collect())
	}
}

impl IntoIterator for Sequence {
	type Item = Node;
	type IntoIter = std::vec::IntoIter<Node>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a Sequence {
	type Item = &'a Node;
	type IntoIter = std::slice::Iter<'a, Node>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
