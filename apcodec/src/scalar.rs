use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;

use crate::ShapeMismatch;

crate::macros::lexical! {
	/// absolute iri, kept exactly as it came off the wire
	pub struct Iri => xsd::is_any_uri, xsd::XsdError::AnyUri;

	/// rfc2045 media type such as `text/html`
	pub struct MediaType => xsd::is_media_type, xsd::XsdError::MediaType;

	/// bcp47 language tag such as `en-US`
	pub struct LanguageTag => xsd::is_language_tag, xsd::XsdError::LanguageTag;
}

impl Iri {
	pub fn scheme(&self) -> &str {
		xsd::uri_scheme(&self.0).unwrap_or_default()
	}
}

// largest integer an f64 holds exactly, 2^53
const MAX_SAFE_INTEGER : f64 = 9_007_199_254_740_992.0;

/// primitive kinds a property range can list, named as in vocabulary documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
	String,
	AnyUri,
	DateTime,
	Duration,
	Float,
	MediaType,
	Boolean,
	NonNegativeInteger,
	LanguageTag,
}

impl ScalarKind {
	pub const ALL : [ScalarKind; 9] = [
		ScalarKind::String,
		ScalarKind::AnyUri,
		ScalarKind::DateTime,
		ScalarKind::Duration,
		ScalarKind::Float,
		ScalarKind::MediaType,
		ScalarKind::Boolean,
		ScalarKind::NonNegativeInteger,
		ScalarKind::LanguageTag,
	];

	pub fn name(self) -> &'static str {
		match self {
			ScalarKind::String => "string",
			ScalarKind::AnyUri => "anyURI",
			ScalarKind::DateTime => "dateTime",
			ScalarKind::Duration => "duration",
			ScalarKind::Float => "float",
			ScalarKind::MediaType => "mimeType",
			ScalarKind::Boolean => "boolean",
			ScalarKind::NonNegativeInteger => "nonNegativeInteger",
			ScalarKind::LanguageTag => "bcp47",
		}
	}

	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|k| k.name() == name)
	}

	/// read a wire value as this kind. composites (arrays, objects) never decode as scalars
	pub fn decode(self, value: &Value) -> Result<Scalar, ShapeMismatch> {
		let decoded = match self {
			ScalarKind::String => value.as_str().map(|x| Scalar::String(x.to_string())),
			ScalarKind::AnyUri => value.as_str()
				.and_then(|x| Iri::parse(x).ok())
				.map(Scalar::Iri),
			ScalarKind::DateTime => value.as_str()
				.and_then(|x| xsd::parse_date_time(x).ok())
				.map(|x| Scalar::DateTime(x.with_timezone(&Utc))),
			ScalarKind::Duration => value.as_str()
				.and_then(|x| xsd::parse_duration(x).ok())
				.map(Scalar::Duration),
			ScalarKind::Float => value.as_f64().map(Scalar::Float),
			ScalarKind::MediaType => value.as_str()
				.and_then(|x| MediaType::parse(x).ok())
				.map(Scalar::MediaType),
			ScalarKind::Boolean => match value {
				Value::Bool(x) => Some(Scalar::Boolean(*x)),
				Value::Number(n) => match n.as_u64() {
					Some(0) => Some(Scalar::Boolean(false)),
					Some(1) => Some(Scalar::Boolean(true)),
					_ => None,
				},
				_ => None,
			},
			ScalarKind::NonNegativeInteger => value.as_u64().map(Scalar::NonNegativeInteger),
			ScalarKind::LanguageTag => value.as_str()
				.and_then(|x| LanguageTag::parse(x).ok())
				.map(Scalar::LanguageTag),
		};
		decoded.ok_or_else(|| ShapeMismatch::new(self.name(), value))
	}
}

impl AsRef<str> for ScalarKind {
	fn as_ref(&self) -> &str {
		self.name()
	}
}

impl std::fmt::Display for ScalarKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// a decoded primitive value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	String(String),
	Iri(Iri),
	DateTime(DateTime<Utc>),
	Duration(TimeDelta),
	Float(f64),
	MediaType(MediaType),
	Boolean(bool),
	NonNegativeInteger(u64),
	LanguageTag(LanguageTag),
}

/// integral values within 2^53 go out as json integers, so `5.0` is emitted as `5`: that is
/// the canonical wire form of floats here, and decoding reads both back as the same f64
fn encode_float(x: f64) -> Value {
	if !x.is_finite() {
		tracing::warn!("json can't represent {x}, encoding null");
		return Value::Null;
	}
	if x.fract() == 0.0 && x.abs() <= MAX_SAFE_INTEGER {
		return Value::from(x as i64);
	}
	serde_json::Number::from_f64(x)
		.map(Value::Number)
		.unwrap_or(Value::Null)
}

impl Scalar {
	pub fn kind(&self) -> ScalarKind {
		match self {
			Scalar::String(_) => ScalarKind::String,
			Scalar::Iri(_) => ScalarKind::AnyUri,
			Scalar::DateTime(_) => ScalarKind::DateTime,
			Scalar::Duration(_) => ScalarKind::Duration,
			Scalar::Float(_) => ScalarKind::Float,
			Scalar::MediaType(_) => ScalarKind::MediaType,
			Scalar::Boolean(_) => ScalarKind::Boolean,
			Scalar::NonNegativeInteger(_) => ScalarKind::NonNegativeInteger,
			Scalar::LanguageTag(_) => ScalarKind::LanguageTag,
		}
	}

	/// wire form of this value, never fails
	pub fn encode(&self) -> Value {
		match self {
			Scalar::String(x) => Value::String(x.clone()),
			Scalar::Iri(x) => Value::String(x.to_string()),
			Scalar::DateTime(x) => Value::String(xsd::format_date_time(x)),
			Scalar::Duration(x) => Value::String(xsd::format_duration(x)),
			Scalar::Float(x) => encode_float(*x),
			Scalar::MediaType(x) => Value::String(x.to_string()),
			Scalar::Boolean(x) => Value::Bool(*x),
			Scalar::NonNegativeInteger(x) => Value::from(*x),
			Scalar::LanguageTag(x) => Value::String(x.to_string()),
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Scalar::String(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_iri(&self) -> Option<&Iri> {
		match self {
			Scalar::Iri(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_date_time(&self) -> Option<&DateTime<Utc>> {
		match self {
			Scalar::DateTime(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_duration(&self) -> Option<&TimeDelta> {
		match self {
			Scalar::Duration(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			Scalar::Float(x) => Some(*x),
			_ => None,
		}
	}

	pub fn as_media_type(&self) -> Option<&MediaType> {
		match self {
			Scalar::MediaType(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Scalar::Boolean(x) => Some(*x),
			_ => None,
		}
	}

	pub fn as_u64(&self) -> Option<u64> {
		match self {
			Scalar::NonNegativeInteger(x) => Some(*x),
			_ => None,
		}
	}

	pub fn as_language_tag(&self) -> Option<&LanguageTag> {
		match self {
			Scalar::LanguageTag(x) => Some(x),
			_ => None,
		}
	}
}

impl From<String> for Scalar {
	fn from(value: String) -> Self {
		Scalar::String(value)
	}
}

impl From<Iri> for Scalar {
	fn from(value: Iri) -> Self {
		Scalar::Iri(value)
	}
}

impl From<DateTime<Utc>> for Scalar {
	fn from(value: DateTime<Utc>) -> Self {
		Scalar::DateTime(value)
	}
}

impl From<TimeDelta> for Scalar {
	fn from(value: TimeDelta) -> Self {
		Scalar::Duration(value)
	}
}

impl From<f64> for Scalar {
	fn from(value: f64) -> Self {
		Scalar::Float(value)
	}
}

impl From<MediaType> for Scalar {
	fn from(value: MediaType) -> Self {
		Scalar::MediaType(value)
	}
}

impl From<bool> for Scalar {
	fn from(value: bool) -> Self {
		Scalar::Boolean(value)
	}
}

impl From<u64> for Scalar {
	fn from(value: u64) -> Self {
		Scalar::NonNegativeInteger(value)
	}
}

impl From<LanguageTag> for Scalar {
	fn from(value: LanguageTag) -> Self {
		Scalar::LanguageTag(value)
	}
}

/// language tag -> text, sent beside a textual property as its `<name>Map` key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NaturalLanguageMap(BTreeMap<String, String>);

impl NaturalLanguageMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// entries that aren't strings get dropped, the rest of the map survives
	pub fn decode(value: &Value) -> Result<Self, ShapeMismatch> {
		let Value::Object(map) = value else {
			return Err(ShapeMismatch::new("natural language map", value));
		};
		let mut out = BTreeMap::new();
		for (tag, text) in map {
			match text.as_str() {
				Some(text) => { out.insert(tag.clone(), text.to_string()); },
				None => tracing::warn!("dropping non-string entry '{tag}' from natural language map"),
			}
		}
		Ok(NaturalLanguageMap(out))
	}

	pub fn encode(&self) -> Value {
		Value::Object(
			self.0.iter()
				.map(|(tag, text)| (tag.clone(), Value::String(text.clone())))
				.collect()
		)
	}

	pub fn insert(&mut self, tag: impl ToString, text: impl ToString) -> Option<String> {
		self.0.insert(tag.to_string(), text.to_string())
	}

	pub fn get(&self, tag: &str) -> Option<&str> {
		self.0.get(tag).map(|x| x.as_str())
	}

	pub fn remove(&mut self, tag: &str) -> Option<String> {
		self.0.remove(tag)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

impl<K: ToString, V: ToString> FromIterator<(K, V)> for NaturalLanguageMap {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		NaturalLanguageMap(
			iter.into_iter()
				.map(|(k, v)| (k.to_string(), v.to_string()))
				.collect()
		)
	}
}

#[cfg(test)]
mod test {
	use chrono::{TimeDelta, TimeZone, Utc};
	use serde_json::json;

	use super::{Iri, NaturalLanguageMap, Scalar, ScalarKind};

	#[test]
	fn kinds_roundtrip_their_names() {
		for kind in ScalarKind::ALL {
			assert_eq!(ScalarKind::from_name(kind.name()), Some(kind));
		}
		assert_eq!(ScalarKind::from_name("Object"), None);
	}

	#[test]
	fn composites_never_decode_as_scalars() {
		for kind in ScalarKind::ALL {
			assert!(kind.decode(&json!({ "a": 1 })).is_err(), "{kind} accepted an object");
			assert!(kind.decode(&json!(["https://x/1"])).is_err(), "{kind} accepted an array");
			assert!(kind.decode(&json!(null)).is_err(), "{kind} accepted null");
		}
	}

	#[test]
	fn strings_decode_by_lexical_form() {
		assert_eq!(
			ScalarKind::AnyUri.decode(&json!("https://a.example/alice")).unwrap(),
			Scalar::Iri(Iri::parse("https://a.example/alice").unwrap()),
		);
		assert!(ScalarKind::AnyUri.decode(&json!("not-a-number-or-uri")).is_err());
		assert_eq!(
			ScalarKind::DateTime.decode(&json!("2024-06-04T17:09:20Z")).unwrap(),
			Scalar::DateTime(Utc.with_ymd_and_hms(2024, 6, 4, 17, 9, 20).unwrap()),
		);
		assert_eq!(
			ScalarKind::Duration.decode(&json!("PT5S")).unwrap(),
			Scalar::Duration(TimeDelta::try_seconds(5).unwrap()),
		);
		assert!(ScalarKind::MediaType.decode(&json!("text/html")).is_ok());
		assert!(ScalarKind::MediaType.decode(&json!("html")).is_err());
		assert!(ScalarKind::LanguageTag.decode(&json!("en-US")).is_ok());
	}

	#[test]
	fn float_refuses_strings() {
		let err = ScalarKind::Float.decode(&json!("12.5")).unwrap_err();
		assert_eq!(err.expected, "float");
		assert_eq!(err.found, "string");
		assert_eq!(ScalarKind::Float.decode(&json!(12.5)).unwrap(), Scalar::Float(12.5));
	}

	#[test]
	fn integral_floats_encode_as_integers() {
		assert_eq!(Scalar::Float(5.0).encode(), json!(5));
		assert_eq!(Scalar::Float(5.5).encode(), json!(5.5));
		assert_eq!(Scalar::Float(f64::NAN).encode(), json!(null));
		let decoded = ScalarKind::Float.decode(&json!(5.0)).unwrap();
		assert_eq!(decoded, ScalarKind::Float.decode(&json!(5)).unwrap());
		assert_eq!(decoded.encode(), json!(5));
	}

	#[test]
	fn booleans_accept_zero_and_one() {
		assert_eq!(ScalarKind::Boolean.decode(&json!(true)).unwrap(), Scalar::Boolean(true));
		assert_eq!(ScalarKind::Boolean.decode(&json!(0)).unwrap(), Scalar::Boolean(false));
		assert!(ScalarKind::Boolean.decode(&json!(2)).is_err());
	}

	#[test]
	fn non_negative_integers_refuse_negatives() {
		assert_eq!(ScalarKind::NonNegativeInteger.decode(&json!(42)).unwrap(), Scalar::NonNegativeInteger(42));
		assert!(ScalarKind::NonNegativeInteger.decode(&json!(-1)).is_err());
		assert!(ScalarKind::NonNegativeInteger.decode(&json!(1.5)).is_err());
	}

	#[test]
	fn language_maps_drop_non_string_entries() {
		let map = NaturalLanguageMap::decode(&json!({ "en": "Hello", "fr": "Bonjour", "de": 3 })).unwrap();
		assert_eq!(map.len(), 2);
		assert_eq!(map.get("fr"), Some("Bonjour"));
		assert_eq!(map.encode(), json!({ "en": "Hello", "fr": "Bonjour" }));
		assert!(NaturalLanguageMap::decode(&json!("Hello")).is_err());
	}
}
