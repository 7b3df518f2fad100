use pretty_assertions::assert_eq;
use serde_json::json;

use apcodec::{DecodeError, EncodeError, Entity, Node, Registry, Scalar};

fn decode(value: serde_json::Value) -> Entity {
	Registry::global().decode(&value).expect("valid entity")
}

fn roundtrip(value: serde_json::Value) {
	let entity = decode(value.clone());
	let serialized = entity.serialize().expect("serializable entity");
	assert_eq!(serialized, value);
	assert_eq!(decode(serialized), entity);
}

#[test]
fn announce_with_iri_references() {
	let wire = json!({
		"type": "Announce",
		"actor": "https://a.example/alice",
		"object": "https://b.example/note/1",
	});
	let announce = decode(wire.clone());
	assert_eq!(announce.schema().name(), "Announce");
	assert_eq!(announce.actor().len(), 1);
	assert_eq!(announce.actor()[0].as_iri().map(|x| x.as_str()), Some("https://a.example/alice"));
	assert_eq!(announce.object().len(), 1);
	assert_eq!(announce.object()[0].as_iri().map(|x| x.as_str()), Some("https://b.example/note/1"));
	assert_eq!(announce.serialize().unwrap(), wire);
}

#[test]
fn addressing_order_is_preserved() {
	let wire = json!({"type": "Announce", "to": ["https://x/1", "https://x/2"]});
	let announce = decode(wire.clone());
	let to : Vec<&str> = announce.to().iter().filter_map(|x| x.id().ok()).collect();
	assert_eq!(to, vec!["https://x/1", "https://x/2"]);
	assert_eq!(announce.serialize().unwrap(), wire);
}

#[test]
fn natural_language_maps_survive() {
	let wire = json!({"type": "Announce", "nameMap": {"en": "Hello", "fr": "Bonjour"}});
	let announce = decode(wire.clone());
	let map = announce.lang_map("name").expect("nameMap was decoded");
	assert_eq!(map.len(), 2);
	assert_eq!(map.get("en"), Some("Hello"));
	assert_eq!(map.get("fr"), Some("Bonjour"));
	assert!(announce.unknown("nameMap").is_none());
	assert_eq!(announce.serialize().unwrap(), wire);
}

#[test]
fn plain_value_and_language_map_coexist() {
	roundtrip(json!({
		"type": "Note",
		"content": "hello",
		"contentMap": {"en": "hello", "it": "ciao"},
	}));
}

#[test]
fn non_string_map_entries_are_dropped() {
	let note = decode(json!({"type": "Note", "summaryMap": {"en": "hi", "de": 3}}));
	assert_eq!(note.serialize().unwrap(), json!({"type": "Note", "summaryMap": {"en": "hi"}}));
}

#[test]
fn unrecognized_keys_are_kept() {
	let wire = json!({"type": "Announce", "customExt": {"foo": 1}});
	let announce = decode(wire.clone());
	assert_eq!(announce.unknown("customExt"), Some(&json!({"foo": 1})));
	assert_eq!(announce.serialize().unwrap(), wire);
}

#[test]
fn unmatched_values_fall_through_to_unknown() {
	let wire = json!({"type": "Announce", "altitude": "not-a-number-or-uri"});
	let announce = decode(wire.clone());
	assert_eq!(announce.get("altitude"), &[Node::Unknown(json!("not-a-number-or-uri"))]);
	assert!(announce.unknown("altitude").is_none());
	assert_eq!(announce.serialize().unwrap(), wire);
}

#[test]
fn context_is_ignored() {
	let announce = decode(json!({
		"@context": ["https://www.w3.org/ns/activitystreams", {"sensitive": "as:sensitive"}],
		"type": "Announce",
		"actor": "https://a.example/alice",
	}));
	assert!(announce.unknown("@context").is_none());
	assert_eq!(announce.serialize().unwrap(), json!({"type": "Announce", "actor": "https://a.example/alice"}));
}

#[test]
fn single_values_collapse() {
	let note = decode(json!({"type": "Note", "to": ["https://x/1"], "cc": "https://x/2"}));
	assert_eq!(note.serialize().unwrap(), json!({"type": "Note", "to": "https://x/1", "cc": "https://x/2"}));

	let note = Registry::global().create("Note").unwrap()
		.add_to(Node::iri("https://x/1").unwrap())
		.add_to(Node::iri("https://x/2").unwrap());
	assert_eq!(note.serialize().unwrap(), json!({"type": "Note", "to": ["https://x/1", "https://x/2"]}));
}

#[test]
fn type_lists_collapse_independently() {
	roundtrip(json!({"type": ["Note", "https://example.org/ns#Status"], "to": "https://x/1"}));
	roundtrip(json!({"type": "Note", "to": ["https://x/1", "https://x/2"]}));
}

#[test]
fn canonical_type_is_always_emitted() {
	let mut note = Registry::global().create("Note").unwrap();
	note.types_mut().clear();
	assert_eq!(note.serialize().unwrap(), json!({"type": "Note"}));

	let note = decode(json!({"type": ["https://example.org/ns#Status", "Note"], "name": "hi"}));
	assert_eq!(note.schema().name(), "Note");
	assert_eq!(note.serialize().unwrap()["type"], json!(["https://example.org/ns#Status", "Note"]));
}

#[test]
fn nested_entities_roundtrip() {
	roundtrip(json!({
		"id": "https://a.example/activities/1",
		"type": "Create",
		"actor": {
			"id": "https://a.example/alice",
			"type": "Person",
			"inbox": "https://a.example/alice/inbox",
			"outbox": "https://a.example/alice/outbox",
			"preferredUsername": "alice",
			"icon": {"type": "Image", "mediaType": "image/png", "url": "https://a.example/alice.png"},
		},
		"object": {
			"id": "https://a.example/notes/1",
			"type": "Note",
			"attributedTo": "https://a.example/alice",
			"content": "<p>hello <a href=\"https://b.example/bob\">@bob</a></p>",
			"published": "2024-06-04T17:09:20Z",
			"tag": [
				{"type": "Mention", "href": "https://b.example/bob", "name": "@bob"},
				{"type": "Florp", "flavor": "strange"},
			],
			"to": ["https://b.example/bob", "https://www.w3.org/ns/activitystreams#Public"],
			"sensitive": false,
			"likes": {"type": "Collection", "totalItems": 3},
		},
		"to": ["https://b.example/bob", "https://www.w3.org/ns/activitystreams#Public"],
		"unexpected": [1, {"nested": null}],
	}));
}

#[test]
fn scalars_roundtrip_in_canonical_form() {
	roundtrip(json!({
		"type": "Place",
		"name": "Fresno Area",
		"latitude": 36.75,
		"longitude": 119,
		"altitude": -12.5,
		"radius": 15,
		"units": "miles",
	}));
	roundtrip(json!({
		"type": "Question",
		"oneOf": [{"type": "Note", "name": "yes"}, {"type": "Note", "name": "no"}],
		"closed": "2024-01-01T00:00:00Z",
	}));
	roundtrip(json!({"type": "Video", "duration": "PT1H2M3S", "width": 1920, "height": 1080}));
}

#[test]
fn scalar_alternatives_follow_priority() {
	let question = decode(json!({"type": "Question", "closed": true}));
	assert_eq!(question.closed(), Ok(true));

	let question = decode(json!({"type": "Question", "closed": "2024-01-01T00:00:00Z"}));
	assert!(matches!(question.first("closed"), Some(Node::Scalar(Scalar::DateTime(_)))));

	let question = decode(json!({"type": "Question", "closed": "https://x/closer"}));
	assert!(question.first("closed").is_some_and(Node::is_iri));
}

#[test]
fn builder_setters_keep_one_alternative() {
	let note = Registry::global().create("Note").unwrap()
		.set_url(Node::iri("https://x/1").unwrap())
		.set_url(Registry::global().create("Link").unwrap().set_href(Node::iri("https://x/2").unwrap()));
	assert_eq!(note.url().len(), 1);
	assert!(note.url()[0].is_entity());
	assert_eq!(note.url()[0].id(), Ok("https://x/2"));
}

#[test]
fn objects_given_to_scalar_properties_are_errors() {
	let err = Registry::global()
		.decode(&json!({"type": "Note", "published": {"type": "Note"}}))
		.unwrap_err();
	assert_eq!(err.path(), "published");
	assert_eq!(err.root(), &DecodeError::WrongShape { expected: "dateTime", found: "object" });
}

#[test]
fn nested_errors_carry_their_path() {
	let err = Registry::global()
		.decode(&json!({
			"type": "Create",
			"object": {
				"type": "Note",
				"tag": ["#one", {"type": "Mention", "mediaType": {"weird": true}}],
			},
		}))
		.unwrap_err();
	assert_eq!(err.path(), "object.tag.1.mediaType");
	assert!(matches!(err.root(), DecodeError::WrongShape { .. }));
}

#[test]
fn top_level_decode_needs_a_known_type() {
	assert_eq!(
		Registry::global().decode(&json!({"type": "Florp"})),
		Err(DecodeError::UnresolvedType(vec!["Florp".to_string()]))
	);
	assert_eq!(
		Registry::global().decode(&json!({"type": "Actor"})),
		Err(DecodeError::UnresolvedType(vec!["Actor".to_string()]))
	);
	assert_eq!(Registry::global().decode(&json!("Note")), Err(DecodeError::NotAnObject("string")));
}

#[test]
fn serialization_is_stable() {
	let note = decode(json!({
		"type": "Note",
		"zzz": 1,
		"to": "https://x/1",
		"content": "a",
		"id": "https://x/notes/1",
		"nameMap": {"en": "n"},
		"name": "n",
	}));
	let first = serde_json::to_string(&note).unwrap();
	let second = serde_json::to_string(&note).unwrap();
	assert_eq!(first, second);
}

#[test]
fn custom_vocabularies_extend_the_builtin_one() {
	let mut vocabulary = apcodec::Vocabulary::activitystreams();
	vocabulary.merge(apcodec::Vocabulary::from_toml(r#"
		[properties.mood]
		range = ["string"]
		functional = true

		[types.Object]
		properties = ["mood"]

		[types.Status]
		extends = ["Note"]
	"#).unwrap());
	let registry = Registry::new(&vocabulary).unwrap();
	let status = registry.decode(&json!({"type": "Status", "mood": "cheerful", "content": "hi"})).unwrap();
	assert_eq!(status.first("mood").and_then(Node::as_str), Some("cheerful"));
	assert!(status.unknown("mood").is_none());
	assert_eq!(status.serialize().unwrap(), json!({"type": "Status", "content": "hi", "mood": "cheerful"}));

	let announce = registry.decode(&json!({"type": "Announce", "object": {"type": "Status", "mood": "meh"}})).unwrap();
	assert_eq!(announce.object()[0].as_entity().map(|x| x.schema().name()), Some("Status"));
}

#[test]
fn malformed_iris_fall_through_to_unknown() {
	for bad in ["https://exa<mple.org/", "https://x/%zz", "https://[::1/", "http:{}"] {
		let note = decode(json!({"type": "Note", "to": bad}));
		assert_eq!(note.to(), &[Node::Unknown(json!(bad))], "{bad} was taken for an iri");
		assert_eq!(note.serialize().unwrap(), json!({"type": "Note", "to": bad}));
		assert!(Node::iri(bad).is_err());
	}
	let place = decode(json!({"type": "Place", "altitude": "https://x/%zz"}));
	assert!(place.first("altitude").is_some_and(Node::is_unknown));
}

#[test]
fn iris_keep_their_original_spelling() {
	roundtrip(json!({"type": "Note", "to": ["HTTPS://X.example:443/a/../b", "https://x/café"]}));
}

#[test]
fn nested_serialization_failures_abort_the_parent() {
	let mut note = Registry::global().create("Note").unwrap()
		.set_content("hello".to_string());
	note.set_unknown("content", json!("shadow"));
	let create = Registry::global().create("Create").unwrap()
		.set_object(note);
	let err = create.serialize().unwrap_err();
	assert_eq!(
		err,
		EncodeError::Property {
			property: "object".to_string(),
			source: Box::new(EncodeError::DuplicateKey("content".to_string())),
		}
	);
}
