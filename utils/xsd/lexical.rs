/// scheme of an absolute uri, as in rfc3986 `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`
pub fn uri_scheme(value: &str) -> Option<&str> {
	let (scheme, rest) = value.split_once(':')?;
	let mut chars = scheme.chars();
	if !chars.next()?.is_ascii_alphabetic() { return None }
	if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) { return None }
	if rest.is_empty() { return None }
	Some(scheme)
}

// rfc3987 leaves these out of iris, the url crate only complains about some of them
fn is_iri_char(c: char) -> bool {
	if !c.is_ascii() {
		return !c.is_whitespace() && !c.is_control();
	}
	c.is_ascii_alphanumeric()
		|| matches!(c, '-' | '.' | '_' | '~' | ':' | '/' | '?' | '#' | '[' | ']' | '@'
			| '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=' | '%')
}

fn has_valid_escapes(value: &str) -> bool {
	let bytes = value.as_bytes();
	bytes.iter()
		.enumerate()
		.filter(|(_, b)| **b == b'%')
		.all(|(i, _)| {
			bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
				&& bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit)
		})
}

/// true if value can stand as an xsd:anyURI in activitystreams, which means absolute. the
/// original string is what gets kept, `url` only validates it
pub fn is_any_uri(value: &str) -> bool {
	uri_scheme(value).is_some()
		&& value.chars().all(is_iri_char)
		&& has_valid_escapes(value)
		&& url::Url::parse(value).is_ok()
}

fn is_token(part: &str) -> bool {
	!part.is_empty()
		&& part.chars().all(|c| c.is_ascii_graphic() && !matches!(c, '/' | ';' | '"' | '(' | ')' | ',' | '<' | '>' | '@' | '[' | ']' | '?' | '=' | '\\' | '{' | '}' | ':'))
}

/// rfc2045 media type: `type/subtype`, optionally followed by `;` parameters
pub fn is_media_type(value: &str) -> bool {
	let essence = value.split(';').next().unwrap_or_default().trim();
	match essence.split_once('/') {
		Some((kind, subtype)) => is_token(kind) && is_token(subtype),
		None => false,
	}
}

/// loose bcp47 check: dash separated alphanumeric subtags of 1..=8 chars, the first one
/// alphabetic. registry lookups are out of reach here
pub fn is_language_tag(value: &str) -> bool {
	let mut subtags = value.split('-');
	let Some(primary) = subtags.next() else { return false };
	if primary.is_empty() || primary.len() > 8 || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
		return false;
	}
	subtags.all(|s| !s.is_empty() && s.len() <= 8 && s.chars().all(|c| c.is_ascii_alphanumeric()))
}
