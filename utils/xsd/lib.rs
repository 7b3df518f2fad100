//! parse and format the lexical forms activitystreams borrows from xml schema and a couple
//! of rfcs. everything here works on plain strings, json is somebody else's problem

mod datetime;
mod duration;
mod lexical;

pub use datetime::{format_date_time, parse_date_time};
pub use duration::{format_duration, parse_duration};
pub use lexical::{is_any_uri, is_language_tag, is_media_type, uri_scheme};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XsdError {
	#[error("'{0}' is not an absolute uri")]
	AnyUri(String),

	#[error("'{0}' is not a valid dateTime")]
	DateTime(String),

	#[error("'{input}' is not a valid duration: {reason}")]
	Duration { input: String, reason: &'static str },

	#[error("'{0}' is not a mime media type")]
	MediaType(String),

	#[error("'{0}' is not a bcp47 language tag")]
	LanguageTag(String),
}
