use chrono::{DateTime, TimeDelta, Utc};

use crate::{Entity, LanguageTag, MediaType, Node};

impl Entity {
	crate::getter! { actor }
	crate::getter! { object }
	crate::getter! { target }
	crate::getter! { result }
	crate::getter! { origin }
	crate::getter! { instrument }
	crate::getter! { attachment }
	crate::getter! { attributed_to::attributedTo }
	crate::getter! { audience }
	crate::getter! { context }
	crate::getter! { generator }
	crate::getter! { icon }
	crate::getter! { image }
	crate::getter! { in_reply_to::inReplyTo }
	crate::getter! { location }
	crate::getter! { preview }
	crate::getter! { replies }
	crate::getter! { tag }
	crate::getter! { to }
	crate::getter! { bto }
	crate::getter! { cc }
	crate::getter! { bcc }
	crate::getter! { url }
	crate::getter! { items }
	crate::getter! { ordered_items::orderedItems }
	crate::getter! { one_of::oneOf }
	crate::getter! { any_of::anyOf }
	crate::getter! { part_of::partOf }
	crate::getter! { next }
	crate::getter! { prev }
	crate::getter! { first_page::first }
	crate::getter! { last_page::last }
	crate::getter! { current_page::current }
	crate::getter! { likes }
	crate::getter! { shares }
	crate::getter! { inbox }
	crate::getter! { outbox }
	crate::getter! { following }
	crate::getter! { followers }
	crate::getter! { liked }
	crate::getter! { streams }
	crate::getter! { endpoints }
	crate::getter! { source }

	crate::getter! { content -> as_str &str }
	crate::getter! { name -> as_str &str }
	crate::getter! { summary -> as_str &str }
	crate::getter! { preferred_username::preferredUsername -> as_str &str }
	crate::getter! { rel -> as_str &str }
	crate::getter! { units -> as_str &str }
	crate::getter! { published -> as_date_time &DateTime<Utc> }
	crate::getter! { updated -> as_date_time &DateTime<Utc> }
	crate::getter! { start_time::startTime -> as_date_time &DateTime<Utc> }
	crate::getter! { end_time::endTime -> as_date_time &DateTime<Utc> }
	crate::getter! { deleted -> as_date_time &DateTime<Utc> }
	crate::getter! { duration -> as_duration &TimeDelta }
	crate::getter! { media_type::mediaType -> as_media_type &MediaType }
	crate::getter! { hreflang -> as_language_tag &LanguageTag }
	crate::getter! { total_items::totalItems -> as_u64 u64 }
	crate::getter! { start_index::startIndex -> as_u64 u64 }
	crate::getter! { height -> as_u64 u64 }
	crate::getter! { width -> as_u64 u64 }
	crate::getter! { latitude -> as_float f64 }
	crate::getter! { longitude -> as_float f64 }
	crate::getter! { altitude -> as_float f64 }
	crate::getter! { accuracy -> as_float f64 }
	crate::getter! { radius -> as_float f64 }
	crate::getter! { closed -> as_bool bool }

	crate::setter! { actor }
	crate::setter! { object }
	crate::setter! { target }
	crate::setter! { result }
	crate::setter! { origin }
	crate::setter! { instrument }
	crate::setter! { attachment }
	crate::setter! { attributed_to::attributedTo }
	crate::setter! { audience }
	crate::setter! { context }
	crate::setter! { icon }
	crate::setter! { image }
	crate::setter! { in_reply_to::inReplyTo }
	crate::setter! { location }
	crate::setter! { tag }
	crate::setter! { to }
	crate::setter! { bto }
	crate::setter! { cc }
	crate::setter! { bcc }
	crate::setter! { url }
	crate::setter! { items }
	crate::setter! { ordered_items::orderedItems }
	crate::setter! { content }
	crate::setter! { name }
	crate::setter! { summary }

	crate::setter! { single id }
	crate::setter! { single href }
	crate::setter! { single published }
	crate::setter! { single updated }
	crate::setter! { single start_time::startTime }
	crate::setter! { single end_time::endTime }
	crate::setter! { single deleted }
	crate::setter! { single duration }
	crate::setter! { single media_type::mediaType }
	crate::setter! { single replies }
	crate::setter! { single likes }
	crate::setter! { single shares }
	crate::setter! { single part_of::partOf }
	crate::setter! { single next }
	crate::setter! { single prev }
	crate::setter! { single first_page::first }
	crate::setter! { single last_page::last }
	crate::setter! { single total_items::totalItems }
	crate::setter! { single inbox }
	crate::setter! { single outbox }
	crate::setter! { single following }
	crate::setter! { single followers }
	crate::setter! { single preferred_username::preferredUsername }

	#[cfg(feature = "activitypub-miscellaneous-terms")]
	crate::getter! { sensitive -> as_bool bool }
	#[cfg(feature = "activitypub-miscellaneous-terms")]
	crate::getter! { quote_url::quoteUrl -> as_iri &crate::Iri }
	#[cfg(feature = "activitypub-miscellaneous-terms")]
	crate::getter! { manually_approves_followers::manuallyApprovesFollowers -> as_bool bool }
	#[cfg(feature = "activitypub-miscellaneous-terms")]
	crate::getter! { moved_to::movedTo }
	#[cfg(feature = "activitypub-miscellaneous-terms")]
	crate::getter! { also_known_as::alsoKnownAs }
	#[cfg(feature = "activitypub-miscellaneous-terms")]
	crate::setter! { single sensitive }
	#[cfg(feature = "activitypub-miscellaneous-terms")]
	crate::setter! { single quote_url::quoteUrl }
	#[cfg(feature = "activitypub-miscellaneous-terms")]
	crate::setter! { also_known_as::alsoKnownAs }

	#[cfg(feature = "toot")]
	crate::getter! { discoverable -> as_bool bool }
	#[cfg(feature = "toot")]
	crate::getter! { featured }

	/// embedded collection of given property, if it carries a count
	fn total_items_of(&self, property: &str) -> crate::Field<u64> {
		self.first(property)
			.and_then(Node::as_entity)
			.ok_or(crate::MissingField("totalItems"))?
			.total_items()
	}

	pub fn likes_count(&self) -> crate::Field<i32> {
		let x = self.total_items_of("likes")?.min(i32::MAX as u64) as i32;
		Ok(x)
	}

	pub fn shares_count(&self) -> crate::Field<i32> {
		let x = self.total_items_of("shares")?.min(i32::MAX as u64) as i32;
		Ok(x)
	}

	pub fn replies_count(&self) -> crate::Field<i32> {
		let x = self.total_items_of("replies")?.min(i32::MAX as u64) as i32;
		Ok(x)
	}

	/// id of the url of the first image, or of the image itself when it's a bare reference
	pub fn image_url(&self) -> crate::Field<String> {
		let image = self.image().first().ok_or(crate::MissingField("image"))?;
		let id = match image.as_entity() {
			Some(image) => image.url().first().ok_or(crate::MissingField("url"))?.id()?,
			None => image.id()?,
		};
		Ok(id.to_string())
	}

	pub fn icon_url(&self) -> crate::Field<String> {
		let icon = self.icon().first().ok_or(crate::MissingField("icon"))?;
		let id = match icon.as_entity() {
			Some(icon) => icon.url().first().ok_or(crate::MissingField("url"))?.id()?,
			None => icon.id()?,
		};
		Ok(id.to_string())
	}
}
