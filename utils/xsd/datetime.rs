use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

use crate::XsdError;

/// parse an xsd:dateTime. rfc3339 is what everyone sends, but some implementations drop the
/// seconds so `2024-01-01T10:00Z` is accepted too
pub fn parse_date_time(value: &str) -> Result<DateTime<FixedOffset>, XsdError> {
	if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
		return Ok(dt);
	}

	let normalized = match value.strip_suffix(|c: char| c == 'Z' || c == 'z') {
		Some(head) => format!("{head}+00:00"),
		None => value.to_string(),
	};
	DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M%:z")
		.map_err(|_| XsdError::DateTime(value.to_string()))
}

pub fn format_date_time(value: &DateTime<Utc>) -> String {
	value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod test {
	use chrono::{TimeZone, Utc};

	#[test]
	fn rfc3339_is_parsed_with_its_offset() {
		let dt = super::parse_date_time("2024-06-04T17:09:20+02:00").expect("valid rfc3339");
		assert_eq!(dt.with_timezone(&Utc), Utc.with_ymd_and_hms(2024, 6, 4, 15, 9, 20).unwrap());
	}

	#[test]
	fn seconds_may_be_missing() {
		let dt = super::parse_date_time("2024-01-01T10:00Z").expect("minutes precision");
		assert_eq!(dt.with_timezone(&Utc), Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
		let dt = super::parse_date_time("2024-01-01T10:00-01:00").expect("minutes precision with offset");
		assert_eq!(dt.with_timezone(&Utc), Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap());
	}

	#[test]
	fn garbage_is_refused() {
		assert!(super::parse_date_time("yesterday").is_err());
		assert!(super::parse_date_time("2024-01-01").is_err());
	}

	#[test]
	fn formats_in_utc_with_zulu() {
		let dt = Utc.with_ymd_and_hms(2024, 6, 4, 17, 9, 20).unwrap();
		assert_eq!(super::format_date_time(&dt), "2024-06-04T17:09:20Z");
	}
}
