use chrono::TimeDelta;

use crate::XsdError;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
// calendar units have no fixed length: approximate them like everybody else does
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// split `3Y2M` into `[("3", 'Y'), ("2", 'M')]`, enforcing designator order
fn components<'a>(part: &'a str, designators: &[char]) -> Result<Vec<(&'a str, char)>, &'static str> {
	let mut out = Vec::new();
	let mut allowed = designators;
	let mut start = 0;
	for (i, c) in part.char_indices() {
		if c.is_ascii_digit() || c == '.' { continue }
		let pos = allowed.iter()
			.position(|d| *d == c)
			.ok_or("unknown or out of order designator")?;
		allowed = &allowed[pos + 1..];
		let amount = &part[start..i];
		if amount.is_empty() { return Err("designator without amount") }
		out.push((amount, c));
		start = i + c.len_utf8();
	}
	if start != part.len() { return Err("amount without designator") }
	Ok(out)
}

fn whole(amount: &str) -> Result<i64, &'static str> {
	if !amount.chars().all(|c| c.is_ascii_digit()) {
		return Err("only seconds can be fractional");
	}
	amount.parse().map_err(|_| "amount out of range")
}

fn fractional(amount: &str) -> Result<(i64, u32), &'static str> {
	let Some((secs, frac)) = amount.split_once('.') else { return Ok((whole(amount)?, 0)) };
	if secs.is_empty() || frac.is_empty() || !frac.chars().all(|c| c.is_ascii_digit()) {
		return Err("malformed fractional seconds");
	}
	let digits : String = frac.chars().chain(std::iter::repeat('0')).take(9).collect();
	let nanos = digits.parse().map_err(|_| "malformed fractional seconds")?;
	Ok((whole(secs)?, nanos))
}

/// parse an xsd:duration like `P1DT2H` or `-PT0.5S` into a signed time span
pub fn parse_duration(value: &str) -> Result<TimeDelta, XsdError> {
	let err = |reason| XsdError::Duration { input: value.to_string(), reason };

	let (negative, body) = match value.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, value),
	};
	let body = body.strip_prefix('P').ok_or_else(|| err("missing 'P' designator"))?;
	let (date, time) = match body.split_once('T') {
		Some((date, time)) => (date, Some(time)),
		None => (body, None),
	};
	if time == Some("") { return Err(err("'T' without time components")) }
	if date.is_empty() && time.is_none() { return Err(err("no components")) }

	let mut seconds : i64 = 0;
	let mut nanos : u32 = 0;
	let mut add = |amount: i64, unit: i64| -> Result<(), &'static str> {
		seconds = amount.checked_mul(unit)
			.and_then(|x| seconds.checked_add(x))
			.ok_or("duration out of range")?;
		Ok(())
	};

	for (amount, designator) in components(date, &['Y', 'M', 'D']).map_err(err)? {
		let unit = match designator {
			'Y' => YEAR,
			'M' => MONTH,
			_ => DAY,
		};
		add(whole(amount).map_err(err)?, unit).map_err(err)?;
	}

	for (amount, designator) in components(time.unwrap_or_default(), &['H', 'M', 'S']).map_err(err)? {
		match designator {
			'H' => add(whole(amount).map_err(err)?, HOUR).map_err(err)?,
			'M' => add(whole(amount).map_err(err)?, MINUTE).map_err(err)?,
			_ => {
				let (secs, frac) = fractional(amount).map_err(err)?;
				add(secs, 1).map_err(err)?;
				nanos = frac;
			},
		}
	}

	let delta = TimeDelta::new(seconds, nanos).ok_or_else(|| err("duration out of range"))?;
	Ok(if negative { -delta } else { delta })
}

/// format a time span as xsd:duration, using days as the largest unit
pub fn format_duration(value: &TimeDelta) -> String {
	let negative = *value < TimeDelta::zero();
	let span = if negative { -*value } else { *value };
	let total = span.num_seconds();
	let nanos = span.subsec_nanos();

	let days = total / DAY;
	let hours = (total % DAY) / HOUR;
	let minutes = (total % HOUR) / MINUTE;
	let secs = total % MINUTE;

	let mut out = String::new();
	if negative { out.push('-') }
	out.push('P');
	if days > 0 {
		out.push_str(&format!("{days}D"));
	}
	if hours > 0 || minutes > 0 || secs > 0 || nanos > 0 {
		out.push('T');
		if hours > 0 { out.push_str(&format!("{hours}H")) }
		if minutes > 0 { out.push_str(&format!("{minutes}M")) }
		if nanos > 0 {
			let frac = format!("{nanos:09}");
			out.push_str(&format!("{secs}.{}S", frac.trim_end_matches('0')));
		} else if secs > 0 {
			out.push_str(&format!("{secs}S"));
		}
	} else if days == 0 {
		out.push_str("T0S");
	}
	out
}
