//! Display formatting for directory cells

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::codec;

/// Group an amount with thousands separators, keeping at most three decimals
///
/// `85000` becomes `85,000`; `1234.5678` becomes `1,234.568`.
pub fn salary(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int, frac) = match text.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match frac {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `DD MMMM, YYYY`, e.g. `07 March, 2021`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%d %B, %Y").to_string()
}

/// North American phone layout for 10 and 11 digit numbers
///
/// Anything else is returned unchanged.
pub fn phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        11 if digits.starts_with('1') => {
            format!("+1 ({}) {}-{}", &digits[1..4], &digits[4..7], &digits[7..])
        }
        _ => raw.to_string(),
    }
}

/// Data URI for a stored photo
///
/// Photos are usually stored as base64 of the base64 image text, so one
/// layer is peeled off when the decoded bytes are themselves base64 text.
pub fn avatar_uri(photo: &str) -> String {
    let photo = photo.trim();
    let inner = codec::decode(photo)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .filter(|text| !text.trim().is_empty() && codec::decode(text).is_ok());
    let image = inner.as_deref().map(str::trim).unwrap_or(photo);
    format!("data:image/png;base64,{image}")
}
