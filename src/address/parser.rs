//! Free-text and CSV address parsing.
//!
//! Turns one-line addresses like `"Jane Doe, 123 Main St, Phoenix AZ 85001"`
//! into [`Address`] values, and normalizes CSV column headings to the
//! friendly field names the resolver accepts.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::address::{Address, AddressError};

/// 2-letter state code followed by a 5 or 9 digit ZIP, anchored at the end
/// of a segment.
static STATE_ZIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]{2})\s+(\d{5}(?:-\d{4})?)\s*$").expect("valid regex"));

static ZIP_ONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("valid regex"));

static STATE_ONLY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid regex"));

/// Parses a free-form address string.
///
/// Accepted formats:
///
/// ```text
/// Jane Doe, 123 Main St, Phoenix AZ 85001
/// Jane Doe, Acme Inc, 123 Main St, Apt 4B, Phoenix AZ 85001
/// Jane Doe, 123 Main St, Phoenix, AZ, 85001
/// ```
///
/// The first comma-separated segment is always the name. The city/state/zip
/// tail is located by searching segments from the end for a
/// `STATE 12345` pattern (or a trailing `City, ST, 12345` triple). Whatever
/// sits between name and tail is street and, when more than one segment
/// remains, company/second street line: a segment starting with a digit is
/// taken as a street line, otherwise as the company name.
///
/// # Errors
///
/// Returns [`AddressError::Parse`] when fewer than three segments are
/// present, when no city/state/zip tail can be found, or when no street
/// segment remains.
pub fn parse_address(input: &str) -> Result<Address, AddressError> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();

    if parts.len() < 3 {
        return Err(AddressError::Parse {
            input: input.to_string(),
            reason: "expected at least 'Name, Street, City State Zip'".to_string(),
        });
    }

    let mut name_parts = parts[0].splitn(2, char::is_whitespace);
    let first_name = name_parts.next().unwrap_or_default().to_string();
    let last_name = name_parts.next().unwrap_or_default().trim().to_string();

    let tail = extract_city_state_zip(&parts[1..]).ok_or_else(|| AddressError::Parse {
        input: input.to_string(),
        reason: "cannot find city/state/zip; expected 'Name, Street, City STATE ZIP'".to_string(),
    })?;

    let mut address = Address::new(
        first_name,
        last_name,
        String::new(),
        tail.city,
        tail.state,
        tail.zip,
    );

    // Everything between name and tail is street plus optional company.
    match tail.preceding.as_slice() {
        [street1] => address.street1 = (*street1).to_string(),
        [first, second] => {
            // Leading digit means a street line, not a company name.
            if first.starts_with(|c: char| c.is_ascii_digit()) {
                address.street1 = (*first).to_string();
                address.street2 = Some((*second).to_string());
            } else {
                address.company = Some((*first).to_string());
                address.street1 = (*second).to_string();
            }
        }
        [company, street1, street2, ..] => {
            address.company = Some((*company).to_string());
            address.street1 = (*street1).to_string();
            address.street2 = Some((*street2).to_string());
        }
        [] => {
            return Err(AddressError::Parse {
                input: input.to_string(),
                reason: "no street segment found".to_string(),
            });
        }
    }

    Ok(address)
}

struct CityStateZip<'a> {
    city: String,
    state: String,
    zip: String,
    preceding: Vec<&'a str>,
}

/// Finds the city, state, and zip among comma-separated segments.
///
/// Handles `["123 Main St", "Phoenix AZ 85001"]`,
/// `["123 Main St", "Phoenix", "AZ 85001"]`, and
/// `["123 Main St", "Phoenix", "AZ", "85001"]`.
fn extract_city_state_zip<'a>(parts: &[&'a str]) -> Option<CityStateZip<'a>> {
    // Search from the end for a state+zip pattern.
    for i in (0..parts.len()).rev() {
        if let Some(caps) = STATE_ZIP_RE.captures(parts[i]) {
            let full = caps.get(0)?;
            let state = caps[1].to_string();
            let zip = caps[2].to_string();
            let city_part = parts[i][..full.start()].trim().trim_end_matches(',').trim();

            // City may live in this segment or the preceding one.
            if !city_part.is_empty() {
                return Some(CityStateZip {
                    city: city_part.to_string(),
                    state,
                    zip,
                    preceding: parts[..i].to_vec(),
                });
            }
            if i > 0 {
                return Some(CityStateZip {
                    city: parts[i - 1].trim().to_string(),
                    state,
                    zip,
                    preceding: parts[..i - 1].to_vec(),
                });
            }
            return None;
        }
    }

    // Fallback: trailing `City, ST, 12345` as three separate segments.
    if parts.len() >= 3 {
        let maybe_zip = parts[parts.len() - 1].trim();
        let maybe_state = parts[parts.len() - 2].trim();
        if ZIP_ONLY_RE.is_match(maybe_zip) && STATE_ONLY_RE.is_match(maybe_state) {
            return Some(CityStateZip {
                city: parts[parts.len() - 3].trim().to_string(),
                state: maybe_state.to_string(),
                zip: maybe_zip.to_string(),
                preceding: parts[..parts.len() - 3].to_vec(),
            });
        }
    }

    None
}

/// Known CSV column aliases, lowercased → friendly field name.
const CSV_HEADER_ALIASES: [(&str, &str); 35] = [
    ("first_name", "firstName"),
    ("firstname", "firstName"),
    ("first name", "firstName"),
    ("fname", "firstName"),
    ("last_name", "lastName"),
    ("lastname", "lastName"),
    ("last name", "lastName"),
    ("lname", "lastName"),
    ("street", "street1"),
    ("address", "street1"),
    ("address1", "street1"),
    ("address_1", "street1"),
    ("street_1", "street1"),
    ("street1", "street1"),
    ("address2", "street2"),
    ("address_2", "street2"),
    ("street_2", "street2"),
    ("street2", "street2"),
    ("apt", "street2"),
    ("unit", "street2"),
    ("suite", "street2"),
    ("city", "city"),
    ("state", "state"),
    ("province", "state"),
    ("st", "state"),
    ("zip", "zip"),
    ("zipcode", "zip"),
    ("zip_code", "zip"),
    ("postal", "zip"),
    ("postal_code", "zip"),
    ("postalcode", "zip"),
    ("company", "company"),
    ("organization", "company"),
    ("org", "company"),
    ("country", "country"),
];

fn normalize_header(header: &str) -> String {
    let trimmed = header.trim();
    let lowered = trimmed.to_lowercase();
    CSV_HEADER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map_or_else(|| trimmed.to_string(), |(_, friendly)| (*friendly).to_string())
}

/// Normalizes a CSV row's column names to the friendly field names.
///
/// Handles common heading variations (`first_name` → `firstName`,
/// `address` → `street1`, `zipcode` → `zip`, ...). Cells that are empty
/// after trimming are dropped; unrecognized headings pass through trimmed.
#[must_use]
pub fn normalize_csv_row<'a, I>(row: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    row.into_iter()
        .filter_map(|(header, cell)| {
            let cell = cell.trim();
            if cell.is_empty() {
                None
            } else {
                Some((normalize_header(header), Value::String(cell.to_string())))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_address() {
        let address = parse_address("Jane Doe, 123 Main St, Phoenix AZ 85001").unwrap();
        assert_eq!(address.first_name, "Jane");
        assert_eq!(address.last_name, "Doe");
        assert_eq!(address.street1, "123 Main St");
        assert_eq!(address.city, "Phoenix");
        assert_eq!(address.state, "AZ");
        assert_eq!(address.zip, "85001");
        assert!(address.street2.is_none());
        assert!(address.company.is_none());
    }

    #[test]
    fn test_parse_with_company_and_street2() {
        let address =
            parse_address("Jane Doe, Acme Inc, 123 Main St, Apt 4B, Phoenix AZ 85001").unwrap();
        assert_eq!(address.company.as_deref(), Some("Acme Inc"));
        assert_eq!(address.street1, "123 Main St");
        assert_eq!(address.street2.as_deref(), Some("Apt 4B"));
    }

    #[test]
    fn test_parse_two_middle_segments_leading_digit_is_street() {
        let address = parse_address("Jane Doe, 123 Main St, Apt 4B, Phoenix AZ 85001").unwrap();
        assert_eq!(address.street1, "123 Main St");
        assert_eq!(address.street2.as_deref(), Some("Apt 4B"));
        assert!(address.company.is_none());
    }

    #[test]
    fn test_parse_two_middle_segments_word_is_company() {
        let address = parse_address("Jane Doe, Acme Inc, 123 Main St, Phoenix AZ 85001").unwrap();
        assert_eq!(address.company.as_deref(), Some("Acme Inc"));
        assert_eq!(address.street1, "123 Main St");
    }

    #[test]
    fn test_parse_comma_separated_state_and_zip() {
        let address = parse_address("Jane Doe, 123 Main St, Phoenix, AZ, 85001").unwrap();
        assert_eq!(address.city, "Phoenix");
        assert_eq!(address.state, "AZ");
        assert_eq!(address.zip, "85001");
    }

    #[test]
    fn test_parse_city_in_preceding_segment() {
        let address = parse_address("Jane Doe, 123 Main St, Phoenix, AZ 85001").unwrap();
        assert_eq!(address.city, "Phoenix");
        assert_eq!(address.street1, "123 Main St");
    }

    #[test]
    fn test_parse_nine_digit_zip() {
        let address = parse_address("Jane Doe, 123 Main St, Phoenix AZ 85001-1234").unwrap();
        assert_eq!(address.zip, "85001-1234");
    }

    #[test]
    fn test_parse_single_word_name() {
        let address = parse_address("Cher, 123 Main St, Phoenix AZ 85001").unwrap();
        assert_eq!(address.first_name, "Cher");
        assert_eq!(address.last_name, "");
    }

    #[test]
    fn test_too_few_segments_is_an_error() {
        let result = parse_address("Jane Doe, 123 Main St");
        assert!(matches!(result, Err(AddressError::Parse { .. })));
    }

    #[test]
    fn test_missing_state_zip_tail_is_an_error() {
        let result = parse_address("Jane Doe, 123 Main St, Phoenix");
        assert!(matches!(result, Err(AddressError::Parse { .. })));
    }

    #[test]
    fn test_normalize_csv_row_common_aliases() {
        let row = normalize_csv_row([
            ("first_name", "Jane"),
            ("LastName", "Doe"),
            ("Address", "123 Main St"),
            ("apt", "4B"),
            ("CITY", "Phoenix"),
            ("St", "AZ"),
            ("zipcode", "85001"),
        ]);

        assert_eq!(row["firstName"], "Jane");
        assert_eq!(row["lastName"], "Doe");
        assert_eq!(row["street1"], "123 Main St");
        assert_eq!(row["street2"], "4B");
        assert_eq!(row["city"], "Phoenix");
        assert_eq!(row["state"], "AZ");
        assert_eq!(row["zip"], "85001");
    }

    #[test]
    fn test_normalize_csv_row_drops_empty_cells() {
        let row = normalize_csv_row([("first_name", "Jane"), ("company", "  ")]);
        assert_eq!(row.len(), 1);
        assert!(!row.contains_key("company"));
    }

    #[test]
    fn test_normalize_csv_row_passes_unknown_headers_through() {
        let row = normalize_csv_row([("nickname", "JD")]);
        assert_eq!(row["nickname"], "JD");
    }
}
