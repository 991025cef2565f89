//! The airport code list served next to the UI as `airports.txt`.

use crate::error::AirportError;

/// Ordered airport codes, one per line of the source file. Replaced wholesale on reload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AirportList {
    codes: Vec<String>,
}

impl AirportList {
    /// Splits on line breaks, trims each entry and drops blank lines. A trailing newline does
    /// not produce an empty code.
    pub fn parse(text: &str) -> Self {
        let codes = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        AirportList { codes }
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        let code = code.trim();
        self.codes.iter().any(|c| c.eq_ignore_ascii_case(code))
    }

    /// Codes starting with `prefix`, ignoring case, in list order. An empty prefix matches
    /// nothing so an untouched input doesn't dump the whole list.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<&str> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return vec![];
        }

        self.codes
            .iter()
            .filter(|c| {
                c.get(..prefix.len())
                    .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
            })
            .map(String::as_str)
            .take(limit)
            .collect()
    }
}

impl FromIterator<String> for AirportList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        AirportList {
            codes: iter.into_iter().collect(),
        }
    }
}

/// Reads the airport list out of a (status, body) pair from whichever transport fetched it.
pub fn interpret_airports(status: u16, body: Option<&str>) -> Result<AirportList, AirportError> {
    if !(200..300).contains(&status) {
        return Err(AirportError::BadStatus(status));
    }

    body.map(AirportList::parse).ok_or(AirportError::NotText)
}

#[cfg(test)]
mod airports_tests {
    use super::*;

    #[test]
    fn test_trailing_newline_drops_empty_entry() {
        let list = AirportList::parse("JFK\nLAX\nORD\n");
        assert_eq!(list.codes(), &["JFK", "LAX", "ORD"]);
    }

    #[test]
    fn test_windows_line_endings_and_blank_lines() {
        let list = AirportList::parse("JFK\r\n\r\n LAX \r\nORD");
        assert_eq!(list.codes(), &["JFK", "LAX", "ORD"]);
    }

    #[test]
    fn test_empty_file() {
        assert!(AirportList::parse("").is_empty());
        assert!(AirportList::parse("\n\n").is_empty());
    }

    #[test]
    fn test_contains_ignores_case() {
        let list = AirportList::parse("JFK\nLAX\n");
        assert!(list.contains("jfk"));
        assert!(list.contains(" LAX"));
        assert!(!list.contains("ORD"));
    }

    #[test]
    fn test_suggest_prefix() {
        let list = AirportList::parse("LAX\nLAS\nJFK\nLHR\nLGA\n");
        assert_eq!(list.suggest("la", 10), vec!["LAX", "LAS"]);
        assert_eq!(list.suggest("L", 2), vec!["LAX", "LAS"]);
        assert!(list.suggest("", 10).is_empty());
        assert!(list.suggest("ZZ", 10).is_empty());
    }

    #[test]
    fn test_interpret_airports() {
        assert_eq!(
            interpret_airports(200, Some("JFK\nLAX\n")).unwrap().len(),
            2
        );
        assert_eq!(
            interpret_airports(404, Some("not found")).unwrap_err(),
            AirportError::BadStatus(404)
        );
        assert_eq!(
            interpret_airports(200, None).unwrap_err(),
            AirportError::NotText
        );
    }
}
