//! Archive-DOI extraction from free text

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Zenodo-minted DOIs only: 10.5281/zenodo.<record id>
    static ref ARCHIVE_DOI_REGEX: Regex =
        Regex::new(r"10\.5281/zenodo\.[0-9]+").unwrap();
}

/// Extract the archive DOI from a citation record's extra field.
///
/// Tolerant of arbitrary surrounding text; when multiple matches exist
/// the first is used.
pub fn extract_archive_doi(text: &str) -> Option<String> {
    ARCHIVE_DOI_REGEX.find(text).map(|m| m.as_str().to_string())
}

/// Extract every archive DOI present in the text, in order.
pub fn extract_archive_dois(text: &str) -> Vec<String> {
    ARCHIVE_DOI_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// The numeric deposit record id carried inside an archive DOI.
pub fn record_id_from_doi(doi: &str) -> Option<String> {
    doi.rsplit_once("zenodo.")
        .map(|(_, id)| id.to_string())
        .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
}

/// Deposit record id from an operator-supplied candidate token.
///
/// Accepts either a full archive DOI or a bare numeric record id.
pub fn record_id_from_token(token: &str) -> Option<String> {
    let token = token.trim();
    if let Some(doi) = extract_archive_doi(token) {
        return record_id_from_doi(&doi);
    }
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        return Some(token.to_string());
    }
    None
}

/// Append the `DOI: <value>` persistence line to an extra field.
///
/// Existing extra text is preserved; the extra field is never truncated
/// by this system.
pub fn extra_with_doi(extra: &str, doi: &str) -> String {
    if extra.trim().is_empty() {
        format!("DOI: {}", doi)
    } else {
        format!("{}\nDOI: {}", extra.trim_end(), doi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("foo DOI: 10.5281/zenodo.123456 bar", Some("10.5281/zenodo.123456"); "surrounding text")]
    #[test_case("10.5281/zenodo.123456", Some("10.5281/zenodo.123456"); "bare doi")]
    #[test_case("DOI: 10.1038/nature12373", None; "foreign doi ignored")]
    #[test_case("", None; "empty text")]
    fn test_extract_archive_doi(text: &str, expected: Option<&str>) {
        assert_eq!(extract_archive_doi(text), expected.map(String::from));
    }

    #[test]
    fn test_extract_first_of_multiple() {
        let text = "10.5281/zenodo.111 and later 10.5281/zenodo.222";
        assert_eq!(
            extract_archive_doi(text),
            Some("10.5281/zenodo.111".to_string())
        );
        assert_eq!(extract_archive_dois(text).len(), 2);
    }

    #[test]
    fn test_record_id_from_doi() {
        assert_eq!(
            record_id_from_doi("10.5281/zenodo.123456"),
            Some("123456".to_string())
        );
        assert_eq!(record_id_from_doi("10.1038/nature12373"), None);
    }

    #[test_case("123456", Some("123456"); "bare record id")]
    #[test_case("10.5281/zenodo.123456", Some("123456"); "doi form")]
    #[test_case("abc", None; "not an id")]
    fn test_record_id_from_token(token: &str, expected: Option<&str>) {
        assert_eq!(record_id_from_token(token), expected.map(String::from));
    }

    #[test]
    fn test_extra_with_doi_preserves_existing_text() {
        assert_eq!(
            extra_with_doi("legacy note\n", "10.5281/zenodo.9"),
            "legacy note\nDOI: 10.5281/zenodo.9"
        );
        assert_eq!(extra_with_doi("", "10.5281/zenodo.9"), "DOI: 10.5281/zenodo.9");
    }
}
