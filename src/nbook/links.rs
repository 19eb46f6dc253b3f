//! URLs handed off to the host's default handler. Building them lives here;
//! actually launching them is the front end's job.

use crate::error::{NbookError, Result};
use url::Url;

pub const DEFAULT_HELP_URL: &str = "https://e.sfu-kras.ru";
pub const DEFAULT_SEARCH_URL: &str = "https://yandex.ru/search/";

/// Query parameter carrying the search terms.
const SEARCH_PARAM: &str = "text";

fn parse(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| NbookError::Config(format!("Invalid URL '{}': {}", raw, e)))
}

pub fn help_url(raw: &str) -> Result<Url> {
    parse(raw)
}

/// Appends `query` to `endpoint` as the `text` parameter, percent-encoded.
/// Existing query parameters on the endpoint are kept.
pub fn search_url(endpoint: &str, query: &str) -> Result<Url> {
    let mut url = parse(endpoint)?;
    url.query_pairs_mut().append_pair(SEARCH_PARAM, query);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_note_text() {
        let url = search_url(DEFAULT_SEARCH_URL, "milk & eggs").unwrap();
        assert_eq!(url.as_str(), "https://yandex.ru/search/?text=milk+%26+eggs");
    }

    #[test]
    fn search_url_keeps_existing_params() {
        let url = search_url("https://example.com/s?lang=en", "rust").unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("lang".to_string(), "en".to_string()),
                ("text".to_string(), "rust".to_string())
            ]
        );
    }

    #[test]
    fn search_url_handles_multiline_text() {
        let url = search_url(DEFAULT_SEARCH_URL, "a\nb").unwrap();
        let text = url
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned());
        assert_eq!(text.as_deref(), Some("a\nb"));
    }

    #[test]
    fn invalid_endpoint_is_config_error() {
        assert!(matches!(
            search_url("not a url", "x"),
            Err(NbookError::Config(_))
        ));
    }

    #[test]
    fn help_url_parses_default() {
        assert_eq!(
            help_url(DEFAULT_HELP_URL).unwrap().as_str(),
            "https://e.sfu-kras.ru/"
        );
    }
}
