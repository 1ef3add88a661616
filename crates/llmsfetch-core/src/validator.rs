//! Acceptance heuristics for fetched documentation.
//!
//! Many static hosts answer `200 OK` with an HTML catch-all page for any path,
//! so a successful status alone does not mean an llms.txt exists. Rules, first
//! match wins:
//!
//! 1. non-2xx status → reject
//! 2. `content-type` contains `text/plain` or `text/markdown` → accept
//! 3. `content-type` contains `text/html` → reject
//! 4. body (trimmed, lowercased) starts with `<!doctype html`, or the raw
//!    body contains `<html` → reject, otherwise accept
//!
//! The `<html` search is case-sensitive, so `<HTML>` inside plain text is
//! accepted while a lowercase `<html` anywhere is rejected. The body sniff in
//! rule 4 can reject legitimate plain text. That behaviour is intentional.

use std::fmt;

use crate::error::{Error, Result};
use crate::fetcher::HttpResponse;

/// Why a response was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Usable documentation.
    Accepted,
    /// Non-2xx status.
    BadStatus(u16),
    /// Served as `text/html`.
    HtmlContentType,
    /// Generic content type, but the body looks like an HTML page.
    HtmlBody,
}

impl Verdict {
    /// Whether the response should be used.
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::BadStatus(status) => write!(f, "status {status}"),
            Self::HtmlContentType => write!(f, "served as text/html"),
            Self::HtmlBody => write!(f, "body looks like an HTML page"),
        }
    }
}

/// Classifies responses as acceptable documentation content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentValidator;

impl ContentValidator {
    /// Decide whether `response` is usable and why.
    pub fn classify(response: &HttpResponse) -> Verdict {
        if !response.is_success() {
            return Verdict::BadStatus(response.status);
        }

        let content_type = response
            .content_type
            .as_deref()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if content_type.contains("text/plain") || content_type.contains("text/markdown") {
            return Verdict::Accepted;
        }
        if content_type.contains("text/html") {
            return Verdict::HtmlContentType;
        }

        let opening = response.body.trim_start().to_lowercase();
        if opening.starts_with("<!doctype html") || response.body.contains("<html") {
            return Verdict::HtmlBody;
        }

        Verdict::Accepted
    }

    /// Whether `response` is acceptable documentation content.
    pub fn accept(response: &HttpResponse) -> bool {
        Self::classify(response).is_accepted()
    }

    /// Like [`classify`](Self::classify), with a rejection as
    /// [`Error::InvalidContent`].
    pub fn check(response: &HttpResponse) -> Result<()> {
        match Self::classify(response) {
            Verdict::Accepted => Ok(()),
            rejected => Err(Error::InvalidContent(rejected.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_success_status() {
        let mut response = HttpResponse::plain("# fine");
        response.status = 500;
        assert_eq!(ContentValidator::classify(&response), Verdict::BadStatus(500));
        assert!(!ContentValidator::accept(&HttpResponse::with_status(404)));
    }

    #[test]
    fn test_accepts_plain_and_markdown_regardless_of_body() {
        assert!(ContentValidator::accept(&HttpResponse::plain(
            "<!DOCTYPE html><html></html>"
        )));
        assert!(ContentValidator::accept(&HttpResponse::markdown("<html>")));
        assert!(ContentValidator::accept(&HttpResponse::ok(
            Some("Text/Plain"),
            "# mixed case header"
        )));
    }

    #[test]
    fn test_rejects_html_content_type_regardless_of_body() {
        assert_eq!(
            ContentValidator::classify(&HttpResponse::html("# Looks like markdown")),
            Verdict::HtmlContentType
        );
    }

    #[test]
    fn test_sniffs_body_without_content_type() {
        let doctype = HttpResponse::ok(None, "  \n<!DOCTYPE HTML>\n<head></head>");
        assert_eq!(ContentValidator::classify(&doctype), Verdict::HtmlBody);

        let embedded = HttpResponse::ok(Some("application/octet-stream"), "x <html lang=en>");
        assert_eq!(ContentValidator::classify(&embedded), Verdict::HtmlBody);

        let text = HttpResponse::ok(None, "# Project\n\n> Summary");
        assert!(ContentValidator::accept(&text));
    }

    #[test]
    fn test_embedded_marker_match_is_case_sensitive() {
        let upper = HttpResponse::ok(None, "# Title\n\nEmbed with <HTML> tags");
        assert_eq!(ContentValidator::classify(&upper), Verdict::Accepted);

        let lower = HttpResponse::ok(None, "# Title\n\nEmbed with <html> tags");
        assert_eq!(ContentValidator::classify(&lower), Verdict::HtmlBody);
    }

    #[test]
    fn test_check_reports_invalid_content() {
        assert!(ContentValidator::check(&HttpResponse::plain("# ok")).is_ok());

        let err = ContentValidator::check(&HttpResponse::html("<p>")).unwrap_err();
        assert!(matches!(err, Error::InvalidContent(_)));
        assert_eq!(err.to_string(), "Invalid content: served as text/html");
    }
}
