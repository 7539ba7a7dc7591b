//! PDF link extraction from landing-page HTML.
//!
//! Pure functions over an HTML string; no network access happens here.
//! The HTML parser recovers from any malformed input, so extraction never
//! fails: a page that cannot be made sense of simply yields no link.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static anchor selector"));
static IFRAME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("iframe[src]").expect("static iframe selector"));
static PDF_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s<>"]+?\.pdf"#).expect("static PDF URL pattern"));

const PDF_SUFFIX: &str = ".pdf";
const DOWNLOAD_LABELS: [&str; 2] = ["Download", "PDF"];

/// How aggressively a page is searched for a PDF link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// First `<a href>` whose target ends with `.pdf`, case-sensitive.
    #[default]
    Strict,
    /// Falls through several looser strategies, stopping at the first hit:
    ///
    /// 1. first `<a href>` whose target contains `.pdf` anywhere
    /// 2. first `<a href>` whose text mentions `Download` or `PDF`
    /// 3. first `<iframe src>` whose source contains `.pdf`
    /// 4. first absolute `http(s)://….pdf` URL anywhere in the raw markup
    Lenient,
}

/// Find the first anchor whose `href` ends with `.pdf`, in document order.
///
/// The target is returned verbatim: relative links stay relative and no
/// query string or case normalisation is applied, so `report.PDF` and
/// `report.pdf?download=1` do not match.
///
/// # Examples
///
/// ```ignore
/// let html = r#"<a href="/a.pdf">A</a><a href="/b.pdf">B</a>"#;
/// assert_eq!(find_pdf_link(html), Some("/a.pdf".to_string()));
/// ```
pub fn find_pdf_link(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    first_anchor(&document, |href| href.ends_with(PDF_SUFFIX))
}

/// Find a PDF link using the given [`MatchMode`].
pub fn find_pdf_link_with(html: &str, mode: MatchMode) -> Option<String> {
    match mode {
        MatchMode::Strict => find_pdf_link(html),
        MatchMode::Lenient => find_pdf_link_lenient(html),
    }
}

fn find_pdf_link_lenient(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    if let Some(href) = first_anchor(&document, |href| href.contains(PDF_SUFFIX)) {
        debug!(%href, "Matched anchor containing .pdf");
        return Some(href);
    }

    let labelled = document.select(&ANCHOR_SELECTOR).find(|element| {
        let text = element.text().collect::<String>();
        DOWNLOAD_LABELS.iter().any(|label| text.contains(label))
    });
    if let Some(href) = labelled.and_then(|element| element.value().attr("href")) {
        debug!(%href, "Matched anchor labelled as a download");
        return Some(href.to_string());
    }

    let iframe = document
        .select(&IFRAME_SELECTOR)
        .filter_map(|element| element.value().attr("src"))
        .find(|src| src.contains(PDF_SUFFIX));
    if let Some(src) = iframe {
        debug!(%src, "Matched iframe source containing .pdf");
        return Some(src.to_string());
    }

    let raw = PDF_URL_PATTERN.find(html).map(|m| m.as_str().to_string());
    if let Some(ref url) = raw {
        debug!(%url, "Matched PDF URL in raw markup");
    }
    raw
}

fn first_anchor(document: &Html, predicate: impl Fn(&str) -> bool) -> Option<String> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .find(|href| predicate(href))
        .map(str::to_string)
}

/// Resolve a link target against the landing page it was found on.
///
/// Absolute targets come back unchanged (modulo URL serialisation); relative
/// ones are joined onto `page_url`. Returns `None` when either side cannot be
/// parsed as a URL.
pub fn absolutize(page_url: &str, href: &str) -> Option<String> {
    let base = Url::parse(page_url).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pdf_link() {
        let html = r#"<html><body><a href="/files/report.pdf">Download</a></body></html>"#;
        assert_eq!(find_pdf_link(html), Some("/files/report.pdf".to_string()));
    }

    #[test]
    fn test_no_pdf_link() {
        let html = r#"<html><body><a href="/page.html">Home</a></body></html>"#;
        assert_eq!(find_pdf_link(html), None);
    }

    #[test]
    fn test_first_match_wins() {
        let html = r#"<html><body>
            <a href="/index.html">Home</a>
            <a href="/a.pdf">A</a>
            <a href="/b.pdf">B</a>
        </body></html>"#;
        assert_eq!(find_pdf_link(html), Some("/a.pdf".to_string()));
    }

    #[test]
    fn test_document_order_across_nesting() {
        let html = r#"<div><p><span><a href="deep/first.pdf">1</a></span></p></div>
            <a href="second.pdf">2</a>"#;
        assert_eq!(find_pdf_link(html), Some("deep/first.pdf".to_string()));
    }

    #[test]
    fn test_suffix_is_case_sensitive() {
        let html = r#"<a href="/report.PDF">Upper</a><a href="/report.Pdf">Mixed</a>"#;
        assert_eq!(find_pdf_link(html), None);
    }

    #[test]
    fn test_query_string_does_not_match() {
        let html = r#"<a href="/report.pdf?download=1">Query</a><a href="/report.pdf#page=2">Frag</a>"#;
        assert_eq!(find_pdf_link(html), None);
    }

    #[test]
    fn test_target_returned_verbatim() {
        let html = r#"<a href="https://cdn.example.com/2026/10/19/The%20Hindu%20Delhi.pdf">x</a>"#;
        assert_eq!(
            find_pdf_link(html),
            Some("https://cdn.example.com/2026/10/19/The%20Hindu%20Delhi.pdf".to_string())
        );
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<a name="top">.pdf</a><a href="/x.pdf">x</a>"#;
        assert_eq!(find_pdf_link(html), Some("/x.pdf".to_string()));
    }

    #[test]
    fn test_non_anchor_elements_ignored() {
        let html = r#"<link href="/style.pdf"><iframe src="/viewer.pdf"></iframe><a href="/a.html">a</a>"#;
        assert_eq!(find_pdf_link(html), None);
    }

    #[test]
    fn test_malformed_html_still_searched() {
        let html = r#"<html><body><div><a href="/broken.pdf">unterminated <b>tags"#;
        assert_eq!(find_pdf_link(html), Some("/broken.pdf".to_string()));
    }

    #[test]
    fn test_garbage_input_is_absence() {
        assert_eq!(find_pdf_link(""), None);
        assert_eq!(find_pdf_link("\u{0}\u{1}<<<>>>"), None);
    }

    #[test]
    fn test_strict_mode_matches_find_pdf_link() {
        let html = r#"<a href="/a.pdf?x=1">q</a><a href="/b.pdf">b</a>"#;
        assert_eq!(
            find_pdf_link_with(html, MatchMode::Strict),
            Some("/b.pdf".to_string())
        );
    }

    #[test]
    fn test_lenient_accepts_query_string() {
        let html = r#"<a href="/a.pdf?download=1">q</a><a href="/b.pdf">b</a>"#;
        assert_eq!(
            find_pdf_link_with(html, MatchMode::Lenient),
            Some("/a.pdf?download=1".to_string())
        );
    }

    #[test]
    fn test_lenient_falls_back_to_download_label() {
        let html = r#"<a href="/home">Home</a><a href="/epaper/get?id=42">Download PDF</a>"#;
        assert_eq!(find_pdf_link_with(html, MatchMode::Strict), None);
        assert_eq!(
            find_pdf_link_with(html, MatchMode::Lenient),
            Some("/epaper/get?id=42".to_string())
        );
    }

    #[test]
    fn test_lenient_prefers_pdf_href_over_label() {
        let html = r#"<a href="/get?id=1"><span>Today's PDF</span></a><a href="/files/today.pdf?v=2">Open</a>"#;
        assert_eq!(
            find_pdf_link_with(html, MatchMode::Lenient),
            Some("/files/today.pdf?v=2".to_string())
        );
    }

    #[test]
    fn test_lenient_label_match_is_case_sensitive() {
        let html = r#"<a href="/get">download pdf</a><iframe src="/viewer/today.pdf"></iframe>"#;
        assert_eq!(
            find_pdf_link_with(html, MatchMode::Lenient),
            Some("/viewer/today.pdf".to_string())
        );
    }

    #[test]
    fn test_lenient_falls_back_to_iframe() {
        let html = r#"<a href="/home">home</a><iframe src="/ads"></iframe><iframe src="/viewer/today.pdf"></iframe>"#;
        assert_eq!(
            find_pdf_link_with(html, MatchMode::Lenient),
            Some("/viewer/today.pdf".to_string())
        );
    }

    #[test]
    fn test_lenient_falls_back_to_raw_markup() {
        let html = r#"<script>var file = "https://files.example.com/paper/today.pdf";</script>"#;
        assert_eq!(find_pdf_link_with(html, MatchMode::Strict), None);
        assert_eq!(
            find_pdf_link_with(html, MatchMode::Lenient),
            Some("https://files.example.com/paper/today.pdf".to_string())
        );
    }

    #[test]
    fn test_lenient_nothing_found() {
        let html = r#"<a href="/page.html">Home</a>"#;
        assert_eq!(find_pdf_link_with(html, MatchMode::Lenient), None);
    }

    #[test]
    fn test_absolutize_relative() {
        assert_eq!(
            absolutize("https://epapertoday.in/the-hindu/", "files/today.pdf"),
            Some("https://epapertoday.in/the-hindu/files/today.pdf".to_string())
        );
        assert_eq!(
            absolutize("https://epapertoday.in/the-hindu/", "/files/today.pdf"),
            Some("https://epapertoday.in/files/today.pdf".to_string())
        );
    }

    #[test]
    fn test_absolutize_absolute_unchanged() {
        assert_eq!(
            absolutize("https://epapertoday.in/", "https://cdn.example.com/a.pdf"),
            Some("https://cdn.example.com/a.pdf".to_string())
        );
    }

    #[test]
    fn test_absolutize_bad_base() {
        assert_eq!(absolutize("not a url", "/a.pdf"), None);
    }
}
