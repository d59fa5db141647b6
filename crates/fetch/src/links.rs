use anyhow::{Context as AnyhowContext, Result};
use regex::Regex;
use reqwest::{Client, Url};
use std::sync::OnceLock;
use std::time::Duration;

use crate::config::FetchConfig;

fn anchor_href() -> &'static Regex {
    static ANCHOR_HREF: OnceLock<Regex> = OnceLock::new();
    ANCHOR_HREF.get_or_init(|| {
        Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
            .expect("anchor regex is valid")
    })
}

fn char_reference() -> &'static Regex {
    static CHAR_REFERENCE: OnceLock<Regex> = OnceLock::new();
    CHAR_REFERENCE.get_or_init(|| {
        Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|amp|quot|apos|lt|gt);")
            .expect("character reference regex is valid")
    })
}

/// Decode the character references that show up in attribute values.
///
/// Unknown or invalid references are kept as written.
fn decode_attribute(value: &str) -> String {
    char_reference()
        .replace_all(value, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            let decoded = match name {
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "lt" => Some('<'),
                "gt" => Some('>'),
                _ => {
                    let code = match name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => name[1..].parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

/// Collect download links from an HTML page, in document order.
///
/// An anchor qualifies when its target path equals `link_path` and the
/// first `query_key` value ends with `suffix`. Targets are resolved
/// against `page_url`.
pub fn extract_download_links(html: &str, page_url: &Url, config: &FetchConfig) -> Vec<String> {
    anchor_href()
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .filter_map(|href| {
            let href = decode_attribute(href.as_str().trim());
            match page_url.join(&href) {
                Ok(url) => Some(url),
                Err(err) => {
                    log::debug!("Skipping unparsable href {href:?}: {err}");
                    None
                }
            }
        })
        .filter(|url| is_download_link(url, config))
        .map(String::from)
        .collect()
}

fn is_download_link(url: &Url, config: &FetchConfig) -> bool {
    if url.path() != config.link_path {
        return false;
    }
    url.query_pairs()
        .find(|(key, _)| key == config.query_key.as_str())
        .is_some_and(|(_, value)| value.ends_with(config.suffix.as_str()))
}

/// Fetch the configured page and return its download links.
pub async fn fetch_download_links(config: &FetchConfig) -> Result<Vec<String>> {
    config.validate()?;
    let page_url = Url::parse(&config.base_url)
        .with_context(|| format!("Invalid page URL {}", config.base_url))?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let html = client
        .get(page_url.clone())
        .send()
        .await
        .with_context(|| format!("Request failed: GET {page_url}"))?
        .error_for_status()
        .with_context(|| format!("Request failed: GET {page_url}"))?
        .text()
        .await
        .with_context(|| format!("Failed while reading HTTP body from {page_url}"))?;

    let links = extract_download_links(&html, &page_url, config);
    if links.is_empty() {
        log::warn!("No download links matched on {page_url}");
    } else {
        log::info!("Found {} download links on {page_url}", links.len());
    }
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page_url() -> Url {
        Url::parse(crate::config::DEFAULT_BASE_URL).unwrap()
    }

    #[test]
    fn keeps_matching_links_in_document_order() {
        let html = r#"
            <html><body>
              <a class="dl" href="/downloadData/deDownload?path=/data/ERR01.fa.gz">ERR01</a>
              <a href="/downloadData/deDownload?path=/data/ERR01.fa.gz.md5">md5</a>
              <A HREF='/downloadData/deDownload?path=/data/ERR02.fa.gz&amp;type=1'>ERR02</A>
              <a href="/downloadData/other?path=/data/ERR03.fa.gz">elsewhere</a>
              <a name="top">no target</a>
            </body></html>
        "#;
        let links = extract_download_links(html, &page_url(), &FetchConfig::default());
        assert_eq!(
            links,
            vec![
                "http://mgbase.qnlm.ac/downloadData/deDownload?path=/data/ERR01.fa.gz",
                "http://mgbase.qnlm.ac/downloadData/deDownload?path=/data/ERR02.fa.gz&type=1",
            ]
        );
    }

    #[test]
    fn first_query_value_decides() {
        let html = r#"<a href="/downloadData/deDownload?path=a.txt&path=b.fa.gz">x</a>"#;
        assert!(extract_download_links(html, &page_url(), &FetchConfig::default()).is_empty());
    }

    #[test]
    fn custom_suffix_and_absolute_links() {
        let config = FetchConfig {
            suffix: ".fq.gz".to_string(),
            ..Default::default()
        };
        let html = r#"<a href="https://mirror.example.org/downloadData/deDownload?path=run.fq.gz">m</a>"#;
        let links = extract_download_links(html, &page_url(), &config);
        assert_eq!(
            links,
            vec!["https://mirror.example.org/downloadData/deDownload?path=run.fq.gz"]
        );
    }

    #[test]
    fn unquoted_href_and_character_references() {
        let html = concat!(
            "<a href=/downloadData/deDownload?path=/data/ERR04.fa.gz>ERR04</a>",
            "<a href=\"/downloadData/deDownload?path=/data/ERR05.fa.gz&#38;type=2\">ERR05</a>",
            "<a href=\"/downloadData/deDownload?path=/data/ERR06&#x2E;fa.gz\">ERR06</a>",
        );
        let links = extract_download_links(html, &page_url(), &FetchConfig::default());
        assert_eq!(
            links,
            vec![
                "http://mgbase.qnlm.ac/downloadData/deDownload?path=/data/ERR04.fa.gz",
                "http://mgbase.qnlm.ac/downloadData/deDownload?path=/data/ERR05.fa.gz&type=2",
                "http://mgbase.qnlm.ac/downloadData/deDownload?path=/data/ERR06.fa.gz",
            ]
        );
    }

    #[test]
    fn decodes_only_known_references() {
        assert_eq!(decode_attribute("a&amp;b&quot;c&#39;d&lt;&gt;"), "a&b\"c'd<>");
        assert_eq!(decode_attribute("x&nbsp;y&#xZZ;"), "x&nbsp;y&#xZZ;");
        assert_eq!(decode_attribute("&#1114112;"), "&#1114112;");
    }

    #[test]
    fn page_without_anchors_yields_nothing() {
        let links = extract_download_links("<p>maintenance</p>", &page_url(), &FetchConfig::default());
        assert!(links.is_empty());
    }
}
