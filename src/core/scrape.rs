use crate::domain::model::StrainInfo;
use reqwest::header::{self, HeaderMap, HeaderValue};
use scraper::{Html, Selector};

/// Placeholder in the listing URL template that gets replaced with the
/// page number.
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Build the URL for a single listing page from the template.
pub fn page_url(template: &str, page: usize) -> String {
    template.replace(PAGE_PLACEHOLDER, &page.to_string())
}

/// The browser-mimicking header set sent with every listing page request.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        ),
    );
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

/// Parse strain name and THC percentage out of a product info string.
///
/// Returns `Some` only when the literal token `THC:` is present; the split
/// happens at its first occurrence. Empty name or THC fields are kept as-is,
/// the text is free-form and never validated as numeric.
pub fn parse_strain_info(thc_info: &str) -> Option<StrainInfo> {
    let (name, thc) = thc_info.split_once("THC:")?;

    Some(StrainInfo {
        strain_name: name.trim().to_string(),
        thc_percentage: thc.trim().to_string(),
    })
}

/// Extract strain listings from a listing page.
///
/// Walks every `div.product-card-content`, takes the first `span` inside the
/// first `div.product-batch`, and parses its text. Cards missing any of
/// those pieces are skipped. Malformed or empty HTML simply yields an empty
/// list, the parser is error-tolerant.
pub fn extract_listings(html: &str) -> Vec<StrainInfo> {
    let document = Html::parse_document(html);
    let card_sel = Selector::parse("div.product-card-content").unwrap();
    let batch_sel = Selector::parse("div.product-batch").unwrap();
    let span_sel = Selector::parse("span").unwrap();

    let mut listings = Vec::new();

    for card in document.select(&card_sel) {
        let Some(batch) = card.select(&batch_sel).next() else {
            continue;
        };
        let Some(span) = batch.select(&span_sel).next() else {
            continue;
        };

        let thc_info = span.text().collect::<String>().trim().to_string();
        if thc_info.is_empty() {
            continue;
        }

        if let Some(strain_info) = parse_strain_info(&thc_info) {
            listings.push(strain_info);
        }
    }

    listings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_substitution() {
        assert_eq!(
            page_url("https://example.com/menu?page={page}", 2),
            "https://example.com/menu?page=2"
        );
    }

    #[test]
    fn test_parse_strain_info_with_thc_token() {
        let info = parse_strain_info("Blue Dream THC: 22.5%").unwrap();
        assert_eq!(info.strain_name, "Blue Dream");
        assert_eq!(info.thc_percentage, "22.5%");
    }

    #[test]
    fn test_parse_strain_info_without_token_is_none() {
        assert!(parse_strain_info("Blue Dream 22.5%").is_none());
        assert!(parse_strain_info("").is_none());
    }

    #[test]
    fn test_parse_strain_info_splits_at_first_occurrence() {
        let info = parse_strain_info("Sour THC: 18% THC: 20%").unwrap();
        assert_eq!(info.strain_name, "Sour");
        assert_eq!(info.thc_percentage, "18% THC: 20%");
    }

    #[test]
    fn test_parse_strain_info_keeps_empty_fields() {
        let info = parse_strain_info("THC: 15%").unwrap();
        assert_eq!(info.strain_name, "");
        assert_eq!(info.thc_percentage, "15%");

        let info = parse_strain_info("Gelato THC:").unwrap();
        assert_eq!(info.strain_name, "Gelato");
        assert_eq!(info.thc_percentage, "");
    }

    #[test]
    fn test_extract_listings_from_listing_page() {
        let html = r#"
            <html><body>
              <div class="product-card-content">
                <div class="product-batch"><span>Blue Dream THC: 22.5%</span></div>
              </div>
              <div class="product-card-content">
                <div class="product-batch"><span>OG Kush THC: 19%</span></div>
              </div>
            </body></html>
        "#;

        let listings = extract_listings(html);
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].strain_name, "Blue Dream");
        assert_eq!(listings[0].thc_percentage, "22.5%");
        assert_eq!(listings[1].strain_name, "OG Kush");
    }

    #[test]
    fn test_extract_listings_skips_incomplete_cards() {
        let html = r#"
            <div class="product-card-content"></div>
            <div class="product-card-content">
              <div class="product-batch"></div>
            </div>
            <div class="product-card-content">
              <div class="product-batch"><span>   </span></div>
            </div>
            <div class="product-card-content">
              <div class="product-batch"><span>No potency listed</span></div>
            </div>
            <div class="product-card-content">
              <div class="product-batch"><span>Gelato THC: 24%</span></div>
            </div>
        "#;

        let listings = extract_listings(html);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].strain_name, "Gelato");
    }

    #[test]
    fn test_extract_listings_takes_first_batch_span() {
        let html = r#"
            <div class="product-card-content">
              <div class="product-batch"><span>Runtz THC: 26%</span><span>Other THC: 1%</span></div>
              <div class="product-batch"><span>Stale THC: 2%</span></div>
            </div>
        "#;

        let listings = extract_listings(html);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].strain_name, "Runtz");
        assert_eq!(listings[0].thc_percentage, "26%");
    }

    #[test]
    fn test_extract_listings_tolerates_malformed_html() {
        assert!(extract_listings("").is_empty());
        assert!(extract_listings("<div class=\"product-card-content\"><span>").is_empty());
        assert!(extract_listings("not html at all }{").is_empty());
    }
}
