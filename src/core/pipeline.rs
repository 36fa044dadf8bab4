use crate::core::{prompt, report, scrape};
use crate::domain::model::{AnalyzedStrain, StrainInfo};
use crate::domain::ports::{ConfigProvider, ModelClient, Pipeline, Storage};
use crate::utils::error::{BudtenderError, Result};
use reqwest::Client;
use std::time::Duration;

/// The scrape → analyze → persist pipeline over the dispensary menu.
pub struct MenuPipeline<S: Storage, C: ConfigProvider, M: ModelClient> {
    storage: S,
    config: C,
    model: M,
    client: Client,
}

impl<S: Storage, C: ConfigProvider, M: ModelClient> MenuPipeline<S, C, M> {
    pub fn new(storage: S, config: C, model: M) -> Self {
        Self {
            storage,
            config,
            model,
            client: Client::new(),
        }
    }

    async fn fetch_page(&self, page: usize) -> Result<String> {
        let url = scrape::page_url(self.config.menu_url(), page);
        tracing::debug!("Fetching listing page: {}", url);

        let mut request = self
            .client
            .get(&url)
            .headers(scrape::default_headers())
            .timeout(Duration::from_secs(self.config.timeout_secs()));

        if let Some(headers) = self.config.extra_headers() {
            for (key, value) in headers {
                request = request.header(key.as_str(), value.as_str());
            }
        }

        let response = request.send().await?;
        tracing::debug!("Page {} response status: {}", page, response.status());

        if !response.status().is_success() {
            return Err(BudtenderError::ScrapeError {
                message: format!("page {} returned status {}", page, response.status()),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, M: ModelClient> Pipeline for MenuPipeline<S, C, M> {
    async fn extract(&self) -> Result<Vec<StrainInfo>> {
        let mut listings = Vec::new();

        for page in 1..=self.config.pages() {
            // A failed page is skipped, remaining pages are still fetched.
            let html = match self.fetch_page(page).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::error!("❌ Error on page {}: {}", page, e);
                    println!("Error on page {}: {}", page, e);
                    continue;
                }
            };

            let page_listings = scrape::extract_listings(&html);
            if page_listings.is_empty() {
                println!("No products found on page {}", page);
                continue;
            }

            tracing::debug!("Page {}: {} listings", page, page_listings.len());
            listings.extend(page_listings);
        }

        Ok(listings)
    }

    async fn transform(&self, listings: Vec<StrainInfo>) -> Result<Vec<AnalyzedStrain>> {
        let mut analyzed = Vec::new();
        let total = listings.len();

        for (index, strain) in listings.into_iter().enumerate() {
            println!(
                "\nAnalyzing: {} ({})",
                strain.strain_name, strain.thc_percentage
            );

            // A failed analysis keeps the strain, with the error text as its
            // analysis.
            let analysis = match self
                .model
                .generate(&prompt::analysis_prompt(
                    &strain.strain_name,
                    &strain.thc_percentage,
                ))
                .await
            {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("❌ Analysis failed for {}: {}", strain.strain_name, e);
                    format!("Error getting analysis: {}", e)
                }
            };

            println!("{}", "-".repeat(30));
            println!("{}", analysis);
            println!("{}", "-".repeat(30));

            analyzed.push(AnalyzedStrain {
                strain_name: strain.strain_name,
                thc_percentage: strain.thc_percentage,
                analysis,
            });

            // Pace the inference endpoint between calls.
            if index < total - 1 {
                tokio::time::sleep(Duration::from_millis(self.config.delay_ms())).await;
            }
        }

        Ok(analyzed)
    }

    async fn load(&self, strains: &[AnalyzedStrain]) -> Result<String> {
        let rendered = report::render_report(strains);

        tracing::debug!(
            "Writing report ({} bytes) for {} strains",
            rendered.len(),
            strains.len()
        );
        self.storage
            .write_file(report::REPORT_FILENAME, rendered.as_bytes())
            .await?;

        Ok(format!(
            "{}/{}",
            self.config.output_path(),
            report::REPORT_FILENAME
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                BudtenderError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[derive(Clone)]
    struct MockConfig {
        menu_url: String,
        pages: usize,
    }

    impl MockConfig {
        fn new(menu_url: String, pages: usize) -> Self {
            Self { menu_url, pages }
        }
    }

    impl ConfigProvider for MockConfig {
        fn menu_url(&self) -> &str {
            &self.menu_url
        }

        fn pages(&self) -> usize {
            self.pages
        }

        fn model_endpoint(&self) -> &str {
            "http://localhost:11434"
        }

        fn model_name(&self) -> &str {
            "mistral"
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn delay_ms(&self) -> u64 {
            0
        }

        fn timeout_secs(&self) -> u64 {
            10
        }
    }

    #[derive(Clone)]
    struct MockModel {
        // Err holds the ModelError message to return.
        reply: std::result::Result<String, String>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl MockModel {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                prompts: Arc::new(Mutex::new(Vec::new())),
            }
        }

        async fn prompts(&self) -> Vec<String> {
            self.prompts.lock().await.clone()
        }
    }

    #[async_trait]
    impl ModelClient for MockModel {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().await.push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(BudtenderError::ModelError {
                    message: message.clone(),
                }),
            }
        }
    }

    fn listing_html(entries: &[&str]) -> String {
        let cards: String = entries
            .iter()
            .map(|text| {
                format!(
                    r#"<div class="product-card-content"><div class="product-batch"><span>{}</span></div></div>"#,
                    text
                )
            })
            .collect();
        format!("<html><body>{}</body></html>", cards)
    }

    #[tokio::test]
    async fn test_extract_collects_all_pages() {
        let server = MockServer::start();
        let page1 = server.mock(|when, then| {
            when.method(GET).path("/menu").query_param("page", "1");
            then.status(200)
                .body(listing_html(&["Blue Dream THC: 22.5%"]));
        });
        let page2 = server.mock(|when, then| {
            when.method(GET).path("/menu").query_param("page", "2");
            then.status(200).body(listing_html(&["OG Kush THC: 19%"]));
        });

        let config = MockConfig::new(server.url("/menu?page={page}"), 2);
        let pipeline = MenuPipeline::new(MockStorage::new(), config, MockModel::replying("ok"));

        let listings = pipeline.extract().await.unwrap();

        page1.assert();
        page2.assert();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].strain_name, "Blue Dream");
        assert_eq!(listings[1].strain_name, "OG Kush");
    }

    #[tokio::test]
    async fn test_extract_sends_browser_headers() {
        let server = MockServer::start();
        let page = server.mock(|when, then| {
            when.method(GET)
                .path("/menu")
                .header("User-Agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36")
                .header("Accept-Language", "en-US,en;q=0.5");
            then.status(200).body(listing_html(&["Gelato THC: 24%"]));
        });

        let config = MockConfig::new(server.url("/menu?page={page}"), 1);
        let pipeline = MenuPipeline::new(MockStorage::new(), config, MockModel::replying("ok"));

        let listings = pipeline.extract().await.unwrap();

        page.assert();
        assert_eq!(listings.len(), 1);
    }

    #[tokio::test]
    async fn test_extract_skips_failed_page_and_continues() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/menu").query_param("page", "1");
            then.status(500);
        });
        let page2 = server.mock(|when, then| {
            when.method(GET).path("/menu").query_param("page", "2");
            then.status(200).body(listing_html(&["OG Kush THC: 19%"]));
        });

        let config = MockConfig::new(server.url("/menu?page={page}"), 2);
        let pipeline = MenuPipeline::new(MockStorage::new(), config, MockModel::replying("ok"));

        let listings = pipeline.extract().await.unwrap();

        page2.assert();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].strain_name, "OG Kush");
    }

    #[tokio::test]
    async fn test_extract_all_pages_failing_yields_empty_list() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/menu");
            then.status(404);
        });

        let config = MockConfig::new(server.url("/menu?page={page}"), 2);
        let pipeline = MenuPipeline::new(MockStorage::new(), config, MockModel::replying("ok"));

        let listings = pipeline.extract().await.unwrap();
        assert!(listings.is_empty());
    }

    #[tokio::test]
    async fn test_extract_empty_page_yields_no_listings() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/menu");
            then.status(200).body("<html><body>maintenance</body></html>");
        });

        let config = MockConfig::new(server.url("/menu?page={page}"), 1);
        let pipeline = MenuPipeline::new(MockStorage::new(), config, MockModel::replying("ok"));

        let listings = pipeline.extract().await.unwrap();
        assert!(listings.is_empty());
    }

    #[tokio::test]
    async fn test_transform_analyzes_each_strain() {
        let model = MockModel::replying("A balanced hybrid.");
        let config = MockConfig::new("http://unused/{page}".to_string(), 1);
        let pipeline = MenuPipeline::new(MockStorage::new(), config, model.clone());

        let listings = vec![
            StrainInfo {
                strain_name: "Blue Dream".to_string(),
                thc_percentage: "22.5%".to_string(),
            },
            StrainInfo {
                strain_name: "OG Kush".to_string(),
                thc_percentage: "19%".to_string(),
            },
        ];

        let analyzed = pipeline.transform(listings).await.unwrap();

        assert_eq!(analyzed.len(), 2);
        assert_eq!(analyzed[0].strain_name, "Blue Dream");
        assert_eq!(analyzed[0].analysis, "A balanced hybrid.");

        let prompts = model.prompts().await;
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("Blue Dream"));
        assert!(prompts[0].contains("22.5%"));
        assert!(prompts[1].contains("OG Kush"));
    }

    #[tokio::test]
    async fn test_transform_model_failure_becomes_analysis_text() {
        let model = MockModel::failing("endpoint returned 500");
        let config = MockConfig::new("http://unused/{page}".to_string(), 1);
        let pipeline = MenuPipeline::new(MockStorage::new(), config, model);

        let listings = vec![StrainInfo {
            strain_name: "Blue Dream".to_string(),
            thc_percentage: "22.5%".to_string(),
        }];

        let analyzed = pipeline.transform(listings).await.unwrap();

        assert_eq!(analyzed.len(), 1);
        assert!(analyzed[0].analysis.starts_with("Error getting analysis:"));
        assert!(analyzed[0].analysis.contains("endpoint returned 500"));
    }

    #[tokio::test]
    async fn test_transform_empty_listing_set() {
        let config = MockConfig::new("http://unused/{page}".to_string(), 1);
        let pipeline = MenuPipeline::new(MockStorage::new(), config, MockModel::replying("ok"));

        let analyzed = pipeline.transform(vec![]).await.unwrap();
        assert!(analyzed.is_empty());
    }

    #[tokio::test]
    async fn test_load_writes_report_file() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused/{page}".to_string(), 1);
        let pipeline = MenuPipeline::new(storage.clone(), config, MockModel::replying("ok"));

        let strains = vec![AnalyzedStrain {
            strain_name: "Blue Dream".to_string(),
            thc_percentage: "22.5%".to_string(),
            analysis: "A balanced hybrid.".to_string(),
        }];

        let output_path = pipeline.load(&strains).await.unwrap();
        assert_eq!(output_path, "test_output/strain_analysis.txt");

        let written = storage.get_file("strain_analysis.txt").await.unwrap();
        let content = String::from_utf8(written).unwrap();
        assert!(content.contains("Strain: Blue Dream"));
        assert!(content.contains("THC: 22.5%"));
        assert!(content.contains("Analysis:\nA balanced hybrid."));
    }

    #[tokio::test]
    async fn test_load_with_no_strains_writes_empty_file() {
        let storage = MockStorage::new();
        let config = MockConfig::new("http://unused/{page}".to_string(), 1);
        let pipeline = MenuPipeline::new(storage.clone(), config, MockModel::replying("ok"));

        pipeline.load(&[]).await.unwrap();

        let written = storage.get_file("strain_analysis.txt").await.unwrap();
        assert!(written.is_empty());
    }
}
