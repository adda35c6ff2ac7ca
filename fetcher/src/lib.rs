use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use vacancy_core::VacancySource;

pub const HH_API_URL: &str = "https://api.hh.ru/vacancies";
pub const DEFAULT_USER_AGENT: &str = "vacancy-analyzer/0.1 (+https://github.com/vacancy-analyzer)";

#[derive(Debug, Clone)]
pub struct HeadHunterConfig {
    pub base_url: String,
    /// Postings per page; the API caps this at 100.
    pub per_page: u32,
    /// Region code, 113 is Russia.
    pub area: u32,
    pub user_agent: String,
}

impl Default for HeadHunterConfig {
    fn default() -> Self {
        Self { base_url: HH_API_URL.to_string(), per_page: 100, area: 113, user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

#[derive(Deserialize)]
struct SearchPage {
    #[serde(default)]
    items: Vec<Value>,
}

/// Client for the HeadHunter vacancy search. Fetches a single page per query.
pub struct HeadHunterClient {
    client: Client,
    config: HeadHunterConfig,
}

impl HeadHunterClient {
    pub fn new(config: HeadHunterConfig) -> Result<Self> {
        let client = Client::builder().user_agent(config.user_agent.clone()).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HeadHunterConfig { &self.config }

    async fn get_page(&self, query: &str) -> Result<SearchPage> {
        let per_page = self.config.per_page.to_string();
        let area = self.config.area.to_string();
        let resp = self
            .client
            .get(&self.config.base_url)
            .query(&[("text", query), ("per_page", per_page.as_str()), ("area", area.as_str())])
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.config.base_url))?;
        let resp = resp.error_for_status().context("vacancy search rejected")?;
        let page = resp.json::<SearchPage>().await.context("malformed vacancy search response")?;
        Ok(page)
    }
}

impl VacancySource for HeadHunterClient {
    async fn fetch_vacancies(&self, query: &str) -> Result<Vec<Value>> {
        let page = self.get_page(query).await?;
        tracing::info!(query, found = page.items.len(), "fetched vacancies");
        Ok(page.items)
    }
}
