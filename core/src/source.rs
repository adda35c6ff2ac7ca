use serde_json::Value;
use std::future::Future;

/// Remote listing service that can be searched by free text.
///
/// Implementations return the raw postings untouched; a non-success response
/// must surface as an error, never as an empty list.
pub trait VacancySource {
    fn fetch_vacancies(&self, query: &str) -> impl Future<Output = anyhow::Result<Vec<Value>>> + Send;
}
