use crate::prompt::Prompter;
use crate::render::render;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use vacancy_core::{filter_by_keywords, filter_by_salary_range, sort_descending, take_top, JsonStore, Vacancy, VacancySource};

/// Answers that can be supplied up front instead of being prompted for.
#[derive(Debug, Default, Clone)]
pub struct SearchAnswers {
    pub query: Option<String>,
    pub top: Option<usize>,
    pub keywords: Option<Vec<String>>,
    pub salary_range: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RankOptions {
    pub top: usize,
    pub keywords: Vec<String>,
    pub salary_range: String,
}

/// keywords (any) -> salary range -> sort -> top N
pub fn rank(vacancies: Vec<Vacancy>, opts: &RankOptions) -> Vec<Vacancy> {
    let filtered = filter_by_keywords(vacancies, &opts.keywords);
    let ranged = filter_by_salary_range(filtered, &opts.salary_range);
    take_top(sort_descending(ranged), opts.top)
}

pub async fn run_search<S, R, W>(source: &S, store: &JsonStore, answers: SearchAnswers, prompt: &mut Prompter<R, W>) -> Result<Vec<Vacancy>>
where
    S: VacancySource,
    R: BufRead,
    W: Write,
{
    let query = match answers.query {
        Some(q) => q,
        None => prompt.ask("Enter a search query (e.g. 'Python developer'): ")?,
    };

    prompt.say("Searching for vacancies...\n")?;
    let raw = source.fetch_vacancies(&query).await?;
    let vacancies = Vacancy::cast_to_list(&raw);
    prompt.say(&format!("Vacancies found: {}\n", vacancies.len()))?;

    let added = store.add_all(&vacancies).with_context(|| format!("saving vacancies to {}", store.path().display()))?;
    tracing::info!(added, total = vacancies.len(), path = %store.path().display(), "stored vacancies");
    prompt.say("Vacancies saved to file.\n")?;

    let top = match answers.top {
        Some(n) => n,
        None => prompt.ask_positive("\nHow many top vacancies to show: ")?,
    };
    let keywords = match answers.keywords {
        Some(k) => k,
        None => prompt.ask_words("Keywords to filter descriptions by (space separated): ")?,
    };
    let salary_range = match answers.salary_range {
        Some(r) => r.trim().to_string(),
        None => prompt.ask("Salary range (e.g. '100000 - 150000'): ")?,
    };

    let ranked = rank(vacancies, &RankOptions { top, keywords, salary_range });
    prompt.say(&render(&ranked))?;
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::tempdir;
    use vacancy_core::{Criteria, VacancyStorage};

    struct FixedSource(Vec<Value>);

    impl VacancySource for FixedSource {
        async fn fetch_vacancies(&self, _query: &str) -> anyhow::Result<Vec<Value>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl VacancySource for FailingSource {
        async fn fetch_vacancies(&self, _query: &str) -> anyhow::Result<Vec<Value>> {
            anyhow::bail!("503 Service Unavailable")
        }
    }

    fn postings() -> Vec<Value> {
        vec![
            json!({"name": "Junior", "alternate_url": "u1", "salary": {"from": 50000}, "snippet": {"requirement": "Python basics"}}),
            json!({"name": "Senior", "alternate_url": "u2", "salary": {"from": 100000, "to": 200000}, "snippet": {"requirement": "Python, Django"}}),
            json!({"name": "Intern", "alternate_url": "u3", "salary": null, "snippet": {"requirement": "Java"}}),
        ]
    }

    #[tokio::test]
    async fn prompted_flow_fetches_stores_and_ranks() {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("vacancies.json")).unwrap();
        let input = b"python\n2\npython\n\n".as_slice();
        let mut out = Vec::new();
        let mut prompt = Prompter::new(input, &mut out);

        let ranked = run_search(&FixedSource(postings()), &store, SearchAnswers::default(), &mut prompt).await.unwrap();
        assert_eq!(ranked.iter().map(Vacancy::title).collect::<Vec<_>>(), vec!["Senior", "Junior"]);
        assert_eq!(store.get_vacancies(&Criteria::default()).unwrap().len(), 3);

        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("Vacancies found: 3"));
        assert!(shown.contains("1. Senior"));
    }

    #[tokio::test]
    async fn preset_answers_skip_prompts() {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("vacancies.json")).unwrap();
        let answers = SearchAnswers {
            query: Some("dev".into()),
            top: Some(5),
            keywords: Some(vec![]),
            salary_range: Some("60000".into()),
        };
        let mut prompt = Prompter::new(b"".as_slice(), Vec::new());
        let ranked = run_search(&FixedSource(postings()), &store, answers, &mut prompt).await.unwrap();
        assert_eq!(ranked.iter().map(Vacancy::url).collect::<Vec<_>>(), vec!["u2"]);
    }

    #[tokio::test]
    async fn fetch_failure_propagates_and_store_untouched() {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("vacancies.json")).unwrap();
        let answers = SearchAnswers { query: Some("x".into()), ..Default::default() };
        let mut prompt = Prompter::new(b"".as_slice(), Vec::new());
        assert!(run_search(&FailingSource, &store, answers, &mut prompt).await.is_err());
        assert!(store.get_vacancies(&Criteria::default()).unwrap().is_empty());
    }

    #[test]
    fn rank_with_bad_range_keeps_keyword_matches() {
        let list = Vacancy::cast_to_list(&postings());
        let opts = RankOptions { top: 10, keywords: vec!["java".into()], salary_range: "abc".into() };
        let ranked = rank(list, &opts);
        assert_eq!(ranked.iter().map(Vacancy::url).collect::<Vec<_>>(), vec!["u3"]);
    }
}
