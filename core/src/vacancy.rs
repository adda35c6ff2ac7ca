use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

pub const SALARY_NOT_SPECIFIED: &str = "salary not specified";
pub const NO_DESCRIPTION: &str = "no description provided";
/// Currency label used when the posting omits one (HeadHunter's code for roubles).
pub const DEFAULT_CURRENCY: &str = "RUR";

/// Structured salary range as the listing API reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryData {
    #[serde(default)]
    pub from: Option<i64>,
    #[serde(default)]
    pub to: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl SalaryData {
    /// Decode each field on its own so one odd bound does not erase the others.
    /// Anything that is not an object counts as "no data".
    pub fn from_value(value: &Value) -> Option<SalaryData> {
        let obj = value.as_object()?;
        Some(SalaryData {
            from: obj.get("from").and_then(lenient_int),
            to: obj.get("to").and_then(lenient_int),
            currency: obj.get("currency").and_then(Value::as_str).map(str::to_string),
        })
    }
}

// 100000, 100000.0 and "100000" are all read as 100000
fn lenient_int(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0).map(|f| f as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Plain record as persisted in the store file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyRecord {
    pub title: String,
    pub url: String,
    pub salary: String,
    pub description: String,
}

/// Normalized job posting. Fields are fixed at construction.
#[derive(Debug, Clone)]
pub struct Vacancy {
    title: String,
    url: String,
    salary: String,
    description: String,
}

impl Vacancy {
    pub fn new(
        title: Option<&str>,
        url: Option<&str>,
        salary: Option<&SalaryData>,
        description: Option<&str>,
    ) -> Self {
        let description = match description {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => NO_DESCRIPTION.to_string(),
        };
        Self {
            title: title.unwrap_or_default().to_string(),
            url: url.unwrap_or_default().to_string(),
            salary: format_salary(salary),
            description,
        }
    }

    pub fn title(&self) -> &str { &self.title }
    pub fn url(&self) -> &str { &self.url }
    pub fn salary(&self) -> &str { &self.salary }
    pub fn description(&self) -> &str { &self.description }

    /// Ranking key: the first purely numeric token of the formatted salary, 0 if none.
    pub fn salary_key(&self) -> i64 {
        if self.salary == SALARY_NOT_SPECIFIED {
            return 0;
        }
        self.salary
            .split_whitespace()
            .filter(|tok| tok.bytes().all(|b| b.is_ascii_digit()))
            .find_map(|tok| tok.parse::<i64>().ok())
            .unwrap_or(0)
    }

    /// Convert raw API postings, one vacancy per posting, order preserved.
    pub fn cast_to_list(raw: &[Value]) -> Vec<Vacancy> {
        raw.iter().map(Vacancy::from_posting).collect()
    }

    pub fn from_posting(posting: &Value) -> Vacancy {
        let title = posting.get("name").and_then(Value::as_str);
        let url = posting
            .get("alternate_url")
            .and_then(Value::as_str)
            .filter(|u| !u.is_empty())
            .or_else(|| posting.get("url").and_then(Value::as_str));
        let salary = posting.get("salary").and_then(SalaryData::from_value);
        let description = posting
            .get("snippet")
            .and_then(|s| s.get("requirement"))
            .and_then(Value::as_str);
        Vacancy::new(title, url, salary.as_ref(), description)
    }

    pub fn to_record(&self) -> VacancyRecord {
        VacancyRecord {
            title: self.title.clone(),
            url: self.url.clone(),
            salary: self.salary.clone(),
            description: self.description.clone(),
        }
    }

    /// Re-hydrate a stored record. The salary string is taken as already formatted.
    pub fn from_record(record: VacancyRecord) -> Vacancy {
        let description = if record.description.is_empty() { NO_DESCRIPTION.to_string() } else { record.description };
        let salary = if record.salary.is_empty() { SALARY_NOT_SPECIFIED.to_string() } else { record.salary };
        Vacancy { title: record.title, url: record.url, salary, description }
    }
}

impl fmt::Display for Vacancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.title, self.salary, self.url)
    }
}

/// Total order on vacancies by salary key only; title and url play no part.
pub fn compare_by_salary(a: &Vacancy, b: &Vacancy) -> Ordering {
    a.salary_key().cmp(&b.salary_key())
}

/// Ranking equality: two different postings with the same key are "equal".
pub fn same_salary(a: &Vacancy, b: &Vacancy) -> bool {
    compare_by_salary(a, b) == Ordering::Equal
}

fn format_salary(salary: Option<&SalaryData>) -> String {
    let Some(data) = salary else {
        return SALARY_NOT_SPECIFIED.to_string();
    };
    // a zero bound is treated as missing
    let from = data.from.filter(|v| *v != 0);
    let to = data.to.filter(|v| *v != 0);
    let currency = data.currency.as_deref().unwrap_or(DEFAULT_CURRENCY);
    match (from, to) {
        (Some(from), Some(to)) => format!("{from} - {to} {currency}"),
        (Some(from), None) => format!("from {from} {currency}"),
        (None, Some(to)) => format!("up to {to} {currency}"),
        (None, None) => SALARY_NOT_SPECIFIED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_from_range_uses_lower_bound() {
        let v = Vacancy::new(Some("x"), Some("u"), Some(&SalaryData { from: Some(10), to: Some(20), currency: None }), None);
        assert_eq!(v.salary_key(), 10);
    }

    #[test]
    fn key_skips_mixed_tokens() {
        let v = Vacancy::from_record(VacancyRecord {
            title: "t".into(),
            url: "u".into(),
            salary: "approx 50k or 70000 RUR".into(),
            description: "d".into(),
        });
        assert_eq!(v.salary_key(), 70000);
    }

    #[test]
    fn zero_bound_counts_as_absent() {
        let v = Vacancy::new(None, None, Some(&SalaryData { from: Some(0), to: Some(5000), currency: None }), None);
        assert_eq!(v.salary(), "up to 5000 RUR");
    }
}
