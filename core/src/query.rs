use crate::vacancy::{compare_by_salary, Vacancy};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RangeParseError {
    #[error("salary range is blank")]
    Blank,
    #[error("salary range has too many '-' separators")]
    TooManyParts,
    #[error("'{0}' is not a whole number")]
    NotANumber(String),
}

/// Inclusive salary bounds; `max == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryRange {
    pub min: i64,
    pub max: Option<i64>,
}

impl SalaryRange {
    /// Parse `"100000 - 150000"` or a lone lower bound `"100000"`.
    pub fn parse(spec: &str) -> Result<Self, RangeParseError> {
        if spec.trim().is_empty() {
            return Err(RangeParseError::Blank);
        }
        let parts: Vec<&str> = spec.split('-').collect();
        if parts.len() > 2 {
            return Err(RangeParseError::TooManyParts);
        }
        let min = parse_bound(parts[0])?;
        let max = match parts.get(1) {
            Some(p) => Some(parse_bound(p)?),
            None => None,
        };
        Ok(Self { min, max })
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

fn parse_bound(raw: &str) -> Result<i64, RangeParseError> {
    let s = raw.trim();
    s.parse::<i64>().map_err(|_| RangeParseError::NotANumber(s.to_string()))
}

/// Keep vacancies whose description mentions ANY of the words.
///
/// Note the store's keyword criteria requires ALL keywords instead. The two
/// paths are separate contracts and intentionally differ.
pub fn filter_by_keywords(list: Vec<Vacancy>, words: &[String]) -> Vec<Vacancy> {
    if words.is_empty() {
        return list;
    }
    let words: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
    list.into_iter()
        .filter(|v| {
            let description = v.description().to_lowercase();
            words.iter().any(|w| description.contains(w.as_str()))
        })
        .collect()
}

/// Keep vacancies whose salary key lies in the range. A malformed range is
/// reported and the list comes back untouched.
pub fn filter_by_salary_range(list: Vec<Vacancy>, range_spec: &str) -> Vec<Vacancy> {
    if range_spec.is_empty() {
        return list;
    }
    let range = match SalaryRange::parse(range_spec) {
        Ok(r) => r,
        Err(err) => {
            tracing::warn!(range = range_spec, %err, "invalid salary range, expected e.g. '100000 - 150000'; skipping salary filter");
            return list;
        }
    };
    list.into_iter().filter(|v| range.contains(v.salary_key())).collect()
}

/// Stable sort, highest salary key first.
pub fn sort_descending(mut list: Vec<Vacancy>) -> Vec<Vacancy> {
    list.sort_by(|a, b| compare_by_salary(b, a));
    list
}

pub fn take_top(mut list: Vec<Vacancy>, n: usize) -> Vec<Vacancy> {
    list.truncate(n);
    list
}
