pub mod query;
pub mod source;
pub mod store;
pub mod vacancy;

pub use query::{filter_by_keywords, filter_by_salary_range, sort_descending, take_top, RangeParseError, SalaryRange};
pub use source::VacancySource;
pub use store::{Criteria, JsonStore, StoreConfig, StoreError, VacancyStorage};
pub use vacancy::{compare_by_salary, same_salary, SalaryData, Vacancy, VacancyRecord};
