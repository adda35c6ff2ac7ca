use vacancy_core::Vacancy;

const DESCRIPTION_PREVIEW: usize = 100;

pub fn render(list: &[Vacancy]) -> String {
    if list.is_empty() {
        return "No vacancies found for your query.\n".to_string();
    }
    let mut out = format!("\n{}\n", "=".repeat(50));
    for (i, v) in list.iter().enumerate() {
        let preview: String = v.description().chars().take(DESCRIPTION_PREVIEW).collect();
        out.push_str(&format!("{}. {}\n", i + 1, v.title()));
        out.push_str(&format!("   Salary: {}\n", v.salary()));
        out.push_str(&format!("   Link: {}\n", v.url()));
        out.push_str(&format!("   Requirements: {preview}...\n"));
        out.push_str(&format!("{}\n", "-".repeat(50)));
    }
    out
}
