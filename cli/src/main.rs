mod flow;
mod prompt;
mod render;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fetcher::{HeadHunterClient, HeadHunterConfig, DEFAULT_USER_AGENT, HH_API_URL};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use vacancy_core::store::{DEFAULT_DATA_DIR, DEFAULT_FILE_NAME};
use vacancy_core::{Criteria, JsonStore, StoreConfig, Vacancy, VacancyStorage};

use crate::flow::{run_search, SearchAnswers};
use crate::prompt::Prompter;
use crate::render::render;

#[derive(Parser)]
#[command(name = "vacancies")]
#[command(about = "Search HeadHunter vacancies, keep them in a local JSON file and rank them by salary")]
struct Cli {
    /// Directory holding the vacancy file
    #[arg(long, global = true, env = "VACANCY_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
    /// Vacancy file name inside the data directory
    #[arg(long, global = true, env = "VACANCY_FILE", default_value = DEFAULT_FILE_NAME)]
    file: String,
    /// HeadHunter search endpoint
    #[arg(long, global = true, env = "HH_API_URL", default_value = HH_API_URL)]
    api_url: String,
    /// User-Agent sent to the API
    #[arg(long, global = true, env = "HH_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
    // answers for the default `search` command
    #[command(flatten)]
    search: SearchArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, store and rank vacancies (the default)
    Search(SearchArgs),
    /// Show stored vacancies
    List {
        /// Only vacancies that state a salary
        #[arg(long, default_value_t = false)]
        with_salary: bool,
        /// Every keyword must appear in the description
        #[arg(long, num_args = 1..)]
        keywords: Option<Vec<String>>,
    },
    /// Remove stored vacancies by link
    Delete {
        #[arg(long)]
        url: String,
    },
}

#[derive(Args, Debug, Default, PartialEq)]
struct SearchArgs {
    /// Search query; prompted if omitted
    #[arg(long)]
    query: Option<String>,
    /// Number of vacancies to show; prompted if omitted
    #[arg(long, value_parser = parse_positive)]
    top: Option<usize>,
    /// Description keywords, any of them may match; prompted if omitted
    #[arg(long, num_args = 0..)]
    keywords: Option<Vec<String>>,
    /// Salary range such as "100000 - 150000"; prompted if omitted
    #[arg(long)]
    salary_range: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let config = StoreConfig { data_dir: cli.data_dir, file_name: cli.file };
    let api = HeadHunterConfig { base_url: cli.api_url, user_agent: cli.user_agent, ..Default::default() };
    let store = JsonStore::from_config(&config).with_context(|| format!("opening {}", config.path().display()))?;

    match cli.command {
        Some(Commands::Search(args)) => search(&store, api, args).await,
        None => search(&store, api, cli.search).await,
        Some(Commands::List { with_salary, keywords }) => {
            let criteria = Criteria { salary_min: with_salary.then_some(0), keywords };
            let records = store.get_vacancies(&criteria)?;
            let vacancies: Vec<Vacancy> = records.into_iter().map(Vacancy::from_record).collect();
            print!("{}", render(&vacancies));
            Ok(())
        }
        Some(Commands::Delete { url }) => {
            store.delete_vacancy(&Vacancy::new(None, Some(url.as_str()), None, None))?;
            tracing::info!(%url, "deleted");
            println!("Removed vacancies linked to {url}");
            Ok(())
        }
    }
}

async fn search(store: &JsonStore, api: HeadHunterConfig, args: SearchArgs) -> Result<()> {
    let client = HeadHunterClient::new(api)?;
    let answers = SearchAnswers { query: args.query, top: args.top, keywords: args.keywords, salary_range: args.salary_range };
    let stdin = io::stdin();
    let mut prompt = Prompter::new(stdin.lock(), io::stdout());
    run_search(&client, store, answers, &mut prompt).await?;
    Ok(())
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("'{raw}' is not a positive whole number")),
    }
}
