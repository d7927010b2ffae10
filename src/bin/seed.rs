use std::{env, fs, process};

use anyhow::{bail, Context};
use portfolio_site::{
    db::postgres::{create_pool, run_migrations},
    settings::AppConfig,
    shared_repos::SharedRepositories,
    use_cases::seed::{SeedData, Seeder},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: seed <content.json> [--reset]";

struct Args {
    path: String,
    reset: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut path = None;
    let mut reset = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--reset" => reset = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                process::exit(0);
            }
            flag if flag.starts_with('-') => bail!("unknown flag {flag}\n{USAGE}"),
            _ if path.is_some() => bail!("only one content file may be given\n{USAGE}"),
            _ => path = Some(arg),
        }
    }

    let path = path.context(USAGE)?;
    Ok(Args { path, reset })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    let config = AppConfig::new().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let raw = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path))?;
    let data = SeedData::from_json(&raw)?;

    let pool = create_pool(&config.database_url)
        .await
        .context("failed to connect to the database")?;
    run_migrations(&pool).await.context("failed to run migrations")?;

    info!("Seeding from {} (reset: {})", args.path, args.reset);
    let seeder = Seeder::new(&SharedRepositories::new(pool));
    let report = seeder.seed(data, args.reset).await?;

    info!(
        experiences = report.experiences,
        projects = report.projects,
        blogs = report.blogs,
        tags = report.tags,
        "Seeding finished"
    );
    Ok(())
}
