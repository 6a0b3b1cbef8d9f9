use anyhow::{Context, Result};
use cli::{configure_container, views::TerminalPrompt};
use common::{init_logging, OperationTimer};
use domain::HospitalService;
use infrastructure::{ConfigLoader, SchemaManager};

fn main() -> Result<()> {
    let (config, source) = ConfigLoader::new()
        .load_with_source()
        .context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialise logging")?;
    tracing::debug!("Configuration source: {:?}", source);

    let container = configure_container(&config).context("Failed to configure services")?;

    let schema = container
        .resolve::<SchemaManager>()
        .context("Failed to initialise database")?;
    let mut timer = OperationTimer::new("apply_migrations");
    timer.add_field("database", config.database.path.display().to_string());
    let report = schema.apply_migrations();
    timer.finish_with_result(&report);
    let report = report.context("Failed to apply database migrations")?;
    tracing::info!("Database schema at v{}", report.current_version);

    let service = container
        .resolve::<dyn HospitalService>()
        .context("Failed to initialise hospital service")?;

    let mut prompt = TerminalPrompt::stdio();
    let mut stdout = std::io::stdout();
    cli::run(service.as_ref(), &mut prompt, &mut stdout)?;

    Ok(())
}
