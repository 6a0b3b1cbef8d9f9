//! Единственное место, где строится граф зависимостей приложения

use anyhow::Context;
use common::{DIContainer, DIResult};
use domain::{HospitalRegistrationService, HospitalRepository, HospitalService};
use infrastructure::{AppConfig, ConnectionProvider, SchemaManager, SqliteHospitalRepository};
use std::sync::Arc;
use tracing::debug;

/// Регистрирует все сервисы. Ничего не создаётся до первого `resolve`.
pub fn configure_container(config: &AppConfig) -> DIResult<DIContainer> {
    let container = DIContainer::new();

    container.register_instance(Arc::new(config.clone()))?;

    container.register_singleton::<ConnectionProvider, _>(|c| {
        let config = c.resolve::<AppConfig>()?;
        let provider = ConnectionProvider::open(&config.database.path).with_context(|| {
            format!(
                "Cannot open database at {}",
                config.database.path.display()
            )
        })?;
        Ok(Arc::new(provider))
    })?;

    container.register_singleton::<SchemaManager, _>(|c| {
        Ok(Arc::new(SchemaManager::new(c.resolve::<ConnectionProvider>()?)))
    })?;

    container.register_singleton::<dyn HospitalRepository, _>(|c| {
        let repository: Arc<dyn HospitalRepository> = Arc::new(SqliteHospitalRepository::new(
            c.resolve::<ConnectionProvider>()?,
        ));
        Ok(repository)
    })?;

    container.register_singleton::<dyn HospitalService, _>(|c| {
        let service: Arc<dyn HospitalService> = Arc::new(HospitalRegistrationService::new(
            c.resolve::<dyn HospitalRepository>()?,
        ));
        Ok(service)
    })?;

    debug!(
        "Container configured with {} services",
        container.service_count()
    );
    Ok(container)
}
