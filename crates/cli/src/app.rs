//! Маршрутизация при старте: регистрация или landing

use anyhow::{Context, Result};
use domain::{DomainError, DomainResult, Hospital, HospitalService};
use std::io::Write;
use tracing::info;

use crate::views::{LandingView, Prompt, RegistrationView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Registration,
    Landing,
}

/// Всегда перечитывает хранилище
pub fn initial_screen(service: &dyn HospitalService) -> DomainResult<Screen> {
    Ok(if service.is_already_registered()? {
        Screen::Landing
    } else {
        Screen::Registration
    })
}

/// Полный сценарий: при необходимости регистрация, затем landing
pub fn run<P: Prompt, W: Write>(
    service: &dyn HospitalService,
    prompt: &mut P,
    output: &mut W,
) -> Result<Hospital> {
    let screen = initial_screen(service).context("Failed to check registration state")?;
    info!("Starting on {:?} screen", screen);

    let hospital = match screen {
        Screen::Registration => RegistrationView::new(service, prompt).run()?,
        Screen::Landing => service
            .primary_hospital()?
            .ok_or_else(|| DomainError::NotFound("primary hospital".to_string()))?,
    };

    LandingView::new(&hospital)
        .show(output)
        .context("Failed to render landing view")?;
    Ok(hospital)
}
