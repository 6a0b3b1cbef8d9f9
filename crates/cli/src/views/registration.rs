//! Форма регистрации больницы
//!
//! После ошибки валидации переспрашивается только проблемное поле,
//! после DuplicateKey - все занятые ключи. Ошибки окружения прерывают регистрацию.

use anyhow::{Context, Result};
use domain::{
    Accreditation, Hospital, HospitalField, HospitalService, HospitalType, RegistrationRequest,
    SpecializationType,
};
use tracing::{debug, warn};

use super::Prompt;

pub struct RegistrationView<'a, P: Prompt> {
    service: &'a dyn HospitalService,
    prompt: &'a mut P,
}

impl<'a, P: Prompt> RegistrationView<'a, P> {
    pub fn new(service: &'a dyn HospitalService, prompt: &'a mut P) -> Self {
        Self { service, prompt }
    }

    /// Собрать форму и зарегистрировать больницу
    pub fn run(&mut self) -> Result<Hospital> {
        self.run_with(RegistrationRequest::default())
    }

    /// Как `run`, но с предзаполненными значениями
    pub fn run_with(&mut self, mut request: RegistrationRequest) -> Result<Hospital> {
        let mut pending: Vec<HospitalField> = HospitalField::ALL.to_vec();

        loop {
            for field in pending {
                let hint = field_hint(field);
                let answer = self
                    .prompt
                    .ask(field, hint.as_deref(), request.get(field))
                    .with_context(|| format!("Failed to read {}", field.label()))?;
                request.set(field, answer);
            }

            match self.service.register(request.clone()) {
                Ok(hospital) => {
                    self.prompt.report_success(&format!(
                        "{} registered (id {})",
                        hospital.hospital_name,
                        hospital.id.map(|id| id.to_string()).unwrap_or_default()
                    ))?;
                    return Ok(hospital);
                }
                Err(error) if error.is_user_fixable() => {
                    debug!("Re-prompting after: {}", error);
                    self.prompt.report_error(&error.to_string())?;
                    pending = error.offending_fields();
                }
                Err(error) => {
                    warn!("Registration aborted: {}", error);
                    return Err(error).context("Hospital registration failed");
                }
            }
        }
    }
}

/// Подсказка с допустимыми вариантами для enum полей
fn field_hint(field: HospitalField) -> Option<String> {
    let options: Vec<String> = match field {
        HospitalField::HospitalType => HospitalType::ALL
            .iter()
            .map(|t| t.as_str().to_string())
            .collect(),
        HospitalField::SpecializationType => SpecializationType::KNOWN
            .iter()
            .map(|s| s.as_str().to_string())
            .chain(std::iter::once("or any other".to_string()))
            .collect(),
        HospitalField::Accreditation => Accreditation::ALL
            .iter()
            .map(|a| a.as_str().to_string())
            .collect(),
        HospitalField::EstablishedYear => vec!["YYYY".to_string()],
        _ => return None,
    };
    Some(options.join(" / "))
}
