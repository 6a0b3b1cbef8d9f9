//! Сквозные сценарии: контейнер -> миграции -> сервис -> экраны

use cli::views::Prompt;
use cli::{configure_container, initial_screen, run, Screen};
use common::{DIContainer, DIError};
use domain::{HospitalField, HospitalRepository, HospitalService};
use infrastructure::{AppConfig, ConnectionProvider, SchemaManager};
use rstest::{fixture, rstest};
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use tempfile::TempDir;

/// Отвечает заранее заготовленными значениями, по очереди для каждого поля
#[derive(Default)]
struct ScriptedPrompt {
    answers: Vec<(HospitalField, VecDeque<String>)>,
    asked: Vec<HospitalField>,
    errors: Vec<String>,
}

impl ScriptedPrompt {
    fn answer(mut self, field: HospitalField, values: &[&str]) -> Self {
        self.answers
            .push((field, values.iter().map(|v| v.to_string()).collect()));
        self
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, field: HospitalField, _hint: Option<&str>, _current: &str) -> io::Result<String> {
        self.asked.push(field);
        let queue = self
            .answers
            .iter_mut()
            .find(|(f, _)| *f == field)
            .map(|(_, q)| q);
        match queue {
            Some(queue) => queue
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted")),
            None => Ok(String::new()),
        }
    }

    fn report_error(&mut self, message: &str) -> io::Result<()> {
        self.errors.push(message.to_string());
        Ok(())
    }

    fn report_success(&mut self, _message: &str) -> io::Result<()> {
        Ok(())
    }
}

fn city_general_script() -> ScriptedPrompt {
    ScriptedPrompt::default()
        .answer(HospitalField::HospitalName, &["City General Hospital"])
        .answer(HospitalField::RegistrationNumber, &["REG-001"])
        .answer(HospitalField::HospitalType, &["General"])
        .answer(HospitalField::SpecializationType, &["Multi-Specialty"])
        .answer(HospitalField::AddressLine1, &["12 Main St"])
        .answer(HospitalField::City, &["Metropolis"])
        .answer(HospitalField::State, &["State X"])
        .answer(HospitalField::PinCode, &["500001"])
        .answer(HospitalField::Country, &["Country Y"])
        .answer(HospitalField::PhonePrimary, &["+1-555-0100"])
        .answer(HospitalField::EmergencyContact, &["+1-555-0199"])
        .answer(HospitalField::Email, &["admin@citygeneral.org"])
        .answer(HospitalField::TotalBeds, &["120"])
        .answer(HospitalField::AdministratorName, &["Dr. A. Smith"])
        .answer(HospitalField::LicenseNumber, &["LIC-555"])
}

/// Контейнер над свежей мигрированной базой во временной директории
struct Workspace {
    container: DIContainer,
    _temp_dir: TempDir,
}

#[fixture]
fn workspace() -> Workspace {
    let temp_dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.database.path = temp_dir.path().join("data").join("hms.db");

    let container = configure_container(&config).unwrap();
    container
        .resolve::<SchemaManager>()
        .unwrap()
        .apply_migrations()
        .unwrap();
    Workspace {
        container,
        _temp_dir: temp_dir,
    }
}

#[rstest]
fn test_first_run_registers_then_shows_landing(workspace: Workspace) {
    let container = &workspace.container;
    let service = container.resolve::<dyn HospitalService>().unwrap();
    assert_eq!(initial_screen(service.as_ref()).unwrap(), Screen::Registration);

    // Первая попытка с годом 1700 отклоняется, переспрашивается только год
    let mut prompt = city_general_script().answer(HospitalField::EstablishedYear, &["1700", "1995"]);
    let mut output = Vec::new();

    let hospital = run(service.as_ref(), &mut prompt, &mut output).unwrap();

    assert_eq!(hospital.established_year, 1995);
    assert_eq!(prompt.errors.len(), 1);
    assert!(prompt.errors[0].contains("Established Year"));
    assert_eq!(
        prompt.asked.len(),
        HospitalField::ALL.len() + 1,
        "only the year is asked again"
    );
    assert_eq!(prompt.asked.last(), Some(&HospitalField::EstablishedYear));

    let rendered = String::from_utf8(output).unwrap();
    assert!(rendered.contains("City General Hospital"));
    assert!(rendered.contains("LIC-555"));

    assert_eq!(initial_screen(service.as_ref()).unwrap(), Screen::Landing);
}

#[rstest]
fn test_second_run_goes_straight_to_landing(workspace: Workspace) {
    let container = &workspace.container;
    let service = container.resolve::<dyn HospitalService>().unwrap();
    let mut first = city_general_script().answer(HospitalField::EstablishedYear, &["1995"]);
    run(service.as_ref(), &mut first, &mut Vec::new()).unwrap();

    let mut untouched = ScriptedPrompt::default();
    let mut output = Vec::new();
    let hospital = run(service.as_ref(), &mut untouched, &mut output).unwrap();

    assert!(untouched.asked.is_empty());
    assert_eq!(hospital.registration_number, "REG-001");
}

#[rstest]
fn test_closed_input_aborts_registration_without_writes(workspace: Workspace) {
    let container = &workspace.container;
    let service = container.resolve::<dyn HospitalService>().unwrap();
    // Год ни разу не ответит - скрипт исчерпан на первом же вопросе о нём
    let mut prompt = city_general_script().answer(HospitalField::EstablishedYear, &[]);

    let result = run(service.as_ref(), &mut prompt, &mut Vec::new());

    assert!(result.is_err());
    assert!(!service.is_already_registered().unwrap());
}

#[rstest]
fn test_services_are_shared_singletons(workspace: Workspace) {
    let container = &workspace.container;

    let first = container.resolve::<dyn HospitalService>().unwrap();
    let second = container.resolve::<dyn HospitalService>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let repository = container.resolve::<dyn HospitalRepository>().unwrap();
    let connection = container.resolve::<ConnectionProvider>().unwrap();
    assert!(!repository.exists_any().unwrap());
    assert!(connection.location().ends_with("hms.db"));
}

#[rstest]
fn test_late_registration_is_rejected(workspace: Workspace) {
    let container = &workspace.container;

    let error = container
        .register_instance(Arc::new(AppConfig::default()))
        .unwrap_err();

    assert!(matches!(error, DIError::RegistrationAfterResolution { .. }));
}

#[test]
fn test_unopenable_database_surfaces_factory_error() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("file");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let mut config = AppConfig::default();
    config.database.path = blocker.join("hms.db");

    let container = configure_container(&config).unwrap();
    let error = container
        .resolve::<dyn HospitalService>()
        .err()
        .expect("database directory cannot be created");

    match error {
        DIError::Factory { message, .. } => assert!(message.contains("Cannot open database")),
        other => panic!("expected factory error, got {other}"),
    }
}
