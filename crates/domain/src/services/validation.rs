//! Validation - правила приёма формы регистрации
//!
//! Порядок стадий фиксирован: обязательные поля, формат, диапазоны.
//! Первая же ошибка возвращается (fail-fast). Уникальность проверяет сервис,
//! потому что ей нужен repository.

use chrono::{DateTime, Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::entities::{Hospital, RegistrationRequest};
use crate::errors::{ValidationError, ValidationRule};
use crate::value_objects::{Accreditation, HospitalField, HospitalType, SpecializationType};

pub const MIN_ESTABLISHED_YEAR: i64 = 1800;
pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 15;

static INDIA_PIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-9][0-9]{5}$").expect("Invalid regex"));
static US_ZIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("Invalid regex"));
static GENERIC_POSTAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 \-]{2,9}$").expect("Invalid regex"));
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ()\-]*[0-9]$").expect("Invalid regex"));
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.%+\-]+@[\w.\-]+\.[A-Za-z]{2,}$").expect("Invalid regex"));

/// Проверяет запрос и строит сущность без id
///
/// `now` задаёт и верхнюю границу года основания, и оба audit timestamp.
pub fn validate(
    request: &RegistrationRequest,
    now: DateTime<Utc>,
) -> Result<Hospital, ValidationError> {
    check_mandatory(request)?;

    // Format
    let hospital_type = HospitalType::parse(request.get(HospitalField::HospitalType))
        .ok_or_else(|| unknown(HospitalField::HospitalType))?;
    let established_year = parse_int(request, HospitalField::EstablishedYear)?;
    let pin_code = required(request, HospitalField::PinCode);
    let country = required(request, HospitalField::Country);
    check_pin_code(pin_code, country)?;
    check_phone(request, HospitalField::PhonePrimary)?;
    check_phone(request, HospitalField::PhoneAlternate)?;
    check_phone(request, HospitalField::EmergencyContact)?;
    let email = required(request, HospitalField::Email);
    if !EMAIL.is_match(email) {
        return Err(format_error(HospitalField::Email, "name@domain.tld"));
    }
    let total_beds = parse_int(request, HospitalField::TotalBeds)?;
    let icu_beds = parse_optional_int(request, HospitalField::IcuBeds)?;
    let operation_theaters = parse_optional_int(request, HospitalField::OperationTheaters)?;
    let accreditation = match request.trimmed(HospitalField::Accreditation) {
        Some(value) => {
            Accreditation::parse(value).ok_or_else(|| unknown(HospitalField::Accreditation))?
        }
        None => Accreditation::default(),
    };

    // Range
    let current_year = i64::from(now.year());
    if !(MIN_ESTABLISHED_YEAR..=current_year).contains(&established_year) {
        return Err(ValidationError::new(
            HospitalField::EstablishedYear,
            ValidationRule::OutOfRange {
                min: MIN_ESTABLISHED_YEAR,
                max: Some(current_year),
            },
        ));
    }
    let total_beds = to_count(HospitalField::TotalBeds, total_beds, 1)?;
    let icu_beds = to_count(HospitalField::IcuBeds, icu_beds, 0)?;
    if icu_beds > total_beds {
        return Err(ValidationError::new(
            HospitalField::IcuBeds,
            ValidationRule::Exceeds {
                other: HospitalField::TotalBeds,
            },
        ));
    }
    let operation_theaters = to_count(HospitalField::OperationTheaters, operation_theaters, 0)?;

    Ok(Hospital {
        id: None,
        hospital_name: required(request, HospitalField::HospitalName).to_string(),
        registration_number: required(request, HospitalField::RegistrationNumber).to_string(),
        hospital_type,
        specialization_type: SpecializationType::from(
            required(request, HospitalField::SpecializationType),
        ),
        // диапазон проверен выше
        established_year: established_year as i32,
        address_line1: required(request, HospitalField::AddressLine1).to_string(),
        address_line2: optional(request, HospitalField::AddressLine2),
        city: required(request, HospitalField::City).to_string(),
        state: required(request, HospitalField::State).to_string(),
        pin_code: pin_code.to_string(),
        country: country.to_string(),
        phone_primary: required(request, HospitalField::PhonePrimary).to_string(),
        phone_alternate: optional(request, HospitalField::PhoneAlternate),
        emergency_contact: required(request, HospitalField::EmergencyContact).to_string(),
        email: email.to_string(),
        website: optional(request, HospitalField::Website),
        total_beds,
        icu_beds,
        operation_theaters,
        administrator_name: required(request, HospitalField::AdministratorName).to_string(),
        license_number: required(request, HospitalField::LicenseNumber).to_string(),
        accreditation,
        gstin: optional(request, HospitalField::Gstin),
        is_active: true,
        created_at: now,
        updated_at: now,
    })
}

/// Первое пустое обязательное поле в порядке формы
pub fn check_mandatory(request: &RegistrationRequest) -> Result<(), ValidationError> {
    match HospitalField::MANDATORY
        .into_iter()
        .find(|field| request.trimmed(*field).is_none())
    {
        Some(field) => Err(ValidationError::required(field)),
        None => Ok(()),
    }
}

/// Шаблон PIN/ZIP зависит от страны
pub fn check_pin_code(pin_code: &str, country: &str) -> Result<(), ValidationError> {
    let (pattern, expected): (&Regex, &'static str) =
        match country.trim().to_ascii_lowercase().as_str() {
            "india" => (&*INDIA_PIN, "6 digits, not starting with 0"),
            "us" | "usa" | "united states" => (&*US_ZIP, "12345 or 12345-6789"),
            _ => (&*GENERIC_POSTAL, "3-10 letters, digits, spaces or dashes"),
        };
    if pattern.is_match(pin_code) {
        Ok(())
    } else {
        Err(format_error(HospitalField::PinCode, expected))
    }
}

pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    PHONE.is_match(phone) && (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

fn check_phone(request: &RegistrationRequest, field: HospitalField) -> Result<(), ValidationError> {
    match request.trimmed(field) {
        Some(phone) if !is_valid_phone(phone) => Err(format_error(
            field,
            "7-15 digits, optional leading +, spaces, dashes or brackets",
        )),
        _ => Ok(()),
    }
}

fn parse_int(request: &RegistrationRequest, field: HospitalField) -> Result<i64, ValidationError> {
    required(request, field)
        .parse::<i64>()
        .map_err(|_| ValidationError::new(field, ValidationRule::NotANumber))
}

/// Пустое необязательное число - 0
fn parse_optional_int(
    request: &RegistrationRequest,
    field: HospitalField,
) -> Result<i64, ValidationError> {
    match request.trimmed(field) {
        Some(_) => parse_int(request, field),
        None => Ok(0),
    }
}

fn to_count(field: HospitalField, value: i64, min: i64) -> Result<u32, ValidationError> {
    if value < min {
        return Err(ValidationError::new(
            field,
            ValidationRule::OutOfRange { min, max: None },
        ));
    }
    u32::try_from(value).map_err(|_| {
        ValidationError::new(
            field,
            ValidationRule::OutOfRange {
                min,
                max: Some(i64::from(u32::MAX)),
            },
        )
    })
}

/// Trimmed значение поля, которое уже прошло check_mandatory
fn required(request: &RegistrationRequest, field: HospitalField) -> &str {
    request.get(field).trim()
}

fn optional(request: &RegistrationRequest, field: HospitalField) -> Option<String> {
    request.trimmed(field).map(str::to_string)
}

fn format_error(field: HospitalField, expected: &'static str) -> ValidationError {
    ValidationError::new(field, ValidationRule::InvalidFormat { expected })
}

fn unknown(field: HospitalField) -> ValidationError {
    ValidationError::new(field, ValidationRule::UnknownVariant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
    }

    fn valid_request() -> RegistrationRequest {
        RegistrationRequest {
            hospital_name: "City General Hospital".to_string(),
            registration_number: "REG-001".to_string(),
            hospital_type: "General".to_string(),
            specialization_type: "Multi-Specialty".to_string(),
            established_year: "1995".to_string(),
            address_line1: "12 Main St".to_string(),
            city: "Metropolis".to_string(),
            state: "State X".to_string(),
            pin_code: "500001".to_string(),
            country: "Country Y".to_string(),
            phone_primary: "+1-555-0100".to_string(),
            emergency_contact: "+1-555-0199".to_string(),
            email: "admin@citygeneral.org".to_string(),
            total_beds: "120".to_string(),
            administrator_name: "Dr. A. Smith".to_string(),
            license_number: "LIC-555".to_string(),
            ..RegistrationRequest::default()
        }
    }

    #[test]
    fn test_valid_request_builds_entity_with_defaults() {
        let hospital = validate(&valid_request(), now()).unwrap();
        assert_eq!(hospital.id, None);
        assert_eq!(hospital.hospital_type, HospitalType::General);
        assert_eq!(
            hospital.specialization_type,
            SpecializationType::MultiSpecialty
        );
        assert_eq!(hospital.established_year, 1995);
        assert_eq!(hospital.total_beds, 120);
        assert_eq!(hospital.icu_beds, 0);
        assert_eq!(hospital.operation_theaters, 0);
        assert_eq!(hospital.accreditation, Accreditation::NotAccredited);
        assert_eq!(hospital.address_line2, None);
        assert!(hospital.is_active);
        assert_eq!(hospital.created_at, now());
        assert_eq!(hospital.updated_at, now());
    }

    #[test]
    fn test_values_are_trimmed() {
        let request = valid_request()
            .with(HospitalField::HospitalName, "  City General Hospital  ")
            .with(HospitalField::Website, "  https://citygeneral.org ");
        let hospital = validate(&request, now()).unwrap();
        assert_eq!(hospital.hospital_name, "City General Hospital");
        assert_eq!(hospital.website.as_deref(), Some("https://citygeneral.org"));
    }

    #[test]
    fn test_first_missing_field_in_form_order_is_reported() {
        let request = valid_request()
            .with(HospitalField::Email, "")
            .with(HospitalField::City, "   ");
        let error = validate(&request, now()).unwrap_err();
        assert_eq!(error, ValidationError::required(HospitalField::City));
    }

    #[test]
    fn test_mandatory_runs_before_format() {
        // Неверный email, но пустой license_number должен победить
        let request = valid_request()
            .with(HospitalField::Email, "not-an-email")
            .with(HospitalField::LicenseNumber, "");
        let error = validate(&request, now()).unwrap_err();
        assert_eq!(error.rule, ValidationRule::Required);
        assert_eq!(error.field, HospitalField::LicenseNumber);
    }

    #[rstest]
    #[case(HospitalField::HospitalType, "Spaceport", ValidationRule::UnknownVariant)]
    #[case(HospitalField::EstablishedYear, "nineteen", ValidationRule::NotANumber)]
    #[case(HospitalField::TotalBeds, "12.5", ValidationRule::NotANumber)]
    #[case(HospitalField::IcuBeds, "many", ValidationRule::NotANumber)]
    #[case(HospitalField::Accreditation, "Michelin", ValidationRule::UnknownVariant)]
    fn test_rule_violations(
        #[case] field: HospitalField,
        #[case] value: &str,
        #[case] rule: ValidationRule,
    ) {
        let error = validate(&valid_request().with(field, value), now()).unwrap_err();
        assert_eq!(error, ValidationError::new(field, rule));
    }

    #[rstest]
    #[case(HospitalField::PhonePrimary, "555")]
    #[case(HospitalField::PhonePrimary, "+1-555-0100-ext")]
    #[case(HospitalField::EmergencyContact, "1234567890123456")]
    #[case(HospitalField::PhoneAlternate, "call me")]
    #[case(HospitalField::Email, "admin@localhost")]
    #[case(HospitalField::Email, "admin citygeneral.org")]
    #[case(HospitalField::PinCode, "#1")]
    fn test_format_violations(#[case] field: HospitalField, #[case] value: &str) {
        let error = validate(&valid_request().with(field, value), now()).unwrap_err();
        assert_eq!(error.field, field);
        assert!(matches!(error.rule, ValidationRule::InvalidFormat { .. }));
    }

    #[rstest]
    #[case("India", "500001", true)]
    #[case("india", "050001", false)]
    #[case("India", "5000011", false)]
    #[case("USA", "94105", true)]
    #[case("US", "94105-1234", true)]
    #[case("USA", "9410", false)]
    #[case("United Kingdom", "SW1A 1AA", true)]
    #[case("Country Y", "500001", true)]
    fn test_pin_code_by_country(#[case] country: &str, #[case] pin: &str, #[case] ok: bool) {
        assert_eq!(check_pin_code(pin, country).is_ok(), ok);
    }

    #[rstest]
    #[case("+1-555-0100", true)]
    #[case("+91 (40) 2345 6789", true)]
    #[case("040-23456789", true)]
    #[case("123456", false)]
    #[case("-5550100", false)]
    fn test_phone_format(#[case] phone: &str, #[case] ok: bool) {
        assert_eq!(is_valid_phone(phone), ok);
    }

    #[rstest]
    #[case("1700")]
    #[case("1799")]
    #[case("2027")]
    fn test_year_out_of_range(#[case] year: &str) {
        let request = valid_request().with(HospitalField::EstablishedYear, year);
        let error = validate(&request, now()).unwrap_err();
        assert_eq!(
            error.rule,
            ValidationRule::OutOfRange {
                min: 1800,
                max: Some(2026)
            }
        );
    }

    #[test]
    fn test_year_boundaries_are_inclusive() {
        for year in ["1800", "2026"] {
            let request = valid_request().with(HospitalField::EstablishedYear, year);
            assert!(validate(&request, now()).is_ok(), "year {year}");
        }
    }

    #[test]
    fn test_capacity_rules() {
        let zero_beds = valid_request().with(HospitalField::TotalBeds, "0");
        assert_eq!(
            validate(&zero_beds, now()).unwrap_err().rule,
            ValidationRule::OutOfRange { min: 1, max: None }
        );

        let too_many_icu = valid_request().with(HospitalField::IcuBeds, "121");
        assert_eq!(
            validate(&too_many_icu, now()).unwrap_err().rule,
            ValidationRule::Exceeds {
                other: HospitalField::TotalBeds
            }
        );

        let negative_ot = valid_request().with(HospitalField::OperationTheaters, "-1");
        let error = validate(&negative_ot, now()).unwrap_err();
        assert_eq!(error.field, HospitalField::OperationTheaters);

        let full_icu = valid_request().with(HospitalField::IcuBeds, "120");
        assert_eq!(validate(&full_icu, now()).unwrap().icu_beds, 120);
    }

    #[test]
    fn test_free_text_specialization_is_kept() {
        let request = valid_request().with(HospitalField::SpecializationType, "Cardiac Care");
        let hospital = validate(&request, now()).unwrap();
        assert_eq!(
            hospital.specialization_type,
            SpecializationType::Other("Cardiac Care".to_string())
        );
    }
}
