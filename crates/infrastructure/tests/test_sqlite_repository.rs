use chrono::{TimeZone, Utc};
use domain::{
    Accreditation, DomainError, Hospital, HospitalField, HospitalId, HospitalRepository,
    HospitalSearch, HospitalType, InMemoryHospitalRepository, SpecializationType,
};
use infrastructure::{ConnectionProvider, SchemaManager, SqliteHospitalRepository};
use rstest::{fixture, rstest};
use std::sync::Arc;
use tempfile::TempDir;

struct TestStore {
    provider: Arc<ConnectionProvider>,
    repository: SqliteHospitalRepository,
    _temp_dir: TempDir,
}

#[fixture]
fn store() -> TestStore {
    let temp_dir = TempDir::new().unwrap();
    let provider = Arc::new(ConnectionProvider::open(temp_dir.path().join("hms.db")).unwrap());
    SchemaManager::new(provider.clone())
        .apply_migrations()
        .unwrap();
    TestStore {
        repository: SqliteHospitalRepository::new(provider.clone()),
        provider,
        _temp_dir: temp_dir,
    }
}

fn hospital(name: &str, registration_number: &str, license_number: &str, city: &str) -> Hospital {
    let timestamp = Utc.with_ymd_and_hms(2001, 1, 10, 8, 0, 0).unwrap();
    Hospital {
        id: None,
        hospital_name: name.to_string(),
        registration_number: registration_number.to_string(),
        hospital_type: HospitalType::Private,
        specialization_type: SpecializationType::Other("Cardiac Care".to_string()),
        established_year: 1987,
        address_line1: "221 Lake Road".to_string(),
        address_line2: Some("Near Clock Tower".to_string()),
        city: city.to_string(),
        state: "Telangana".to_string(),
        pin_code: "500001".to_string(),
        country: "India".to_string(),
        phone_primary: "+91 40 2345 6789".to_string(),
        phone_alternate: None,
        emergency_contact: "+91 40 2345 0000".to_string(),
        email: "desk@example.org".to_string(),
        website: Some("https://example.org".to_string()),
        total_beds: 250,
        icu_beds: 30,
        operation_theaters: 6,
        administrator_name: "Dr. R. Rao".to_string(),
        license_number: license_number.to_string(),
        accreditation: Accreditation::NabhIso,
        gstin: Some("36AABCU9603R1ZM".to_string()),
        is_active: true,
        created_at: timestamp,
        updated_at: timestamp,
    }
}

fn names(rows: Vec<Hospital>) -> Vec<String> {
    rows.into_iter().map(|h| h.hospital_name).collect()
}

#[rstest]
fn test_round_trip_preserves_every_field(store: TestStore) {
    let original = hospital("Lakeview Hospital", "REG-100", "LIC-100", "Hyderabad");

    assert!(!store.repository.exists_any().unwrap());
    let id = store.repository.save(&original).unwrap();

    let loaded = store.repository.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, original.with_id(id));
    assert!(store.repository.exists_any().unwrap());
}

#[rstest]
fn test_missing_row_is_none(store: TestStore) {
    assert_eq!(store.repository.find_by_id(HospitalId::new(42)).unwrap(), None);
    assert_eq!(
        store
            .repository
            .find_by_registration_number("REG-404")
            .unwrap(),
        None
    );
}

#[rstest]
fn test_unique_violation_maps_to_duplicate_key(store: TestStore) {
    store
        .repository
        .save(&hospital("Lakeview Hospital", "REG-100", "LIC-100", "Hyderabad"))
        .unwrap();

    let error = store
        .repository
        .save(&hospital("Other Hospital", "REG-200", "LIC-100", "Pune"))
        .unwrap_err();

    assert_eq!(
        error,
        DomainError::duplicate(HospitalField::LicenseNumber, "LIC-100")
    );
    assert!(store.repository.exists_license_number("LIC-100").unwrap());
    assert!(!store.repository.exists_registration_number("REG-200").unwrap());
}

#[rstest]
fn test_check_constraint_maps_to_storage(store: TestStore) {
    let mut invalid = hospital("Broken", "REG-1", "LIC-1", "Pune");
    invalid.icu_beds = invalid.total_beds + 1;

    let error = store.repository.save(&invalid).unwrap_err();

    assert!(matches!(error, DomainError::Storage(_)));
    assert!(!store.repository.exists_any().unwrap());
}

#[rstest]
fn test_find_all_orders_by_name_and_filters_inactive(store: TestStore) {
    let mut dormant = hospital("Apollo Annex", "REG-3", "LIC-3", "Chennai");
    dormant.is_active = false;
    store
        .repository
        .save(&hospital("Zenith Care", "REG-1", "LIC-1", "Pune"))
        .unwrap();
    store
        .repository
        .save(&hospital("Metro Clinic", "REG-2", "LIC-2", "Mumbai"))
        .unwrap();
    store.repository.save(&dormant).unwrap();

    assert_eq!(
        names(store.repository.find_all(true).unwrap()),
        vec!["Metro Clinic", "Zenith Care"]
    );
    assert_eq!(
        names(store.repository.find_all(false).unwrap()),
        vec!["Apollo Annex", "Metro Clinic", "Zenith Care"]
    );
}

#[rstest]
fn test_search_filters(store: TestStore) {
    let first = store
        .repository
        .save(&hospital("City General Hospital", "REG-1", "LIC-1", "Metropolis"))
        .unwrap();
    store
        .repository
        .save(&hospital("General Care Clinic", "REG-2", "LIC-2", "Gotham"))
        .unwrap();

    let by_name = store
        .repository
        .search(&HospitalSearch::by_name("general"))
        .unwrap();
    assert_eq!(by_name.len(), 2);

    let by_city = store
        .repository
        .search(&HospitalSearch::by_city("metro"))
        .unwrap();
    assert_eq!(by_city.len(), 1);
    assert_eq!(by_city[0].id, Some(first));

    let by_id = store
        .repository
        .search(&HospitalSearch {
            id: Some(first),
            ..HospitalSearch::default()
        })
        .unwrap();
    assert_eq!(by_id.len(), 1);

    let nothing = store
        .repository
        .search(&HospitalSearch {
            name: Some("general".to_string()),
            city: Some("Atlantis".to_string()),
            ..HospitalSearch::default()
        })
        .unwrap();
    assert!(nothing.is_empty());
}

#[rstest]
#[case::percent("100%")]
#[case::underscore_after_prefix("St_")]
#[case::underscore_in_name("North_")]
fn test_search_treats_wildcards_literally(store: TestStore, #[case] needle: &str) {
    let in_memory = InMemoryHospitalRepository::new();
    for (name, suffix) in [
        ("North_East Clinic", "1"),
        ("Northern Hospital", "2"),
        ("St. Anne 100% Care", "3"),
    ] {
        let row = hospital(name, &format!("REG-{suffix}"), &format!("LIC-{suffix}"), "Pune");
        store.repository.save(&row).unwrap();
        in_memory.save(&row).unwrap();
    }

    let filter = HospitalSearch::by_name(needle);
    let from_sqlite = names(store.repository.search(&filter).unwrap());
    let from_memory = names(in_memory.search(&filter).unwrap());

    assert_eq!(from_sqlite, from_memory);
    assert!(from_sqlite.len() <= 1, "{needle} matched {from_sqlite:?}");
}

#[rstest]
fn test_update_trigger_stamps_updated_at(store: TestStore) {
    let original = hospital("Lakeview Hospital", "REG-100", "LIC-100", "Hyderabad");
    let id = store.repository.save(&original).unwrap();

    store
        .provider
        .acquire()
        .execute(
            "UPDATE hospitals SET website = NULL WHERE id = ?1",
            [id.value()],
        )
        .unwrap();

    let updated = store.repository.find_by_id(id).unwrap().unwrap();
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at > original.updated_at);
    assert_eq!(updated.website, None);
}

#[test]
fn test_storage_failure_without_schema() {
    let provider = Arc::new(ConnectionProvider::open_in_memory().unwrap());
    let repository = SqliteHospitalRepository::new(provider);

    let error = repository.exists_any().unwrap_err();

    assert!(!error.is_user_fixable());
}
