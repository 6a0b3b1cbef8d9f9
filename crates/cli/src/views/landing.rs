//! Landing экран: сводка по зарегистрированной больнице

use chrono::{Datelike, Utc};
use console::style;
use domain::Hospital;
use std::fmt;
use std::io::{self, Write};

pub struct LandingView<'a> {
    hospital: &'a Hospital,
}

impl<'a> LandingView<'a> {
    pub fn new(hospital: &'a Hospital) -> Self {
        Self { hospital }
    }

    pub fn show(&self, output: &mut impl Write) -> io::Result<()> {
        output.write_all(self.render().as_bytes())?;
        output.flush()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LandingView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.hospital;

        writeln!(f)?;
        writeln!(f, "  {}", style(&h.hospital_name).cyan().bold())?;
        writeln!(
            f,
            "  {} · {} · est. {} ({} years)",
            h.hospital_type,
            h.specialization_type,
            h.established_year,
            h.years_in_operation(Utc::now().year())
        )?;
        writeln!(f)?;

        section(f, "Identity")?;
        row(f, "Registration No.", &h.registration_number)?;
        row(f, "Status", if h.is_active { "Active" } else { "Inactive" })?;

        section(f, "Address")?;
        row(f, "Address", &h.full_address())?;

        section(f, "Contact")?;
        row(f, "Phone", &h.phone_primary)?;
        if let Some(alternate) = &h.phone_alternate {
            row(f, "Alternate", alternate)?;
        }
        row(f, "Emergency", &h.emergency_contact)?;
        row(f, "Email", &h.email)?;
        if let Some(website) = &h.website {
            row(f, "Website", website)?;
        }

        section(f, "Capacity")?;
        row(f, "Total Beds", &h.total_beds.to_string())?;
        row(f, "ICU Beds", &h.icu_beds.to_string())?;
        row(f, "Operation Theaters", &h.operation_theaters.to_string())?;

        section(f, "Administration")?;
        row(f, "Administrator", &h.administrator_name)?;
        row(f, "License No.", &h.license_number)?;
        row(f, "Accreditation", h.accreditation.as_str())?;
        if let Some(gstin) = &h.gstin {
            row(f, "GSTIN", gstin)?;
        }

        section(f, "Audit")?;
        row(
            f,
            "Registered",
            &h.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        )?;
        row(
            f,
            "Last Updated",
            &h.updated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        )
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "  {}", style(title).yellow().bold())
}

fn row(f: &mut fmt::Formatter<'_>, label: &str, value: &str) -> fmt::Result {
    writeln!(f, "    {:<20} {}", style(label).dim(), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use domain::services::validation::validate;
    use domain::{HospitalField, HospitalId, RegistrationRequest};

    fn hospital() -> Hospital {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let request = [
            (HospitalField::HospitalName, "Riverside Hospital"),
            (HospitalField::RegistrationNumber, "REG-77"),
            (HospitalField::HospitalType, "Private"),
            (HospitalField::SpecializationType, "Cardiology"),
            (HospitalField::EstablishedYear, "1990"),
            (HospitalField::AddressLine1, "5 River Rd"),
            (HospitalField::City, "Pune"),
            (HospitalField::State, "Maharashtra"),
            (HospitalField::PinCode, "411001"),
            (HospitalField::Country, "India"),
            (HospitalField::PhonePrimary, "+91 20 5555 0101"),
            (HospitalField::EmergencyContact, "+91 20 5555 0102"),
            (HospitalField::Email, "desk@riverside.in"),
            (HospitalField::TotalBeds, "80"),
            (HospitalField::AdministratorName, "Dr. P. Kulkarni"),
            (HospitalField::LicenseNumber, "LIC-77"),
        ]
        .into_iter()
        .fold(RegistrationRequest::default(), |request, (field, value)| {
            request.with(field, value)
        });
        validate(&request, now).unwrap().with_id(HospitalId::new(1))
    }

    #[test]
    fn test_render_lists_sections_and_skips_blank_optionals() {
        let hospital = hospital();
        let rendered = LandingView::new(&hospital).render();

        assert!(rendered.contains("Riverside Hospital"));
        assert!(rendered.contains("REG-77"));
        assert!(rendered.contains("LIC-77"));
        assert!(rendered.contains("2024-03-01 09:30 UTC"));
        assert!(!rendered.contains("Website"));
        assert!(!rendered.contains("GSTIN"));
    }

    #[test]
    fn test_show_writes_rendered_text() {
        let hospital = hospital();
        let view = LandingView::new(&hospital);
        let mut output = Vec::new();

        view.show(&mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), view.render());
    }
}
