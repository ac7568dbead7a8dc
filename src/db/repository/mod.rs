//! Repository layer — entity-scoped database operations.
//!
//! Read pipelines follow one shape per collection: optional match stage,
//! join to the owning user, project a flattened view row that never
//! carries raw owner identifiers. Insertion order is preserved; no
//! explicit sort is applied.

mod event;
mod ngo;
mod patient;
mod prescription;
mod provider;
mod recommendation;
mod report;
mod user;

use super::DatabaseError;

pub use event::*;
pub use ngo::*;
pub use patient::*;
pub use prescription::*;
pub use provider::*;
pub use recommendation::*;
pub use report::*;
pub use user::*;

/// Wrap a domain-level parse failure so it can surface through a rusqlite
/// row mapper.
pub(crate) fn column_parse_error(idx: usize, err: DatabaseError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;
    use rusqlite::Connection;
    use uuid::Uuid;

    use crate::models::*;

    pub fn make_user(role: Role, fullname: &str, email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            fullname: fullname.into(),
            email: email.into(),
            password_hash: "pbkdf2$test".into(),
            role,
            phone: "9000000000".into(),
            address: Address {
                street: "1 MG Road".into(),
                city: "Bengaluru".into(),
                state: "Karnataka".into(),
                pin_code: "560001".into(),
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn seed_user(conn: &Connection, role: Role, fullname: &str, email: &str) -> User {
        let user = make_user(role, fullname, email);
        super::insert_user(conn, &user).unwrap();
        user
    }

    pub fn make_event(listed_by: &User, name: &str, longitude: f64, latitude: f64) -> Event {
        Event {
            id: Uuid::new_v4(),
            name: name.into(),
            event_date: "2026-09-12".into(),
            listed_by: listed_by.id,
            location: GeoPoint::new(longitude, latitude).unwrap(),
            location_description: "Community hall".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn make_report(reported_by: &User, title: &str, report_type: ReportType) -> Report {
        Report {
            id: Uuid::new_v4(),
            title: title.into(),
            report_type,
            details: "Several cases in the neighbourhood".into(),
            reported_by: reported_by.id,
            location: GeoPoint::new(77.5, 12.9).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::test_support::*;
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::models::*;

    fn test_db() -> rusqlite::Connection {
        open_memory_database().unwrap()
    }

    #[test]
    fn event_insert_and_projected_list() {
        let conn = test_db();
        let lister = seed_user(&conn, Role::Ngo, "Meera Nair", "meera@carengo.org");
        insert_event(&conn, &make_event(&lister, "Free eye camp", 77.5, 12.9)).unwrap();

        let views = list_events(&conn).unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].listed_by, "Meera Nair");
        assert_eq!(views[0].location, GeoPoint::new(77.5, 12.9).unwrap());
    }

    #[test]
    fn event_list_scoped_to_owner() {
        let conn = test_db();
        let a = seed_user(&conn, Role::Ngo, "A", "a@example.com");
        let b = seed_user(&conn, Role::Ngo, "B", "b@example.com");
        insert_event(&conn, &make_event(&a, "Camp A", 77.0, 12.0)).unwrap();
        insert_event(&conn, &make_event(&b, "Camp B1", 78.0, 13.0)).unwrap();
        insert_event(&conn, &make_event(&b, "Camp B2", 79.0, 14.0)).unwrap();

        let mine = list_events_by_owner(&conn, &b.id).unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|e| e.listed_by == "B"));
    }

    #[test]
    fn event_detail_by_id() {
        let conn = test_db();
        let lister = seed_user(&conn, Role::HealthcareProvider, "Dr. Rao", "rao@clinic.in");
        let event = make_event(&lister, "Vaccination drive", 72.8, 19.0);
        insert_event(&conn, &event).unwrap();

        let view = get_event(&conn, &event.id).unwrap().unwrap();
        assert_eq!(view.name, "Vaccination drive");
        assert_eq!(view.listed_by, "Dr. Rao");

        assert!(get_event(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn event_insert_rejects_unknown_owner() {
        let conn = test_db();
        let ghost = make_user(Role::Ngo, "Ghost", "ghost@example.com");
        // Not inserted — the owner reference cannot resolve
        let result = insert_event(&conn, &make_event(&ghost, "Orphan camp", 77.0, 12.0));
        assert!(result.is_err());
    }

    #[test]
    fn report_list_projects_reporter_name() {
        let conn = test_db();
        let reporter = seed_user(&conn, Role::Patient, "Asha Rao", "asha@example.com");
        insert_report(
            &conn,
            &make_report(&reporter, "Dengue cluster", ReportType::Outbreak),
        )
        .unwrap();

        let views = list_reports(&conn).unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].reported_by, "Asha Rao");
        assert_eq!(views[0].report_type, ReportType::Outbreak);
    }

    #[test]
    fn report_detail_without_ngo_is_partial() {
        let conn = test_db();
        let reporter = seed_user(&conn, Role::Patient, "Asha Rao", "asha@example.com");
        let report = make_report(&reporter, "Flu cases", ReportType::Illness);
        insert_report(&conn, &report).unwrap();

        let view = get_report(&conn, &report.id).unwrap().unwrap();
        assert_eq!(view.reported_by, "Asha Rao");
        assert_eq!(view.ngo_name, None);
    }

    #[test]
    fn report_detail_joins_ngo_by_contact_person() {
        let conn = test_db();
        let contact = seed_user(&conn, Role::Ngo, "Meera Nair", "meera@carengo.org");
        insert_ngo(
            &conn,
            &Ngo {
                id: Uuid::new_v4(),
                contact_person_id: contact.id,
                organization_name: "CareNGO".into(),
                area_of_focus: "community health".into(),
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            },
        )
        .unwrap();

        let report = make_report(&contact, "Outbreak watch", ReportType::Outbreak);
        insert_report(&conn, &report).unwrap();

        let view = get_report(&conn, &report.id).unwrap().unwrap();
        assert_eq!(view.ngo_name.as_deref(), Some("CareNGO"));
    }

    #[test]
    fn provider_directory_projection() {
        let conn = test_db();
        let user = seed_user(&conn, Role::HealthcareProvider, "Dr. Iyer", "iyer@clinic.in");
        insert_provider(
            &conn,
            &HealthcareProvider {
                id: Uuid::new_v4(),
                user_id: user.id,
                license_id: "KA-2201".into(),
                specialization: "Cardiology".into(),
                associated_organization: "City Hospital".into(),
                years_of_experience: 12,
                preferred_language: "english".into(),
                booking_link: String::new(),
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            },
        )
        .unwrap();

        let providers = list_providers(&conn).unwrap();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].id, user.id);
        assert_eq!(providers[0].fullname, "Dr. Iyer");
        assert_eq!(providers[0].years_of_experience, 12);
        assert_eq!(providers[0].booking_link, "");
    }

    #[test]
    fn booking_link_update_is_scoped_to_owner() {
        let conn = test_db();
        let user = seed_user(&conn, Role::HealthcareProvider, "Dr. Iyer", "iyer@clinic.in");
        insert_provider(
            &conn,
            &HealthcareProvider {
                id: Uuid::new_v4(),
                user_id: user.id,
                license_id: "KA-2201".into(),
                specialization: "Cardiology".into(),
                associated_organization: "City Hospital".into(),
                years_of_experience: 12,
                preferred_language: "english".into(),
                booking_link: String::new(),
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            },
        )
        .unwrap();

        assert!(update_booking_link(&conn, &user.id, "https://cal.com/iyer").unwrap());
        let provider = get_provider_by_user(&conn, &user.id).unwrap().unwrap();
        assert_eq!(provider.booking_link, "https://cal.com/iyer");

        // No provider profile for this user — nothing updated
        assert!(!update_booking_link(&conn, &Uuid::new_v4(), "https://cal.com/x").unwrap());
    }

    #[test]
    fn patient_profile_view_joins_user() {
        let conn = test_db();
        let user = seed_user(&conn, Role::Patient, "Asha Rao", "asha@example.com");
        insert_patient(
            &conn,
            &Patient {
                id: Uuid::new_v4(),
                user_id: user.id,
                preferred_language: "hindi".into(),
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            },
        )
        .unwrap();

        let profile = get_patient_profile(&conn, &user.id).unwrap().unwrap();
        assert_eq!(profile.fullname, "Asha Rao");
        assert_eq!(profile.email, "asha@example.com");
        assert_eq!(profile.preferred_language, "hindi");

        assert!(get_patient_profile(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn list_order_is_stable_with_no_intervening_writes() {
        let conn = test_db();
        let lister = seed_user(&conn, Role::Ngo, "Meera", "meera@carengo.org");
        for i in 0..5 {
            insert_event(
                &conn,
                &make_event(&lister, &format!("Camp {i}"), 70.0 + i as f64, 10.0),
            )
            .unwrap();
        }

        let first = list_events(&conn).unwrap();
        let second = list_events(&conn).unwrap();
        let names_a: Vec<_> = first.iter().map(|e| e.name.clone()).collect();
        let names_b: Vec<_> = second.iter().map(|e| e.name.clone()).collect();
        assert_eq!(names_a, names_b);
    }
}
