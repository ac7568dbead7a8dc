use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::*;

use super::column_parse_error;

/// Role profile persisted together with a new user.
#[derive(Debug, Clone)]
pub enum RoleProfile {
    Patient(Patient),
    Provider(HealthcareProvider),
    Ngo(Ngo),
}

impl RoleProfile {
    fn role(&self) -> Role {
        match self {
            Self::Patient(_) => Role::Patient,
            Self::Provider(_) => Role::HealthcareProvider,
            Self::Ngo(_) => Role::Ngo,
        }
    }
}

/// Persist a user and its role profile as one unit of work. Either both
/// rows exist afterwards or neither does.
pub fn create_user_with_profile(
    conn: &mut Connection,
    user: &User,
    profile: &RoleProfile,
) -> Result<(), DatabaseError> {
    if profile.role() != user.role {
        return Err(DatabaseError::ConstraintViolation(format!(
            "role profile {} does not match user role {}",
            profile.role(),
            user.role
        )));
    }

    let tx = conn.transaction()?;
    insert_user(&tx, user)?;
    match profile {
        RoleProfile::Patient(patient) => super::insert_patient(&tx, patient)?,
        RoleProfile::Provider(provider) => super::insert_provider(&tx, provider)?,
        RoleProfile::Ngo(ngo) => super::insert_ngo(&tx, ngo)?,
    }
    tx.commit()?;
    Ok(())
}

pub fn insert_user(conn: &Connection, user: &User) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO users (id, fullname, email, password_hash, role, phone,
                            street, city, state, pin_code, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            user.id.to_string(),
            user.fullname,
            user.email,
            user.password_hash,
            user.role.as_str(),
            user.phone,
            user.address.street,
            user.address.city,
            user.address.state,
            user.address.pin_code,
            user.created_at,
            user.updated_at,
        ],
    )?;
    Ok(())
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    let role_str: String = row.get(4)?;
    let role = role_str
        .parse()
        .map_err(|e: DatabaseError| column_parse_error(4, e))?;

    Ok(User {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
        fullname: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        role,
        phone: row.get(5)?,
        address: Address {
            street: row.get(6)?,
            city: row.get(7)?,
            state: row.get(8)?,
            pin_code: row.get(9)?,
        },
        created_at: row.get::<_, DateTime<Utc>>(10)?,
        updated_at: row.get::<_, DateTime<Utc>>(11)?,
    })
}

const USER_COLUMNS: &str = "id, fullname, email, password_hash, role, phone,
                            street, city, state, pin_code, created_at, updated_at";

pub fn get_user(conn: &Connection, id: &Uuid) -> Result<Option<User>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;
    let user = stmt
        .query_row(params![id.to_string()], row_to_user)
        .optional()?;
    Ok(user)
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?1"
    ))?;
    let user = stmt.query_row(params![email], row_to_user).optional()?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn user_insert_and_lookup_by_email() {
        let conn = open_memory_database().unwrap();
        let user = seed_user(&conn, Role::Patient, "Asha Rao", "asha@example.com");

        let found = find_user_by_email(&conn, "asha@example.com").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.role, Role::Patient);
        assert_eq!(found.address.city, "Bengaluru");

        assert!(find_user_by_email(&conn, "nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_rejected() {
        let conn = open_memory_database().unwrap();
        seed_user(&conn, Role::Patient, "Asha Rao", "asha@example.com");
        let dup = make_user(Role::Ngo, "Other", "asha@example.com");
        assert!(insert_user(&conn, &dup).is_err());
    }

    #[test]
    fn create_with_profile_commits_both_rows() {
        let mut conn = open_memory_database().unwrap();
        let user = make_user(Role::Patient, "Asha Rao", "asha@example.com");
        let profile = RoleProfile::Patient(Patient {
            id: uuid::Uuid::new_v4(),
            user_id: user.id,
            preferred_language: "english".into(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        });

        create_user_with_profile(&mut conn, &user, &profile).unwrap();

        let users: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))
            .unwrap();
        let patients: i64 = conn
            .query_row("SELECT COUNT(*) FROM patients", [], |r| r.get(0))
            .unwrap();
        assert_eq!((users, patients), (1, 1));
    }

    #[test]
    fn create_with_profile_rolls_back_on_profile_failure() {
        let mut conn = open_memory_database().unwrap();

        let first = make_user(Role::HealthcareProvider, "Dr. Iyer", "iyer@clinic.in");
        let first_profile = RoleProfile::Provider(HealthcareProvider {
            id: uuid::Uuid::new_v4(),
            user_id: first.id,
            license_id: "KA-2201".into(),
            specialization: "Cardiology".into(),
            associated_organization: "City Hospital".into(),
            years_of_experience: 12,
            preferred_language: "english".into(),
            booking_link: String::new(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        });
        create_user_with_profile(&mut conn, &first, &first_profile).unwrap();

        // Same license id — profile insert fails, user row must roll back too
        let second = make_user(Role::HealthcareProvider, "Dr. Dey", "dey@clinic.in");
        let second_profile = RoleProfile::Provider(HealthcareProvider {
            id: uuid::Uuid::new_v4(),
            user_id: second.id,
            license_id: "KA-2201".into(),
            specialization: "Neurology".into(),
            associated_organization: "City Hospital".into(),
            years_of_experience: 4,
            preferred_language: "english".into(),
            booking_link: String::new(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        });
        assert!(create_user_with_profile(&mut conn, &second, &second_profile).is_err());

        let users: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))
            .unwrap();
        assert_eq!(users, 1);
        assert!(find_user_by_email(&conn, "dey@clinic.in").unwrap().is_none());
    }

    #[test]
    fn create_with_profile_rejects_role_mismatch() {
        let mut conn = open_memory_database().unwrap();
        let user = make_user(Role::Ngo, "Meera", "meera@carengo.org");
        let profile = RoleProfile::Patient(Patient {
            id: uuid::Uuid::new_v4(),
            user_id: user.id,
            preferred_language: "english".into(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        });

        let result = create_user_with_profile(&mut conn, &user, &profile);
        assert!(matches!(
            result,
            Err(DatabaseError::ConstraintViolation(_))
        ));
        let users: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))
            .unwrap();
        assert_eq!(users, 0);
    }
}
