use crate::db::DatabaseError;

/// Macro to generate enum with as_str + FromStr + string-form serde.
///
/// Serialization uses the canonical wire string (`as_str`), not the
/// variant name, so the stored form and the JSON form never diverge.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(Role {
    Patient => "patient",
    HealthcareProvider => "healthcare_provider",
    Ngo => "ngo",
});

str_enum!(ReportType {
    Illness => "illness",
    Outbreak => "outbreak",
    MentalHealth => "mentalHealth",
});

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn role_round_trip() {
        for (variant, s) in [
            (Role::Patient, "patient"),
            (Role::HealthcareProvider, "healthcare_provider"),
            (Role::Ngo, "ngo"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Role::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn role_rejects_unknown_value() {
        assert!(Role::from_str("admin").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn report_type_round_trip() {
        for (variant, s) in [
            (ReportType::Illness, "illness"),
            (ReportType::Outbreak, "outbreak"),
            (ReportType::MentalHealth, "mentalHealth"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(ReportType::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn serde_uses_wire_string() {
        let json = serde_json::to_string(&Role::HealthcareProvider).unwrap();
        assert_eq!(json, r#""healthcare_provider""#);

        let back: ReportType = serde_json::from_str(r#""mentalHealth""#).unwrap();
        assert_eq!(back, ReportType::MentalHealth);
    }

    #[test]
    fn serde_rejects_unknown_value() {
        let result: Result<Role, _> = serde_json::from_str(r#""superuser""#);
        assert!(result.is_err());
    }
}
