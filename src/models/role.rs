use super::Choice;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    SchoolAdmin,
    Teacher,
    Student,
    Parent,
}

impl RoleName {
    pub fn display_name(&self) -> &'static str {
        match self {
            RoleName::SchoolAdmin => "School Administrator",
            RoleName::Teacher => "Teacher",
            RoleName::Student => "Student",
            RoleName::Parent => "Parent",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RoleName::SchoolAdmin => "Full access to all school management features",
            RoleName::Teacher => {
                "Access to grade management, attendance, and class-related features"
            }
            RoleName::Student => "Access to personal grades, attendance, and announcements",
            RoleName::Parent => {
                "Access to child's academic information and school communication"
            }
        }
    }

    /// Staff roles see today's attendance summary on the dashboard.
    pub fn is_staff(&self) -> bool {
        matches!(self, RoleName::SchoolAdmin | RoleName::Teacher)
    }
}

impl Choice for RoleName {
    const ALL: &'static [Self] = &[
        RoleName::SchoolAdmin,
        RoleName::Teacher,
        RoleName::Student,
        RoleName::Parent,
    ];
    const FIELD: &'static str = "role";

    fn to_db_str(&self) -> &'static str {
        match self {
            RoleName::SchoolAdmin => "school_admin",
            RoleName::Teacher => "teacher",
            RoleName::Student => "student",
            RoleName::Parent => "parent",
        }
    }

    /// `admin` is accepted as a shorthand on the command line.
    fn parse(input: &str) -> crate::errors::AppResult<Self> {
        if input.trim().eq_ignore_ascii_case("admin") {
            return Ok(RoleName::SchoolAdmin);
        }
        let norm = input.trim().to_lowercase().replace('-', "_");
        Self::from_db_str(&norm).ok_or_else(|| {
            crate::errors::AppError::validation(format!(
                "invalid role '{}' (allowed: {}, admin)",
                input,
                Self::allowed()
            ))
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Role {
    pub id: i64,
    pub name: RoleName,
    pub display_name: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_shorthand_maps_to_school_admin() {
        assert_eq!(RoleName::parse("Admin").unwrap(), RoleName::SchoolAdmin);
        assert_eq!(
            RoleName::parse("school-admin").unwrap(),
            RoleName::SchoolAdmin
        );
    }

    #[test]
    fn only_admin_and_teacher_are_staff() {
        assert!(RoleName::SchoolAdmin.is_staff());
        assert!(RoleName::Teacher.is_staff());
        assert!(!RoleName::Student.is_staff());
        assert!(!RoleName::Parent.is_staff());
    }
}
