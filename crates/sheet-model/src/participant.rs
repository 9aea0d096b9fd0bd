//! Participants and roles

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Role of a participant within a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Authors rows, controls visibility
    Mentor,
    /// Reads visible rows, writes own responses
    Student,
}

impl Role {
    /// Both roles, mentor first
    pub const ALL: [Role; 2] = [Role::Mentor, Role::Student];

    /// Check for mentor role
    #[inline]
    #[must_use]
    pub fn is_mentor(self) -> bool {
        matches!(self, Role::Mentor)
    }

    /// Lowercase wire name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Mentor => "mentor",
            Role::Student => "student",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mentor" => Ok(Role::Mentor),
            "student" => Ok(Role::Student),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// Unknown role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}', expected 'mentor' or 'student'")]
pub struct ParseRoleError(pub String);

/// A resolved identity acting on a sheet
///
/// Identity is keyed by display name; names are assumed unique within a
/// sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    name: String,
    role: Role,
}

impl Participant {
    /// Create participant
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    /// Mentor shorthand
    #[inline]
    #[must_use]
    pub fn mentor(name: impl Into<String>) -> Self {
        Self::new(name, Role::Mentor)
    }

    /// Student shorthand
    #[inline]
    #[must_use]
    pub fn student(name: impl Into<String>) -> Self {
        Self::new(name, Role::Student)
    }

    /// Display name (also the response key)
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role
    #[inline]
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Check for mentor role
    #[inline]
    #[must_use]
    pub fn is_mentor(&self) -> bool {
        self.role.is_mentor()
    }
}

impl Display for Participant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Mentor".parse::<Role>(), Ok(Role::Mentor));
        assert_eq!(" student ".parse::<Role>(), Ok(Role::Student));
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn role_names_parse_back() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
            assert_eq!(role.is_mentor(), role == Role::Mentor);
        }
    }

    #[test]
    fn participant_display() {
        let p = Participant::mentor("Kim");
        assert_eq!(p.to_string(), "Kim (mentor)");
        assert!(p.is_mentor());
        assert!(!Participant::student("Alice").is_mentor());
    }
}
