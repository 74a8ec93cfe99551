use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Support,
    Department,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Student, Role::Support, Role::Department, Role::Admin];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "student" => Some(Self::Student),
            "support" => Some(Self::Support),
            "department" => Some(Self::Department),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Support => "support",
            Self::Department => "department",
            Self::Admin => "admin",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Support => "Support Agent",
            Self::Department => "Department Manager",
            Self::Admin => "Administrator",
        }
    }
}

/// Display label for a backend role name; unmapped names pass through unchanged.
pub fn role_label(name: &str) -> String {
    match Role::parse(name) {
        Some(role) => role.label().to_owned(),
        None => name.to_owned(),
    }
}

/// Display label for the numeric role id carried on a ticket's creator record.
/// The backend seeds roles in a fixed order, so the ids are stable.
pub fn creator_role_label(role_id: i64) -> &'static str {
    match role_id {
        1 => "Student",
        2 => "Support Agent",
        3 => "Department Manager",
        4 => "Administrator",
        _ => "unknown role",
    }
}
