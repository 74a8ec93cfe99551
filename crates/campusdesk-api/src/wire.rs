use campusdesk_core::{ListFilters, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleInfo {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub role: RoleInfo,
    #[serde(default)]
    pub department_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTicketRequest {
    pub title: String,
    pub description: String,
    pub department_name: String,
    pub priority: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub department: String,
    pub priority: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReassignSupportRequest {
    pub new_support_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateStatusRequest {
    pub new_status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailBody {
    pub detail: String,
}

/// Which ticket list endpoint a fetch hits. Filters are forwarded verbatim;
/// the department endpoint only understands the status and sort inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketListScope {
    Mine,
    AssignedSupport,
    Department(ListFilters),
    All(ListFilters),
}

impl TicketListScope {
    pub fn for_role(role: Role, filters: ListFilters) -> Self {
        match role {
            Role::Student => Self::Mine,
            Role::Support => Self::AssignedSupport,
            Role::Department => Self::Department(filters),
            Role::Admin => Self::All(filters),
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Mine => "tickets/my",
            Self::AssignedSupport => "tickets/support",
            Self::Department(_) => "tickets/department",
            Self::All(_) => "tickets/",
        }
    }

    pub fn query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        match self {
            Self::Mine | Self::AssignedSupport => {}
            Self::Department(filters) => {
                push_status_and_sort(&mut params, filters);
            }
            Self::All(filters) => {
                if let Some(department) = &filters.department {
                    params.push(("department_filter".to_owned(), department.clone()));
                }
                push_status_and_sort(&mut params, filters);
            }
        }
        params
    }
}

fn push_status_and_sort(params: &mut Vec<(String, String)>, filters: &ListFilters) {
    if let Some(status) = &filters.status {
        params.push(("status_filter".to_owned(), status.clone()));
    }
    if filters.sort_by_priority {
        params.push(("sort_by_priority".to_owned(), "true".to_owned()));
    }
}
