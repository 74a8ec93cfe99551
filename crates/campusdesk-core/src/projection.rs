use serde::{Deserialize, Serialize};

use crate::role::{creator_role_label, Role};
use crate::ticket::{SupportStaffEntry, Ticket};

pub const EMPTY_LIST_NOTICE: &str = "No tickets found.";
pub const FILTERED_EMPTY_LIST_NOTICE: &str = "No tickets match the current filters.";

/// The four mutually exclusive view sections. A known role maps to exactly
/// one of them; an unknown or absent role selects none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleSection {
    Student,
    Support,
    Department,
    Admin,
}

impl From<Role> for RoleSection {
    fn from(role: Role) -> Self {
        match role {
            Role::Student => Self::Student,
            Role::Support => Self::Support,
            Role::Department => Self::Department,
            Role::Admin => Self::Admin,
        }
    }
}

impl RoleSection {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Student => "My Tickets",
            Self::Support => "Assigned Tickets",
            Self::Department => "Department Queue",
            Self::Admin => "All Tickets",
        }
    }
}

/// List filter inputs, forwarded verbatim to the backend as query params.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    pub department: Option<String>,
    pub status: Option<String>,
    pub sort_by_priority: bool,
}

impl ListFilters {
    pub fn is_active(&self) -> bool {
        self.department.is_some() || self.status.is_some()
    }
}

/// Per-ticket control visibility, decided purely from the role and the
/// ticket itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketControls {
    pub assign_department: bool,
    pub reassign_support: bool,
    pub status_update: bool,
    pub comment_form: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketCard {
    pub ticket: Ticket,
    pub controls: TicketControls,
    /// "email (role label)" line, present only for admin/department views.
    pub creator_info: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    pub section: Option<RoleSection>,
    pub cards: Vec<TicketCard>,
    pub reassign_options: Vec<SupportStaffEntry>,
    pub empty_notice: Option<String>,
}

/// Pure projection from (role, tickets, support staff, filters) to the view
/// model the frontend commits to the terminal. Tickets keep the backend's
/// order; no client-side sorting or filtering happens here.
pub fn project_view(
    role: Option<Role>,
    tickets: &[Ticket],
    support_staff: &[SupportStaffEntry],
    filters: &ListFilters,
) -> ViewModel {
    let section = role.map(RoleSection::from);

    let cards: Vec<TicketCard> = match role {
        Some(role) => tickets
            .iter()
            .map(|ticket| ticket_card(role, ticket))
            .collect(),
        None => Vec::new(),
    };

    let empty_notice = match section {
        Some(_) if cards.is_empty() => {
            let notice = if filters.is_active() {
                FILTERED_EMPTY_LIST_NOTICE
            } else {
                EMPTY_LIST_NOTICE
            };
            Some(notice.to_owned())
        }
        _ => None,
    };

    let reassign_options = match role {
        Some(Role::Admin) | Some(Role::Department) => support_staff.to_vec(),
        _ => Vec::new(),
    };

    ViewModel {
        section,
        cards,
        reassign_options,
        empty_notice,
    }
}

fn ticket_card(role: Role, ticket: &Ticket) -> TicketCard {
    let controls = TicketControls {
        assign_department: role == Role::Admin,
        reassign_support: matches!(role, Role::Admin | Role::Department),
        status_update: match role {
            Role::Admin | Role::Department => true,
            // Support can only move tickets already assigned to someone.
            Role::Support => ticket.assigned_support_id.is_some(),
            Role::Student => false,
        },
        comment_form: true,
    };

    let creator_info = if matches!(role, Role::Admin | Role::Department) {
        ticket
            .created_by_user
            .as_ref()
            .map(|creator| format!("{} ({})", creator.email, creator_role_label(creator.role_id)))
    } else {
        None
    };

    TicketCard {
        ticket: ticket.clone(),
        controls,
        creator_info,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        project_view, ListFilters, RoleSection, EMPTY_LIST_NOTICE, FILTERED_EMPTY_LIST_NOTICE,
    };
    use crate::role::Role;
    use crate::ticket::{Priority, SupportStaffEntry, Ticket, TicketCreator, TicketStatus};

    fn ticket(id: i64, assigned_support_id: Option<i64>) -> Ticket {
        Ticket {
            id,
            title: format!("ticket {id}"),
            description: "details".to_owned(),
            status: TicketStatus::Open,
            priority: Priority::Low,
            assigned_department_id: 1,
            created_by_user_id: 10,
            created_by_user: Some(TicketCreator {
                id: 10,
                email: "alice@campus.edu".to_owned(),
                role_id: 1,
            }),
            assigned_support_id,
            created_at: "2026-05-01T10:00:00".to_owned(),
            updated_at: "2026-05-01T10:00:00".to_owned(),
            comments: Vec::new(),
        }
    }

    fn staff() -> Vec<SupportStaffEntry> {
        vec![SupportStaffEntry {
            id: 9,
            email: "carol@campus.edu".to_owned(),
        }]
    }

    #[test]
    fn each_role_selects_exactly_its_own_section() {
        let expectations = [
            (Role::Student, RoleSection::Student),
            (Role::Support, RoleSection::Support),
            (Role::Department, RoleSection::Department),
            (Role::Admin, RoleSection::Admin),
        ];
        for (role, section) in expectations {
            let view = project_view(Some(role), &[], &[], &ListFilters::default());
            assert_eq!(view.section, Some(section));
        }
    }

    #[test]
    fn absent_role_selects_no_section_and_no_cards() {
        let view = project_view(None, &[ticket(1, None)], &staff(), &ListFilters::default());
        assert_eq!(view.section, None);
        assert!(view.cards.is_empty());
        assert!(view.empty_notice.is_none());
    }

    #[test]
    fn assign_department_control_is_admin_only() {
        for role in Role::ALL {
            let view = project_view(
                Some(role),
                &[ticket(1, None)],
                &staff(),
                &ListFilters::default(),
            );
            let expected = role == Role::Admin;
            assert_eq!(view.cards[0].controls.assign_department, expected);
        }
    }

    #[test]
    fn reassign_control_lists_cached_staff_for_admin_and_department() {
        for role in [Role::Admin, Role::Department] {
            let view = project_view(
                Some(role),
                &[ticket(1, None)],
                &staff(),
                &ListFilters::default(),
            );
            assert!(view.cards[0].controls.reassign_support);
            assert_eq!(view.reassign_options, staff());
        }
        for role in [Role::Student, Role::Support] {
            let view = project_view(
                Some(role),
                &[ticket(1, None)],
                &staff(),
                &ListFilters::default(),
            );
            assert!(!view.cards[0].controls.reassign_support);
            assert!(view.reassign_options.is_empty());
        }
    }

    #[test]
    fn support_sees_status_control_only_for_assigned_tickets() {
        let view = project_view(
            Some(Role::Support),
            &[ticket(1, None), ticket(2, Some(9))],
            &[],
            &ListFilters::default(),
        );
        assert!(!view.cards[0].controls.status_update);
        assert!(view.cards[1].controls.status_update);
    }

    #[test]
    fn department_sees_status_control_regardless_of_assignment() {
        let view = project_view(
            Some(Role::Department),
            &[ticket(1, None), ticket(2, Some(9))],
            &[],
            &ListFilters::default(),
        );
        assert!(view.cards[0].controls.status_update);
        assert!(view.cards[1].controls.status_update);
    }

    #[test]
    fn student_sees_no_mutation_controls_but_always_a_comment_form() {
        let view = project_view(
            Some(Role::Student),
            &[ticket(1, Some(9))],
            &staff(),
            &ListFilters::default(),
        );
        let controls = &view.cards[0].controls;
        assert!(!controls.assign_department);
        assert!(!controls.reassign_support);
        assert!(!controls.status_update);
        assert!(controls.comment_form);
    }

    #[test]
    fn creator_info_is_shown_to_admin_and_department_only() {
        for role in [Role::Admin, Role::Department] {
            let view = project_view(
                Some(role),
                &[ticket(1, None)],
                &[],
                &ListFilters::default(),
            );
            assert_eq!(
                view.cards[0].creator_info.as_deref(),
                Some("alice@campus.edu (Student)")
            );
        }
        for role in [Role::Student, Role::Support] {
            let view = project_view(
                Some(role),
                &[ticket(1, None)],
                &[],
                &ListFilters::default(),
            );
            assert!(view.cards[0].creator_info.is_none());
        }
    }

    #[test]
    fn unmapped_creator_role_id_shows_unknown_placeholder() {
        let mut unmapped = ticket(1, None);
        unmapped.created_by_user = Some(TicketCreator {
            id: 10,
            email: "ghost@campus.edu".to_owned(),
            role_id: 42,
        });
        let view = project_view(
            Some(Role::Admin),
            &[unmapped],
            &[],
            &ListFilters::default(),
        );
        assert_eq!(
            view.cards[0].creator_info.as_deref(),
            Some("ghost@campus.edu (unknown role)")
        );
    }

    #[test]
    fn empty_list_notice_depends_on_active_filters() {
        let unfiltered = project_view(Some(Role::Admin), &[], &[], &ListFilters::default());
        assert_eq!(unfiltered.empty_notice.as_deref(), Some(EMPTY_LIST_NOTICE));

        let filters = ListFilters {
            department: Some("CS".to_owned()),
            status: Some("Open".to_owned()),
            sort_by_priority: false,
        };
        let filtered = project_view(Some(Role::Admin), &[], &[], &filters);
        assert_eq!(
            filtered.empty_notice.as_deref(),
            Some(FILTERED_EMPTY_LIST_NOTICE)
        );

        let populated = project_view(Some(Role::Admin), &[ticket(1, None)], &[], &filters);
        assert!(populated.empty_notice.is_none());
    }

    #[test]
    fn tickets_keep_backend_order() {
        let view = project_view(
            Some(Role::Admin),
            &[ticket(3, None), ticket(1, None), ticket(2, None)],
            &[],
            &ListFilters::default(),
        );
        let ids: Vec<i64> = view.cards.iter().map(|card| card.ticket.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
