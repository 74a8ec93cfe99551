use campusdesk_api::{CreateTicketRequest, SuggestResponse};
use campusdesk_core::{
    project_view, ListFilters, Role, SessionState, SupportStaffEntry, Ticket, ViewModel,
};

/// The create-ticket form, filled field by field at the prompt. A suggestion
/// only ever pre-fills it; submission is always explicit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub department: Option<String>,
    pub priority: Option<String>,
}

impl CreateDraft {
    pub fn as_request(&self) -> Option<CreateTicketRequest> {
        Some(CreateTicketRequest {
            title: self.title.clone()?,
            description: self.description.clone()?,
            department_name: self.department.clone()?,
            priority: self.priority.clone()?,
        })
    }

    pub fn apply_suggestion(&mut self, suggestion: &SuggestResponse) {
        self.department = Some(suggestion.department.clone());
        self.priority = Some(suggestion.priority.clone());
    }
}

/// Everything the interactive loop renders from. Owned by the app, mutated
/// only through the setters below, and torn down at logout.
#[derive(Debug, Default)]
pub struct ViewState {
    session: SessionState,
    tickets: Vec<Ticket>,
    support_staff: Vec<SupportStaffEntry>,
    filters: ListFilters,
    draft: CreateDraft,
    suggestion: Option<SuggestResponse>,
}

impl ViewState {
    pub fn new(session: SessionState) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.role
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn support_staff(&self) -> &[SupportStaffEntry] {
        &self.support_staff
    }

    pub fn filters(&self) -> &ListFilters {
        &self.filters
    }

    pub fn draft(&self) -> &CreateDraft {
        &self.draft
    }

    pub fn suggestion(&self) -> Option<&SuggestResponse> {
        self.suggestion.as_ref()
    }

    pub fn record_token(&mut self, token: impl Into<String>) {
        self.session.set_token(token);
    }

    pub fn record_identity(&mut self, identity: impl Into<String>) {
        self.session.set_identity(identity);
    }

    pub fn record_role(&mut self, role: Role) {
        self.session.set_role(role);
    }

    pub fn replace_tickets(&mut self, tickets: Vec<Ticket>) {
        self.tickets = tickets;
    }

    pub fn replace_support_staff(&mut self, support_staff: Vec<SupportStaffEntry>) {
        self.support_staff = support_staff;
    }

    pub fn set_filters(&mut self, filters: ListFilters) {
        self.filters = filters;
    }

    pub fn set_draft(&mut self, draft: CreateDraft) {
        self.draft = draft;
    }

    pub fn clear_draft(&mut self) {
        self.draft = CreateDraft::default();
        self.suggestion = None;
    }

    pub fn set_suggestion(&mut self, suggestion: SuggestResponse) {
        self.suggestion = Some(suggestion);
    }

    pub fn accept_suggestion(&mut self) -> bool {
        match self.suggestion.clone() {
            Some(suggestion) => {
                self.draft.apply_suggestion(&suggestion);
                true
            }
            None => false,
        }
    }

    /// Logout teardown: every field goes back to its initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn view(&self) -> ViewModel {
        project_view(
            self.role(),
            &self.tickets,
            &self.support_staff,
            &self.filters,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{CreateDraft, ViewState};
    use campusdesk_api::SuggestResponse;
    use campusdesk_core::{Role, SessionState};

    #[test]
    fn draft_request_requires_all_four_fields() {
        let mut draft = CreateDraft::default();
        assert!(draft.as_request().is_none());

        draft.title = Some("Wifi down".to_owned());
        draft.description = Some("No signal".to_owned());
        draft.department = Some("IT Services".to_owned());
        assert!(draft.as_request().is_none());

        draft.priority = Some("High".to_owned());
        let request = draft.as_request().unwrap();
        assert_eq!(request.department_name, "IT Services");
    }

    #[test]
    fn accepting_a_suggestion_copies_department_and_priority_only() {
        let mut state = ViewState::default();
        state.set_draft(CreateDraft {
            title: Some("Wifi down".to_owned()),
            description: Some("No signal".to_owned()),
            department: None,
            priority: None,
        });
        assert!(!state.accept_suggestion());

        state.set_suggestion(SuggestResponse {
            department: "IT Services".to_owned(),
            priority: "High".to_owned(),
        });
        assert!(state.accept_suggestion());
        assert_eq!(state.draft().title.as_deref(), Some("Wifi down"));
        assert_eq!(state.draft().department.as_deref(), Some("IT Services"));
        assert_eq!(state.draft().priority.as_deref(), Some("High"));
    }

    #[test]
    fn reset_tears_down_every_field() {
        let mut session = SessionState::empty();
        session.set_token("tok");
        session.set_role(Role::Admin);
        let mut state = ViewState::new(session);
        state.replace_tickets(Vec::new());
        state.set_suggestion(SuggestResponse {
            department: "IT Services".to_owned(),
            priority: "Low".to_owned(),
        });

        state.reset();
        assert!(state.token().is_none());
        assert!(state.role().is_none());
        assert!(state.suggestion().is_none());
        assert_eq!(state.draft(), &super::CreateDraft::default());
    }
}
