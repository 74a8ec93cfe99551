use std::sync::Arc;

use campusdesk_api::{
    ApiError, LoginRequest, RegisterRequest, SuggestRequest, SupportDeskApi, TicketListScope,
};
use campusdesk_core::{ListFilters, Role, SessionState, TicketStatus, ViewModel};
use campusdesk_session::SessionStore;
use campusdesk_ui::{render_session_line, Notification};
use tracing::warn;

use crate::resolver;
use crate::state::{CreateDraft, ViewState};

const CONNECTIVITY_ERROR: &str =
    "Connection error. Check that the backend is reachable and try again.";
const SIGN_IN_FIRST: &str = "Sign in first.";

pub struct App {
    api: Arc<dyn SupportDeskApi>,
    store: Arc<dyn SessionStore>,
    state: ViewState,
}

impl App {
    pub fn new(api: Arc<dyn SupportDeskApi>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            store,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> ViewModel {
        self.state.view()
    }

    pub fn session_line(&self) -> String {
        render_session_line(
            self.state.session().identity.as_deref(),
            self.state.role().map(Role::as_str),
        )
    }

    pub fn set_draft(&mut self, draft: CreateDraft) {
        self.state.set_draft(draft);
    }

    /// Restore the persisted session and, when a token is present, resolve
    /// the role and load the role-appropriate ticket list.
    pub async fn startup(&mut self) -> Notification {
        let session = match self.store.load() {
            Ok(session) => session,
            Err(error) => {
                warn!(error = %error, "failed to load stored session");
                SessionState::empty()
            }
        };
        self.state = ViewState::new(session);

        if self.state.token().is_none() {
            return Notification::info("Not signed in. Use 'login' or 'register' to begin.");
        }

        self.resolve_and_persist_role().await;
        match self.refresh_data().await {
            Ok(()) => Notification::info(self.session_line()),
            Err(error) => self.failure(error, "Could not load the ticket list."),
        }
    }

    pub async fn handle_login(&mut self, email: &str, password: &str) -> Notification {
        let login = self
            .api
            .login(LoginRequest {
                username: email.to_owned(),
                password: password.to_owned(),
            })
            .await;

        match login {
            Ok(response) => {
                self.state.record_token(response.access_token);
                self.state.record_identity(email.to_owned());
                self.resolve_and_persist_role().await;
                match self.refresh_data().await {
                    Ok(()) => Notification::success("Signed in."),
                    Err(error) => self.failure(error, "Could not load the ticket list."),
                }
            }
            Err(error @ ApiError::Transport(_)) => {
                warn!(error = %error, "login request failed");
                Notification::error(CONNECTIVITY_ERROR)
            }
            Err(error) => {
                warn!(error = %error, "login rejected");
                Notification::error("Invalid email or password.")
            }
        }
    }

    pub async fn handle_register(
        &mut self,
        email: &str,
        password: &str,
        role_name: &str,
    ) -> Notification {
        let result = self
            .api
            .register(RegisterRequest {
                email: email.to_owned(),
                password: password.to_owned(),
                role_name: role_name.to_owned(),
            })
            .await;

        match result {
            Ok(()) => Notification::success("Registration complete. Please sign in."),
            Err(error) => self.failure(error, "Registration failed."),
        }
    }

    pub async fn handle_refresh(&mut self) -> Notification {
        if self.state.token().is_none() {
            return Notification::error(SIGN_IN_FIRST);
        }
        match self.refresh_data().await {
            Ok(()) => Notification::info("Ticket list refreshed."),
            Err(error) => self.failure(error, "Could not load the ticket list."),
        }
    }

    pub async fn handle_create(&mut self) -> Notification {
        let Some(token) = self.token_for_call() else {
            return Notification::error(SIGN_IN_FIRST);
        };
        let Some(request) = self.state.draft().as_request() else {
            return Notification::error(
                "The draft needs a title, description, department, and priority.",
            );
        };

        match self.api.create_ticket(&token, request).await {
            Ok(_) => {
                self.state.clear_draft();
                self.refetch_after(Notification::success("Ticket created."))
                    .await
            }
            Err(error) => self.failure(error, "Could not create the ticket."),
        }
    }

    pub async fn handle_suggest(&mut self, title: &str, description: &str) -> Notification {
        let mut draft = self.state.draft().clone();
        draft.title = Some(title.to_owned());
        draft.description = Some(description.to_owned());
        self.state.set_draft(draft);

        let token = self.token_for_call();
        let result = self
            .api
            .suggest(
                token.as_deref(),
                SuggestRequest {
                    title: title.to_owned(),
                    description: description.to_owned(),
                },
            )
            .await;

        match result {
            Ok(suggestion) => {
                let text = format!(
                    "Suggested department: {}, priority: {}. Type 'accept' to use it.",
                    suggestion.department, suggestion.priority
                );
                self.state.set_suggestion(suggestion);
                Notification::info(text)
            }
            Err(error) => self.failure(error, "Could not get a suggestion."),
        }
    }

    pub fn handle_accept_suggestion(&mut self) -> Notification {
        if self.state.accept_suggestion() {
            Notification::success("Suggestion applied to the draft.")
        } else {
            Notification::error("No suggestion to accept yet. Run 'suggest' first.")
        }
    }

    pub async fn handle_comment(&mut self, ticket_id: i64, content: &str) -> Notification {
        let Some(token) = self.token_for_call() else {
            return Notification::error(SIGN_IN_FIRST);
        };
        match self.api.add_comment(&token, ticket_id, content).await {
            Ok(()) => {
                self.refetch_after(Notification::success("Comment added."))
                    .await
            }
            Err(error) => self.failure(error, "Could not add the comment."),
        }
    }

    pub async fn handle_assign_department(
        &mut self,
        ticket_id: i64,
        department: &str,
    ) -> Notification {
        let Some(token) = self.token_for_call() else {
            return Notification::error(SIGN_IN_FIRST);
        };
        match self
            .api
            .assign_department(&token, ticket_id, department)
            .await
        {
            Ok(()) => {
                self.refetch_after(Notification::success("Ticket assigned to department."))
                    .await
            }
            Err(error) => self.failure(error, "Could not assign the ticket."),
        }
    }

    pub async fn handle_reassign_support(
        &mut self,
        ticket_id: i64,
        support_id: i64,
    ) -> Notification {
        let Some(token) = self.token_for_call() else {
            return Notification::error(SIGN_IN_FIRST);
        };
        if self.state.support_staff().is_empty() {
            return Notification::error("No support staff available to choose from.");
        }
        if !self
            .state
            .support_staff()
            .iter()
            .any(|entry| entry.id == support_id)
        {
            return Notification::error(format!(
                "No support staff member #{support_id} in the current list."
            ));
        }

        match self
            .api
            .reassign_support(&token, ticket_id, support_id)
            .await
        {
            Ok(()) => {
                self.refetch_after(Notification::success("Ticket reassigned."))
                    .await
            }
            Err(error) => self.failure(error, "Could not reassign the ticket."),
        }
    }

    pub async fn handle_update_status(&mut self, ticket_id: i64, status: &str) -> Notification {
        let Some(token) = self.token_for_call() else {
            return Notification::error(SIGN_IN_FIRST);
        };
        let new_status = TicketStatus::from(status.to_owned());
        match self.api.update_status(&token, ticket_id, &new_status).await {
            Ok(()) => {
                self.refetch_after(Notification::success("Ticket status updated."))
                    .await
            }
            Err(error) => self.failure(error, "Could not update the ticket status."),
        }
    }

    pub async fn handle_filter(
        &mut self,
        department: Option<String>,
        status: Option<String>,
        sort_by_priority: bool,
    ) -> Notification {
        if !matches!(self.state.role(), Some(Role::Admin) | Some(Role::Department)) {
            return Notification::error("Filters are available to department and admin accounts.");
        }
        self.state.set_filters(ListFilters {
            department,
            status,
            sort_by_priority,
        });
        self.refetch_after(Notification::info("Filters applied."))
            .await
    }

    pub async fn handle_clear_filter(&mut self) -> Notification {
        self.state.set_filters(ListFilters::default());
        if self.state.token().is_none() {
            return Notification::info("Filters cleared.");
        }
        self.refetch_after(Notification::info("Filters cleared."))
            .await
    }

    pub fn handle_whoami(&self) -> Notification {
        Notification::info(self.session_line())
    }

    pub fn handle_logout(&mut self) -> Notification {
        if let Err(error) = self.store.clear() {
            warn!(error = %error, "failed to clear stored session");
        }
        self.state.reset();
        Notification::success("Signed out.")
    }

    fn token_for_call(&self) -> Option<String> {
        self.state.token().map(str::to_owned)
    }

    async fn resolve_and_persist_role(&mut self) {
        let Some(token) = self.token_for_call() else {
            return;
        };
        let resolved = resolver::resolve_role(self.api.as_ref(), &token).await;
        if let Some(identity) = resolved.identity {
            self.state.record_identity(identity);
        }
        if let Some(role) = resolved.role {
            self.state.record_role(role);
        }
        self.persist_session();
    }

    fn persist_session(&self) {
        if let Err(error) = self.store.save(self.state.session()) {
            warn!(error = %error, "failed to persist session");
        }
    }

    /// Fetch the role-appropriate ticket list, plus the support-staff cache
    /// for the roles that render the reassignment selector. The rendered
    /// view only ever changes on a successful fetch.
    async fn refresh_data(&mut self) -> Result<(), ApiError> {
        let Some(token) = self.token_for_call() else {
            return Ok(());
        };
        let Some(role) = self.state.role() else {
            self.state.replace_tickets(Vec::new());
            return Ok(());
        };

        let scope = TicketListScope::for_role(role, self.state.filters().clone());
        let tickets = self.api.list_tickets(&token, &scope).await?;
        self.state.replace_tickets(tickets);

        if matches!(role, Role::Admin | Role::Department) {
            match self.api.support_staff(&token).await {
                Ok(staff) => self.state.replace_support_staff(staff),
                // Keep the previous cache; the selector reflects the last
                // successful fetch.
                Err(error) => warn!(error = %error, "support staff fetch failed"),
            }
        }

        Ok(())
    }

    async fn refetch_after(&mut self, success: Notification) -> Notification {
        match self.refresh_data().await {
            Ok(()) => success,
            Err(error) => self.failure(error, "Could not reload the ticket list."),
        }
    }

    fn failure(&mut self, error: ApiError, generic: &str) -> Notification {
        warn!(error = %error, "backend call failed");
        if error.is_unauthorized() {
            if let Err(store_error) = self.store.clear() {
                warn!(error = %store_error, "failed to clear stored session");
            }
            self.state.reset();
            return Notification::error("Session expired. Please sign in again.");
        }
        match error {
            ApiError::Transport(_) => Notification::error(CONNECTIVITY_ERROR),
            ApiError::Rejected {
                detail: Some(detail),
                ..
            } => Notification::error(format!("Error: {detail}")),
            _ => Notification::error(generic),
        }
    }
}
