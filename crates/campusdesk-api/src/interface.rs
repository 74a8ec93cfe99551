use async_trait::async_trait;
use campusdesk_core::{SupportStaffEntry, Ticket, TicketStatus};

use crate::error::ApiError;
use crate::wire::{
    CreateTicketRequest, CurrentUser, LoginRequest, LoginResponse, RegisterRequest,
    SuggestRequest, SuggestResponse, TicketListScope,
};

/// The backend surface the client consumes. Everything behind it is an HTTP
/// contract; authorization lives server-side.
#[async_trait]
pub trait SupportDeskApi: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> Result<(), ApiError>;
    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError>;
    async fn current_user(&self, token: &str) -> Result<CurrentUser, ApiError>;
    async fn list_tickets(
        &self,
        token: &str,
        scope: &TicketListScope,
    ) -> Result<Vec<Ticket>, ApiError>;
    async fn create_ticket(
        &self,
        token: &str,
        request: CreateTicketRequest,
    ) -> Result<Ticket, ApiError>;
    async fn suggest(
        &self,
        token: Option<&str>,
        request: SuggestRequest,
    ) -> Result<SuggestResponse, ApiError>;
    async fn support_staff(&self, token: &str) -> Result<Vec<SupportStaffEntry>, ApiError>;
    async fn assign_department(
        &self,
        token: &str,
        ticket_id: i64,
        department_name: &str,
    ) -> Result<(), ApiError>;
    async fn reassign_support(
        &self,
        token: &str,
        ticket_id: i64,
        new_support_id: i64,
    ) -> Result<(), ApiError>;
    async fn update_status(
        &self,
        token: &str,
        ticket_id: i64,
        new_status: &TicketStatus,
    ) -> Result<(), ApiError>;
    async fn add_comment(&self, token: &str, ticket_id: i64, content: &str)
        -> Result<(), ApiError>;
}
