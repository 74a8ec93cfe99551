pub mod claims;
pub mod projection;
pub mod role;
pub mod session;
pub mod ticket;

pub use claims::{decode_token_claims, TokenClaims};
pub use projection::{
    project_view, ListFilters, RoleSection, TicketCard, TicketControls, ViewModel,
    EMPTY_LIST_NOTICE, FILTERED_EMPTY_LIST_NOTICE,
};
pub use role::{creator_role_label, role_label, Role};
pub use session::SessionState;
pub use ticket::{Comment, Priority, SupportStaffEntry, Ticket, TicketCreator, TicketStatus};
