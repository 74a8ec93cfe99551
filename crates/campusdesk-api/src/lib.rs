pub mod client;
pub mod config;
pub mod error;
pub mod interface;
pub mod transport;
pub mod wire;

pub use client::BackendClient;
pub use config::BackendConfig;
pub use error::ApiError;
pub use interface::SupportDeskApi;
pub use transport::{ReqwestTransport, RestRequest, RestResponse, RestTransport};
pub use wire::{
    CreateTicketRequest, CurrentUser, LoginRequest, LoginResponse, RegisterRequest, RoleInfo,
    SuggestRequest, SuggestResponse, TicketListScope,
};
