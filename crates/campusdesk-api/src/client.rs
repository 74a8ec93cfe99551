use std::sync::Arc;

use async_trait::async_trait;
use campusdesk_core::{SupportStaffEntry, Ticket, TicketStatus};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::BackendConfig;
use crate::error::ApiError;
use crate::interface::SupportDeskApi;
use crate::transport::{ReqwestTransport, RestRequest, RestResponse, RestTransport};
use crate::wire::{
    CommentRequest, CreateTicketRequest, CurrentUser, DetailBody, LoginRequest, LoginResponse,
    ReassignSupportRequest, RegisterRequest, SuggestRequest, SuggestResponse, TicketListScope,
    UpdateStatusRequest,
};

#[derive(Clone)]
pub struct BackendClient {
    transport: Arc<dyn RestTransport>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn RestTransport>) -> Self {
        Self { transport }
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        request: RestRequest,
    ) -> Result<T, ApiError> {
        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(rejected(response));
        }
        serde_json::from_str(&response.body).map_err(|error| {
            ApiError::Malformed(format!("failed to decode backend payload: {error}"))
        })
    }

    async fn request_ack(&self, request: RestRequest) -> Result<(), ApiError> {
        let response = self.transport.execute(request).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(rejected(response))
        }
    }
}

fn rejected(response: RestResponse) -> ApiError {
    let detail = serde_json::from_str::<DetailBody>(&response.body)
        .ok()
        .map(|body| body.detail);
    ApiError::Rejected {
        status: response.status,
        detail,
    }
}

#[async_trait]
impl SupportDeskApi for BackendClient {
    async fn register(&self, request: RegisterRequest) -> Result<(), ApiError> {
        self.request_ack(
            RestRequest::new(Method::POST, "auth/register").with_body(json!(request)),
        )
        .await
    }

    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        self.request_json(RestRequest::new(Method::POST, "auth/login").with_body(json!(request)))
            .await
    }

    async fn current_user(&self, token: &str) -> Result<CurrentUser, ApiError> {
        self.request_json(RestRequest::new(Method::GET, "auth/me").with_bearer(token))
            .await
    }

    async fn list_tickets(
        &self,
        token: &str,
        scope: &TicketListScope,
    ) -> Result<Vec<Ticket>, ApiError> {
        self.request_json(
            RestRequest::new(Method::GET, scope.path())
                .with_query(scope.query())
                .with_bearer(token),
        )
        .await
    }

    async fn create_ticket(
        &self,
        token: &str,
        request: CreateTicketRequest,
    ) -> Result<Ticket, ApiError> {
        self.request_json(
            RestRequest::new(Method::POST, "tickets/")
                .with_body(json!(request))
                .with_bearer(token),
        )
        .await
    }

    async fn suggest(
        &self,
        token: Option<&str>,
        request: SuggestRequest,
    ) -> Result<SuggestResponse, ApiError> {
        let mut rest = RestRequest::new(Method::POST, "tickets/suggest").with_body(json!(request));
        if let Some(token) = token {
            rest = rest.with_bearer(token);
        }
        self.request_json(rest).await
    }

    async fn support_staff(&self, token: &str) -> Result<Vec<SupportStaffEntry>, ApiError> {
        self.request_json(RestRequest::new(Method::GET, "tickets/support-list").with_bearer(token))
            .await
    }

    async fn assign_department(
        &self,
        token: &str,
        ticket_id: i64,
        department_name: &str,
    ) -> Result<(), ApiError> {
        self.request_ack(
            RestRequest::new(Method::PUT, format!("tickets/{ticket_id}/assign-department"))
                .with_query(vec![(
                    "department_name".to_owned(),
                    department_name.to_owned(),
                )])
                .with_bearer(token),
        )
        .await
    }

    async fn reassign_support(
        &self,
        token: &str,
        ticket_id: i64,
        new_support_id: i64,
    ) -> Result<(), ApiError> {
        self.request_ack(
            RestRequest::new(Method::PUT, format!("tickets/{ticket_id}/reassign-support"))
                .with_body(json!(ReassignSupportRequest { new_support_id }))
                .with_bearer(token),
        )
        .await
    }

    async fn update_status(
        &self,
        token: &str,
        ticket_id: i64,
        new_status: &TicketStatus,
    ) -> Result<(), ApiError> {
        self.request_ack(
            RestRequest::new(Method::PUT, format!("tickets/{ticket_id}/status"))
                .with_body(json!(UpdateStatusRequest {
                    new_status: new_status.as_str().to_owned(),
                }))
                .with_bearer(token),
        )
        .await
    }

    async fn add_comment(
        &self,
        token: &str,
        ticket_id: i64,
        content: &str,
    ) -> Result<(), ApiError> {
        self.request_ack(
            RestRequest::new(Method::POST, format!("tickets/{ticket_id}/comment"))
                .with_body(json!(CommentRequest {
                    content: content.to_owned(),
                }))
                .with_bearer(token),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use campusdesk_core::ListFilters;

    /// Scripted transport that records every request it sees.
    struct RecordingTransport {
        responses: Mutex<VecDeque<Result<RestResponse, ApiError>>>,
        seen: Mutex<Vec<RestRequest>>,
    }

    impl RecordingTransport {
        fn new(responses: Vec<Result<RestResponse, ApiError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn ok(status: u16, body: &str) -> Result<RestResponse, ApiError> {
            Ok(RestResponse {
                status,
                body: body.to_owned(),
            })
        }

        fn requests(&self) -> Vec<RestRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RestTransport for RecordingTransport {
        async fn execute(&self, request: RestRequest) -> Result<RestResponse, ApiError> {
            self.seen.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| RecordingTransport::ok(200, "{}"))
        }
    }

    fn client(transport: &Arc<RecordingTransport>) -> BackendClient {
        BackendClient::with_transport(Arc::clone(transport) as Arc<dyn RestTransport>)
    }

    #[tokio::test]
    async fn login_posts_credentials_and_returns_the_token() {
        let transport = RecordingTransport::new(vec![RecordingTransport::ok(
            200,
            r#"{"access_token": "abc.def.ghi", "token_type": "bearer"}"#,
        )]);
        let response = client(&transport)
            .login(LoginRequest {
                username: "alice@campus.edu".to_owned(),
                password: "hunter2".to_owned(),
            })
            .await
            .unwrap();
        assert_eq!(response.access_token, "abc.def.ghi");

        let seen = transport.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, Method::POST);
        assert_eq!(seen[0].path, "auth/login");
        assert_eq!(seen[0].bearer, None);
        assert_eq!(
            seen[0].body,
            Some(json!({"username": "alice@campus.edu", "password": "hunter2"}))
        );
    }

    #[tokio::test]
    async fn create_ticket_posts_exactly_the_four_fields() {
        let transport = RecordingTransport::new(vec![RecordingTransport::ok(
            201,
            r#"{
                "id": 1, "title": "t", "description": "d", "status": "Open",
                "priority": "Low", "assigned_department_id": 1,
                "created_by_user_id": 2,
                "created_at": "2026-05-01T10:00:00", "updated_at": "2026-05-01T10:00:00"
            }"#,
        )]);
        client(&transport)
            .create_ticket(
                "tok",
                CreateTicketRequest {
                    title: "t".to_owned(),
                    description: "d".to_owned(),
                    department_name: "IT Services".to_owned(),
                    priority: "Low".to_owned(),
                },
            )
            .await
            .unwrap();

        let seen = transport.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path, "tickets/");
        assert_eq!(seen[0].bearer.as_deref(), Some("tok"));
        assert_eq!(
            seen[0].body,
            Some(json!({
                "title": "t",
                "description": "d",
                "department_name": "IT Services",
                "priority": "Low"
            }))
        );
    }

    #[tokio::test]
    async fn admin_list_forwards_filters_as_query_params() {
        let transport = RecordingTransport::new(vec![RecordingTransport::ok(200, "[]")]);
        let scope = TicketListScope::All(ListFilters {
            department: Some("CS".to_owned()),
            status: Some("Open".to_owned()),
            sort_by_priority: false,
        });
        let tickets = client(&transport).list_tickets("tok", &scope).await.unwrap();
        assert!(tickets.is_empty());

        let seen = transport.requests();
        assert_eq!(seen[0].path, "tickets/");
        assert_eq!(
            seen[0].query,
            vec![
                ("department_filter".to_owned(), "CS".to_owned()),
                ("status_filter".to_owned(), "Open".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn assign_department_sends_the_name_as_a_query_param() {
        let transport = RecordingTransport::new(vec![RecordingTransport::ok(200, "{}")]);
        client(&transport)
            .assign_department("tok", 7, "Facilities")
            .await
            .unwrap();

        let seen = transport.requests();
        assert_eq!(seen[0].method, Method::PUT);
        assert_eq!(seen[0].path, "tickets/7/assign-department");
        assert_eq!(
            seen[0].query,
            vec![("department_name".to_owned(), "Facilities".to_owned())]
        );
        assert_eq!(seen[0].body, None);
    }

    #[tokio::test]
    async fn update_status_serializes_the_backend_spelling() {
        let transport = RecordingTransport::new(vec![RecordingTransport::ok(200, "{}")]);
        client(&transport)
            .update_status("tok", 3, &TicketStatus::InProgress)
            .await
            .unwrap();

        let seen = transport.requests();
        assert_eq!(seen[0].path, "tickets/3/status");
        assert_eq!(seen[0].body, Some(json!({"new_status": "In Progress"})));
    }

    #[tokio::test]
    async fn rejection_with_detail_body_surfaces_the_detail() {
        let transport = RecordingTransport::new(vec![RecordingTransport::ok(
            404,
            r#"{"detail": "Ticket not found."}"#,
        )]);
        let error = client(&transport)
            .add_comment("tok", 99, "hello")
            .await
            .unwrap_err();
        assert_eq!(
            error,
            ApiError::Rejected {
                status: 404,
                detail: Some("Ticket not found.".to_owned()),
            }
        );
    }

    #[tokio::test]
    async fn rejection_without_parseable_body_has_no_detail() {
        let transport =
            RecordingTransport::new(vec![RecordingTransport::ok(500, "internal error")]);
        let error = client(&transport).current_user("tok").await.unwrap_err();
        assert_eq!(
            error,
            ApiError::Rejected {
                status: 500,
                detail: None,
            }
        );
        assert!(!error.is_unauthorized());
    }

    #[tokio::test]
    async fn transport_failures_pass_through_unchanged() {
        let transport = RecordingTransport::new(vec![Err(ApiError::Transport(
            "connection refused".to_owned(),
        ))]);
        let error = client(&transport)
            .support_staff("tok")
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn malformed_success_body_is_reported_as_malformed() {
        let transport = RecordingTransport::new(vec![RecordingTransport::ok(200, "not json")]);
        let error = client(&transport).current_user("tok").await.unwrap_err();
        assert!(matches!(error, ApiError::Malformed(_)));
    }

    #[tokio::test]
    async fn suggest_works_without_a_token() {
        let transport = RecordingTransport::new(vec![RecordingTransport::ok(
            200,
            r#"{"department": "IT Services", "priority": "High"}"#,
        )]);
        let suggestion = client(&transport)
            .suggest(
                None,
                SuggestRequest {
                    title: "Wifi down".to_owned(),
                    description: "No signal".to_owned(),
                },
            )
            .await
            .unwrap();
        assert_eq!(suggestion.department, "IT Services");
        assert_eq!(suggestion.priority, "High");
        assert_eq!(transport.requests()[0].bearer, None);
    }
}
