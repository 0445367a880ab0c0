//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRequestParts, Query, State};
use axum::http::request::Parts;

use crate::application::sessions::Component;
use crate::application::{DEFAULT_SESSION, ExpressionSessions, SubmitContactUseCase};
use crate::domain::contact::{Contact, ContactForm, ExtendedContact, MultipleReasonContact};
use crate::domain::operator::BinaryOp;
use crate::domain::repository::ContactStore;
use crate::error::{ToolError, ToolResult};
use crate::presentation::dto::{
    CalcQuery, CalcResponse, ComponentRequest, ContactSavedResponse, EvaluationResponse,
    ExpressionResponse, FullExpressionRequest,
};

/// Header naming the expression session
pub const SESSION_HEADER: &str = "x-session-id";

/// Shared state for tool handlers
pub struct ToolsAppState<S>
where
    S: ContactStore + Send + Sync + 'static,
{
    pub sessions: ExpressionSessions,
    pub contacts: Arc<S>,
}

impl<S> Clone for ToolsAppState<S>
where
    S: ContactStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            contacts: self.contacts.clone(),
        }
    }
}

impl<S> ToolsAppState<S>
where
    S: ContactStore + Send + Sync + 'static,
{
    pub fn new(contacts: S) -> Self {
        Self {
            sessions: ExpressionSessions::new(),
            contacts: Arc::new(contacts),
        }
    }
}

/// Expression session from `X-Session-Id`, or the shared default session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl<St> FromRequestParts<St> for SessionId
where
    St: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_SESSION);
        Ok(SessionId(id.to_string()))
    }
}

// ============================================================================
// Calculator
// ============================================================================

fn calculate(op: BinaryOp, q: CalcQuery) -> ToolResult<Json<CalcResponse>> {
    let result = op.apply(q.a, q.b)?;
    Ok(Json(CalcResponse { result }))
}

/// GET /calculator/add
pub async fn add(Query(q): Query<CalcQuery>) -> ToolResult<Json<CalcResponse>> {
    calculate(BinaryOp::Add, q)
}

/// GET /calculator/subtract
pub async fn subtract(Query(q): Query<CalcQuery>) -> ToolResult<Json<CalcResponse>> {
    calculate(BinaryOp::Subtract, q)
}

/// GET /calculator/multiply
pub async fn multiply(Query(q): Query<CalcQuery>) -> ToolResult<Json<CalcResponse>> {
    calculate(BinaryOp::Multiply, q)
}

/// GET /calculator/divide
pub async fn divide(Query(q): Query<CalcQuery>) -> ToolResult<Json<CalcResponse>> {
    calculate(BinaryOp::Divide, q)
}

// ============================================================================
// Expression
// ============================================================================

/// GET /expression/get
pub async fn get_expression<S>(
    State(state): State<ToolsAppState<S>>,
    SessionId(session): SessionId,
) -> Json<ExpressionResponse>
where
    S: ContactStore + Send + Sync + 'static,
{
    let response = match state.sessions.current(&session).await {
        Some(expression) => ExpressionResponse {
            expression: Some(expression),
            message: None,
        },
        None => ExpressionResponse {
            expression: None,
            message: Some(ToolError::ExpressionNotSet.to_string()),
        },
    };
    Json(response)
}

/// POST /expression/component
pub async fn add_component<S>(
    State(state): State<ToolsAppState<S>>,
    SessionId(session): SessionId,
    Json(req): Json<ComponentRequest>,
) -> ToolResult<Json<ExpressionResponse>>
where
    S: ContactStore + Send + Sync + 'static,
{
    let component = Component {
        a: req.a,
        op: req.op.parse()?,
        b: req.b,
        join_op: req.join_op.as_deref().map(str::parse::<BinaryOp>).transpose()?,
    };

    let expression = state.sessions.push_component(&session, component).await?;
    Ok(Json(ExpressionResponse {
        expression: Some(expression),
        message: None,
    }))
}

/// POST /expression/full
pub async fn set_full_expression<S>(
    State(state): State<ToolsAppState<S>>,
    SessionId(session): SessionId,
    Json(req): Json<FullExpressionRequest>,
) -> ToolResult<Json<EvaluationResponse>>
where
    S: ContactStore + Send + Sync + 'static,
{
    let evaluated = state.sessions.replace(&session, req.expr).await?;
    Ok(Json(EvaluationResponse {
        expression: evaluated.expression,
        result: evaluated.result,
    }))
}

/// POST /expression/evaluate
pub async fn evaluate_expression<S>(
    State(state): State<ToolsAppState<S>>,
    SessionId(session): SessionId,
) -> ToolResult<Json<EvaluationResponse>>
where
    S: ContactStore + Send + Sync + 'static,
{
    let evaluated = state.sessions.evaluate(&session).await?;
    Ok(Json(EvaluationResponse {
        expression: evaluated.expression,
        result: evaluated.result,
    }))
}

// ============================================================================
// Contact
// ============================================================================

async fn save_contact<S, F>(state: &ToolsAppState<S>, form: &F) -> ToolResult<Json<ContactSavedResponse>>
where
    S: ContactStore + Send + Sync + 'static,
    F: ContactForm,
{
    let path = SubmitContactUseCase::new(state.contacts.clone())
        .execute(form)
        .await?;

    Ok(Json(ContactSavedResponse {
        message: "Данные успешно сохранены".to_string(),
        filename: path.display().to_string(),
    }))
}

/// POST /contact/basic
pub async fn contact_basic<S>(
    State(state): State<ToolsAppState<S>>,
    Json(form): Json<Contact>,
) -> ToolResult<Json<ContactSavedResponse>>
where
    S: ContactStore + Send + Sync + 'static,
{
    save_contact(&state, &form).await
}

/// POST /contact/extended
pub async fn contact_extended<S>(
    State(state): State<ToolsAppState<S>>,
    Json(form): Json<ExtendedContact>,
) -> ToolResult<Json<ContactSavedResponse>>
where
    S: ContactStore + Send + Sync + 'static,
{
    save_contact(&state, &form).await
}

/// POST /contact/multiple
pub async fn contact_multiple<S>(
    State(state): State<ToolsAppState<S>>,
    Json(form): Json<MultipleReasonContact>,
) -> ToolResult<Json<ContactSavedResponse>>
where
    S: ContactStore + Send + Sync + 'static,
{
    save_contact(&state, &form).await
}
