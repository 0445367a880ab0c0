//! Per-session accumulated expressions
//!
//! Each session holds one expression string. Components are appended as
//! `(<current>) <join> (<a> <op> <b>)` so earlier parts keep their grouping.
//!
//! Session ids come from clients. Idle sessions expire and the store has a
//! total size cap; each expression has its own length cap.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;

use crate::domain::expression::evaluate;
use crate::domain::operator::BinaryOp;
use crate::error::{ToolError, ToolResult};

/// Session used when the client does not name one
pub const DEFAULT_SESSION: &str = "default";

/// Longest expression a session may hold, in characters
pub const MAX_EXPRESSION_CHARS: usize = 4096;

/// Total bytes of session ids plus expressions kept in memory
pub const DEFAULT_MAX_SESSION_BYTES: u64 = 16 * 1024 * 1024;

/// Sessions untouched for this long are dropped
pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(30 * 60);

/// One `a op b` piece appended to a session
#[derive(Debug, Clone, Copy)]
pub struct Component {
    pub a: f64,
    pub op: BinaryOp,
    pub b: f64,
    /// Joins the component to a non-empty expression. Defaults to `+`.
    pub join_op: Option<BinaryOp>,
}

impl Component {
    fn render(&self) -> String {
        format!("({:?} {} {:?})", self.a, self.op, self.b)
    }
}

/// Result of evaluating a session's expression
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluated {
    pub expression: String,
    pub result: f64,
}

fn check_length(expression: &str) -> ToolResult<()> {
    if expression.chars().count() > MAX_EXPRESSION_CHARS {
        return Err(ToolError::ExpressionTooLong {
            max: MAX_EXPRESSION_CHARS,
        });
    }
    Ok(())
}

/// Bounded by total size and idle time. Cloning shares the same sessions.
#[derive(Clone)]
pub struct ExpressionSessions {
    sessions: Cache<String, String>,
    /// Serializes read-modify-write of a session
    write: Arc<Mutex<()>>,
}

impl Default for ExpressionSessions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionSessions {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_SESSION_BYTES, DEFAULT_SESSION_IDLE)
    }

    pub fn with_limits(max_bytes: u64, idle: Duration) -> Self {
        let sessions = Cache::builder()
            .weigher(|session: &String, expression: &String| {
                u32::try_from(session.len() + expression.len()).unwrap_or(u32::MAX)
            })
            .max_capacity(max_bytes)
            .time_to_idle(idle)
            .build();

        Self {
            sessions,
            write: Arc::new(Mutex::new(())),
        }
    }

    /// `None` when nothing has been set for this session.
    pub async fn current(&self, session: &str) -> Option<String> {
        self.sessions
            .get(session)
            .await
            .filter(|expr| !expr.is_empty())
    }

    /// Append a component and return the new expression.
    ///
    /// The session is left unchanged when the result would be too long.
    pub async fn push_component(&self, session: &str, component: Component) -> ToolResult<String> {
        let _guard = self.write.lock().await;
        let piece = component.render();

        let expression = match self.current(session).await {
            None => piece,
            Some(current) => {
                let join = component.join_op.unwrap_or(BinaryOp::Add);
                format!("({current}) {join} {piece}")
            }
        };
        check_length(&expression)?;

        self.sessions
            .insert(session.to_string(), expression.clone())
            .await;
        Ok(expression)
    }

    /// Replace the expression, then evaluate it.
    ///
    /// The new expression is kept even when evaluation fails, but an
    /// over-long one is rejected before it is stored.
    pub async fn replace(&self, session: &str, expression: String) -> ToolResult<Evaluated> {
        check_length(&expression)?;
        {
            let _guard = self.write.lock().await;
            self.sessions
                .insert(session.to_string(), expression.clone())
                .await;
        }

        let result = evaluate(&expression)?;
        Ok(Evaluated { expression, result })
    }

    pub async fn evaluate(&self, session: &str) -> ToolResult<Evaluated> {
        let expression = self
            .current(session)
            .await
            .ok_or(ToolError::ExpressionNotSet)?;

        let result = evaluate(&expression)?;
        Ok(Evaluated { expression, result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(a: f64, op: BinaryOp, b: f64, join_op: Option<BinaryOp>) -> Component {
        Component { a, op, b, join_op }
    }

    #[tokio::test]
    async fn test_components_accumulate_with_grouping() {
        let sessions = ExpressionSessions::new();
        assert_eq!(sessions.current(DEFAULT_SESSION).await, None);

        let first = sessions
            .push_component(DEFAULT_SESSION, component(1.0, BinaryOp::Add, 2.0, None))
            .await
            .unwrap();
        assert_eq!(first, "(1.0 + 2.0)");

        let second = sessions
            .push_component(
                DEFAULT_SESSION,
                component(3.0, BinaryOp::Subtract, 1.0, Some(BinaryOp::Multiply)),
            )
            .await
            .unwrap();
        assert_eq!(second, "((1.0 + 2.0)) * (3.0 - 1.0)");

        let third = sessions
            .push_component(DEFAULT_SESSION, component(4.0, BinaryOp::Divide, 2.0, None))
            .await
            .unwrap();
        assert_eq!(third, "(((1.0 + 2.0)) * (3.0 - 1.0)) + (4.0 / 2.0)");

        let evaluated = sessions.evaluate(DEFAULT_SESSION).await.unwrap();
        assert_eq!(evaluated.result, 8.0);
    }

    #[tokio::test]
    async fn test_join_op_is_ignored_for_first_component() {
        let sessions = ExpressionSessions::new();
        let expr = sessions
            .push_component("s", component(-1.5, BinaryOp::Multiply, 2.0, Some(BinaryOp::Divide)))
            .await
            .unwrap();
        assert_eq!(expr, "(-1.5 * 2.0)");
        assert_eq!(sessions.evaluate("s").await.unwrap().result, -3.0);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let sessions = ExpressionSessions::new();
        sessions
            .push_component("alice", component(1.0, BinaryOp::Add, 1.0, None))
            .await
            .unwrap();

        assert!(sessions.current("bob").await.is_none());
        assert!(matches!(
            sessions.evaluate("bob").await,
            Err(ToolError::ExpressionNotSet)
        ));
    }

    #[tokio::test]
    async fn test_replace_keeps_expression_on_failure() {
        let sessions = ExpressionSessions::new();

        let ok = sessions.replace("s", "(1+2)*3".into()).await.unwrap();
        assert_eq!(ok.result, 9.0);

        assert!(matches!(
            sessions.replace("s", "1/0".into()).await,
            Err(ToolError::ZeroDivision)
        ));
        assert_eq!(sessions.current("s").await.as_deref(), Some("1/0"));
    }

    #[tokio::test]
    async fn test_empty_replacement_counts_as_unset() {
        let sessions = ExpressionSessions::new();
        assert!(sessions.replace("s", String::new()).await.is_err());
        assert!(matches!(
            sessions.evaluate("s").await,
            Err(ToolError::ExpressionNotSet)
        ));
    }

    #[tokio::test]
    async fn test_over_long_expression_is_not_stored() {
        let sessions = ExpressionSessions::new();
        sessions.replace("s", "1 + 1".into()).await.unwrap();

        let long = "1+".repeat(MAX_EXPRESSION_CHARS) + "1";
        assert!(matches!(
            sessions.replace("s", long).await,
            Err(ToolError::ExpressionTooLong { .. })
        ));
        assert_eq!(sessions.current("s").await.as_deref(), Some("1 + 1"));
    }

    #[tokio::test]
    async fn test_components_stop_growing_at_limit() {
        let sessions = ExpressionSessions::new();
        let piece = component(1.0, BinaryOp::Add, 1.0, None);

        let mut last = String::new();
        let err = loop {
            match sessions.push_component("s", piece).await {
                Ok(expression) => last = expression,
                Err(e) => break e,
            }
        };

        assert!(matches!(err, ToolError::ExpressionTooLong { .. }));
        assert!(last.chars().count() <= MAX_EXPRESSION_CHARS);
        assert_eq!(sessions.current("s").await, Some(last));
    }

    #[tokio::test]
    async fn test_total_size_is_bounded() {
        let sessions = ExpressionSessions::with_limits(1024, DEFAULT_SESSION_IDLE);
        for i in 0..500 {
            sessions
                .replace(&format!("client-{i}"), "1 + 2 + 3 + 4".into())
                .await
                .unwrap();
        }

        sessions.sessions.run_pending_tasks().await;
        assert!(sessions.sessions.weighted_size() <= 1024);
    }

    #[tokio::test]
    async fn test_idle_session_expires() {
        let sessions =
            ExpressionSessions::with_limits(DEFAULT_MAX_SESSION_BYTES, Duration::from_millis(50));
        sessions.replace("s", "2 * 2".into()).await.unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(sessions.current("s").await.is_none());
    }
}
