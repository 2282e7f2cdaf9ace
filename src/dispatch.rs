use axum::{debug_handler, extract::State};

use crate::{booking, contact, db::Store, payload::Payload, ApiResponse, AppError, AppResult, AppState};

/// POST on the api path: picks the handler named by `action`.
#[debug_handler(state = AppState)]
pub(crate) async fn dispatch(State(store): State<Store>, data: Payload) -> AppResult<ApiResponse> {
    let action = data.get("action").unwrap_or_default();
    if action.is_empty() {
        return Err(AppError::MissingAction);
    }

    let mut conn = store.open().await?;
    tracing::debug!(action, "dispatching");

    match action {
        "book" => booking::book(&mut conn, &data).await,
        "contact" => contact::send(&mut conn, &data).await,
        _ => Err(AppError::InvalidAction),
    }
}

/// Every method the api path does not serve. OPTIONS never gets here, the cors layer answers it.
pub(crate) async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
