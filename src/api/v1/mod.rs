pub mod conversation;
pub mod system;

use axum::Router;

use crate::api::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/system", system::router())
        .nest("/conversation", conversation::router())
}
