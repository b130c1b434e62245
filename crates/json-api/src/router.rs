//! App Router

use salvo::Router;

use crate::deals;

/// Versioned deal routes.
pub fn app_router() -> Router {
    Router::with_path("v1/deals")
        .get(deals::index::handler)
        .post(deals::create::handler)
        .push(
            Router::with_path("{deal}")
                .get(deals::get::handler)
                .put(deals::update::handler)
                .delete(deals::delete::handler),
        )
}
