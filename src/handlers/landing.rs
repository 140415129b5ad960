use axum::extract::Query;
use axum::response::Response;
use serde::Serialize;

use crate::handlers::WalletParam;
use crate::landing::{LandingNavigator, LandingView};
use crate::models::{Connection, Route};
use crate::utils::error::AppError;
use crate::utils::response::success;
use crate::wizard::Outbox;

#[derive(Serialize)]
struct NavigationPayload {
    navigation: Vec<Route>,
}

fn navigator(param: &WalletParam) -> Result<(LandingNavigator<Outbox>, Outbox), AppError> {
    let connection = Connection::from_param(param.address.as_deref())?;
    let outbox = Outbox::new();
    Ok((LandingNavigator::new(connection, outbox.clone()), outbox))
}

pub async fn landing_page(Query(param): Query<WalletParam>) -> Result<Response, AppError> {
    let (landing, _) = navigator(&param)?;
    let view: LandingView = landing.render();
    Ok(success(view, "Landing page"))
}

pub async fn view_created_events(
    Query(param): Query<WalletParam>,
) -> Result<Response, AppError> {
    let (landing, outbox) = navigator(&param)?;
    if !landing.view_created_events() {
        return Err(AppError::ValidationError(
            "connect a wallet to view created events".to_string(),
        ));
    }
    let payload = NavigationPayload {
        navigation: outbox.drain().navigation,
    };
    Ok(success(payload, "Navigate to created events"))
}
