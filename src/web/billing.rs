use axum::extract::Path;
use axum::extract::State;
use axum::response::Html;
use axum::response::Redirect;
use axum::routing::get;
use axum::Form;
use axum::Router;
use tracing::info;

use super::views;
use super::AppState;
use crate::db::entity::billing::BillingForm;
use crate::types::BillingError;
use crate::types::Result;

const LIST: &str = "/billing/view";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LIST, get(list))
        .route("/billing/view/{id}", get(details))
        .route("/billing/add", get(add_form).post(add))
}

async fn list(State(state): State<AppState>) -> Result<Html<String>> {
    let billings = state.billings().list().await?;
    Ok(Html(views::billing_list(&billings)))
}

async fn details(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Html<String>> {
    let details = state
        .billings()
        .details(id)
        .await?
        .ok_or(BillingError::NotFound("Billing"))?;
    Ok(Html(views::billing_details(&details)))
}

async fn add_form(State(state): State<AppState>) -> Result<Html<String>> {
    let (customers, products) = tokio::try_join!(state.customers().list(), state.products().list())?;
    Ok(Html(views::billing_form(&customers, &products)))
}

// `products` may repeat, which the struct-based form extractor can't represent; decode the raw pairs instead.
async fn add(State(state): State<AppState>, Form(pairs): Form<Vec<(String, String)>>) -> Result<Redirect> {
    let form = BillingForm::from_pairs(&pairs)?;
    let receipt = state.billings().create(&form).await?;

    info!(
        "Billing #{} created for customer #{}: total {}",
        receipt.billing.id, receipt.billing.customer_id, receipt.billing.total_amount
    );
    if !receipt.skipped.is_empty() {
        info!(
            "Billing #{}: skipped unknown product(s) {:?}",
            receipt.billing.id, receipt.skipped
        );
    }

    Ok(Redirect::to(LIST))
}
