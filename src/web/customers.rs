use axum::extract::Path;
use axum::extract::State;
use axum::response::Html;
use axum::response::Redirect;
use axum::routing::get;
use axum::routing::post;
use axum::Form;
use axum::Router;
use tracing::debug;
use tracing::info;

use super::views;
use super::AppState;
use crate::db::entity::customer::CustomerForm;
use crate::types::BillingError;
use crate::types::Result;

const LIST: &str = "/customers/view";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LIST, get(list))
        .route("/customers/add", get(add_form).post(add))
        .route("/customers/edit/{id}", get(edit_form).post(edit))
        .route("/customers/delete/{id}", post(delete))
}

async fn list(State(state): State<AppState>) -> Result<Html<String>> {
    let customers = state.customers().list().await?;
    Ok(Html(views::customer_list(&customers)))
}

async fn add_form() -> Html<String> {
    Html(views::customer_form("Add customer", "/customers/add", &CustomerForm::default()))
}

async fn add(State(state): State<AppState>, Form(form): Form<CustomerForm>) -> Result<Redirect> {
    let customer = state.customers().create(form).await?;
    info!("Customer #{} '{}' added", customer.id, customer.name);
    Ok(Redirect::to(LIST))
}

async fn edit_form(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Html<String>> {
    let customer = state
        .customers()
        .get_by_id(id)
        .await?
        .ok_or(BillingError::NotFound("Customer"))?;

    Ok(Html(views::customer_form(
        "Edit customer",
        &format!("/customers/edit/{id}"),
        &CustomerForm::from(customer),
    )))
}

async fn edit(State(state): State<AppState>, Path(id): Path<i32>, Form(form): Form<CustomerForm>) -> Result<Redirect> {
    if !state.customers().update(id, form).await? {
        return Err(BillingError::NotFound("Customer"));
    }
    info!("Customer #{id} updated");
    Ok(Redirect::to(LIST))
}

async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Redirect> {
    let removed = state.customers().delete(id).await?;
    if removed > 0 {
        info!("Customer #{id} deleted");
    }
    else {
        debug!("Customer #{id} was already gone");
    }
    Ok(Redirect::to(LIST))
}
