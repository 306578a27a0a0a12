use axum::extract::Path;
use axum::extract::State;
use axum::response::Html;
use axum::response::Redirect;
use axum::routing::get;
use axum::Form;
use axum::Router;
use tracing::debug;
use tracing::info;

use super::views;
use super::AppState;
use crate::db::entity::product::ProductForm;
use crate::types::BillingError;
use crate::types::Result;

const LIST: &str = "/products/view";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LIST, get(list))
        .route("/products/add", get(add_form).post(add))
        .route("/products/edit/{id}", get(edit_form).post(edit))
        // Delete links in the product list are plain anchors, hence GET.
        .route("/products/delete/{id}", get(delete).post(delete))
}

async fn list(State(state): State<AppState>) -> Result<Html<String>> {
    let products = state.products().list().await?;
    Ok(Html(views::product_list(&products)))
}

async fn add_form() -> Html<String> {
    Html(views::product_form("Add product", "/products/add", &ProductForm::default()))
}

async fn add(State(state): State<AppState>, Form(form): Form<ProductForm>) -> Result<Redirect> {
    let product = state.products().create(form).await?;
    info!("Product #{} '{}' added at {}", product.id, product.name, product.price);
    Ok(Redirect::to(LIST))
}

async fn edit_form(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Html<String>> {
    let product = state
        .products()
        .get_by_id(id)
        .await?
        .ok_or(BillingError::NotFound("Product"))?;

    Ok(Html(views::product_form(
        "Edit product",
        &format!("/products/edit/{id}"),
        &ProductForm::from(product),
    )))
}

async fn edit(State(state): State<AppState>, Path(id): Path<i32>, Form(form): Form<ProductForm>) -> Result<Redirect> {
    if !state.products().update(id, form).await? {
        return Err(BillingError::NotFound("Product"));
    }
    info!("Product #{id} updated");
    Ok(Redirect::to(LIST))
}

async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Redirect> {
    if state.products().delete(id).await? > 0 {
        info!("Product #{id} deleted");
    }
    else {
        debug!("Product #{id} was already gone");
    }
    Ok(Redirect::to(LIST))
}
