//! HTTP surface.
pub mod billing;
pub mod customers;
pub mod home;
pub mod products;
pub mod views;

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Router;
use tracing::debug;
use tracing::error;

use crate::db::prelude::*;
use crate::types::BillingError;

/// Everything the request handlers share.
#[derive(Debug)]
pub struct BillingDesk {
    driver:    Arc<dyn DatabaseDriver>,
    customers: CustomerMgr,
    products:  ProductMgr,
    billings:  BillingMgr,
}

impl BillingDesk {
    pub fn new(driver: Arc<dyn DatabaseDriver>) -> Self {
        let db = driver.connection();
        Self {
            customers: CustomerMgr::new(db.clone()),
            products: ProductMgr::new(db.clone()),
            billings: BillingMgr::new(db),
            driver,
        }
    }

    pub fn driver(&self) -> &Arc<dyn DatabaseDriver> {
        &self.driver
    }

    pub fn customers(&self) -> &CustomerMgr {
        &self.customers
    }

    pub fn products(&self) -> &ProductMgr {
        &self.products
    }

    pub fn billings(&self) -> &BillingMgr {
        &self.billings
    }
}

pub type AppState = Arc<BillingDesk>;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(home::routes())
        .merge(customers::routes())
        .merge(products::routes())
        .merge(billing::routes())
        .fallback(not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();

    let response = next.run(req).await;

    debug!(
        "{method} {uri} -> {} in {:?}",
        response.status().as_u16(),
        started.elapsed()
    );
    response
}

impl IntoResponse for BillingError {
    fn into_response(self) -> Response {
        match self {
            BillingError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            BillingError::InvalidInput { .. } => {
                debug!("Rejected request: {self}");
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            err => {
                error!("Request failed: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_status() {
        assert_eq!(
            BillingError::NotFound("Customer").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BillingError::invalid_input("price", "not a number")
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BillingError::Db(sea_orm::DbErr::Custom("boom".into()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
