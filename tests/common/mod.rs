#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use billing_desk::db::driver::sqlite::Sqlite;
use billing_desk::db::migrations::Migrator;
use billing_desk::prelude::*;
use billing_desk::web::BillingDesk;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tempfile::TempDir;
use tower::ServiceExt;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// An application over a fresh, migrated SQLite database in a temporary directory.
pub struct TestDesk {
    pub state: AppState,
    pub app:   Router,
    _dir:      TempDir,
}

pub struct Reply {
    pub status:   StatusCode,
    pub location: Option<String>,
    pub body:     String,
}

impl TestDesk {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let dir = tempfile::Builder::new().prefix("billing-desk-test").tempdir()?;
        let sqlite = Sqlite::connect(&dir.path().join("billing.db"), 2).await?;
        sqlite.configure().await?;
        Migrator::up(&sqlite, None).await?;

        let state: AppState = Arc::new(BillingDesk::new(Arc::new(sqlite)));
        Ok(Self {
            app: router(state.clone()),
            state,
            _dir: dir,
        })
    }

    pub fn db(&self) -> DatabaseConnection {
        self.state.driver().connection()
    }

    async fn send(&self, req: Request<Body>) -> Result<Reply, Box<dyn std::error::Error>> {
        let resp = self.app.clone().oneshot(req).await?;
        let status = resp.status();
        let location = resp
            .headers()
            .get(header::LOCATION)
            .map(|l| l.to_str().map(str::to_owned))
            .transpose()?;
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
        Ok(Reply {
            status,
            location,
            body: String::from_utf8(body.to_vec())?,
        })
    }

    pub async fn get(&self, uri: &str) -> Result<Reply, Box<dyn std::error::Error>> {
        self.send(Request::get(uri).body(Body::empty())?).await
    }

    pub async fn post(&self, uri: &str, form: &str) -> Result<Reply, Box<dyn std::error::Error>> {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_owned()))?,
        )
        .await
    }

    /// Add a customer through the HTTP surface and return its id.
    pub async fn add_customer(&self, name: &str) -> Result<i32, Box<dyn std::error::Error>> {
        let reply = self
            .post("/customers/add", &format!("name={name}&gender=F&contact=555-0100&email=x%40example.com"))
            .await?;
        assert_eq!(reply.status, StatusCode::SEE_OTHER);
        let customers = self.state.customers().list().await?;
        Ok(customers.last().ok_or("customer was not created")?.id)
    }

    /// Add a product through the HTTP surface and return its id.
    pub async fn add_product(&self, name: &str, price: &str) -> Result<i32, Box<dyn std::error::Error>> {
        let reply = self
            .post(
                "/products/add",
                &format!("name={name}&price={price}&quantity=10&brand=Acme&supplier=Bulk&oldStock=0&category=Misc"),
            )
            .await?;
        assert_eq!(reply.status, StatusCode::SEE_OTHER);
        let products = self.state.products().list().await?;
        Ok(products.last().ok_or("product was not created")?.id)
    }
}
