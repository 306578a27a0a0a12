#![cfg(feature = "sqlite")]

mod common;

use axum::http::StatusCode;
use common::TestDesk;
use common::TestResult;
use sea_orm::prelude::Decimal;
use sea_orm::ConnectionTrait;
use sea_orm::EntityTrait;
use sea_orm::PaginatorTrait;

use billing_desk::db::entity::billing::BillingForm;
use billing_desk::db::entity::billing::LineItem;
use billing_desk::db::entity::BillingProducts;
use billing_desk::db::entity::Billings;

#[tokio::test]
async fn billing_total_is_computed_from_prices() -> TestResult {
    let desk = TestDesk::new().await?;
    let customer = desk.add_customer("Ann").await?;
    let tea = desk.add_product("Tea", "10.00").await?;
    let cake = desk.add_product("Cake", "3.50").await?;

    let reply = desk
        .post(
            "/billing/add",
            &format!("customer={customer}&products={tea}&quantity-{tea}=2&products={cake}&quantity-{cake}=1"),
        )
        .await?;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/billing/view"));

    let billings = desk.state.billings().list().await?;
    assert_eq!(billings.len(), 1);
    assert_eq!(billings[0].customer_name, "Ann");
    assert_eq!(billings[0].total_amount, Decimal::new(2350, 2));

    let details = desk
        .state
        .billings()
        .details(billings[0].id)
        .await?
        .ok_or("billing vanished")?;
    assert_eq!(details.billing.customer_id, customer);
    let lines = details
        .lines
        .iter()
        .map(|l| (l.line.product_id, l.line.quantity))
        .collect::<Vec<_>>();
    assert_eq!(lines, vec![(tea, 2), (cake, 1)]);

    let page = desk.get("/billing/view").await?;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Ann"));

    let page = desk.get(&format!("/billing/view/{}", billings[0].id)).await?;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Tea"));
    assert!(page.body.contains("Cake"));

    Ok(())
}

#[tokio::test]
async fn unknown_products_are_skipped() -> TestResult {
    let desk = TestDesk::new().await?;
    let customer = desk.add_customer("Bob").await?;
    let tea = desk.add_product("Tea", "10.00").await?;

    let reply = desk
        .post(
            "/billing/add",
            &format!("customer={customer}&products=999&quantity-999=4&products={tea}&quantity-{tea}=1"),
        )
        .await?;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);

    let billings = desk.state.billings().list().await?;
    assert_eq!(billings.len(), 1);
    assert_eq!(billings[0].total_amount, Decimal::new(1000, 2));
    assert_eq!(BillingProducts::find().count(&desk.db()).await?, 1);

    Ok(())
}

#[tokio::test]
async fn billing_without_products() -> TestResult {
    let desk = TestDesk::new().await?;
    let customer = desk.add_customer("Carol").await?;

    let reply = desk.post("/billing/add", &format!("customer={customer}")).await?;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);

    let billings = desk.state.billings().list().await?;
    assert_eq!(billings.len(), 1);
    assert_eq!(billings[0].total_amount, Decimal::ZERO);

    Ok(())
}

#[tokio::test]
async fn malformed_billing_writes_nothing() -> TestResult {
    let desk = TestDesk::new().await?;
    let customer = desk.add_customer("Dave").await?;
    let tea = desk.add_product("Tea", "10.00").await?;

    for form in [
        format!("products={tea}&quantity-{tea}=1"),
        format!("customer=abc&products={tea}&quantity-{tea}=1"),
        format!("customer={customer}&products={tea}"),
        format!("customer={customer}&products={tea}&quantity-{tea}=two"),
        format!("customer={customer}&products=tea&quantity-tea=1"),
    ] {
        let reply = desk.post("/billing/add", &form).await?;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "form: {form}");
    }

    let db = desk.db();
    assert_eq!(Billings::find().count(&db).await?, 0);
    assert_eq!(BillingProducts::find().count(&db).await?, 0);

    Ok(())
}

#[tokio::test]
async fn overflowing_total_is_rejected() -> TestResult {
    let desk = TestDesk::new().await?;
    let customer = desk.add_customer("Gina").await?;
    let gold = desk.add_product("Gold", "100000000000000000000").await?;

    let reply = desk
        .post(
            "/billing/add",
            &format!("customer={customer}&products={gold}&quantity-{gold}=2000000000"),
        )
        .await?;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body.contains(&format!("'quantity-{gold}'")), "{}", reply.body);

    let db = desk.db();
    assert_eq!(Billings::find().count(&db).await?, 0);
    assert_eq!(BillingProducts::find().count(&db).await?, 0);

    Ok(())
}

#[tokio::test]
async fn failed_line_insert_rolls_back_billing() -> TestResult {
    let desk = TestDesk::new().await?;
    let customer = desk.add_customer("Hank").await?;
    let tea = desk.add_product("Tea", "10.00").await?;

    desk.db().execute_unprepared("DROP TABLE billing_products").await?;

    let reply = desk
        .post("/billing/add", &format!("customer={customer}&products={tea}&quantity-{tea}=1"))
        .await?;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.body, "Internal Server Error");

    assert_eq!(Billings::find().count(&desk.db()).await?, 0);

    Ok(())
}

#[tokio::test]
async fn receipt_reports_lines_and_skipped() -> TestResult {
    let desk = TestDesk::new().await?;
    let customer = desk.add_customer("Iris").await?;
    let tea = desk.add_product("Tea", "10.00").await?;

    let form = BillingForm {
        customer_id: customer,
        lines:       vec![
            LineItem {
                product_id: tea,
                quantity:   3,
            },
            LineItem {
                product_id: 4242,
                quantity:   1,
            },
        ],
    };
    let receipt = desk.state.billings().create(&form).await?;

    assert_eq!(receipt.skipped, vec![4242]);
    assert_eq!(receipt.lines.len(), 1);
    assert_eq!(receipt.lines[0].billing_id, receipt.billing.id);
    assert_eq!(receipt.lines[0].product_id, tea);
    assert_eq!(receipt.lines[0].quantity, 3);

    let stored = desk
        .state
        .billings()
        .get_by_id(receipt.billing.id)
        .await?
        .ok_or("billing vanished")?;
    assert_eq!(stored.customer_id, customer);
    assert_eq!(stored.total_amount, Decimal::new(3000, 2));
    assert!(desk.state.billings().get_by_id(receipt.billing.id + 1).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn dashboard_totals() -> TestResult {
    let desk = TestDesk::new().await?;

    let page = desk.get("/").await?;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains(r#"<dd id="total-sales">0</dd>"#), "{}", page.body);
    assert!(page.body.contains(r#"<dd id="total-revenue">0</dd>"#), "{}", page.body);

    let customer = desk.add_customer("Eve").await?;
    let tea = desk.add_product("Tea", "10.00").await?;
    let cake = desk.add_product("Cake", "3.50").await?;
    desk.post(
        "/billing/add",
        &format!("customer={customer}&products={tea}&quantity-{tea}=2&products={cake}&quantity-{cake}=1"),
    )
    .await?;
    desk.post("/billing/add", &format!("customer={customer}&products={cake}&quantity-{cake}=3"))
        .await?;

    let summary = desk.state.billings().summary().await?;
    assert_eq!(summary.total_sales, 2);
    assert_eq!(summary.total_revenue, Decimal::new(3400, 2));

    let page = desk.get("/").await?;
    assert!(page.body.contains(r#"<dd id="total-sales">2</dd>"#), "{}", page.body);

    Ok(())
}

#[tokio::test]
async fn billing_form_lists_customers_and_products() -> TestResult {
    let desk = TestDesk::new().await?;
    let customer = desk.add_customer("Frank").await?;
    let tea = desk.add_product("Tea", "10.00").await?;

    let page = desk.get("/billing/add").await?;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains(&format!(r#"<option value="{customer}">Frank</option>"#)));
    assert!(page.body.contains(&format!(r#"name="quantity-{tea}""#)));

    Ok(())
}

#[tokio::test]
async fn missing_billing_and_unknown_routes() -> TestResult {
    let desk = TestDesk::new().await?;

    let page = desk.get("/billing/view/77").await?;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert_eq!(page.body, "Billing not found");

    let page = desk.get("/no/such/page").await?;
    assert_eq!(page.status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn health_reports_database() -> TestResult {
    let desk = TestDesk::new().await?;

    let reply = desk.get("/health").await?;
    assert_eq!(reply.status, StatusCode::OK);
    let health: serde_json::Value = serde_json::from_str(&reply.body)?;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["database"], true);
    assert_eq!(health["backend"], "SQLite");

    Ok(())
}
