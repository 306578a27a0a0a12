//! HTML pages. Every value coming from the database or from a form goes through [`escape`].
use std::borrow::Cow;

use crate::db::entity::billing::BillingDetails;
use crate::db::entity::billing::BillingForm;
use crate::db::entity::billing::BillingRow;
use crate::db::entity::billing::SalesSummary;
use crate::db::entity::customer::CustomerForm;
use crate::db::entity::product::ProductForm;
use crate::db::entity::Customer;
use crate::db::entity::Product;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} · Billing Desk</title>
</head>
<body>
<nav>
<a href="/">Dashboard</a> |
<a href="/customers/view">Customers</a> |
<a href="/products/view">Products</a> |
<a href="/billing/view">Billings</a> |
<a href="/billing/add">New billing</a>
</nav>
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

fn input(label: &str, name: &str, kind: &str, value: &str) -> String {
    format!(
        r#"<p><label>{label} <input type="{kind}" name="{name}" value="{value}"></label></p>
"#,
        label = escape(label),
        value = escape(value),
    )
}

pub fn dashboard(summary: &SalesSummary) -> String {
    layout(
        "Dashboard",
        &format!(
            r#"<dl>
<dt>Total sales</dt><dd id="total-sales">{}</dd>
<dt>Total revenue</dt><dd id="total-revenue">{}</dd>
</dl>
"#,
            summary.total_sales, summary.total_revenue
        ),
    )
}

pub fn customer_list(customers: &[Customer]) -> String {
    let rows = customers
        .iter()
        .map(|c| {
            format!(
                r#"<tr><td>{id}</td><td>{name}</td><td>{gender}</td><td>{contact}</td><td>{email}</td>
<td><a href="/customers/edit/{id}">Edit</a>
<form method="post" action="/customers/delete/{id}"><button type="submit">Delete</button></form></td></tr>
"#,
                id = c.id,
                name = escape(&c.name),
                gender = escape(&c.gender),
                contact = escape(&c.contact),
                email = escape(&c.email),
            )
        })
        .collect::<String>();

    layout(
        "Customers",
        &format!(
            r#"<p><a href="/customers/add">Add customer</a></p>
<table>
<tr><th>ID</th><th>Name</th><th>Gender</th><th>Contact</th><th>Email</th><th></th></tr>
{rows}</table>
"#
        ),
    )
}

pub fn customer_form(heading: &str, action: &str, customer: &CustomerForm) -> String {
    layout(
        heading,
        &format!(
            r#"<form method="post" action="{action}">
{}{}{}{}<p><button type="submit">Save</button></p>
</form>
"#,
            input("Name", "name", "text", &customer.name),
            input("Gender", "gender", "text", &customer.gender),
            input("Contact", "contact", "text", &customer.contact),
            input("Email", "email", "email", &customer.email),
            action = escape(action),
        ),
    )
}

pub fn product_list(products: &[Product]) -> String {
    let rows = products
        .iter()
        .map(|p| {
            format!(
                r#"<tr><td>{id}</td><td>{name}</td><td>{price}</td><td>{quantity}</td><td>{brand}</td><td>{supplier}</td><td>{old_stock}</td><td>{category}</td>
<td><a href="/products/edit/{id}">Edit</a> <a href="/products/delete/{id}">Delete</a></td></tr>
"#,
                id = p.id,
                name = escape(&p.name),
                price = p.price,
                quantity = p.quantity,
                brand = escape(&p.brand),
                supplier = escape(&p.supplier),
                old_stock = p.old_stock,
                category = escape(&p.category),
            )
        })
        .collect::<String>();

    layout(
        "Products",
        &format!(
            r#"<p><a href="/products/add">Add product</a></p>
<table>
<tr><th>ID</th><th>Name</th><th>Price</th><th>Quantity</th><th>Brand</th><th>Supplier</th><th>Old stock</th><th>Category</th><th></th></tr>
{rows}</table>
"#
        ),
    )
}

pub fn product_form(heading: &str, action: &str, product: &ProductForm) -> String {
    layout(
        heading,
        &format!(
            r#"<form method="post" action="{action}">
{}{}{}{}{}{}{}<p><button type="submit">Save</button></p>
</form>
"#,
            input("Name", "name", "text", &product.name),
            input("Price", "price", "text", &product.price),
            input("Quantity", "quantity", "number", &product.quantity),
            input("Brand", "brand", "text", &product.brand),
            input("Supplier", "supplier", "text", &product.supplier),
            input("Old stock", "oldStock", "number", &product.old_stock),
            input("Category", "category", "text", &product.category),
            action = escape(action),
        ),
    )
}

pub fn billing_form(customers: &[Customer], products: &[Product]) -> String {
    let options = customers
        .iter()
        .map(|c| format!("<option value=\"{}\">{}</option>\n", c.id, escape(&c.name)))
        .collect::<String>();
    let rows = products
        .iter()
        .map(|p| {
            format!(
                r#"<tr><td><input type="checkbox" name="{products}" value="{id}"></td><td>{name}</td><td>{price}</td>
<td><input type="number" name="{quantity}" value="1" min="1"></td></tr>
"#,
                products = BillingForm::PRODUCTS_FIELD,
                quantity = BillingForm::quantity_field(p.id),
                id = p.id,
                name = escape(&p.name),
                price = p.price,
            )
        })
        .collect::<String>();

    layout(
        "New billing",
        &format!(
            r#"<form method="post" action="/billing/add">
<p><label>Customer <select name="{customer}">
{options}</select></label></p>
<table>
<tr><th></th><th>Product</th><th>Price</th><th>Quantity</th></tr>
{rows}</table>
<p><button type="submit">Create billing</button></p>
</form>
"#,
            customer = BillingForm::CUSTOMER_FIELD,
        ),
    )
}

pub fn billing_list(billings: &[BillingRow]) -> String {
    let rows = billings
        .iter()
        .map(|b| {
            format!(
                "<tr><td><a href=\"/billing/view/{id}\">{id}</a></td><td>{customer}</td><td>{total}</td><td>{date}</td></tr>\n",
                id = b.id,
                customer = escape(&b.customer_name),
                total = b.total_amount,
                date = b.date.format(DATE_FORMAT),
            )
        })
        .collect::<String>();

    layout(
        "Billings",
        &format!(
            r#"<table>
<tr><th>ID</th><th>Customer</th><th>Total</th><th>Date</th></tr>
{rows}</table>
"#
        ),
    )
}

pub fn billing_details(details: &BillingDetails) -> String {
    let customer = details
        .customer
        .as_ref()
        .map_or_else(|| format!("#{} (removed)", details.billing.customer_id), |c| c.name.clone());
    let rows = details
        .lines
        .iter()
        .map(|l| {
            let (name, price) = match &l.product {
                Some(p) => (p.name.clone(), p.price.to_string()),
                None => (format!("#{} (removed)", l.line.product_id), String::new()),
            };
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&name),
                price,
                l.line.quantity,
                l.amount().map(|a| a.to_string()).unwrap_or_default(),
            )
        })
        .collect::<String>();

    layout(
        &format!("Billing #{}", details.billing.id),
        &format!(
            r#"<dl>
<dt>Customer</dt><dd>{customer}</dd>
<dt>Date</dt><dd>{date}</dd>
<dt>Total</dt><dd id="total-amount">{total}</dd>
</dl>
<table>
<tr><th>Product</th><th>Unit price (current)</th><th>Quantity</th><th>Amount</th></tr>
{rows}</table>
"#,
            customer = escape(&customer),
            date = details.billing.date.format(DATE_FORMAT),
            total = details.billing.total_amount,
        ),
    )
}
