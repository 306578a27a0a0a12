pub mod billing;
pub mod billing_product;
pub mod customer;
pub mod product;

pub use billing::Entity as Billings;
pub use billing::Manager as BillingMgr;
pub use billing::Model as Billing;
pub use billing_product::Entity as BillingProducts;
pub use billing_product::Model as BillingProduct;
pub use customer::Entity as Customers;
pub use customer::Manager as CustomerMgr;
pub use customer::Model as Customer;
pub use product::Entity as Products;
pub use product::Manager as ProductMgr;
pub use product::Model as Product;
