use billing_desk::prelude::*;

#[tokio::main]
async fn main() {
    if let Err(err) = BillingApp::run().await {
        if let BillingError::Cli(err) = err {
            err.exit();
        }
        tracing::error!("{err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}
