use clap::Parser;
use miette::{IntoDiagnostic, Result};
use securionpay_adapter::application::adapter::GatewayAdapter;
use securionpay_adapter::domain::ports::{
    ChargeGatewayBox, EventSinkBox, NonceVerifierBox, OrderStore, OrderStoreBox,
};
use securionpay_adapter::domain::settings::ApiKey;
use securionpay_adapter::infrastructure::in_memory::InMemoryOrderStore;
use securionpay_adapter::infrastructure::stub::{
    StaticNonceVerifier, StubGateway, TracingEventSink,
};
use securionpay_adapter::interfaces::csv::order_writer::OrderWriter;
use securionpay_adapter::interfaces::csv::request_reader::{OpType, RequestReader};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Nonce the host embeds in its checkout form; purchase rows must echo it.
const CHECKOUT_NONCE: &str = "edd-gateway";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input requests CSV file
    input: PathBuf,

    /// SecurionPay API secret key. When absent, charges and refunds
    /// refuse safely without calling the gateway.
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let credential = cli.api_key.as_deref().and_then(ApiKey::from_setting);

    let store = InMemoryOrderStore::new();
    let orders: OrderStoreBox = Box::new(store.clone());
    let gateway: ChargeGatewayBox = Box::new(StubGateway::new());
    let nonces: NonceVerifierBox = Box::new(StaticNonceVerifier::new(CHECKOUT_NONCE));
    let events: EventSinkBox = Box::new(TracingEventSink);

    let adapter = GatewayAdapter::new(orders, gateway, nonces, events);

    // Process requests
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = RequestReader::new(file);
    for record_result in reader.requests() {
        let record = match record_result {
            Ok(record) => record,
            Err(e) => {
                eprintln!("Error reading request: {}", e);
                continue;
            }
        };

        let result = match record.op {
            OpType::Purchase => match record.into_checkout() {
                Ok(request) => adapter
                    .process_purchase(request, credential.as_ref())
                    .await
                    .map(|_| ()),
                Err(e) => Err(e),
            },
            OpType::Refund => match record.into_refund() {
                Ok(command) => adapter
                    .maybe_refund(command, credential.as_ref())
                    .await
                    .map(|_| ()),
                Err(e) => Err(e),
            },
        };

        if let Err(e) = result {
            eprintln!("Error processing request: {}", e);
        }
    }

    // Output final order states
    let orders = store.all_orders().await.into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = OrderWriter::new(stdout.lock());
    writer.write_orders(&orders).into_diagnostic()?;

    Ok(())
}
