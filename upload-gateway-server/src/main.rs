use actix_web::{web, App, HttpServer};
use clap::Parser;

use media_store::{LocalObjectStore, ObjectStores, S3ObjectStore};
use upload_gateway::config::{GatewayConfig, StoreBackend};
use upload_gateway::params::Args;
use upload_gateway::services::upload_service::{self, AppState};
use upload_gateway::sniff::{MagicByteSniffer, MimeSniff};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt::init();

    let config = match GatewayConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("refusing to start: {}: {}", e, e.detail().unwrap_or("unknown"));
            std::process::exit(1);
        }
    };

    let store = match &config.backend {
        StoreBackend::Local { directory } => {
            tokio::fs::create_dir_all(directory).await?;
            tracing::info!("using local object store at {}", directory.display());
            ObjectStores::Local(LocalObjectStore::new(directory.clone()))
        }
        StoreBackend::S3 { bucket, endpoint } => {
            tracing::info!("using S3 object store, bucket {}", bucket);
            ObjectStores::S3(S3ObjectStore::connect(bucket.clone(), endpoint.as_deref()).await)
        }
    };

    let sniffer: Option<Box<dyn MimeSniff>> = config
        .sniff_mime
        .then(|| Box::new(MagicByteSniffer) as Box<dyn MimeSniff>);

    let state = web::Data::new(AppState {
        config,
        store,
        sniffer,
    });

    tracing::info!("upload gateway listening on {}", args.http_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(upload_service::configure)
    })
    .bind(args.http_addr.clone())?
    .run()
    .await
}
