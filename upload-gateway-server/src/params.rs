use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "upload-gateway", about = "Media storefront upload gateway")]
pub struct Args {
    /// Address the HTTP server binds to.
    #[clap(long, env = "UPLOAD_GATEWAY_HTTP_ADDR", default_value = "127.0.0.1:8080")]
    pub http_addr: String,

    /// Public base URL under which stored object keys resolve.
    #[clap(long, env = "UPLOAD_GATEWAY_PUBLIC_BASE_URL")]
    pub public_base_url: Option<String>,

    /// S3-compatible bucket to upload into.
    #[clap(long, env = "UPLOAD_GATEWAY_BUCKET")]
    pub bucket: Option<String>,

    /// Custom S3 endpoint (MinIO, R2); path-style addressing is forced.
    #[clap(long, env = "UPLOAD_GATEWAY_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// Local directory backend, mutually exclusive with --bucket.
    #[clap(long, env = "UPLOAD_GATEWAY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Upload size ceiling in MiB.
    #[clap(long, env = "UPLOAD_GATEWAY_MAX_UPLOAD_MB", default_value_t = 100)]
    pub max_upload_mb: u64,

    /// Fill in missing content types from magic bytes.
    #[clap(long, env = "UPLOAD_GATEWAY_SNIFF_MIME")]
    pub sniff_mime: bool,
}
