use std::path::PathBuf;

use url::Url;

use crate::errors::UploadErr;
use crate::params::Args;

const BYTES_PER_MIB: u64 = 1024 * 1024;

#[derive(Clone, Debug)]
pub enum StoreBackend {
    S3 {
        bucket: String,
        endpoint: Option<String>,
    },
    Local {
        directory: PathBuf,
    },
}

/// Validated gateway configuration. Construction is the single place
/// `ServiceMisconfigured` can originate: a deployment with a bad binding
/// fails here, once and loudly, instead of on every request.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub public_base_url: Url,
    pub backend: StoreBackend,
    pub max_upload_bytes: u64,
    pub sniff_mime: bool,
}

fn misconfigured(message: impl Into<String>) -> UploadErr {
    UploadErr::ServiceMisconfigured {
        message: message.into(),
    }
}

impl GatewayConfig {
    pub fn from_args(args: &Args) -> Result<Self, UploadErr> {
        let raw_url = args
            .public_base_url
            .as_deref()
            .ok_or_else(|| misconfigured("public base URL not configured; set --public-base-url"))?;
        let public_base_url = Url::parse(raw_url)
            .map_err(|e| misconfigured(format!("public base URL {raw_url:?} does not parse: {e}")))?;

        let backend = match (&args.bucket, &args.data_dir) {
            (Some(bucket), None) => StoreBackend::S3 {
                bucket: bucket.clone(),
                endpoint: args.s3_endpoint.clone(),
            },
            (None, Some(directory)) => StoreBackend::Local {
                directory: directory.clone(),
            },
            (None, None) => {
                return Err(misconfigured(
                    "no object store configured; set --bucket or --data-dir",
                ))
            }
            (Some(_), Some(_)) => {
                return Err(misconfigured(
                    "both --bucket and --data-dir configured; choose one backend",
                ))
            }
        };

        if args.max_upload_mb == 0 {
            return Err(misconfigured("--max-upload-mb must be at least 1"));
        }

        Ok(Self {
            public_base_url,
            backend,
            max_upload_bytes: args.max_upload_mb * BYTES_PER_MIB,
            sniff_mime: args.sniff_mime,
        })
    }

    pub fn max_upload_mb(&self) -> u64 {
        self.max_upload_bytes / BYTES_PER_MIB
    }

    /// Public base URL concatenated with the generated key.
    pub fn public_url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url.as_str().trim_end_matches('/'), key)
    }
}
