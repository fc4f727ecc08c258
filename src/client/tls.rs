use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use rustls::RootCertStore;
use rustls::pki_types::CertificateDer;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ConfigError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client trusting the platform roots plus the configured CA bundle.
pub(crate) fn build_http_client(config: &Config) -> Result<Client, ConfigError> {
    let mut roots = RootCertStore::empty();

    let native = rustls_native_certs::load_native_certs();
    for err in &native.errors {
        warn!(%err, "skipping unreadable platform certificate");
    }
    let (added, ignored) = roots.add_parsable_certificates(native.certs);
    debug!(added, ignored, "loaded platform roots");

    if let Some(path) = &config.ca_file {
        for cert in read_pem_certs(path)? {
            roots.add(cert)?;
        }
    }

    let tls = rustls::ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()?
    .with_root_certificates(roots)
    .with_no_client_auth();

    Ok(Client::builder()
        .use_preconfigured_tls(tls)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()?)
}

pub(crate) fn read_pem_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let certs = rustls_pemfile::certs(&mut BufReader::new(file))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    if certs.is_empty() {
        return Err(ConfigError::EmptyCaFile(path.to_path_buf()));
    }
    Ok(certs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_ca_file_is_a_read_error() {
        let path = Path::new("/nonexistent/kmui/ca.pem");
        assert!(matches!(read_pem_certs(path), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn file_without_certificates_is_rejected() {
        let path = std::env::temp_dir().join(format!("kmui-empty-ca-{}.pem", std::process::id()));
        std::fs::write(&path, "not a certificate\n").unwrap();

        let result = read_pem_certs(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::EmptyCaFile(_))));
    }
}
