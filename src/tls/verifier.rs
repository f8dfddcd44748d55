use super::SessionConfig;
use crate::error::{Error, Result};
use rustls::{
    ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme,
    client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier},
    crypto::CryptoProvider,
    pki_types::{CertificateDer, ServerName, UnixTime},
};
use rustls_pemfile::certs;
use std::{
    io::Cursor,
    path::Path,
    sync::{Arc, OnceLock},
};
use tokio::fs;
use tracing::debug;

static CRYPTO_PROVIDER_INIT: OnceLock<()> = OnceLock::new();

/// Ensure the rustls crypto provider is initialized
///
/// Safe to call multiple times; a provider installed elsewhere in the process
/// is left in place.
pub fn ensure_crypto_provider() {
    CRYPTO_PROVIDER_INIT.get_or_init(|| {
        if CryptoProvider::get_default().is_none()
            && let Err(err) = rustls::crypto::ring::default_provider().install_default()
        {
            debug!("crypto provider already installed: {err:?}");
        }
    });
}

/// Build the client configuration for a session.
///
/// With `verify_trust` off the handshake accepts any certificate, which is
/// what an expiry check needs. With it on, the chain is verified against the
/// bundled Mozilla roots or the PEM bundle in `ca_file`.
///
/// # Errors
///
/// Returns [`Error::TrustAnchors`] if `ca_file` cannot be read or holds no
/// usable certificates.
pub async fn build_client_config(config: &SessionConfig) -> Result<ClientConfig> {
    ensure_crypto_provider();

    if !config.verify_trust {
        debug!("trust validation disabled, accepting any certificate");
        return Ok(ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoVerifier))
            .with_no_client_auth());
    }

    let roots = match &config.ca_file {
        Some(path) => load_root_store(path).await?,
        None => webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect(),
    };
    debug!(roots = roots.len(), "trust validation enabled");

    Ok(ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth())
}

async fn load_root_store(path: &Path) -> Result<RootCertStore> {
    let anchors_error = |reason: String| Error::TrustAnchors {
        path: path.to_path_buf(),
        reason,
    };

    let data = fs::read(path).await.map_err(|e| anchors_error(e.to_string()))?;
    let mut reader = Cursor::new(data);
    let parsed = certs(&mut reader)
        .collect::<std::result::Result<Vec<CertificateDer<'static>>, _>>()
        .map_err(|e| anchors_error(format!("invalid certificate PEM: {e}")))?;

    if parsed.is_empty() {
        return Err(anchors_error("no certificates found".to_string()));
    }

    let mut store = RootCertStore::empty();
    for cert in parsed {
        store
            .add(cert)
            .map_err(|e| anchors_error(format!("unusable trust anchor: {e}")))?;
    }

    Ok(store)
}

/// Certificate verifier that accepts any certificate without validation.
///
/// # Security Note
///
/// Only used when trust validation is switched off, so that expired,
/// self-signed or otherwise untrusted certificates can still be read.
#[derive(Debug)]
pub struct NoVerifier;

impl ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        // follow whichever provider signs the handshake
        CryptoProvider::get_default().map_or_else(
            || {
                rustls::crypto::ring::default_provider()
                    .signature_verification_algorithms
                    .supported_schemes()
            },
            |provider| provider.signature_verification_algorithms.supported_schemes(),
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tlx-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_crypto_provider_init() {
        // Should not panic
        ensure_crypto_provider();
        ensure_crypto_provider(); // Second call should be idempotent
    }

    #[test]
    fn test_no_verifier_supported_schemes() {
        let verifier = NoVerifier;
        let schemes = verifier.supported_verify_schemes();
        assert!(schemes.contains(&SignatureScheme::RSA_PKCS1_SHA256));
        assert!(schemes.contains(&SignatureScheme::ECDSA_NISTP256_SHA256));
        assert!(schemes.contains(&SignatureScheme::ED25519));
    }

    #[test]
    fn test_no_verifier_schemes_follow_installed_provider() {
        ensure_crypto_provider();
        let provider = CryptoProvider::get_default().unwrap();

        assert_eq!(
            NoVerifier.supported_verify_schemes(),
            provider.signature_verification_algorithms.supported_schemes()
        );
    }

    #[tokio::test]
    async fn test_build_client_config_without_verification() {
        let config = SessionConfig::default();
        assert!(build_client_config(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_build_client_config_with_webpki_roots() {
        let config = SessionConfig {
            verify_trust: true,
            ..Default::default()
        };
        assert!(build_client_config(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_ca_file() {
        let config = SessionConfig {
            verify_trust: true,
            ca_file: Some(PathBuf::from("/nonexistent/tlx/ca.pem")),
            ..Default::default()
        };
        let err = build_client_config(&config).await.unwrap_err();
        assert!(matches!(err, Error::TrustAnchors { .. }));
    }

    #[tokio::test]
    async fn test_ca_file_without_certificates() {
        let path = temp_file("empty.pem", "not a certificate\n");
        let config = SessionConfig {
            verify_trust: true,
            ca_file: Some(path.clone()),
            ..Default::default()
        };
        let err = build_client_config(&config).await.unwrap_err();
        std::fs::remove_file(&path).unwrap();

        match err {
            Error::TrustAnchors { reason, .. } => assert!(reason.contains("no certificates")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_ca_file_is_ignored_without_verification() {
        let config = SessionConfig {
            verify_trust: false,
            ca_file: Some(PathBuf::from("/nonexistent/tlx/ca.pem")),
            ..Default::default()
        };
        assert!(build_client_config(&config).await.is_ok());
    }
}
