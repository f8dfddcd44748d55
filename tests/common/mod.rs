#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use chrono::{DateTime, Duration, Utc};
use rcgen::{
    BasicConstraints, Certificate, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair,
};
use rustls::{
    ServerConfig,
    pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer},
};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use time::OffsetDateTime;
use tlx::tls::{Target, ensure_crypto_provider};
use tokio::{io::AsyncReadExt, net::TcpListener, task::JoinHandle};
use tokio_rustls::TlsAcceptor;

pub const TEST_DOMAIN: &str = "test.example.com";

/// Server certificate plus the PEM of whatever should be trusted to verify it
pub struct TestCert {
    pub chain: Vec<CertificateDer<'static>>,
    pub key: PrivateKeyDer<'static>,
    pub trust_anchor_pem: String,
    pub not_after: DateTime<Utc>,
}

fn to_offset(instant: DateTime<Utc>) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(instant.timestamp()).unwrap()
}

/// Whole seconds, matching what fits in an X.509 validity field
pub fn truncate_to_seconds(instant: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(instant.timestamp(), 0).unwrap()
}

fn leaf_params(
    common_name: &str,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
) -> CertificateParams {
    let mut params =
        CertificateParams::new(vec![common_name.to_string(), "127.0.0.1".to_string()]).unwrap();
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, common_name);
    params.distinguished_name = dn;
    params.not_before = to_offset(not_before);
    params.not_after = to_offset(not_after);
    params
}

fn private_key(key_pair: &KeyPair) -> PrivateKeyDer<'static> {
    PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()))
}

/// Self-signed certificate for `common_name` expiring at `not_after`
pub fn self_signed(common_name: &str, not_after: DateTime<Utc>) -> TestCert {
    let not_after = truncate_to_seconds(not_after);
    let key_pair = KeyPair::generate().unwrap();
    let cert = leaf_params(common_name, not_after - Duration::days(365), not_after)
        .self_signed(&key_pair)
        .unwrap();

    TestCert {
        chain: vec![cert.der().clone()],
        key: private_key(&key_pair),
        trust_anchor_pem: cert.pem(),
        not_after,
    }
}

fn test_ca() -> (Certificate, KeyPair) {
    let key_pair = KeyPair::generate().unwrap();
    let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, "tlx test CA");
    params.distinguished_name = dn;
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.not_before = to_offset(Utc::now() - Duration::days(30));
    params.not_after = to_offset(Utc::now() + Duration::days(3650));
    let cert = params.self_signed(&key_pair).unwrap();
    (cert, key_pair)
}

/// Leaf for `common_name` (and 127.0.0.1) signed by a fresh test CA; the CA
/// is the trust anchor
pub fn ca_signed(common_name: &str, not_after: DateTime<Utc>) -> TestCert {
    let not_after = truncate_to_seconds(not_after);
    let (ca_cert, ca_key) = test_ca();
    let key_pair = KeyPair::generate().unwrap();
    let cert = leaf_params(common_name, Utc::now() - Duration::days(1), not_after)
        .signed_by(&key_pair, &ca_cert, &ca_key)
        .unwrap();

    TestCert {
        chain: vec![cert.der().clone(), ca_cert.der().clone()],
        key: private_key(&key_pair),
        trust_anchor_pem: ca_cert.pem(),
        not_after,
    }
}

/// TLS server on 127.0.0.1 that completes handshakes and then waits for the
/// client to hang up. Aborted on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn target(&self) -> Target {
        Target::new(self.addr.ip().to_string(), Some(self.addr.port().to_string()))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_tls_server(cert: &TestCert) -> TestServer {
    ensure_crypto_provider();

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(cert.chain.clone(), cert.key.clone_key())
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                if let Ok(mut tls) = acceptor.accept(stream).await {
                    let mut buffer = [0u8; 1];
                    let _ = tls.read(&mut buffer).await;
                }
            });
        }
    });

    TestServer { addr, handle }
}

/// Server that accepts TCP connections but never answers the ClientHello
pub async fn spawn_silent_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    TestServer { addr, handle }
}

/// Address nothing is listening on
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Write `contents` to a per-test file in the temp dir
pub fn write_temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tlx-it-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}
