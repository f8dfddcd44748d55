use super::{PeerCredential, SessionConfig, Target, verifier::build_client_config};
use crate::error::{Error, Result};
use rustls::pki_types::{CertificateDer, ServerName};
use std::{fmt, io, net::IpAddr, sync::Arc};
use tokio::{io::AsyncWriteExt, net::TcpStream, time};
use tokio_rustls::{TlsConnector, client::TlsStream};
use tracing::{debug, info};

/// An open TLS connection together with the chain the server presented.
///
/// Dropping the session closes the socket; [`Session::close`] additionally
/// sends a TLS `close_notify` first.
pub struct Session {
    target: Target,
    stream: TlsStream<TcpStream>,
    chain: Vec<CertificateDer<'static>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("target", &self.target)
            .field("chain_len", &self.chain.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    #[must_use]
    pub const fn target(&self) -> &Target {
        &self.target
    }

    /// Presented certificates, leaf first. Never empty.
    #[must_use]
    pub fn chain(&self) -> &[CertificateDer<'static>] {
        &self.chain
    }

    /// Decode the leaf certificate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredential`] if the leaf cannot be parsed.
    pub fn leaf(&self) -> Result<PeerCredential> {
        let leaf = self
            .chain
            .first()
            .ok_or_else(|| Error::NoCredential(self.target.to_string()))?;
        PeerCredential::from_der(leaf.as_ref())
    }

    /// Shut the connection down gracefully.
    pub async fn close(mut self) {
        if let Err(err) = self.stream.shutdown().await {
            debug!(peer = %self.target, "error closing TLS session: {err}");
        }
    }
}

/// Connect to `target` and complete a TLS handshake.
///
/// TCP connect and handshake share the `config.timeout` budget.
///
/// # Errors
///
/// - [`Error::Connection`] on DNS, TCP, handshake failure or timeout
/// - [`Error::NoCredential`] if the server presented no certificates
/// - [`Error::TrustAnchors`] if the configured CA file cannot be loaded
pub async fn open(target: &Target, config: &SessionConfig) -> Result<Session> {
    let connector = TlsConnector::from(Arc::new(build_client_config(config).await?));

    let stream = match time::timeout(config.timeout, handshake(&connector, target)).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(Error::connection(
                target.to_string(),
                io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("no TLS session within {:?}", config.timeout),
                ),
            ));
        }
    };

    let (_, connection) = stream.get_ref();
    if let Some(version) = connection.protocol_version() {
        info!(peer = %target, ?version, "TLS handshake complete");
    }
    let chain = presented_chain(connection.peer_certificates(), target)?;
    debug!(peer = %target, certificates = chain.len(), "peer chain received");

    Ok(Session {
        target: target.clone(),
        stream,
        chain,
    })
}

/// Open a session, decode the leaf certificate and close the session again.
///
/// The connection is released whether or not the leaf could be decoded.
///
/// # Errors
///
/// Any error from [`open`] or [`Session::leaf`].
pub async fn inspect(target: &Target, config: &SessionConfig) -> Result<PeerCredential> {
    let session = open(target, config).await?;
    let leaf = session.leaf();
    session.close().await;
    leaf
}

async fn handshake(connector: &TlsConnector, target: &Target) -> Result<TlsStream<TcpStream>> {
    let addr = target.to_string();

    let port = target.port().parse::<u16>().map_err(|e| {
        Error::connection(
            &addr,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid port {}: {e}", target.port()),
            ),
        )
    })?;
    let server_name =
        server_name_from_host(target.host()).map_err(|e| Error::connection(&addr, e))?;

    debug!(%addr, "connecting");
    let stream = TcpStream::connect((target.host(), port))
        .await
        .map_err(|e| Error::connection(&addr, e))?;

    debug!(%addr, "starting TLS handshake");
    connector
        .connect(server_name, stream)
        .await
        .map_err(|e| Error::connection(&addr, e))
}

fn presented_chain(
    peer_certificates: Option<&[CertificateDer<'static>]>,
    target: &Target,
) -> Result<Vec<CertificateDer<'static>>> {
    match peer_certificates {
        Some(certs) if !certs.is_empty() => Ok(certs.to_vec()),
        _ => Err(Error::NoCredential(target.to_string())),
    }
}

fn server_name_from_host(host: &str) -> io::Result<ServerName<'static>> {
    host.parse::<IpAddr>().map_or_else(
        |_| {
            ServerName::try_from(host.to_string()).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid server name {host:?}: {e}"),
                )
            })
        },
        |ip| Ok(ServerName::from(ip).to_owned()),
    )
}
