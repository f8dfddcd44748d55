use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use x509_parser::{
    objects::{oid_registry, oid2abbrev},
    prelude::{FromDer, X509Certificate},
    time::ASN1Time,
    x509::{AttributeTypeAndValue, X509Name},
};

/// Attribute token that precedes the common name in an encoded subject
const COMMON_NAME_PREFIX: &str = "CN=";

/// Leaf certificate details read after the handshake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerCredential {
    /// Subject common name, or the full encoded subject when there is no
    /// leading `CN=`
    pub subject_name: String,
    /// Issuer DN in the same encoding as the subject
    pub issuer: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

impl PeerCredential {
    /// Decode a DER certificate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredential`] if the bytes are not a valid X.509
    /// certificate or a validity instant is out of range.
    pub fn from_der(cert_der: &[u8]) -> Result<Self> {
        let (_, cert) = X509Certificate::from_der(cert_der)
            .map_err(|e| Error::InvalidCredential(e.to_string()))?;

        let subject = encode_name(cert.subject());
        let validity = cert.validity();

        Ok(Self {
            subject_name: common_name(&subject).to_string(),
            issuer: encode_name(cert.issuer()),
            not_before: to_utc(&validity.not_before)?,
            not_after: to_utc(&validity.not_after)?,
        })
    }
}

/// Reduce an encoded subject to its common name.
///
/// Best effort: when the subject does not start with `CN=` it is returned
/// unchanged.
#[must_use]
pub fn common_name(encoded_subject: &str) -> &str {
    encoded_subject
        .strip_prefix(COMMON_NAME_PREFIX)
        .unwrap_or(encoded_subject)
}

/// Encode a distinguished name the RFC 4514 way: RDNs in reverse order
/// separated by `,`, multi-valued RDNs joined with `+`.
///
/// The most specific attribute comes first, so a typical server subject
/// `C=US, O=Example Inc, CN=www.example.org` encodes as
/// `CN=www.example.org,O=Example Inc,C=US`.
fn encode_name(name: &X509Name) -> String {
    let rdns: Vec<_> = name.iter_rdn().collect();
    rdns.iter()
        .rev()
        .map(|rdn| {
            rdn.iter()
                .map(encode_attribute)
                .collect::<Vec<_>>()
                .join("+")
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn encode_attribute(attr: &AttributeTypeAndValue) -> String {
    let oid = attr.attr_type();
    let key = oid2abbrev(oid, oid_registry()).map_or_else(|_| oid.to_id_string(), str::to_string);

    // non-string values are written as `#` followed by the hex of the raw value
    let value = attr.as_str().map_or_else(
        |_| {
            attr.as_slice()
                .iter()
                .fold(String::from("#"), |mut hex, byte| {
                    let _ = write!(hex, "{byte:02x}");
                    hex
                })
        },
        str::to_string,
    );

    format!("{key}={value}")
}

fn to_utc(time: &ASN1Time) -> Result<DateTime<Utc>> {
    let raw = time.to_datetime();
    DateTime::<Utc>::from_timestamp(raw.unix_timestamp(), raw.nanosecond())
        .ok_or_else(|| Error::InvalidCredential(format!("invalid certificate timestamp: {time}")))
}
