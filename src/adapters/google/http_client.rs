use error_stack::ResultExt;
use google_sheets4::{hyper, hyper_rustls};

use crate::config::ConfigurationError;

pub type HttpsConnector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;

/// HTTPS-only client trusting the platform's root certificates.
pub fn http_client() -> error_stack::Result<hyper::Client<HttpsConnector>, ConfigurationError> {
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .change_context(ConfigurationError::TlsRoots)
        .attach_printable("No usable root certificate was found on this machine")?
        .https_only()
        .enable_http1()
        .build();

    Ok(hyper::Client::builder().build(connector))
}
