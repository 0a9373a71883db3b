//! libcurl-backed transport (blocking, one easy handle per request).

use super::{HttpResponse, Transport, TransportError};
use crate::config::ArcfetchConfig;
use crate::locator::SourceLocator;
use curl::easy::Easy;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_REDIRECTS: u32 = 10;

#[derive(Debug, Clone)]
pub struct CurlTransport {
    probe_timeout: Duration,
    transfer_timeout: Option<Duration>,
    user_agent: String,
}

impl CurlTransport {
    pub fn new(
        probe_timeout: Duration,
        transfer_timeout: Option<Duration>,
        user_agent: impl Into<String>,
    ) -> Self {
        CurlTransport {
            probe_timeout,
            transfer_timeout,
            user_agent: user_agent.into(),
        }
    }

    pub fn from_config(cfg: &ArcfetchConfig) -> Self {
        CurlTransport::new(
            Duration::from_secs(cfg.probe_timeout_secs),
            cfg.transfer_timeout_secs.map(Duration::from_secs),
            cfg.user_agent.clone(),
        )
    }

    fn easy(&self, locator: &SourceLocator) -> Result<Easy, TransportError> {
        let mut easy = Easy::new();
        easy.url(locator.as_str())?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.useragent(&self.user_agent)?;
        Ok(easy)
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        CurlTransport::from_config(&ArcfetchConfig::default())
    }
}

impl Transport for CurlTransport {
    fn head(&self, locator: &SourceLocator) -> Result<u32, TransportError> {
        let mut easy = self.easy(locator)?;
        easy.nobody(true)?; // HEAD request
        easy.timeout(self.probe_timeout)?;
        easy.perform()?;
        Ok(easy.response_code()?)
    }

    fn get(&self, locator: &SourceLocator) -> Result<HttpResponse, TransportError> {
        let mut body = Vec::new();

        let mut easy = self.easy(locator)?;
        easy.connect_timeout(CONNECT_TIMEOUT)?;
        if let Some(t) = self.transfer_timeout {
            easy.timeout(t)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        Ok(HttpResponse { status, body })
    }
}
