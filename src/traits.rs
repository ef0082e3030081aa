use async_trait::async_trait;

use crate::{config::Config, error::SearchError, types::Delivery};

/// Reports whether the network is reachable right now.
///
/// Must answer without blocking; `false` stops a search before any request is made.
pub trait ConnectivityProbe: Send + Sync {
    fn is_connected(&self) -> bool;
}

/// Issues one GET and hands back the raw body.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, SearchError>;
}

/// Receives the outcomes the loader decides are still current.
pub trait OutcomeSink {
    fn deliver(&mut self, delivery: Delivery);
}

impl OutcomeSink for Vec<Delivery> {
    fn deliver(&mut self, delivery: Delivery) {
        self.push(delivery);
    }
}

impl OutcomeSink for tokio::sync::mpsc::UnboundedSender<Delivery> {
    fn deliver(&mut self, delivery: Delivery) {
        // The receiving side going away just means nobody is looking anymore.
        let _ = self.send(delivery);
    }
}

pub trait DisplayTerminal {
    fn fmt_to_string(&self, config: &Config) -> String;
}
