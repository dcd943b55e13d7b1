use crate::register::BasicRegister;
use crate::robots::{fetch_robots, robots_txt_link, ParsedRobots};
use crate::{Result, SumiError};
use reqwest::Client;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Fetches each robots.txt file once and shares it between callers
///
/// Concurrent lookups for the same site wait for a single fetch. Failed
/// fetches are not cached.
pub struct RobotsRegister {
    client: Client,
    register: BasicRegister<String, Arc<ParsedRobots>>,
}

impl RobotsRegister {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            register: BasicRegister::new(),
        }
    }

    /// Returns the robots.txt rules governing `link`
    pub async fn get(&self, token: &CancellationToken, link: &str) -> Result<Arc<ParsedRobots>> {
        let robots_link = robots_txt_link(link)?;
        let key = robots_link.to_string();

        let lookup = self.register.register(key, || async {
            fetch_robots(&self.client, &robots_link).await.map(Arc::new)
        });

        tokio::select! {
            biased;
            _ = token.cancelled() => Err(SumiError::Cancelled),
            result = lookup => result,
        }
    }

    /// Returns the number of cached robots.txt files
    pub fn len(&self) -> usize {
        self.register.len()
    }

    pub fn is_empty(&self) -> bool {
        self.register.is_empty()
    }
}
