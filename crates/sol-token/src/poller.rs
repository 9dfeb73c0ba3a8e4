//! Waiting for accounts to become visible on chain.
//!
//! A freshly submitted transaction is not immediately reflected by every RPC
//! node. The poller queries an account on a fixed tick until it holds data,
//! racing each tick and each query against a deadline and a cancellation
//! token. Query errors count as "not yet visible"; only the deadline or the
//! token end the wait with an error.

use std::time::Duration;

use chain_sol::{encode_address, Pubkey};
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::{AccountInfo, ChainClient};
use crate::config::TokenConfig;
use crate::error::{ClientError, TokenError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPoller {
    interval: Duration,
    timeout: Duration,
}

impl ConfirmationPoller {
    /// The interval is capped at half the timeout, so the first tick lands
    /// strictly before the deadline.
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self {
            interval: interval.min(timeout / 2).max(Duration::from_millis(1)),
            timeout,
        }
    }

    pub fn from_config(config: &TokenConfig) -> Self {
        Self::new(config.poll_interval(), config.confirmation_timeout())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Block until `address` holds a non-empty data buffer.
    ///
    /// The first query happens one interval after the call. If the deadline
    /// passes before any query was made (a timeout shorter than the timer
    /// resolution), one last query decides the outcome.
    pub async fn wait_until_visible<C: ChainClient>(
        &self,
        client: &C,
        address: &Pubkey,
        cancel: &CancellationToken,
    ) -> Result<(), TokenError> {
        let started = Instant::now();
        let deadline = sleep(self.timeout);
        tokio::pin!(deadline);

        let mut ticker = interval_at(started + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let timed_out = || {
            warn!(
                address = %encode_address(address),
                waited = ?self.timeout,
                "account did not become visible"
            );
            TokenError::Timeout {
                address: encode_address(address),
                waited: self.timeout,
            }
        };

        let mut attempt = 0u32;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(TokenError::Cancelled),
                _ = &mut deadline => {
                    if attempt == 0 {
                        let info = tokio::select! {
                            biased;
                            _ = cancel.cancelled() => return Err(TokenError::Cancelled),
                            info = client.account_info(address) => info,
                        };
                        if is_visible(info, address, 1, started) {
                            return Ok(());
                        }
                    }
                    return Err(timed_out());
                }
                _ = ticker.tick() => {}
            }

            attempt += 1;
            let info = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(TokenError::Cancelled),
                _ = &mut deadline => return Err(timed_out()),
                info = client.account_info(address) => info,
            };

            if is_visible(info, address, attempt, started) {
                return Ok(());
            }
        }
    }
}

fn is_visible(
    info: Result<Option<AccountInfo>, ClientError>,
    address: &Pubkey,
    attempt: u32,
    started: Instant,
) -> bool {
    match info {
        Ok(Some(info)) if info.data_len() > 0 => {
            debug!(
                address = %encode_address(address),
                attempt,
                elapsed = ?started.elapsed(),
                "account visible"
            );
            true
        }
        Ok(_) => {
            debug!(attempt, "account not visible yet");
            false
        }
        Err(e) => {
            debug!(attempt, error = %e, "account query failed, retrying");
            false
        }
    }
}

impl Default for ConfirmationPoller {
    fn default() -> Self {
        Self::from_config(&TokenConfig::default())
    }
}
