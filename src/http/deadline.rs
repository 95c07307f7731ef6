// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Best-effort deadline for a call
//!
//! The call runs as its own task and races a timer. When the timer wins the
//! task is detached, not aborted: it keeps running to completion and its
//! result is dropped.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{Error, Result};

/// Run the call for `url` with a deadline
///
/// Fails with [`Error::Timeout`] when `deadline` elapses first.
pub async fn guard<F, T>(call: F, deadline: Duration, url: &str) -> Result<T>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let mut task = tokio::spawn(call);

    tokio::select! {
        joined = &mut task => match joined {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(Error::other(format!("Request task failed: {}", e))),
        },
        _ = tokio::time::sleep(deadline) => {
            let duration_ms = deadline.as_millis() as u64;
            warn!(url = %url, duration_ms, "Deadline elapsed, detaching in-flight call");
            Err(Error::timeout("request", duration_ms, url))
        }
    }
}
