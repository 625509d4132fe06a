//! Runtime-agnostic sleep and timeout.
//!
//! Native builds sleep on tokio; the browser build sleeps on `setTimeout`.

use std::future::Future;
use std::time::Duration;

use futures::future::{Either, select};

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    let ms = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

/// Run `fut` for at most `limit`. Returns `None` when the limit elapsed first,
/// in which case `fut` has been dropped.
pub async fn with_timeout<F>(limit: Duration, fut: F) -> Option<F::Output>
where
    F: Future,
{
    let fut = std::pin::pin!(fut);
    let timer = std::pin::pin!(sleep(limit));
    match select(fut, timer).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(((), _)) => None,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn completes_before_limit() {
        let out = with_timeout(Duration::from_secs(5), async { 7 }).await;
        assert_eq!(out, Some(7));
    }

    #[tokio::test]
    async fn gives_up_after_limit() {
        let out = with_timeout(Duration::from_millis(10), async {
            sleep(Duration::from_secs(30)).await;
            7
        })
        .await;
        assert_eq!(out, None);
    }
}
