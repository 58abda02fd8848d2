use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::error::WizardError;

/// Await a remote call unless the issuing view goes away first.
///
/// A result that arrives after cancellation is discarded.
pub(crate) async fn guarded<T, E>(
  cancel: &CancellationToken,
  call: impl Future<Output = Result<T, E>>,
) -> Result<T, WizardError>
where
  WizardError: From<E>,
{
  let result = tokio::select! {
    biased;
    _ = cancel.cancelled() => return Err(WizardError::Cancelled),
    result = call => result,
  };

  if cancel.is_cancelled() {
    warn!("view closed while the call completed, ignoring result");
    return Err(WizardError::Cancelled);
  }

  Ok(result?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use briefing_client::ClientError;

  #[tokio::test]
  async fn test_passes_result_through() {
    let cancel = CancellationToken::new();
    let value = guarded(&cancel, async { Ok::<_, ClientError>(7) }).await;
    assert!(matches!(value, Ok(7)));
  }

  #[tokio::test]
  async fn test_cancelled_before_call() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let value = guarded(&cancel, async { Ok::<_, ClientError>(7) }).await;
    assert!(matches!(value, Err(WizardError::Cancelled)));
  }

  #[tokio::test]
  async fn test_cancelled_during_call() {
    let cancel = CancellationToken::new();
    let inner = cancel.clone();
    let value = guarded(&cancel, async move {
      inner.cancel();
      Ok::<_, ClientError>(7)
    })
    .await;
    assert!(matches!(value, Err(WizardError::Cancelled)));
  }
}
