//! Form resolver boundary contract.

use crate::BoxFuture;
use regform_domain::ValidationOutcome;

/// Asynchronous validation boundary used by form controllers.
///
/// One call produces exactly one outcome. Implementations keep no state
/// between calls, so a resolver can be shared across concurrent submissions.
pub trait FormResolverPort<R>: Send + Sync {
    /// Validate one submission snapshot.
    fn resolve(&self, input: R) -> BoxFuture<'_, ValidationOutcome<R>>;
}
