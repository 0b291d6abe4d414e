//! Share-sheet capability. The core hands the shell a plain-text message;
//! the shell reports whether the sheet completed, was dismissed, or failed.

use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct Share<Ev> {
    context: CapabilityContext<ShareOperation, Ev>,
}

impl<Ev> Capability<Ev> for Share<Ev> {
    type Operation = ShareOperation;
    type MappedSelf<MappedEv> = Share<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Share::new(self.context.map_event(f))
    }
}

impl<Ev> Share<Ev>
where
    Ev: 'static,
{
    #[must_use]
    pub fn new(context: CapabilityContext<ShareOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn share_text<F>(&self, message: impl Into<String>, callback: F)
    where
        F: FnOnce(ShareResponse) -> Ev + Send + 'static,
    {
        let message = message.into();
        let context = self.context.clone();
        self.context.spawn(async move {
            let response = context
                .request_from_shell(ShareOperation::ShareText { message })
                .await;
            context.update_app(callback(response));
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShareOperation {
    ShareText { message: String },
}

impl Operation for ShareOperation {
    type Output = ShareResponse;
}

/// Outcome of presenting the share sheet.
///
/// `Dismissed` is the user backing out, not a failure; only `Failed`
/// is surfaced as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShareResponse {
    Shared,
    Dismissed,
    Failed { reason: String },
}
