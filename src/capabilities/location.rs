//! Positioning capability. The shell owns the actual platform calls
//! (permission prompt, one-shot GPS fix); the core only requests them
//! and receives a [`LocationResponse`].

use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct Location<Ev> {
    context: CapabilityContext<LocationOperation, Ev>,
}

impl<Ev> Capability<Ev> for Location<Ev> {
    type Operation = LocationOperation;
    type MappedSelf<MappedEv> = Location<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Location::new(self.context.map_event(f))
    }
}

impl<Ev> Location<Ev>
where
    Ev: 'static,
{
    #[must_use]
    pub fn new(context: CapabilityContext<LocationOperation, Ev>) -> Self {
        Self { context }
    }

    /// Ask the shell for foreground positioning permission.
    ///
    /// Resolves with `PermissionGranted` or `PermissionDenied`.
    pub fn request_permission<F>(&self, callback: F)
    where
        F: FnOnce(LocationResponse) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let response = context
                .request_from_shell(LocationOperation::RequestPermission)
                .await;
            context.update_app(callback(response));
        });
    }

    /// Ask the shell for a one-shot current position fix.
    ///
    /// Resolves with `Fix` or `Unavailable`. Requesting a fix without
    /// permission is a shell-side error and comes back as `Unavailable`.
    pub fn get_current_fix<F>(&self, callback: F)
    where
        F: FnOnce(LocationResponse) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let response = context
                .request_from_shell(LocationOperation::GetCurrentFix)
                .await;
            context.update_app(callback(response));
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationOperation {
    RequestPermission,
    GetCurrentFix,
}

impl Operation for LocationOperation {
    type Output = LocationResponse;
}

/// Shell's answer to either location operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocationResponse {
    PermissionGranted,
    PermissionDenied,
    Fix { latitude: f64, longitude: f64 },
    Unavailable { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_serialize_for_the_bridge() {
        let op = LocationOperation::GetCurrentFix;
        let json = serde_json::to_string(&op).unwrap();
        let back: LocationOperation = serde_json::from_str(&json).unwrap();
        assert_eq!(op, back);
    }

    #[test]
    fn fix_response_round_trips() {
        let response = LocationResponse::Fix {
            latitude: -16.6869,
            longitude: -49.2648,
        };
        let json = serde_json::to_string(&response).unwrap();
        let back: LocationResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(response, back);
    }
}
