//! Screen routes and navigation requests.
//!
//! Controllers never switch screens themselves. They send a [`Route`] through
//! a [`Navigator`] and the app shell applies it on its next
//! `pump_navigation` call. Requests sent by a session carry its id so the
//! shell can drop them once that session is gone.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::debug;
use uuid::Uuid;

/// A top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    #[default]
    Home,
    Shop,
    ArScan,
    Cart,
    Checkout,
    StoreMap,
    Profile,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Home => "home",
            Self::Shop => "shop",
            Self::ArScan => "ar-scan",
            Self::Cart => "cart",
            Self::Checkout => "checkout",
            Self::StoreMap => "store-map",
            Self::Profile => "profile",
        };
        f.write_str(name)
    }
}

/// A queued navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationRequest {
    pub route: Route,
    /// Session that asked for the switch, if any.
    pub origin: Option<Uuid>,
}

/// Sending half handed to controllers.
#[derive(Debug, Clone)]
pub struct Navigator {
    tx: UnboundedSender<NavigationRequest>,
}

impl Navigator {
    /// Create a navigator and the receiver the shell drains.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<NavigationRequest>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }

    /// Ask the shell to show `route`.
    ///
    /// Requests sent after the shell is gone are dropped.
    pub fn request(&self, route: Route) {
        self.send(NavigationRequest {
            route,
            origin: None,
        });
    }

    /// Ask the shell to show `route` on behalf of session `origin`.
    ///
    /// The shell ignores the request if `origin` is no longer open.
    pub fn request_from(&self, route: Route, origin: Uuid) {
        self.send(NavigationRequest {
            route,
            origin: Some(origin),
        });
    }

    fn send(&self, request: NavigationRequest) {
        let route = request.route;
        debug!(%route, origin = ?request.origin, "Navigation requested");
        if self.tx.send(request).is_err() {
            debug!(%route, "Navigation request dropped, shell is gone");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_carry_origin() {
        let (navigator, mut rx) = Navigator::channel();
        let origin = Uuid::new_v4();

        navigator.request(Route::Cart);
        navigator.request_from(Route::Home, origin);

        assert_eq!(rx.try_recv().unwrap().origin, None);
        assert_eq!(
            rx.try_recv().unwrap(),
            NavigationRequest {
                route: Route::Home,
                origin: Some(origin),
            }
        );
    }

    #[test]
    fn test_request_after_shell_dropped_is_ignored() {
        let (navigator, rx) = Navigator::channel();
        drop(rx);
        navigator.request(Route::Home);
    }
}
