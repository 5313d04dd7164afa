//! Session events raised by the request layer. The request layer only knows the
//! `SessionEvents` trait; what happens on 401/403 is decided by whoever is wired
//! behind it. `SessionEventHub` is the default wiring: handlers are registered once
//! by the app's root provider and cleared again when it unmounts.

use crate::session::Session;
use std::{cell::RefCell, rc::Rc};
use tracing::{debug, warn};

pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";
pub const FORBIDDEN_FALLBACK_MESSAGE: &str = "You don't have permission to perform this action.";

pub trait SessionEvents {
    /// A response carried 401.
    fn notify_unauthorized(&self);
    /// A response carried 403, with the server's message when it sent one.
    fn notify_forbidden(&self, message: Option<&str>);
}

impl SessionEvents for Session {
    /// Ends the session, tells the user, and replaces the route with login.
    /// Concurrent 401s after the first are ignored until a new token is stored.
    fn notify_unauthorized(&self) {
        if self.is_ended() {
            debug!("Session already ended; ignoring repeated 401");
            return;
        }
        warn!("Received 401, ending session");
        self.end();
        self.notifier().error(SESSION_EXPIRED_MESSAGE);
        self.go_to_login();
    }

    fn notify_forbidden(&self, message: Option<&str>) {
        let message = message
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(FORBIDDEN_FALLBACK_MESSAGE);
        debug!("Received 403");
        self.notifier().error(message);
    }
}

type UnauthorizedHandler = Rc<dyn Fn()>;
type ForbiddenHandler = Rc<dyn Fn(Option<&str>)>;

#[derive(Default)]
pub struct SessionEventHub {
    unauthorized: RefCell<Option<UnauthorizedHandler>>,
    forbidden: RefCell<Option<ForbiddenHandler>>,
}

impl SessionEventHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_unauthorized_handler(&self, handler: impl Fn() + 'static) {
        *self.unauthorized.borrow_mut() = Some(Rc::new(handler));
    }

    pub fn register_forbidden_handler(&self, handler: impl Fn(Option<&str>) + 'static) {
        *self.forbidden.borrow_mut() = Some(Rc::new(handler));
    }

    /// Routes both events to `session`.
    pub fn register_session(&self, session: &Rc<Session>) {
        let on_unauthorized = Rc::clone(session);
        self.register_unauthorized_handler(move || on_unauthorized.notify_unauthorized());
        let on_forbidden = Rc::clone(session);
        self.register_forbidden_handler(move |message| on_forbidden.notify_forbidden(message));
    }

    pub fn clear_handlers(&self) {
        *self.unauthorized.borrow_mut() = None;
        *self.forbidden.borrow_mut() = None;
    }
}

impl SessionEvents for SessionEventHub {
    fn notify_unauthorized(&self) {
        // Clone out before calling so a handler may re-register or clear.
        let handler = self.unauthorized.borrow().clone();
        match handler {
            Some(handler) => handler(),
            None => debug!("401 received with no unauthorized handler registered"),
        }
    }

    fn notify_forbidden(&self, message: Option<&str>) {
        let handler = self.forbidden.borrow().clone();
        match handler {
            Some(handler) => handler(message),
            None => debug!("403 received with no forbidden handler registered"),
        }
    }
}
