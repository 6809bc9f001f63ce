use std::sync::Arc;
use std::time::Duration;

use userhub_users::UserStore;

use crate::context::ServiceClock;

/// Shared dependencies handed to every handler.
pub struct AppServices {
    users: Arc<dyn UserStore>,
    clock: ServiceClock,
}

impl AppServices {
    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    pub fn uptime(&self) -> Duration {
        self.clock.uptime()
    }
}

/// Wire the services around an injected user store.
pub fn build_services(users: Arc<dyn UserStore>) -> AppServices {
    AppServices {
        users,
        clock: ServiceClock::start(),
    }
}
