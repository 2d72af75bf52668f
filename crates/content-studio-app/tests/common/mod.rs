//! Shared fixtures for app integration tests.

use std::sync::Arc;

use content_studio_api::ApiClient;
use content_studio_api::test_utils::ScriptedTransport;
use content_studio_app::ContentStudio;
use content_studio_auth::{MemorySessionStore, Session, SessionStore};
use content_studio_core::RequestField;
use content_studio_ui::DashboardScreen;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Client wired to a scripted transport and an in-memory session.
pub struct Harness {
    pub studio: ContentStudio,
    pub transport: Arc<ScriptedTransport>,
    pub session: Arc<MemorySessionStore>,
}

/// Creates a signed-out harness.
#[allow(dead_code)]
pub fn harness() -> Harness {
    let transport = Arc::new(ScriptedTransport::new());
    let session = Arc::new(MemorySessionStore::new());
    let api = ApiClient::new("http://localhost:8000", transport.clone())
        .expect("fixture base URL should be valid");
    let studio = ContentStudio::new(api, session.clone());

    Harness {
        studio,
        transport,
        session,
    }
}

/// Creates a harness holding session `T` / `A`.
#[allow(dead_code)]
pub fn signed_in_harness() -> Harness {
    let harness = harness();
    harness
        .session
        .set_session(&Session::new("T", "A"))
        .expect("fixture session should store");
    harness
}

/// Dashboard with both required fields filled.
#[allow(dead_code)]
pub fn filled_dashboard() -> DashboardScreen<StdRng> {
    let mut screen = DashboardScreen::new(StdRng::seed_from_u64(11));
    screen.set_field(RequestField::BrandName, "Acme Coffee");
    screen.set_field(RequestField::Topic, "Autumn menu");
    screen
}
