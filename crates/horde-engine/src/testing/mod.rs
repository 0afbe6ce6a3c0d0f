//! Test doubles for the native boundary.

mod mock;

pub(crate) use mock::{MockEngine, MockUtils};

use crate::session::Horde;

pub(crate) const MOCK_VERSION: &str = crate::session::ENGINE_VERSION;

/// A session over a fresh mock, initialized and with its call log emptied.
pub(crate) fn ready_session() -> Horde<MockEngine> {
    ready_with(MockEngine::default())
}

pub(crate) fn ready_with(engine: MockEngine) -> Horde<MockEngine> {
    let mut horde = Horde::new(engine);
    assert_eq!(horde.init(), Ok(true));
    horde.engine_mut().calls.clear();
    horde
}
