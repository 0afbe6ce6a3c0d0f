use log::Level;

use crate::boundary::EngineApi;
use crate::error::Result;
use crate::session::Horde;

/// Log target for messages raised inside the engine.
pub const ENGINE_TARGET: &str = "horde3d";

/// Maps an engine message level to a `log` level.
pub fn level_for(engine_level: u32) -> Level {
    match engine_level {
        1 => Level::Error,
        2 => Level::Warn,
        3 => Level::Info,
        _ => Level::Debug,
    }
}

/// Drains the engine message queue into `log` records.
///
/// Returns the number of messages forwarded.
pub fn forward_engine_messages<E: EngineApi>(horde: &mut Horde<E>) -> Result<usize> {
    let mut count = 0;
    while let Some(msg) = horde.get_message()? {
        log::log!(
            target: ENGINE_TARGET,
            level_for(msg.level),
            "[{:.3}] {}",
            msg.time,
            msg.text
        );
        count += 1;
    }
    Ok(count)
}
