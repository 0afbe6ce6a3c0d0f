use super::Horde;
use crate::boundary::EngineApi;
use crate::error::Result;
use crate::handle::{NodeHandle, ResourceHandle};
use crate::marshal;
use crate::math::Overlay;
use crate::params::EngineOption;

/// One entry of the engine message queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    /// 1 = error, 2 = warning, 3 = info, 4 = debug.
    pub level: u32,
    /// Seconds since engine start.
    pub time: f32,
}

impl<E: EngineApi> Horde<E> {
    /// Pops the oldest queued message, or `None` when the queue is empty.
    pub fn get_message(&mut self) -> Result<Option<Message>> {
        let engine = self.live("get_message")?;
        let mut level = 0;
        let mut time = 0.0;
        let ptr = engine.get_message(&mut level, &mut time);
        // SAFETY: valid until the next engine call; copied immediately.
        let text = unsafe { marshal::from_c_ptr(ptr) };
        if text.is_empty() {
            return Ok(None);
        }
        Ok(Some(Message { text, level, time }))
    }

    /// Pops every queued message.
    pub fn drain_messages(&mut self) -> Result<Vec<Message>> {
        let mut out = Vec::new();
        while let Some(msg) = self.get_message()? {
            out.push(msg);
        }
        Ok(out)
    }

    pub fn active_camera(&mut self) -> Result<NodeHandle> {
        let raw = self.live("active_camera")?.get_active_camera();
        Ok(NodeHandle::from_boundary(raw))
    }

    pub fn set_active_camera(&mut self, camera: NodeHandle) -> Result<bool> {
        let engine = self.live("set_active_camera")?;
        let camera = camera.to_boundary("camera")?;
        Ok(engine.set_active_camera(camera))
    }

    pub fn option(&mut self, option: EngineOption) -> Result<f32> {
        Ok(self.live("option")?.get_option(option.raw()))
    }

    pub fn set_option(&mut self, option: EngineOption, value: f32) -> Result<bool> {
        Ok(self.live("set_option")?.set_option(option.raw(), value))
    }

    /// Queues a screen overlay for the next frame.
    pub fn show_overlay(&mut self, overlay: &Overlay, layer: i32, material: ResourceHandle) -> Result<()> {
        let engine = self.live("show_overlay")?;
        let layer = marshal::to_uint("layer", layer)?;
        let material = material.to_boundary("material")?;
        engine.show_overlay(&overlay.to_floats(), layer, material);
        Ok(())
    }
}
