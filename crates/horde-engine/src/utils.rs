//! Wrapper over the engine's utility library.

use std::ptr;

use crate::boundary::UtilsApi;
use crate::error::{Error, Result};
use crate::handle::{NodeHandle, ResourceHandle};
use crate::marshal;

/// Utility library session: GL context helpers, bulk loading, text overlay,
/// image encoding and picking.
pub struct Utils<U: UtilsApi> {
    utils: U,
}

impl<U: UtilsApi> Utils<U> {
    pub fn new(utils: U) -> Self {
        Self { utils }
    }

    pub fn inner(&self) -> &U {
        &self.utils
    }

    /// Creates an OpenGL context on the given device context.
    pub fn init_opengl(&mut self, device_context: i32) -> bool {
        let ok = self.utils.init_opengl(device_context);
        log::debug!("OpenGL context init: {ok}");
        ok
    }

    pub fn release_opengl(&mut self) {
        self.utils.release_opengl();
    }

    pub fn swap_buffers(&mut self) {
        self.utils.swap_buffers();
    }

    /// Loads every unloaded resource from `content_dir`.
    ///
    /// `false` if any resource failed to load.
    pub fn load_resources_from_disk(&mut self, content_dir: &str) -> Result<bool> {
        let dir = marshal::to_c_string("content_dir", content_dir)?;
        Ok(self.utils.load_resources_from_disk(&dir))
    }

    /// Writes queued engine messages to the utility library's log file.
    pub fn dump_messages(&mut self) -> bool {
        self.utils.dump_messages()
    }

    /// Queues `text` as an overlay; `x`/`y` are normalized screen coordinates.
    pub fn show_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        layer: i32,
        font: ResourceHandle,
    ) -> Result<()> {
        let text = marshal::to_c_string("text", text)?;
        let layer = marshal::to_uint("layer", layer)?;
        let font = font.to_boundary("font")?;
        self.utils.show_text(&text, x, y, size, layer, font);
        Ok(())
    }

    /// Encodes raw pixels as a TGA image.
    ///
    /// `pixels` must hold at least `width * height * bpp / 8` bytes.
    pub fn create_tga_image(&mut self, pixels: &[u8], width: i32, height: i32, bpp: i32) -> Result<Option<Vec<u8>>> {
        let width = marshal::to_uint("width", width)?;
        let height = marshal::to_uint("height", height)?;
        let bpp = marshal::to_uint("bpp", bpp)?;

        // Saturates so an unrepresentable size can never be satisfied.
        let needed = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(bpp as usize / 8))
            .unwrap_or(usize::MAX);
        if pixels.len() < needed {
            log::trace!("rejected `pixels`: {} bytes < {needed}", pixels.len());
            return Err(Error::PayloadTooShort { param: "pixels", size: needed, len: pixels.len() });
        }

        let mut data = ptr::null();
        let mut size = 0;
        if !self.utils.create_tga_image(pixels, width, height, bpp, &mut data, &mut size) {
            return Ok(None);
        }
        // SAFETY: on success `data` points at `size` engine-allocated bytes.
        // The allocation is not released here; see `free_mem`.
        Ok(Some(unsafe { marshal::copy_borrowed(data, size) }))
    }

    /// Visible node at normalized window coordinates (origin bottom-left),
    /// or `NONE`. Only meshes are pickable.
    pub fn pick_node(&mut self, nwx: f32, nwy: f32) -> NodeHandle {
        NodeHandle::from_boundary(self.utils.pick_node(nwx, nwy))
    }

    /// Releasing memory allocated by the utility library is not supported.
    pub fn free_mem(&mut self) -> Result<()> {
        Err(Error::Unsupported("free_mem"))
    }
}
