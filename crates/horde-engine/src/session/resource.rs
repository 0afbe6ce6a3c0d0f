use std::ffi::c_void;
use std::ptr::NonNull;

use super::Horde;
use crate::boundary::EngineApi;
use crate::error::Result;
use crate::handle::ResourceHandle;
use crate::marshal::{self, TransferBuffer};
use crate::params::{ResourceData, ResourceFlags, ResourceType};

impl<E: EngineApi> Horde<E> {
    pub fn resource_type(&mut self, res: ResourceHandle) -> Result<ResourceType> {
        let engine = self.live("resource_type")?;
        let res = res.to_boundary("res")?;
        Ok(ResourceType::from_raw(engine.get_resource_type(res)))
    }

    /// Looks up a resource by type and name. `NONE` when absent.
    pub fn find_resource(&mut self, ty: ResourceType, name: &str) -> Result<ResourceHandle> {
        let engine = self.live("find_resource")?;
        let name = marshal::to_c_string("name", name)?;
        Ok(ResourceHandle::from_boundary(engine.find_resource(ty.raw(), &name)))
    }

    /// Adds an unloaded resource, or returns `NONE` if one with the same
    /// type and name already exists.
    pub fn add_resource(&mut self, ty: ResourceType, name: &str, flags: ResourceFlags) -> Result<ResourceHandle> {
        let engine = self.live("add_resource")?;
        let name = marshal::to_c_string("name", name)?;
        Ok(ResourceHandle::from_boundary(engine.add_resource(ty.raw(), &name, flags.bits())))
    }

    /// Drops the caller's reference; the engine frees the resource once
    /// nothing else uses it.
    pub fn remove_resource(&mut self, res: ResourceHandle) -> Result<bool> {
        let engine = self.live("remove_resource")?;
        let res = res.to_boundary("res")?;
        Ok(engine.remove_resource(res))
    }

    /// Loads the first `size` bytes of `data` into the resource called `name`.
    pub fn load_resource(&mut self, name: &str, data: &[u8], size: i32) -> Result<bool> {
        let engine = self.live("load_resource")?;
        let name = marshal::to_c_string("name", name)?;
        let buffer = TransferBuffer::new("data", data, size)?;
        Ok(engine.load_resource(&name, buffer.as_bytes(), buffer.payload_len()))
    }

    /// [`load_resource`](Self::load_resource) with the whole of `data`.
    pub fn load_resource_bytes(&mut self, name: &str, data: &[u8]) -> Result<bool> {
        let engine = self.live("load_resource")?;
        let name = marshal::to_c_string("name", name)?;
        let buffer = TransferBuffer::from_slice(data);
        Ok(engine.load_resource(&name, buffer.as_bytes(), buffer.payload_len()))
    }

    pub fn unload_resource(&mut self, res: ResourceHandle) -> Result<bool> {
        let engine = self.live("unload_resource")?;
        let res = res.to_boundary("res")?;
        Ok(engine.unload_resource(res))
    }

    /// Engine-owned pointer to resource data.
    ///
    /// Valid only until the next engine call; the layout depends on `param`.
    pub fn resource_data(&mut self, res: ResourceHandle, param: ResourceData) -> Result<Option<NonNull<c_void>>> {
        let engine = self.live("resource_data")?;
        let res = res.to_boundary("res")?;
        Ok(NonNull::new(engine.get_resource_data(res, param.raw()).cast_mut()))
    }

    /// Replaces resource data with the first `size` bytes of `data`.
    ///
    /// Not safe while the engine renders on another thread.
    pub fn update_resource_data(
        &mut self,
        res: ResourceHandle,
        param: ResourceData,
        data: &[u8],
        size: i32,
    ) -> Result<bool> {
        let engine = self.live("update_resource_data")?;
        let res = res.to_boundary("res")?;
        let buffer = TransferBuffer::new("data", data, size)?;
        Ok(engine.update_resource_data(res, param.raw(), buffer.as_bytes(), buffer.payload_len()))
    }

    /// Name of a resource still waiting to be loaded.
    pub fn query_unloaded_resource(&mut self) -> Result<Option<String>> {
        let ptr = self.live("query_unloaded_resource")?.query_unloaded_resource();
        // SAFETY: engine string, copied before the next call.
        let name = unsafe { marshal::from_c_ptr(ptr) };
        Ok((!name.is_empty()).then_some(name))
    }

    pub fn resource_path(&mut self, ty: ResourceType) -> Result<String> {
        let ptr = self.live("resource_path")?.get_resource_path(ty.raw());
        // SAFETY: engine string, copied before the next call.
        Ok(unsafe { marshal::from_c_ptr(ptr) })
    }

    /// Sets the search path for `ty`. No separator is appended.
    pub fn set_resource_path(&mut self, ty: ResourceType, path: &str) -> Result<()> {
        let engine = self.live("set_resource_path")?;
        let path = marshal::to_c_string("path", path)?;
        engine.set_resource_path(ty.raw(), &path);
        Ok(())
    }

    pub fn release_unused_resources(&mut self) -> Result<()> {
        self.live("release_unused_resources")?.release_unused_resources();
        Ok(())
    }

    pub fn set_material_uniform(
        &mut self,
        material: ResourceHandle,
        name: &str,
        a: f32,
        b: f32,
        c: f32,
        d: f32,
    ) -> Result<bool> {
        let engine = self.live("set_material_uniform")?;
        let material = material.to_boundary("material")?;
        let name = marshal::to_c_string("name", name)?;
        Ok(engine.set_material_uniform(material, &name, a, b, c, d))
    }
}
