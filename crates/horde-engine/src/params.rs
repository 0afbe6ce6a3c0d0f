//! Enumerated tags passed to the engine.
//!
//! Discriminants are the engine's integer codes and must not be reordered.

use std::os::raw::c_int;

use bitflags::bitflags;

bitflags! {
    /// Flags for `add_resource`.
    #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
    pub struct ResourceFlags: u32 {
        /// Excluded from `query_unloaded_resource`.
        const NO_QUERY = 1;
        /// Texture is not compressed even when compression is enabled.
        const NO_COMPRESSION = 2;
    }
}

/// Declares a `#[repr(i32)]` tag enum with a raw-code accessor, and optionally
/// a decoder that falls back to an `Undefined` variant.
macro_rules! engine_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident = $code:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $name {
            $($variant = $code),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[inline]
            pub const fn raw(self) -> c_int {
                self as c_int
            }
        }
    };
    (
        $(#[$meta:meta])*
        pub enum $name:ident decodes { $($variant:ident = $code:literal),+ $(,)? }
    ) => {
        engine_enum! {
            $(#[$meta])*
            pub enum $name { $($variant = $code),+ }
        }

        impl $name {
            /// Decodes an engine code; unknown codes map to `Undefined`.
            pub fn from_raw(raw: c_int) -> Self {
                match raw {
                    $($code => Self::$variant,)+
                    _ => Self::Undefined,
                }
            }
        }
    };
}

engine_enum! {
    /// Global engine options for `option` / `set_option`.
    pub enum EngineOption {
        TrilinearFiltering = 0,
        AnisotropyFactor = 1,
        TexCompression = 2,
        LoadTextures = 3,
        FastAnimation = 4,
        OcclusionCulling = 5,
        ShadowMapSize = 6,
        DebugViewMode = 7,
    }
}

engine_enum! {
    pub enum ResourceType decodes {
        SceneGraph = 0,
        Geometry = 1,
        Animation = 2,
        Material = 3,
        Code = 4,
        Shader = 5,
        Texture2D = 6,
        TextureCube = 7,
        Effect = 8,
        Undefined = 9999,
    }
}

engine_enum! {
    /// Selector for `resource_data` / `update_resource_data`.
    pub enum ResourceData {
        AnimFrameCount = 0,
        Tex2DPixelData = 1,
    }
}

engine_enum! {
    pub enum SceneNodeType decodes {
        Group = 0,
        Model = 1,
        Mesh = 2,
        Joint = 3,
        Light = 4,
        Camera = 5,
        Emitter = 6,
        Undefined = 9999,
    }
}

engine_enum! {
    pub enum GroupParam {
        MinDist = 0,
        MaxDist = 1,
    }
}

engine_enum! {
    pub enum MeshParam {
        MaterialRes = 0,
    }
}

engine_enum! {
    pub enum LightParam {
        MaterialRes = 0,
        Radius = 1,
        Fov = 2,
        ColR = 3,
        ColG = 4,
        ColB = 5,
        ShadowMapCount = 6,
        ShadowSplitLambda = 7,
        ShadowMapBias = 8,
    }
}

engine_enum! {
    /// View frustum planes of a camera node.
    pub enum CameraParam {
        LeftPlane = 0,
        RightPlane = 1,
        BottomPlane = 2,
        TopPlane = 3,
        NearPlane = 4,
        FarPlane = 5,
    }
}

engine_enum! {
    pub enum EmitterParam {
        Delay = 0,
        EmissionRate = 1,
        SpreadAngle = 2,
        ForceX = 3,
        ForceY = 4,
        ForceZ = 5,
    }
}

impl ResourceType {
    /// Every concrete resource type, excluding `Undefined`.
    pub const CONCRETE: [Self; 9] = [
        Self::SceneGraph,
        Self::Geometry,
        Self::Animation,
        Self::Material,
        Self::Code,
        Self::Shader,
        Self::Texture2D,
        Self::TextureCube,
        Self::Effect,
    ];
}
