#![deny(unsafe_code)]

//! A WebGL2 viewer that lights a mesh with an image-based environment.
//!
//! The crate converts a decoded equirectangular HDR panorama into a float
//! cubemap, convolves that cubemap into a diffuse irradiance map, and then
//! renders a mesh with a Cook-Torrance BRDF plus the irradiance term, with
//! the environment itself drawn as the skybox.

#[allow(unused_imports)]
use log::{debug, info, warn};

macro_rules! export {
    [$( $module:ident ),* $(,)*] => {
        $(
            mod $module;
            pub use self::$module::*;
        )*
    };
}

export![device, engine, scene, shading, web];

/// GLSL shader sources.
pub mod shaders;
