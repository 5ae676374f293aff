//! Static shader stage descriptions for all rendering passes.
//!
//! Each `ShaderInfo` names the uniform blocks, texture samplers and `#define`s
//! that its GLSL source declares; binding points are assigned from these lists
//! when a program is created.

use crate::ShaderInfo;

pub static VS_CUBE: ShaderInfo = ShaderInfo {
    name: "vs_cube",
    code: include_str!("shaders/vs_cube.glsl"),
    defines: &[],
    uniform_blocks: &["Capture"],
    texture_units: &[],
};

pub static FS_EQUIRECT: ShaderInfo = ShaderInfo {
    name: "fs_equirect",
    code: include_str!("shaders/fs_equirect.glsl"),
    defines: &[],
    uniform_blocks: &[],
    texture_units: &["equirect_map"],
};

pub static FS_IRRADIANCE: ShaderInfo = ShaderInfo {
    name: "fs_irradiance",
    code: include_str!("shaders/fs_irradiance.glsl"),
    defines: &["SAMPLE_DELTA"],
    uniform_blocks: &[],
    texture_units: &["environment_map"],
};

pub static VS_SKYBOX: ShaderInfo = ShaderInfo {
    name: "vs_skybox",
    code: include_str!("shaders/vs_skybox.glsl"),
    defines: &[],
    uniform_blocks: &["Capture"],
    texture_units: &[],
};

pub static FS_SKYBOX: ShaderInfo = ShaderInfo {
    name: "fs_skybox",
    code: include_str!("shaders/fs_skybox.glsl"),
    defines: &[],
    uniform_blocks: &[],
    texture_units: &["environment_map"],
};

pub static VS_PBR: ShaderInfo = ShaderInfo {
    name: "vs_pbr",
    code: include_str!("shaders/vs_pbr.glsl"),
    defines: &[],
    uniform_blocks: &["Camera", "Instance"],
    texture_units: &[],
};

pub static FS_PBR: ShaderInfo = ShaderInfo {
    name: "fs_pbr",
    code: include_str!("shaders/fs_pbr.glsl"),
    defines: &["NR_LIGHTS"],
    uniform_blocks: &["Camera", "Material", "Lights"],
    texture_units: &["irradiance_map"],
};
