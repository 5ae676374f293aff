use crate::engine::{AsAttachment, AsBindTarget, BindTarget};
use js_sys::Float32Array;
use std::marker::PhantomData;
use web_sys::{WebGl2RenderingContext as Context, WebGlTexture};

pub trait Boolean {
    const VALUE: bool;
}

pub struct True;
pub struct False;

impl Boolean for True {
    const VALUE: bool = true;
}

impl Boolean for False {
    const VALUE: bool = false;
}

/// Marker types for what a texture format may be attached to.
pub struct Color;
pub struct DepthStencil;

pub trait RenderTarget {}

impl RenderTarget for Color {}
impl RenderTarget for DepthStencil {}

pub trait TextureFormat {
    /// Associated GL sized internal format.
    const GL_INTERNAL_FORMAT: u32;
    /// Associated GL pixel transfer format.
    const GL_FORMAT: u32;
    /// Associated GL pixel component type.
    const GL_TYPE: u32;
    /// Whether this format supports linear filtering.
    type Filterable: Boolean;
    /// Framebuffer attachment class for this format.
    type Target: RenderTarget;
}

/// Four-channel 32-bit floating-point color format.
///
/// Linear filtering relies on `OES_texture_float_linear` which is checked once
/// at device creation, so the format is treated as filterable here.
#[derive(Debug)]
pub struct RGBA32F;

impl TextureFormat for RGBA32F {
    const GL_INTERNAL_FORMAT: u32 = Context::RGBA32F;
    const GL_FORMAT: u32 = Context::RGBA;
    const GL_TYPE: u32 = Context::FLOAT;
    type Filterable = True;
    type Target = Color;
}

/// Packed 24-bit depth, 8-bit stencil format.
#[derive(Debug)]
pub struct D24S8;

impl TextureFormat for D24S8 {
    const GL_INTERNAL_FORMAT: u32 = Context::DEPTH24_STENCIL8;
    const GL_FORMAT: u32 = Context::DEPTH_STENCIL;
    const GL_TYPE: u32 = Context::UNSIGNED_INT_24_8;
    type Filterable = False;
    type Target = DepthStencil;
}

#[derive(Debug)]
pub struct Texture<T: TextureFormat> {
    gl: Context,
    handle: Option<WebGlTexture>,
    width: i32,
    height: i32,
    phantom: PhantomData<T>,
}

impl<T: TextureFormat> Texture<T> {
    pub fn new(gl: Context) -> Self {
        Self {
            gl,
            handle: None,
            width: 0,
            height: 0,
            phantom: PhantomData,
        }
    }

    pub fn invalidate(&mut self) {
        self.handle = None;
        self.width = 0;
        self.height = 0;
    }

    pub fn reset(&mut self) {
        if let Some(handle) = &self.handle {
            self.gl.delete_texture(Some(handle));
        }

        self.invalidate();
    }

    pub fn cols(&self) -> i32 {
        self.width
    }

    pub fn rows(&self) -> i32 {
        self.height
    }

    pub fn is_allocated(&self) -> bool {
        self.handle.is_some()
    }

    /// Allocates immutable storage for this texture, discarding any contents.
    pub fn create(&mut self, width: usize, height: usize) {
        if self.width != width as i32 || self.height != height as i32 {
            self.reset();
        }

        if self.handle.is_none() {
            self.handle = self.gl.create_texture();
            self.width = width as i32;
            self.height = height as i32;

            self.gl.bind_texture(Context::TEXTURE_2D, self.handle.as_ref());

            self.gl.tex_storage_2d(
                Context::TEXTURE_2D,
                1,
                T::GL_INTERNAL_FORMAT,
                self.width,
                self.height,
            );

            let filter = if T::Filterable::VALUE {
                Context::LINEAR
            } else {
                Context::NEAREST
            };

            self.set_parameter(Context::TEXTURE_MAG_FILTER, filter as i32);
            self.set_parameter(Context::TEXTURE_MIN_FILTER, filter as i32);
            self.set_parameter(Context::TEXTURE_WRAP_S, Context::REPEAT as i32);
            self.set_parameter(Context::TEXTURE_WRAP_T, Context::CLAMP_TO_EDGE as i32);
        }
    }

    fn set_parameter(&self, parameter: u32, value: i32) {
        self.gl.tex_parameteri(Context::TEXTURE_2D, parameter, value);
    }
}

impl Texture<RGBA32F> {
    pub fn upload(&mut self, width: usize, height: usize, pixels: &[f32]) {
        assert_eq!(pixels.len(), 4 * width * height);

        self.create(width, height);

        self.gl.bind_texture(Context::TEXTURE_2D, self.handle.as_ref());

        self.gl
            .tex_sub_image_2d_with_i32_and_i32_and_u32_and_type_and_opt_array_buffer_view(
                Context::TEXTURE_2D,
                0,
                0,
                0,
                self.width,
                self.height,
                Context::RGBA,
                Context::FLOAT,
                Some(&Float32Array::from(pixels)),
            )
            .unwrap();
    }
}

impl<T: TextureFormat> AsBindTarget for Texture<T> {
    fn bind_target(&self) -> BindTarget {
        BindTarget::Texture(self.handle.as_ref())
    }
}

impl<T: TextureFormat> AsAttachment for Texture<T> {
    type Target = T::Target;

    fn as_attachment(&self) -> Option<&WebGlTexture> {
        self.handle.as_ref()
    }

    fn attachment_dimensions(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }
}
