use crate::engine::{AsBindTarget, AsCubeAttachment, BindTarget, Boolean, TextureFormat};
use std::marker::PhantomData;
use web_sys::{WebGl2RenderingContext as Context, WebGlTexture};

/// One of the six faces of a cube map, in GL layer order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn gl_target(self) -> u32 {
        Context::TEXTURE_CUBE_MAP_POSITIVE_X + self as u32
    }
}

#[derive(Debug)]
pub struct CubeMap<T: TextureFormat> {
    gl: Context,
    handle: Option<WebGlTexture>,
    size: i32,
    phantom: PhantomData<T>,
}

impl<T: TextureFormat> CubeMap<T> {
    pub fn new(gl: Context) -> Self {
        Self {
            gl,
            handle: None,
            size: 0,
            phantom: PhantomData,
        }
    }

    pub fn invalidate(&mut self) {
        self.handle = None;
        self.size = 0;
    }

    pub fn reset(&mut self) {
        if let Some(handle) = &self.handle {
            self.gl.delete_texture(Some(handle));
        }

        self.invalidate();
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn is_allocated(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<&WebGlTexture> {
        self.handle.as_ref()
    }

    /// Allocates storage for all six square faces at the given edge size.
    pub fn create(&mut self, size: usize) {
        if self.size != size as i32 {
            self.reset();
        }

        if self.handle.is_none() {
            self.handle = self.gl.create_texture();
            self.size = size as i32;

            self.gl
                .bind_texture(Context::TEXTURE_CUBE_MAP, self.handle.as_ref());

            self.gl.tex_storage_2d(
                Context::TEXTURE_CUBE_MAP,
                1,
                T::GL_INTERNAL_FORMAT,
                self.size,
                self.size,
            );

            let filter = if T::Filterable::VALUE {
                Context::LINEAR
            } else {
                Context::NEAREST
            };

            self.set_parameter(Context::TEXTURE_MAG_FILTER, filter as i32);
            self.set_parameter(Context::TEXTURE_MIN_FILTER, filter as i32);
            self.set_parameter(Context::TEXTURE_WRAP_S, Context::CLAMP_TO_EDGE as i32);
            self.set_parameter(Context::TEXTURE_WRAP_T, Context::CLAMP_TO_EDGE as i32);
            self.set_parameter(Context::TEXTURE_WRAP_R, Context::CLAMP_TO_EDGE as i32);
        }
    }

    fn set_parameter(&self, parameter: u32, value: i32) {
        self.gl
            .tex_parameteri(Context::TEXTURE_CUBE_MAP, parameter, value);
    }
}

impl<T: TextureFormat> AsBindTarget for CubeMap<T> {
    fn bind_target(&self) -> BindTarget {
        BindTarget::CubeMap(self.handle.as_ref())
    }
}

impl<T: TextureFormat> AsCubeAttachment for CubeMap<T> {
    fn as_cube_attachment(&self) -> Option<&WebGlTexture> {
        self.handle.as_ref()
    }

    fn cube_attachment_size(&self) -> usize {
        self.size as usize
    }
}
