#[allow(unused_imports)]
use log::{debug, info, warn};

use crate::{CubeFace, DepthStencil, RenderTarget};
use js_sys::Error;
use web_sys::{WebGl2RenderingContext as Context, WebGlFramebuffer, WebGlTexture};

pub trait AsAttachment {
    type Target: RenderTarget;

    fn as_attachment(&self) -> Option<&WebGlTexture>;

    fn attachment_dimensions(&self) -> (usize, usize);
}

/// A color target whose individual cube faces can be rendered into.
pub trait AsCubeAttachment {
    fn as_cube_attachment(&self) -> Option<&WebGlTexture>;

    fn cube_attachment_size(&self) -> usize;
}

#[derive(Debug)]
pub struct Framebuffer {
    gl: Context,
    handle: Option<WebGlFramebuffer>,
    cols: usize,
    rows: usize,
}

impl Framebuffer {
    pub fn new(gl: Context) -> Self {
        Self {
            gl,
            handle: None,
            cols: 0,
            rows: 0,
        }
    }

    pub fn handle(&self) -> Option<&WebGlFramebuffer> {
        self.handle.as_ref()
    }

    pub fn invalidate(&mut self) {
        self.handle = None;
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Retargets this framebuffer at one face of a cube map.
    ///
    /// The same framebuffer object is rebuilt for each face in turn, rather
    /// than keeping six framebuffers alive per cube map.
    pub fn rebuild_cube(
        &mut self,
        attachment: &dyn AsCubeAttachment,
        face: CubeFace,
        depth_stencil: Option<&dyn AsAttachment<Target = DepthStencil>>,
    ) -> Result<(), Error> {
        if let Err(_) | Ok(None) = self.gl.get_extension("EXT_color_buffer_float") {
            return Err(Error::new("extension `EXT_color_buffer_float' missing"));
        }

        let size = attachment.cube_attachment_size();

        if let Some(framebuffer_handle) = &self.handle {
            self.gl.delete_framebuffer(Some(framebuffer_handle));
        }

        self.handle = self.gl.create_framebuffer();

        self.gl
            .bind_framebuffer(Context::DRAW_FRAMEBUFFER, self.handle.as_ref());

        self.gl.framebuffer_texture_2d(
            Context::DRAW_FRAMEBUFFER,
            Context::COLOR_ATTACHMENT0,
            face.gl_target(),
            attachment.as_cube_attachment(),
            0,
        );

        if let Some(depth_stencil) = depth_stencil {
            let (cols, rows) = depth_stencil.attachment_dimensions();

            if (cols, rows) != (size, size) {
                panic!("inconsistent framebuffer attachment dimensions");
            }

            self.gl.framebuffer_texture_2d(
                Context::DRAW_FRAMEBUFFER,
                Context::DEPTH_STENCIL_ATTACHMENT,
                Context::TEXTURE_2D,
                depth_stencil.as_attachment(),
                0,
            );
        }

        let status = self.gl.check_framebuffer_status(Context::DRAW_FRAMEBUFFER);

        if status != Context::FRAMEBUFFER_COMPLETE && !self.gl.is_context_lost() {
            return Err(Error::new("framebuffer is incomplete"));
        }

        self.cols = size;
        self.rows = size;

        Ok(())
    }

    pub fn clear(&self, attachment: usize, color: [f32; 4]) {
        self.gl
            .bind_framebuffer(Context::DRAW_FRAMEBUFFER, self.handle.as_ref());

        self.gl
            .clear_bufferfv_with_f32_array(Context::COLOR, attachment as i32, &color);
    }

    pub fn clear_depth_stencil(&self, depth: f32, stencil: u8) {
        self.gl
            .bind_framebuffer(Context::DRAW_FRAMEBUFFER, self.handle.as_ref());

        self.gl
            .clear_bufferfi(Context::DEPTH_STENCIL, 0, depth, stencil as i32);
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        if let Some(framebuffer_handle) = &self.handle {
            self.gl.delete_framebuffer(Some(framebuffer_handle));
        }
    }
}
