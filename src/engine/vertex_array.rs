#[allow(unused_imports)]
use log::{debug, info, warn};

use crate::engine::AsVertexArray;
use std::marker::PhantomData;
use web_sys::{WebGl2RenderingContext as Context, WebGlBuffer, WebGlVertexArrayObject};
use zerocopy::{AsBytes, FromBytes};

#[derive(Debug)]
pub struct VertexArray<T: ?Sized> {
    gl: Context,
    handle: Option<WebGlBuffer>,
    index_handle: Option<WebGlBuffer>,
    vao_handle: Option<WebGlVertexArrayObject>,
    size: usize,
    index_count: usize,
    phantom: PhantomData<T>,
}

impl<T: ?Sized> VertexArray<T> {
    pub fn new(gl: Context) -> Self {
        Self {
            gl,
            handle: None,
            index_handle: None,
            vao_handle: None,
            size: 0,
            index_count: 0,
            phantom: PhantomData,
        }
    }

    pub fn invalidate(&mut self) {
        self.handle = None;
        self.index_handle = None;
        self.vao_handle = None;
        self.size = 0;
        self.index_count = 0;
    }
}

impl<T: AsBytes + FromBytes + VertexLayout> VertexArray<[T]> {
    pub fn vertex_count(&self) -> usize {
        self.size / std::mem::size_of::<T>()
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    pub fn upload(&mut self, data: &[T]) {
        if data.len() != self.vertex_count() || !self.gl.is_buffer(self.handle.as_ref()) {
            self.create_and_allocate(data.len() * std::mem::size_of::<T>());
        }

        self.gl
            .bind_buffer(Context::ARRAY_BUFFER, self.handle.as_ref());

        self.gl
            .buffer_sub_data_with_i32_and_u8_array(Context::ARRAY_BUFFER, 0, data.as_bytes());
    }

    /// Uploads vertices together with a 16-bit triangle index list.
    pub fn upload_indexed(&mut self, data: &[T], indices: &[u16]) {
        self.upload(data);

        self.gl.bind_vertex_array(self.vao_handle.as_ref());

        if indices.len() != self.index_count || !self.gl.is_buffer(self.index_handle.as_ref()) {
            self.gl.delete_buffer(self.index_handle.as_ref());
            self.index_handle = self.gl.create_buffer();

            self.gl
                .bind_buffer(Context::ELEMENT_ARRAY_BUFFER, self.index_handle.as_ref());

            self.gl.buffer_data_with_i32(
                Context::ELEMENT_ARRAY_BUFFER,
                (2 * indices.len()) as i32,
                Context::STATIC_DRAW,
            );

            self.index_count = indices.len();
        } else {
            self.gl
                .bind_buffer(Context::ELEMENT_ARRAY_BUFFER, self.index_handle.as_ref());
        }

        self.gl.buffer_sub_data_with_i32_and_u8_array(
            Context::ELEMENT_ARRAY_BUFFER,
            0,
            indices.as_bytes(),
        );

        self.gl.bind_vertex_array(None);
    }

    fn create_and_allocate(&mut self, size: usize) {
        self.gl.delete_buffer(self.handle.as_ref());
        self.gl.delete_vertex_array(self.vao_handle.as_ref());

        self.handle = self.gl.create_buffer();
        self.vao_handle = self.gl.create_vertex_array();

        self.gl.bind_vertex_array(self.vao_handle.as_ref());

        self.gl
            .bind_buffer(Context::ARRAY_BUFFER, self.handle.as_ref());
        self.gl
            .buffer_data_with_i32(Context::ARRAY_BUFFER, size as i32, Context::STATIC_DRAW);

        let stride = std::mem::size_of::<T>() as i32;

        for attribute in T::vertex_layout() {
            let components = match attribute.kind {
                VertexAttributeKind::Float2 => 2,
                VertexAttributeKind::Float3 => 3,
            };

            self.gl.vertex_attrib_pointer_with_i32(
                attribute.index as u32,
                components,
                Context::FLOAT,
                false,
                stride,
                attribute.offset as i32,
            );

            self.gl.enable_vertex_attrib_array(attribute.index as u32);
        }

        // index buffer binding is part of VAO state, rebind on next upload
        self.gl.bind_vertex_array(None);

        self.size = size;
        self.index_count = 0;
    }
}

impl<T: ?Sized> Drop for VertexArray<T> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.handle.as_ref());
        self.gl.delete_buffer(self.index_handle.as_ref());
        self.gl.delete_vertex_array(self.vao_handle.as_ref());
    }
}

impl<T: ?Sized> AsVertexArray for VertexArray<T> {
    fn vertex_array(&self) -> Option<&WebGlVertexArrayObject> {
        self.vao_handle.as_ref()
    }
}

pub trait VertexLayout {
    fn vertex_layout() -> Vec<VertexAttribute>;
}

#[derive(Clone, Copy, Debug)]
pub enum VertexAttributeKind {
    Float2,
    Float3,
}

#[derive(Clone, Copy, Debug)]
pub struct VertexAttribute {
    pub index: usize,
    pub offset: usize,
    pub kind: VertexAttributeKind,
}
