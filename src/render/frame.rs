use anyhow::Result;
use wgpu::util::DeviceExt;

use super::canvas::MeshCanvas;
use super::gpu::GpuContext;
use super::pipeline::{ScenePipeline, Vertex, DEPTH_FORMAT};

/// Plain (non-sRGB) RGBA so colors land in the frame byte-for-byte.
pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

pub struct FrameRenderer {
    render_texture: wgpu::Texture,
    render_texture_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    output_buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    padded_bytes_per_row: u32,
    unpadded_bytes_per_row: u32,
}

impl FrameRenderer {
    pub fn new(gpu: &GpuContext, width: u32, height: u32) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let render_texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("render_target"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let render_texture_view = render_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let depth_texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_target"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let unpadded_bytes_per_row = width * 4;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

        let output_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("output_buffer"),
            size: (padded_bytes_per_row * height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        Self {
            render_texture,
            render_texture_view,
            depth_view,
            output_buffer,
            width,
            height,
            padded_bytes_per_row,
            unpadded_bytes_per_row,
        }
    }

    /// Rasterize the canvas' geometry and return tightly packed RGBA rows.
    pub fn render(
        &self,
        gpu: &GpuContext,
        pipeline: &ScenePipeline,
        canvas: &MeshCanvas,
    ) -> Result<Vec<u8>> {
        let triangles = vertex_buffer(gpu, "triangle_vertices", canvas.triangles());
        let lines = vertex_buffer(gpu, "line_vertices", canvas.lines());

        let clear = canvas.clear_color().to_rgba(255.0);
        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.render_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear[0] as f64,
                            g: clear[1] as f64,
                            b: clear[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &pipeline.bind_group, &[]);

            if let Some(ref buffer) = triangles {
                render_pass.set_pipeline(&pipeline.triangles);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..canvas.triangles().len() as u32, 0..1);
            }
            if let Some(ref buffer) = lines {
                render_pass.set_pipeline(&pipeline.lines);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..canvas.lines().len() as u32, 0..1);
            }
        }

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.render_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(self.padded_bytes_per_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );

        gpu.queue.submit(std::iter::once(encoder.finish()));

        self.read_back(gpu)
    }

    fn read_back(&self, gpu: &GpuContext) -> Result<Vec<u8>> {
        let buffer_slice = self.output_buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        gpu.device.poll(wgpu::Maintain::Wait);
        receiver.recv()??;

        let data = buffer_slice.get_mapped_range();
        let pixels = strip_row_padding(
            &data,
            self.height,
            self.padded_bytes_per_row,
            self.unpadded_bytes_per_row,
        );
        drop(data);
        self.output_buffer.unmap();

        Ok(pixels)
    }
}

fn vertex_buffer(gpu: &GpuContext, label: &str, vertices: &[Vertex]) -> Option<wgpu::Buffer> {
    if vertices.is_empty() {
        return None;
    }
    Some(gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    }))
}

fn strip_row_padding(data: &[u8], height: u32, padded: u32, unpadded: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((unpadded * height) as usize);
    for row in data.chunks(padded as usize).take(height as usize) {
        pixels.extend_from_slice(&row[..unpadded as usize]);
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_alignment_padding() {
        // 2 rows of 3 real bytes padded to 4
        let data = [1, 2, 3, 0, 4, 5, 6, 0];
        assert_eq!(strip_row_padding(&data, 2, 4, 3), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn unpadded_rows_pass_through() {
        let data = [9u8; 12];
        assert_eq!(strip_row_padding(&data, 3, 4, 4).len(), 12);
    }
}
