//! WebGPU render pipeline
//!
//! Batches every rectangle of a frame into one triangle list. Text is not
//! rasterised here; it is queued for the host to overlay (the browser build
//! writes it into DOM elements above the canvas).

use wgpu::util::DeviceExt;

use super::RenderDriver;
use super::shapes;
use super::vertex::{Color, Vertex, colors};
use crate::sim::Rect;

/// A text draw queued for the host
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Color,
}

impl TextItem {
    /// CSS `rgba()` for the item's color
    fn css_color(&self) -> String {
        let [r, g, b, a] = self.color;
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("rgba({}, {}, {}, {})", channel(r), channel(g), channel(b), a)
    }
}

/// Overlay markup for a frame's queued text.
///
/// One absolutely positioned span per item, in field pixels. `y` is the
/// baseline, so the span's top sits one font size above it.
pub fn hud_html(texts: &[TextItem]) -> String {
    let mut html = String::new();
    for item in texts {
        html.push_str(&format!(
            "<span style=\"position:absolute;left:{}px;top:{}px;font:{}px sans-serif;color:{};white-space:pre\">",
            item.x,
            item.y - item.size,
            item.size,
            item.css_color()
        ));
        for ch in item.text.chars() {
            match ch {
                '&' => html.push_str("&amp;"),
                '<' => html.push_str("&lt;"),
                '>' => html.push_str("&gt;"),
                '"' => html.push_str("&quot;"),
                _ => html.push(ch),
            }
        }
        html.push_str("</span>");
    }
    html
}

/// GPU-backed render driver
pub struct GpuRenderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// Field size for coordinate mapping
    field: (f32, f32),
    vertices: Vec<Vertex>,
    texts: Vec<TextItem>,
}

impl GpuRenderer {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("block-breaker-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("rect_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("rect_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // Placeholder; replaced by every present()
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vertex_buffer"),
            contents: bytemuck::cast_slice(&[Vertex::new(0.0, 0.0, [0.0; 4])]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_count: 0,
            size: (width, height),
            field: (crate::consts::FIELD_WIDTH, crate::consts::FIELD_HEIGHT),
            vertices: Vec::new(),
            texts: Vec::new(),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Text queued since the last `clear`
    pub fn texts(&self) -> &[TextItem] {
        &self.texts
    }

    /// Upload the batched rectangles and draw them
    pub fn present(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.vertex_count = self.vertices.len() as u32;
        if self.vertex_count > 0 {
            self.vertex_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("vertex_buffer"),
                    contents: bytemuck::cast_slice(&self.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let [r, g, b, a] = colors::BACKGROUND;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if self.vertex_count > 0 {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.draw(0..self.vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl RenderDriver for GpuRenderer {
    fn clear(&mut self, field: Rect) {
        self.field = (field.size.x, field.size.y);
        self.vertices.clear();
        self.texts.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (field, size) = (self.field, self.size);
        self.vertices
            .extend(shapes::rect(&rect, color).into_iter().map(|v| {
                let (x, y) = shapes::field_to_ndc(v.position[0], v.position[1], field, size);
                Vertex::new(x, y, v.color)
            }));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.texts.push(TextItem {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{GAME_OVER_TEXT, HUD_FONT_SIZE};

    fn item(text: &str, x: f32, y: f32) -> TextItem {
        TextItem {
            text: text.to_string(),
            x,
            y,
            size: HUD_FONT_SIZE,
            color: colors::TEXT,
        }
    }

    #[test]
    fn test_hud_html_positions_each_item() {
        let html = hud_html(&[item("0", 10.0, 25.0), item("Level 1", 410.0, 25.0)]);

        assert_eq!(html.matches("<span").count(), 2);
        assert!(html.contains("left:10px;top:5px;font:20px sans-serif"));
        assert!(html.contains("left:410px;top:5px;"));
        assert!(html.contains("color:rgba(135, 206, 235, 1)"));
        assert!(html.contains(">Level 1</span>"));
    }

    #[test]
    fn test_hud_html_escapes_text() {
        let html = hud_html(&[item("<b>&\"x\"", 0.0, 20.0)]);
        assert!(html.contains(">&lt;b&gt;&amp;&quot;x&quot;</span>"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_hud_html_empty_and_game_over() {
        assert_eq!(hud_html(&[]), "");
        let html = hud_html(&[item(GAME_OVER_TEXT, 80.0, 400.0)]);
        assert!(html.contains(">Game Over: Press 'Space' to Restart</span>"));
    }
}
