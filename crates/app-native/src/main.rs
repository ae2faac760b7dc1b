use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wgpu::util::DeviceExt;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use app_core::constants::{
    DEFAULT_MIN_DISTANCE, EMULATED_DISTANCE_MAX, EMULATED_DISTANCE_MIN, EMULATED_DISTANCE_STEP,
    OVERLAY_TEXT_SCALE, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use app_core::{
    handle_presses, overlay, Button, ButtonSet, InputHub, InputSnapshot, InputSource, LoopControl,
    TrackerReading, ViewState, Viewport,
};
use glam::Vec2;

// The image seen through the "window" and the overlay font, baked into the
// binary (no asset pipeline).
static VIEW_PNG: &[u8] = include_bytes!("../assets/view.png");
static OVERLAY_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

// Overlay glyphs rasterize at a fixed 8 px cell times the overlay scale.
const GLYPH_PX: f32 = 8.0 * OVERLAY_TEXT_SCALE;
const ATLAS_SIZE: u32 = 256;
// One background quad plus the worst-case overlay text comfortably fits.
const MAX_SPRITES: usize = 2048;

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    screen_size: [f32; 2],
    _pad: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SpriteInstance {
    rect_pos: [f32; 2],
    rect_size: [f32; 2],
    uv_pos: [f32; 2],
    uv_size: [f32; 2],
    color: [f32; 4],
    textured: f32,
    _pad: [f32; 3],
}

#[derive(Clone, Copy)]
struct GlyphInfo {
    uv_pos: [f32; 2],
    uv_size: [f32; 2],
    size: Vec2,
    // pen-relative offset of the bitmap's top-left; y is relative to the
    // baseline, negative upward
    offset: Vec2,
    advance: f32,
}

struct GlyphAtlas {
    glyphs: HashMap<char, GlyphInfo>,
    ascent: f32,
}

impl GlyphAtlas {
    /// Rasterize printable ASCII into a single RGBA atlas (white texels,
    /// coverage in alpha). Returns the atlas and its pixel data.
    fn build() -> anyhow::Result<(Self, Vec<u8>)> {
        let font = fontdue::Font::from_bytes(OVERLAY_FONT, fontdue::FontSettings::default())
            .map_err(|e| anyhow::anyhow!("overlay font: {e}"))?;

        let mut pixels = vec![0u8; (ATLAS_SIZE * ATLAS_SIZE * 4) as usize];
        let mut glyphs = HashMap::new();
        let mut pen_x = 1u32;
        let mut pen_y = 1u32;
        let mut row_height = 0u32;

        for ch in (0x20u8..0x7f).map(char::from) {
            let (metrics, coverage) = font.rasterize(ch, GLYPH_PX);
            let w = metrics.width as u32;
            let h = metrics.height as u32;
            if pen_x + w + 1 > ATLAS_SIZE {
                pen_x = 1;
                pen_y += row_height + 1;
                row_height = 0;
            }
            if pen_y + h + 1 > ATLAS_SIZE {
                anyhow::bail!("glyph atlas overflow at {:?}", ch);
            }
            for y in 0..h {
                for x in 0..w {
                    let a = coverage[(y * w + x) as usize];
                    let o = (((pen_y + y) * ATLAS_SIZE + pen_x + x) * 4) as usize;
                    pixels[o..o + 4].copy_from_slice(&[0xff, 0xff, 0xff, a]);
                }
            }
            glyphs.insert(
                ch,
                GlyphInfo {
                    uv_pos: [
                        pen_x as f32 / ATLAS_SIZE as f32,
                        pen_y as f32 / ATLAS_SIZE as f32,
                    ],
                    uv_size: [w as f32 / ATLAS_SIZE as f32, h as f32 / ATLAS_SIZE as f32],
                    size: Vec2::new(w as f32, h as f32),
                    offset: Vec2::new(
                        metrics.xmin as f32,
                        -(metrics.height as f32 + metrics.ymin as f32),
                    ),
                    advance: metrics.advance_width,
                },
            );
            pen_x += w + 1;
            row_height = row_height.max(h);
        }

        let ascent = font
            .horizontal_line_metrics(GLYPH_PX)
            .map(|m| m.ascent)
            .unwrap_or(GLYPH_PX);

        Ok((Self { glyphs, ascent }, pixels))
    }
}

/// Append quads for one line of overlay text. `pos` is the top-left of the
/// line box.
fn push_text(
    instances: &mut Vec<SpriteInstance>,
    atlas: &GlyphAtlas,
    pos: Vec2,
    text: &str,
    color: [f32; 4],
) {
    let mut pen_x = pos.x;
    let baseline_y = pos.y + atlas.ascent;
    for ch in text.chars() {
        let Some(glyph) = atlas.glyphs.get(&ch) else {
            continue;
        };
        if glyph.size.x > 0.0 && glyph.size.y > 0.0 {
            instances.push(SpriteInstance {
                rect_pos: [pen_x + glyph.offset.x, baseline_y + glyph.offset.y],
                rect_size: glyph.size.to_array(),
                uv_pos: glyph.uv_pos,
                uv_size: glyph.uv_size,
                color,
                textured: 1.0,
                _pad: [0.0; 3],
            });
        }
        pen_x += glyph.advance;
    }
}

fn create_rgba_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    width: u32,
    height: u32,
    pixels: &[u8],
    label: &str,
) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    image_bind_group: wgpu::BindGroup,
    atlas_bind_group: wgpu::BindGroup,
    atlas: GlyphAtlas,
    image_size: Vec2,
    instances: Vec<SpriteInstance>,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sprite shader"),
            source: wgpu::ShaderSource::Wgsl(app_core::SPRITE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(
            &uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                screen_size: [size.width as f32, size.height as f32],
                _pad: [0.0; 2],
            }),
        );

        // Unit quad as two triangles
        let quad_vertices: [f32; 12] = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<SpriteInstance>() * MAX_SPRITES) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprite_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let background = image::load_from_memory(VIEW_PNG)?.to_rgba8();
        let (img_w, img_h) = background.dimensions();
        let image_view = create_rgba_texture(
            &device,
            &queue,
            img_w,
            img_h,
            background.as_raw(),
            "view image",
        );
        let image_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("image_bg"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&image_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let (atlas, atlas_pixels) = GlyphAtlas::build()?;
        let atlas_view = create_rgba_texture(
            &device,
            &queue,
            ATLAS_SIZE,
            ATLAS_SIZE,
            &atlas_pixels,
            "glyph atlas",
        );
        let atlas_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("atlas_bg"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprite_pl"),
            bind_group_layouts: &[&globals_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [
            // slot 0: unit quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: sprite instances
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<SpriteInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 8,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 16,
                        shader_location: 3,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 24,
                        shader_location: 4,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 32,
                        shader_location: 5,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 48,
                        shader_location: 6,
                    },
                ],
            },
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sprite pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            quad_vb,
            instance_vb,
            globals_bind_group,
            image_bind_group,
            atlas_bind_group,
            atlas,
            image_size: Vec2::new(img_w as f32, img_h as f32),
            instances: Vec::with_capacity(MAX_SPRITES),
        })
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.config.width as f32, self.config.height as f32)
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                screen_size: [new_size.width as f32, new_size.height as f32],
                _pad: [0.0; 2],
            }),
        );
    }

    fn render(&mut self, state: &ViewState) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Background quad, center-anchored
        self.instances.clear();
        let placement = state.transform.placement(self.image_size);
        let dest_size = self.image_size * placement.scale;
        let top_left = placement.center - dest_size * 0.5;
        self.instances.push(SpriteInstance {
            rect_pos: top_left.to_array(),
            rect_size: dest_size.to_array(),
            uv_pos: [0.0, 0.0],
            uv_size: [1.0, 1.0],
            color: WHITE,
            textured: 1.0,
            _pad: [0.0; 3],
        });

        if state.debug_overlay {
            let overlay = overlay::build(&state.last_reading, &state.transform, &state.settings);
            for line in &overlay.lines {
                push_text(&mut self.instances, &self.atlas, line.pos, &line.text, WHITE);
            }
            self.instances.push(SpriteInstance {
                rect_pos: overlay.marker.pos.to_array(),
                rect_size: overlay.marker.size.to_array(),
                uv_pos: [0.0, 0.0],
                uv_size: [0.0, 0.0],
                color: WHITE,
                textured: 0.0,
                _pad: [0.0; 3],
            });
        }
        if self.instances.len() > MAX_SPRITES {
            log::warn!(
                "sprite budget exceeded ({}); truncating",
                self.instances.len()
            );
            self.instances.truncate(MAX_SPRITES);
        }
        let sprite_count = self.instances.len() as u32;
        self.queue
            .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(&self.instances));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.04,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.set_bind_group(1, &self.image_bind_group, &[]);
            rpass.draw(0..6, 0..1);
            if sprite_count > 1 {
                rpass.set_bind_group(1, &self.atlas_bind_group, &[]);
                rpass.draw(0..6, 1..sprite_count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Emulates the infrared tracker with the mouse: the cursor is the beacon
/// position, the scroll wheel walks the beacon distance, and the keyboard
/// provides the controller buttons.
struct PointerSource {
    position: Vec2,
    distance: f32,
    inside: bool,
    pressed: ButtonSet,
}

impl PointerSource {
    fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            distance: DEFAULT_MIN_DISTANCE,
            inside: false,
            pressed: ButtonSet::EMPTY,
        }
    }

    fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.position = Vec2::new(position.x as f32, position.y as f32);
                self.inside = true;
            }
            WindowEvent::CursorLeft { .. } => self.inside = false,
            WindowEvent::MouseWheel { delta, .. } => {
                let ticks = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / 40.0) as f32,
                };
                // scrolling up moves the viewer toward the sensor
                self.distance = (self.distance - ticks * EMULATED_DISTANCE_STEP)
                    .clamp(EMULATED_DISTANCE_MIN, EMULATED_DISTANCE_MAX);
            }
            WindowEvent::KeyboardInput { event: key, .. } => {
                if key.state == ElementState::Pressed && !key.repeat {
                    if let PhysicalKey::Code(code) = key.physical_key {
                        if let Some(button) = button_for_key(code) {
                            self.pressed.insert(button);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn take_snapshot(&mut self) -> InputSnapshot {
        let pressed = std::mem::take(&mut self.pressed);
        InputSnapshot {
            reading: TrackerReading {
                position: self.position,
                distance: self.distance,
                valid: self.inside,
            },
            pressed,
        }
    }
}

fn button_for_key(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Escape => Some(Button::Exit),
        KeyCode::KeyD => Some(Button::ToggleDebug),
        KeyCode::ArrowLeft => Some(Button::Left),
        KeyCode::ArrowRight => Some(Button::Right),
        KeyCode::ArrowUp => Some(Button::Up),
        KeyCode::ArrowDown => Some(Button::Down),
        KeyCode::Minus => Some(Button::Minus),
        KeyCode::Equal => Some(Button::Plus),
        _ => None,
    }
}

/// Shared handle so the winit loop can feed events while the hub polls.
#[derive(Clone)]
struct SharedPointer(Rc<RefCell<PointerSource>>);

impl SharedPointer {
    fn new() -> Self {
        Self(Rc::new(RefCell::new(PointerSource::new())))
    }

    fn handle_window_event(&self, event: &WindowEvent) {
        self.0.borrow_mut().handle_window_event(event);
    }
}

impl InputSource for SharedPointer {
    fn poll(&mut self) -> Option<InputSnapshot> {
        Some(self.0.borrow_mut().take_snapshot())
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("Parallax Window")
        .with_inner_size(LogicalSize::new(SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64))
        .with_resizable(false)
        .build(&event_loop)
        .expect("window");

    let pointer = SharedPointer::new();
    let mut hub = InputHub::new();
    hub.add_source(Box::new(pointer.clone()));

    let mut gpu = pollster::block_on(GpuState::new(&window)).expect("gpu");
    let mut state = ViewState::new(gpu.viewport());

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => {
                pointer.handle_window_event(&event);
                match event {
                    WindowEvent::Resized(size) => gpu.resize(size),
                    WindowEvent::CloseRequested => elwt.exit(),
                    _ => {}
                }
            }
            Event::AboutToWait => {
                // One frame: poll, fold the reading in (sticky when the
                // probe fails), draw, then apply button presses.
                let snapshot = hub.poll();
                let pressed = snapshot.as_ref().map(|s| s.pressed).unwrap_or_default();
                state.ingest(snapshot.map(|s| s.reading), gpu.viewport());
                match gpu.render(&state) {
                    Ok(_) => gpu.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(_) => {}
                }
                if handle_presses(&mut state, pressed) == LoopControl::Exit {
                    elwt.exit();
                }
            }
            _ => {}
        })
        .unwrap();
}
