use wgpu::util::DeviceExt;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    window::Window,
};
use std::sync::Arc;

use grid_life::{BoundaryPolicy, Simulation};

// GUI Imports
use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiWgpuRenderer;
use egui_winit::State as EguiWinitState;

use crate::render::{create_render_bind_group, create_render_bind_group_layout, RenderParams};
use crate::{GRID_HEIGHT, GRID_WIDTH};

/// Ceiling for generations per frame, reachable with the arrow keys.
pub const MAX_TICKS_PER_FRAME: u32 = 64;

pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub window: Arc<Window>,

    /// The owned simulation; the GPU only ever sees copies of its snapshots.
    pub sim: Simulation,
    pub running: bool,
    pub ticks_per_frame: u32,
    pub quit_requested: bool,
    pub cursor_pos: Option<PhysicalPosition<f64>>,

    cell_buffer: wgpu::Buffer,
    cell_staging: Vec<u32>,
    param_buffer: wgpu::Buffer,
    render_pipeline: wgpu::RenderPipeline,
    render_bind_group: wgpu::BindGroup,

    // GUI state
    pub egui_ctx: EguiContext,
    pub egui_winit_state: EguiWinitState,
    pub egui_renderer: EguiWgpuRenderer,
}

impl State {
    pub async fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone()).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .expect("Failed to find an appropriate adapter");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats[0];

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![surface_format.into()],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sim = Simulation::new(GRID_WIDTH, GRID_HEIGHT, BoundaryPolicy::Wraparound);
        let cell_count = (GRID_WIDTH * GRID_HEIGHT) as usize;

        let cell_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Cell State Buffer"),
            size: (cell_count * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let param_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Render Parameters"),
            contents: bytemuck::bytes_of(&Self::render_params(&config)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Cell Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("cells.wgsl").into()),
        });

        let render_bind_group_layout = create_render_bind_group_layout(&device);
        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&render_bind_group_layout],
                push_constant_ranges: &[],
            });
        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[Some(config.format.into())],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });
        let render_bind_group = create_render_bind_group(
            &device,
            &render_bind_group_layout,
            &param_buffer,
            &cell_buffer,
        );

        log::info!("Initializing egui...");
        let egui_ctx = EguiContext::default();
        let egui_winit_state =
            EguiWinitState::new(egui_ctx.clone(), egui_ctx.viewport_id(), &window, None, None);
        let egui_renderer = EguiWgpuRenderer::new(&device, config.format, None, 1);

        log::info!("wgpu initialized successfully.");

        Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            sim,
            running: false,
            ticks_per_frame: 1,
            quit_requested: false,
            cursor_pos: None,
            cell_buffer,
            cell_staging: vec![0; cell_count],
            param_buffer,
            render_pipeline,
            render_bind_group,
            egui_ctx,
            egui_winit_state,
            egui_renderer,
        }
    }

    // Cell size in physical pixels, derived from the surface so the grid
    // fills the window at any size.
    fn render_params(config: &wgpu::SurfaceConfiguration) -> RenderParams {
        RenderParams {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            cell_width: (config.width / GRID_WIDTH).max(1),
            cell_height: (config.height / GRID_HEIGHT).max(1),
        }
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            // The grid never resizes; only the derived cell size changes.
            self.queue.write_buffer(
                &self.param_buffer,
                0,
                bytemuck::bytes_of(&Self::render_params(&self.config)),
            );

            log::info!(
                "Reconfigured surface to {}x{}",
                new_size.width,
                new_size.height
            );
        } else {
            log::warn!(
                "Ignoring resize to zero dimensions: {}x{}",
                new_size.width,
                new_size.height
            );
        }
    }

    /// Map a cursor position onto the grid and flip that cell.
    pub fn toggle_cell_at(&mut self, pos: PhysicalPosition<f64>) {
        if pos.x < 0.0 || pos.y < 0.0 {
            return;
        }
        let params = Self::render_params(&self.config);
        let col = pos.x as u32 / params.cell_width;
        let row = pos.y as u32 / params.cell_height;

        match self.sim.toggle(row, col) {
            Ok(alive) => {
                log::debug!(
                    "toggled ({row}, {col}) -> {}",
                    if alive { "alive" } else { "dead" }
                );
            }
            // Clicks in the slack area past the last full cell land here.
            Err(err) => log::debug!("ignoring click: {err}"),
        }
    }

    /// Advance the simulation (while running) and render the grid. Returns
    /// the surface texture for the egui overlay pass to draw on.
    pub fn update_and_render(&mut self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        if self.running {
            if let Err(err) = self.sim.step(self.ticks_per_frame as i32) {
                log::error!("step failed: {err}");
            }
        }
        self.upload_cells();

        let output_frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost, recreating...");
                self.resize(self.size);
                return Err(wgpu::SurfaceError::Lost);
            }
            Err(e) => {
                log::error!("Failed to acquire next swap chain texture: {:?}", e);
                return Err(e);
            }
        };

        let output_view = output_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Cell Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.render_bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Draw full-screen triangle
        }
        self.queue.submit(Some(encoder.finish()));

        // Present happens after the egui overlay is drawn on top.
        Ok(output_frame)
    }

    // Copy the current generation into the GPU cell buffer.
    fn upload_cells(&mut self) {
        for (slot, &alive) in self
            .cell_staging
            .iter_mut()
            .zip(self.sim.snapshot().cells())
        {
            *slot = alive as u32;
        }
        self.queue
            .write_buffer(&self.cell_buffer, 0, bytemuck::cast_slice(&self.cell_staging));
    }

    /// Draw the egui status overlay onto `frame` and present it.
    pub fn render_overlay(&mut self, frame: wgpu::SurfaceTexture) {
        let output_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = self.egui_winit_state.take_egui_input(&self.window);
        let ctx = self.egui_ctx.clone();
        ctx.begin_frame(raw_input);

        let panel_frame = egui::Frame {
            fill: egui::Color32::from_rgba_unmultiplied(25, 25, 25, 180),
            inner_margin: egui::Margin::same(6.0),
            ..Default::default()
        };

        egui::Area::new(egui::Id::new("status_area"))
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(5.0, 5.0))
            .show(&ctx, |ui| {
                panel_frame.show(ui, |ui| {
                    ui.label(format!("Generation: {}", self.sim.generation()));
                    ui.label(format!("Ticks per frame: {}", self.ticks_per_frame));
                    ui.label(if self.running {
                        "Running - Space pauses"
                    } else {
                        "Paused - Space resumes, click toggles cells"
                    });
                    ui.horizontal(|ui| {
                        if ui
                            .button(if self.running { "Pause" } else { "Run" })
                            .clicked()
                        {
                            self.running = !self.running;
                        }
                        if ui.button("Step").clicked() {
                            if let Err(err) = self.sim.step(1) {
                                log::error!("step failed: {err}");
                            }
                        }
                        if ui.button("Quit").clicked() {
                            self.quit_requested = true;
                        }
                    });
                });
            });

        let full_output = ctx.end_frame();
        let paint_jobs = ctx.tessellate(full_output.shapes, self.window.scale_factor() as f32);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui Encoder"),
            });
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        self.egui_winit_state
            .handle_platform_output(&self.window, full_output.platform_output);

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view, // Render egui ON TOP of the cell pass
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui_renderer
                .render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
    }
}
