use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::AppConfig;
use crate::debug_panel::DebugPanel;
use crate::debug_ui::DebugUi;
use crate::error::{Error, Result};
use crate::events::{EventDispatcher, EventQueue, WindowEventTranslator};
use crate::frame_loop::FrameLoop;
use crate::renderer::WgpuRenderer;
use crate::state::AppState;
use crate::viewport::Viewport;

/// Open the window and run until it is closed or a frame fails.
///
/// # Example
/// ```no_run
/// use sphere_glow::AppConfig;
///
/// sphere_glow::run(AppConfig::new().title("Glow")).unwrap();
/// ```
pub fn run(config: AppConfig) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = SphereApp::Pending { config };
    event_loop.run_app(&mut app)?;

    match app {
        SphereApp::Failed(err) => Err(err),
        _ => Ok(()),
    }
}

struct Running {
    window: Arc<Window>,
    renderer: WgpuRenderer,
    state: AppState,
    translator: WindowEventTranslator,
    queue: EventQueue,
    dispatcher: EventDispatcher,
    frame_loop: FrameLoop,
    panel: DebugPanel,
    ui: Option<DebugUi>,
    last_frame: Instant,
}

enum SphereApp {
    Pending { config: AppConfig },
    Running(Box<Running>),
    Failed(Error),
}

impl SphereApp {
    fn start(config: &AppConfig, event_loop: &ActiveEventLoop) -> Result<Running> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_transparent(true);
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let scale_factor = window.scale_factor();
        let size = window.inner_size();
        let logical = size.to_logical::<f64>(scale_factor);
        let viewport = Viewport::new(
            logical.width as f32,
            logical.height as f32,
            scale_factor as f32,
            config.max_pixel_ratio,
        );
        log::info!(
            "Viewport {}x{} @ {} -> buffer {:?}",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio,
            viewport.buffer_size()
        );

        let state = AppState::new(config, viewport);
        let renderer = WgpuRenderer::new(window.clone(), config, &state)?;
        let ui = config.debug_panel.then(|| DebugUi::new(&window));

        window.request_redraw();

        Ok(Running {
            translator: WindowEventTranslator::new(size, scale_factor, config.max_scroll),
            window,
            renderer,
            state,
            queue: EventQueue::new(),
            dispatcher: EventDispatcher::with_default_listeners(),
            frame_loop: FrameLoop::new(),
            panel: DebugPanel::for_sphere_lights(),
            ui,
            last_frame: Instant::now(),
        })
    }

    /// Stops the loop. [`run`] hands the error back to its caller.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        *self = SphereApp::Failed(err);
        event_loop.exit();
    }
}

impl Running {
    fn redraw(&mut self) -> Result<()> {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if let Some(ui) = &mut self.ui {
            let (changes, frame) = ui.run(&self.window, &self.panel, &self.state.scene.lights);
            for change in changes {
                self.panel.apply(change, &mut self.state.scene.lights);
            }
            self.renderer.set_ui(frame);
        }

        self.frame_loop.tick(
            dt,
            &mut self.state,
            &mut self.renderer,
            self.window.as_ref(),
        )
    }
}

impl ApplicationHandler for SphereApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let SphereApp::Pending { config } = self else {
            return;
        };

        match Self::start(config, event_loop) {
            Ok(running) => *self = SphereApp::Running(Box::new(running)),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let SphereApp::Running(app) = self else {
            return;
        };

        // The panel sees every event, and so does the scene: a drag on a
        // slider still moves the sphere.
        if let Some(ui) = &mut app.ui {
            ui.on_window_event(&app.window, &event);
        }
        if let Some(host_event) = app.translator.translate(&event) {
            app.queue.push(host_event);
            app.dispatcher.drain(&mut app.queue, &mut app.state);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Closed after {} frames", app.frame_loop.frames());
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app.renderer.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = app.redraw() {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }
}
