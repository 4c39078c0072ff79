use glassbg_core::{BackdropConfig, Clock, FrameStatus, PipelineError, RenderContext, Viewport};
use glassbg_render::GpuBackend;
use std::sync::Arc;
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

fn viewport_of(size: winit::dpi::PhysicalSize<u32>) -> Viewport {
    Viewport::new(size.width, size.height)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(BackdropConfig::default().seed);
    let config = BackdropConfig::default().with_seed(seed);

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("glassbg (native)")
            .build(&event_loop)?,
    );

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(Arc::clone(&window))?;
    let viewport = viewport_of(window.inner_size());
    let backend = pollster::block_on(GpuBackend::new(
        &instance,
        surface,
        viewport.width,
        viewport.height,
        config.clear_color,
    ))?;
    let mut ctx = Some(RenderContext::init(backend, &config, viewport)?);
    let clock = Clock::start();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            if let Some(ctx) = ctx.as_mut() {
                ctx.resize(viewport_of(size));
            }
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            if let Some(ctx) = ctx.take() {
                drop(ctx.dispose());
            }
            elwt.exit();
        }
        Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } => {
            let Some(c) = ctx.as_mut() else {
                return;
            };
            match c.tick(clock.elapsed_secs()) {
                Ok(FrameStatus::Ready) => {}
                Ok(FrameStatus::Skipped) => log::debug!("[frame] skipped"),
                Err(PipelineError::Surface(e)) => log::error!("[frame] {e}"),
                Err(e) => {
                    log::error!("[frame] fatal: {e}");
                    elwt.exit();
                }
            }
        }
        Event::AboutToWait => window.request_redraw(),
        _ => {}
    })?;
    Ok(())
}
