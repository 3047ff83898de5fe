mod cli_options;
mod frame;
mod tracer;
mod view;

use std::path::Path;

use indicatif::ProgressBar;

use cli_options::CliOptions;
use frame::Frame;
use scene::preset;
use tracer::Tracer;
use view::View;

fn main() {
    env_logger::init();
    let options = match cli_options::parse_args(std::env::args().collect()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("usage: {}", CliOptions::message());
            std::process::exit(1);
        }
    };
    if let Err(e) = run(options) {
        log::error!("render aborted: {}", e);
        std::process::exit(1);
    }
}

fn run(options: CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    let (world, view_to_world) = preset::by_name(&options.scene_name).ok_or_else(|| {
        format!(
            "unknown scene {:?}; available: {}",
            options.scene_name,
            preset::names().join(", ")
        )
    })?;
    world.log_stats();

    let view = View::new(
        (options.width, options.height),
        math::new_deg(options.fov_degrees),
        options.samples_per_edge,
    );
    let tracer = Tracer::new(&world, options.max_depth).with_damping(options.damping);
    let (width, height) = view.resolution();
    let mut frame = Frame::new(width, height, view.rays_per_pixel());

    let progress = ProgressBar::new(height as u64);
    for y in 0..height {
        for x in 0..width {
            for s in 0..view.rays_per_pixel() {
                let mut ray = view.viewing_ray(x, y, s);
                ray.transform(&view_to_world);
                frame.accumulate(x, y, tracer.trace(ray, 0)?);
            }
        }
        progress.inc(1);
    }
    progress.finish();

    frame.save(Path::new(&options.output))?;
    log::info!("image saved to {}", options.output);
    Ok(())
}
