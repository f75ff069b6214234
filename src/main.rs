use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::{bail, Context};
use clap::Parser;
use log::info;

mod cli;
mod logger;
mod scenes;

use cli::{Args, SceneName};
use logger::init_logger;
use raylight::{output, random};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    info!("raylight - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let (world, mut camera) = match args.scene {
        SceneName::Basic => scenes::basic(),
        SceneName::Materials => scenes::materials(),
        SceneName::Fov => scenes::fov(),
        SceneName::Final => scenes::final_scene(&mut random::seeded_rng(args.seed)),
    };
    info!("Scene {:?} with {} objects", args.scene, world.len());

    if let Some(width) = args.width {
        camera.image_width = width;
    }
    if let Some(samples_per_pixel) = args.samples_per_pixel {
        camera.samples_per_pixel = samples_per_pixel;
    }
    if let Some(max_depth) = args.max_depth {
        camera.max_depth = max_depth;
    }
    camera.seed = args.seed;

    if args.output == "-" {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        camera.render(&world, &mut out).context("rendering to stdout")?;
    } else if args.output.ends_with(".ppm") {
        let file = File::create(&args.output).with_context(|| format!("creating {}", args.output))?;
        let mut out = BufWriter::new(file);
        camera
            .render(&world, &mut out)
            .with_context(|| format!("rendering to {}", args.output))?;
        info!("Image saved as {}", args.output);
    } else if args.output.ends_with(".png") {
        let image = camera.render_image(&world).context("rendering image")?;
        output::save_image_as_png(&image, &args.output)
            .with_context(|| format!("saving {}", args.output))?;
    } else {
        bail!(
            "unsupported output '{}': use '-', a .ppm path or a .png path",
            args.output
        );
    }

    Ok(())
}
