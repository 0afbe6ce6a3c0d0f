mod app;
mod clock;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use horde_engine::logging::{LoggingConfig, init_logging};
use horde_engine::{Horde, NativeConfig, NativeEngine, NativeUtils, Utils, UtilsApi};

use crate::app::{AppControl, KnightApp, KnightSettings, knight_config};
use crate::clock::FrameClock;

const USAGE: &str = "\
usage: horde-knight --hdc <device-context> [options]

  --engine <path>      engine library (default: platform Horde3D library)
  --utils <path>       utility library (default: platform Horde3DUtils library)
  --content <dir>      resource directory (default: content)
  --pipeline <file>    pipeline configuration (default: pipeline_Knight.xml)
  --size <w>x<h>       viewport size (default: 800x600)
  --frames <n>         stop after n frames
  --fps <rate>         fixed time step instead of the wall clock
  --weight <w>         blend weight of the order clip, 0..1 (default: 1)
  --show-fps           draw frame rate and weight
  --debug-view         engine debug view mode";

#[derive(Debug)]
struct Args {
    native: NativeConfig,
    device_context: i32,
    pipeline: PathBuf,
    width: i32,
    height: i32,
    fixed_fps: Option<f32>,
    settings: KnightSettings,
}

impl Args {
    fn parse(mut it: impl Iterator<Item = String>) -> Result<Option<Self>> {
        let mut args = Args {
            native: NativeConfig::default(),
            device_context: -1,
            pipeline: PathBuf::from("pipeline_Knight.xml"),
            width: 800,
            height: 600,
            fixed_fps: None,
            settings: KnightSettings::default(),
        };

        while let Some(flag) = it.next() {
            let mut value = || it.next().with_context(|| format!("`{flag}` needs a value"));
            match flag.as_str() {
                "-h" | "--help" => return Ok(None),
                "--engine" => args.native.engine_library = value()?.into(),
                "--utils" => args.native.utils_library = value()?.into(),
                "--hdc" => args.device_context = value()?.parse().context("--hdc")?,
                "--content" => args.settings.content_dir = value()?,
                "--pipeline" => args.pipeline = value()?.into(),
                "--size" => {
                    let size = value()?;
                    let (w, h) = size.split_once('x').with_context(|| format!("bad size `{size}`"))?;
                    args.width = w.parse().context("--size width")?;
                    args.height = h.parse().context("--size height")?;
                }
                "--frames" => args.settings.frame_limit = Some(value()?.parse().context("--frames")?),
                "--fps" => args.fixed_fps = Some(value()?.parse().context("--fps")?),
                "--weight" => {
                    let w: f32 = value()?.parse().context("--weight")?;
                    args.settings.weight = w.clamp(0.0, 1.0);
                }
                "--show-fps" => args.settings.show_fps = true,
                "--debug-view" => args.settings.debug_view = true,
                other => bail!("unknown argument `{other}`\n\n{USAGE}"),
            }
        }

        if args.device_context < 0 {
            bail!("--hdc is required\n\n{USAGE}");
        }
        Ok(Some(args))
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let Some(args) = Args::parse(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    let mut utils = Utils::new(NativeUtils::load(&args.native).context("loading utility library")?);
    with_gl_context(&mut utils, args.device_context, |utils| run(&args, utils))
}

/// Runs `f` inside an OpenGL context on `device_context`. The context is
/// released on every exit from `f`, errors included.
fn with_gl_context<U: UtilsApi, T>(
    utils: &mut Utils<U>,
    device_context: i32,
    f: impl FnOnce(&mut Utils<U>) -> Result<T>,
) -> Result<T> {
    if !utils.init_opengl(device_context) {
        bail!("could not create an OpenGL context on device context {device_context}");
    }
    let result = f(utils);
    utils.release_opengl();
    result
}

fn run(args: &Args, utils: &mut Utils<NativeUtils>) -> Result<()> {
    let engine = NativeEngine::load(&args.native).context("loading engine library")?;
    let config = knight_config(&args.pipeline);
    let mut horde = Horde::with_config(engine, &config);

    if !horde.init().context("initializing engine")? {
        utils.dump_messages();
        bail!("engine refused to initialize");
    }
    if !horde.apply_config(&config)? {
        utils.dump_messages();
        bail!("engine configuration failed (pipeline {})", args.pipeline.display());
    }

    let mut app = KnightApp::setup(&mut horde, utils, args.settings.clone()).context("building knight scene")?;
    app.resize(&mut horde, args.width, args.height)?;

    let mut clock = match args.fixed_fps {
        Some(fps) => FrameClock::fixed(fps),
        None => FrameClock::measured(),
    };

    loop {
        let ft = clock.tick();
        let control = app.frame(&mut horde, utils, ft)?;
        utils.swap_buffers();
        if control == AppControl::Exit {
            log::info!("stopping after {} frames", ft.frame_index + 1);
            break;
        }
    }

    // The engine must let go of GL resources before the context goes away.
    horde.release()?;
    Ok(())
}
