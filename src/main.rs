//! Entry point for the **jumpscroll** command-line simulator.
//!
//! Builds a headless document from the configuration, runs a single jump
//! against it and prints every scroll write as one JSON object per line,
//! followed by a summary line.
//!
//! ```text
//! jumpscroll [--config <path>] [--duration <ms>] [--offset <px>]
//!            [--easing <name>] [--container <selector>] [--a11y] <target>
//! ```
//!
//! `<target>` is a pixel delta (`300`, `-120`) or a selector (`#intro`).
//! When omitted, `document.target` from the configuration is used.

use jumpscroll::config::Config;
use jumpscroll::easing::parse_easing;
use jumpscroll::host::headless::{run_until_idle, ElementId, HeadlessHost};
use jumpscroll::target::TargetSpec;
use jumpscroll::{JumpOptions, Jumper};
use log::{error, info};
use serde::Serialize;
use std::path::PathBuf;

/// Upper bound on simulated frames, in case a custom duration never ends.
const MAX_FRAMES: usize = 100_000;

/// Resolve the config directory (`$XDG_CONFIG_HOME/jumpscroll`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("jumpscroll")
}

/// Load the config from `path` if given, else from
/// `$XDG_CONFIG_HOME/jumpscroll/config.json`, falling back to compiled-in
/// defaults when the implicit file is absent.
fn load_config(path: Option<PathBuf>) -> Config {
    let explicit = path.is_some();
    let path = path.unwrap_or_else(|| config_dir().join("config.json"));
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) if explicit => {
            error!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

//  Arguments

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    target: Option<TargetSpec>,
    duration: Option<f64>,
    offset: Option<f64>,
    easing: Option<String>,
    container: Option<String>,
    a11y: bool,
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Args, String> {
    fn value(flag: &str, v: Option<String>) -> Result<String, String> {
        v.ok_or_else(|| format!("{} needs a value", flag))
    }
    fn number(flag: &str, v: Option<String>) -> Result<f64, String> {
        let v = value(flag, v)?;
        v.parse()
            .map_err(|_| format!("{} expects a number, got {:?}", flag, v))
    }

    let mut args = Args::default();
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--config" => args.config = Some(value(&arg, argv.next())?.into()),
            "--duration" => args.duration = Some(number(&arg, argv.next())?),
            "--offset" => args.offset = Some(number(&arg, argv.next())?),
            "--easing" => args.easing = Some(value(&arg, argv.next())?),
            "--container" => args.container = Some(value(&arg, argv.next())?),
            "--a11y" => args.a11y = true,
            // single-dash arguments fall through so "-120" is a delta
            flag if flag.starts_with("--") => return Err(format!("unknown flag {}", flag)),
            target => {
                if args.target.is_some() {
                    return Err(format!("unexpected argument {:?}", target));
                }
                args.target = Some(TargetSpec::parse_arg(target));
            }
        }
    }
    Ok(args)
}

fn build_options(args: &Args) -> Result<JumpOptions<ElementId>, String> {
    let mut options = JumpOptions::new();
    if let Some(ms) = args.duration {
        options = options.duration(ms);
    }
    if let Some(px) = args.offset {
        options = options.offset(px);
    }
    if let Some(name) = &args.easing {
        let easing = parse_easing(name).ok_or_else(|| format!("unknown easing {:?}", name))?;
        options = options.easing(easing);
    }
    if let Some(sel) = &args.container {
        options = options.container(sel.as_str());
    }
    if args.a11y {
        options = options.a11y(true);
    }
    Ok(options)
}

//  Output

#[derive(Debug, Serialize)]
struct Summary {
    frames: usize,
    elapsed_ms: f64,
    scroll_top: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    focused: Option<ElementId>,
}

//  Main

fn main() {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            error!("{}", e);
            eprintln!("usage: jumpscroll [--config <path>] [--duration <ms>] [--offset <px>] [--easing <name>] [--container <selector>] [--a11y] <target>");
            std::process::exit(2);
        }
    };
    let config = load_config(args.config.clone());
    let Some(target) = args.target.clone().or_else(|| config.document.target.clone()) else {
        eprintln!("usage: jumpscroll [options] <target>  (or set document.target in the config)");
        std::process::exit(2);
    };
    let options = match build_options(&args) {
        Ok(o) => o,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    let host = HeadlessHost::from_config(&config.document);
    let jumper = Jumper::with_defaults(host, config.defaults.clone());

    if let Err(e) = jumper.jump(target.into_target::<ElementId>(), options) {
        error!("{}", e);
        std::process::exit(1);
    }

    let frames = run_until_idle(&jumper, MAX_FRAMES);
    if jumper.is_animating() {
        error!("jump still running after {} frames", frames);
    }

    let elapsed_ms = jumper.elapsed();
    let (trace, summary) = jumper.with_host(|h| {
        let summary = Summary {
            frames,
            elapsed_ms,
            scroll_top: h.scroll_top(),
            focused: h.focused().cloned(),
        };
        (h.take_trace(), summary)
    });

    for write in &trace {
        match serde_json::to_string(write) {
            Ok(line) => println!("{}", line),
            Err(e) => error!("failed to encode trace: {}", e),
        }
    }
    match serde_json::to_string(&summary) {
        Ok(line) => println!("{}", line),
        Err(e) => error!("failed to encode summary: {}", e),
    }
}
