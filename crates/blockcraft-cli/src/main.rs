use anyhow::{Context, Result, bail};
use blockcraft_config::Config;
use blockcraft_engine::{
    BlockRegistry, Interactivity, Page, RenderOptions, Renderer, UploadPolicy,
};
use std::path::{Path, PathBuf};
use std::{env, fs, process};

const USAGE: &str = "\
Usage:
  blockcraft-cli render <page.json> [output.html]
  blockcraft-cli check-upload <file>...
  blockcraft-cli blocks";

/// Builds the renderer once for the whole run; blocks share it.
fn renderer_from_config(config: &Config) -> Renderer {
    let options = RenderOptions {
        class_prefix: config.render.class_prefix.clone(),
        interactivity: Interactivity::new(
            config.render.directive_prefix.clone(),
            config.render.namespace.clone(),
        ),
    };
    Renderer::new(BlockRegistry::with_defaults(), options)
}

fn upload_policy(config: &Config) -> UploadPolicy {
    let mut policy = UploadPolicy::default();
    if config.uploads.allow_svg {
        policy = policy.with_svg();
    }
    for (ext, mime) in &config.uploads.extra_types {
        policy = policy.allow(ext, mime);
    }
    policy
}

/// Explicit output path, else `<output_dir>/<page stem>.html`, else stdout.
fn output_path(config: &Config, page_path: &Path, explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }
    let dir = config.output_dir.as_ref()?;
    let stem = page_path.file_stem()?;
    Some(dir.join(format!("{}.html", stem.to_string_lossy())))
}

fn render_command(config: &Config, page_path: &Path, explicit_out: Option<&str>) -> Result<()> {
    let json = fs::read_to_string(page_path)
        .with_context(|| format!("Failed to read page {}", page_path.display()))?;
    let page = Page::from_json(&json)?;
    log::info!(
        "Rendering {} ({} blocks)",
        page_path.display(),
        page.block_count()
    );

    let html = renderer_from_config(config).render_page(&page);
    if html.is_empty() {
        log::warn!("Page {} rendered no markup", page_path.display());
    }

    match output_path(config, page_path, explicit_out) {
        Some(out) => {
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&out, &html)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            log::info!("Wrote {}", out.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

fn check_upload_command(config: &Config, files: &[String]) -> Result<()> {
    let policy = upload_policy(config);
    let mut rejected = 0;
    for file in files {
        match policy.mime_for(file) {
            Some(mime) => println!("{file}: allowed ({mime})"),
            None => {
                println!("{file}: rejected");
                rejected += 1;
            }
        }
    }
    if rejected > 0 {
        bail!("{rejected} file(s) not allowed");
    }
    Ok(())
}

fn run(args: &[String]) -> Result<()> {
    let config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", Config::config_path().display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            log::warn!("Failed to load config file: {e}");
            log::warn!("Using default settings");
            Config::default()
        }
    };

    match args.get(1).map(String::as_str) {
        Some("render") => {
            let Some(page) = args.get(2) else {
                bail!("render needs a page file\n{USAGE}");
            };
            render_command(&config, Path::new(page), args.get(3).map(String::as_str))
        }
        Some("check-upload") if args.len() > 2 => check_upload_command(&config, &args[2..]),
        Some("blocks") => {
            for name in BlockRegistry::with_defaults().names() {
                println!("{name}");
            }
            Ok(())
        }
        _ => bail!("{USAGE}"),
    }
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
