use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};
use slidecraft::{converters::html::compose_print_document, SlideEngine};

fn main() -> Result<()> {
    // RUST_LOG overrides the default level.
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut args = env::args().skip(1);
    let input = args
        .next()
        .context("usage: render_deck <deck.json> [template-id] [out-dir]")?;
    let template_id = args.next().unwrap_or_else(|| "modern".to_string());
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "rendered".to_string()));

    log::info!("Loading deck from {}", input);
    let json = fs::read_to_string(&input).with_context(|| format!("reading {input}"))?;

    let engine = SlideEngine::with_builtin_themes()?;
    // Errors name the failing slide by its 1-based index.
    let slides = engine
        .generate_all_from_json(&json, &template_id)
        .with_context(|| format!("rendering {input} with '{template_id}'"))?;
    let size = engine.canvas_for_json(&json, &template_id)?;

    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    for (i, slide) in slides.iter().enumerate() {
        let path = out_dir.join(format!("slide_{:02}.html", i + 1));
        log::debug!("Writing slide {} to {}", i + 1, path.display());
        fs::write(&path, slide.to_standalone_page(size))
            .with_context(|| format!("writing {}", path.display()))?;
    }

    let print_path = out_dir.join("print.html");
    fs::write(&print_path, compose_print_document(&slides, size)?)
        .with_context(|| format!("writing {}", print_path.display()))?;
    log::info!(
        "Wrote {} slides and {} to {}",
        slides.len(),
        print_path.display(),
        out_dir.display()
    );
    Ok(())
}
