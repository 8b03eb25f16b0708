//! Static site generation: one HTML page per collection plus an index,
//! written under `output/`.
//!
//! Asset references are either relative links into the copied local image
//! tree or remote host URLs, depending on the `--urls` flag and per-shot URL
//! availability. Shot order on a page is declaration order from the config
//! file; output is byte-identical across runs for unchanged input.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{self, Config};
use crate::error::GalleryError;
use crate::types::{Collection, Shot};

const OUTPUT_DIR: &str = "output";
const THUMBS_DIR: &str = "thumbs";
const IMG_DIR: &str = "img";

/// Per-run generation settings; passed explicitly, no module-level state.
#[derive(Debug, Clone)]
pub struct GenerateOpts {
    /// Directory holding the config file and the `img/` tree.
    pub root: PathBuf,
    pub config_file: String,
    /// Prefer remote URLs over local files where a shot has one.
    pub use_urls: bool,
    pub thumb_size: (u32, u32),
    pub verbose: bool,
}

/// Resolved image references for one shot: what goes in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRefs {
    /// `src` of the inline thumbnail.
    pub thumb: String,
    /// `href` of the full-size link wrapping it.
    pub full: String,
}

/// Thumbnail filename for a source image, e.g. `alpha.png` -> `alpha-800-450.png`.
fn thumb_filename(filename: &str, (w, h): (u32, u32)) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) => format!("{}-{}-{}.{}", stem, w, h, ext),
        None => format!("{}-{}-{}", filename, w, h),
    }
}

/// Decide what the page should reference for one shot.
///
/// URL mode only applies to shots that actually have a URL; everything else
/// falls back to the local files, linked relative to the collection page at
/// `output/<slug>/index.html`.
fn asset_refs(
    shot: &Shot,
    base_dir: &str,
    dims: (u32, u32),
    thumb_size: (u32, u32),
    use_urls: bool,
) -> AssetRefs {
    if use_urls {
        if let Some(url) = &shot.url {
            return AssetRefs {
                thumb: url.sized(thumb_size.0, thumb_size.1),
                full: url.sized(dims.0, dims.1),
            };
        }
    }
    AssetRefs {
        thumb: format!(
            "../{}/{}/{}",
            THUMBS_DIR,
            base_dir,
            thumb_filename(&shot.filename, thumb_size)
        ),
        full: format!("../{}/{}/{}", IMG_DIR, base_dir, shot.filename),
    }
}

// HTML generation helpers
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// CSS styles for the site
fn css_styles() -> &'static str {
    r#"
* {
    box-sizing: border-box;
    margin: 0;
    padding: 0;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
    background: #1a1a2e;
    color: #e8e8e8;
    line-height: 1.6;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    padding: 0 24px;
}

header {
    background: #16213e;
    padding: 20px 0;
}

header h1 {
    font-size: 1.5rem;
}

header h1 a {
    color: #e8e8e8;
    text-decoration: none;
}

header nav {
    margin-top: 12px;
    display: flex;
    gap: 16px;
    flex-wrap: wrap;
}

header nav a {
    color: #9fb4d4;
    text-decoration: none;
    font-size: 0.875rem;
}

header nav a:hover {
    color: #ffffff;
}

main {
    padding: 32px 0;
}

h2 {
    margin-bottom: 8px;
}

.total {
    display: block;
    margin-bottom: 24px;
    color: #9fb4d4;
}

.customization {
    margin-bottom: 32px;
}

.customization .title {
    font-weight: 600;
    margin-bottom: 8px;
}

.customization img {
    display: block;
    max-width: 100%;
    height: auto;
    border-radius: 4px;
}

.customization .extra {
    color: #9fb4d4;
    font-size: 0.875rem;
    margin-top: 4px;
}

.collection-list {
    list-style: none;
}

.collection-list li {
    margin-bottom: 12px;
}

.collection-list a {
    color: #9fb4d4;
    font-size: 1.125rem;
}
"#
}

fn page_header(title: &str, site_title: &str, collections: &[Collection]) -> String {
    let nav_html: String = collections
        .iter()
        .map(|c| format!(r#"<a href="/{}/">{}</a>"#, c.slug, html_escape(&c.name_plural)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - {}</title>
    <style>{}</style>
</head>
<body>
    <header>
        <div class="container">
            <h1><a href="/">{}</a></h1>
            <nav>{}</nav>
        </div>
    </header>
    <main>
        <div class="container">
"#,
        html_escape(title),
        html_escape(site_title),
        css_styles(),
        html_escape(site_title),
        nav_html
    )
}

fn page_footer() -> &'static str {
    r#"
        </div>
    </main>
</body>
</html>
"#
}

fn shot_card_html(shot: &Shot, refs: &AssetRefs, thumb_width: u32) -> String {
    let extra = match &shot.label {
        Some(label) => format!(
            "<div class=\"extra\">{}</div>\n",
            html_escape(label)
        ),
        None => String::new(),
    };
    format!(
        r#"<div class="customization">
<div class="title" id="{}">{}</div>
<a href="{}" class="image"><img src="{}" width="{}" alt="{}"></a>
{}</div>
"#,
        shot.anchor(),
        html_escape(&shot.name),
        refs.full,
        refs.thumb,
        thumb_width,
        html_escape(&shot.name),
        extra
    )
}

/// Build one collection page. Pure; all file I/O happens in the caller.
fn collection_page_html(
    collection: &Collection,
    shots: &[(&Shot, AssetRefs)],
    site_title: &str,
    collections: &[Collection],
    thumb_width: u32,
) -> String {
    let mut html = page_header(&collection.name_plural, site_title, collections);

    html.push_str(&format!("<h2>{}</h2>\n", html_escape(&collection.name_plural)));
    html.push_str(&format!(
        "<strong class=\"total\">Total {}: {}</strong>\n",
        html_escape(collection.count_label(shots.len())),
        shots.len()
    ));

    for (shot, refs) in shots {
        html.push_str(&shot_card_html(shot, refs, thumb_width));
    }

    html.push_str(page_footer());
    html
}

/// Build the index page: links to every collection with its shot count.
fn index_html(config: &Config) -> String {
    let mut html = page_header(&config.title, &config.title, &config.collections);

    html.push_str(&format!("<h2>{}</h2>\n", html_escape(&config.title)));
    html.push_str("<ul class=\"collection-list\">\n");
    for collection in &config.collections {
        let count = config.shots_in(&collection.slug).len();
        html.push_str(&format!(
            "<li><a href=\"/{}/\">{}</a> ({} {})</li>\n",
            collection.slug,
            html_escape(&collection.name_plural),
            count,
            html_escape(collection.count_label(count))
        ));
    }
    html.push_str("</ul>\n");

    html.push_str(page_footer());
    html
}

/// Generate the thumbnail for a source image unless it already exists.
fn ensure_thumb(
    source: &Path,
    thumb: &Path,
    (w, h): (u32, u32),
    verbose: bool,
) -> Result<()> {
    if thumb.exists() {
        return Ok(());
    }
    if verbose {
        println!("   Generating thumbnail: {}", thumb.display());
    }
    if let Some(parent) = thumb.parent() {
        fs::create_dir_all(parent)?;
    }
    let img = image::open(source).map_err(|e| GalleryError::ImageFormat {
        path: source.to_path_buf(),
        source: e,
    })?;
    img.thumbnail(w, h)
        .save(thumb)
        .with_context(|| format!("cannot write {}", thumb.display()))?;
    Ok(())
}

/// Copy `source` under the same collection-relative path inside the output
/// directory.
fn copy_into_output(source: &Path, out_subpath: &Path) -> Result<()> {
    if let Some(parent) = out_subpath.parent() {
        fs::create_dir_all(parent).map_err(GalleryError::Io)?;
    }
    fs::copy(source, out_subpath)
        .map_err(GalleryError::Io)
        .with_context(|| format!("cannot write {}", out_subpath.display()))?;
    Ok(())
}

/// Main generation function: load, validate, render, write.
pub fn run_generate(opts: &GenerateOpts) -> Result<()> {
    let config_path = opts.root.join(&opts.config_file);
    let config = config::load(&config_path)?;

    // Resolve every local image up front so a broken reference aborts the
    // run before any output is written.
    let mut dims: Vec<(u32, u32)> = Vec::with_capacity(config.shots.len());
    for shot in &config.shots {
        let collection = config
            .collection(&shot.collection)
            .expect("collection validated at load");
        let source = opts
            .root
            .join(IMG_DIR)
            .join(&collection.base_dir)
            .join(&shot.filename);
        if !source.exists() {
            return Err(GalleryError::Asset(source).into());
        }
        let d = image::image_dimensions(&source).map_err(|e| GalleryError::ImageFormat {
            path: source,
            source: e,
        })?;
        dims.push(d);
    }

    let output_dir = opts.root.join(OUTPUT_DIR);
    if output_dir.exists() {
        fs::remove_dir_all(&output_dir)?;
    }
    fs::create_dir_all(&output_dir)?;

    for collection in &config.collections {
        let page_dir = output_dir.join(&collection.slug);
        fs::create_dir_all(&page_dir)?;

        let mut page_shots: Vec<(&Shot, AssetRefs)> = Vec::new();
        for (shot, &d) in config.shots.iter().zip(&dims) {
            if shot.collection != collection.slug {
                continue;
            }
            if opts.verbose {
                println!(" - Processing {}", shot.name);
            }
            let refs = asset_refs(shot, &collection.base_dir, d, opts.thumb_size, opts.use_urls);

            let remote = opts.use_urls && shot.url.is_some();
            if !remote {
                let rel_img = Path::new(IMG_DIR)
                    .join(&collection.base_dir)
                    .join(&shot.filename);
                let rel_thumb = Path::new(THUMBS_DIR)
                    .join(&collection.base_dir)
                    .join(thumb_filename(&shot.filename, opts.thumb_size));
                let source = opts.root.join(&rel_img);
                let thumb = opts.root.join(&rel_thumb);
                ensure_thumb(&source, &thumb, opts.thumb_size, opts.verbose)?;
                copy_into_output(&source, &output_dir.join(&rel_img))?;
                copy_into_output(&thumb, &output_dir.join(&rel_thumb))?;
            }
            page_shots.push((shot, refs));
        }

        let page = page_dir.join("index.html");
        println!("Writing to {}...", page.display());
        let html = collection_page_html(
            collection,
            &page_shots,
            &config.title,
            &config.collections,
            opts.thumb_size.0,
        );
        fs::write(&page, html)
            .map_err(GalleryError::Io)
            .with_context(|| format!("cannot write {}", page.display()))?;
    }

    let index = output_dir.join("index.html");
    println!("Writing to {}...", index.display());
    fs::write(&index, index_html(&config))
        .map_err(GalleryError::Io)
        .with_context(|| format!("cannot write {}", index.display()))?;

    println!("Done! Generated site in {}/", output_dir.display());
    Ok(())
}
