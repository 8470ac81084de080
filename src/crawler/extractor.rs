//! Image extraction from article markup
//!
//! Yields absolute URLs of `<img src>` references whose path ends in a
//! recognized raster extension, in document order.

use scraper::{ElementRef, Html};
use url::Url;

/// Extensions accepted as harvestable images (compared case-insensitively)
pub const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

/// Lazily walks a parsed document and yields image URLs
///
/// Relative and protocol-relative references are resolved against `base`.
/// The iterator borrows the document; calling this again on the same
/// document restarts the sequence.
pub fn image_urls<'a>(document: &'a Html, base: &'a Url) -> impl Iterator<Item = Url> + 'a {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "img")
        .filter_map(|element| element.value().attr("src"))
        .filter_map(move |src| resolve_image(src, base))
}

/// Parses `html` and collects its image URLs
///
/// The parsed document is dropped before returning so the result can be held
/// across await points.
pub fn extract_images(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    image_urls(&document, base).collect()
}

/// Resolves a `src` value and keeps it only if it names a raster image
fn resolve_image(src: &str, base: &Url) -> Option<Url> {
    let src = src.trim();
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }

    let url = base.join(src).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    let path = url.path().to_ascii_lowercase();
    if IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        Some(url)
    } else {
        None
    }
}
