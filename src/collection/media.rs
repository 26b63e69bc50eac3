// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Card artwork and Discord emoji markup

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Image served when a card has no usable artwork
pub const CARD_PLACEHOLDER: &str = "/images/card_placeholder.png";

const EMOJI_CDN_BASE: &str = "https://cdn.discordapp.com/emojis";

static IMAGE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(png|jpg|jpeg|gif|webp)").expect("valid image regex"));

static EMOJI_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(a?):(\w+):(\d+)>").expect("valid emoji regex"));

/// Cut an image URL right after its first image extension
///
/// Discord attachment links carry signed query strings after the extension;
/// dropping them keeps the URL stable. URLs without an extension are kept.
pub fn trim_image_url(url: &str) -> &str {
    match IMAGE_EXTENSION.find(url) {
        Some(found) => &url[..found.end()],
        None => url,
    }
}

/// Artwork to display for a card
///
/// Discord CDN links expire, so they are replaced like missing images.
pub fn card_image(image: Option<&str>) -> String {
    match image.map(trim_image_url) {
        Some(url) if !url.is_empty() && !url.contains("cdn.discordapp.com") => url.to_string(),
        _ => CARD_PLACEHOLDER.to_string(),
    }
}

/// A piece of text with Discord custom emoji markup resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Text { text: String },
    Emoji { name: String, id: String, animated: bool, url: String },
}

/// Split `<:name:id>` / `<a:name:id>` markup out of `text`
pub fn emoji_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for captures in EMOJI_MARKUP.captures_iter(text) {
        let (Some(whole), Some(name), Some(id)) = (captures.get(0), captures.get(2), captures.get(3))
        else {
            continue;
        };
        if last < whole.start() {
            segments.push(Segment::Text {
                text: text[last..whole.start()].to_string(),
            });
        }
        let animated = captures.get(1).is_some_and(|flag| flag.as_str() == "a");
        let extension = if animated { "gif" } else { "png" };
        segments.push(Segment::Emoji {
            name: name.as_str().to_string(),
            id: id.as_str().to_string(),
            animated,
            url: format!("{}/{}.{}", EMOJI_CDN_BASE, id.as_str(), extension),
        });
        last = whole.end();
    }

    if last < text.len() {
        segments.push(Segment::Text {
            text: text[last..].to_string(),
        });
    }
    segments
}
