use std::path::Path;

use anyhow::Result;
use serde_json::json;

use blockslider_core::config::is_slider_enabled;
use blockslider_core::navigation::ItemButton;
use blockslider_core::{AppConfig, SliderConfig};
use blockslider_tui::Deck;

pub fn run(config: &AppConfig, path: &Path, width: u16) -> Result<()> {
    let deck = Deck::load(path)?;
    let screen_size = config.breakpoints.classify(f64::from(width));
    let host = deck.host_context(screen_size);

    let slideable = is_slider_enabled(
        deck.course.as_ref(),
        deck.article.slider.as_ref(),
        host.accessibility_active,
    );
    let resolved = deck
        .article
        .slider
        .as_ref()
        .filter(|_| slideable)
        .map(|settings| SliderConfig::resolve(deck.course.as_ref(), settings));

    let buttons: Vec<ItemButton> = deck
        .article
        .blocks
        .iter()
        .enumerate()
        .map(|(index, block)| ItemButton::new(index, block.title.clone()))
        .collect();

    let report = json!({
        "article": deck.article.id,
        "title": deck.article.title,
        "screen_size": screen_size,
        "direction": host.device.direction,
        "slideable": slideable,
        "enabled_here": resolved.as_ref().is_some_and(|c| c.is_enabled_on(screen_size)),
        "config": resolved,
        "buttons": buttons
            .iter()
            .map(|b| json!({
                "index": b.index,
                "title": b.title,
                "class": b.class_name(),
                "include_number": b.include_number,
            }))
            .collect::<Vec<_>>(),
        "blocks": deck
            .article
            .blocks
            .iter()
            .map(|b| json!({
                "id": b.id,
                "components": b.components,
                "images": b.images.len(),
            }))
            .collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
