use anyhow::Result;
use serde::Serialize;
use vitrine_model::prelude::{Artwork, ArtworkSummary, Exhibition};

pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn summary_line(summary: &ArtworkSummary) -> String {
    let mut line = format!("{:<12} {}", summary.id, summary.title);
    if let Some(artist) = summary.artist.as_deref() {
        line.push_str(" | ");
        line.push_str(artist);
    }
    if let Some(date) = summary.date.as_deref() {
        line.push_str(" (");
        line.push_str(date);
        line.push(')');
    }
    line
}

pub fn summaries(items: &[ArtworkSummary], as_json: bool) -> Result<()> {
    if as_json {
        return json(items);
    }
    if items.is_empty() {
        println!("No artworks found.");
        return Ok(());
    }
    for item in items {
        println!("{}", summary_line(item));
    }
    println!("{} artwork(s)", items.len());
    Ok(())
}

pub fn artwork(artwork: &Artwork, as_json: bool) -> Result<()> {
    if as_json {
        return json(artwork);
    }
    println!("{} [{}/{}]", artwork.title, artwork.source, artwork.id);
    let details = [
        ("Artist", &artwork.artist),
        ("Date", &artwork.date),
        ("Medium", &artwork.medium),
        ("Category", &artwork.category),
        ("Dimensions", &artwork.dimensions),
        ("Credit", &artwork.credit_line),
        ("Image", &artwork.image_id),
    ];
    for (label, value) in details {
        if let Some(value) = value {
            println!("  {label:<11}{value}");
        }
    }
    if let Some(description) = &artwork.description {
        println!();
        println!("{description}");
    }
    Ok(())
}

pub fn exhibition_line(exhibition: &Exhibition) -> String {
    format!(
        "{}  {} ({} artwork{})",
        exhibition.id,
        exhibition.name,
        exhibition.artworks.len(),
        if exhibition.artworks.len() == 1 { "" } else { "s" }
    )
}

pub fn exhibitions(items: &[Exhibition], as_json: bool) -> Result<()> {
    if as_json {
        return json(items);
    }
    if items.is_empty() {
        println!("No exhibitions yet.");
    }
    for item in items {
        println!("{}", exhibition_line(item));
    }
    Ok(())
}

pub fn exhibition(exhibition: &Exhibition, as_json: bool) -> Result<()> {
    if as_json {
        return json(exhibition);
    }
    println!("{}", exhibition_line(exhibition));
    if let Some(description) = &exhibition.description {
        println!("  {description}");
    }
    for artwork in &exhibition.artworks {
        println!("  - {}/{}", artwork.source, artwork.artwork_id);
    }
    Ok(())
}
