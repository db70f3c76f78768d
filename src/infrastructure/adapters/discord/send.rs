//! Outbound message splitting

use serenity::http::Http;
use serenity::model::id::ChannelId;

/// Maximum bytes per Discord message (the limit is 2000 characters)
const CHUNK_MAX: usize = 1950;

/// Split `text` into chunks of at most [`CHUNK_MAX`] bytes, preferring
/// newline or space boundaries and never cutting inside a character.
pub fn split_chunks(text: &str) -> Vec<String> {
    if text.len() <= CHUNK_MAX {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut remaining = text;

    while remaining.len() > CHUNK_MAX {
        let mut limit = CHUNK_MAX;
        while !remaining.is_char_boundary(limit) {
            limit -= 1;
        }

        let window = &remaining[..limit];
        let split_at = window
            .rfind('\n')
            .or_else(|| window.rfind(' '))
            .filter(|&i| i > 0)
            .unwrap_or(limit);

        chunks.push(remaining[..split_at].to_string());
        remaining = remaining[split_at..].trim_start();
    }

    if !remaining.is_empty() {
        chunks.push(remaining.to_string());
    }

    chunks
}

/// Send `text` to `channel_id` in chunks
pub async fn send_chunked(http: &Http, channel_id: ChannelId, text: &str) -> Result<(), serenity::Error> {
    for chunk in split_chunks(text) {
        channel_id.say(http, chunk).await?;
    }
    Ok(())
}
