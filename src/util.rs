/// Utility helpers shared by the fetcher and the CLI output.
///
/// IMPORTANT:
/// - No pipeline logic should live here.
/// - This module must remain lightweight and deterministic.
///

/// Builds the metadata URL of a single token.
///
/// Format:
///     {base_url}/{collection}/{id}.json
///
/// Examples:
/// - ("https://host", "azuki1", 7)  -> "https://host/azuki1/7.json"
/// - ("https://host/", "azuki1", 7) -> "https://host/azuki1/7.json"
///
pub fn token_url(base_url: &str, collection: &str, id: u32) -> String {
    format!(
        "{}/{}/{}.json",
        base_url.trim_end_matches('/'),
        collection.trim_matches('/'),
        id
    )
}

/// Formats a rarity score the way rankings are displayed (5 decimals).
pub fn format_rarity(rarity: f64) -> String {
    format!("{:.5}", rarity)
}
