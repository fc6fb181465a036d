// src/utils/html.rs

/// Clean HTML content using the ammonia library.
///
/// Question text and options are rendered by the quiz frontend, so anything an
/// admin submits is passed through a tag whitelist first: safe inline markup
/// (like <b>, <code>) survives while <script>, <iframe> and event-handler
/// attributes are stripped.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
