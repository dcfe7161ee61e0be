//! Text normalization applied to every parsed message.
//!
//! Stages run in a fixed order, each gated by [`PipelineConfig`]:
//!
//! 1. media filtering: messages carrying [`MEDIA_OMITTED`] are dropped
//! 2. emoji canonicalization: glyphs become `:shortcode:`
//! 3. link redaction: `scheme://...` tokens become [`LINK_PLACEHOLDER`]
//!
//! Link redaction always runs, also on URLs glued to the preceding word.
//! The text stages are idempotent.

use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::Message;
use crate::config::PipelineConfig;

/// Placeholder WhatsApp writes in place of attachments.
pub const MEDIA_OMITTED: &str = "<Media omitted>";

/// Replacement text for redacted links.
pub const LINK_PLACEHOLDER: &str = "[LINK]";

/// Longest emoji sequence tried during lookup, in chars.
///
/// Family ZWJ sequences and subdivision flags top out below this.
const MAX_EMOJI_CHARS: usize = 12;

/// Schemes recognised at the end of a glued word, longest first.
const KNOWN_SCHEMES: &[&str] = &["https", "sftp", "ftps", "http", "ftp"];

/// Fitzpatrick modifiers U+1F3FB..U+1F3FF and their shortcode names.
const SKIN_TONES: [(char, &str); 5] = [
    ('\u{1F3FB}', "light"),
    ('\u{1F3FC}', "medium_light"),
    ('\u{1F3FD}', "medium"),
    ('\u{1F3FE}', "medium_dark"),
    ('\u{1F3FF}', "dark"),
];

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-zA-Z][a-zA-Z0-9+.\-]*)://\S+").expect("link pattern is a valid regex")
});

/// Returns `true` if the text contains the media-omitted marker.
pub fn is_media_omitted(text: &str) -> bool {
    text.contains(MEDIA_OMITTED)
}

/// Replaces every `scheme://...` token with `[LINK]`.
///
/// A token ends at the first whitespace character. A URL may start in the
/// middle of a word (`看这个https://...`, `__http://...`). When letters or
/// digits are glued in front of a known scheme they stay in the text
/// (`see1http://a.b` becomes `see1[LINK]`). Otherwise the whole
/// `word://` run counts as the scheme.
///
/// # Example
///
/// ```
/// use chatprep::core::normalize::replace_links;
///
/// assert_eq!(
///     replace_links("Check this out: http://example.com and https://test.com"),
///     "Check this out: [LINK] and [LINK]"
/// );
/// ```
pub fn replace_links(text: &str) -> String {
    LINK_PATTERN
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let scheme = &caps[1];
            let kept = KNOWN_SCHEMES
                .iter()
                .find(|known| {
                    scheme.len() > known.len()
                        && scheme
                            .get(scheme.len() - known.len()..)
                            .is_some_and(|tail| tail.eq_ignore_ascii_case(known))
                })
                .map_or("", |known| &scheme[..scheme.len() - known.len()]);
            format!("{kept}{LINK_PLACEHOLDER}")
        })
        .into_owned()
}

/// Rewrites emoji glyphs to `:shortcode:` form.
///
/// At each position the longest run of chars that forms a known emoji wins,
/// so ZWJ sequences, flags and skin-tone forms are converted as a unit.
/// A skin-toned emoji becomes its base shortcode plus a tone suffix
/// (`👍🏽` is `:+1_medium_skin_tone:`). Emoji without a shortcode are
/// copied through unchanged.
///
/// # Example
///
/// ```
/// use chatprep::core::normalize::demojize;
///
/// assert_eq!(demojize("nice 👍"), "nice :+1:");
/// assert_eq!(demojize("plain text"), "plain text");
/// ```
pub fn demojize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(first) = rest.chars().next() {
        if !may_start_emoji(first) {
            out.push(first);
            rest = &rest[first.len_utf8()..];
            continue;
        }

        match longest_emoji_prefix(rest) {
            Some(len) => {
                let len = len + trailing_tone_len(&rest[len..]);
                let glyph = &rest[..len];
                match shortcode_for(glyph) {
                    Some(code) => {
                        out.push(':');
                        out.push_str(&code);
                        out.push(':');
                    }
                    None => out.push_str(glyph),
                }
                rest = &rest[len..];
            }
            None => {
                out.push(first);
                rest = &rest[first.len_utf8()..];
            }
        }
    }

    out
}

/// ASCII can only open a keycap sequence.
fn may_start_emoji(c: char) -> bool {
    !c.is_ascii() || matches!(c, '#' | '*' | '0'..='9')
}

fn tone_name(c: char) -> Option<&'static str> {
    SKIN_TONES
        .iter()
        .find(|(modifier, _)| *modifier == c)
        .map(|&(_, name)| name)
}

/// Byte length of a skin-tone modifier the emoji table did not absorb.
fn trailing_tone_len(text: &str) -> usize {
    text.chars()
        .next()
        .filter(|&c| tone_name(c).is_some())
        .map_or(0, char::len_utf8)
}

/// Shortcode for one emoji glyph, without the surrounding colons.
///
/// Toned forms fall back to the untoned emoji's shortcode followed by
/// `_<tone>_skin_tone`, or `_<tone>_<tone>_skin_tones` when people in a
/// sequence have different tones.
fn shortcode_for(glyph: &str) -> Option<String> {
    if let Some(code) = emojis::get(glyph).and_then(emojis::Emoji::shortcode) {
        return Some(code.to_owned());
    }

    let mut tones: Vec<&str> = glyph.chars().filter_map(tone_name).collect();
    if tones.is_empty() {
        return None;
    }
    tones.dedup();

    let base: String = glyph.chars().filter(|&c| tone_name(c).is_none()).collect();
    let code = emojis::get(&base).and_then(emojis::Emoji::shortcode)?;
    let suffix = if tones.len() == 1 { "skin_tone" } else { "skin_tones" };
    Some(format!("{code}_{}_{suffix}", tones.join("_")))
}

/// Byte length of the longest emoji at the start of `text`.
fn longest_emoji_prefix(text: &str) -> Option<usize> {
    let ends: Vec<usize> = text
        .char_indices()
        .skip(1)
        .map(|(idx, _)| idx)
        .chain(std::iter::once(text.len()))
        .take(MAX_EMOJI_CHARS)
        .collect();

    ends.into_iter()
        .rev()
        .find(|&end| emojis::get(&text[..end]).is_some())
}

/// Applies the text stages (emoji canonicalization, link redaction) to one
/// message body.
///
/// Idempotent: normalizing already normalized text returns it unchanged.
pub fn normalize_text(text: &str, config: &PipelineConfig) -> String {
    if config.convert_emojis {
        replace_links(&demojize(text))
    } else {
        replace_links(text)
    }
}

/// Runs every normalization stage over `messages`, keeping their order.
///
/// Messages removed by media filtering never reach later stages.
pub fn normalize(messages: Vec<Message>, config: &PipelineConfig) -> Vec<Message> {
    let before = messages.len();

    let normalized: Vec<Message> = messages
        .into_iter()
        .filter(|msg| !(config.remove_media && is_media_omitted(&msg.text)))
        .map(|mut msg| {
            msg.text = normalize_text(&msg.text, config);
            msg
        })
        .collect();

    let dropped = before - normalized.len();
    if dropped > 0 {
        info!(dropped, "removed media placeholder messages");
    }

    normalized
}
