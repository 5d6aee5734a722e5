//! SSML document assembly.
//!
//! One `<voice>` element per surviving script line, concatenated in
//! original order inside a single `<speak>` wrapper. Element shapes:
//!
//! | Line | Markup |
//! |------|--------|
//! | tagged primary | voice + `express-as` style + 0 ms sentence-boundary silence |
//! | tagged secondary | voice + 0 ms sentence-boundary silence, no style |
//! | untagged (fallback) | primary voice + style, no silence override |
//!
//! The silence hint suppresses the engine's robotic pause between
//! sentences of back-and-forth dialogue.

use crate::config::VoiceConfig;

use super::speaker::{classify_line, Speaker};

/// Transform a raw script into a complete SSML document.
///
/// Pure and deterministic; never fails. Lines are split on line feeds,
/// blank lines dropped, and each remaining line becomes one utterance for
/// the voice its tag selects (primary voice for untagged lines).
pub fn to_ssml(script: &str, voices: &VoiceConfig) -> String {
    let mut doc = String::with_capacity(script.len() + 256);
    doc.push_str(&format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' \
         xmlns:mstts='https://www.w3.org/2001/mstts' xml:lang='{}'>",
        voices.language
    ));

    for raw in script.lines() {
        let Some(line) = classify_line(raw) else {
            continue;
        };
        let text = escape_text(line.text);
        match (line.speaker, line.tagged) {
            (Speaker::Primary, true) => doc.push_str(&format!(
                "<voice name='{}'><mstts:express-as style='{}'>\
                 <mstts:silence type='Sentenceboundary' value='0ms'/>{}\
                 </mstts:express-as></voice>",
                voices.primary, voices.primary_style, text
            )),
            (Speaker::Secondary, _) => doc.push_str(&format!(
                "<voice name='{}'><mstts:silence type='Sentenceboundary' value='0ms'/>{}</voice>",
                voices.secondary, text
            )),
            (Speaker::Primary, false) => doc.push_str(&format!(
                "<voice name='{}'><mstts:express-as style='{}'>{}</mstts:express-as></voice>",
                voices.primary, voices.primary_style, text
            )),
        }
    }

    doc.push_str("</speak>");
    doc
}

/// Escape the XML text-node metacharacters.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
