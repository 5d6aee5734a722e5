//! Speaker classification for tagged script lines.
//!
//! The script writer tags dialogue with a case-sensitive `[NAME]:` prefix.
//! Classification is a tagged-variant parse, not chained string matching,
//! so the fallback policy is explicit: anything that is not a recognised
//! tag belongs to the primary host.

/// Dialogue tag of the lead host.
pub const PRIMARY_TAG: &str = "[MATT]:";
/// Dialogue tag of the color commentator.
pub const SECONDARY_TAG: &str = "[JOSE]:";

// ---------------------------------------------------------------------------
// Speaker
// ---------------------------------------------------------------------------

/// Which synthetic voice a script line is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// The lead host — also the mandatory fallback for untagged lines.
    Primary,
    /// The color commentator.
    Secondary,
}

// ---------------------------------------------------------------------------
// ScriptLine
// ---------------------------------------------------------------------------

/// One classified line of the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine<'a> {
    pub speaker: Speaker,
    /// The spoken text, tag stripped and whitespace trimmed.
    pub text: &'a str,
    /// Whether the line carried a recognised tag. Tagged lines get a
    /// sentence-boundary silence hint in the markup; fallback lines do not.
    pub tagged: bool,
}

/// Classify one raw script line.
///
/// Returns `None` for empty/whitespace-only lines (they are dropped from
/// the markup). Never fails: an unrecognised or missing tag resolves to
/// [`Speaker::Primary`].
pub fn classify_line(raw: &str) -> Option<ScriptLine<'_>> {
    let line = raw.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(rest) = line.strip_prefix(PRIMARY_TAG) {
        return Some(ScriptLine {
            speaker: Speaker::Primary,
            text: rest.trim(),
            tagged: true,
        });
    }
    if let Some(rest) = line.strip_prefix(SECONDARY_TAG) {
        return Some(ScriptLine {
            speaker: Speaker::Secondary,
            text: rest.trim(),
            tagged: true,
        });
    }

    Some(ScriptLine {
        speaker: Speaker::Primary,
        text: line,
        tagged: false,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_tag_is_stripped() {
        let line = classify_line("[MATT]: Welcome to the show!").unwrap();
        assert_eq!(line.speaker, Speaker::Primary);
        assert_eq!(line.text, "Welcome to the show!");
        assert!(line.tagged);
    }

    #[test]
    fn secondary_tag_is_stripped() {
        let line = classify_line("[JOSE]: Tell em, Matt!").unwrap();
        assert_eq!(line.speaker, Speaker::Secondary);
        assert_eq!(line.text, "Tell em, Matt!");
        assert!(line.tagged);
    }

    #[test]
    fn untagged_line_falls_back_to_primary() {
        let line = classify_line("And that's the week.").unwrap();
        assert_eq!(line.speaker, Speaker::Primary);
        assert_eq!(line.text, "And that's the week.");
        assert!(!line.tagged);
    }

    #[test]
    fn unknown_tag_falls_back_to_primary() {
        let line = classify_line("[PRODUCER]: cut to break").unwrap();
        assert_eq!(line.speaker, Speaker::Primary);
        assert_eq!(line.text, "[PRODUCER]: cut to break");
        assert!(!line.tagged);
    }

    #[test]
    fn tags_are_case_sensitive() {
        let line = classify_line("[matt]: hello").unwrap();
        assert_eq!(line.speaker, Speaker::Primary);
        assert!(!line.tagged);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_before_matching() {
        let line = classify_line("   [JOSE]:   Big game!   ").unwrap();
        assert_eq!(line.speaker, Speaker::Secondary);
        assert_eq!(line.text, "Big game!");
    }

    #[test]
    fn blank_lines_are_dropped() {
        assert!(classify_line("").is_none());
        assert!(classify_line("   \t  ").is_none());
    }

    #[test]
    fn tag_only_line_yields_empty_text() {
        let line = classify_line("[MATT]:").unwrap();
        assert_eq!(line.text, "");
        assert!(line.tagged);
    }
}
