// Transcript parsing
//
// Backend transcripts are plain text, one utterance per line, prefixed with
// the speaker ("AI: ...", "User: ...").

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static USER_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(user|customer):\s*").expect("user prefix regex"));
static AI_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(ai|assistant|agent):\s*").expect("ai prefix regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Ai,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptLine {
    pub speaker: Speaker,
    pub text: String,
}

/// Split a transcript into speaker-tagged lines, skipping blank lines
pub fn parse_transcript(transcript: &str) -> Vec<TranscriptLine> {
    transcript
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            if let Some(m) = USER_PREFIX_RE.find(line) {
                TranscriptLine {
                    speaker: Speaker::User,
                    text: line[m.end()..].to_string(),
                }
            } else if let Some(m) = AI_PREFIX_RE.find(line) {
                TranscriptLine {
                    speaker: Speaker::Ai,
                    text: line[m.end()..].to_string(),
                }
            } else {
                TranscriptLine {
                    speaker: Speaker::Unknown,
                    text: line.to_string(),
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_prefixes() {
        let lines = parse_transcript(
            "AI: Hello, this is Vani.\nUser: Hi\n\nCustomer:   who is this?\nagent: a follow-up\nnoise",
        );
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].speaker, Speaker::Ai);
        assert_eq!(lines[0].text, "Hello, this is Vani.");
        assert_eq!(lines[1].speaker, Speaker::User);
        assert_eq!(lines[1].text, "Hi");
        assert_eq!(lines[2].speaker, Speaker::User);
        assert_eq!(lines[2].text, "who is this?");
        assert_eq!(lines[3].speaker, Speaker::Ai);
        assert_eq!(lines[4].speaker, Speaker::Unknown);
        assert_eq!(lines[4].text, "noise");
    }

    #[test]
    fn test_empty_transcript() {
        assert!(parse_transcript("").is_empty());
        assert!(parse_transcript("\n  \n").is_empty());
    }

    #[test]
    fn test_prefix_requires_colon() {
        let lines = parse_transcript("user said hi");
        assert_eq!(lines[0].speaker, Speaker::Unknown);
    }
}
