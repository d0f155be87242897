//! Inspection of captured tool output

/// What a tool's stderr means for the caller
#[derive(Debug, PartialEq, Eq)]
pub enum StderrVerdict {
    Clean,
    /// Contains a known benign warning; carries the trimmed text
    Suppressed(String),
    Failure(String),
}

pub fn classify_stderr(stderr: &str, ignored: &[String]) -> StderrVerdict {
    let text = stderr.trim();
    if text.is_empty() {
        return StderrVerdict::Clean;
    }

    if ignored
        .iter()
        .filter(|snippet| !snippet.is_empty())
        .any(|snippet| text.contains(snippet.as_str()))
    {
        StderrVerdict::Suppressed(text.to_string())
    } else {
        StderrVerdict::Failure(text.to_string())
    }
}

/// True when the word "error" appears on its own, in any case
pub fn mentions_error(text: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|word| word.eq_ignore_ascii_case("error"))
}
