pub mod file;
pub mod stdin;

use clap::Args;

use fin_analyzer_core::extraction::normalize_text;

/// Where the document text comes from
#[derive(Args, Debug)]
pub struct DocumentArgs {
    /// Path to a PDF or plain-text document
    #[arg(long, short = 'f', conflicts_with = "text")]
    pub file: Option<String>,

    /// Document text passed inline
    #[arg(long)]
    pub text: Option<String>,
}

type InputResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Resolve document text from `--text`, `--file`, or piped stdin, in that
/// order. The result is normalized: lines trimmed, blank lines dropped.
pub fn load_document(args: &DocumentArgs) -> InputResult<String> {
    resolve_document(args, stdin::read_stdin)
}

/// An empty pipe is still a document; it resolves to empty text so callers
/// can answer with the no-text placeholder.
fn resolve_document(
    args: &DocumentArgs,
    piped: impl FnOnce() -> InputResult<Option<String>>,
) -> InputResult<String> {
    if let Some(ref text) = args.text {
        return Ok(normalize_text(text));
    }
    if let Some(ref path) = args.file {
        return file::read_document(path);
    }
    match piped()? {
        Some(text) => Ok(normalize_text(&text)),
        None => Err("--file or --text is required (or pipe document text on stdin)".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(text: Option<&str>) -> DocumentArgs {
        DocumentArgs {
            file: None,
            text: text.map(str::to_string),
        }
    }

    #[test]
    fn test_inline_text_is_normalized() {
        let text = resolve_document(&args(Some("  Revenue: 10 \n\n")), || Ok(None)).unwrap();
        assert_eq!(text, "Revenue: 10");
    }

    #[test]
    fn test_empty_pipe_resolves_to_empty_text() {
        let text = resolve_document(&args(None), || Ok(Some(String::new()))).unwrap();
        assert_eq!(text, "");

        let text = resolve_document(&args(None), || Ok(Some(" \n\t\n".into()))).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_no_source_is_an_error() {
        let err = resolve_document(&args(None), || Ok(None)).unwrap_err();
        assert!(err.to_string().starts_with("--file or --text is required"));
    }
}
