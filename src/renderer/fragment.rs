//! Fragment extraction
//!
//! Fragments are complete SVG files; only the markup between the end of the
//! first tag and the last `</svg>` is drawn. Extraction is purely textual and
//! assumes a trusted asset corpus: the first `>` in the file is taken as the
//! end of the opening tag, so a leading XML declaration or comment would leak
//! the real `<svg>` tag into the output. Assets must start with `<svg`.
//! If assets ever come from untrusted sources, replace the body of [`extract`]
//! with a real XML parse and keep the signature.

use thiserror::Error;

const CLOSE_TAG: &str = "</svg>";

/// Errors from extracting fragment markup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FragmentError {
    /// The `<svg>` wrapper could not be located
    #[error("{reason}")]
    Malformed { reason: &'static str },
}

impl FragmentError {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Malformed { reason } => reason,
        }
    }
}

/// Return the inner markup of an SVG file
pub fn extract(raw: &[u8]) -> Result<&str, FragmentError> {
    let text = std::str::from_utf8(raw).map_err(|_| FragmentError::Malformed {
        reason: "fragment is not valid UTF-8",
    })?;

    let start = text.find('>').ok_or(FragmentError::Malformed {
        reason: "missing end of opening tag",
    })?;
    let end = text.rfind(CLOSE_TAG).ok_or(FragmentError::Malformed {
        reason: "missing closing </svg> tag",
    })?;
    if start >= end {
        return Err(FragmentError::Malformed {
            reason: "opening tag does not end before </svg>",
        });
    }

    Ok(&text[start + 1..end])
}
