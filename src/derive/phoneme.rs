use crate::foundation::error::{PitchError, PitchResult};

/// Symbols whose frequency estimate is too unstable to display.
///
/// Covers voiceless consonants, closures, breaths and silences across the
/// romaji/ARPABET-style inventories hosts commonly emit.
const UNVOICED_SYMBOLS: &[&str] = &[
    "p", "t", "k", "s", "sh", "ch", "ts", "f", "h", "hy", "ky", "py", "th", "hh", "x", "cl",
    "q", "br", "pau", "sil", "SP", "AP",
];

/// Acoustic class of a phoneme for display purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhonemeClass {
    /// Pitch is meaningful.
    Voiced,
    /// Pitch is unstable or absent; frame is blanked.
    Unvoiced,
}

/// Phoneme occupying guide frames `[start_frame, end_frame)`, relative to the guide start.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PhonemeSpan {
    /// Phoneme symbol as emitted by the aligner.
    pub symbol: String,
    /// First frame, inclusive.
    pub start_frame: usize,
    /// Last frame, exclusive.
    pub end_frame: usize,
}

/// Classify a phoneme symbol.
pub fn classify(symbol: &str) -> PhonemeClass {
    let symbol = symbol.trim();
    if UNVOICED_SYMBOLS
        .iter()
        .any(|u| u.eq_ignore_ascii_case(symbol))
    {
        PhonemeClass::Unvoiced
    } else {
        PhonemeClass::Voiced
    }
}

/// Expand phoneme spans into one class per frame.
///
/// The mask is as long as the furthest span end; frames no span covers are unvoiced.
pub fn voicing_mask(spans: &[PhonemeSpan]) -> PitchResult<Vec<PhonemeClass>> {
    if spans.is_empty() {
        return Err(PitchError::inconsistent("phoneme array is empty"));
    }
    let len = spans.iter().map(|s| s.end_frame).max().unwrap_or(0);
    let mut mask = vec![PhonemeClass::Unvoiced; len];
    for span in spans {
        if span.start_frame > span.end_frame {
            return Err(PitchError::inconsistent(format!(
                "phoneme '{}' ends before it starts ({}..{})",
                span.symbol, span.start_frame, span.end_frame
            )));
        }
        mask[span.start_frame..span.end_frame].fill(classify(&span.symbol));
    }
    Ok(mask)
}
