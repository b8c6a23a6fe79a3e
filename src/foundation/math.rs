/// MIDI note number of the tuning reference (A4).
pub const REFERENCE_NOTE: f64 = 69.0;
/// Frequency of [`REFERENCE_NOTE`] in Hz.
pub const REFERENCE_HZ: f64 = 440.0;

/// Convert a frequency in Hz to a fractional MIDI note number.
pub fn freq_to_note(hz: f64) -> f64 {
    REFERENCE_NOTE + 12.0 * (hz / REFERENCE_HZ).log2()
}

/// Convert a fractional MIDI note number to Hz.
pub fn note_to_freq(note: f64) -> f64 {
    REFERENCE_HZ * ((note - REFERENCE_NOTE) / 12.0).exp2()
}
