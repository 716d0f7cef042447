use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1251, WINDOWS_1252};

// ---------------------------------------------------------------------------
// Fallback decode chain
// ---------------------------------------------------------------------------

/// How many leading bytes the statistical detector looks at.
pub const SNIFF_LEN: usize = 10_000;

/// Fixed fallback order tried after the detector's guess, first strict
/// success wins. The last entry is `latin1` in WHATWG terms (resolved to
/// windows-1252): a total single-byte decode, so the chain cannot run dry.
static FALLBACKS: [&Encoding; 3] = [UTF_8, WINDOWS_1251, WINDOWS_1252];

/// A successfully decoded file together with the labels the chain produced.
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    /// Name of the encoding that actually decoded the bytes.
    pub encoding: &'static str,
    /// Name of the encoding the detector guessed from the sniff prefix.
    pub detected: &'static str,
}

impl DecodedText {
    /// True when only the terminal latin1 strategy accepted the bytes.
    /// The parse is kept, but the text may be mojibake.
    pub fn is_last_resort(&self) -> bool {
        self.encoding == WINDOWS_1252.name() && self.detected != WINDOWS_1252.name()
    }
}

/// Statistical best guess over the first [`SNIFF_LEN`] bytes.
pub fn detect(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    let prefix = &bytes[..bytes.len().min(SNIFF_LEN)];
    detector.feed(prefix, bytes.len() <= SNIFF_LEN);
    detector.guess(None, true)
}

/// Decode `bytes`, trying the detected encoding first and then the fixed
/// fallback order. Each attempt is strict: a decode that replaces any byte
/// counts as a failure and the next strategy is tried.
///
/// Returns `None` only if every strategy reports errors, which the total
/// terminal fallback prevents in practice.
pub fn decode_with_fallback(bytes: &[u8]) -> Option<DecodedText> {
    let detected = detect(bytes);

    let mut candidates: Vec<&'static Encoding> = vec![detected];
    for enc in FALLBACKS {
        if !candidates.contains(&enc) {
            candidates.push(enc);
        }
    }

    for candidate in candidates {
        let (text, actual, had_errors) = candidate.decode(bytes);
        if !had_errors {
            return Some(DecodedText {
                text: text.into_owned(),
                encoding: actual.name(),
                detected: detected.name(),
            });
        }
    }
    None
}
