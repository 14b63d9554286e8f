use regex::Regex;

use crate::error::{MineError, MineResult};

/// How a single line participates in block detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// No alphanumeric content at all. Neither extends nor breaks a block
    /// and does not count against patience.
    Skip,
    /// Contains at least one column gap: a run of `space`-or-more spaces
    /// immediately followed by an alphanumeric character.
    Tabular,
    /// Real text that does not look tabular.
    Plain,
}

/// Classifies lines under a fixed space threshold.
///
/// The gap pattern is compiled once per classifier so detection over a
/// large document does not rebuild it per line.
pub struct GapClassifier {
    space: usize,
    gap: Regex,
}

impl GapClassifier {
    pub fn new(space: usize) -> MineResult<Self> {
        if space < 1 {
            return Err(MineError::configuration(format!(
                "space must be >= 1, got {}",
                space
            )));
        }
        // Some content, then the gap, then the start of the next token.
        let pattern = format!(r"(?i).+?[ ]{{{},}}[a-z0-9]", space);
        let gap = Regex::new(&pattern)
            .map_err(|e| MineError::configuration(format!("invalid gap pattern: {}", e)))?;
        Ok(Self { space, gap })
    }

    pub fn space(&self) -> usize {
        self.space
    }

    pub fn classify(&self, line: &str) -> LineClass {
        if !line.chars().any(|c| c.is_ascii_alphanumeric()) {
            return LineClass::Skip;
        }
        if self.gap.is_match(line) {
            LineClass::Tabular
        } else {
            LineClass::Plain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_punctuation_lines_skip() {
        let classifier = GapClassifier::new(3).unwrap();
        assert_eq!(classifier.classify(""), LineClass::Skip);
        assert_eq!(classifier.classify("   "), LineClass::Skip);
        assert_eq!(classifier.classify("-----    ====="), LineClass::Skip);
    }

    #[test]
    fn test_tabular_needs_gap_then_alphanumeric() {
        let classifier = GapClassifier::new(3).unwrap();
        assert_eq!(classifier.classify("Name      Age"), LineClass::Tabular);
        assert_eq!(classifier.classify("Name Age"), LineClass::Plain);
        // Gap followed by punctuation only does not count
        assert_eq!(classifier.classify("Name      ---"), LineClass::Plain);
        // Trailing gap with nothing after it does not count
        assert_eq!(classifier.classify("Name      "), LineClass::Plain);
    }

    #[test]
    fn test_threshold_is_exact() {
        let classifier = GapClassifier::new(3).unwrap();
        assert_eq!(classifier.classify("a  b"), LineClass::Plain);
        assert_eq!(classifier.classify("a   b"), LineClass::Tabular);

        let wide = GapClassifier::new(5).unwrap();
        assert_eq!(wide.classify("a   b"), LineClass::Plain);
        assert_eq!(wide.classify("a     b"), LineClass::Tabular);
    }

    #[test]
    fn test_zero_space_rejected() {
        assert!(GapClassifier::new(0).is_err());
    }
}
