//! Static font-metric tables for the two PDF builtin fonts used in exports.
//!
//! Character widths are in em units (relative to font size), taken from the
//! standard Helvetica AFM files. Tables cover ASCII 0x20..=0x7E (95 printable
//! characters); index = (char as usize) - 32. Anything outside that range
//! falls back to `average_char_width`.

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// Fonts the PDF assembler draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfFont {
    Helvetica,
    HelveticaBold,
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Width of a string in em units.
    pub fn measure_em(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Width of a string in points at `size_pt`.
    pub fn measure_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_em(s) * size_pt
    }

    /// Greedy word-wrap into lines no wider than `max_width_pt`.
    ///
    /// Words wider than a whole line are split at character boundaries.
    /// Whitespace runs collapse to single spaces. Blank input yields no lines.
    pub fn wrap(&self, s: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        let space_w = self.space_width * size_pt;
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in s.split_whitespace() {
            for piece in self.split_overlong(word, size_pt, max_width_pt) {
                let piece_w = self.measure_pt(&piece, size_pt);
                if current.is_empty() {
                    current_width = piece_w;
                    current = piece;
                } else if current_width + space_w + piece_w > max_width_pt {
                    lines.push(std::mem::take(&mut current));
                    current_width = piece_w;
                    current = piece;
                } else {
                    current.push(' ');
                    current.push_str(&piece);
                    current_width += space_w + piece_w;
                }
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn split_overlong(&self, word: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        if self.measure_pt(word, size_pt) <= max_width_pt {
            return vec![word.to_string()];
        }

        let mut pieces = Vec::new();
        let mut piece = String::new();
        let mut piece_width = 0.0_f32;
        for c in word.chars() {
            let mut buf = [0u8; 4];
            let w = self.measure_pt(c.encode_utf8(&mut buf), size_pt);
            if !piece.is_empty() && piece_width + w > max_width_pt {
                pieces.push(std::mem::take(&mut piece));
                piece_width = 0.0;
            }
            piece.push(c);
            piece_width += w;
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }
}

/// Returns the metric table for the given font.
pub fn get_metrics(font: PdfFont) -> &'static FontMetricTable {
    match font {
        PdfFont::Helvetica => &HELVETICA_TABLE,
        PdfFont::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.611,
    space_width: 0.278,
};

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_single_space() {
        let metrics = get_metrics(PdfFont::Helvetica);
        assert!((metrics.measure_em(" ") - 0.278).abs() < 1e-4);
    }

    #[test]
    fn test_measure_ascii_characters() {
        let metrics = get_metrics(PdfFont::Helvetica);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_em("Rust");
        assert!((width - 2.056).abs() < 1e-3, "got {width}");
        assert!((metrics.measure_pt("Rust", 10.0) - 20.56).abs() < 1e-2);
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let metrics = get_metrics(PdfFont::Helvetica);
        assert!((metrics.measure_em("é") - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_get_metrics_returns_matching_table() {
        // 'b' is 0.556 em regular, 0.611 em bold.
        assert!((get_metrics(PdfFont::HelveticaBold).measure_em("b") - 0.611).abs() < 1e-4);
        assert!((get_metrics(PdfFont::Helvetica).measure_em("b") - 0.556).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Skill Gaps & Learning Paths:";
        let regular = get_metrics(PdfFont::Helvetica).measure_em(text);
        let bold = get_metrics(PdfFont::HelveticaBold).measure_em(text);
        assert!(bold > regular);
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let metrics = get_metrics(PdfFont::Helvetica);
        assert_eq!(metrics.wrap("Led Y.", 12.0, 500.0), vec!["Led Y.".to_string()]);
    }

    #[test]
    fn test_wrap_blank_is_empty() {
        let metrics = get_metrics(PdfFont::Helvetica);
        assert!(metrics.wrap("   ", 12.0, 500.0).is_empty());
    }

    #[test]
    fn test_wrap_respects_width() {
        let metrics = get_metrics(PdfFont::Helvetica);
        let text = "word ".repeat(60);
        let lines = metrics.wrap(&text, 12.0, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(metrics.measure_pt(line, 12.0) <= 200.0, "too wide: {line}");
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.trim_end());
    }

    #[test]
    fn test_wrap_splits_overlong_word() {
        let metrics = get_metrics(PdfFont::Helvetica);
        let word = "x".repeat(200);
        let lines = metrics.wrap(&word, 12.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(metrics.measure_pt(line, 12.0) <= 100.0);
        }
    }
}
