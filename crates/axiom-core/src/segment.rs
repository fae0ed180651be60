// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! The content segmenter: splits a reply string with interleaved prose and
//! math notation into an ordered list of renderable segments.
//!
//! The scanner walks the input left to right.  At every position it tries the
//! four delimiter forms in a fixed priority order (`$$` before `$`, because
//! the former is a prefix of the latter) and takes the *shortest* span to the
//! matching closer.  A delimiter whose closer never appears is not an error:
//! the scanner moves on one character and the delimiter stays in the plain
//! text verbatim, so the pass always terminates and reproduces unmatched
//! input exactly.

/// Display class of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Prose, displayed verbatim.
    Plain,
    /// Math notation rendered in inline mode (`$ … $` or `\( … \)`).
    InlineMath,
    /// Math notation rendered in display/block mode (`$$ … $$` or `\[ … \]`).
    BlockMath,
}

/// One classified chunk of a message body, in display order.
///
/// For math kinds the delimiters are stripped and the interior trimmed of
/// surrounding whitespace; plain text is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSegment {
    pub kind: SegmentKind,
    pub text: String,
}

impl MathSegment {
    fn plain(text: &str) -> Self {
        Self { kind: SegmentKind::Plain, text: text.to_string() }
    }

    fn math(kind: SegmentKind, body: &str) -> Self {
        Self { kind, text: body.trim().to_string() }
    }

    /// True for both math kinds.
    pub fn is_math(&self) -> bool {
        self.kind != SegmentKind::Plain
    }
}

/// Delimiter forms in priority order.  `$$` must come before `$` so a block
/// opener is never misread as two inline openers; the backslash forms have
/// unambiguous prefixes but keep the documented order anyway.
const DELIMITERS: [(&str, &str, SegmentKind); 4] = [
    ("$$", "$$", SegmentKind::BlockMath),
    ("\\[", "\\]", SegmentKind::BlockMath),
    ("$", "$", SegmentKind::InlineMath),
    ("\\(", "\\)", SegmentKind::InlineMath),
];

/// Split `input` into an ordered sequence of plain and math segments.
///
/// Pure and total: identical input yields identical output, any finite input
/// terminates, and empty input yields an empty sequence.  Math spans may
/// contain newlines.  Adjacent math spans produce consecutive math segments
/// with no empty plain segment between them.
pub fn segment(input: &str) -> Vec<MathSegment> {
    let mut out = Vec::new();
    let mut plain_start = 0; // start of not-yet-flushed plain text
    let mut pos = 0;

    while pos < input.len() {
        match math_span_at(input, pos) {
            Some((kind, body_start, body_end, span_end)) => {
                if plain_start < pos {
                    out.push(MathSegment::plain(&input[plain_start..pos]));
                }
                out.push(MathSegment::math(kind, &input[body_start..body_end]));
                pos = span_end;
                plain_start = pos;
            }
            None => {
                // No delimiter matches here; the character belongs to the
                // current plain run.
                pos += input[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    if plain_start < input.len() {
        out.push(MathSegment::plain(&input[plain_start..]));
    }
    out
}

/// Try each delimiter form at byte offset `pos`, in priority order.
///
/// A form matches only when both its opener starts at `pos` and its closer
/// occurs later in the input; the first such form wins and the shortest body
/// is taken.  Returns `(kind, body_start, body_end, span_end)` byte offsets.
fn math_span_at(input: &str, pos: usize) -> Option<(SegmentKind, usize, usize, usize)> {
    let rest = &input[pos..];
    for (open, close, kind) in DELIMITERS {
        if !rest.starts_with(open) {
            continue;
        }
        let body_start = pos + open.len();
        // Non-greedy: the first closer after the opener ends the span.
        if let Some(rel) = input[body_start..].find(close) {
            let body_end = body_start + rel;
            return Some((kind, body_start, body_end, body_end + close.len()));
        }
        // Unterminated opener: lower-priority forms still get a chance
        // (e.g. "$$x$" has no "$$" closer but does close a "$" span).
    }
    None
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(t: &str) -> MathSegment {
        MathSegment { kind: SegmentKind::Plain, text: t.into() }
    }
    fn inline(t: &str) -> MathSegment {
        MathSegment { kind: SegmentKind::InlineMath, text: t.into() }
    }
    fn block(t: &str) -> MathSegment {
        MathSegment { kind: SegmentKind::BlockMath, text: t.into() }
    }

    // ── Plain input ───────────────────────────────────────────────────────────

    #[test]
    fn empty_input_yields_no_segments() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn input_without_delimiters_is_one_plain_segment() {
        assert_eq!(segment("just explain it"), vec![plain("just explain it")]);
    }

    #[test]
    fn unicode_plain_text_survives_verbatim() {
        let s = "angles: α, β and γ";
        assert_eq!(segment(s), vec![plain(s)]);
    }

    // ── Inline math ───────────────────────────────────────────────────────────

    #[test]
    fn inline_dollar_in_prose() {
        assert_eq!(
            segment("solve $2x=4$ now"),
            vec![plain("solve "), inline("2x=4"), plain(" now")]
        );
    }

    #[test]
    fn inline_paren_form() {
        assert_eq!(
            segment(r"area is \(\pi r^2\) here"),
            vec![plain("area is "), inline(r"\pi r^2"), plain(" here")]
        );
    }

    #[test]
    fn inline_math_interior_is_trimmed() {
        assert_eq!(segment("$  x+1 $"), vec![inline("x+1")]);
    }

    // ── Block math ────────────────────────────────────────────────────────────

    #[test]
    fn double_dollar_block_alone() {
        assert_eq!(segment("$$a+b$$"), vec![block("a+b")]);
    }

    #[test]
    fn bracket_block_form() {
        assert_eq!(
            segment(r"start \[x^2 - 1\] end"),
            vec![plain("start "), block("x^2 - 1"), plain(" end")]
        );
    }

    #[test]
    fn block_math_spans_newlines() {
        assert_eq!(
            segment("$$\nx = 1\ny = 2\n$$"),
            vec![block("x = 1\ny = 2")]
        );
    }

    #[test]
    fn double_dollar_wins_over_single() {
        // "$$a$$" must be one block segment, not inline "" + plain "a" + ...
        assert_eq!(segment("before $$a$$ after"),
            vec![plain("before "), block("a"), plain(" after")]);
    }

    // ── Degenerate spans ──────────────────────────────────────────────────────

    #[test]
    fn empty_block_span_is_emitted() {
        assert_eq!(segment("$$$$"), vec![block("")]);
    }

    #[test]
    fn whitespace_only_span_trims_to_empty() {
        assert_eq!(segment("$   $"), vec![inline("")]);
    }

    #[test]
    fn adjacent_spans_have_no_plain_between() {
        assert_eq!(
            segment("$a$$b$"),
            vec![inline("a"), inline("b")]
        );
    }

    #[test]
    fn adjacent_block_then_inline() {
        assert_eq!(
            segment("$$a$$$b$"),
            vec![block("a"), inline("b")]
        );
    }

    // ── Unterminated delimiters ───────────────────────────────────────────────

    #[test]
    fn unterminated_dollar_stays_plain() {
        assert_eq!(segment("cost is $5"), vec![plain("cost is $5")]);
    }

    #[test]
    fn unterminated_opener_after_valid_span() {
        assert_eq!(
            segment("$x$ and then $5 left"),
            vec![inline("x"), plain(" and then $5 left")]
        );
    }

    #[test]
    fn unterminated_bracket_form_stays_plain() {
        assert_eq!(segment(r"see \[x here"), vec![plain(r"see \[x here")]);
    }

    #[test]
    fn lone_trailing_dollar_terminates() {
        assert_eq!(segment("done$"), vec![plain("done$")]);
    }

    // ── Determinism / reconstruction invariant ────────────────────────────────

    #[test]
    fn segmentation_is_deterministic() {
        let s = "mixed $a$ and $$b$$ and \\(c\\) text";
        assert_eq!(segment(s), segment(s));
    }

    #[test]
    fn plain_segments_reproduce_source_text() {
        // Concatenating plain segments around the math spans reproduces the
        // original up to delimiter normalization.
        let segs = segment("one $x$ two $$y$$ three");
        let plains: Vec<&str> = segs
            .iter()
            .filter(|s| s.kind == SegmentKind::Plain)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(plains, vec!["one ", " two ", " three"]);
    }
}
