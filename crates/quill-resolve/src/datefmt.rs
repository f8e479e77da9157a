//! Moment-style date format rendering and parsing.
//!
//! Daily-note settings carry formats in the moment.js token dialect
//! (`YYYY-MM-DD` and friends), not strftime. The supported subset:
//!
//! | token  | meaning            |
//! |--------|--------------------|
//! | `YYYY` | 4-digit year       |
//! | `YY`   | 2-digit year (2000-2099) |
//! | `MM`   | zero-padded month  |
//! | `M`    | month, no padding  |
//! | `DD`   | zero-padded day    |
//! | `D`    | day, no padding    |
//!
//! `[...]` escapes a literal run; any other character matches itself.
//!
//! [`parse`] is strict: the parsed date is re-rendered and compared against
//! the input, so anything `render` would not have produced is rejected. No
//! clamping, no partial parses.

use chrono::NaiveDate;

/// One element of a compiled format string.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Year4,
    Year2,
    Month2,
    Month1,
    Day2,
    Day1,
    Literal(String),
}

fn compile(format: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let chars: Vec<char> = format.chars().collect();
    let mut literal = String::new();
    let mut i = 0;
    while i < chars.len() {
        let push_literal = |pieces: &mut Vec<Piece>, literal: &mut String| {
            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(literal)));
            }
        };
        let run = |chars: &[char], i: usize, c: char| {
            chars[i..].iter().take_while(|&&x| x == c).count()
        };
        match chars[i] {
            '[' => {
                push_literal(&mut pieces, &mut literal);
                let mut j = i.saturating_add(1);
                while j < chars.len() && chars[j] != ']' {
                    literal.push(chars[j]);
                    j = j.saturating_add(1);
                }
                push_literal(&mut pieces, &mut literal);
                i = j.saturating_add(1);
            }
            'Y' => {
                push_literal(&mut pieces, &mut literal);
                let n = run(&chars, i, 'Y');
                pieces.push(if n >= 4 { Piece::Year4 } else { Piece::Year2 });
                i = i.saturating_add(n);
            }
            'M' => {
                push_literal(&mut pieces, &mut literal);
                let n = run(&chars, i, 'M');
                pieces.push(if n >= 2 { Piece::Month2 } else { Piece::Month1 });
                i = i.saturating_add(n);
            }
            'D' => {
                push_literal(&mut pieces, &mut literal);
                let n = run(&chars, i, 'D');
                pieces.push(if n >= 2 { Piece::Day2 } else { Piece::Day1 });
                i = i.saturating_add(n);
            }
            c => {
                literal.push(c);
                i = i.saturating_add(1);
            }
        }
    }
    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    pieces
}

/// Render a date under a moment-style format.
#[must_use]
pub fn render(date: NaiveDate, format: &str) -> String {
    use chrono::Datelike;
    let mut out = String::new();
    for piece in compile(format) {
        match piece {
            Piece::Year4 => out.push_str(&format!("{:04}", date.year())),
            Piece::Year2 => out.push_str(&format!("{:02}", date.year().rem_euclid(100))),
            Piece::Month2 => out.push_str(&format!("{:02}", date.month())),
            Piece::Month1 => out.push_str(&date.month().to_string()),
            Piece::Day2 => out.push_str(&format!("{:02}", date.day())),
            Piece::Day1 => out.push_str(&date.day().to_string()),
            Piece::Literal(lit) => out.push_str(&lit),
        }
    }
    out
}

/// Parse a date string against a moment-style format. Strict: succeeds only
/// for strings that [`render`] itself would produce.
#[must_use]
pub fn parse(text: &str, format: &str) -> Option<NaiveDate> {
    let pieces = compile(format);
    let bytes = text.as_bytes();
    let mut pos = 0usize;
    let mut year: Option<i32> = None;
    let mut month: Option<u32> = None;
    let mut day: Option<u32> = None;

    let take_digits = |bytes: &[u8], pos: usize, min: usize, max: usize| -> Option<(u32, usize)> {
        let mut end = pos;
        while end < bytes.len()
            && end.checked_sub(pos)? < max
            && bytes[end].is_ascii_digit()
        {
            end = end.checked_add(1)?;
        }
        let count = end.checked_sub(pos)?;
        if count < min {
            return None;
        }
        let value: u32 = std::str::from_utf8(&bytes[pos..end]).ok()?.parse().ok()?;
        Some((value, end))
    };

    for piece in &pieces {
        match piece {
            Piece::Year4 => {
                let (v, next) = take_digits(bytes, pos, 4, 4)?;
                year = Some(i32::try_from(v).ok()?);
                pos = next;
            }
            Piece::Year2 => {
                let (v, next) = take_digits(bytes, pos, 2, 2)?;
                year = Some(i32::try_from(v).ok()?.checked_add(2000)?);
                pos = next;
            }
            Piece::Month2 => {
                let (v, next) = take_digits(bytes, pos, 2, 2)?;
                month = Some(v);
                pos = next;
            }
            Piece::Month1 => {
                let (v, next) = take_digits(bytes, pos, 1, 2)?;
                month = Some(v);
                pos = next;
            }
            Piece::Day2 => {
                let (v, next) = take_digits(bytes, pos, 2, 2)?;
                day = Some(v);
                pos = next;
            }
            Piece::Day1 => {
                let (v, next) = take_digits(bytes, pos, 1, 2)?;
                day = Some(v);
                pos = next;
            }
            Piece::Literal(lit) => {
                let end = pos.checked_add(lit.len())?;
                if bytes.get(pos..end)? != lit.as_bytes() {
                    return None;
                }
                pos = end;
            }
        }
    }

    if pos != bytes.len() {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(year?, month?, day?)?;
    // Round-trip guard: reject zero-padded-vs-not mismatches and any other
    // string render would not have produced.
    if render(date, format) != text {
        return None;
    }
    Some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_render_iso() {
        assert_eq!(render(date(2023, 5, 9), "YYYY-MM-DD"), "2023-05-09");
    }

    #[test]
    fn test_render_unpadded() {
        assert_eq!(render(date(2023, 5, 9), "D.M.YYYY"), "9.5.2023");
    }

    #[test]
    fn test_render_literal_brackets() {
        assert_eq!(
            render(date(2023, 5, 9), "[Daily] YYYY-MM-DD"),
            "Daily 2023-05-09"
        );
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(
            parse("2023-05-09", "YYYY-MM-DD"),
            Some(date(2023, 5, 9))
        );
    }

    #[test]
    fn test_parse_rejects_out_of_format() {
        assert_eq!(parse("2023/05/09", "YYYY-MM-DD"), None);
        assert_eq!(parse("2023-5-9", "YYYY-MM-DD"), None);
        assert_eq!(parse("2023-05-09x", "YYYY-MM-DD"), None);
        assert_eq!(parse("", "YYYY-MM-DD"), None);
    }

    #[test]
    fn test_parse_rejects_invalid_date() {
        // Well-formed digits, impossible date: no clamping.
        assert_eq!(parse("2023-02-30", "YYYY-MM-DD"), None);
        assert_eq!(parse("2023-13-01", "YYYY-MM-DD"), None);
    }

    #[test]
    fn test_roundtrip_across_year() {
        let mut d = date(2023, 1, 1);
        for _ in 0..365 {
            for fmt in ["YYYY-MM-DD", "D.M.YYYY", "YYYYMMDD", "DD MM YY"] {
                let rendered = render(d, fmt);
                assert_eq!(parse(&rendered, fmt), Some(d), "format {fmt}: {rendered}");
            }
            d = d.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(render(date(2023, 5, 9), "YY-MM-DD"), "23-05-09");
        assert_eq!(parse("23-05-09", "YY-MM-DD"), Some(date(2023, 5, 9)));
    }
}
