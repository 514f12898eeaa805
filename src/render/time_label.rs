//! Time label formatting
//!
//! Patterns use the familiar date-format letters: `H` hour of day (0-23),
//! `k` hour of day (1-24), `h` hour of half-day (1-12), `m` minute and `s`
//! second. Repeating a letter sets the minimum zero-padded width. Anything
//! that is not a letter is copied through, and text inside single quotes is
//! literal (`''` is a single quote).

use chrono::Timelike;

use crate::error::{Result, WatchFaceError};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Hour0To23(usize),
    Hour1To24(usize),
    Hour1To12(usize),
    Minute(usize),
    Second(usize),
    Literal(String),
}

/// A parsed time format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePattern {
    source: String,
    tokens: Vec<Token>,
}

impl TimePattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut tokens = Vec::new();
        let mut chars = pattern.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == '\'' {
                let mut literal = String::new();
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    push_literal(&mut tokens, "'");
                    continue;
                }
                loop {
                    match chars.next() {
                        Some('\'') if chars.peek() == Some(&'\'') => {
                            chars.next();
                            literal.push('\'');
                        }
                        Some('\'') => break,
                        Some(c) => literal.push(c),
                        None => {
                            return Err(WatchFaceError::time_pattern(
                                pattern,
                                "unterminated quoted text",
                            ))
                        }
                    }
                }
                push_literal(&mut tokens, &literal);
                continue;
            }

            if !ch.is_ascii_alphabetic() {
                push_literal(&mut tokens, &ch.to_string());
                continue;
            }

            let mut width = 1;
            while chars.peek() == Some(&ch) {
                chars.next();
                width += 1;
            }
            let token = match ch {
                'H' => Token::Hour0To23(width),
                'k' => Token::Hour1To24(width),
                'h' => Token::Hour1To12(width),
                'm' => Token::Minute(width),
                's' => Token::Second(width),
                other => {
                    return Err(WatchFaceError::time_pattern(
                        pattern,
                        format!("unsupported letter '{}'", other),
                    ))
                }
            };
            tokens.push(token);
        }

        Ok(Self {
            source: pattern.to_string(),
            tokens,
        })
    }

    /// The pattern text this was parsed from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern shows seconds
    pub fn has_seconds(&self) -> bool {
        self.tokens.iter().any(|t| matches!(t, Token::Second(_)))
    }

    /// Format the wall-clock fields of `time`; sub-units are truncated
    pub fn format<T: Timelike>(&self, time: &T) -> String {
        let mut out = String::with_capacity(self.source.len() + 2);
        for token in &self.tokens {
            match token {
                Token::Hour0To23(w) => pad(&mut out, time.hour(), *w),
                Token::Hour1To24(w) => pad(&mut out, if time.hour() == 0 { 24 } else { time.hour() }, *w),
                Token::Hour1To12(w) => pad(&mut out, time.hour12().1, *w),
                Token::Minute(w) => pad(&mut out, time.minute(), *w),
                Token::Second(w) => pad(&mut out, time.second(), *w),
                Token::Literal(text) => out.push_str(text),
            }
        }
        out
    }
}

fn push_literal(tokens: &mut Vec<Token>, text: &str) {
    if let Some(Token::Literal(last)) = tokens.last_mut() {
        last.push_str(text);
    } else {
        tokens.push(Token::Literal(text.to_string()));
    }
}

fn pad(out: &mut String, value: u32, width: usize) {
    out.push_str(&format!("{:0width$}", value, width = width));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_milli_opt(h, m, s, 999).unwrap()
    }

    #[test]
    fn hour_minute_truncates_seconds() {
        let pattern = TimePattern::parse("HH:mm").unwrap();
        assert_eq!(pattern.format(&at(9, 5, 30)), "09:05");
        assert_eq!(pattern.format(&at(9, 5, 59)), "09:05");
        assert!(!pattern.has_seconds());
    }

    #[test]
    fn seconds_are_truncated_not_rounded() {
        let pattern = TimePattern::parse("HH:mm:ss").unwrap();
        assert_eq!(pattern.format(&at(23, 59, 59)), "23:59:59");
        assert!(pattern.has_seconds());
    }

    #[test]
    fn k_hours_run_from_one_to_twenty_four() {
        let pattern = TimePattern::parse("kk:mm:ss").unwrap();
        assert_eq!(pattern.format(&at(0, 0, 7)), "24:00:07");
        assert_eq!(pattern.format(&at(13, 4, 0)), "13:04:00");
    }

    #[test]
    fn twelve_hour_clock_and_single_letter_width() {
        let pattern = TimePattern::parse("h:mm").unwrap();
        assert_eq!(pattern.format(&at(0, 30, 0)), "12:30");
        assert_eq!(pattern.format(&at(15, 7, 0)), "3:07");
    }

    #[test]
    fn quoted_text_is_literal() {
        let pattern = TimePattern::parse("HH'h'mm 'o''clock'").unwrap();
        assert_eq!(pattern.format(&at(7, 45, 0)), "07h45 o'clock");
    }

    #[test]
    fn unknown_letters_are_rejected() {
        let err = TimePattern::parse("HH:mm a").unwrap_err();
        assert!(matches!(err, WatchFaceError::InvalidTimePattern { .. }));
        assert!(TimePattern::parse("'open").is_err());
    }
}
