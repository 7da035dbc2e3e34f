//! Number recognition: text → integer / ordinal / decimal.
//!
//! The pipeline treats number recognition as an opaque service behind
//! [`NumberRecognizer`]. [`EnglishNumbers`] covers what English temporal
//! phrases need: digits, decimals, cardinal words up to ninety-nine and
//! ordinals up to thirty-first.

pub trait NumberRecognizer: Send + Sync {
    fn integer(&self, text: &str) -> Option<i64>;

    fn ordinal(&self, text: &str) -> Option<i64>;

    fn decimal(&self, text: &str) -> Option<f64> {
        self.integer(text).map(|n| n as f64)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishNumbers;

impl NumberRecognizer for EnglishNumbers {
    fn integer(&self, text: &str) -> Option<i64> {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return None;
        }
        if text.chars().all(|c| c.is_ascii_digit() || c == ',') {
            return text.replace(',', "").parse().ok();
        }
        parse_cardinal_words(&text)
    }

    fn ordinal(&self, text: &str) -> Option<i64> {
        let text = text.trim().to_lowercase();
        for suffix in ["st", "nd", "rd", "th"] {
            if let Some(digits) = text.strip_suffix(suffix) {
                if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                    return digits.parse().ok();
                }
            }
        }
        let words: Vec<&str> = text
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|w| !w.is_empty())
            .collect();
        match words.as_slice() {
            [single] => ordinal_word(single),
            [tens, unit] => Some(tens_word(tens)? + ordinal_word(unit).filter(|u| *u < 10)?),
            _ => None,
        }
    }

    fn decimal(&self, text: &str) -> Option<f64> {
        let trimmed = text.trim();
        if let Ok(value) = trimmed.parse::<f64>() {
            return value.is_finite().then_some(value);
        }
        self.integer(trimmed).map(|n| n as f64)
    }
}

fn parse_cardinal_words(text: &str) -> Option<i64> {
    let mut total = 0i64;
    let mut seen = false;
    for word in text
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|w| !w.is_empty() && *w != "and")
    {
        let value = unit_word(word).or_else(|| tens_word(word))?;
        total += value;
        seen = true;
    }
    seen.then_some(total)
}

fn unit_word(word: &str) -> Option<i64> {
    let value = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        _ => return None,
    };
    Some(value)
}

fn tens_word(word: &str) -> Option<i64> {
    let value = match word {
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        _ => return None,
    };
    Some(value)
}

fn ordinal_word(word: &str) -> Option<i64> {
    let value = match word {
        "first" => 1,
        "second" => 2,
        "third" => 3,
        "fourth" => 4,
        "fifth" => 5,
        "sixth" => 6,
        "seventh" => 7,
        "eighth" => 8,
        "ninth" => 9,
        "tenth" => 10,
        "eleventh" => 11,
        "twelfth" => 12,
        "thirteenth" => 13,
        "fourteenth" => 14,
        "fifteenth" => 15,
        "sixteenth" => 16,
        "seventeenth" => 17,
        "eighteenth" => 18,
        "nineteenth" => 19,
        "twentieth" => 20,
        "thirtieth" => 30,
        _ => return None,
    };
    Some(value)
}
