//! Count-up animation for the hero statistics.

/// How a stat number is written, inferred from its original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFormat {
    /// `€143B`
    EuroBillions,
    /// `€15K`
    EuroThousands,
    /// `40%`
    Percent,
    /// `€12,500`
    Euro,
    /// `1,200+`
    Plus,
    /// `3M`
    Millions,
    /// `1,200`
    Plain,
}

impl CounterFormat {
    /// Infers the format from the text a stat starts with.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let euro = text.contains('€');
        if euro && text.contains('B') {
            Self::EuroBillions
        } else if euro && text.contains('K') {
            Self::EuroThousands
        } else if text.contains('%') {
            Self::Percent
        } else if euro {
            Self::Euro
        } else if text.contains('+') {
            Self::Plus
        } else if text.contains('M') {
            Self::Millions
        } else {
            Self::Plain
        }
    }

    /// Writes `value` in this format.
    ///
    /// ```
    /// use leadform::effects::CounterFormat;
    ///
    /// assert_eq!(CounterFormat::Euro.format(12500), "€12,500");
    /// assert_eq!(CounterFormat::EuroBillions.format(143), "€143B");
    /// ```
    #[must_use]
    pub fn format(self, value: u64) -> String {
        match self {
            Self::EuroBillions => format!("€{value}B"),
            Self::EuroThousands => format!("€{value}K"),
            Self::Percent => format!("{value}%"),
            Self::Euro => format!("€{}", group_thousands(value)),
            Self::Plus => format!("{}+", group_thousands(value)),
            Self::Millions => format!("{value}M"),
            Self::Plain => group_thousands(value),
        }
    }
}

/// Formats an integer with comma thousands separators.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One running counter.
///
/// The counter climbs linearly from 0 to its target over a fixed number of
/// ticks and then stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCounter {
    target: u64,
    format: CounterFormat,
    ticks: u64,
    elapsed: u64,
}

impl StatCounter {
    /// Builds a counter from the stat's original text.
    ///
    /// The target is every digit in the text read as one integer. Returns
    /// `None` when the text holds no digits.
    #[must_use]
    pub fn from_text(text: &str, duration_ms: u32, tick_ms: u32) -> Option<Self> {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        let target = digits.parse::<u64>().ok()?;
        let ticks = u64::from(duration_ms.div_ceil(tick_ms.max(1))).max(1);
        Some(Self {
            target,
            format: CounterFormat::detect(text),
            ticks,
            elapsed: 0,
        })
    }

    /// Final value.
    #[must_use]
    pub const fn target(&self) -> u64 {
        self.target
    }

    /// Detected display format.
    #[must_use]
    pub const fn format(&self) -> CounterFormat {
        self.format
    }

    /// Returns true once the target has been shown.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.elapsed >= self.ticks
    }

    /// Advances one tick and returns the text to display.
    ///
    /// Returns `None` after the final value has been produced.
    pub fn tick(&mut self) -> Option<String> {
        if self.is_done() {
            return None;
        }
        self.elapsed += 1;
        Some(self.format.format(self.current()))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn current(&self) -> u64 {
        let scaled = u128::from(self.target) * u128::from(self.elapsed) / u128::from(self.ticks);
        scaled.min(u128::from(self.target)) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_formats() {
        assert_eq!(CounterFormat::detect("€143B"), CounterFormat::EuroBillions);
        assert_eq!(CounterFormat::detect("€15K"), CounterFormat::EuroThousands);
        assert_eq!(CounterFormat::detect("40%"), CounterFormat::Percent);
        assert_eq!(CounterFormat::detect("€2,500"), CounterFormat::Euro);
        assert_eq!(CounterFormat::detect("500+"), CounterFormat::Plus);
        assert_eq!(CounterFormat::detect("3M"), CounterFormat::Millions);
        assert_eq!(CounterFormat::detect("1200"), CounterFormat::Plain);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_counter_runs_to_target() {
        let mut counter = StatCounter::from_text("€2,500", 2000, 16).unwrap();
        assert_eq!(counter.target(), 2500);

        let mut last = None;
        let mut ticks = 0;
        while let Some(text) = counter.tick() {
            last = Some(text);
            ticks += 1;
        }
        assert_eq!(ticks, 125);
        assert_eq!(last.as_deref(), Some("€2,500"));
        assert!(counter.is_done());
        assert_eq!(counter.tick(), None);
    }

    #[test]
    fn test_counter_is_monotonic() {
        let mut counter = StatCounter::from_text("87%", 100, 16).unwrap();
        let mut previous = 0;
        while let Some(text) = counter.tick() {
            let value: u64 = text.trim_end_matches('%').parse().unwrap();
            assert!(value >= previous);
            previous = value;
        }
        assert_eq!(previous, 87);
    }

    #[test]
    fn test_text_without_digits() {
        assert!(StatCounter::from_text("∞", 2000, 16).is_none());
    }

    #[test]
    fn test_zero_tick_does_not_divide_by_zero() {
        let mut counter = StatCounter::from_text("10", 0, 0).unwrap();
        assert_eq!(counter.tick().as_deref(), Some("10"));
        assert!(counter.is_done());
    }
}
