//! Stat counter: counts up to a target over a fixed number of frames

/// Total duration of the count in milliseconds
pub const COUNT_DURATION_MS: f64 = 1500.0;
/// Assumed frame interval in milliseconds
pub const FRAME_MS: f64 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterFrame {
    /// Still counting; show this value
    Counting(i64),
    /// Finished; show the target
    Done(i64),
}

impl CounterFrame {
    pub fn value(&self) -> i64 {
        match *self {
            CounterFrame::Counting(v) | CounterFrame::Done(v) => v,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct StatCounter {
    target: i64,
    step: f64,
    current: f64,
    done: bool,
}

impl StatCounter {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            step: target as f64 / (COUNT_DURATION_MS / FRAME_MS),
            current: 0.0,
            done: false,
        }
    }

    /// Parse a `data-target` attribute: leading whitespace, an optional sign,
    /// then the leading digits. Anything after the digits is ignored, so
    /// `"150+"` counts to 150 and `"3.5"` to 3.
    pub fn parse(target: &str) -> Option<Self> {
        let s = target.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        // Saturate instead of failing on absurdly long digit runs
        let magnitude = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
        Some(Self::new(if negative { -magnitude } else { magnitude }))
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn tick(&mut self) -> CounterFrame {
        if self.done {
            return CounterFrame::Done(self.target);
        }
        self.current += self.step;
        if self.current < self.target as f64 {
            CounterFrame::Counting(self.current.floor() as i64)
        } else {
            self.done = true;
            CounterFrame::Done(self.target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_up_and_finishes_on_target() {
        let mut counter = StatCounter::new(100);
        let mut values = Vec::new();
        let mut frames = 0;
        loop {
            frames += 1;
            match counter.tick() {
                CounterFrame::Counting(v) => values.push(v),
                CounterFrame::Done(v) => {
                    assert_eq!(v, 100);
                    break;
                }
            }
        }
        // ceil(1500 / 16) frames
        assert_eq!(frames, 94);
        assert_eq!(values.first(), Some(&1));
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(values.iter().all(|&v| v < 100));
        assert!(counter.is_done());
        assert_eq!(counter.tick(), CounterFrame::Done(100));
    }

    #[test]
    fn test_first_tick_is_displayable() {
        // Shown synchronously when the stat scrolls into view
        assert_eq!(StatCounter::new(1500).tick(), CounterFrame::Counting(16));
        assert_eq!(StatCounter::new(50).tick(), CounterFrame::Counting(0));
    }

    #[test]
    fn test_zero_and_negative_targets_finish_immediately() {
        assert_eq!(StatCounter::new(0).tick(), CounterFrame::Done(0));
        assert_eq!(StatCounter::new(-5).tick(), CounterFrame::Done(-5));
    }

    #[test]
    fn test_parse() {
        assert_eq!(StatCounter::parse(" 42 ").map(|c| c.target()), Some(42));
        assert!(StatCounter::parse("lots").is_none());
        assert!(StatCounter::parse("").is_none());
    }

    #[test]
    fn test_parse_reads_leading_integer() {
        let target = |s: &str| StatCounter::parse(s).map(|c| c.target());
        assert_eq!(target("150+"), Some(150));
        assert_eq!(target("3.5"), Some(3));
        assert_eq!(target("  7px"), Some(7));
        assert_eq!(target("-12%"), Some(-12));
        assert_eq!(target("+8"), Some(8));
        assert_eq!(target("+"), None);
        assert_eq!(target("px7"), None);
        assert_eq!(target(".5"), None);
    }
}
