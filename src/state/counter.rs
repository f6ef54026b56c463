use std::time::Duration;

/// How a counter value is printed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumberFormat {
    pub prefix: String,
    pub suffix: String,
    pub decimals: usize,
    /// Abbreviate thousands and millions (`12.5K`, `1.2M`).
    pub large: bool,
}

impl NumberFormat {
    pub fn format(&self, value: f64) -> String {
        let body = if self.large && value >= 1_000_000.0 {
            format!("{:.1}M", value / 1_000_000.0)
        } else if self.large && value >= 1_000.0 {
            format!("{:.1}K", value / 1_000.0)
        } else if self.decimals > 0 {
            format!("{:.*}", self.decimals, value)
        } else {
            group_thousands(value.round() as i64)
        };
        format!("{}{}{}", self.prefix, body, self.suffix)
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Animate a number from zero to `target` in equal steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    target: f64,
    steps: u32,
    step: u32,
    duration: Duration,
}

impl Tween {
    pub const DEFAULT_STEPS: u32 = 60;
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

    pub fn new(target: f64) -> Self {
        Self {
            target,
            steps: Self::DEFAULT_STEPS,
            step: 0,
            duration: Self::DEFAULT_DURATION,
        }
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps.max(1);
        self
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Time between two steps.
    pub fn frame(&self) -> Duration {
        self.duration / self.steps
    }

    pub fn current(&self) -> f64 {
        if self.is_done() {
            return self.target;
        }
        self.target * f64::from(self.step) / f64::from(self.steps)
    }

    pub fn is_done(&self) -> bool {
        self.step >= self.steps
    }

    /// Move one frame forward. Returns false once the target was reached.
    pub fn tick(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.step += 1;
        true
    }

    pub fn finish(&mut self) {
        self.step = self.steps;
    }

    pub fn reset(&mut self) {
        self.step = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_target_exactly() {
        let mut t = Tween::new(1234.0).with_steps(7);
        let mut ticks = 0;
        while t.tick() {
            ticks += 1;
        }
        assert_eq!(ticks, 7);
        assert!(t.is_done());
        assert_eq!(t.current(), 1234.0);
    }

    #[test]
    fn test_tween_is_monotonic() {
        let mut t = Tween::new(500.0);
        let mut last = t.current();
        while t.tick() {
            assert!(t.current() >= last);
            last = t.current();
        }
    }

    #[test]
    fn test_frame_duration() {
        assert_eq!(Tween::new(1.0).frame(), Duration::from_millis(2000) / 60);
    }

    #[test]
    fn test_number_format() {
        let plain = NumberFormat::default();
        assert_eq!(plain.format(1234567.0), "1,234,567");
        assert_eq!(plain.format(999.0), "999");

        let large = NumberFormat {
            large: true,
            suffix: "+".into(),
            ..Default::default()
        };
        assert_eq!(large.format(12_500.0), "12.5K+");
        assert_eq!(large.format(1_200_000.0), "1.2M+");
        assert_eq!(large.format(42.0), "42+");

        let pct = NumberFormat {
            decimals: 1,
            suffix: "%".into(),
            ..Default::default()
        };
        assert_eq!(pct.format(99.94), "99.9%");
    }
}
