//! Typing-text effect: types a phrase, holds, deletes it, moves on

use std::time::Duration;

pub const START_DELAY: Duration = Duration::from_millis(1500);
pub const TYPE_DELAY: Duration = Duration::from_millis(80);
pub const DELETE_DELAY: Duration = Duration::from_millis(40);
pub const HOLD_DELAY: Duration = Duration::from_millis(2000);
pub const NEXT_DELAY: Duration = Duration::from_millis(400);

/// What to show now and how long to wait before the next tick
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeFrame {
    pub text: String,
    pub delay: Duration,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    roles: Vec<Vec<char>>,
    role: usize,
    chars: usize,
    deleting: bool,
}

impl Typewriter {
    /// `None` when there is nothing to type
    pub fn new<S: AsRef<str>>(roles: &[S]) -> Option<Self> {
        let roles: Vec<Vec<char>> = roles
            .iter()
            .map(|r| r.as_ref().chars().collect::<Vec<_>>())
            .filter(|r| !r.is_empty())
            .collect();
        if roles.is_empty() {
            return None;
        }
        Some(Self {
            roles,
            role: 0,
            chars: 0,
            deleting: false,
        })
    }

    pub fn role_index(&self) -> usize {
        self.role
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn tick(&mut self) -> TypeFrame {
        let current = &self.roles[self.role];

        if self.deleting {
            self.chars = self.chars.saturating_sub(1);
        } else {
            self.chars = (self.chars + 1).min(current.len());
        }
        let text: String = current[..self.chars].iter().collect();

        let mut delay = if self.deleting { DELETE_DELAY } else { TYPE_DELAY };

        if !self.deleting && self.chars == current.len() {
            delay = HOLD_DELAY;
            self.deleting = true;
        } else if self.deleting && self.chars == 0 {
            self.deleting = false;
            self.role = (self.role + 1) % self.roles.len();
            delay = NEXT_DELAY;
        }

        TypeFrame { text, delay }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_roles_rejected() {
        assert!(Typewriter::new::<&str>(&[]).is_none());
        assert!(Typewriter::new(&["", ""]).is_none());
    }

    #[test]
    fn test_full_cycle() {
        let mut tw = Typewriter::new(&["ab", "xyz"]).unwrap();

        let frames: Vec<TypeFrame> = (0..6).map(|_| tw.tick()).collect();
        let texts: Vec<&str> = frames.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["a", "ab", "a", "", "x", "xy"]);

        let delays: Vec<Duration> = frames.iter().map(|f| f.delay).collect();
        assert_eq!(
            delays,
            [TYPE_DELAY, HOLD_DELAY, DELETE_DELAY, NEXT_DELAY, TYPE_DELAY, TYPE_DELAY]
        );
        assert_eq!(tw.role_index(), 1);
    }

    #[test]
    fn test_wraps_to_first_role() {
        let mut tw = Typewriter::new(&["a", "b"]).unwrap();
        // "a" typed, "" deleted, "b" typed, "" deleted
        for _ in 0..4 {
            tw.tick();
        }
        assert_eq!(tw.role_index(), 0);
        assert!(!tw.is_deleting());
        assert_eq!(tw.tick().text, "a");
    }

    #[test]
    fn test_counts_unicode_chars() {
        let mut tw = Typewriter::new(&["héé"]).unwrap();
        assert_eq!(tw.tick().text, "h");
        assert_eq!(tw.tick().text, "hé");
        let last = tw.tick();
        assert_eq!(last.text, "héé");
        assert_eq!(last.delay, HOLD_DELAY);
    }
}
