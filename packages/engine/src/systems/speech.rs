//! Speech System - bubble text composition and chatter gating

use crate::core::random::Rng;
use crate::domain::dialogue::DialogueCategory;
use crate::domain::settings::InteractionFrequency;

/// Who asked the pet to talk. Only idle chatter can be suppressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeechKind {
    Action,
    Chatter,
}

/// Random line from a category pool
pub fn phrase(rng: &mut Rng, category: DialogueCategory) -> &'static str {
    rng.pick(category.phrases()).copied().unwrap_or("")
}

/// Bubble text with an optional leading emoji marker. Blank text says nothing.
pub fn compose(text: &str, marker: Option<&str>) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match marker.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => Some(format!("{} {}", m, text)),
        None => Some(text.to_string()),
    }
}

/// Lower interaction frequency lets fewer chatter lines through
pub fn should_chatter(rng: &mut Rng, freq: InteractionFrequency) -> bool {
    rng.chance(freq.chatter_pass_probability())
}

/// What the bubble currently shows
#[derive(Clone, Debug, Default)]
pub struct SpeechPresenter {
    current: Option<String>,
    /// Lines shown since mount
    pub spoken: u64,
}

impl SpeechPresenter {
    /// Record a new line; returns the text to render
    pub fn present(&mut self, text: &str, marker: Option<&str>) -> Option<String> {
        let line = compose(text, marker)?;
        self.current = Some(line.clone());
        self.spoken += 1;
        Some(line)
    }

    pub fn hide(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_ignored() {
        let mut p = SpeechPresenter::default();
        assert_eq!(p.present("   ", Some("🍞")), None);
        assert_eq!(p.spoken, 0);
        assert_eq!(p.present("hi", Some("🍞")).as_deref(), Some("🍞 hi"));
        assert_eq!(p.current(), Some("🍞 hi"));
        assert!(p.hide());
        assert!(!p.hide());
    }

    #[test]
    fn chatter_rate_follows_frequency() {
        let mut rng = Rng::new(4242);
        let mut passes = |f| (0..10_000).filter(|_| should_chatter(&mut rng, f)).count();
        let high = passes(InteractionFrequency::High);
        let low = passes(InteractionFrequency::Low);
        assert!(high > 7500 && high < 8500, "{}", high);
        assert!(low > 2500 && low < 3500, "{}", low);
    }

    #[test]
    fn phrases_come_from_the_pool() {
        let mut rng = Rng::new(3);
        let line = phrase(&mut rng, DialogueCategory::Peek);
        assert!(DialogueCategory::Peek.phrases().contains(&line));
    }
}
