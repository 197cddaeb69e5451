//! Slide navigation for presenting a report's deck

use super::record::Slide;

/// Position within a slide deck.
///
/// Moving past either end is a no-op rather than wrapping around.
#[derive(Debug, Clone)]
pub struct SlideCursor<'a> {
    slides: &'a [Slide],
    current: usize,
}

impl<'a> SlideCursor<'a> {
    pub fn new(slides: &'a [Slide]) -> Self {
        Self { slides, current: 0 }
    }

    pub fn current(&self) -> Option<&'a Slide> {
        self.slides.get(self.current)
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.slides.len()
    }

    /// Advance one slide; returns false when already on the last one
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Go back one slide; returns false when already on the first one
    pub fn prev(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to a slide; out-of-range indexes are ignored
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.slides.len() {
            return false;
        }
        self.current = index;
        true
    }

    /// "Slide 2 of 4"
    pub fn position(&self) -> String {
        if self.is_empty() {
            return "No slides".to_string();
        }
        format!("Slide {} of {}", self.current + 1, self.slides.len())
    }

    /// Percent of the deck already passed, rounded down
    pub fn progress(&self) -> u32 {
        match self.slides.len() {
            0 => 0,
            1 => 100,
            n => (self.current * 100 / (n - 1)) as u32,
        }
    }
}
