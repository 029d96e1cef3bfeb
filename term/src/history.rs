//! Bounded FIFO of retired lines above the visible page (C7).
//!
//! The system this is modeled on stores history as an intrusive doubly
//! linked list of heap-owned lines; a `VecDeque<Line>` is the
//! language-neutral restatement spec.md's own design notes call out as
//! equivalent ("a bounded FIFO of detached line values, implementation-
//! free to use a ring buffer, a deque, or a linked list"), so `link`/
//! `link_tail`/`unlink` have no counterpart here.
use std::collections::VecDeque;

use crate::cell::Age;
use crate::color::Attributes;
use crate::line::Line;

pub struct History {
    lines: VecDeque<Line>,
    max_lines: usize,
}

impl History {
    pub fn new(max_lines: usize) -> History {
        History { lines: VecDeque::new(), max_lines }
    }

    pub fn n_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Evict from the head until `n_lines <= max`, and adopt `max` as the
    /// new cap. `max == 0` means no scroll-back at all.
    pub fn trim(&mut self, max: usize) {
        self.max_lines = max;
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }

    /// Append a retired line at the tail, evicting from the head if that
    /// pushes the count past the cap.
    pub fn push(&mut self, line: Line) {
        self.lines.push_back(line);
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }

    /// Detach the most recently retired line and reserve it to
    /// `reserve_width`, preserving existing content via
    /// `protect_width = min(fill, reserve_width)`. `None` if empty.
    pub fn pop(&mut self, reserve_width: usize, attr: Attributes, age: Age) -> Option<Line> {
        let mut line = self.lines.pop_back()?;
        let protect_width = line.fill().min(reserve_width);
        // Best-effort: popping back into the page is documented as
        // infallible, so an allocation failure here just leaves the line
        // at whatever capacity it already had rather than propagating.
        let _ = line.reserve(reserve_width, attr, age, protect_width);
        line.set_width(reserve_width);
        Some(line)
    }

    /// How many lines could be popped without modifying the list; useful
    /// for resize planning.
    pub fn peek(&self, max: usize) -> usize {
        self.lines.len().min(max)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use k9::assert_equal as assert_eq;

    fn attr() -> Attributes {
        Attributes::default()
    }

    #[test]
    fn push_beyond_cap_evicts_from_head() {
        let mut h = History::new(2);
        h.push(Line::new());
        h.push(Line::new());
        h.push(Line::new());
        assert_eq!(h.n_lines(), 2);
        assert!(h.n_lines() <= h.max_lines());
    }

    #[test]
    fn trim_shrinks_and_adopts_new_cap() {
        let mut h = History::new(10);
        for _ in 0..5 {
            h.push(Line::new());
        }
        h.trim(2);
        assert_eq!(h.n_lines(), 2);
        assert_eq!(h.max_lines(), 2);
    }

    #[test]
    fn pop_on_empty_history_is_none() {
        let mut h = History::new(10);
        assert!(h.pop(80, attr(), 1).is_none());
    }

    #[test]
    fn pop_reserves_to_requested_width_preserving_content() {
        let mut h = History::new(10);
        let mut l = Line::new();
        l.reserve(3, attr(), 0, 0).unwrap();
        l.set_width(3);
        l.write(0, crate::char::Character::set(crate::char::Character::empty(), 'A' as u32), 1, attr(), 1, false);
        h.push(l);

        let popped = h.pop(80, attr(), 2).unwrap();
        assert_eq!(popped.width(), 80);
        let mut scratch = [0u32; crate::char::SCRATCH_LEN];
        assert_eq!(popped.get(0).unwrap().character.resolve(&mut scratch), &['A' as u32]);
        assert!(h.n_lines() == 0);
    }

    #[test]
    fn peek_does_not_modify_the_list() {
        let mut h = History::new(10);
        h.push(Line::new());
        h.push(Line::new());
        assert_eq!(h.peek(1), 1);
        assert_eq!(h.peek(5), 2);
        assert_eq!(h.n_lines(), 2);
    }
}
