//! A variable-width row of cells (C5).
use crate::cell::{Age, Cell, NULL_AGE};
use crate::char::Character;
use crate::color::Attributes;
use crate::error::TermError;

/// One row of a page or a retired history entry.
///
/// `cells` may be longer than `width`: capacity grown by [`Line::reserve`]
/// is kept around across `set_width` calls so that widening a line back
/// out doesn't need to reallocate. `fill` tracks how much of the visible
/// row, from the left, has ever held non-blank content; it is maintained
/// conservatively (writes push it forward, erase/reset may pull it back)
/// rather than recomputed from scratch on every mutation.
#[derive(Debug, Clone)]
pub struct Line {
    width: usize,
    cells: Vec<Cell>,
    fill: usize,
    age: Age,
}

impl Line {
    pub fn new() -> Line {
        Line { width: 0, cells: Vec::new(), fill: 0, age: NULL_AGE }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn fill(&self) -> usize {
        self.fill
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells[..self.width.min(self.cells.len())]
    }

    pub fn get(&self, x: usize) -> Option<&Cell> {
        if x < self.width {
            self.cells.get(x)
        } else {
            None
        }
    }

    fn bump_age(&mut self, age: Age) {
        if age > self.age {
            self.age = age;
        }
    }

    /// Ensure cell capacity is at least `width`, erasing any newly grown
    /// cells with `attr`/`age`. `protect_width` documents the caller's
    /// intent to preserve the leftmost columns (used when re-reserving a
    /// line popped from history at a new page width); with a `Vec`-backed
    /// line, existing cells are never touched by growth regardless, so
    /// the parameter has no further effect here — it exists for API
    /// parity with callers that reason about it explicitly.
    pub fn reserve(&mut self, width: usize, attr: Attributes, age: Age, _protect_width: usize) -> Result<(), TermError> {
        if self.cells.len() < width {
            self.cells
                .try_reserve(width - self.cells.len())
                .map_err(|_| TermError::Alloc)?;
            self.cells.resize_with(width, || Cell::blank_with(attr, age));
        }
        self.fill = self.fill.min(width);
        self.bump_age(age);
        Ok(())
    }

    /// Change the visible width without reallocating. Widening beyond
    /// prior capacity is clamped; callers that need more room should
    /// `reserve` first.
    pub fn set_width(&mut self, width: usize) {
        self.width = width.min(self.cells.len());
        self.fill = self.fill.min(self.width);
    }

    /// Write `ch` (of display width `cwidth`, 0, 1, or 2) at column `x`.
    /// No-op if `x + cwidth` would exceed the visible width.
    pub fn write(&mut self, x: usize, ch: Character, cwidth: usize, attr: Attributes, age: Age, insert_mode: bool) {
        if x + cwidth > self.width {
            return;
        }

        if insert_mode && cwidth > 0 {
            let tail_start = self.width.saturating_sub(cwidth);
            for i in (x..tail_start).rev() {
                self.cells[i + cwidth] = self.cells[i].clone();
            }
        }

        self.cells[x] = Cell {
            character: ch,
            age,
            attributes: attr,
            cached_width: cwidth as i32,
        };
        if cwidth == 2 {
            self.cells[x + 1] = Cell {
                character: Character::empty(),
                age,
                attributes: attr,
                cached_width: cwidth as i32,
            };
        }

        self.fill = self.fill.max(x + cwidth);
        self.bump_age(age);
    }

    /// Right-shift cells starting at `from` by `num`, blanking the
    /// opened columns. Cells pushed past the visible width are dropped.
    pub fn insert(&mut self, from: usize, num: usize, attr: Attributes, age: Age) {
        if from >= self.width || num == 0 {
            return;
        }
        let num = num.min(self.width - from);
        for i in (from..self.width - num).rev() {
            self.cells[i + num] = self.cells[i].clone();
        }
        for i in from..from + num {
            self.cells[i] = Cell::blank_with(attr, age);
        }
        self.fill = self.width;
        self.bump_age(age);
    }

    /// Left-shift cells from `from + num` into `from`, blanking the
    /// rightmost `num` columns.
    pub fn delete(&mut self, from: usize, num: usize, attr: Attributes, age: Age) {
        if from >= self.width || num == 0 {
            return;
        }
        let num = num.min(self.width - from);
        for i in from..self.width - num {
            self.cells[i] = self.cells[i + num].clone();
        }
        for i in self.width - num..self.width {
            self.cells[i] = Cell::blank_with(attr, age);
        }
        self.fill = self.fill.saturating_sub(num).min(self.width);
        self.bump_age(age);
    }

    /// Combine `ucs4` onto the character already at `x`. A no-op if the
    /// cell is empty: a combining mark needs a base to attach to.
    pub fn append_combchar(&mut self, x: usize, ucs4: u32, age: Age) {
        if x >= self.width {
            return;
        }
        if self.cells[x].character.is_empty() {
            return;
        }
        let base = std::mem::replace(&mut self.cells[x].character, Character::empty());
        self.cells[x].character = Character::merge(base, ucs4);
        self.cells[x].age = age;
        self.bump_age(age);
    }

    /// Blank `num` cells starting at `from`. `keep_protected` leaves
    /// cells whose `protect` attribute is set untouched.
    pub fn erase(&mut self, from: usize, num: usize, attr: Attributes, age: Age, keep_protected: bool) {
        let end = (from + num).min(self.width);
        for i in from.min(end)..end {
            if keep_protected && self.cells[i].attributes.protect() {
                continue;
            }
            self.cells[i] = Cell::blank_with(attr, age);
        }
        // The erase only *might* have lowered the watermark if it reached
        // into the previously-filled region; recompute from the cells
        // rather than assuming the whole prefix up to `from` is blank —
        // content to the left of `from`, or cells `keep_protected` left
        // untouched inside the erased range, can still hold the rightmost
        // non-blank cell.
        if from < self.fill {
            self.recompute_fill();
        }
        self.bump_age(age);
    }

    /// Rescan for the rightmost non-empty cell and set `fill` to one past
    /// it (`0` if the line is entirely blank).
    fn recompute_fill(&mut self) {
        let visible = self.width.min(self.cells.len());
        self.fill = (0..visible).rev().find(|&i| !self.cells[i].character.is_empty()).map_or(0, |i| i + 1);
    }

    /// Erase the whole line and reset the fill watermark.
    pub fn reset(&mut self, attr: Attributes, age: Age) {
        let width = self.width;
        self.erase(0, width, attr, age, false);
        self.fill = 0;
        self.age = age;
    }
}

impl Default for Line {
    fn default() -> Self {
        Line::new()
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
    fn fresh_line_is_empty() {
        let l = Line::new();
        assert_eq!(l.width(), 0);
        assert_eq!(l.fill(), 0);
        assert_eq!(l.age(), NULL_AGE);
    }

    #[test]
    fn reserve_then_set_width_exposes_blank_cells() {
        let mut l = Line::new();
        l.reserve(10, attr(), 1, 0).unwrap();
        l.set_width(10);
        assert_eq!(l.width(), 10);
        assert_eq!(l.cells().len(), 10);
        assert!(l.get(0).unwrap().character.is_empty());
    }

    #[test]
    fn write_updates_fill_and_age() {
        let mut l = Line::new();
        l.reserve(5, attr(), 0, 0).unwrap();
        l.set_width(5);
        l.write(0, Character::set(Character::empty(), 'A' as u32), 1, attr(), 1, false);
        l.write(1, Character::set(Character::empty(), 'B' as u32), 1, attr(), 1, false);
        l.write(2, Character::set(Character::empty(), 'C' as u32), 1, attr(), 1, false);
        assert_eq!(l.fill(), 3);
        assert!(l.age() >= 1);
        let mut scratch = [0u32; crate::char::SCRATCH_LEN];
        assert_eq!(l.get(0).unwrap().character.resolve(&mut scratch), &['A' as u32]);
    }

    #[test]
    fn wide_write_marks_continuation_cell() {
        let mut l = Line::new();
        l.reserve(4, attr(), 0, 0).unwrap();
        l.set_width(4);
        l.write(0, Character::set(Character::empty(), 0x4e2d), 2, attr(), 1, false);
        assert!(l.get(1).unwrap().character.is_empty());
        assert_eq!(l.get(1).unwrap().cached_width, 2);
        assert_eq!(l.fill(), 2);
    }

    #[test]
    fn insert_mode_shifts_and_drops_tail() {
        let mut l = Line::new();
        l.reserve(4, attr(), 0, 0).unwrap();
        l.set_width(4);
        l.write(0, Character::set(Character::empty(), 'A' as u32), 1, attr(), 1, false);
        l.write(1, Character::set(Character::empty(), 'B' as u32), 1, attr(), 1, false);
        l.write(0, Character::set(Character::empty(), 'X' as u32), 1, attr(), 2, true);
        let mut scratch = [0u32; crate::char::SCRATCH_LEN];
        assert_eq!(l.get(0).unwrap().character.resolve(&mut scratch), &['X' as u32]);
        let mut scratch2 = [0u32; crate::char::SCRATCH_LEN];
        assert_eq!(l.get(1).unwrap().character.resolve(&mut scratch2), &['A' as u32]);
    }

    #[test]
    fn append_combchar_combines_onto_existing_base() {
        let mut l = Line::new();
        l.reserve(2, attr(), 0, 0).unwrap();
        l.set_width(2);
        l.write(0, Character::set(Character::empty(), 0x65), 1, attr(), 1, false);
        l.append_combchar(0, 0x301, 2);
        let mut scratch = [0u32; crate::char::SCRATCH_LEN];
        assert_eq!(l.get(0).unwrap().character.resolve(&mut scratch), &[0x65, 0x301]);
    }

    #[test]
    fn append_combchar_on_empty_cell_is_noop() {
        let mut l = Line::new();
        l.reserve(2, attr(), 0, 0).unwrap();
        l.set_width(2);
        l.append_combchar(0, 0x301, 1);
        assert!(l.get(0).unwrap().character.is_empty());
    }

    #[test]
    fn erase_keep_protected_preserves_protected_cells() {
        let mut l = Line::new();
        l.reserve(3, attr(), 0, 0).unwrap();
        l.set_width(3);
        let mut protected = attr();
        protected.set(crate::color::AttrFlags::PROTECT, true);
        l.write(0, Character::set(Character::empty(), 'A' as u32), 1, protected, 1, false);
        l.write(1, Character::set(Character::empty(), 'B' as u32), 1, attr(), 1, false);
        l.erase(0, 2, attr(), 2, true);
        assert!(!l.get(0).unwrap().character.is_empty());
        assert!(l.get(1).unwrap().character.is_empty());
        // The protected cell at column 0 is still non-blank, so the
        // watermark must not collapse to 0 just because the erase started
        // at column 0.
        assert_eq!(l.fill(), 1);
    }

    #[test]
    fn erase_past_fill_does_not_zero_watermark_for_untouched_prefix() {
        let mut l = Line::new();
        l.reserve(4, attr(), 0, 0).unwrap();
        l.set_width(4);
        l.write(0, Character::set(Character::empty(), 'A' as u32), 1, attr(), 1, false);
        l.write(3, Character::set(Character::empty(), 'D' as u32), 1, attr(), 1, false);
        // Erase only column 3, which happens to be the current watermark
        // edge; column 0's content must survive in both cells and fill.
        l.erase(3, 1, attr(), 2, false);
        assert!(!l.get(0).unwrap().character.is_empty());
        assert_eq!(l.fill(), 1);
    }

    #[test]
    fn reset_clears_fill_and_all_cells() {
        let mut l = Line::new();
        l.reserve(3, attr(), 0, 0).unwrap();
        l.set_width(3);
        l.write(0, Character::set(Character::empty(), 'A' as u32), 1, attr(), 1, false);
        l.reset(attr(), 5);
        assert_eq!(l.fill(), 0);
        assert_eq!(l.age(), 5);
        assert!(l.get(0).unwrap().character.is_empty());
    }
}
