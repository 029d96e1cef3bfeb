//! The rectangular visible grid (C6): an array of lines plus a scroll
//! region, sitting above [`History`] and delegating cell-level work to
//! [`Line`].
//!
//! The system this is modeled on keeps a `cache` scratch array parallel
//! to `lines` for renderer bookkeeping; that's an implementation detail
//! of its C allocator discipline and has no counterpart here — a `Vec`
//! of owned [`Line`]s already gives rotate/drain/insert for free.
use crate::cell::{Age, Cell, NULL_AGE};
use crate::char::Character;
use crate::color::Attributes;
use crate::error::TermError;
use crate::history::History;
use crate::line::Line;

/// The visible grid. `scroll_idx`/`scroll_num` bound the region that
/// participates in `scroll_up`/`scroll_down`/`insert_lines`/
/// `delete_lines`; `scroll_num == 0` means "the full page".
#[derive(Debug, Clone)]
pub struct Page {
    width: usize,
    height: usize,
    lines: Vec<Line>,
    scroll_idx: usize,
    scroll_num: usize,
    scroll_fill: usize,
    age: Age,
}

impl Page {
    pub fn new() -> Page {
        Page {
            width: 0,
            height: 0,
            lines: Vec::new(),
            scroll_idx: 0,
            scroll_num: 0,
            scroll_fill: 0,
            age: NULL_AGE,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn scroll_region(&self) -> (usize, usize) {
        (self.scroll_idx, self.effective_scroll_num())
    }

    fn effective_scroll_num(&self) -> usize {
        if self.scroll_num == 0 {
            self.height
        } else {
            self.scroll_num
        }
    }

    fn bump_age(&mut self, age: Age) {
        if age > self.age {
            self.age = age;
        }
    }

    /// Ensure the lines array has `rows` entries, each reserved to
    /// `cols`. On allocation failure the page is left exactly as it was.
    pub fn reserve(&mut self, cols: usize, rows: usize, attr: Attributes, age: Age) -> Result<(), TermError> {
        if self.lines.len() < rows {
            self.lines
                .try_reserve(rows - self.lines.len())
                .map_err(|_| TermError::Alloc)?;
        }
        for line in self.lines.iter_mut() {
            line.reserve(cols, attr, age, 0)?;
        }
        while self.lines.len() < rows {
            let mut line = Line::new();
            line.reserve(cols, attr, age, 0)?;
            line.set_width(cols);
            self.lines.push(line);
        }
        self.bump_age(age);
        Ok(())
    }

    /// Resize the visible grid, spilling evicted rows into `history`
    /// (if given) on shrink, appending blank rows on grow. Resets the
    /// scroll region to the full page.
    pub fn resize(
        &mut self,
        cols: usize,
        rows: usize,
        attr: Attributes,
        age: Age,
        mut history: Option<&mut History>,
    ) -> Result<(), TermError> {
        for line in self.lines.iter_mut() {
            line.reserve(cols, attr, age, 0)?;
            line.set_width(cols);
        }
        self.width = cols;

        if self.lines.len() > rows {
            let overflow = self.lines.len() - rows;
            let retired: Vec<Line> = self.lines.drain(0..overflow).collect();
            if let Some(history) = history.as_deref_mut() {
                for line in retired {
                    history.push(line);
                }
            }
        } else {
            while self.lines.len() < rows {
                let mut line = Line::new();
                line.reserve(cols, attr, age, 0)?;
                line.set_width(cols);
                self.lines.push(line);
            }
        }
        self.height = rows;

        self.scroll_idx = 0;
        self.scroll_num = 0;
        self.scroll_fill = 0;
        self.bump_age(age);
        Ok(())
    }

    pub fn get_cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.lines.get(y)?.get(x)
    }

    pub fn write(&mut self, x: usize, y: usize, ch: Character, cwidth: usize, attr: Attributes, age: Age, insert_mode: bool) {
        if let Some(line) = self.lines.get_mut(y) {
            line.write(x, ch, cwidth, attr, age, insert_mode);
            self.bump_age(age);
        }
    }

    pub fn insert_cells(&mut self, x: usize, y: usize, num: usize, attr: Attributes, age: Age) {
        if let Some(line) = self.lines.get_mut(y) {
            line.insert(x, num, attr, age);
            self.bump_age(age);
        }
    }

    pub fn delete_cells(&mut self, x: usize, y: usize, num: usize, attr: Attributes, age: Age) {
        if let Some(line) = self.lines.get_mut(y) {
            line.delete(x, num, attr, age);
            self.bump_age(age);
        }
    }

    pub fn append_combchar(&mut self, x: usize, y: usize, ucs4: u32, age: Age) {
        if let Some(line) = self.lines.get_mut(y) {
            line.append_combchar(x, ucs4, age);
            self.bump_age(age);
        }
    }

    /// A rectangular-or-linear erase mirroring ED/EL: if `from_y ==
    /// to_y`, erase columns on that one row; otherwise erase from
    /// `(from_x, from_y)` to end-of-line, every full row in between, and
    /// from column 0 to `to_x` on `to_y`.
    pub fn erase(&mut self, from_x: usize, from_y: usize, to_x: usize, to_y: usize, attr: Attributes, age: Age, keep_protected: bool) {
        if from_y >= self.lines.len() {
            return;
        }
        let to_y = to_y.min(self.lines.len().saturating_sub(1));

        if from_y == to_y {
            if let Some(line) = self.lines.get_mut(from_y) {
                let num = to_x.saturating_sub(from_x);
                line.erase(from_x, num, attr, age, keep_protected);
            }
        } else {
            if let Some(line) = self.lines.get_mut(from_y) {
                let width = line.width();
                line.erase(from_x, width.saturating_sub(from_x), attr, age, keep_protected);
            }
            for y in (from_y + 1)..to_y {
                if let Some(line) = self.lines.get_mut(y) {
                    let width = line.width();
                    line.erase(0, width, attr, age, keep_protected);
                }
            }
            if let Some(line) = self.lines.get_mut(to_y) {
                line.erase(0, to_x, attr, age, keep_protected);
            }
        }
        self.bump_age(age);
    }

    pub fn reset(&mut self, attr: Attributes, age: Age) {
        for line in self.lines.iter_mut() {
            line.reset(attr, age);
        }
        self.scroll_idx = 0;
        self.scroll_num = 0;
        self.scroll_fill = 0;
        self.age = age;
    }

    pub fn set_scroll_region(&mut self, idx: usize, num: usize) {
        let idx = idx.min(self.height);
        let num = num.min(self.height - idx);
        self.scroll_idx = idx;
        self.scroll_num = num;
        self.scroll_fill = 0;
    }

    /// Move the top `min(num, region height)` lines out of the scroll
    /// region, pushing them to `history` (in order) when the region
    /// starts at row 0 and `history` is supplied; shift the remainder up
    /// and fill the bottom with erased lines.
    pub fn scroll_up(&mut self, num: usize, attr: Attributes, age: Age, mut history: Option<&mut History>) {
        let region_height = self.effective_scroll_num();
        if region_height == 0 {
            return;
        }
        let num = num.min(region_height);
        if num == 0 {
            return;
        }
        let start = self.scroll_idx;

        let retired: Vec<Line> = self.lines.drain(start..start + num).collect();
        if self.scroll_idx == 0 {
            if let Some(history) = history.as_deref_mut() {
                for line in retired {
                    history.push(line);
                }
            }
        }

        for _ in 0..num {
            let mut line = Line::new();
            let _ = line.reserve(self.width, attr, age, 0);
            line.set_width(self.width);
            self.lines.insert(start + region_height - num, line);
        }

        self.scroll_fill = self.scroll_fill.saturating_sub(num);
        self.bump_age(age);
    }

    /// Move the bottom lines of the scroll region out, filling the top
    /// by popping from `history` when the region starts at row 0 and
    /// history has lines available, otherwise with fresh erased lines.
    /// Popped history lines are reserved to `self.width` with
    /// `protect_width = prior_fill` so preserved content survives.
    pub fn scroll_down(&mut self, num: usize, attr: Attributes, age: Age, mut history: Option<&mut History>) {
        let region_height = self.effective_scroll_num();
        if region_height == 0 {
            return;
        }
        let num = num.min(region_height);
        if num == 0 {
            return;
        }
        let start = self.scroll_idx;
        let end = start + region_height;

        self.lines.drain(end - num..end);

        for i in 0..num {
            let line = if self.scroll_idx == 0 {
                history
                    .as_deref_mut()
                    .and_then(|h| h.pop(self.width, attr, age))
            } else {
                None
            }
            .unwrap_or_else(|| {
                let mut line = Line::new();
                let _ = line.reserve(self.width, attr, age, 0);
                line.set_width(self.width);
                line
            });
            self.lines.insert(start + i, line);
        }

        self.bump_age(age);
    }

    /// Shift `[y, scroll end)` down by `num`, opening blank rows at `y`.
    /// Rows pushed past the scroll region are dropped. Clipped to the
    /// scroll region.
    pub fn insert_lines(&mut self, y: usize, num: usize, attr: Attributes, age: Age) {
        let region_end = self.scroll_idx + self.effective_scroll_num();
        if y < self.scroll_idx || y >= region_end {
            return;
        }
        let num = num.min(region_end - y);
        self.lines.drain(region_end - num..region_end);
        for i in 0..num {
            let mut line = Line::new();
            let _ = line.reserve(self.width, attr, age, 0);
            line.set_width(self.width);
            self.lines.insert(y + i, line);
        }
        self.bump_age(age);
    }

    /// Shift `[y + num, scroll end)` up into `y`, opening blank rows at
    /// the bottom of the scroll region. Clipped to the scroll region.
    pub fn delete_lines(&mut self, y: usize, num: usize, attr: Attributes, age: Age) {
        let region_end = self.scroll_idx + self.effective_scroll_num();
        if y < self.scroll_idx || y >= region_end {
            return;
        }
        let num = num.min(region_end - y);
        self.lines.drain(y..y + num);
        for _ in 0..num {
            let mut line = Line::new();
            let _ = line.reserve(self.width, attr, age, 0);
            line.set_width(self.width);
            self.lines.insert(region_end - num, line);
        }
        self.bump_age(age);
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use k9::assert_equal as assert_eq;

    fn attr() -> Attributes {
        Attributes::default()
    }

    fn ch(c: char) -> Character {
        Character::set(Character::empty(), c as u32)
    }

    #[test]
    fn fresh_page_has_zero_extent() {
        let p = Page::new();
        assert_eq!(p.width(), 0);
        assert_eq!(p.height(), 0);
    }

    #[test]
    fn reserve_then_resize_allocates_blank_rows() {
        let mut p = Page::new();
        p.resize(3, 1, attr(), 1, None).unwrap();
        assert_eq!(p.width(), 3);
        assert_eq!(p.height(), 1);
        assert!(p.get_cell(0, 0).unwrap().character.is_empty());
    }

    #[test]
    fn write_then_read_back_round_trips() {
        let mut p = Page::new();
        p.resize(3, 1, attr(), 0, None).unwrap();
        p.write(0, 0, ch('A'), 1, attr(), 1, false);
        p.write(1, 0, ch('B'), 1, attr(), 1, false);
        p.write(2, 0, ch('C'), 1, attr(), 1, false);
        let mut scratch = [0u32; crate::char::SCRATCH_LEN];
        assert_eq!(p.get_cell(0, 0).unwrap().character.resolve(&mut scratch), &['A' as u32]);
        assert_eq!(p.get_cell(2, 0).unwrap().character.resolve(&mut scratch), &['C' as u32]);
        assert!(p.age() >= 1);
    }

    #[test]
    fn resize_shrink_pushes_evicted_rows_to_history() {
        let mut p = Page::new();
        p.resize(2, 3, attr(), 0, None).unwrap();
        p.write(0, 0, ch('X'), 1, attr(), 1, false);

        let mut h = History::new(10);
        p.resize(2, 1, attr(), 2, Some(&mut h)).unwrap();
        assert_eq!(p.height(), 1);
        assert_eq!(h.n_lines(), 2);
    }

    #[test]
    fn resize_grow_appends_blank_rows() {
        let mut p = Page::new();
        p.resize(2, 1, attr(), 0, None).unwrap();
        p.resize(2, 3, attr(), 1, None).unwrap();
        assert_eq!(p.height(), 3);
        assert!(p.get_cell(0, 2).unwrap().character.is_empty());
    }

    #[test]
    fn scroll_up_with_history_preserves_evicted_line_content() {
        let mut p = Page::new();
        p.resize(3, 2, attr(), 0, None).unwrap();
        p.write(0, 0, ch('A'), 1, attr(), 1, false);
        p.write(0, 1, ch('B'), 1, attr(), 1, false);

        let mut h = History::new(10);
        p.scroll_up(1, attr(), 2, Some(&mut h));

        assert_eq!(h.n_lines(), 1);
        let mut scratch = [0u32; crate::char::SCRATCH_LEN];
        assert_eq!(p.get_cell(0, 0).unwrap().character.resolve(&mut scratch), &['B' as u32]);
        assert!(p.get_cell(0, 1).unwrap().character.is_empty());
    }

    #[test]
    fn scroll_up_without_history_discards_evicted_line() {
        let mut p = Page::new();
        p.resize(3, 2, attr(), 0, None).unwrap();
        p.write(0, 0, ch('A'), 1, attr(), 1, false);
        p.scroll_up(1, attr(), 2, None);
        assert!(p.get_cell(0, 0).unwrap().character.is_empty());
        assert!(p.get_cell(0, 1).unwrap().character.is_empty());
    }

    #[test]
    fn scroll_down_pops_history_line_into_top_row() {
        let mut p = Page::new();
        p.resize(3, 2, attr(), 0, None).unwrap();
        let mut h = History::new(10);
        let mut retired = Line::new();
        retired.reserve(3, attr(), 0, 0).unwrap();
        retired.set_width(3);
        retired.write(0, ch('Z'), 1, attr(), 0, false);
        h.push(retired);

        p.scroll_down(1, attr(), 1, Some(&mut h));
        let mut scratch = [0u32; crate::char::SCRATCH_LEN];
        assert_eq!(p.get_cell(0, 0).unwrap().character.resolve(&mut scratch), &['Z' as u32]);
        assert_eq!(h.n_lines(), 0);
    }

    #[test]
    fn set_scroll_region_clips_insert_and_delete_lines() {
        let mut p = Page::new();
        p.resize(2, 4, attr(), 0, None).unwrap();
        p.set_scroll_region(1, 2);
        p.write(0, 1, ch('A'), 1, attr(), 1, false);
        p.write(0, 2, ch('B'), 1, attr(), 1, false);
        p.insert_lines(1, 1, attr(), 2);
        assert!(p.get_cell(0, 1).unwrap().character.is_empty());
        let mut scratch = [0u32; crate::char::SCRATCH_LEN];
        assert_eq!(p.get_cell(0, 2).unwrap().character.resolve(&mut scratch), &['A' as u32]);
        // row 3 is outside the scroll region and untouched by the insert.
        assert!(p.get_cell(0, 3).unwrap().character.is_empty());
    }

    #[test]
    fn erase_spanning_multiple_rows_clears_head_tail_and_middle() {
        let mut p = Page::new();
        p.resize(3, 3, attr(), 0, None).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                p.write(x, y, ch('A'), 1, attr(), 1, false);
            }
        }
        p.erase(1, 0, 2, 2, attr(), 2, false);
        assert!(!p.get_cell(0, 0).unwrap().character.is_empty());
        assert!(p.get_cell(1, 0).unwrap().character.is_empty());
        assert!(p.get_cell(0, 1).unwrap().character.is_empty());
        assert!(p.get_cell(0, 2).unwrap().character.is_empty());
        assert!(!p.get_cell(2, 2).unwrap().character.is_empty());
    }

    #[test]
    fn reset_clears_all_rows_and_scroll_region() {
        let mut p = Page::new();
        p.resize(2, 2, attr(), 0, None).unwrap();
        p.set_scroll_region(0, 1);
        p.write(0, 0, ch('A'), 1, attr(), 1, false);
        p.reset(attr(), 3);
        assert!(p.get_cell(0, 0).unwrap().character.is_empty());
        assert_eq!(p.scroll_region(), (0, 2));
        assert_eq!(p.age(), 3);
    }
}
