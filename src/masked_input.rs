//! Text input with a digit mask.
//!
//! Only digits can be entered, all the literals of the mask are
//! inserted automatically.
//!
//! * `0`: mandatory digit, display as 0
//! * `_`: optional digit, not displayed until there is a digit
//! * all other chars are shown as is.
//!
//! ```rust ignore
//! use ratatui::widgets::StatefulWidget;
//! use rat_automask::MaskSpec;
//! use rat_automask::masked_input::{MaskedInput, MaskedInputState};
//!
//! let mut phone_state = MaskedInputState::with_spec(
//!     MaskSpec::new("(00) 00000-0000").prefix("+55 ")
//! );
//!
//! MaskedInput::new().render(area, &mut buf, &mut phone_state);
//! if let Some((x, y)) = phone_state.screen_cursor() {
//!     frame.set_cursor_position((x, y));
//! }
//! ```
//!
//! Event handling by calling the freestanding fn [handle_events].
//!

use crate::_private::NonExhaustive;
use crate::event::{HandleEvent, Regular, TextOutcome};
use crate::field::{strip_affixes, MaskField};
use crate::mask_core::{apply, normalize, only_digits};
use crate::mask_spec::{ATTR_DIRECTION, ATTR_PATTERN, ATTR_PREFIX, ATTR_SUFFIX};
use crate::mask_token::{parse_pattern, placeholder_end, MaskChar};
use crate::{upos_type, Direction, MaskSpec};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use log::debug;
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Style, Stylize};
use ratatui::widgets::{Block, StatefulWidget, Widget};
use std::cmp::min;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Text input widget with a digit mask.
#[derive(Debug, Default, Clone)]
pub struct MaskedInput<'a> {
    block: Option<Block<'a>>,
    style: Style,
    focus_style: Option<Style>,
    invalid_style: Option<Style>,
}

/// Combined style for the widget.
#[derive(Debug, Clone)]
pub struct MaskedInputStyle {
    pub style: Style,
    pub focus: Option<Style>,
    pub invalid: Option<Style>,
    pub block: Option<Block<'static>>,

    pub non_exhaustive: NonExhaustive,
}

/// State of the masked input.
#[derive(Debug, Clone)]
pub struct MaskedInputState {
    /// Current focus state.
    pub focus: FocusFlag,
    /// Display as invalid.
    pub invalid: bool,

    /// Area with block
    pub area: Rect,
    /// Area
    pub inner: Rect,
    /// First visible grapheme.
    pub offset: usize,

    spec: MaskSpec,
    mask: Vec<MaskChar>,
    /// Digit buffer.
    value: String,
    text: String,
    cursor: upos_type,

    /// Construct with `..Default::default()`
    pub non_exhaustive: NonExhaustive,
}

impl Default for MaskedInputStyle {
    fn default() -> Self {
        Self {
            style: Default::default(),
            focus: None,
            invalid: None,
            block: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl<'a> MaskedInput<'a> {
    /// New
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the combined style.
    #[inline]
    pub fn styles(mut self, style: MaskedInputStyle) -> Self {
        self.style = style.style;
        self.focus_style = style.focus;
        self.invalid_style = style.invalid;
        if style.block.is_some() {
            self.block = style.block;
        }
        self
    }

    /// Base text style.
    #[inline]
    pub fn style(mut self, style: impl Into<Style>) -> Self {
        self.style = style.into();
        self
    }

    /// Style when focused.
    #[inline]
    pub fn focus_style(mut self, style: impl Into<Style>) -> Self {
        self.focus_style = Some(style.into());
        self
    }

    /// Style for invalid.
    #[inline]
    pub fn invalid_style(mut self, style: impl Into<Style>) -> Self {
        self.invalid_style = Some(style.into());
        self
    }

    /// Block.
    #[inline]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl<'a> StatefulWidget for MaskedInput<'a> {
    type State = MaskedInputState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(&self, area, buf, state);
    }
}

fn render_ref(
    widget: &MaskedInput<'_>,
    area: Rect,
    buf: &mut Buffer,
    state: &mut MaskedInputState,
) {
    state.area = area;
    state.inner = if let Some(block) = &widget.block {
        block.inner(area)
    } else {
        area
    };

    if let Some(block) = widget.block.clone() {
        block.render(area, buf);
    }

    let area = state.inner.intersection(buf.area);

    let focus_style = widget.focus_style.unwrap_or(widget.style);
    let invalid_style = widget
        .invalid_style
        .unwrap_or_else(|| Style::default().red());
    let style = match (state.focus.get(), state.invalid) {
        (true, true) => focus_style.patch(invalid_style),
        (true, false) => focus_style,
        (false, true) => widget.style.patch(invalid_style),
        (false, false) => widget.style,
    };

    state.scroll_cursor_to_visible();

    buf.set_style(area, style);

    let mut col = 0;
    for g in state.text.graphemes(true).skip(state.offset) {
        let ww = g.width() as u16;
        if col + ww > area.width {
            break;
        }
        if let Some(cell) = buf.cell_mut((area.x + col, area.y)) {
            cell.set_symbol(g);
            cell.set_style(style);
        }
        // extra cells for wide chars.
        for x in 1..ww {
            if let Some(cell) = buf.cell_mut((area.x + col + x, area.y)) {
                cell.set_symbol("");
                cell.set_style(style);
            }
        }
        col += ww.max(1);
    }
}

impl Default for MaskedInputState {
    fn default() -> Self {
        Self {
            focus: Default::default(),
            invalid: false,
            area: Default::default(),
            inner: Default::default(),
            offset: 0,
            spec: Default::default(),
            mask: Default::default(),
            value: Default::default(),
            text: Default::default(),
            cursor: 0,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl HasFocus for MaskedInputState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.add_widget(self.focus(), self.area(), self.z_areas(), self.navigable());
    }

    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    fn area(&self) -> Rect {
        self.area
    }
}

impl MaskedInputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// New state with the given mask.
    pub fn with_spec(spec: MaskSpec) -> Self {
        let mut s = Self::default();
        s.set_spec(spec);
        s
    }

    /// Changes the mask.
    /// Resets the value to a default.
    pub fn set_spec(&mut self, spec: MaskSpec) {
        debug!("set_spec {:?}", spec);
        self.mask = parse_pattern(&spec.pattern);
        self.spec = spec;
        self.clear();
    }

    /// The mask.
    pub fn spec(&self) -> &MaskSpec {
        &self.spec
    }

    /// Set the value from any input. Everything but the digits
    /// is ignored.
    ///
    /// All digits count, zeros at the end of a forward mask
    /// are part of the value.
    pub fn set_value(&mut self, raw: &str) {
        let digits = only_digits(strip_affixes(raw, &self.spec.prefix, &self.spec.suffix));
        let digits = self.fit(digits);
        let n = digits.len();
        self.remask(digits, n);
        self.offset = 0;
    }

    /// The digits of the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// No digits entered.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Reset to the empty value.
    pub fn clear(&mut self) {
        self.set_value("");
    }

    /// Rendered text including prefix and suffix.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in graphemes.
    pub fn len(&self) -> upos_type {
        self.text.graphemes(true).count() as upos_type
    }

    /// Cursor position in graphemes.
    pub fn cursor(&self) -> upos_type {
        self.cursor
    }

    /// Set the cursor. It's limited to the range between
    /// prefix and suffix.
    ///
    /// Returns true if the cursor moved.
    pub fn set_cursor(&mut self, cursor: upos_type) -> bool {
        let (start, end) = self.edit_range();
        let old_cursor = self.cursor;
        self.cursor = (cursor as usize).clamp(start, end) as upos_type;
        old_cursor != self.cursor
    }

    pub fn move_left(&mut self) -> bool {
        self.set_cursor(self.cursor.saturating_sub(1))
    }

    pub fn move_right(&mut self) -> bool {
        self.set_cursor(self.cursor + 1)
    }

    pub fn move_to_line_start(&mut self) -> bool {
        self.set_cursor(0)
    }

    pub fn move_to_line_end(&mut self) -> bool {
        let (_, end) = self.edit_range();
        self.set_cursor(end as upos_type)
    }

    /// Insert a char at the cursor. Only digits are accepted.
    pub fn insert_char(&mut self, c: char) -> bool {
        let mut tmp = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut tmp))
    }

    /// Insert the digits of the str at the cursor.
    pub fn insert_str(&mut self, s: &str) -> bool {
        let digits = only_digits(s);
        if digits.is_empty() {
            debug!("insert_str: no digits in {:?}", s);
            return false;
        }

        let pos = self.digit_pos(self.slots_before(self.cursor as usize));
        let mut value = self.value.clone();
        value.insert_str(pos, &digits);
        let value = self.fit(value);
        let pos = min(pos + digits.len(), value.len());
        self.remask(value, pos)
    }

    /// Remove the digit before the cursor.
    /// Literals in between are skipped.
    ///
    /// If there are only unfilled placeholders before the cursor,
    /// the cursor moves to the last digit.
    pub fn delete_prev_char(&mut self) -> bool {
        let slots = self.slots_before(self.cursor as usize);
        let pos = self.digit_pos(slots);
        if self.spec.direction == Direction::Forward && slots > pos {
            let after = self.prefix_len() + placeholder_end(&self.mask, pos);
            return self.set_cursor(after as upos_type);
        }
        if pos == 0 {
            return false;
        }

        let mut value = self.value.clone();
        value.remove(pos - 1);
        let value = self.fit(value);
        let pos = min(pos - 1, value.len());
        self.remask(value, pos)
    }

    /// Remove the digit after the cursor.
    /// Literals in between are skipped.
    pub fn delete_next_char(&mut self) -> bool {
        let pos = self.digit_pos(self.slots_before(self.cursor as usize));
        if pos >= self.value.len() {
            return false;
        }

        let mut value = self.value.clone();
        value.remove(pos);
        let value = self.fit(value);
        let pos = min(pos, value.len());
        self.remask(value, pos)
    }

    /// The current text cursor as an absolute screen position.
    pub fn screen_cursor(&self) -> Option<(u16, u16)> {
        if !self.is_focused() {
            return None;
        }
        let cursor = self.cursor as usize;
        if cursor < self.offset {
            return None;
        }
        let sc = self.width_range(self.offset, cursor);
        if sc > self.inner.width as usize {
            None
        } else {
            Some((self.inner.x + sc as u16, self.inner.y))
        }
    }

    /// Adjusts the offset to show the cursor.
    pub fn scroll_cursor_to_visible(&mut self) {
        let cursor = self.cursor as usize;
        let width = self.inner.width as usize;
        if cursor < self.offset {
            self.offset = cursor;
        }
        while self.offset < cursor && self.width_range(self.offset, cursor) >= width {
            self.offset += 1;
        }
    }
}

impl MaskedInputState {
    fn prefix_len(&self) -> usize {
        self.spec.prefix.graphemes(true).count()
    }

    /// Grapheme range between prefix and suffix.
    fn edit_range(&self) -> (usize, usize) {
        let len = self.len() as usize;
        let start = min(self.prefix_len(), len);
        let end = len
            .saturating_sub(self.spec.suffix.graphemes(true).count())
            .max(start);
        (start, end)
    }

    /// Display width of a grapheme range.
    fn width_range(&self, start: usize, end: usize) -> usize {
        self.text
            .graphemes(true)
            .skip(start)
            .take(end.saturating_sub(start))
            .map(|g| g.width())
            .sum()
    }

    fn slot_count(&self) -> usize {
        self.mask.iter().filter(|m| m.is_placeholder()).count()
    }

    /// Number of placeholders before the cursor.
    ///
    /// Every mask token renders as one grapheme. A backward mask may
    /// be cut off at the start, a forward mask at the end.
    fn slots_before(&self, cursor: usize) -> usize {
        let (start, end) = self.edit_range();
        let col = cursor.clamp(start, end) - start;
        let token = match self.spec.direction {
            Direction::Forward => col,
            Direction::Backward => self.mask.len().saturating_sub(end - start) + col,
        };
        self.mask
            .iter()
            .take(token)
            .filter(|m| m.is_placeholder())
            .count()
    }

    /// Position in the digit buffer for the given number of placeholders.
    fn digit_pos(&self, slots: usize) -> usize {
        let len = self.value.len();
        match self.spec.direction {
            Direction::Forward => min(slots, len),
            Direction::Backward => min(slots.saturating_sub(self.slot_count().saturating_sub(len)), len),
        }
    }

    /// Cuts the digits down to what the mask can show.
    ///
    /// Leading zeros of a backward mask are padding.
    fn fit(&self, digits: String) -> String {
        let n = self.slot_count();
        match self.spec.direction {
            Direction::Forward => {
                let mut digits = digits;
                digits.truncate(n);
                digits
            }
            Direction::Backward => {
                let mut digits = normalize(&digits, Direction::Backward);
                let skip = digits.len().saturating_sub(n);
                digits.split_off(skip)
            }
        }
    }

    /// Renders the digit buffer.
    ///
    /// For forward masks the cursor goes after the digit at `pos`,
    /// backward masks keep the cursor before the suffix.
    ///
    /// Returns true if anything changed.
    fn remask(&mut self, value: String, pos: usize) -> bool {
        let r = apply(
            &self.spec.pattern,
            &value,
            self.spec.direction,
            &self.spec.prefix,
            &self.spec.suffix,
        );
        let cursor = match self.spec.direction {
            Direction::Forward => {
                let after = self.prefix_len() + placeholder_end(&self.mask, pos);
                min(r.cursor, after as upos_type)
            }
            Direction::Backward => r.cursor,
        };

        let changed = self.value != value || self.text != r.text || self.cursor != cursor;
        self.value = value;
        self.text = r.text;
        self.cursor = cursor;
        changed
    }
}

impl MaskField for MaskedInputState {
    fn attr(&self, key: &str) -> Option<&str> {
        match key {
            ATTR_PATTERN => Some(&self.spec.pattern),
            ATTR_PREFIX => Some(&self.spec.prefix),
            ATTR_SUFFIX => Some(&self.spec.suffix),
            ATTR_DIRECTION => Some(self.spec.direction.as_str()),
            _ => None,
        }
    }

    fn text(&self) -> &str {
        &self.text
    }

    /// Takes the text as is. The digit buffer is read back
    /// from the text, trailing zeros of a forward mask count
    /// as padding here.
    fn set_text(&mut self, text: String) {
        let digits = normalize(
            strip_affixes(&text, &self.spec.prefix, &self.spec.suffix),
            self.spec.direction,
        );
        self.value = self.fit(digits);
        self.text = text;
    }

    fn set_cursor(&mut self, cursor: upos_type) {
        MaskedInputState::set_cursor(self, cursor);
    }
}

impl HandleEvent<Event, Regular, TextOutcome> for MaskedInputState {
    fn handle(&mut self, event: &Event, _keymap: Regular) -> TextOutcome {
        // small helper ...
        fn tc(
            state: &mut MaskedInputState,
            edit: impl FnOnce(&mut MaskedInputState) -> bool,
        ) -> TextOutcome {
            let old_value = state.value.clone();
            if !edit(state) {
                TextOutcome::Unchanged
            } else if state.value != old_value {
                TextOutcome::TextChanged
            } else {
                TextOutcome::Changed
            }
        }

        if !self.is_focused() {
            return TextOutcome::Continue;
        }

        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                let plain = key.modifiers == KeyModifiers::NONE;
                match key.code {
                    KeyCode::Char('d') if key.modifiers == KeyModifiers::CONTROL => {
                        tc(self, |s| {
                            let empty = s.is_empty();
                            s.clear();
                            !empty
                        })
                    }
                    KeyCode::Char(c)
                        if plain
                            || key.modifiers == KeyModifiers::SHIFT
                            || key.modifiers == KeyModifiers::CONTROL | KeyModifiers::ALT =>
                    {
                        // non-digits are swallowed too.
                        tc(self, |s| s.insert_char(c))
                    }
                    KeyCode::Backspace if plain => tc(self, |s| s.delete_prev_char()),
                    KeyCode::Delete if plain => tc(self, |s| s.delete_next_char()),
                    KeyCode::Left if plain => self.move_left().into(),
                    KeyCode::Right if plain => self.move_right().into(),
                    KeyCode::Home if plain => self.move_to_line_start().into(),
                    KeyCode::End if plain => self.move_to_line_end().into(),
                    _ => TextOutcome::Continue,
                }
            }
            Event::Key(_) => TextOutcome::Continue,
            Event::Paste(s) => tc(self, |state| state.insert_str(s)),
            _ => TextOutcome::Continue,
        }
    }
}

/// Handle all events.
/// Text events are only processed if focus is true.
pub fn handle_events(state: &mut MaskedInputState, focus: bool, event: &Event) -> TextOutcome {
    state.focus.set(focus);
    state.handle(event, Regular)
}
