use std::sync::Arc;

use crate::{assets::text::TextAlign, caption::style::CaptionStyle};

/// Which of the two caption fields an event targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionPosition {
    /// Caption anchored at the top of the image.
    Top,
    /// Caption anchored at the bottom of the image.
    Bottom,
}

/// Editable text state of one caption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptionSlot {
    /// Text currently displayed and burned into exports.
    pub current_text: String,
    /// Text restored whenever the screen resets.
    pub placeholder_text: String,
    /// Whether the field currently has input focus.
    pub is_editing: bool,
}

impl CaptionSlot {
    fn showing_placeholder(placeholder: &str) -> Self {
        Self {
            current_text: placeholder.to_string(),
            placeholder_text: placeholder.to_string(),
            is_editing: false,
        }
    }
}

/// Result of submitting a caption. Any text, including an empty one, is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Editing ended and the text was kept.
    Accepted,
}

/// A caption slot bound to its presentation attributes.
#[derive(Clone, Debug)]
pub struct CaptionField {
    slot: CaptionSlot,
    style: Arc<CaptionStyle>,
    align: TextAlign,
    bordered: bool,
    above_image: bool,
}

impl CaptionField {
    fn initialized(placeholder: &str, style: Arc<CaptionStyle>) -> Self {
        Self {
            slot: CaptionSlot::showing_placeholder(placeholder),
            style,
            align: TextAlign::Center,
            bordered: false,
            above_image: true,
        }
    }

    /// Current slot state.
    pub fn slot(&self) -> &CaptionSlot {
        &self.slot
    }

    /// Displayed text.
    pub fn text(&self) -> &str {
        &self.slot.current_text
    }

    /// Shared caption style.
    pub fn style(&self) -> &Arc<CaptionStyle> {
        &self.style
    }

    /// Horizontal text alignment.
    pub fn align(&self) -> TextAlign {
        self.align
    }

    /// Whether an input border is drawn around the field.
    pub fn bordered(&self) -> bool {
        self.bordered
    }

    /// Whether the field is ordered above the image layer.
    pub fn above_image(&self) -> bool {
        self.above_image
    }
}

/// Controller for the top and bottom caption fields.
///
/// At most one field is focused at a time.
#[derive(Clone, Debug)]
pub struct CaptionFields {
    top: CaptionField,
    bottom: CaptionField,
}

impl CaptionFields {
    /// Bind both fields with their placeholders and the shared style.
    pub fn new(
        top_placeholder: &str,
        bottom_placeholder: &str,
        style: Arc<CaptionStyle>,
    ) -> Self {
        Self {
            top: CaptionField::initialized(top_placeholder, Arc::clone(&style)),
            bottom: CaptionField::initialized(bottom_placeholder, style),
        }
    }

    /// Rebind one field: apply `style`, center its text, show `placeholder`, drop the
    /// border and order it above the image.
    pub fn initialize(
        &mut self,
        position: CaptionPosition,
        placeholder: &str,
        style: Arc<CaptionStyle>,
    ) {
        *self.field_mut(position) = CaptionField::initialized(placeholder, style);
    }

    /// Field at `position`.
    pub fn field(&self, position: CaptionPosition) -> &CaptionField {
        match position {
            CaptionPosition::Top => &self.top,
            CaptionPosition::Bottom => &self.bottom,
        }
    }

    fn field_mut(&mut self, position: CaptionPosition) -> &mut CaptionField {
        match position {
            CaptionPosition::Top => &mut self.top,
            CaptionPosition::Bottom => &mut self.bottom,
        }
    }

    /// Displayed text at `position`.
    pub fn text(&self, position: CaptionPosition) -> &str {
        self.field(position).text()
    }

    /// The focused field, if any.
    pub fn focused(&self) -> Option<CaptionPosition> {
        [CaptionPosition::Top, CaptionPosition::Bottom]
            .into_iter()
            .find(|&p| self.field(p).slot.is_editing)
    }

    /// Focus a field. Its text is cleared, so typing replaces the placeholder.
    pub fn on_edit_begin(&mut self, position: CaptionPosition) {
        for other in [CaptionPosition::Top, CaptionPosition::Bottom] {
            if other != position {
                self.field_mut(other).slot.is_editing = false;
            }
        }
        let slot = &mut self.field_mut(position).slot;
        slot.current_text.clear();
        slot.is_editing = true;
    }

    /// Replace the text of a field with user input.
    pub fn on_text_changed(&mut self, position: CaptionPosition, text: &str) {
        let slot = &mut self.field_mut(position).slot;
        slot.current_text.clear();
        slot.current_text.push_str(text);
    }

    /// End editing on a field, keeping whatever text it holds.
    pub fn on_submit(&mut self, position: CaptionPosition) -> SubmitOutcome {
        self.field_mut(position).slot.is_editing = false;
        SubmitOutcome::Accepted
    }

    /// Restore both fields to their placeholders and drop focus.
    pub fn reset(&mut self) {
        for field in [&mut self.top, &mut self.bottom] {
            field.slot = CaptionSlot::showing_placeholder(&field.slot.placeholder_text);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/caption/field.rs"]
mod tests;
