use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use super::state::*;
use super::ui::APPLY_COLOUR;
use crate::engine::scene::reconfigure::{ReconfigureSiteEvent, ReconfigureSource};

const FIELD_HOVER_COLOUR: Color = Color::srgb(0.22, 0.25, 0.30);
const APPLY_HOVER_COLOUR: Color = Color::srgb(0.20, 0.36, 0.24);
const APPLY_PRESSED_COLOUR: Color = Color::srgb(0.12, 0.24, 0.16);

/// Result of feeding one key press to a focused field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Edited,
    FocusNext,
    Submit,
    Ignored,
}

/// Apply a key press to field text. Accepts digits, `.` and `-` only.
pub fn apply_key(text: &mut String, key: &Key) -> KeyOutcome {
    match key {
        Key::Character(chars) => {
            let accepted: String = chars
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            if accepted.is_empty() {
                return KeyOutcome::Ignored;
            }
            text.push_str(&accepted);
            KeyOutcome::Edited
        }
        Key::Backspace => {
            if text.pop().is_some() {
                KeyOutcome::Edited
            } else {
                KeyOutcome::Ignored
            }
        }
        Key::Tab => KeyOutcome::FocusNext,
        Key::Enter => KeyOutcome::Submit,
        _ => KeyOutcome::Ignored,
    }
}

fn submit(state: &SitePanelState, reconfigure: &mut EventWriter<ReconfigureSiteEvent>) {
    info!("Applying site inputs from panel");
    reconfigure.write(ReconfigureSiteEvent {
        inputs: state.inputs.clone(),
        source: ReconfigureSource::Panel,
    });
}

// Clicking a field focuses it
pub fn input_field_interaction(
    mut q: Query<
        (&Interaction, &InputField, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut state: ResMut<SitePanelState>,
) {
    for (interaction, InputField(field), mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => state.focused = Some(*field),
            Interaction::Hovered => *bg = BackgroundColor(FIELD_HOVER_COLOUR),
            // Resting colour depends on focus; reflect_field_values repaints it.
            Interaction::None => state.set_changed(),
        }
    }
}

// Apply button sends the current field text for validation
pub fn apply_button_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<ApplyButton>),
    >,
    state: Res<SitePanelState>,
    mut reconfigure: EventWriter<ReconfigureSiteEvent>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                submit(&state, &mut reconfigure);
                *bg = BackgroundColor(APPLY_PRESSED_COLOUR);
            }
            Interaction::Hovered => *bg = BackgroundColor(APPLY_HOVER_COLOUR),
            Interaction::None => *bg = BackgroundColor(APPLY_COLOUR),
        }
    }
}

// Routes key presses to the focused field
pub fn panel_keyboard_input(
    mut keys: EventReader<KeyboardInput>,
    mut state: ResMut<SitePanelState>,
    mut reconfigure: EventWriter<ReconfigureSiteEvent>,
) {
    for event in keys.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        let Some(field) = state.focused else {
            continue;
        };

        match apply_key(state.inputs.get_mut(field), &event.logical_key) {
            KeyOutcome::FocusNext => state.focused = Some(field.next()),
            KeyOutcome::Submit => submit(&state, &mut reconfigure),
            KeyOutcome::Edited | KeyOutcome::Ignored => {}
        }
    }
}
