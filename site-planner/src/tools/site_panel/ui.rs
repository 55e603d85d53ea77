use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use super::state::*;
use crate::engine::scene::reconfigure::SiteStatus;
use crate::engine::scene::site_inputs::{SiteField, SiteInputs};
use crate::engine::scene::site_model::SiteLayout;

const PANEL_COLOUR: Color = Color::srgb(0.10, 0.11, 0.13);
const CAPTION_COLOUR: Color = Color::srgb(0.75, 0.77, 0.80);
const FIELD_COLOUR: Color = Color::srgb(0.18, 0.20, 0.24);
const FIELD_FOCUSED_COLOUR: Color = Color::srgb(0.26, 0.32, 0.42);
pub const APPLY_COLOUR: Color = Color::srgb(0.16, 0.30, 0.20);
const STATUS_OK_COLOUR: Color = Color::srgb(0.70, 0.85, 0.70);
const STATUS_ERROR_COLOUR: Color = Color::srgb(0.95, 0.45, 0.40);

/// Field text with a caret appended while focused.
pub fn field_display(inputs: &SiteInputs, field: SiteField, focused: Option<SiteField>) -> String {
    let value = inputs.get(field);
    if focused == Some(field) {
        format!("{value}|")
    } else {
        value.to_string()
    }
}

fn field_colour(field: SiteField, focused: Option<SiteField>) -> Color {
    if focused == Some(field) {
        FIELD_FOCUSED_COLOUR
    } else {
        FIELD_COLOUR
    }
}

fn spawn_field_row(panel: &mut ChildSpawnerCommands, field: SiteField, state: &SitePanelState) {
    panel.spawn((
        Text::new(field.label()),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(CAPTION_COLOUR),
    ));
    panel
        .spawn((
            InputField(field),
            Button,
            Name::new(format!("Field {}", field.label())),
            BackgroundColor(field_colour(field, state.focused)),
            Node {
                height: Val::Px(26.0),
                padding: UiRect::horizontal(Val::Px(6.0)),
                align_items: AlignItems::Center,
                ..default()
            },
        ))
        .with_child((
            InputFieldText(field),
            Text::new(field_display(&state.inputs, field, state.focused)),
            TextFont {
                font_size: 15.0,
                ..default()
            },
        ));
}

/// Right-hand panel: a caption and text field per input, the Apply button
/// and the status line.
pub fn spawn_site_panel_ui(mut commands: Commands, state: Res<SitePanelState>) {
    commands
        .spawn((
            SitePanelRoot,
            Name::new("SitePanel"),
            // Lets the drag tool see presses over the panel background.
            Interaction::default(),
            BackgroundColor(PANEL_COLOUR),
            Node {
                width: Val::Px(PANEL_WIDTH),
                position_type: PositionType::Absolute,
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(12.0)),
                row_gap: Val::Px(6.0),
                ..default()
            },
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new("Site"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
            ));

            for field in SiteField::ALL {
                spawn_field_row(panel, field, &state);
            }

            panel
                .spawn((
                    ApplyButton,
                    Button,
                    Name::new("ApplyButton"),
                    BackgroundColor(APPLY_COLOUR),
                    Node {
                        height: Val::Px(36.0),
                        margin: UiRect::top(Val::Px(8.0)),
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                ))
                .with_child((
                    Text::new("Apply"),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                ));

            panel.spawn((
                StatusText,
                Name::new("Status"),
                Text::new(""),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(STATUS_OK_COLOUR),
            ));
        });
}

/// Show the dimensions of the layout on screen whenever a new one is built,
/// including ones requested over RPC.
pub fn refill_panel_from_layout(layout: Res<SiteLayout>, mut state: ResMut<SitePanelState>) {
    if state.filled_from == Some(layout.generation) {
        return;
    }
    state.refill(
        layout.generation,
        SiteInputs::from_dimensions(&layout.dimensions),
    );
}

pub fn reflect_field_values(
    state: Res<SitePanelState>,
    mut texts: Query<(&InputFieldText, &mut Text)>,
    mut fields: Query<(&InputField, &Interaction, &mut BackgroundColor)>,
) {
    if !state.is_changed() {
        return;
    }

    for (InputFieldText(field), mut text) in &mut texts {
        let shown = field_display(&state.inputs, *field, state.focused);
        if text.0 != shown {
            text.0 = shown;
        }
    }
    for (InputField(field), interaction, mut bg) in &mut fields {
        if *interaction == Interaction::None {
            *bg = BackgroundColor(field_colour(*field, state.focused));
        }
    }
}

pub fn reflect_site_status(
    status: Res<SiteStatus>,
    mut q: Query<(&mut Text, &mut TextColor), With<StatusText>>,
) {
    if !status.is_changed() {
        return;
    }
    if let Ok((mut text, mut colour)) = q.single_mut() {
        text.0 = status.message.clone();
        *colour = TextColor(if status.is_error {
            STATUS_ERROR_COLOUR
        } else {
            STATUS_OK_COLOUR
        });
    }
}
