//! HUD text model
//!
//! Turns a `GameState` snapshot into the strings and colours a renderer would
//! draw. Nothing here mutates the simulation.

use glam::Vec2;
use serde::Serialize;

use crate::sim::input::input_name;
use crate::sim::item::{Item, ItemKind};
use crate::sim::math::Color;
use crate::sim::state::{GameState, Monster, Player};

/// Offset of an info card from the cursor
pub const INFO_CARD_OFFSET: Vec2 = Vec2::new(10.0, 20.0);

/// One coloured run of text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub text: String,
    pub color: Color,
}

impl TextLine {
    fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// A tooltip anchored near the cursor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoCard {
    pub anchor: Vec2,
    pub lines: Vec<TextLine>,
}

/// Inventory row: `"<key>: <name>"` plus optional badges
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryLine {
    pub label: String,
    /// `"  ×N"` for limited-use items
    pub uses: Option<String>,
    /// `"  [N.NNs]"` while cooling down
    pub cooldown: Option<String>,
}

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub mode: &'static str,
    pub hint: &'static str,
    pub inventory: Vec<InventoryLine>,
    pub info_card: Option<InfoCard>,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let info_card = state
            .mouseover_item()
            .map(|item| item_info_card(item, state.mouse_position))
            .or_else(|| {
                state
                    .mouseover_monster()
                    .map(|monster| monster_info_card(monster, state.mouse_position))
            });

        Self {
            mode: mode_banner(state),
            hint: mode_hint(state),
            inventory: inventory_lines(&state.player),
            info_card,
        }
    }
}

pub fn mode_banner(state: &GameState) -> &'static str {
    if state.is_drop_mode() {
        "Drop Mode"
    } else {
        "Normal Mode"
    }
}

pub fn mode_hint(state: &GameState) -> &'static str {
    if state.is_drop_mode() {
        "Press inventory key to drop items"
    } else if state.closest_item.is_some() {
        "Press a new key to pick up this item"
    } else {
        "Move to item to pick up, or press item's key to activate"
    }
}

pub fn inventory_lines(player: &Player) -> Vec<InventoryLine> {
    player
        .inventory
        .iter()
        .map(|(key, item)| InventoryLine {
            label: format!("{}: {}", input_name(*key), item.name),
            uses: item.uses_left().map(|n| format!("  \u{d7}{n}")),
            cooldown: item
                .cooldown
                .filter(|c| c.remaining() > 0.0)
                .map(|c| format!("  [{:.2}s]", c.remaining())),
        })
        .collect()
}

pub fn item_info_card(item: &Item, mouse: Vec2) -> InfoCard {
    let mut lines = vec![TextLine::new(item.name.clone(), Color::WHITE)];

    match item.kind {
        ItemKind::Health { healing_amount } => {
            lines.push(TextLine::new("Health item", Color::RED));
            lines.push(TextLine::new(format!("{healing_amount} healing amount"), Color::GREY));
        }
        ItemKind::Gun { projectile_damage } => {
            lines.push(TextLine::new("Projectile Weapon", Color::TAN));
            lines.push(TextLine::new(format!("{projectile_damage} damage"), Color::GREY));
        }
        ItemKind::Command(_) => lines.push(TextLine::new("[Command]", Color::GREY)),
    }

    if let Some(uses) = item.uses_left() {
        lines.push(TextLine::new(format!("Limited uses: {uses}"), Color::GREEN));
    }
    if let Some(cooldown) = item.cooldown {
        lines.push(TextLine::new(
            format!("Cooldown: {:.2} seconds", cooldown.max()),
            Color::GREEN,
        ));
    }

    InfoCard {
        anchor: mouse + INFO_CARD_OFFSET,
        lines,
    }
}

pub fn monster_info_card(monster: &Monster, mouse: Vec2) -> InfoCard {
    InfoCard {
        anchor: mouse + INFO_CARD_OFFSET,
        lines: vec![TextLine::new(monster.name.clone(), Color::WHITE)],
    }
}
