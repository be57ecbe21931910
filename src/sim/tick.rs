//! Per-frame simulation tick
//!
//! `update` advances the world by the host's `dt`; `remove_dead_entities` is
//! the separate cleanup pass the host runs once per frame, after the frame's
//! snapshot has been read.

use super::collision::{Nearest, circles_collide};
use super::state::{GameEvent, GameState};
use crate::consts::CURSOR_RADIUS;

/// Advance the game state by `dt` seconds (`dt >= 0`)
pub fn update(state: &mut GameState, dt: f32) {
    debug_assert!(dt >= 0.0, "negative frame time: {dt}");

    state.wallclock += dt;

    // Player and inventory
    let player = &mut state.player;
    player.position += player.velocity * dt;
    for item in player.inventory.values_mut() {
        item.tick(dt);
    }
    state.refresh_facing();

    let player_pos = state.player.position;
    let player_radius = state.player.radius;
    let mouse = state.mouse_position;

    // World items
    let mut closest = Nearest::new(player_pos);
    let mut hovered_item = Nearest::new(mouse);
    for (index, item) in state.world_items.iter_mut().enumerate() {
        item.tick(dt);
        if !item.alive {
            continue;
        }
        if circles_collide(player_pos, player_radius, item.position, item.radius) {
            closest.offer(index, item.position);
        }
        if circles_collide(mouse, CURSOR_RADIUS, item.position, item.radius) {
            hovered_item.offer(index, item.position);
        }
    }
    state.closest_item = closest.index();
    state.mouseover_item = hovered_item.index();

    // Projectiles: one hit each, first live monster in storage order
    for projectile in &mut state.world_projectiles {
        projectile.ttl -= dt;
        projectile.position += projectile.velocity * dt;
        if projectile.is_expired() {
            continue;
        }

        let target = state.world_monsters.iter().position(|m| {
            m.alive && circles_collide(projectile.position, projectile.radius, m.position, m.radius)
        });
        if let Some(index) = target {
            let monster = &mut state.world_monsters[index];
            monster.health.damage(projectile.damage);
            projectile.ttl = 0.0;
            log::debug!(
                "{} hit for {} ({} hp left)",
                monster.name,
                projectile.damage,
                monster.health.current
            );
            state.events.push(GameEvent::MonsterHit {
                index,
                damage: projectile.damage,
            });
        }
    }

    // Monsters
    let mut hovered_monster = Nearest::new(mouse);
    for (index, monster) in state.world_monsters.iter_mut().enumerate() {
        if monster.alive && monster.health.is_depleted() {
            monster.alive = false;
            log::info!("{} died", monster.name);
            state.events.push(GameEvent::MonsterKilled {
                index,
                name: monster.name.clone(),
            });
        }
        monster.position += monster.velocity * dt;
        if monster.alive && circles_collide(mouse, CURSOR_RADIUS, monster.position, monster.radius) {
            hovered_monster.offer(index, monster.position);
        }
    }
    state.mouseover_monster = hovered_monster.index();
}

/// Purge picked-up items, spent projectiles and dead monsters.
///
/// Clears every nearest/hover reference first; relative order of survivors is kept.
pub fn remove_dead_entities(state: &mut GameState) {
    state.invalidate_references();
    state.world_items.retain(|item| item.alive);
    state.world_projectiles.retain(|p| !p.is_expired());
    state.world_monsters.retain(|m| m.alive);
}
