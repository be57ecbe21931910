//! Game core: owns the world state and routes host input into it
//!
//! Input is a two-mode state machine. In pickup mode a key either picks up
//! the nearest touching item (unbound key) or activates what it holds (bound
//! key). In drop mode a key puts its item back into the world. Drop mode is
//! held by the `DROP` command's key.

use glam::Vec2;

use super::error::GameError;
use super::factory::EntityFactory;
use super::input::{Command, InputKey};
use super::item::ItemKind;
use super::math::Rect;
use super::random::Random;
use super::state::{GameEvent, GameState, InputMode, Player, Projectile};
use super::tick;
use crate::consts::*;
use crate::settings::Settings;

/// Salt separating the factory's stream from the game's own
const FACTORY_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// The simulation core
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    settings: Settings,
    factory: EntityFactory,
    random: Random,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        let random = match settings.seed {
            Some(seed) => Random::new(seed),
            None => Random::from_clock(),
        };
        let factory = EntityFactory::new(Random::new(random.seed() ^ FACTORY_STREAM));
        Self::with_parts(settings, factory, random)
    }

    /// Default settings with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Settings {
            seed: Some(seed),
            ..Settings::default()
        })
    }

    pub fn with_parts(settings: Settings, factory: EntityFactory, random: Random) -> Self {
        Self {
            state: GameState::default(),
            settings,
            factory,
            random,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Playable area items and monsters are scattered across
    pub fn arena(&self) -> Rect {
        Rect::from_size(self.settings.arena.width, self.settings.arena.height)
    }

    /// Reset everything and populate a fresh world
    pub fn new_game(&mut self) -> Result<(), GameError> {
        let size = self.settings.arena;
        if !size.is_valid() {
            return Err(GameError::InvalidArena {
                width: size.width,
                height: size.height,
            });
        }

        self.state = GameState::default();
        self.new_player()?;

        let arena = self.arena();
        for _ in 0..self.settings.world_items {
            let item = self.factory.generate_random_item()?;
            let position = self.random.position(&arena);
            self.state.world_items.push(item.at(position));
        }
        for _ in 0..self.settings.world_monsters {
            let monster = self.factory.generate_random_monster()?;
            let position = self.random.position(&arena);
            self.state.world_monsters.push(monster.at(position));
        }
        self.state.running = true;

        log::info!(
            "New game (seed {}): {} items, {} monsters",
            self.random.seed(),
            self.state.world_items.len(),
            self.state.world_monsters.len()
        );
        Ok(())
    }

    /// Fresh player holding only the built-in commands
    fn new_player(&mut self) -> Result<(), GameError> {
        let bindings = self.settings.key_bindings.clone();
        let mut player = Player::default();
        for (key, command) in bindings.commands() {
            if player.is_bound(key) {
                return Err(GameError::KeyAlreadyBound { key });
            }
            player.inventory.insert(key, self.factory.command(command));
        }
        self.state.player = player;
        self.state.refresh_facing();
        Ok(())
    }

    /// Per-frame tick
    pub fn update(&mut self, dt: f32) {
        tick::update(&mut self.state, dt);
    }

    /// Per-frame cleanup; call once per frame after the snapshot has been read.
    /// Events not drained by now are discarded.
    pub fn remove_dead_items(&mut self) {
        tick::remove_dead_entities(&mut self.state);
        if !self.state.events.is_empty() {
            log::trace!("Discarding {} undrained events", self.state.events.len());
            self.state.events.clear();
        }
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn process_key_input(&mut self, key: InputKey, down: bool) -> Result<(), GameError> {
        if self.state.is_drop_mode() {
            self.drop_item(key, down);
            return Ok(());
        }

        if self.state.player.is_bound(key) {
            self.activate_item(key, down);
            return Ok(());
        }

        match self.state.closest_item {
            Some(index) if down => self.pickup_item(key, index),
            _ => {
                if down {
                    log::debug!("Nothing to pick up for key {}", key.0);
                }
                Ok(())
            }
        }
    }

    /// Mouse buttons behave exactly like keys
    pub fn process_mouse_input(&mut self, button: i32, down: bool) -> Result<(), GameError> {
        self.process_key_input(InputKey::mouse(button), down)
    }

    pub fn process_mouse_motion(&mut self, x: f32, y: f32) {
        self.state.mouse_position = Vec2::new(x, y);
        self.state.refresh_facing();
    }

    /// Bind the world item at `index` to `key` and take it out of the world
    pub fn pickup_item(&mut self, key: InputKey, index: usize) -> Result<(), GameError> {
        if self.state.player.is_bound(key) {
            return Err(GameError::KeyAlreadyBound { key });
        }
        let item = self
            .state
            .world_items
            .get_mut(index)
            .filter(|item| item.alive)
            .ok_or(GameError::NoItemToPickUp { index })?;

        item.alive = false;
        let mut owned = item.clone();
        owned.alive = true;

        log::info!("Picked up {} on key {}", owned.name, key.0);
        self.state.events.push(GameEvent::ItemPickedUp {
            key,
            name: owned.name.clone(),
        });
        self.state.player.inventory.insert(key, owned);
        self.state.closest_item = None;
        self.state.mouseover_item = None;
        Ok(())
    }

    /// Drop-mode handling for one key edge
    pub fn drop_item(&mut self, key: InputKey, down: bool) {
        let Some(item) = self.state.player.inventory.get(&key) else {
            log::debug!("Key {} holds nothing, leaving drop mode", key.0);
            self.state.set_mode(InputMode::Pickup);
            return;
        };

        if let Some(command) = item.as_command() {
            if command == Command::Drop && !down {
                self.activate_command(command, down);
            } else if down {
                log::debug!("Cannot drop command {command}");
                self.state.events.push(GameEvent::DropRefused { key, command });
            }
            return;
        }

        let Some(mut item) = self.state.player.inventory.remove(&key) else {
            return;
        };
        let jitter = self.random.jitter(DROP_JITTER);
        item.position = self.state.player.position + jitter;
        item.alive = true;

        log::info!("Dropped {} from key {}", item.name, key.0);
        self.state.events.push(GameEvent::ItemDropped {
            key,
            name: item.name.clone(),
        });
        self.state.world_items.push(item);
        self.state.closest_item = None;
        self.state.mouseover_item = None;
        self.state.set_mode(InputMode::Pickup);
    }

    /// Activate whatever `key` holds
    pub fn activate_item(&mut self, key: InputKey, down: bool) {
        let Some(item) = self.state.player.inventory.get_mut(&key) else {
            return;
        };

        let kind = item.kind;
        if let ItemKind::Command(command) = kind {
            self.activate_command(command, down);
            return;
        }
        if !down {
            return;
        }

        let name = item.name.clone();
        if !item.can_activate() {
            log::debug!(
                "{name} not ready (cooldown {:.2}s, uses {:?})",
                item.cooldown_remaining(),
                item.uses_left()
            );
            self.state
                .events
                .push(GameEvent::ActivationRefused { key, name });
            return;
        }
        item.use_activation();
        self.state.events.push(GameEvent::ItemActivated { key, name });

        match kind {
            ItemKind::Health { healing_amount } => {
                self.state.player.health.heal(healing_amount);
            }
            ItemKind::Gun { projectile_damage } => {
                let position = self.state.player.position;
                let direction = self.state.player.direction;
                self.shoot_projectile(position, direction, projectile_damage);
            }
            ItemKind::Command(_) => {}
        }
    }

    /// Built-in command dispatch
    pub fn activate_command(&mut self, command: Command, down: bool) {
        let speed = if down { PLAYER_SPEED } else { 0.0 };
        let velocity = &mut self.state.player.velocity;
        match command {
            Command::Up => velocity.y = -speed,
            Command::Down => velocity.y = speed,
            Command::Left => velocity.x = -speed,
            Command::Right => velocity.x = speed,
            Command::Menu => {
                if down {
                    log::info!("Menu requested, stopping");
                    self.state.running = false;
                    self.state.events.push(GameEvent::QuitRequested);
                }
            }
            Command::Drop => {
                let mode = if down { InputMode::Drop } else { InputMode::Pickup };
                self.state.set_mode(mode);
            }
        }
    }

    /// Spawn a projectile flying along `direction`
    pub fn shoot_projectile(&mut self, position: Vec2, direction: Vec2, damage: i32) {
        let direction = direction.try_normalize().unwrap_or(Vec2::X);
        self.state.world_projectiles.push(Projectile {
            position,
            velocity: direction * PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
            damage,
            ttl: PROJECTILE_TTL,
        });
        self.state.events.push(GameEvent::ProjectileFired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::item::Item;
    use crate::sim::state::{Health, Monster, MonsterKind};

    const KEY_1: InputKey = InputKey('1' as i32);
    const KEY_2: InputKey = InputKey('2' as i32);

    fn game() -> Game {
        let mut game = Game::with_seed(1234);
        game.new_game().unwrap();
        game
    }

    /// Empty world with only the player, for hand-placed scenarios
    fn bare_game() -> Game {
        let mut game = game();
        game.state.world_items.clear();
        game.state.world_monsters.clear();
        game
    }

    fn gun(cooldown: f32) -> Item {
        Item::new("Gun", ItemKind::Gun { projectile_damage: 3 })
            .with_radius(15.0)
            .with_cooldown(cooldown)
    }

    fn place_under_player(game: &mut Game, item: Item) -> usize {
        let position = game.state.player.position;
        game.state.world_items.push(item.at(position));
        game.update(0.0);
        game.state.closest_item.unwrap()
    }

    #[test]
    fn test_new_game_populates_world() {
        let game = game();
        assert!(game.state.running);
        assert_eq!(game.state.wallclock, 0.0);
        assert_eq!(game.state.world_items.len(), WORLD_ITEM_COUNT);
        assert_eq!(game.state.world_monsters.len(), WORLD_MONSTER_COUNT);
        assert!(game.state.world_projectiles.is_empty());
        assert_eq!(game.state.mode, InputMode::Pickup);

        let arena = game.arena();
        assert!(game.state.world_items.iter().all(|i| arena.contains(i.position)));
        assert!(game.state.world_monsters.iter().all(|m| arena.contains(m.position)));

        let inv = &game.state.player.inventory;
        assert_eq!(inv.len(), 6);
        assert_eq!(inv[&InputKey::W].as_command(), Some(Command::Up));
        assert_eq!(inv[&InputKey::S].as_command(), Some(Command::Down));
        assert_eq!(inv[&InputKey::A].as_command(), Some(Command::Left));
        assert_eq!(inv[&InputKey::D].as_command(), Some(Command::Right));
        assert_eq!(inv[&InputKey::ESCAPE].as_command(), Some(Command::Menu));
        assert_eq!(inv[&InputKey::TAB].as_command(), Some(Command::Drop));
        assert_eq!(game.state.player.key_for_command(Command::Drop), Some(InputKey::TAB));
    }

    #[test]
    fn test_new_game_is_deterministic_per_seed() {
        let a = game();
        let b = game();
        let pos = |g: &Game| g.state.world_items.iter().map(|i| i.position).collect::<Vec<_>>();
        assert_eq!(pos(&a), pos(&b));
    }

    #[test]
    fn test_first_frame_changes_nothing_but_time() {
        let mut game = game();
        let before = game.state.player.position;
        game.update(0.016);
        assert_eq!(game.state.player.position, before);
        assert!((game.state.wallclock - 0.016).abs() < 1e-6);
        game.remove_dead_items();
        assert_eq!(game.state.world_items.len(), WORLD_ITEM_COUNT);
        assert_eq!(game.state.world_monsters.len(), WORLD_MONSTER_COUNT);
    }

    #[test]
    fn test_movement_commands() {
        let mut game = bare_game();
        game.process_key_input(InputKey::D, true).unwrap();
        game.process_key_input(InputKey::W, true).unwrap();
        assert_eq!(game.state.player.velocity, Vec2::new(PLAYER_SPEED, -PLAYER_SPEED));

        game.update(0.5);
        assert_eq!(game.state.player.position, Vec2::new(400.0, 0.0));

        game.process_key_input(InputKey::D, false).unwrap();
        game.process_key_input(InputKey::W, false).unwrap();
        assert_eq!(game.state.player.velocity, Vec2::ZERO);

        // Last key wins on an axis
        game.process_key_input(InputKey::A, true).unwrap();
        game.process_key_input(InputKey::D, true).unwrap();
        assert_eq!(game.state.player.velocity.x, PLAYER_SPEED);
    }

    #[test]
    fn test_menu_stops_game() {
        let mut game = bare_game();
        game.process_key_input(InputKey::ESCAPE, true).unwrap();
        assert!(!game.state.running);
        assert!(game.drain_events().contains(&GameEvent::QuitRequested));
    }

    #[test]
    fn test_pickup_binds_and_removes_from_world() {
        let mut game = bare_game();
        let index = place_under_player(&mut game, gun(1.0));

        game.process_key_input(KEY_1, true).unwrap();
        assert_eq!(game.state.player.inventory[&KEY_1].name, "Gun");
        assert!(game.state.player.inventory[&KEY_1].alive);
        assert!(!game.state.world_items[index].alive);
        assert_eq!(game.state.closest_item, None);

        // Releasing the key activates nothing (guns fire on the down edge)
        game.process_key_input(KEY_1, false).unwrap();
        assert!(game.state.world_projectiles.is_empty());

        // A dead item is not offered again before cleanup
        game.update(0.0);
        assert_eq!(game.state.closest_item, None);
        game.remove_dead_items();
        assert!(game.state.world_items.is_empty());
    }

    #[test]
    fn test_new_game_rejects_empty_arena() {
        let mut settings = Settings {
            seed: Some(1),
            ..Settings::default()
        };
        settings.arena.width = -10.0;
        let mut game = Game::new(settings);
        assert_eq!(
            game.new_game(),
            Err(GameError::InvalidArena { width: -10.0, height: ARENA_HEIGHT })
        );
        assert!(!game.state.running);
    }

    #[test]
    fn test_new_game_rejects_shared_command_key() {
        let mut settings = Settings {
            seed: Some(1),
            ..Settings::default()
        };
        settings.key_bindings.menu = InputKey::TAB;
        let mut game = Game::new(settings);
        assert_eq!(
            game.new_game(),
            Err(GameError::KeyAlreadyBound { key: InputKey::TAB })
        );
        assert!(!game.state.running);
    }

    #[test]
    fn test_cleanup_discards_undrained_events() {
        let mut game = bare_game();
        for _ in 0..100 {
            game.process_key_input(InputKey::TAB, true).unwrap();
            game.process_key_input(InputKey::TAB, false).unwrap();
            game.update(1.0 / 60.0);
            game.remove_dead_items();
        }
        assert!(game.state.events.is_empty());

        game.process_key_input(InputKey::TAB, true).unwrap();
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::InputModeChanged(InputMode::Drop)]
        );
    }

    #[test]
    fn test_pickup_on_release_does_nothing() {
        let mut game = bare_game();
        place_under_player(&mut game, gun(1.0));
        game.process_key_input(KEY_1, false).unwrap();
        assert!(!game.state.player.is_bound(KEY_1));
    }

    #[test]
    fn test_unbound_key_with_nothing_nearby_is_noop() {
        let mut game = bare_game();
        game.update(0.0);
        game.process_key_input(KEY_1, true).unwrap();
        assert!(!game.state.player.is_bound(KEY_1));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_pickup_onto_bound_key_is_an_error() {
        let mut game = bare_game();
        let index = place_under_player(&mut game, gun(1.0));
        assert_eq!(
            game.pickup_item(InputKey::W, index),
            Err(GameError::KeyAlreadyBound { key: InputKey::W })
        );
        assert!(game.state.world_items[index].alive);
        assert_eq!(
            game.pickup_item(KEY_1, 99),
            Err(GameError::NoItemToPickUp { index: 99 })
        );
    }

    #[test]
    fn test_gun_cooldown_scenario() {
        let mut game = bare_game();
        game.process_mouse_motion(800.0, 200.0);
        place_under_player(&mut game, gun(2.0));
        game.process_key_input(KEY_1, true).unwrap();
        game.process_key_input(KEY_1, false).unwrap();

        // t = 0: fires
        game.process_key_input(KEY_1, true).unwrap();
        assert_eq!(game.state.world_projectiles.len(), 1);
        let shot = &game.state.world_projectiles[0];
        assert!((shot.velocity.length() - PROJECTILE_SPEED).abs() < 1e-3);
        assert!(shot.velocity.normalize().abs_diff_eq(Vec2::X, 1e-5));
        assert_eq!(shot.damage, 3);
        assert_eq!(shot.ttl, PROJECTILE_TTL);
        assert_eq!(shot.radius, PROJECTILE_RADIUS);
        assert_eq!(game.state.player.inventory[&KEY_1].cooldown_remaining(), 2.0);

        // t = 1: still cooling down
        game.update(1.0);
        game.process_key_input(KEY_1, true).unwrap();
        assert_eq!(game.state.world_projectiles.len(), 1);
        assert!(game
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::ActivationRefused { .. })));

        // t = 2.1: ready again
        game.update(1.1);
        game.process_key_input(KEY_1, true).unwrap();
        assert_eq!(game.state.world_projectiles.len(), 2);
    }

    #[test]
    fn test_limited_uses_exhaust_after_n() {
        let mut game = bare_game();
        let kit = Item::new("HealthKit", ItemKind::Health { healing_amount: 5 })
            .with_radius(20.0)
            .with_cooldown(3.0)
            .with_limited_uses(3);
        place_under_player(&mut game, kit);
        game.process_key_input(KEY_2, true).unwrap();

        game.state.player.health = Health { current: 50, max: 100 };
        for _ in 0..3 {
            game.process_key_input(KEY_2, true).unwrap();
            game.update(3.0);
        }
        assert_eq!(game.state.player.health.current, 65);
        assert_eq!(game.state.player.inventory[&KEY_2].uses_left(), Some(0));

        game.process_key_input(KEY_2, true).unwrap();
        assert_eq!(game.state.player.health.current, 65);
        assert_eq!(game.state.player.inventory[&KEY_2].uses_left(), Some(0));
    }

    #[test]
    fn test_healing_clamps_to_max() {
        let mut game = bare_game();
        let kit = Item::new("HealthKit", ItemKind::Health { healing_amount: 20 });
        place_under_player(&mut game, kit);
        game.process_key_input(KEY_2, true).unwrap();
        game.state.player.health.current = 95;
        game.process_key_input(KEY_2, true).unwrap();
        assert_eq!(game.state.player.health.current, 100);
    }

    #[test]
    fn test_drop_mode_is_held_by_drop_key() {
        let mut game = bare_game();
        game.process_key_input(InputKey::TAB, true).unwrap();
        assert!(game.state.is_drop_mode());
        // Key repeat while held is ignored
        game.process_key_input(InputKey::TAB, true).unwrap();
        assert!(game.state.is_drop_mode());
        game.process_key_input(InputKey::TAB, false).unwrap();
        assert!(!game.state.is_drop_mode());
    }

    #[test]
    fn test_pickup_drop_round_trip() {
        let mut game = bare_game();
        let before = gun(2.0);
        place_under_player(&mut game, before.clone());
        game.process_key_input(KEY_1, true).unwrap();
        game.process_key_input(KEY_1, false).unwrap();
        game.remove_dead_items();
        assert!(game.state.world_items.is_empty());

        game.process_key_input(InputKey::TAB, true).unwrap();
        game.process_key_input(KEY_1, true).unwrap();

        assert!(!game.state.player.is_bound(KEY_1));
        assert!(!game.state.is_drop_mode());
        assert_eq!(game.state.world_items.len(), 1);
        let dropped = &game.state.world_items[0];
        assert!(dropped.alive);
        assert_eq!(dropped.name, before.name);
        assert_eq!(dropped.kind, before.kind);
        assert_eq!(dropped.cooldown, before.cooldown);
        assert_eq!(dropped.limited_uses, before.limited_uses);
        let offset = dropped.position - game.state.player.position;
        assert!(offset.x.abs() <= DROP_JITTER && offset.y.abs() <= DROP_JITTER);

        // Releasing TAB afterwards is harmless
        game.process_key_input(InputKey::TAB, false).unwrap();
        assert!(!game.state.is_drop_mode());
        assert!(game.state.player.is_bound(InputKey::TAB));
    }

    #[test]
    fn test_commands_cannot_be_dropped() {
        let mut game = bare_game();
        game.process_key_input(InputKey::TAB, true).unwrap();
        game.process_key_input(InputKey::W, true).unwrap();
        assert!(game.state.is_drop_mode());
        assert!(game.state.player.is_bound(InputKey::W));
        assert_eq!(game.state.player.velocity, Vec2::ZERO);
        assert!(game
            .drain_events()
            .contains(&GameEvent::DropRefused { key: InputKey::W, command: Command::Up }));
    }

    #[test]
    fn test_stray_key_cancels_drop_mode() {
        let mut game = bare_game();
        game.process_key_input(InputKey::TAB, true).unwrap();
        game.process_key_input(InputKey::SPACE, true).unwrap();
        assert!(!game.state.is_drop_mode());
    }

    #[test]
    fn test_mouse_button_binds_like_a_key() {
        let mut game = bare_game();
        game.process_mouse_motion(200.0, 500.0);
        place_under_player(&mut game, gun(0.5));
        game.process_mouse_input(1, true).unwrap();
        assert!(game.state.player.is_bound(InputKey::MOUSE_LEFT));
        game.process_mouse_input(1, false).unwrap();
        game.process_mouse_input(1, true).unwrap();
        let shot = &game.state.world_projectiles[0];
        assert!(shot.velocity.normalize().abs_diff_eq(Vec2::Y, 1e-5));
    }

    #[test]
    fn test_shot_kills_monster_end_to_end() {
        let mut game = bare_game();
        let target = game.state.player.position + Vec2::new(300.0, 0.0);
        game.state.world_monsters.push(
            Monster::new(MonsterKind::Shooter, "Shooter monster", 30.0, Health::full(2)).at(target),
        );
        game.process_mouse_motion(target.x, target.y);
        place_under_player(&mut game, gun(1.0));
        game.process_key_input(KEY_1, true).unwrap();
        game.process_key_input(KEY_1, false).unwrap();
        game.process_key_input(KEY_1, true).unwrap();

        for _ in 0..30 {
            game.update(1.0 / 60.0);
            game.remove_dead_items();
        }
        assert!(game.state.world_monsters.is_empty());
        assert!(game.state.world_projectiles.is_empty());
    }

    #[test]
    fn test_shoot_with_zero_direction_defaults_to_x() {
        let mut game = bare_game();
        game.shoot_projectile(Vec2::ZERO, Vec2::ZERO, 1);
        assert_eq!(game.state.world_projectiles[0].velocity, Vec2::X * PROJECTILE_SPEED);
    }
}
