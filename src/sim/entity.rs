//! Game entities
//!
//! Each entity owns exactly one visual handle (the boss also owns its pips)
//! and a destroyed flag that never flips back. Destroying an entity releases
//! its visual once; later calls are no-ops.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::visual::{Scene, VisualHandle, VisualKind, Visuals};
use crate::consts::*;

/// Shared capability set of every simulated object
pub trait Entity {
    /// Advance motion/animation by `dt` time units
    fn update(&mut self, dt: f32, scene: &mut Scene<'_>);

    /// Current screen-space bounding box
    fn bounds(&self) -> Rect;

    /// Mark destroyed and release the visual, possibly leaving an explosion behind.
    /// Returns `None` if the entity was already destroyed.
    fn destroy(&mut self, scene: &mut Scene<'_>) -> Option<Explosion>;

    /// Release the visual without any follow-up (stage teardown, leaving the screen)
    fn release(&mut self, visuals: &mut dyn Visuals);

    fn is_destroyed(&self) -> bool;
}

/// Position, size and visual bookkeeping shared by all entities
#[derive(Debug, Clone)]
struct Body {
    handle: VisualHandle,
    pos: Vec2,
    size: Vec2,
    destroyed: bool,
}

impl Body {
    fn spawn(kind: VisualKind, pos: Vec2, scene: &mut Scene<'_>) -> Self {
        let size = scene.assets.size_of(kind);
        let handle = scene.visuals.create_visual(kind, pos, size);
        Self {
            handle,
            pos,
            size,
            destroyed: false,
        }
    }

    /// Returns true only on the call that actually released the visual
    fn release(&mut self, visuals: &mut dyn Visuals) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        visuals.remove_visual(self.handle);
        true
    }

    fn sync_position(&self, visuals: &mut dyn Visuals) {
        visuals.set_visual_position(self.handle, self.pos.x, self.pos.y);
    }

    fn centered_bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

/// The player's ship: moves along a fixed row and fires a limited magazine
#[derive(Debug, Clone)]
pub struct Ship {
    body: Body,
    ammo: u32,
}

impl Ship {
    pub fn new(scene: &mut Scene<'_>, ammo: u32) -> Self {
        Self {
            body: Body::spawn(VisualKind::Ship, Vec2::new(WIDTH / 2.0, SHIP_Y), scene),
            ammo,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.pos
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn can_fire(&self) -> bool {
        !self.body.destroyed && self.ammo > 0
    }

    /// Slide horizontally, keeping the whole hull on screen
    pub fn move_by(&mut self, dx: f32, visuals: &mut dyn Visuals) {
        if self.body.destroyed {
            return;
        }
        let half = self.body.size.x / 2.0;
        self.body.pos.x = (self.body.pos.x + dx).clamp(half, WIDTH - half);
        self.body.sync_position(visuals);
    }

    /// Fire one bullet; refused (no bullet, ammo untouched) when empty
    pub fn fire(&mut self, scene: &mut Scene<'_>) -> Option<Bullet> {
        if !self.can_fire() {
            return None;
        }
        self.ammo -= 1;
        let origin = Vec2::new(self.body.pos.x - BULLET_X_OFFSET, self.body.pos.y);
        Some(Bullet::spawn(scene, origin))
    }
}

impl Entity for Ship {
    fn update(&mut self, _dt: f32, _scene: &mut Scene<'_>) {}

    fn bounds(&self) -> Rect {
        self.body.centered_bounds()
    }

    fn destroy(&mut self, scene: &mut Scene<'_>) -> Option<Explosion> {
        self.body
            .release(scene.visuals)
            .then(|| Explosion::spawn(scene, self.body.pos))
    }

    fn release(&mut self, visuals: &mut dyn Visuals) {
        self.body.release(visuals);
    }

    fn is_destroyed(&self) -> bool {
        self.body.destroyed
    }
}

// ── Asteroid ──────────────────────────────────────────────────────────────────

/// A spinning rock; one hit destroys it
#[derive(Debug, Clone)]
pub struct Asteroid {
    body: Body,
    rotation: f32,
}

impl Asteroid {
    /// Spawn at a random point in the padded upper band
    pub fn spawn(scene: &mut Scene<'_>, rng: &mut impl Rng) -> Self {
        let x = ASTEROID_PADDING + rng.random::<f32>() * (WIDTH - ASTEROID_PADDING * 2.0);
        let y = ASTEROID_PADDING + rng.random::<f32>() * (ASTEROID_BAND_BOTTOM - ASTEROID_PADDING);
        Self::at(scene, Vec2::new(x, y))
    }

    pub fn at(scene: &mut Scene<'_>, pos: Vec2) -> Self {
        Self {
            body: Body::spawn(VisualKind::Asteroid, pos, scene),
            rotation: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.pos
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }
}

impl Entity for Asteroid {
    fn update(&mut self, dt: f32, scene: &mut Scene<'_>) {
        if self.body.destroyed {
            return;
        }
        self.rotation += ASTEROID_SPIN * dt;
        scene
            .visuals
            .set_visual_rotation(self.body.handle, self.rotation);
    }

    fn bounds(&self) -> Rect {
        self.body.centered_bounds()
    }

    fn destroy(&mut self, scene: &mut Scene<'_>) -> Option<Explosion> {
        self.body
            .release(scene.visuals)
            .then(|| Explosion::spawn(scene, self.body.pos))
    }

    fn release(&mut self, visuals: &mut dyn Visuals) {
        self.body.release(visuals);
    }

    fn is_destroyed(&self) -> bool {
        self.body.destroyed
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

/// Player projectile. Position is the top-left corner of its box.
#[derive(Debug, Clone)]
pub struct Bullet {
    body: Body,
}

impl Bullet {
    pub fn spawn(scene: &mut Scene<'_>, top_left: Vec2) -> Self {
        Self {
            body: Body::spawn(VisualKind::Bullet, top_left, scene),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.pos
    }
}

impl Entity for Bullet {
    fn update(&mut self, dt: f32, scene: &mut Scene<'_>) {
        if self.body.destroyed {
            return;
        }
        self.body.pos.y -= BULLET_SPEED * dt;
        if self.body.pos.y < 0.0 {
            self.body.release(scene.visuals);
        } else {
            self.body.sync_position(scene.visuals);
        }
    }

    fn bounds(&self) -> Rect {
        Rect::from_top_left(self.body.pos, self.body.size)
    }

    fn destroy(&mut self, scene: &mut Scene<'_>) -> Option<Explosion> {
        self.body.release(scene.visuals);
        None
    }

    fn release(&mut self, visuals: &mut dyn Visuals) {
        self.body.release(visuals);
    }

    fn is_destroyed(&self) -> bool {
        self.body.destroyed
    }
}

// ── FireBall ──────────────────────────────────────────────────────────────────

/// Boss projectile falling toward the ship
#[derive(Debug, Clone)]
pub struct FireBall {
    body: Body,
}

impl FireBall {
    pub fn spawn(scene: &mut Scene<'_>, pos: Vec2) -> Self {
        Self {
            body: Body::spawn(VisualKind::FireBall, pos, scene),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.pos
    }
}

impl Entity for FireBall {
    fn update(&mut self, dt: f32, scene: &mut Scene<'_>) {
        if self.body.destroyed {
            return;
        }
        self.body.pos.y += FIREBALL_SPEED * dt;
        if self.body.pos.y > HEIGHT {
            self.body.release(scene.visuals);
        } else {
            self.body.sync_position(scene.visuals);
        }
    }

    fn bounds(&self) -> Rect {
        self.body.centered_bounds()
    }

    fn destroy(&mut self, scene: &mut Scene<'_>) -> Option<Explosion> {
        self.body
            .release(scene.visuals)
            .then(|| Explosion::spawn(scene, self.body.pos))
    }

    fn release(&mut self, visuals: &mut dyn Visuals) {
        self.body.release(visuals);
    }

    fn is_destroyed(&self) -> bool {
        self.body.destroyed
    }
}

// ── Explosion ─────────────────────────────────────────────────────────────────

/// Cosmetic burst that removes itself after `EXPLOSION_LIFETIME`
#[derive(Debug, Clone)]
pub struct Explosion {
    body: Body,
    rotation: f32,
    age: f32,
}

impl Explosion {
    pub fn spawn(scene: &mut Scene<'_>, pos: Vec2) -> Self {
        Self {
            body: Body::spawn(VisualKind::Explosion, pos, scene),
            rotation: 0.0,
            age: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.pos
    }

    pub fn age(&self) -> f32 {
        self.age
    }
}

impl Entity for Explosion {
    fn update(&mut self, dt: f32, scene: &mut Scene<'_>) {
        if self.body.destroyed {
            return;
        }
        self.age += dt;
        if self.age >= EXPLOSION_LIFETIME {
            self.body.release(scene.visuals);
            return;
        }
        self.rotation += EXPLOSION_SPIN * dt;
        scene
            .visuals
            .set_visual_rotation(self.body.handle, self.rotation);
    }

    fn bounds(&self) -> Rect {
        self.body.centered_bounds()
    }

    fn destroy(&mut self, scene: &mut Scene<'_>) -> Option<Explosion> {
        self.body.release(scene.visuals);
        None
    }

    fn release(&mut self, visuals: &mut dyn Visuals) {
        self.body.release(visuals);
    }

    fn is_destroyed(&self) -> bool {
        self.body.destroyed
    }
}

// ── Boss ──────────────────────────────────────────────────────────────────────

/// Stage-two enemy with a move/pause patrol and four hit-point pips
#[derive(Debug, Clone)]
pub struct Boss {
    body: Body,
    /// Pip visuals, popped from the back on each hit
    pips: Vec<VisualHandle>,
    pip_size: Vec2,
    moving_right: bool,
    /// Time spent in the current move phase
    travel: f32,
    /// Time spent paused
    pause: f32,
    rng: Pcg32,
}

impl Boss {
    pub fn spawn(scene: &mut Scene<'_>, rng: &mut impl Rng) -> Self {
        let mut rng = Pcg32::seed_from_u64(rng.random());
        let body = Body::spawn(VisualKind::Boss, Vec2::new(WIDTH / 2.0, BOSS_Y), scene);
        let pip_size = scene.assets.size_of(VisualKind::HitPoint);
        let mut boss = Self {
            body,
            pips: Vec::with_capacity(BOSS_HIT_POINTS),
            pip_size,
            moving_right: rng.random_bool(0.5),
            travel: 0.0,
            pause: 0.0,
            rng,
        };
        for i in 0..BOSS_HIT_POINTS {
            let pos = boss.pip_position(i);
            boss.pips.push(scene.visuals.create_visual(VisualKind::HitPoint, pos, pip_size));
        }
        boss
    }

    /// Pips sit in a row just above the body
    fn pip_position(&self, index: usize) -> Vec2 {
        let offset = Vec2::new(
            (index as f32 - 1.0) * self.pip_size.x,
            -self.body.size.y / 2.0 - self.pip_size.y / 2.0,
        );
        self.body.pos + offset
    }

    pub fn position(&self) -> Vec2 {
        self.body.pos
    }

    pub fn hit_points(&self) -> usize {
        self.pips.len()
    }

    pub fn moving_right(&self) -> bool {
        self.moving_right
    }

    pub fn is_paused(&self) -> bool {
        self.travel >= BOSS_TRAVEL_TIME
    }

    pub fn travel_time(&self) -> f32 {
        self.travel
    }

    pub fn pause_time(&self) -> f32 {
        self.pause
    }

    /// Take one hit: pop a pip, and destroy the boss on the last one.
    /// Returns true if this hit destroyed the boss.
    pub fn hit(&mut self, visuals: &mut dyn Visuals) -> bool {
        if self.body.destroyed {
            return false;
        }
        if let Some(pip) = self.pips.pop() {
            visuals.remove_visual(pip);
        }
        if self.pips.is_empty() {
            self.body.release(visuals);
            return true;
        }
        false
    }

    pub fn shoot_fireball(&self, scene: &mut Scene<'_>) -> Option<FireBall> {
        if self.body.destroyed {
            return None;
        }
        Some(FireBall::spawn(scene, self.body.pos))
    }

    fn patrol(&mut self, dt: f32) -> bool {
        self.travel += dt;
        if self.pause >= BOSS_PAUSE_TIME {
            self.travel = 0.0;
            self.pause = 0.0;
            self.moving_right = self.rng.random_bool(0.5);
        }
        if self.travel >= BOSS_TRAVEL_TIME {
            self.pause += dt;
            return false;
        }

        let half = self.body.size.x / 2.0;
        if self.body.pos.x < half {
            self.moving_right = true;
        }
        if self.body.pos.x > WIDTH - half {
            self.moving_right = false;
        }
        let step = BOSS_SPEED * dt;
        self.body.pos.x += if self.moving_right { step } else { -step };
        true
    }

    fn sync_visuals(&self, visuals: &mut dyn Visuals) {
        self.body.sync_position(visuals);
        for (i, pip) in self.pips.iter().enumerate() {
            let pos = self.pip_position(i);
            visuals.set_visual_position(*pip, pos.x, pos.y);
        }
    }
}

impl Entity for Boss {
    fn update(&mut self, dt: f32, scene: &mut Scene<'_>) {
        if self.body.destroyed {
            return;
        }
        if self.patrol(dt) {
            self.sync_visuals(scene.visuals);
        }
    }

    fn bounds(&self) -> Rect {
        let body = self.body.centered_bounds();
        if self.pips.is_empty() {
            return body;
        }
        Rect::new(
            body.x,
            body.y - self.pip_size.y,
            body.width,
            body.height + self.pip_size.y,
        )
    }

    fn destroy(&mut self, scene: &mut Scene<'_>) -> Option<Explosion> {
        self.release(scene.visuals);
        None
    }

    fn release(&mut self, visuals: &mut dyn Visuals) {
        for pip in self.pips.drain(..) {
            visuals.remove_visual(pip);
        }
        self.body.release(visuals);
    }

    fn is_destroyed(&self) -> bool {
        self.body.destroyed
    }
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Bullets-left readout in the top-left corner
#[derive(Debug, Clone)]
pub struct AmmoDisplay {
    handle: VisualHandle,
    shown: u32,
    released: bool,
}

impl AmmoDisplay {
    pub fn new(scene: &mut Scene<'_>, ammo: u32) -> Self {
        let handle = scene.spawn_visual(
            VisualKind::AmmoIcon,
            Vec2::new(AMMO_DISPLAY_X, AMMO_DISPLAY_Y),
        );
        scene.visuals.set_visual_text(handle, &ammo.to_string());
        Self {
            handle,
            shown: ammo,
            released: false,
        }
    }

    pub fn shown(&self) -> u32 {
        self.shown
    }

    pub fn refresh(&mut self, ammo: u32, visuals: &mut dyn Visuals) {
        if self.released || ammo == self.shown {
            return;
        }
        self.shown = ammo;
        visuals.set_visual_text(self.handle, &ammo.to_string());
    }

    pub fn release(&mut self, visuals: &mut dyn Visuals) {
        if !self.released {
            self.released = true;
            visuals.remove_visual(self.handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Assets;
    use crate::sim::visual::VisualRegistry;
    use proptest::prelude::*;

    #[test]
    fn test_ship_fire_spends_ammo() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);

        let mut ship = Ship::new(&mut scene, 2);
        let bullet = ship.fire(&mut scene).unwrap();
        assert_eq!(ship.ammo(), 1);
        assert_eq!(
            bullet.position(),
            Vec2::new(WIDTH / 2.0 - BULLET_X_OFFSET, SHIP_Y)
        );
        assert!(ship.fire(&mut scene).is_some());
        assert!(ship.fire(&mut scene).is_none());
        assert_eq!(ship.ammo(), 0);
    }

    proptest! {
        #[test]
        fn prop_fire_with_empty_magazine_is_refused(extra_attempts in 1usize..20) {
            let assets = Assets::builtin();
            let mut registry = VisualRegistry::new();
            let mut scene = Scene::new(&mut registry, &assets);
            let mut ship = Ship::new(&mut scene, 0);
            for _ in 0..extra_attempts {
                prop_assert!(ship.fire(&mut scene).is_none());
                prop_assert_eq!(ship.ammo(), 0);
            }
            drop(scene);
            prop_assert_eq!(registry.count_of(VisualKind::Bullet), 0);
        }

        #[test]
        fn prop_ammo_never_goes_negative(start in 0u32..15, attempts in 0usize..40) {
            let assets = Assets::builtin();
            let mut registry = VisualRegistry::new();
            let mut scene = Scene::new(&mut registry, &assets);
            let mut ship = Ship::new(&mut scene, start);
            let fired = (0..attempts).filter(|_| ship.fire(&mut scene).is_some()).count();
            prop_assert_eq!(fired, attempts.min(start as usize));
            prop_assert_eq!(ship.ammo() as usize, start as usize - fired);
        }
    }

    #[test]
    fn test_ship_move_is_clamped_to_screen() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);
        let mut ship = Ship::new(&mut scene, 10);
        let half = assets.size_of(VisualKind::Ship).x / 2.0;

        ship.move_by(-10_000.0, scene.visuals);
        assert_eq!(ship.position().x, half);
        ship.move_by(10_000.0, scene.visuals);
        assert_eq!(ship.position().x, WIDTH - half);
    }

    #[test]
    fn test_destroyed_ship_cannot_fire_or_move() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);
        let mut ship = Ship::new(&mut scene, 10);
        assert!(ship.destroy(&mut scene).is_some());
        let x = ship.position().x;
        ship.move_by(50.0, scene.visuals);
        assert_eq!(ship.position().x, x);
        assert!(ship.fire(&mut scene).is_none());
        assert_eq!(ship.ammo(), 10);
    }

    #[test]
    fn test_bullet_leaving_top_is_destroyed() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);

        let mut above = Bullet::spawn(&mut scene, Vec2::new(100.0, -1.0));
        let mut at_edge = Bullet::spawn(&mut scene, Vec2::new(100.0, 0.0));
        above.update(0.0, &mut scene);
        at_edge.update(0.0, &mut scene);
        assert!(above.is_destroyed());
        assert!(!at_edge.is_destroyed());
    }

    #[test]
    fn test_bullet_moves_up_scaled_by_dt() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);
        let mut bullet = Bullet::spawn(&mut scene, Vec2::new(100.0, 300.0));
        bullet.update(2.0, &mut scene);
        assert_eq!(bullet.position().y, 300.0 - BULLET_SPEED * 2.0);
    }

    #[test]
    fn test_fireball_falls_off_screen_without_explosion() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        {
            let mut scene = Scene::new(&mut registry, &assets);
            let mut fireball = FireBall::spawn(&mut scene, Vec2::new(100.0, HEIGHT - 5.0));
            fireball.update(1.0, &mut scene);
            assert!(fireball.is_destroyed());
            assert!(fireball.destroy(&mut scene).is_none());
        }
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_destroy_twice_yields_one_explosion() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        {
            let mut scene = Scene::new(&mut registry, &assets);
            let mut asteroid = Asteroid::at(&mut scene, Vec2::new(300.0, 200.0));
            let first = asteroid.destroy(&mut scene);
            let second = asteroid.destroy(&mut scene);
            assert!(first.is_some());
            assert!(second.is_none());
            assert_eq!(first.unwrap().position(), Vec2::new(300.0, 200.0));
        }
        assert_eq!(registry.count_of(VisualKind::Explosion), 1);
        assert_eq!(registry.count_of(VisualKind::Asteroid), 0);
        assert_eq!(registry.removed_count(), 1);
        assert_eq!(registry.stale_commands(), 0);
    }

    #[test]
    fn test_asteroid_spawns_inside_band() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let asteroid = Asteroid::spawn(&mut scene, &mut rng);
            let pos = asteroid.position();
            assert!(pos.x >= ASTEROID_PADDING && pos.x <= WIDTH - ASTEROID_PADDING);
            assert!(pos.y >= ASTEROID_PADDING && pos.y <= ASTEROID_BAND_BOTTOM);
        }
    }

    #[test]
    fn test_asteroid_spins() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);
        let mut asteroid = Asteroid::at(&mut scene, Vec2::new(300.0, 200.0));
        asteroid.update(2.0, &mut scene);
        assert!((asteroid.rotation() - ASTEROID_SPIN * 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_explosion_expires_after_lifetime() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        {
            let mut scene = Scene::new(&mut registry, &assets);
            let mut explosion = Explosion::spawn(&mut scene, Vec2::new(10.0, 10.0));
            for _ in 0..17 {
                explosion.update(1.0, &mut scene);
            }
            assert!(!explosion.is_destroyed());
            explosion.update(1.0, &mut scene);
            assert!(explosion.is_destroyed());
        }
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_boss_dies_on_fourth_hit() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        {
            let mut scene = Scene::new(&mut registry, &assets);
            let mut boss = Boss::spawn(&mut scene, &mut Pcg32::seed_from_u64(1));
            assert_eq!(boss.hit_points(), 4);
            for expected in [3, 2, 1] {
                assert!(!boss.hit(scene.visuals));
                assert_eq!(boss.hit_points(), expected);
                assert!(!boss.is_destroyed());
            }
            assert!(boss.hit(scene.visuals));
            assert_eq!(boss.hit_points(), 0);
            assert!(boss.is_destroyed());
            assert!(!boss.hit(scene.visuals));
            assert!(boss.shoot_fireball(&mut scene).is_none());
        }
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.stale_commands(), 0);
    }

    #[test]
    fn test_boss_patrol_pauses_and_resumes() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);
        let mut boss = Boss::spawn(&mut scene, &mut Pcg32::seed_from_u64(3));
        let dt = 10.0;

        // Nine moving ticks: travel 10..90
        for _ in 0..9 {
            let x = boss.position().x;
            boss.update(dt, &mut scene);
            assert_ne!(boss.position().x, x);
        }
        assert_eq!(boss.travel_time(), 90.0);

        // Travel reaches exactly 100: halt and start pausing
        let parked = boss.position().x;
        boss.update(dt, &mut scene);
        assert!(boss.is_paused());
        assert_eq!(boss.pause_time(), 10.0);
        assert_eq!(boss.position().x, parked);

        // Pause climbs to exactly 50 while the boss stays put
        for _ in 0..4 {
            boss.update(dt, &mut scene);
            assert_eq!(boss.position().x, parked);
        }
        assert_eq!(boss.pause_time(), 50.0);

        // Next tick resets both accumulators and moves again
        boss.update(dt, &mut scene);
        assert_eq!(boss.travel_time(), 0.0);
        assert_eq!(boss.pause_time(), 0.0);
        assert!(!boss.is_paused());
        assert_eq!((boss.position().x - parked).abs(), BOSS_SPEED * dt);
    }

    #[test]
    fn test_boss_turns_at_screen_edge() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);
        let mut boss = Boss::spawn(&mut scene, &mut Pcg32::seed_from_u64(9));
        boss.body.pos.x = 50.0;
        boss.moving_right = false;
        boss.update(1.0, &mut scene);
        assert!(boss.moving_right());
        assert_eq!(boss.position().x, 50.0 + BOSS_SPEED);
    }

    #[test]
    fn test_boss_bounds_include_pip_row() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);
        let boss = Boss::spawn(&mut scene, &mut Pcg32::seed_from_u64(1));
        let bounds = boss.bounds();
        assert_eq!(bounds.height, 230.0);
        assert_eq!(bounds.y, BOSS_Y - 100.0 - 30.0);
    }

    #[test]
    fn test_ammo_display_tracks_count() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);
        let mut display = AmmoDisplay::new(&mut scene, 10);
        let handle = display.handle;
        display.refresh(9, scene.visuals);
        assert_eq!(display.shown(), 9);
        assert_eq!(registry.get(handle).unwrap().text.as_deref(), Some("9"));

        display.release(&mut registry);
        display.refresh(8, &mut registry);
        assert_eq!(display.shown(), 9);
        assert_eq!(registry.live_count(), 0);
    }
}
