//! Stage two: the boss fight
//!
//! The boss patrols, pauses, and drops one fireball at a time. Four bullet
//! hits win the stage; a fireball on the ship loses it.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::collides;
use super::entity::{AmmoDisplay, Boss, Bullet, Entity, Explosion, FireBall, Ship};
use super::stage::{
    Backdrop, Stage, StageConfig, StageKind, StageSnapshot, StageStatus, TickInput,
    advance_and_prune, apply_ship_input, out_of_offense, release_all,
};
use super::visual::{Scene, VisualKind, Visuals};
use crate::consts::FIREBALL_CADENCE;

pub struct BossStage {
    config: StageConfig,
    background: Backdrop,
    ammo_display: AmmoDisplay,
    ship: Ship,
    boss: Boss,
    /// At most one fireball in flight
    fireball: Option<FireBall>,
    bullets: Vec<Bullet>,
    explosions: Vec<Explosion>,
    /// Time since the last fireball was launched
    fire_cadence: f32,
    /// Ship was already destroyed when the current tick began
    ship_lost: bool,
    time_up: bool,
}

impl BossStage {
    pub fn new(config: StageConfig, scene: &mut Scene<'_>) -> Self {
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let background = Backdrop::new(VisualKind::BossBackground, scene);
        let ship = Ship::new(scene, config.starting_ammo);
        let ammo_display = AmmoDisplay::new(scene, ship.ammo());
        let boss = Boss::spawn(scene, &mut rng);
        log::info!(
            "Boss stage: {} hit points, {} rounds (seed {})",
            boss.hit_points(),
            config.starting_ammo,
            config.seed
        );

        Self {
            config,
            background,
            ammo_display,
            ship,
            boss,
            fireball: None,
            bullets: Vec::new(),
            explosions: Vec::new(),
            fire_cadence: 0.0,
            ship_lost: false,
            time_up: false,
        }
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn boss(&self) -> &Boss {
        &self.boss
    }

    pub fn fireball(&self) -> Option<&FireBall> {
        self.fireball.as_ref()
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn fire_cadence(&self) -> f32 {
        self.fire_cadence
    }

    fn advance_fireball(&mut self, dt: f32, scene: &mut Scene<'_>) {
        if let Some(fireball) = self.fireball.as_mut() {
            fireball.update(dt, scene);
        }
        if self.fireball.as_ref().is_some_and(FireBall::is_destroyed) {
            self.fireball = None;
        }
    }

    fn boss_shooting(&mut self, dt: f32, scene: &mut Scene<'_>) {
        self.fire_cadence += dt;
        if self.fire_cadence >= FIREBALL_CADENCE && self.fireball.is_none() {
            if let Some(fireball) = self.boss.shoot_fireball(scene) {
                self.fireball = Some(fireball);
                self.fire_cadence = 0.0;
            }
        }
    }

    fn resolve_collisions(&mut self, scene: &mut Scene<'_>) {
        let bullets = std::mem::take(&mut self.bullets);
        let mut survivors = Vec::with_capacity(bullets.len());

        for mut bullet in bullets {
            if !self.boss.is_destroyed() && collides(&self.boss, &bullet) {
                bullet.destroy(scene);
                let killed = self.boss.hit(scene.visuals);
                self.explosions
                    .push(Explosion::spawn(scene, bullet.position()));
                log::debug!(
                    "Boss hit, {} hit points left{}",
                    self.boss.hit_points(),
                    if killed { " (destroyed)" } else { "" }
                );
                continue;
            }

            let fireball_hit = self
                .fireball
                .as_ref()
                .is_some_and(|fireball| collides(fireball, &bullet));
            if fireball_hit {
                bullet.destroy(scene);
                if let Some(mut fireball) = self.fireball.take() {
                    if let Some(explosion) = fireball.destroy(scene) {
                        self.explosions.push(explosion);
                    }
                }
                log::debug!("Fireball shot down");
                continue;
            }

            survivors.push(bullet);
        }
        self.bullets = survivors;

        let ship_hit = !self.ship.is_destroyed()
            && self
                .fireball
                .as_ref()
                .is_some_and(|fireball| collides(fireball, &self.ship));
        if ship_hit {
            if let Some(explosion) = self.ship.destroy(scene) {
                self.explosions.push(explosion);
            }
            if let Some(mut fireball) = self.fireball.take() {
                fireball.release(scene.visuals);
            }
            log::debug!("Ship hit by fireball");
        }
    }
}

impl Stage for BossStage {
    fn kind(&self) -> StageKind {
        StageKind::Boss
    }

    fn update(&mut self, dt: f32, input: &TickInput, scene: &mut Scene<'_>) {
        self.ship_lost = self.ship.is_destroyed();

        apply_ship_input(
            &mut self.ship,
            &mut self.ammo_display,
            &mut self.bullets,
            input,
            dt,
            scene,
        );

        self.boss.update(dt, scene);
        advance_and_prune(&mut self.bullets, dt, scene);
        self.advance_fireball(dt, scene);
        advance_and_prune(&mut self.explosions, dt, scene);

        self.boss_shooting(dt, scene);
        self.resolve_collisions(scene);
    }

    fn evaluate_end_condition(&self) -> StageStatus {
        if self.boss.hit_points() == 0 {
            StageStatus::Win
        } else if self.time_up || self.ship_lost || out_of_offense(&self.ship, &self.bullets) {
            StageStatus::Lose
        } else {
            StageStatus::InProgress
        }
    }

    fn expire(&mut self) {
        self.time_up = true;
    }

    fn reset_entities(&mut self, visuals: &mut dyn Visuals) {
        release_all(&mut self.bullets, visuals);
        release_all(&mut self.explosions, visuals);
        if let Some(mut fireball) = self.fireball.take() {
            fireball.release(visuals);
        }
        self.boss.release(visuals);
        self.ship.release(visuals);
        self.ammo_display.release(visuals);
        self.background.release(visuals);
    }

    fn restart(&mut self, scene: &mut Scene<'_>) {
        self.reset_entities(scene.visuals);
        *self = Self::new(self.config, scene);
    }

    fn snapshot(&self) -> StageSnapshot {
        let targets = if self.boss.is_destroyed() {
            Vec::new()
        } else {
            vec![self.boss.position()]
        };
        StageSnapshot {
            kind: StageKind::Boss,
            ship: self.ship.position(),
            ship_destroyed: self.ship.is_destroyed(),
            ammo: self.ship.ammo(),
            bullets: self.bullets.len(),
            targets,
            boss_hit_points: Some(self.boss.hit_points()),
            fireball: self.fireball.as_ref().map(FireBall::position),
            explosions: self.explosions.len(),
        }
    }
}
