//! Stage one: clear the asteroid field with a ten-round magazine

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::collides;
use super::entity::{AmmoDisplay, Asteroid, Bullet, Entity, Explosion, Ship};
use super::stage::{
    Backdrop, Stage, StageConfig, StageKind, StageSnapshot, StageStatus, TickInput,
    advance_and_prune, apply_ship_input, out_of_offense, release_all,
};
use super::visual::{Scene, VisualKind, Visuals};

pub struct AsteroidStage {
    config: StageConfig,
    background: Backdrop,
    ammo_display: AmmoDisplay,
    ship: Ship,
    asteroids: Vec<Asteroid>,
    bullets: Vec<Bullet>,
    explosions: Vec<Explosion>,
    time_up: bool,
}

impl AsteroidStage {
    pub fn new(config: StageConfig, scene: &mut Scene<'_>) -> Self {
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let background = Backdrop::new(VisualKind::AsteroidBackground, scene);
        let ship = Ship::new(scene, config.starting_ammo);
        let ammo_display = AmmoDisplay::new(scene, ship.ammo());
        let asteroids: Vec<Asteroid> = (0..config.asteroid_count)
            .map(|_| Asteroid::spawn(scene, &mut rng))
            .collect();
        log::info!(
            "Asteroid stage: {} asteroids, {} rounds (seed {})",
            asteroids.len(),
            config.starting_ammo,
            config.seed
        );

        Self {
            config,
            background,
            ammo_display,
            ship,
            asteroids,
            bullets: Vec::new(),
            explosions: Vec::new(),
            time_up: false,
        }
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    /// Each asteroid is consumed by at most one bullet and each bullet by at most one asteroid
    fn resolve_collisions(&mut self, scene: &mut Scene<'_>) {
        let asteroids = std::mem::take(&mut self.asteroids);
        let mut survivors = Vec::with_capacity(asteroids.len());

        for mut asteroid in asteroids {
            match self.bullets.iter().position(|b| collides(&asteroid, b)) {
                Some(index) => {
                    let mut bullet = self.bullets.remove(index);
                    bullet.destroy(scene);
                    if let Some(explosion) = asteroid.destroy(scene) {
                        self.explosions.push(explosion);
                    }
                    log::debug!("Asteroid hit at {:?}", asteroid.position());
                }
                None => survivors.push(asteroid),
            }
        }

        self.asteroids = survivors;
    }
}

impl Stage for AsteroidStage {
    fn kind(&self) -> StageKind {
        StageKind::Asteroids
    }

    fn update(&mut self, dt: f32, input: &TickInput, scene: &mut Scene<'_>) {
        apply_ship_input(
            &mut self.ship,
            &mut self.ammo_display,
            &mut self.bullets,
            input,
            dt,
            scene,
        );

        for asteroid in &mut self.asteroids {
            asteroid.update(dt, scene);
        }
        advance_and_prune(&mut self.bullets, dt, scene);
        advance_and_prune(&mut self.explosions, dt, scene);

        self.resolve_collisions(scene);
    }

    fn evaluate_end_condition(&self) -> StageStatus {
        if self.asteroids.is_empty() {
            StageStatus::Win
        } else if self.time_up || out_of_offense(&self.ship, &self.bullets) {
            StageStatus::Lose
        } else {
            StageStatus::InProgress
        }
    }

    fn expire(&mut self) {
        self.time_up = true;
    }

    fn reset_entities(&mut self, visuals: &mut dyn Visuals) {
        release_all(&mut self.asteroids, visuals);
        release_all(&mut self.bullets, visuals);
        release_all(&mut self.explosions, visuals);
        self.ship.release(visuals);
        self.ammo_display.release(visuals);
        self.background.release(visuals);
    }

    fn restart(&mut self, scene: &mut Scene<'_>) {
        self.reset_entities(scene.visuals);
        *self = Self::new(self.config, scene);
    }

    fn snapshot(&self) -> StageSnapshot {
        StageSnapshot {
            kind: StageKind::Asteroids,
            ship: self.ship.position(),
            ship_destroyed: self.ship.is_destroyed(),
            ammo: self.ship.ammo(),
            bullets: self.bullets.len(),
            targets: self.asteroids.iter().map(Asteroid::position).collect(),
            boss_hit_points: None,
            fireball: None,
            explosions: self.explosions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Assets;
    use crate::consts::*;
    use crate::sim::visual::VisualRegistry;

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    fn config(asteroids: usize, ammo: u32) -> StageConfig {
        StageConfig {
            seed: 42,
            asteroid_count: asteroids,
            starting_ammo: ammo,
        }
    }

    #[test]
    fn test_spawns_configured_field() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let stage = {
            let mut scene = Scene::new(&mut registry, &assets);
            AsteroidStage::new(StageConfig::default(), &mut scene)
        };
        assert_eq!(stage.asteroids().len(), ASTEROID_COUNT);
        assert_eq!(stage.ship().ammo(), STARTING_AMMO);
        assert_eq!(registry.count_of(VisualKind::Asteroid), ASTEROID_COUNT);
        assert_eq!(stage.evaluate_end_condition(), StageStatus::InProgress);
    }

    #[test]
    fn test_clearing_every_asteroid_wins() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);
        let mut stage = AsteroidStage::new(config(10, 10), &mut scene);
        let idle = TickInput::default();

        let mut shots = 0;
        while let Some(target) = stage.asteroids().first().map(Asteroid::position) {
            let before = stage.asteroids().len();
            let dx = target.x - stage.ship().position().x;
            stage.ship.move_by(dx, scene.visuals);
            stage.update(1.0, &fire(), &mut scene);
            shots += 1;
            while !stage.bullets().is_empty() {
                stage.update(1.0, &idle, &mut scene);
            }
            assert_eq!(stage.asteroids().len(), before - 1);
            assert!(shots <= 10);
        }

        assert_eq!(shots, 10);
        assert!(stage.asteroids().is_empty());
        assert_eq!(stage.ship().ammo(), 0);
        assert_eq!(stage.evaluate_end_condition(), StageStatus::Win);
    }

    #[test]
    fn test_out_of_ammo_with_asteroids_left_loses() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);
        let stage = AsteroidStage::new(config(3, 0), &mut scene);
        assert_eq!(stage.evaluate_end_condition(), StageStatus::Lose);
    }

    #[test]
    fn test_last_bullet_in_flight_is_not_terminal() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);
        let mut stage = AsteroidStage::new(config(1, 1), &mut scene);

        // Park the ship away from the single asteroid so the bullet misses
        let target = stage.asteroids()[0].position();
        let away = if target.x < WIDTH / 2.0 { WIDTH } else { -WIDTH };
        stage.ship.move_by(away, scene.visuals);
        stage.update(1.0, &fire(), &mut scene);
        assert_eq!(stage.ship().ammo(), 0);
        assert_eq!(stage.bullets().len(), 1);
        assert_eq!(stage.evaluate_end_condition(), StageStatus::InProgress);

        let idle = TickInput::default();
        while !stage.bullets().is_empty() {
            stage.update(1.0, &idle, &mut scene);
        }
        assert_eq!(stage.asteroids().len(), 1);
        assert_eq!(stage.evaluate_end_condition(), StageStatus::Lose);
    }

    #[test]
    fn test_one_bullet_destroys_one_asteroid() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);
        let mut stage = AsteroidStage::new(config(0, 10), &mut scene);

        // Two asteroids stacked on the same spot, one bullet already overlapping both
        let spot = glam::Vec2::new(400.0, 200.0);
        stage.asteroids.push(Asteroid::at(&mut scene, spot));
        stage.asteroids.push(Asteroid::at(&mut scene, spot));
        stage
            .bullets
            .push(Bullet::spawn(&mut scene, spot + glam::Vec2::new(0.0, 10.0)));

        stage.update(0.0, &TickInput::default(), &mut scene);
        assert_eq!(stage.asteroids().len(), 1);
        assert!(stage.bullets().is_empty());
        assert_eq!(stage.explosions().len(), 1);
    }

    #[test]
    fn test_timer_expiry_loses() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);
        let mut stage = AsteroidStage::new(config(5, 10), &mut scene);
        stage.expire();
        assert_eq!(stage.evaluate_end_condition(), StageStatus::Lose);
    }

    #[test]
    fn test_reset_releases_every_visual() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        {
            let mut scene = Scene::new(&mut registry, &assets);
            let mut stage = AsteroidStage::new(config(10, 10), &mut scene);
            stage.update(1.0, &fire(), &mut scene);
            stage.reset_entities(scene.visuals);
        }
        assert_eq!(registry.live_count(), 0);
        assert_eq!(registry.stale_commands(), 0);
    }

    #[test]
    fn test_restart_restores_initial_field() {
        let assets = Assets::builtin();
        let mut registry = VisualRegistry::new();
        let mut scene = Scene::new(&mut registry, &assets);
        let mut stage = AsteroidStage::new(config(10, 10), &mut scene);
        let initial = stage.snapshot();

        stage.update(1.0, &fire(), &mut scene);
        stage.update(1.0, &fire(), &mut scene);
        assert_eq!(stage.ship().ammo(), 8);

        stage.restart(&mut scene);
        assert_eq!(stage.snapshot(), initial);
    }
}
