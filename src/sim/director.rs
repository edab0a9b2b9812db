//! Run director
//!
//! Owns the active stage, the countdown and the visual owner. Each tick it
//! feeds the countdown, forwards input to the stage, and reacts to the stage's
//! end condition: advance to the boss, or end the run and offer a restart.

use serde::{Deserialize, Serialize};

use super::asteroid_stage::AsteroidStage;
use super::boss_stage::BossStage;
use super::stage::{Stage, StageKind, StageSnapshot, StageStatus, TickInput};
use super::timer::Countdown;
use super::visual::{Scene, Visuals};
use crate::assets::Assets;
use crate::consts::MS_PER_UNIT;
use crate::settings::Settings;

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

/// Director state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectorPhase {
    Stage1Active,
    Stage2Active,
    /// Run just finished this tick
    Ended(Outcome),
    /// Frozen, restart affordance shown
    AwaitingRestart(Outcome),
}

/// Overall run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    InProgress,
    Win,
    Lose,
}

/// Notable transitions, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    StageStarted(StageKind),
    StageCleared(StageKind),
    TimeExpired(StageKind),
    RunEnded(Outcome),
    RestartAvailable(Outcome),
}

pub struct Director<V: Visuals> {
    settings: Settings,
    run_seed: u64,
    assets: Assets,
    visuals: V,
    timer: Countdown,
    stage: Box<dyn Stage>,
    phase: DirectorPhase,
    events: Vec<GameEvent>,
    ticks: u64,
}

impl<V: Visuals> Director<V> {
    /// Start a run at stage one. `assets` must already be resolved.
    pub fn new(settings: Settings, assets: Assets, mut visuals: V) -> Self {
        let run_seed = settings.resolve_seed();
        let stage = {
            let mut scene = Scene::new(&mut visuals, &assets);
            AsteroidStage::new(
                settings.stage_config(StageKind::Asteroids, run_seed),
                &mut scene,
            )
        };
        let mut timer = Countdown::new(settings.time_limit_ms);
        timer.start();
        log::info!("Run started (seed {})", run_seed);

        Self {
            settings,
            run_seed,
            assets,
            visuals,
            timer,
            stage: Box::new(stage),
            phase: DirectorPhase::Stage1Active,
            events: vec![GameEvent::StageStarted(StageKind::Asteroids)],
            ticks: 0,
        }
    }

    /// Advance one tick of `dt` time units
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> RunStatus {
        match self.phase {
            DirectorPhase::Ended(outcome) => {
                self.phase = DirectorPhase::AwaitingRestart(outcome);
                self.events.push(GameEvent::RestartAvailable(outcome));
                return self.run_status();
            }
            DirectorPhase::AwaitingRestart(_) => return self.run_status(),
            DirectorPhase::Stage1Active | DirectorPhase::Stage2Active => {}
        }
        self.ticks += 1;

        if self.timer.on_tick(f64::from(dt * MS_PER_UNIT)) {
            let kind = self.stage.kind();
            log::info!("Time expired in {:?} stage", kind);
            self.events.push(GameEvent::TimeExpired(kind));
            self.stage.expire();
        } else {
            let mut scene = Scene::new(&mut self.visuals, &self.assets);
            self.stage.update(dt, input, &mut scene);
        }

        match self.stage.evaluate_end_condition() {
            StageStatus::InProgress => {}
            StageStatus::Win => self.stage_won(),
            StageStatus::Lose => self.end_run(Outcome::Lose),
        }
        self.run_status()
    }

    fn stage_won(&mut self) {
        let kind = self.stage.kind();
        self.events.push(GameEvent::StageCleared(kind));
        match self.phase {
            DirectorPhase::Stage1Active => {
                log::info!("Asteroid field cleared after {} ticks", self.ticks);
                self.timer.stop();
                self.stage.reset_entities(&mut self.visuals);
                self.stage = self.build_stage(StageKind::Boss);
                self.timer.reset();
                self.timer.start();
                self.phase = DirectorPhase::Stage2Active;
                self.events.push(GameEvent::StageStarted(StageKind::Boss));
            }
            DirectorPhase::Stage2Active => self.end_run(Outcome::Win),
            DirectorPhase::Ended(_) | DirectorPhase::AwaitingRestart(_) => {}
        }
    }

    fn end_run(&mut self, outcome: Outcome) {
        self.timer.stop();
        self.phase = DirectorPhase::Ended(outcome);
        self.events.push(GameEvent::RunEnded(outcome));
        log::info!("Run ended: {:?} after {} ticks", outcome, self.ticks);
    }

    fn build_stage(&mut self, kind: StageKind) -> Box<dyn Stage> {
        let config = self.settings.stage_config(kind, self.run_seed);
        let mut scene = Scene::new(&mut self.visuals, &self.assets);
        match kind {
            StageKind::Asteroids => Box::new(AsteroidStage::new(config, &mut scene)),
            StageKind::Boss => Box::new(BossStage::new(config, &mut scene)),
        }
    }

    /// Start over from stage one. Only available once the run has ended.
    pub fn restart(&mut self) -> bool {
        if !self.can_restart() {
            return false;
        }
        self.stage.reset_entities(&mut self.visuals);
        self.stage = self.build_stage(StageKind::Asteroids);
        self.timer.reset();
        self.timer.start();
        self.phase = DirectorPhase::Stage1Active;
        self.ticks = 0;
        self.events.push(GameEvent::StageStarted(StageKind::Asteroids));
        log::info!("Run restarted (seed {})", self.run_seed);
        true
    }

    pub fn can_restart(&self) -> bool {
        matches!(
            self.phase,
            DirectorPhase::Ended(_) | DirectorPhase::AwaitingRestart(_)
        )
    }

    pub fn phase(&self) -> DirectorPhase {
        self.phase
    }

    pub fn run_status(&self) -> RunStatus {
        match self.phase {
            DirectorPhase::Stage1Active | DirectorPhase::Stage2Active => RunStatus::InProgress,
            DirectorPhase::Ended(Outcome::Win) | DirectorPhase::AwaitingRestart(Outcome::Win) => {
                RunStatus::Win
            }
            DirectorPhase::Ended(Outcome::Lose)
            | DirectorPhase::AwaitingRestart(Outcome::Lose) => RunStatus::Lose,
        }
    }

    pub fn stage(&self) -> &dyn Stage {
        self.stage.as_ref()
    }

    pub fn snapshot(&self) -> StageSnapshot {
        self.stage.snapshot()
    }

    pub fn timer(&self) -> &Countdown {
        &self.timer
    }

    pub fn visuals(&self) -> &V {
        &self.visuals
    }

    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
