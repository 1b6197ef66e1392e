use bonspiel_core::stone::{StoneId, StoneState, Vec2};

use crate::config::SimConfig;

/// A single stone owned by the pool: position, trajectory state, and the
/// sweep/curl accumulators driving it.
///
/// The stone keeps the heading fixed from launch; curl is a lateral
/// offset from that straight base heading, accumulated with distance
/// traveled. A collision replaces the trajectory wholesale via
/// `set_velocity`, which restarts curl from the new heading.
#[derive(Debug, Clone)]
pub struct Stone {
    pub id: StoneId,
    pub position: Vec2,
    /// Unit vector along the launch direction.
    heading: Vec2,
    /// Scalar speed along `heading`.
    speed: f32,
    /// Accumulated lateral drift speed (applied along the right axis).
    lateral: f32,
    curl_sign: f32,
    /// Visual rotation progress (non-gameplay).
    spin: f32,
    /// Current sweep intensity, decaying between commands.
    sweep: f32,
    moving: bool,
    in_play: bool,
}

impl Stone {
    /// A parked stone: off the sheet, not in play.
    pub fn parked(id: StoneId, park_position: Vec2) -> Self {
        Self {
            id,
            position: park_position,
            heading: Vec2::new(0.0, 1.0),
            speed: 0.0,
            lateral: 0.0,
            curl_sign: 1.0,
            spin: 0.0,
            sweep: 0.0,
            moving: false,
            in_play: false,
        }
    }

    /// Start the stone's trajectory from the hack.
    pub fn launch(&mut self, origin: Vec2, speed: f32, aim_degrees: f32, curl_sign: f32) {
        let aim = aim_degrees.to_radians();
        self.position = origin;
        self.heading = Vec2::new(aim.sin(), aim.cos());
        self.speed = speed;
        self.lateral = 0.0;
        self.curl_sign = curl_sign;
        self.spin = 0.0;
        self.sweep = 0.0;
        self.moving = true;
        self.in_play = true;
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_in_play(&self) -> bool {
        self.in_play
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn sweep_intensity(&self) -> f32 {
        self.sweep
    }

    /// Raise sweep intensity for this tick. Within a tick the stone keeps
    /// the max of the current and supplied value; decay happens after
    /// integration so a single dropped sweep command does not instantly
    /// kill the effect.
    pub fn apply_sweep(&mut self, intensity: f32) {
        self.sweep = self.sweep.max(intensity.clamp(0.0, 1.0));
    }

    /// Advance one simulation tick. Returns true if the stone came to
    /// rest during this tick.
    pub fn integrate(&mut self, dt: f32, config: &SimConfig) -> bool {
        if !self.moving {
            return false;
        }

        let effective_friction =
            config.deceleration * (1.0 - self.sweep * config.sweep_friction_reduction);
        let effective_curl = config.curl_rate * (1.0 - self.sweep * config.sweep_curl_reduction);

        // Friction is a flat per-tick amount; curl grows with distance
        // traveled, weighted by current speed.
        self.speed = (self.speed - effective_friction).max(0.0);
        self.lateral += effective_curl * self.speed * self.curl_sign;

        let right = self.right_axis();
        self.position =
            self.position + self.heading * (self.speed * dt) + right * (self.lateral * dt);
        self.spin += self.speed * dt * config.spin_rate * self.curl_sign;

        self.sweep = (self.sweep - config.sweep_decay_rate * dt).max(0.0);

        if self.speed < config.stop_threshold {
            self.speed = 0.0;
            self.moving = false;
            return true;
        }
        false
    }

    /// Full plane velocity: forward component plus accumulated lateral drift.
    pub fn velocity(&self) -> Vec2 {
        self.heading * self.speed + self.right_axis() * self.lateral
    }

    /// Replace the trajectory after a collision. Curl restarts from the
    /// new heading; the moving flag is recomputed against the threshold.
    pub fn set_velocity(&mut self, velocity: Vec2, config: &SimConfig) {
        self.lateral = 0.0;
        let speed = velocity.length();
        match velocity.normalized() {
            Some(heading) if speed >= config.stop_threshold => {
                self.heading = heading;
                self.speed = speed;
                self.moving = true;
            },
            _ => {
                self.speed = 0.0;
                self.moving = false;
            },
        }
    }

    /// Immediate stop, independent of tick phase. Keeps the stone in play.
    pub fn force_stop(&mut self) {
        self.speed = 0.0;
        self.lateral = 0.0;
        self.sweep = 0.0;
        self.moving = false;
    }

    /// Immediate stop plus removal from play (boundary exit, sheet reset).
    pub fn force_out(&mut self) {
        self.force_stop();
        self.in_play = false;
    }

    pub fn snapshot(&self) -> StoneState {
        StoneState {
            id: self.id,
            position: self.position,
            velocity: self.velocity(),
            spin: self.spin,
            is_moving: self.moving,
            is_in_play: self.in_play,
        }
    }

    fn right_axis(&self) -> Vec2 {
        Vec2::new(self.heading.y, -self.heading.x)
    }
}
