use serde::{Deserialize, Serialize};

use bonspiel_core::team::Team;

/// Data-driven tuning and geometry for the simulation.
///
/// Distances are in meters with the origin at the button; speeds are in
/// m/s. The friction model is tuned for a nominal 50 Hz tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Flat speed loss per tick (not per second).
    pub deceleration: f32,
    /// Lateral drift accumulated per tick per unit of current speed.
    pub curl_rate: f32,
    /// Fraction of friction removed at full sweep intensity (0..=1).
    pub sweep_friction_reduction: f32,
    /// Fraction of curl removed at full sweep intensity (0..=1).
    pub sweep_curl_reduction: f32,
    /// Sweep intensity decay between commands (intensity units/s).
    pub sweep_decay_rate: f32,
    /// Launch speed at power 0.0.
    pub min_launch_speed: f32,
    /// Launch speed at power 1.0.
    pub max_launch_speed: f32,
    /// Stone running-band radius.
    pub stone_radius: f32,
    /// Stone-on-stone collision restitution (0..=1).
    pub restitution: f32,
    /// Speeds below this snap to zero and the stone is considered stopped.
    pub stop_threshold: f32,
    /// Hog line distance from the button (toward the hack).
    pub hog_line_distance: f32,
    /// Back line distance from the button (past the house).
    pub back_line_distance: f32,
    /// Half the playable sheet width.
    pub sheet_half_width: f32,
    /// Outer ring (twelve-foot) radius.
    pub house_radius: f32,
    /// Launch position distance from the button.
    pub hack_distance: f32,
    /// Visual spin progress per unit of distance traveled (non-gameplay).
    pub spin_rate: f32,
    /// Ends per match.
    pub total_ends: u8,
    /// Team throwing last in end 1.
    pub first_hammer: Team,
    /// How long the end score stays on display before transitioning.
    pub score_display_secs: f32,
    /// Pause between ends before the next throw is requested.
    pub end_transition_secs: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            deceleration: 0.002,
            curl_rate: 6.0e-5,
            sweep_friction_reduction: 0.12,
            sweep_curl_reduction: 0.5,
            sweep_decay_rate: 4.0,
            min_launch_speed: 1.6,
            max_launch_speed: 2.4,
            stone_radius: 0.145,
            restitution: 0.9,
            stop_threshold: 0.05,
            hog_line_distance: 6.401,
            back_line_distance: 1.829,
            sheet_half_width: 2.375,
            house_radius: 1.829,
            hack_distance: 26.0,
            spin_rate: 0.4,
            total_ends: 8,
            first_hammer: Team::Red,
            score_display_secs: 4.0,
            end_transition_secs: 2.0,
        }
    }
}

impl SimConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("BONSPIEL_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        if let Ok(contents) = std::fs::read_to_string("config/bonspiel.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        Self::default()
    }

    /// Startup precondition check: a match must refuse to start on an
    /// inconsistent config rather than run with undefined geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::NotPositive { field: name, value })
            }
        }
        fn fraction(name: &'static str, value: f32) -> Result<(), ConfigError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::NotAFraction { field: name, value })
            }
        }

        positive("deceleration", self.deceleration)?;
        positive("curl_rate", self.curl_rate)?;
        positive("sweep_decay_rate", self.sweep_decay_rate)?;
        positive("min_launch_speed", self.min_launch_speed)?;
        positive("max_launch_speed", self.max_launch_speed)?;
        positive("stone_radius", self.stone_radius)?;
        positive("stop_threshold", self.stop_threshold)?;
        positive("hog_line_distance", self.hog_line_distance)?;
        positive("back_line_distance", self.back_line_distance)?;
        positive("sheet_half_width", self.sheet_half_width)?;
        positive("house_radius", self.house_radius)?;
        positive("hack_distance", self.hack_distance)?;
        positive("score_display_secs", self.score_display_secs)?;
        positive("end_transition_secs", self.end_transition_secs)?;

        fraction("sweep_friction_reduction", self.sweep_friction_reduction)?;
        fraction("sweep_curl_reduction", self.sweep_curl_reduction)?;
        fraction("restitution", self.restitution)?;

        if self.min_launch_speed >= self.max_launch_speed {
            return Err(ConfigError::BadSpeedRange {
                min: self.min_launch_speed,
                max: self.max_launch_speed,
            });
        }
        if self.stop_threshold >= self.min_launch_speed {
            return Err(ConfigError::StopAboveLaunch {
                threshold: self.stop_threshold,
                min: self.min_launch_speed,
            });
        }
        if self.hog_line_distance >= self.hack_distance {
            return Err(ConfigError::HogBeyondHack {
                hog: self.hog_line_distance,
                hack: self.hack_distance,
            });
        }
        if self.total_ends == 0 {
            return Err(ConfigError::NoEnds);
        }

        Ok(())
    }

    /// Launch speed for a normalized power value.
    pub fn launch_speed(&self, power: f32) -> f32 {
        let p = power.clamp(0.0, 1.0);
        self.min_launch_speed + p * (self.max_launch_speed - self.min_launch_speed)
    }

    /// A stone counts for scoring while its center is within this radius
    /// of the button (touching the outer ring counts).
    pub fn scoring_radius(&self) -> f32 {
        self.house_radius + self.stone_radius
    }
}

/// A config value that fails the startup preconditions.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NotPositive { field: &'static str, value: f32 },
    NotAFraction { field: &'static str, value: f32 },
    BadSpeedRange { min: f32, max: f32 },
    StopAboveLaunch { threshold: f32, min: f32 },
    HogBeyondHack { hog: f32, hack: f32 },
    NoEnds,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            },
            Self::NotAFraction { field, value } => {
                write!(f, "{field} must be within 0..=1, got {value}")
            },
            Self::BadSpeedRange { min, max } => {
                write!(f, "launch speed range is empty: min {min} >= max {max}")
            },
            Self::StopAboveLaunch { threshold, min } => {
                write!(
                    f,
                    "stop threshold {threshold} would stop stones at launch (min speed {min})"
                )
            },
            Self::HogBeyondHack { hog, hack } => {
                write!(f, "hog line at {hog} lies behind the hack at {hack}")
            },
            Self::NoEnds => write!(f, "total_ends must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
