//! Spring physics
//!
//! A damped harmonic oscillator integrated with RK4. Large frame deltas are
//! split into fixed sub-steps so stiff configurations stay stable.

/// Largest integration step in seconds
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// Spring parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Speed (units/s) below which the spring may come to rest
    pub rest_speed_threshold: f32,
    /// Distance from target below which the spring may come to rest
    pub rest_displacement_threshold: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            rest_speed_threshold: 0.01,
            rest_displacement_threshold: 0.01,
        }
    }

    /// Override the rest thresholds
    pub const fn with_rest_thresholds(mut self, speed: f32, displacement: f32) -> Self {
        self.rest_speed_threshold = speed;
        self.rest_displacement_threshold = displacement;
        self
    }

    /// Fast, no visible overshoot
    pub const fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Slow and soft
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Quick with a little bounce
    pub const fn snappy() -> Self {
        Self::new(300.0, 20.0, 1.0)
    }

    /// Visible oscillation before rest
    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Settle animation for a dropped list item: light and overdamped so the
    /// item slides into its slot without bouncing past it.
    pub const fn settle() -> Self {
        Self::new(100.0, 20.0, 0.2).with_rest_thresholds(0.2, 0.2)
    }

    /// Whether every parameter is finite and physically meaningful
    pub fn is_valid(&self) -> bool {
        self.stiffness.is_finite()
            && self.damping.is_finite()
            && self.mass.is_finite()
            && self.stiffness > 0.0
            && self.damping >= 0.0
            && self.mass > 0.0
            && self.rest_speed_threshold >= 0.0
            && self.rest_displacement_threshold >= 0.0
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::settle()
    }
}

/// A single animated value driven by a spring
#[derive(Debug, Clone)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
    settled: bool,
}

impl Spring {
    /// Create a spring at rest at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            settled: true,
        }
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Retarget the spring. Current velocity is kept.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
        self.settled = self.at_rest();
        if self.settled {
            self.value = target;
            self.velocity = 0.0;
        }
    }

    /// Jump to a value with no motion
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.settled = true;
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.settled || dt <= 0.0 {
            return;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            self.rk4(h);
            remaining -= h;
        }

        if self.at_rest() {
            self.value = self.target;
            self.velocity = 0.0;
            self.settled = true;
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let displacement = x - self.target;
        (-self.config.stiffness * displacement - self.config.damping * v) / self.config.mass
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = self.acceleration(x, v);

        let k2x = v + 0.5 * h * k1v;
        let k2v = self.acceleration(x + 0.5 * h * k1x, k2x);

        let k3x = v + 0.5 * h * k2v;
        let k3v = self.acceleration(x + 0.5 * h * k2x, k3x);

        let k4x = v + h * k3v;
        let k4v = self.acceleration(x + h * k3x, k4x);

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }

    fn at_rest(&self) -> bool {
        self.velocity.abs() <= self.config.rest_speed_threshold
            && (self.value - self.target).abs() <= self.config.rest_displacement_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_new_spring_is_settled() {
        let spring = Spring::new(SpringConfig::default(), 5.0);
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 5.0);
        assert_eq!(spring.target(), 5.0);
    }

    #[test]
    fn test_spring_reaches_target() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(100.0);
        assert!(!spring.is_settled());

        run(&mut spring, 240);

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 100.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn test_settle_preset_does_not_overshoot() {
        let mut spring = Spring::new(SpringConfig::settle(), -120.0);
        spring.set_target(0.0);

        let mut max_seen = f32::MIN;
        for _ in 0..600 {
            spring.step(1.0 / 60.0);
            max_seen = max_seen.max(spring.value());
            if spring.is_settled() {
                break;
            }
        }
        assert!(spring.is_settled());
        assert!(max_seen <= 0.0 + 0.2);
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut spring = Spring::new(SpringConfig::snappy(), 0.0);
        spring.set_target(100.0);
        run(&mut spring, 5);
        let v = spring.velocity();
        assert!(v > 0.0);

        spring.set_target(200.0);
        assert_eq!(spring.velocity(), v);
    }

    #[test]
    fn test_set_target_to_current_value_stays_settled() {
        let mut spring = Spring::new(SpringConfig::default(), 10.0);
        spring.set_target(10.0);
        assert!(spring.is_settled());
    }

    #[test]
    fn test_large_dt_is_stable() {
        let mut spring = Spring::new(SpringConfig::new(3000.0, 110.0, 1.0), 50.0);
        spring.set_target(0.0);
        spring.step(0.5);
        assert!(spring.value().is_finite());
        assert!(spring.value().abs() < 50.0);
    }

    #[test]
    fn test_config_validity() {
        assert!(SpringConfig::settle().is_valid());
        assert!(!SpringConfig::new(0.0, 10.0, 1.0).is_valid());
        assert!(!SpringConfig::new(100.0, 10.0, 0.0).is_valid());
        assert!(!SpringConfig::new(f32::NAN, 10.0, 1.0).is_valid());
    }
}
