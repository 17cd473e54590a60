use bevy::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

use crate::asset::FireEffectAsset;
use crate::curves::FamilySplines;
use crate::emitter::EmitterPolicy;
use crate::particle::{Particle, ParticleFamily};

/// The live particles of one fire effect and everything needed to advance them.
///
/// Each frame, [`step`](Self::step) spawns new particles at a fixed rate, ages and
/// animates the survivors, integrates their motion and sorts them back to front
/// relative to a camera.
pub struct ParticlePool {
    particles: Vec<Particle>,
    // seconds of simulation not yet converted into spawn ticks, always in [0, 1 / spawn_rate)
    rate_limiter: f64,
    spawn_rate: f32,
    drag: f32,
    spin_rate: f32,
    emitters: Vec<EmitterPolicy>,
    splines: FamilySplines,
    rng: StdRng,
    spawned: [u64; 3],
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new(&FireEffectAsset::default())
    }
}

impl ParticlePool {
    /// Creates an empty pool simulating `effect`.
    ///
    /// The random stream is seeded from `effect.fixed_seed` when set, from the OS
    /// otherwise.
    ///
    /// # Panics
    ///
    /// Panics on the first update if one of the effect's curves has no control
    /// points. Effects loaded through the asset loader are validated beforehand.
    pub fn new(effect: &FireEffectAsset) -> Self {
        let rng = match effect.fixed_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            particles: Vec::new(),
            rate_limiter: 0.0,
            spawn_rate: effect.spawn_rate,
            drag: effect.drag,
            spin_rate: effect.spin_rate,
            emitters: effect.emitters.clone(),
            splines: FamilySplines::from_curves(&effect.curves),
            rng,
            spawned: [0; 3],
        }
    }

    /// The live particles, in draw order after the last update.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns `true` if no particle is alive.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Total particles of `family` spawned since creation or the last [`clear`](Self::clear).
    pub fn spawned(&self, family: ParticleFamily) -> u64 {
        self.spawned[family.index()]
    }

    /// Total particles of every family spawned since creation or the last clear.
    pub fn total_spawned(&self) -> u64 {
        self.spawned.iter().sum()
    }

    /// Simulation time carried over to the next spawn tick, in seconds.
    pub fn spawn_carry(&self) -> f64 {
        self.rate_limiter
    }

    /// The emitter policies, in spawn order.
    pub fn emitters(&self) -> &[EmitterPolicy] {
        &self.emitters
    }

    /// The lifetime curves, per family.
    pub fn splines(&self) -> &FamilySplines {
        &self.splines
    }

    /// Inserts an already built particle.
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Removes every particle and resets the spawn accumulator and counters.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.rate_limiter = 0.0;
        self.spawned = [0; 3];
    }

    /// Advances the pool by `dt` seconds: spawn, then update relative to `camera`.
    pub fn step(&mut self, dt: f32, camera: Vec3) {
        let ticks = self.add_particles(dt);
        self.update_particles(dt, camera);
        trace!(ticks, live = self.particles.len(), "fire pool step");
    }

    /// Accumulates `dt` and emits one batch per whole spawn tick it completes.
    ///
    /// Each tick asks every emitter for its multiplier's worth of particles, so the
    /// reference effect emits one flame, one smoke and two spark particles per tick.
    /// The fractional remainder carries to the next call, which keeps the long-run
    /// rate independent of how time is split into frames. Returns the number of
    /// ticks emitted. A negative `dt` neither emits nor drains the carry.
    pub fn add_particles(&mut self, dt: f32) -> u32 {
        let rate = f64::from(self.spawn_rate);
        self.rate_limiter += f64::from(dt.max(0.0));

        let ticks = (self.rate_limiter * rate).floor();
        if ticks < 1.0 {
            return 0;
        }
        self.rate_limiter -= ticks / rate;
        let ticks = ticks as u32;

        for emitter in &self.emitters {
            let count = ticks * emitter.multiplier;
            self.particles.reserve(count as usize);
            for _ in 0..count {
                self.particles.push(emitter.emit(&mut self.rng));
            }
            self.spawned[emitter.family.index()] += u64::from(count);
        }

        ticks
    }

    /// Ages, culls, animates and moves every particle, then sorts the pool back to
    /// front as seen from `camera`.
    pub fn update_particles(&mut self, dt: f32, camera: Vec3) {
        for particle in &mut self.particles {
            particle.life -= dt;
        }
        self.particles.retain(Particle::is_alive);

        let drag_factor = dt * self.drag;
        for particle in &mut self.particles {
            let t = particle.normalized_age();

            particle.rotation += dt * self.spin_rate;

            let sample = self.splines.get(particle.family).sample(t);
            particle.alpha = sample.alpha;
            particle.current_size = particle.size * sample.size;
            particle.colour = sample.colour;

            particle.position += particle.velocity * dt;

            // clamp per axis so drag alone can never flip the sign of a velocity component
            let drag = particle.velocity * drag_factor;
            let drag = particle.velocity.signum() * drag.abs().min(particle.velocity.abs());
            particle.velocity -= drag;
        }

        self.particles.sort_unstable_by(|a, b| {
            let da = camera.distance_squared(a.position);
            let db = camera.distance_squared(b.position);
            db.total_cmp(&da)
        });
    }
}
