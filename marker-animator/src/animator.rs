use std::collections::HashMap;

use seawatch_core::{Coordinate, MarkerSurface, Mmsi, Tick};
use tracing::debug;

pub static DEFAULT_ANIMATION_STEPS: u32 = 10;

/// Consumer-local marker state for one playback session.
///
/// Pure state machine, independent of any rendering toolkit and of how ticks
/// and animation frames are scheduled. The caller feeds it received ticks via
/// [`on_tick`](Self::on_tick) and rendering-frame callbacks via
/// [`on_frame`](Self::on_frame). A purely local, best-effort smoothing layer,
/// it never touches the authoritative observation data and never re-publishes.
pub struct MarkerAnimator<S> {
    surface: S,
    steps: u32,
    markers: HashMap<Mmsi, Coordinate>,
    animations: HashMap<Mmsi, Animation>,
    done: bool,
    disposed: bool,
}

struct Animation {
    from: Coordinate,
    to: Coordinate,
    step: u32,
}

impl<S: MarkerSurface> MarkerAnimator<S> {
    pub fn new(surface: S) -> Self {
        Self::with_steps(surface, DEFAULT_ANIMATION_STEPS)
    }

    pub fn with_steps(surface: S, steps: u32) -> Self {
        Self {
            surface,
            steps: steps.max(1),
            markers: HashMap::new(),
            animations: HashMap::new(),
            done: false,
            disposed: false,
        }
    }

    pub fn on_tick(&mut self, tick: &Tick) {
        if self.disposed || self.done {
            return;
        }

        if tick.done {
            debug!(trace_id = %tick.trace_id, "playback session complete");
            self.done = true;
            return;
        }

        let Self {
            surface,
            markers,
            animations,
            ..
        } = self;

        for observation in &tick.vessels {
            let target = Coordinate::new(observation.lat, observation.lon);

            match markers.get(&observation.mmsi).copied() {
                // First appearance of a vessel, place the marker immediately.
                None => {
                    markers.insert(observation.mmsi, target);
                    surface.create_marker(observation.mmsi, target);
                }
                // Supersedes any in-flight animation, starting from the
                // marker's current displayed position.
                Some(current) => {
                    animations.insert(
                        observation.mmsi,
                        Animation {
                            from: current,
                            to: target,
                            step: 0,
                        },
                    );
                }
            }
        }
    }

    /// Advances every in-flight animation by one rendering frame.
    pub fn on_frame(&mut self) {
        if self.disposed {
            return;
        }

        let Self {
            surface,
            steps,
            markers,
            animations,
            ..
        } = self;

        let mut finished = Vec::new();

        for (mmsi, animation) in animations.iter_mut() {
            animation.step += 1;

            let position = if animation.step >= *steps {
                finished.push(*mmsi);
                animation.to
            } else {
                let t = f64::from(animation.step) / f64::from(*steps);
                animation.from.lerp(animation.to, t)
            };

            markers.insert(*mmsi, position);
            surface.move_marker(*mmsi, position);
        }

        for mmsi in finished {
            animations.remove(&mmsi);
        }
    }

    /// Removes all markers belonging to this playback session and cancels any
    /// in-flight animations. Subsequent ticks and frames are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.animations.clear();

        let Self {
            surface, markers, ..
        } = self;

        for (mmsi, _) in markers.drain() {
            surface.remove_marker(mmsi);
        }
    }

    /// True once the terminal tick of the session has been received.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn has_active_animations(&self) -> bool {
        !self.animations.is_empty()
    }
}
