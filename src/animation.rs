// Visual interpolation between two piece layouts.
//
// The authoritative `Pieces` are updated immediately; the animation is an overlay that only says
// where pieces should be drawn. Nothing else (legality, hit-testing) ever consults it.

use std::collections::HashMap;
use std::time::Duration;

use instant::Instant;
use itertools::Itertools;

use crate::config::AnimationMode;
use crate::context::BoardContext;
use crate::coord::Coord;
use crate::geometry::FPos;
use crate::grid::Pieces;
use crate::piece::Piece;


#[derive(Clone, Copy, PartialEq, Debug)]
pub struct AnimatedPiece {
    pub piece: Piece,
    pub start: FPos,
    pub end: FPos,
    pub current: FPos,
}

#[derive(Clone, Default, PartialEq, Debug)]
pub struct AnimationPlan {
    // Keyed by destination square.
    pub moves: HashMap<Coord, AnimatedPiece>,
    // Pieces that disappeared without moving anywhere (e.g. captured).
    pub fadings: Vec<(Coord, Piece)>,
}

#[derive(Clone, Debug)]
pub struct AnimationState {
    plan: AnimationPlan,
    started_at: Instant,
    duration: Duration,
    // Eased progress, from 0 to 1.
    progress: f64,
}

impl AnimationPlan {
    pub fn is_empty(&self) -> bool { self.moves.is_empty() && self.fadings.is_empty() }
}

impl AnimationState {
    pub fn new(plan: AnimationPlan, started_at: Instant, duration: Duration) -> Self {
        AnimationState { plan, started_at, duration, progress: 0. }
    }

    pub fn plan(&self) -> &AnimationPlan { &self.plan }
    pub fn started_at(&self) -> Instant { self.started_at }
    pub fn duration(&self) -> Duration { self.duration }
    pub fn progress(&self) -> f64 { self.progress }

    pub fn elapsed(&self, now: Instant) -> Duration {
        if now > self.started_at { now - self.started_at } else { Duration::ZERO }
    }

    // Where the piece that ends up on `coord` is drawn right now.
    pub fn position(&self, coord: Coord) -> Option<FPos> {
        self.plan.moves.get(&coord).map(|m| m.current)
    }

    // Opacity of fading pieces.
    pub fn fading_opacity(&self) -> f64 { 1. - self.progress }

    // Advances the interpolation. Returns false once the animation is over.
    pub fn tick(&mut self, now: Instant) -> bool {
        let elapsed = self.elapsed(now);
        if elapsed >= self.duration {
            self.progress = 1.;
            for m in self.plan.moves.values_mut() {
                m.current = m.end;
            }
            return false;
        }
        self.progress = ease_in_out_cubic(elapsed.as_secs_f64() / self.duration.as_secs_f64());
        for m in self.plan.moves.values_mut() {
            m.current = m.start.lerp(m.end, self.progress);
        }
        true
    }
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4. * t * t * t
    } else {
        (t - 1.) * (2. * t - 2.) * (2. * t - 2.) + 1.
    }
}

fn distance_sq(a: Coord, b: Coord) -> i32 {
    let (dx, dy) = a - b;
    i32::from(dx) * i32::from(dx) + i32::from(dy) * i32::from(dy)
}

// Matches every newly occupied square with the closest vanished piece of the same kind and
// force. If an animation is running, pieces start from where they are currently drawn rather
// than from their squares, so that superseding an animation doesn't make them jump.
pub fn compute_plan(prev: &Pieces, next: &Pieces, running: Option<&AnimationState>) -> AnimationPlan {
    let mut missing = vec![];
    let mut new = vec![];
    for coord in Coord::all() {
        match (prev[coord], next[coord]) {
            (Some(p), Some(n)) if p == n => {}
            (Some(p), Some(n)) => {
                missing.push((coord, p));
                new.push((coord, n));
            }
            (Some(p), None) => missing.push((coord, p)),
            (None, Some(n)) => new.push((coord, n)),
            (None, None) => {}
        }
    }

    let mut plan = AnimationPlan::default();
    let mut matched = vec![false; missing.len()];
    for (to, piece) in new {
        let closest = missing
            .iter()
            .enumerate()
            .filter(|&(idx, &(_, p))| !matched[idx] && p == piece)
            .min_by_key(|&(_, &(from, _))| distance_sq(from, to));
        let Some((idx, &(from, _))) = closest else {
            // A piece that appeared out of nowhere is shown in place.
            continue;
        };
        matched[idx] = true;
        let start = running
            .and_then(|r| r.position(from))
            .unwrap_or_else(|| FPos::square_pivot(from));
        let end = FPos::square_pivot(to);
        plan.moves.insert(to, AnimatedPiece { piece, start, end, current: start });
    }
    // Pieces of the running animation that are still on their way and untouched by this change
    // keep moving from where they are drawn.
    if let Some(running) = running {
        for (&coord, m) in &running.plan.moves {
            let untouched = prev[coord] == Some(m.piece) && next[coord] == Some(m.piece);
            if untouched && m.current != m.end && !plan.moves.contains_key(&coord) {
                plan.moves.insert(coord, AnimatedPiece { start: m.current, ..*m });
            }
        }
    }
    plan.fadings = missing
        .into_iter()
        .zip_eq(matched)
        .filter(|(_, matched)| !matched)
        .map(|(fading, _)| fading)
        .collect();
    plan
}

// Applies a layout mutation and, if enabled, animates the transition. A new animation replaces
// the running one.
pub fn animate<R>(ctx: &mut BoardContext, mutate: impl FnOnce(&mut BoardContext) -> R) -> R {
    let AnimationMode::Enabled(duration) = ctx.settings.animation else {
        return mutate(ctx);
    };
    let prev = ctx.pieces.clone();
    let result = mutate(ctx);
    let plan = compute_plan(&prev, &ctx.pieces, ctx.animation.as_ref());
    if !plan.is_empty() {
        log::trace!("Animating {} moves and {} fadings", plan.moves.len(), plan.fadings.len());
        ctx.animation = Some(AnimationState::new(plan, Instant::now(), duration));
    }
    result
}

// Applies a layout mutation that must be shown immediately, e.g. dropping a dragged piece.
pub fn without_animation<R>(
    ctx: &mut BoardContext, mutate: impl FnOnce(&mut BoardContext) -> R,
) -> R {
    ctx.animation = None;
    mutate(ctx)
}

// Returns whether an animation is still running.
pub fn tick(ctx: &mut BoardContext, now: Instant) -> bool {
    let Some(animation) = ctx.animation.as_mut() else {
        return false;
    };
    if animation.tick(now) {
        true
    } else {
        ctx.animation = None;
        false
    }
}
