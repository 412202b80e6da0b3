//! Timeline orchestration
//!
//! A timeline sequences tweens at offsets and plays them forward or in
//! reverse. Rendering is deterministic in the timeline's time: seeking to a
//! time always produces the same styles, regardless of how that time was
//! reached.
//!
//! # Example
//!
//! ```
//! use folio_animation::{Easing, Position, Props, Timeline};
//! use folio_platform::{Document, ElementKind, Size};
//!
//! let mut doc = Document::new(Size::new(800.0, 600.0));
//! let mark = doc.create_element(ElementKind::Div, None);
//!
//! let mut timeline = Timeline::new();
//! timeline.from_to(
//!     mark,
//!     Props::new().scale(1.5).opacity(0.0),
//!     Props::new().scale(1.0).opacity(1.0),
//!     800,
//!     Easing::EaseOutExpo,
//!     Position::Sequence,
//! );
//! timeline.to(
//!     mark,
//!     Props::new().scale(0.9).opacity(0.0),
//!     400,
//!     Easing::EaseInCubic,
//!     Position::AfterPrevious(300.0),
//! );
//! assert_eq!(timeline.duration_ms(), 1500.0);
//! ```

use folio_platform::{Document, ElementId};

use crate::easing::Easing;
use crate::tween::Tween;
use crate::values::Props;

/// Index of a tween inside its timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenIndex(usize);

/// Where a tween is placed on the timeline
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// At the current end of the timeline
    Sequence,
    /// At an absolute offset in milliseconds
    At(f32),
    /// Relative to the end of the previously added tween (negative overlaps)
    AfterPrevious(f32),
}

/// Playback state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not started, or parked at the start after reversing
    #[default]
    Idle,
    Playing,
    Paused,
    /// Reached the end (or the start, when reversing) and stopped
    Finished,
}

/// Playback direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

/// Events produced while ticking
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineEvent {
    /// Forward playback reached the end
    Completed,
    /// Reverse playback reached the start
    ReverseCompleted,
    /// A repeat iteration wrapped around
    Repeated,
}

/// A sequence of tweens with shared playback
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    tweens: Vec<Tween>,
    time_ms: f32,
    delay_ms: f32,
    delay_remaining_ms: f32,
    state: PlaybackState,
    direction: Direction,
    /// Extra iterations after the first (-1 for infinite)
    repeat: i32,
    iteration: i32,
    playback_rate: f32,
    dirty: bool,
    previous_end_ms: f32,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            playback_rate: 1.0,
            ..Default::default()
        }
    }

    /// Delay applied whenever forward playback starts from time zero
    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms as f32;
        self
    }

    // =========================================================================
    // Building
    // =========================================================================

    /// Add a tween at a position
    pub fn add(&mut self, mut tween: Tween, position: Position) -> TweenIndex {
        let start = match position {
            Position::Sequence => self.duration_ms(),
            Position::At(ms) => ms,
            Position::AfterPrevious(offset) => self.previous_end_ms + offset,
        };
        tween.set_start_ms(start);
        self.previous_end_ms = tween.end_ms();
        self.tweens.push(tween);
        self.dirty = true;
        TweenIndex(self.tweens.len() - 1)
    }

    /// Add a from/to tween
    pub fn from_to(
        &mut self,
        target: ElementId,
        from: Props,
        to: Props,
        duration_ms: u32,
        easing: Easing,
        position: Position,
    ) -> TweenIndex {
        self.add(Tween::from_to(target, from, to, duration_ms, easing), position)
    }

    /// Add a tween from the current values
    pub fn to(
        &mut self,
        target: ElementId,
        to: Props,
        duration_ms: u32,
        easing: Easing,
        position: Position,
    ) -> TweenIndex {
        self.add(Tween::to(target, to, duration_ms, easing), position)
    }

    /// Add one from/to tween per target, each offset by `each_ms`
    ///
    /// Returns the index of the first tween; the previous-end marker is
    /// left at the end of the last one.
    #[allow(clippy::too_many_arguments)]
    pub fn stagger_from_to(
        &mut self,
        targets: &[ElementId],
        from: Props,
        to: Props,
        duration_ms: u32,
        easing: Easing,
        position: Position,
        each_ms: f32,
    ) -> Option<TweenIndex> {
        let (first, rest) = targets.split_first()?;
        let index = self.from_to(*first, from.clone(), to.clone(), duration_ms, easing, position);
        let base = self.tweens[index.0].start_ms();
        for (i, target) in rest.iter().enumerate() {
            let start = base + each_ms * (i + 1) as f32;
            self.from_to(*target, from.clone(), to.clone(), duration_ms, easing, Position::At(start));
        }
        Some(index)
    }

    /// Set repeat count (-1 for infinite)
    pub fn set_repeat(&mut self, count: i32) {
        self.repeat = count;
    }

    /// Set playback rate (1.0 = normal speed, 2.0 = 2x speed)
    pub fn set_playback_rate(&mut self, rate: f32) {
        self.playback_rate = rate.max(0.0);
    }

    pub fn playback_rate(&self) -> f32 {
        self.playback_rate
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Total duration of one iteration
    pub fn duration_ms(&self) -> f32 {
        self.tweens.iter().map(Tween::end_ms).fold(0.0, f32::max)
    }

    pub fn time_ms(&self) -> f32 {
        self.time_ms
    }

    /// Progress of the current iteration (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        let duration = self.duration_ms();
        if duration <= 0.0 {
            let finished = self.state == PlaybackState::Finished && self.direction == Direction::Forward;
            return if finished { 1.0 } else { 0.0 };
        }
        (self.time_ms / duration).clamp(0.0, 1.0)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Whether a delay is still counting down
    pub fn is_delayed(&self) -> bool {
        self.is_playing() && self.delay_remaining_ms > 0.0
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn tween(&self, index: TweenIndex) -> Option<&Tween> {
        self.tweens.get(index.0)
    }

    /// Whether the styles need rewriting on the next render
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // =========================================================================
    // Playback control
    // =========================================================================

    /// Play forward from the current time
    ///
    /// Playing a timeline that already finished forward is a no-op.
    pub fn play(&mut self) {
        if self.direction == Direction::Forward
            && matches!(self.state, PlaybackState::Playing | PlaybackState::Finished)
        {
            return;
        }
        if self.time_ms <= 0.0 {
            self.delay_remaining_ms = self.delay_ms;
        }
        self.direction = Direction::Forward;
        self.state = PlaybackState::Playing;
        self.dirty = true;
    }

    /// Play backward from the current time toward zero
    ///
    /// A timeline parked at zero stays idle; reversing an in-flight delay
    /// cancels it.
    pub fn reverse(&mut self) {
        self.delay_remaining_ms = 0.0;
        self.direction = Direction::Reverse;
        self.state = if self.time_ms > 0.0 {
            PlaybackState::Playing
        } else {
            PlaybackState::Idle
        };
        self.dirty = true;
    }

    /// Jump to zero and play forward
    pub fn restart(&mut self) {
        self.time_ms = 0.0;
        self.iteration = 0;
        self.state = PlaybackState::Idle;
        self.direction = Direction::Forward;
        self.play();
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
    }

    /// Jump to a time, stopping playback
    pub fn seek(&mut self, time_ms: f32) {
        self.time_ms = time_ms.clamp(0.0, self.duration_ms());
        self.delay_remaining_ms = 0.0;
        self.state = PlaybackState::Paused;
        self.dirty = true;
    }

    /// Jump to a fraction of the duration, stopping playback
    pub fn set_progress(&mut self, progress: f32) {
        self.seek(progress.clamp(0.0, 1.0) * self.duration_ms());
    }

    /// Advance playback by `dt_ms` of wall time
    pub fn tick(&mut self, dt_ms: f32) -> Option<TimelineEvent> {
        if self.state != PlaybackState::Playing {
            return None;
        }

        let mut dt = dt_ms * self.playback_rate;
        if self.delay_remaining_ms > 0.0 {
            let consumed = dt.min(self.delay_remaining_ms);
            self.delay_remaining_ms -= consumed;
            dt -= consumed;
            if dt <= 0.0 {
                return None;
            }
        }

        let duration = self.duration_ms();
        self.dirty = true;

        match self.direction {
            Direction::Forward => {
                self.time_ms += dt;
                if self.time_ms < duration {
                    return None;
                }
                let can_repeat = self.repeat < 0 || self.iteration < self.repeat;
                if can_repeat && duration > 0.0 {
                    self.iteration += 1;
                    self.time_ms %= duration;
                    Some(TimelineEvent::Repeated)
                } else {
                    self.time_ms = duration;
                    self.state = PlaybackState::Finished;
                    Some(TimelineEvent::Completed)
                }
            }
            Direction::Reverse => {
                self.time_ms -= dt;
                if self.time_ms > 0.0 {
                    return None;
                }
                self.time_ms = 0.0;
                self.iteration = 0;
                self.state = PlaybackState::Idle;
                Some(TimelineEvent::ReverseCompleted)
            }
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Write every tween's values for the current time into the document
    ///
    /// Tweens that have not started yet are rendered first, latest first, and
    /// only when they have rendered before or render immediately; started
    /// tweens follow in order, so the latest started tween wins on shared
    /// properties.
    pub fn render(&mut self, doc: &mut Document) {
        let time = self.time_ms;
        for tween in self.tweens.iter_mut().rev() {
            if tween.start_ms() > time && (tween.has_rendered() || tween.wants_immediate_render()) {
                tween.render(time, doc);
            }
        }
        for tween in self.tweens.iter_mut() {
            if tween.start_ms() <= time {
                tween.render(time, doc);
            }
        }
        self.dirty = false;
    }

    /// Render only if something changed since the last render
    pub fn render_if_dirty(&mut self, doc: &mut Document) {
        if self.dirty {
            self.render(doc);
        }
    }

    /// Restore every touched element to its pre-animation inline style
    pub fn revert(&mut self, doc: &mut Document) {
        for tween in self.tweens.iter_mut().rev() {
            tween.revert(doc);
        }
        self.time_ms = 0.0;
        self.iteration = 0;
        self.state = PlaybackState::Idle;
        self.direction = Direction::Forward;
        self.dirty = false;
    }
}
