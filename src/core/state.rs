//! Core State trait for state machine states.
//!
//! Every value the engine can hold as its active state implements this
//! trait, which exposes a cheap discriminator for inspection without side
//! effects.

use crate::timer::TimeoutGuard;
use std::fmt::Debug;

/// Trait for state machine states.
///
/// A state is a value carrying its own local data (retry counters, armed
/// timers, and so on). The engine never inspects that data; it only asks for
/// the discriminator and, when a timer expires, for the state's guard.
///
/// # Example
///
/// ```rust
/// use turnstile_fsm::core::State;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// enum Light {
///     Red,
///     Green,
/// }
///
/// impl State for Light {
///     type Id = Light;
///
///     fn id(&self) -> Light {
///         *self
///     }
///
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Red => "Red",
///             Self::Green => "Green",
///         }
///     }
/// }
///
/// assert_eq!(Light::Green.name(), "Green");
/// ```
pub trait State {
    /// Discriminator identifying which variant is active.
    type Id: Copy + Eq + Debug;

    /// The discriminator of this state. Pure.
    fn id(&self) -> Self::Id;

    /// Get the state's name for display/logging.
    fn name(&self) -> &'static str;

    /// The scoped timer owned by this state, if it has one.
    ///
    /// Default implementation returns `None`.
    fn timer_mut(&mut self) -> Option<&mut TimeoutGuard> {
        None
    }
}

impl<S: State + ?Sized> State for Box<S> {
    type Id = S::Id;

    fn id(&self) -> Self::Id {
        (**self).id()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn timer_mut(&mut self) -> Option<&mut TimeoutGuard> {
        (**self).timer_mut()
    }
}
