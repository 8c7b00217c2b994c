//! Dispatch strategies routing `(state, event)` pairs to a handler.
//!
//! All strategies share one contract: given the active state and an event,
//! produce `Some(next)` to replace the state or `None` to stay put. "No
//! transition" is an ordinary outcome, never an error.
//!
//! - [`StateLocal`]: the state sum type handles its own events ([`Reactive`]).
//! - [`External`]: a separate table owns every transition ([`Transitions`]).
//! - [`Virtual`]: boxed trait-object states return boxed successors
//!   ([`Polymorphic`]).

/// Strategy that maps the active state and an event to an optional successor.
pub trait Dispatch<S, E, C> {
    fn execute(&mut self, state: &mut S, event: E, ctx: &mut C) -> Option<S>;
}

/// States that carry their own per-event handlers.
///
/// Implementations match on the event and fall through to a catch-all that
/// returns `None` for events the state does not react to.
pub trait Reactive<E, C>: Sized {
    fn process(&mut self, event: E, ctx: &mut C) -> Option<Self>;
}

/// A transition table owned outside the states.
///
/// The same state types can be driven by different tables, which keeps
/// "what can happen" apart from "who owns the state data".
pub trait Transitions<S, E, C> {
    fn transition(&mut self, state: &mut S, event: E, ctx: &mut C) -> Option<S>;
}

/// Trait-object states whose successors are freshly allocated.
///
/// Implemented on the unsized trait object itself (`dyn MyBase`), so that
/// `Box<Self>` names the owning pointer the engine holds.
pub trait Polymorphic<E, C> {
    fn process(&mut self, event: E, ctx: &mut C) -> Option<Box<Self>>;
}

/// Delegates to [`Reactive::process`] on the state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateLocal;

impl<S, E, C> Dispatch<S, E, C> for StateLocal
where
    S: Reactive<E, C>,
{
    fn execute(&mut self, state: &mut S, event: E, ctx: &mut C) -> Option<S> {
        state.process(event, ctx)
    }
}

/// Delegates to an externally supplied [`Transitions`] table.
#[derive(Clone, Debug, Default)]
pub struct External<T> {
    table: T,
}

impl<T> External<T> {
    pub fn new(table: T) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut T {
        &mut self.table
    }
}

impl<S, E, C, T> Dispatch<S, E, C> for External<T>
where
    T: Transitions<S, E, C>,
{
    fn execute(&mut self, state: &mut S, event: E, ctx: &mut C) -> Option<S> {
        self.table.transition(state, event, ctx)
    }
}

/// Delegates to [`Polymorphic::process`] through the boxed state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Virtual;

impl<S, E, C> Dispatch<Box<S>, E, C> for Virtual
where
    S: Polymorphic<E, C> + ?Sized,
{
    fn execute(&mut self, state: &mut Box<S>, event: E, ctx: &mut C) -> Option<Box<S>> {
        (**state).process(event, ctx)
    }
}
