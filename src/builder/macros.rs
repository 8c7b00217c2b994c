//! Macros for declaring closed event sets.

/// Declare an event enum with one payload per variant.
///
/// Generates the enum, an [`Event`](crate::core::Event) implementation whose
/// `name` is the variant name, and a `From<Payload>` conversion for every
/// variant so payloads can be passed straight to `process`.
///
/// # Example
///
/// ```
/// use turnstile_fsm::core::Event;
/// use turnstile_fsm::event_set;
///
/// #[derive(Debug)]
/// pub struct Coin(pub u32);
/// #[derive(Debug)]
/// pub struct Push;
///
/// event_set! {
///     #[derive(Debug)]
///     pub enum VendingEvent {
///         Coin(Coin),
///         Push(Push),
///     }
/// }
///
/// let event: VendingEvent = Coin(5).into();
/// assert_eq!(event.name(), "Coin");
/// ```
#[macro_export]
macro_rules! event_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident($payload:ty)
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant($payload)
            ),*
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant)),*
                }
            }
        }

        $(
            impl ::core::convert::From<$payload> for $name {
                fn from(event: $payload) -> Self {
                    Self::$variant(event)
                }
            }
        )*
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Event;

    #[derive(Debug, PartialEq)]
    pub struct Start;

    #[derive(Debug, PartialEq)]
    pub struct Stop {
        reason: String,
    }

    event_set! {
        #[derive(Debug, PartialEq)]
        enum TestEvent {
            Start(Start),
            Stop(Stop),
        }
    }

    #[test]
    fn event_set_names_variants() {
        assert_eq!(TestEvent::Start(Start).name(), "Start");
        assert_eq!(
            TestEvent::Stop(Stop {
                reason: "done".into()
            })
            .name(),
            "Stop"
        );
    }

    #[test]
    fn event_set_converts_payloads() {
        let event: TestEvent = Stop {
            reason: "done".into(),
        }
        .into();
        assert_eq!(
            event,
            TestEvent::Stop(Stop {
                reason: "done".into()
            })
        );
    }

    #[test]
    fn event_set_supports_visibility() {
        event_set! {
            pub enum PublicEvent {
                Start(Start),
            }
        }

        let _event = PublicEvent::from(Start);
    }
}
