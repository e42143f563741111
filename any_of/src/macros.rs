/// Names an [`AnyOf`](crate::AnyOf) over the listed alternatives.
///
/// `AnyOf![A, B, C]` is shorthand for `AnyOf<(A, B, C)>`.
///
/// ```
/// use any_of::AnyOf;
///
/// let value: AnyOf![u32, String] = AnyOf::new(String::from("nyc"));
/// assert!(value.is::<String, _>());
/// ```
#[macro_export]
macro_rules! AnyOf {
    ($($alternative:ty),+ $(,)?) => {
        $crate::AnyOf<($($alternative,)+)>
    };
}

/// Invokes `$callback!` once for every supported number of alternatives.
///
/// Each invocation receives the name of the overlay union for that arity, the arity itself, and
/// then one `Type Handler field index` group per position.
macro_rules! for_each_arity {
    ($callback:ident) => {
        $callback! { Overlay1; 1; A0 F0 _0 0 }
        $callback! { Overlay2; 2; A0 F0 _0 0, A1 F1 _1 1 }
        $callback! { Overlay3; 3; A0 F0 _0 0, A1 F1 _1 1, A2 F2 _2 2 }
        $callback! { Overlay4; 4; A0 F0 _0 0, A1 F1 _1 1, A2 F2 _2 2, A3 F3 _3 3 }
        $callback! { Overlay5; 5; A0 F0 _0 0, A1 F1 _1 1, A2 F2 _2 2, A3 F3 _3 3, A4 F4 _4 4 }
        $callback! {
            Overlay6; 6;
            A0 F0 _0 0, A1 F1 _1 1, A2 F2 _2 2, A3 F3 _3 3, A4 F4 _4 4, A5 F5 _5 5
        }
        $callback! {
            Overlay7; 7;
            A0 F0 _0 0, A1 F1 _1 1, A2 F2 _2 2, A3 F3 _3 3, A4 F4 _4 4, A5 F5 _5 5,
            A6 F6 _6 6
        }
        $callback! {
            Overlay8; 8;
            A0 F0 _0 0, A1 F1 _1 1, A2 F2 _2 2, A3 F3 _3 3, A4 F4 _4 4, A5 F5 _5 5,
            A6 F6 _6 6, A7 F7 _7 7
        }
        $callback! {
            Overlay9; 9;
            A0 F0 _0 0, A1 F1 _1 1, A2 F2 _2 2, A3 F3 _3 3, A4 F4 _4 4, A5 F5 _5 5,
            A6 F6 _6 6, A7 F7 _7 7, A8 F8 _8 8
        }
        $callback! {
            Overlay10; 10;
            A0 F0 _0 0, A1 F1 _1 1, A2 F2 _2 2, A3 F3 _3 3, A4 F4 _4 4, A5 F5 _5 5,
            A6 F6 _6 6, A7 F7 _7 7, A8 F8 _8 8, A9 F9 _9 9
        }
        $callback! {
            Overlay11; 11;
            A0 F0 _0 0, A1 F1 _1 1, A2 F2 _2 2, A3 F3 _3 3, A4 F4 _4 4, A5 F5 _5 5,
            A6 F6 _6 6, A7 F7 _7 7, A8 F8 _8 8, A9 F9 _9 9, A10 F10 _10 10
        }
        $callback! {
            Overlay12; 12;
            A0 F0 _0 0, A1 F1 _1 1, A2 F2 _2 2, A3 F3 _3 3, A4 F4 _4 4, A5 F5 _5 5,
            A6 F6 _6 6, A7 F7 _7 7, A8 F8 _8 8, A9 F9 _9 9, A10 F10 _10 10, A11 F11 _11 11
        }
    };
}

pub(crate) use for_each_arity;
