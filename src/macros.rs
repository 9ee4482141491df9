//! Macros for declaring lifecycle state enums.

/// Declare a fieldless state enum and implement [`State`](crate::core::State) for it.
///
/// The generated enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
/// `Debug` and serde's `Serialize`/`Deserialize`, gets a `Display` impl that
/// prints the variant name, and an `ALL` constant listing every variant in
/// declaration order.
///
/// # Example
///
/// ```
/// use movement_authority::core::State;
/// use movement_authority::state_enum;
///
/// state_enum! {
///     pub enum SignalAspect {
///         Danger,
///         Caution,
///         Clear,
///         Failed,
///     }
///     final: [Failed]
///     error: [Failed]
/// }
///
/// assert_eq!(SignalAspect::Caution.name(), "Caution");
/// assert_eq!(SignalAspect::ALL.len(), 4);
/// assert!(SignalAspect::Failed.is_error());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    _ => false,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.pad($crate::core::State::name(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum Aspect {
            Danger,
            Caution,
            Clear,
            Dark,
        }
        final: [Dark]
        error: [Dark]
    }

    #[test]
    fn generates_state_impl() {
        assert_eq!(Aspect::Danger.name(), "Danger");
        assert!(!Aspect::Clear.is_final());
        assert!(Aspect::Dark.is_final());
        assert!(Aspect::Dark.is_error());
        assert!(!Aspect::Caution.is_error());
    }

    #[test]
    fn all_lists_variants_in_order() {
        assert_eq!(
            Aspect::ALL,
            &[Aspect::Danger, Aspect::Caution, Aspect::Clear, Aspect::Dark]
        );
    }

    #[test]
    fn display_uses_variant_name() {
        assert_eq!(Aspect::Caution.to_string(), "Caution");
    }

    #[test]
    fn works_without_final_or_error() {
        state_enum! {
            pub enum Lever {
                Normal,
                Reverse,
            }
        }

        assert!(!Lever::Normal.is_final());
        assert!(!Lever::Reverse.is_error());
        assert_eq!(Lever::ALL, &[Lever::Normal, Lever::Reverse]);
    }
}
