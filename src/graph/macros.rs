//! Macros for ergonomic state declaration.

/// Generate a state enum and its `State` implementation.
///
/// Variant names double as state names.
///
/// # Example
///
/// ```
/// use flowstate::state_enum;
/// use flowstate::core::State;
///
/// state_enum! {
///     pub enum UploadState {
///         Idle,
///         Uploading,
///         Done,
///         Failed,
///     }
///     final: [Done, Failed]
/// }
///
/// assert_eq!(UploadState::Uploading.name(), "Uploading");
/// assert!(UploadState::Done.is_final());
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
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
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
        }
    };
}
