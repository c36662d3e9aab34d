/// Declares a status/type enum persisted and exchanged as its integer code.
///
/// Generates `code()`, `ALL`, `TryFrom<i32>` (unknown codes are a bad request),
/// `From<_> for i32`, a lowercase `Display`, and serde as the bare integer.
macro_rules! int_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident = $code:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(self) -> i32 {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl TryFrom<i32> for $name {
            type Error = $crate::types::error::AppError;

            fn try_from(code: i32) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok($name::$variant),)+
                    other => Err($crate::types::error::AppError::BadRequest(format!(
                        "unknown {} code {}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> i32 {
                value.code()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $($name::$variant => $label),+
                })
            }
        }
    };
}

/// Decodes a stored integer code. A code the enum does not know means the row is corrupt.
pub(crate) fn decode<T>(code: i32) -> Result<T, crate::types::error::AppError>
where
    T: TryFrom<i32, Error = crate::types::error::AppError>,
{
    T::try_from(code).map_err(|e| crate::types::error::AppError::Internal(format!("stored {e}")))
}
