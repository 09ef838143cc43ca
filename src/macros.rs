/// Declares a settings definition: the struct, its factory defaults and the
/// descriptor table consumed by [`Settings`](crate::Settings).
///
/// Each field is written as `"description" name: Type = default`. The struct
/// derives `Debug` and `Clone`; every field type must implement
/// [`Scalar`](crate::Scalar).
///
/// ```
/// field_settings::define_settings! {
///     pub struct EditorSettings {
///         "Folder new documents are saved to"
///         save_dir: String = "%SETTINGS_DIR%/documents".to_string(),
///         "Editor font size in points"
///         font_size: f32 = 14.0,
///     }
/// }
/// ```
#[macro_export]
macro_rules! define_settings {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $desc:literal
                $field:ident : $ty:ty = $default:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $default, )*
                }
            }
        }

        impl $crate::SettingsDefinition for $name {
            fn fields() -> &'static [$crate::FieldDescriptor<Self>] {
                static FIELDS: ::std::sync::OnceLock<::std::vec::Vec<$crate::FieldDescriptor<$name>>> =
                    ::std::sync::OnceLock::new();
                FIELDS.get_or_init(|| {
                    ::std::vec![
                        $(
                            $crate::FieldDescriptor {
                                name: ::core::stringify!($field),
                                description: $desc,
                                kind: <$ty as $crate::Scalar>::KIND,
                                options: <$ty as $crate::Scalar>::options,
                                read: |s: &$name| $crate::Scalar::to_value(&s.$field),
                                encode: |s: &$name| $crate::Scalar::encode(&s.$field),
                                decode: |s: &mut $name, raw: &str| -> ::core::result::Result<(), $crate::ConversionError> {
                                    s.$field = <$ty as $crate::Scalar>::decode(raw)?;
                                    ::core::result::Result::Ok(())
                                },
                                expand: |s: &mut $name, token: &str, replacement: &str| {
                                    $crate::Scalar::expand_placeholder(&mut s.$field, token, replacement)
                                },
                                restore: |live: &mut $name, defaults: &$name| {
                                    live.$field = ::core::clone::Clone::clone(&defaults.$field);
                                },
                            },
                        )*
                    ]
                })
            }
        }
    };
}

/// Declares a fieldless enum usable as a setting. Variants are stored by name.
#[macro_export]
macro_rules! setting_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $name {
            pub const VARIANTS: &'static [&'static str] = &[$(::core::stringify!($variant)),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => ::core::stringify!($variant), )+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::Scalar for $name {
            const KIND: $crate::Kind = $crate::Kind::Enum;

            fn encode(&self) -> ::std::string::String {
                ::std::string::ToString::to_string(self.as_str())
            }

            fn decode(raw: &str) -> ::core::result::Result<Self, $crate::ConversionError> {
                $(
                    if raw == ::core::stringify!($variant) {
                        return ::core::result::Result::Ok($name::$variant);
                    }
                )+
                ::core::result::Result::Err($crate::ConversionError::new(
                    $crate::Kind::Enum,
                    raw,
                    ::std::format!("expected one of {}", Self::VARIANTS.join(", ")),
                ))
            }

            fn to_value(&self) -> $crate::Value {
                $crate::Value::Enum(self.as_str())
            }

            fn options() -> &'static [&'static str] {
                Self::VARIANTS
            }
        }
    };
}
