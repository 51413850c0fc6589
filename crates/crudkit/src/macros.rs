/// Declares a struct and implements [`Model`](crate::Model) and
/// [`DataObject`](crate::DataObject) for it.
///
/// Every field type must implement [`Primitive`](crate::Primitive). The
/// logical name of a field is the lower camel case form of its identifier, so
/// `created_at` binds the `createdAt` parameter and receives the
/// `created_at` column.
///
/// ```
/// crudkit::model! {
///     pub struct UserAccount {
///         pub id: i64,
///         pub email: Option<String>,
///         pub status: String,
///     }
/// }
/// ```
#[macro_export]
macro_rules! model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, PartialEq)]
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $ty, )*
        }

        impl $crate::codegen_support::Model for $name {
            const NAME: &'static str = stringify!($name);

            const FIELDS: &'static [$crate::codegen_support::Field] = &[
                $(
                    $crate::codegen_support::Field::new(
                        stringify!($field),
                        <$ty as $crate::codegen_support::Primitive>::TYPE,
                        <$ty as $crate::codegen_support::Primitive>::NULLABLE,
                    ),
                )*
            ];

            fn field_index(name: &str) -> $crate::codegen_support::Option<usize> {
                static NAMES: $crate::codegen_support::OnceLock<Vec<String>> =
                    $crate::codegen_support::OnceLock::new();

                NAMES
                    .get_or_init(|| $crate::model::field_names(Self::FIELDS))
                    .iter()
                    .position(|field| field == name)
            }

            fn get_field(&self, index: usize) -> $crate::codegen_support::Value {
                match Self::FIELDS.get(index).map(|field| field.ident) {
                    $(
                        Some(stringify!($field)) => {
                            $crate::codegen_support::Primitive::to_value(&self.$field)
                        }
                    )*
                    _ => $crate::codegen_support::Value::Null,
                }
            }

            fn set_field(
                &mut self,
                index: usize,
                value: $crate::codegen_support::Value,
            ) -> $crate::codegen_support::Result<()> {
                match Self::FIELDS.get(index).map(|field| field.ident) {
                    $(
                        Some(stringify!($field)) => {
                            self.$field = $crate::codegen_support::Primitive::load(value)?;
                            Ok(())
                        }
                    )*
                    _ => Err($crate::codegen_support::Error::invalid_result(format!(
                        "{} has no field at index {index}",
                        stringify!($name)
                    ))),
                }
            }
        }

        impl $crate::codegen_support::DataObject for $name {
            fn type_name(&self) -> &str {
                stringify!($name)
            }

            fn get(&self, name: &str) -> $crate::codegen_support::Option<$crate::codegen_support::Value> {
                let index = <Self as $crate::codegen_support::Model>::field_index(name)?;
                Some($crate::codegen_support::Model::get_field(self, index))
            }
        }
    };
}

/// Declares a fieldless enum that can be stored in a model field.
///
/// The first variant is the default. A value binds as its variant name to
/// character placeholders and as its zero-based ordinal otherwise, and loads
/// from either form.
///
/// ```
/// crudkit::enumeration! {
///     pub enum Status { Active, Closed }
/// }
/// ```
#[macro_export]
macro_rules! enumeration {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $first:ident $(, $variant:ident )* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            #[default]
            $first,
            $( $variant, )*
        }

        impl $name {
            pub const VARIANTS: &'static [$name] = &[$name::$first, $( $name::$variant, )*];

            pub const fn name(self) -> &'static str {
                match self {
                    $name::$first => stringify!($first),
                    $( $name::$variant => stringify!($variant), )*
                }
            }

            pub fn ordinal(self) -> i32 {
                Self::VARIANTS
                    .iter()
                    .position(|variant| *variant == self)
                    .unwrap_or_default() as i32
            }
        }

        impl $crate::codegen_support::Primitive for $name {
            const TYPE: $crate::codegen_support::Type = $crate::codegen_support::Type::Enum;

            fn load(
                value: $crate::codegen_support::Value,
            ) -> $crate::codegen_support::Result<Self> {
                use $crate::codegen_support::Value;

                let found = match &value {
                    Value::Enum(v) => Self::VARIANTS.iter().find(|variant| variant.name() == v.name),
                    Value::String(v) => Self::VARIANTS.iter().find(|variant| variant.name() == v.as_str()),
                    _ => value
                        .as_i64()
                        .and_then(|ordinal| usize::try_from(ordinal).ok())
                        .and_then(|ordinal| Self::VARIANTS.get(ordinal)),
                };

                match found {
                    Some(variant) => Ok(*variant),
                    None => Err($crate::codegen_support::Error::type_conversion(
                        value,
                        stringify!($name),
                    )),
                }
            }

            fn to_value(&self) -> $crate::codegen_support::Value {
                $crate::codegen_support::Value::Enum($crate::codegen_support::ValueEnum::new(
                    self.name(),
                    self.ordinal(),
                ))
            }
        }
    };
}
