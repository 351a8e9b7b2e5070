//! Declarative record definitions.
//!
//! - [`record!`]: defines a struct and implements [`Record`](crate::Record)
//!   and [`IntoFieldValue`](crate::IntoFieldValue) for it

// ============================================================================
// RECORD MACRO
// ============================================================================

/// Defines a struct whose fields carry rule tags, and implements
/// [`Record`](crate::Record) for it.
///
/// Each field takes any number of `#[key = "rule"]` tags. Only tags whose key
/// matches the validator's annotation key are yielded, in declaration order;
/// untagged fields are never presented to the engine. Tags are stripped from
/// the generated struct; field doc comments are kept and never read as tags.
///
/// The struct also implements [`IntoFieldValue`](crate::IntoFieldValue) as a
/// nested record, so it can be a field of another `record!` struct tagged
/// `nested`.
///
/// # Examples
///
/// ```
/// use ruleval_validator::{record, ViolationKind};
///
/// record! {
///     #[derive(Debug, Clone)]
///     pub struct App {
///         #[validate = "len:5"]
///         pub version: String,
///     }
/// }
///
/// record! {
///     pub struct Deployment {
///         #[validate = "nested"]
///         pub app: App,
///         #[validate = "min:1|max:10"]
///         #[audit = "min:3"]
///         pub replicas: i32,
///     }
/// }
///
/// let deployment = Deployment {
///     app: App { version: "release".into() },
///     replicas: 0,
/// };
/// let report = ruleval_validator::validate(&deployment).unwrap();
/// let kinds: Vec<_> = report.iter().map(|v| (v.field.as_str(), v.kind)).collect();
/// assert_eq!(
///     kinds,
///     vec![("version", ViolationKind::StrLen), ("replicas", ViolationKind::IntMin)]
/// );
/// ```
#[macro_export]
macro_rules! record {
    // Field doc comments stay on the generated field.
    (@munch $name:ident [$($head:tt)*] [$($fields:tt)*] [$($tags:tt)*] [$($docs:tt)*] [$($cur:tt)*]
        #[doc = $doc:literal] $($rest:tt)*
    ) => {
        $crate::record!(@munch $name [$($head)*] [$($fields)*] [$($tags)*]
            [$($docs)* #[doc = $doc]] [$($cur)*] $($rest)*);
    };
    // Any other `#[key = "rule"]` is a rule tag.
    (@munch $name:ident [$($head:tt)*] [$($fields:tt)*] [$($tags:tt)*] [$($docs:tt)*] [$($cur:tt)*]
        #[$key:ident = $rule:literal] $($rest:tt)*
    ) => {
        $crate::record!(@munch $name [$($head)*] [$($fields)*] [$($tags)*]
            [$($docs)*] [$($cur)* ($key $rule)] $($rest)*);
    };
    (@munch $name:ident [$($head:tt)*] [$($fields:tt)*] [$($tags:tt)*] [$($docs:tt)*] [$($cur:tt)*]
        $fvis:vis $field:ident : $fty:ty , $($rest:tt)*
    ) => {
        $crate::record!(@munch $name [$($head)*] [$($fields)* $($docs)* $fvis $field: $fty,]
            [$($tags)* [$field [$($cur)*]]] [] [] $($rest)*);
    };
    (@munch $name:ident [$($head:tt)*] [$($fields:tt)*] [$($tags:tt)*] [$($docs:tt)*] [$($cur:tt)*]
        $fvis:vis $field:ident : $fty:ty
    ) => {
        $crate::record!(@munch $name [$($head)*] [$($fields)* $($docs)* $fvis $field: $fty,]
            [$($tags)* [$field [$($cur)*]]] [] []);
    };
    (@munch $name:ident [$($head:tt)*] [$($fields:tt)*]
        [$([$field:ident [$(($key:ident $rule:literal))*]])*] [] []
    ) => {
        $($head)* {
            $($fields)*
        }

        impl $crate::Record for $name {
            #[allow(unused_mut, unused_variables)]
            fn fields(
                &self,
                annotation_key: &str,
            ) -> $crate::ValidateResult<::std::vec::Vec<$crate::FieldDescriptor<'_>>> {
                let mut fields = ::std::vec::Vec::new();
                $(
                    $(
                        if ::core::stringify!($key) == annotation_key {
                            fields.push($crate::FieldDescriptor::new(
                                ::core::stringify!($field),
                                $rule,
                                $crate::IntoFieldValue::field_value(&self.$field),
                            ));
                        }
                    )*
                )*
                ::core::result::Result::Ok(fields)
            }
        }

        impl $crate::IntoFieldValue for $name {
            fn field_value(&self) -> $crate::FieldValue<'_> {
                $crate::FieldValue::Record(self)
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($body:tt)*
        }
    ) => {
        $crate::record!(@munch $name [$(#[$meta])* $vis struct $name] [] [] [] [] $($body)*);
    };
}
