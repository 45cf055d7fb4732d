//! Defines helper macros for generating domain port error enums.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor coverage for generated port errors.
    define_port_error! {
        pub enum ProbePortError {
            Offline { message: String } => "offline: {message}",
            Rejected { status: u16, message: String } => "rejected with {status}: {message}",
        }
    }

    #[test]
    fn string_fields_accept_borrowed_input() {
        let err = ProbePortError::offline("no route to host");
        assert_eq!(err.to_string(), "offline: no route to host");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = ProbePortError::rejected(503_u16, "maintenance");
        assert_eq!(err.to_string(), "rejected with 503: maintenance");
        assert!(matches!(err, ProbePortError::Rejected { status: 503, .. }));
    }
}
