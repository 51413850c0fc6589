/// Implements the numeric `From` conversions into [`Value`](crate::stmt::Value).
macro_rules! impl_value_from {
    ( $( $ty:ty => $variant:ident ),+ $(,)? ) => {
        $(
            impl From<$ty> for $crate::stmt::Value {
                fn from(src: $ty) -> Self {
                    Self::$variant(src)
                }
            }
        )+
    };
}
