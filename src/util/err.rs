/// Converts errors from their error type (of the submodule) to that of
/// a snapline::Error variant.
///
/// ```rust,ignore
/// use snapline::network::NetworkError;
/// snapline::impl_err!(NetworkError, NetworkLoad);
/// ```
pub mod err_macro {
    #[macro_export]
    macro_rules! impl_err {
        ($from:ty, $variant:ident) => {
            impl From<$from> for $crate::Error {
                fn from(value: $from) -> Self {
                    $crate::Error::$variant(value)
                }
            }
        };
    }

    pub use impl_err;
}
