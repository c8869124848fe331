#[macro_export]
#[doc(hidden)]
macro_rules! cfg_profiler {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "profiler")]
            $item
        )*
    }
}

#[macro_export]
#[doc(hidden)]
macro_rules! cfg_std {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "std")]
            $item
        )*
    }
}

/// Times the enclosing scope under the given `OpKind` when the
/// `profiler` feature is enabled
#[macro_export]
#[doc(hidden)]
macro_rules! profile_scope {
    ($stats:expr, $kind:ident) => {
        #[cfg(feature = "profiler")]
        let _timer = $stats.time($crate::stats::OpKind::$kind);
    };
}
