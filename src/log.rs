#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        eprintln!(
            "{} {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            format_args!($($arg)*),
        )
    };
}
